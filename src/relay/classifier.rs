//! Email classifier — one prompt, one completion, one category.

use std::sync::Arc;

use tracing::{debug, error, warn};

use super::category::Category;
use crate::config::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, RelayConfig};
use crate::error::RelayError;
use crate::llm::{ChatMessage, CompletionRequest, FinishReason, LlmProvider};

/// Sampling settings for classification.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl From<&RelayConfig> for ClassifierConfig {
    fn from(config: &RelayConfig) -> Self {
        Self {
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

/// Classifies emails into a [`Category`] using an LLM.
pub struct Classifier {
    llm: Arc<dyn LlmProvider>,
    config: ClassifierConfig,
}

impl Classifier {
    pub fn new(llm: Arc<dyn LlmProvider>, config: ClassifierConfig) -> Self {
        Self { llm, config }
    }

    /// Classify an email by subject and body.
    ///
    /// Provider failures are not retried. A reply outside the category set
    /// fails with [`RelayError::UnrecognizedCategory`].
    pub async fn classify(&self, subject: &str, body: &str) -> Result<Category, RelayError> {
        let request = CompletionRequest::new(vec![
            ChatMessage::system(system_prompt()),
            ChatMessage::user(user_prompt(subject, body)),
        ])
        .with_temperature(self.config.temperature)
        .with_max_tokens(self.config.max_tokens);

        let response = self.llm.complete(request).await.map_err(|e| {
            error!(model = self.llm.model_name(), error = %e, "Classification error");
            RelayError::Llm(e)
        })?;

        let reply = response.content.trim();
        debug!(
            reply = %reply,
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "Model replied"
        );
        if response.finish_reason == FinishReason::Length {
            warn!(
                max_tokens = self.config.max_tokens,
                "Model reply hit the token limit"
            );
        }

        Category::from_reply(reply).ok_or_else(|| {
            warn!(reply = %reply, "Model reply is not a known category");
            RelayError::UnrecognizedCategory(reply.to_string())
        })
    }
}

// ── Prompt construction ─────────────────────────────────────────────

fn system_prompt() -> String {
    format!(
        "You are an email classifier. Respond with exactly one of these categories: {}",
        Category::vocabulary()
    )
}

fn user_prompt(subject: &str, body: &str) -> String {
    format!("Classify this email:\nSubject: {subject}\nBody: {body}")
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::LlmError;
    use crate::llm::{CompletionResponse, Role};

    /// Replays a fixed reply and records what it was asked.
    struct RecordedLlm {
        reply: Result<String, ()>,
        seen: Mutex<Vec<CompletionRequest>>,
    }

    impl RecordedLlm {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: Err(()),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LlmProvider for RecordedLlm {
        fn model_name(&self) -> &str {
            "recorded"
        }

        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            self.seen.lock().unwrap().push(request);
            match &self.reply {
                Ok(content) => Ok(CompletionResponse {
                    content: content.clone(),
                    input_tokens: 40,
                    output_tokens: 1,
                    finish_reason: FinishReason::Stop,
                }),
                Err(()) => Err(LlmError::RateLimited {
                    provider: "recorded".into(),
                    retry_after: None,
                }),
            }
        }
    }

    #[tokio::test]
    async fn builds_fixed_two_message_prompt() {
        let llm = RecordedLlm::replying("Finance");
        let classifier = Classifier::new(llm.clone(), ClassifierConfig::default());

        let category = classifier
            .classify("Invoice #123", "Please pay by Friday")
            .await
            .unwrap();
        assert_eq!(category, Category::Finance);

        let seen = llm.seen.lock().unwrap();
        let request = &seen[0];
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(
            request.messages[0].content,
            "You are an email classifier. Respond with exactly one of these categories: Personal, Work, Finance, Shopping, Social, Other"
        );
        assert_eq!(request.messages[1].role, Role::User);
        assert_eq!(
            request.messages[1].content,
            "Classify this email:\nSubject: Invoice #123\nBody: Please pay by Friday"
        );
        assert_eq!(request.temperature, Some(0.3));
        assert_eq!(request.max_tokens, Some(50));
    }

    #[tokio::test]
    async fn trims_reply() {
        let classifier = Classifier::new(RecordedLlm::replying("  Work \n"), ClassifierConfig::default());
        assert_eq!(classifier.classify("", "").await.unwrap(), Category::Work);
    }

    #[tokio::test]
    async fn empty_email_is_still_sent() {
        let llm = RecordedLlm::replying("Other");
        let classifier = Classifier::new(llm.clone(), ClassifierConfig::default());
        assert_eq!(classifier.classify("", "").await.unwrap(), Category::Other);
        assert_eq!(
            llm.seen.lock().unwrap()[0].messages[1].content,
            "Classify this email:\nSubject: \nBody: "
        );
    }

    #[tokio::test]
    async fn same_email_same_category() {
        let classifier = Classifier::new(RecordedLlm::replying("Social"), ClassifierConfig::default());
        let first = classifier.classify("Party Saturday", "Bring snacks").await.unwrap();
        let second = classifier.classify("Party Saturday", "Bring snacks").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn rejects_reply_outside_category_set() {
        let classifier = Classifier::new(
            RecordedLlm::replying("Newsletters"),
            ClassifierConfig::default(),
        );
        let err = classifier.classify("Weekly digest", "...").await.unwrap_err();
        assert!(matches!(err, RelayError::UnrecognizedCategory(ref r) if r == "Newsletters"));
    }

    #[tokio::test]
    async fn provider_failure_is_llm_error() {
        let classifier = Classifier::new(RecordedLlm::failing(), ClassifierConfig::default());
        let err = classifier.classify("s", "b").await.unwrap_err();
        assert!(matches!(err, RelayError::Llm(LlmError::RateLimited { .. })));
        assert_eq!(err.public_message(), "Classification failed");
    }

    #[test]
    fn config_from_relay_config() {
        let mut relay = RelayConfig::new(secrecy::SecretString::from("k"));
        relay.temperature = 0.0;
        relay.max_tokens = 5;
        let config = ClassifierConfig::from(&relay);
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.max_tokens, 5);
    }
}
