//! Folder router — read, classify, find-or-create folder, move.
//!
//! Flow for one attempt, each step awaited before the next starts:
//! 1. Read subject and body from the host
//! 2. Classify through the relay
//! 3. Get a REST token, convert the item id, find or create the folder
//! 4. Move the message
//!
//! A failure at any step lands in `Error` and is shown as `Error: {message}`.
//! Nothing is retried. If the move fails right after this attempt created
//! the folder, the folder is deleted again.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::relay_client::{ClassifyClient, HttpRelayClient};
use super::state::WorkflowState;
use super::status::{Status, StatusSink};
use crate::config::WorkflowConfig;
use crate::error::WorkflowError;
use crate::mail::{AccessToken, GraphClient, MailFolder, MailHost, MoveOperation};

/// Result of a successful routing attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingOutcome {
    /// Folder display name the message was moved to.
    pub folder: String,
    /// Id of that folder.
    pub folder_id: String,
    /// Whether the folder was created by this attempt.
    pub created_folder: bool,
}

/// A failed routing attempt and the step it failed in.
#[derive(Debug, thiserror::Error)]
#[error("{error} (while {state})")]
pub struct RoutingFailure {
    pub state: WorkflowState,
    #[source]
    pub error: WorkflowError,
}

/// Destination chosen by find-or-create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFolder {
    pub id: String,
    pub created: bool,
}

/// Routes the host's current email into its category folder.
pub struct FolderRouter {
    host: Arc<dyn MailHost>,
    classifier: Arc<dyn ClassifyClient>,
    status: Arc<dyn StatusSink>,
    mail_api_base: String,
    http: reqwest::Client,
}

impl FolderRouter {
    pub fn new(
        host: Arc<dyn MailHost>,
        classifier: Arc<dyn ClassifyClient>,
        status: Arc<dyn StatusSink>,
        mail_api_base: impl Into<String>,
    ) -> Self {
        Self {
            host,
            classifier,
            status,
            mail_api_base: mail_api_base.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Router that classifies through the relay at `config.relay_endpoint`
    /// and talks to the mail API at `config.mail_api_base`.
    pub fn from_config(
        host: Arc<dyn MailHost>,
        status: Arc<dyn StatusSink>,
        config: &WorkflowConfig,
    ) -> Self {
        let classifier = HttpRelayClient::new(config.relay_endpoint.clone());
        Self::new(host, Arc::new(classifier), status, config.mail_api_base.clone())
    }

    /// Overrides the HTTP client used for mail REST calls.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    /// Run one routing attempt for the current email.
    pub async fn organize(&self) -> Result<RoutingOutcome, RoutingFailure> {
        let mut state = WorkflowState::Idle;
        self.status.set_status(&Status::Analyzing);

        match self.run(&mut state).await {
            Ok(outcome) => {
                advance(&mut state, WorkflowState::Done);
                info!(
                    folder = %outcome.folder,
                    created = outcome.created_folder,
                    "Email moved"
                );
                self.status.set_status(&Status::Moved {
                    folder: outcome.folder.clone(),
                });
                Ok(outcome)
            }
            Err(error) => {
                let failed_in = state;
                advance(&mut state, WorkflowState::Error);
                error!(state = %failed_in, error = %error, "Routing failed");
                self.status.set_status(&Status::Failed {
                    message: error.to_string(),
                });
                Err(RoutingFailure {
                    state: failed_in,
                    error,
                })
            }
        }
    }

    async fn run(&self, state: &mut WorkflowState) -> Result<RoutingOutcome, WorkflowError> {
        advance(state, WorkflowState::Reading);
        let email = self.host.read_email().await?;

        advance(state, WorkflowState::Classifying);
        let folder = self.classifier.classify(&email).await?;

        advance(state, WorkflowState::ResolvingFolder);
        let token = self.host.rest_token().await.map_err(|e| {
            warn!(error = %e, "Host refused REST token");
            WorkflowError::AccessToken
        })?;
        let rest_id = self.host.convert_to_rest_id(&self.host.item_id());
        let graph = GraphClient::new(self.mail_api_base.clone(), self.host.user_email())
            .with_client(self.http.clone());
        let destination = resolve_folder(&graph, &token, &folder).await?;

        advance(state, WorkflowState::Moving);
        let op = MoveOperation {
            rest_id,
            destination_folder_id: destination.id.clone(),
        };
        if let Err(e) = graph.move_message(&token, &op).await {
            if destination.created {
                roll_back_folder(&graph, &token, &destination.id).await;
            }
            return Err(e);
        }

        Ok(RoutingOutcome {
            folder,
            folder_id: destination.id,
            created_folder: destination.created,
        })
    }
}

/// Find a folder by exact display name, creating it when absent.
pub async fn resolve_folder(
    graph: &GraphClient,
    token: &AccessToken,
    display_name: &str,
) -> Result<ResolvedFolder, WorkflowError> {
    let folders = graph.list_folders(token).await?;

    if let Some(id) = find_folder_id(&folders, display_name) {
        debug!(folder = display_name, folder_id = %id, "Reusing existing folder");
        return Ok(ResolvedFolder {
            id: id.to_string(),
            created: false,
        });
    }

    let created = graph.create_folder(token, display_name).await?;
    info!(folder = display_name, folder_id = %created.id, "Created folder");
    Ok(ResolvedFolder {
        id: created.id,
        created: true,
    })
}

/// Exact, case-sensitive match on display name; first match wins.
pub fn find_folder_id<'a>(folders: &'a [MailFolder], display_name: &str) -> Option<&'a str> {
    folders
        .iter()
        .find(|f| f.display_name == display_name)
        .map(|f| f.id.as_str())
}

async fn roll_back_folder(graph: &GraphClient, token: &AccessToken, folder_id: &str) {
    match graph.delete_folder(token, folder_id).await {
        Ok(()) => info!(folder_id, "Removed folder created for failed move"),
        Err(e) => warn!(folder_id, error = %e, "Could not remove folder after failed move"),
    }
}

fn advance(state: &mut WorkflowState, next: WorkflowState) {
    debug_assert!(
        state.can_transition_to(next),
        "invalid transition {state} -> {next}"
    );
    debug!(from = %state, to = %next, "Workflow step");
    *state = next;
}
