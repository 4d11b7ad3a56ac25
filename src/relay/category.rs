//! The closed set of folder categories.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A folder category the classifier may choose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Personal,
    Work,
    Finance,
    Shopping,
    Social,
    Other,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 6] = [
        Self::Personal,
        Self::Work,
        Self::Finance,
        Self::Shopping,
        Self::Social,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Personal => "Personal",
            Self::Work => "Work",
            Self::Finance => "Finance",
            Self::Shopping => "Shopping",
            Self::Social => "Social",
            Self::Other => "Other",
        }
    }

    /// Comma-separated names, as used in the classifier prompt.
    pub fn vocabulary() -> String {
        Self::ALL
            .iter()
            .map(Category::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Match a raw model reply against the category set.
    ///
    /// Tolerates case, surrounding whitespace and quotes, and trailing `.`/`!`.
    /// Anything else (extra words, unknown labels) is rejected.
    pub fn from_reply(reply: &str) -> Option<Self> {
        let cleaned = reply
            .trim()
            .trim_matches(|c: char| c == '"' || c == '\'' || c == '`')
            .trim_end_matches(['.', '!'])
            .trim();

        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(cleaned))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_display_order() {
        let names: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
        assert_eq!(
            names,
            vec!["Personal", "Work", "Finance", "Shopping", "Social", "Other"]
        );
    }

    #[test]
    fn vocabulary_lists_every_category() {
        assert_eq!(
            Category::vocabulary(),
            "Personal, Work, Finance, Shopping, Social, Other"
        );
    }

    #[test]
    fn from_reply_accepts_exact_labels() {
        for category in Category::ALL {
            assert_eq!(Category::from_reply(category.as_str()), Some(category));
        }
    }

    #[test]
    fn from_reply_normalizes_noise() {
        assert_eq!(Category::from_reply("  finance\n"), Some(Category::Finance));
        assert_eq!(Category::from_reply("\"Work\""), Some(Category::Work));
        assert_eq!(Category::from_reply("Shopping."), Some(Category::Shopping));
        assert_eq!(Category::from_reply("SOCIAL!"), Some(Category::Social));
    }

    #[test]
    fn from_reply_rejects_unknown() {
        assert_eq!(Category::from_reply("Spam"), None);
        assert_eq!(Category::from_reply("Category: Work"), None);
        assert_eq!(Category::from_reply(""), None);
    }

    #[test]
    fn serde_uses_display_name() {
        assert_eq!(serde_json::to_value(Category::Finance).unwrap(), "Finance");
        let parsed: Category = serde_json::from_str("\"Other\"").unwrap();
        assert_eq!(parsed, Category::Other);
    }
}
