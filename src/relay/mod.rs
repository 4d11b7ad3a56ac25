//! Classification relay.
//!
//! Receives `{subject, body}`, asks the LLM for a category and answers
//! `{folder}`. The provider key never leaves this process.

pub mod category;
pub mod classifier;
pub mod routes;

pub use category::Category;
pub use classifier::{Classifier, ClassifierConfig};
pub use routes::{ClassificationRequest, ClassificationResult, relay_routes};
