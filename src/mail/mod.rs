//! Mail-side plumbing: the host client seam, the REST client and the
//! value types they exchange.

pub mod graph;
pub mod host;
pub mod types;

pub use graph::GraphClient;
pub use host::MailHost;
pub use types::{AccessToken, EmailContent, MailFolder, MoveOperation, RestId};
