//! Folder-routing workflow.
//!
//! One user action runs one [`FolderRouter::organize`] call: read the open
//! email, classify it through the relay, find or create the matching folder
//! and move the message there.

pub mod relay_client;
pub mod router;
pub mod state;
pub mod status;

pub use relay_client::{ClassifyClient, HttpRelayClient};
pub use router::{FolderRouter, ResolvedFolder, RoutingFailure, RoutingOutcome, resolve_folder};
pub use state::WorkflowState;
pub use status::{Status, StatusSink, folder_list};
