//! Routing attempt state machine.

use serde::{Deserialize, Serialize};

/// Step of a single routing attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    /// Nothing started yet.
    Idle,
    /// Reading subject and body from the host.
    Reading,
    /// Waiting on the relay.
    Classifying,
    /// Token, REST id and find-or-create of the destination folder.
    ResolvingFolder,
    /// Move request in flight.
    Moving,
    /// Message moved.
    Done,
    /// Any step failed.
    Error,
}

impl WorkflowState {
    /// Check if this state allows transitioning to another state.
    pub fn can_transition_to(&self, target: WorkflowState) -> bool {
        use WorkflowState::*;

        if target == Error {
            return !self.is_terminal();
        }

        matches!(
            (self, target),
            (Idle, Reading)
                | (Reading, Classifying)
                | (Classifying, ResolvingFolder)
                | (ResolvingFolder, Moving)
                | (Moving, Done)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Error)
    }
}

impl std::fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Reading => "reading",
            Self::Classifying => "classifying",
            Self::ResolvingFolder => "resolving_folder",
            Self::Moving => "moving",
            Self::Done => "done",
            Self::Error => "error",
        };
        write!(f, "{s}")
    }
}
