//! Error and outcome types for desk operations.

use thiserror::Error;

use crate::gateway::GatewayError;
use crate::validation::ValidationError;

/// Why a dialog-driven mutation did not happen.
///
/// Both variants have already been shown to the user by the time the caller
/// sees them.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DeskError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// What a closed dialog led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome {
    Added(String),
    Updated(String),
    Deleted(String),
    /// Unrecognized event, or nothing to act on.
    Ignored,
}
