//! Control-plane error taxonomy

use rigstudio_client::error::ClientError;
use thiserror::Error;

/// Result type alias for control-plane operations
pub type Result<T> = std::result::Result<T, ControlError>;

/// Errors surfaced by control-plane commands.
///
/// `Conflict`, `DependencyNotReady`, and `Busy` are detected locally and
/// never reach the network. None of these are fatal; the control plane
/// stays usable after any of them.
#[derive(Debug, Error)]
pub enum ControlError {
    /// A job is already running
    #[error("a job is already running")]
    Conflict,

    /// The gate is closed for this job kind
    #[error("leader service is not running")]
    DependencyNotReady,

    /// Another command is still in flight
    #[error("another command is in flight")]
    Busy,

    /// The manager acknowledged the command but reported an error
    #[error("manager rejected command: {0}")]
    RemoteRejected(String),

    /// Transport failure talking to the manager
    #[error(transparent)]
    Transport(#[from] ClientError),
}
