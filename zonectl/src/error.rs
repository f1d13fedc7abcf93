/// Result type for all controller operations
pub type Result<T> = std::result::Result<T, ControllerError>;

/// Error type covering every failure the core can surface to a caller
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// The network scan could not enumerate any transport. The registry is
    /// left untouched when this is returned.
    #[error("discovery failed: {0}")]
    Discovery(String),

    /// A specific speaker stopped responding. The selection is not cleared;
    /// subsequent calls for the same speaker surface the same error until a
    /// rescan or re-selection.
    #[error("speaker {uid} unavailable: {reason}")]
    DeviceUnavailable { uid: String, reason: String },

    /// The local store is unreachable or corrupt.
    #[error("persistence error: {0}")]
    Persistence(#[from] rusqlite::Error),

    /// An operation requiring a selection was invoked without one, or an
    /// argument was outside its documented range. A caller bug, not an
    /// expected runtime state.
    #[error("precondition violated: {0}")]
    Precondition(String),
}
