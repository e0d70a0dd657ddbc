//! Error types for projection computation

use thiserror::Error;

/// Errors raised by the projection engine.
///
/// There is a single `InvalidInput` kind: validation happens up front and the
/// computation is rejected before any output is produced. Inputs must be
/// corrected by the caller (typically clamped in the input layer) rather than
/// retried.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// One of the purchase inputs failed validation
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
