//! Construction and validation error taxonomy.

/// Errors raised while building or running the engine.
///
/// Construction errors (shape mismatches, invalid parameters) are fatal and
/// surfaced immediately; the engine never attempts to recover from them and
/// never returns a partial trajectory.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("shape mismatch: {what} expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        what: &'static str,
        expected: (usize, usize),
        got: (usize, usize),
    },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },

    #[error("invalid run configuration: {reason}")]
    InvalidRunConfig { reason: &'static str },
}
