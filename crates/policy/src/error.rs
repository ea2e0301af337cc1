use thiserror::Error;

/// Misconfiguration of an [`crate::AllocationPolicy`]. Surfaced at startup or
/// whenever an operator-supplied policy is re-validated before a tick.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid ratio for {field}: {reason}")]
    InvalidRatio {
        field: &'static str,
        reason: &'static str,
    },

    #[error("invalid float bound: {reason}")]
    InvalidFloor { reason: &'static str },

    #[error("invalid leverage: {reason}")]
    InvalidLeverage { reason: &'static str },
}
