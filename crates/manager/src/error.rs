use thiserror::Error;

/// Errors surfaced by [`crate::ReserveManager`]. Every variant propagates
/// synchronously from the underlying crates; a snapshot that stays stale
/// across the two-phase optimistic-locking retry budget (§5) surfaces as
/// `Execution(reserve_executor::Error::StaleSnapshot)`.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Policy(#[from] reserve_policy::ConfigError),

    #[error(transparent)]
    Execution(#[from] reserve_executor::Error),

    #[error(transparent)]
    Core(#[from] reserve_core::Error),

    #[error(transparent)]
    Analytics(#[from] reserve_analytics::Error),

    #[error(transparent)]
    Hedge(#[from] reserve_hedge::Error),
}
