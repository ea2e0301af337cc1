use thiserror::Error;

/// Coordinator-level misuse, as distinct from a venue failure (§7: venue
/// errors never propagate as `Err` here, only as `HedgeOutcome::HedgeFailed`
/// on the returned outcome).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("a hedge position is already active; the caller must Hold instead of opening a second one")]
    AlreadyActive,

    #[error("no active hedge position to close")]
    NoActivePosition,

    #[error(transparent)]
    Venue(#[from] reserve_ports::VenueError),

    #[error(transparent)]
    Core(#[from] reserve_core::Error),
}
