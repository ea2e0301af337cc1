//! Reserve Ports
//!
//! Port definitions (traits) for the Bitcoin float reserve manager.
//! These define the boundary between the reserve-manager domain logic and
//! the infrastructure it is wired to by the integrator (a real futures
//! venue client, a real wall clock).

mod clock;
mod venue;

pub use clock::Clock;
pub use venue::{
    ClosePositionOutcome, FuturesVenue, MarkOutcome, OpenShortOutcome, VenueError, VenueResult,
};
