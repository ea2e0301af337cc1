//! Reserve Core Domain
//!
//! Fixed-point monetary primitives for the Bitcoin float reserve manager.
//! This crate contains no async, no I/O, and is 100% unit testable.
//!
//! Money never touches floating point here: USD amounts are `UsdCents`,
//! BTC amounts are `Sats`, allocation ratios are `Ratio` (parts-per-million),
//! and spot price is `Price` (USD cents per whole BTC).

mod error;
mod execution;
mod hedge;
mod price;
mod ratio;
mod reserve_state;
mod sats;
mod signal;
mod time;
mod usd;

pub use error::Error;
pub use execution::TradeExecution;
pub use hedge::{HedgeCloseReport, HedgeFailureReason, HedgeOutcome, HedgePosition, HedgeState};
pub use price::Price;
pub use ratio::Ratio;
pub use reserve_state::ReserveState;
pub use sats::Sats;
pub use signal::TradeSignal;
pub use time::{Instant, WallClock};
pub use usd::UsdCents;

/// Satoshis per whole bitcoin.
pub const SATS_PER_BTC: i64 = 100_000_000;

pub type Result<T> = std::result::Result<T, Error>;
