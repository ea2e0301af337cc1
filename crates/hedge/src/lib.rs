//! Hedge Coordinator
//!
//! Drives the `FuturesVenue` capability to keep the spot BTC float
//! delta-neutral: opens a short on Buy, closes it on Sell, and degrades to
//! an unhedged but still-executing spot side whenever the venue call fails
//! (§4.3). `HedgeState` ownership (the `active` position and the execution
//! `history`) belongs to whoever drives ticks (`reserve-executor`); this
//! crate only knows how to transition it.

mod config;
mod error;

#[cfg(any(test, feature = "test-util"))]
mod mock;

pub use config::HedgeConfig;
pub use error::Error;
#[cfg(any(test, feature = "test-util"))]
pub use mock::MockVenue;

use std::sync::Arc;

use log::{info, warn};
use reserve_core::{HedgeCloseReport, HedgeFailureReason, HedgeOutcome, HedgePosition, HedgeState, Sats};
use reserve_ports::{Clock, FuturesVenue, MarkOutcome};

pub type Result<T> = std::result::Result<T, Error>;

/// Drives a single reserve's hedge lifecycle against one venue.
pub struct HedgeCoordinator {
    config: HedgeConfig,
    venue: Arc<dyn FuturesVenue>,
}

impl HedgeCoordinator {
    pub fn new(config: HedgeConfig, venue: Arc<dyn FuturesVenue>) -> Self {
        Self { config, venue }
    }

    /// Open a hedge short for `quantity_btc` (Idle -> Opening -> Active/Idle, §4.3).
    /// Returns `Err(AlreadyActive)` only on caller misuse; a venue failure is
    /// reported as `Ok(HedgeOutcome::HedgeFailed(..))` so the spot side can
    /// still proceed.
    pub async fn open(
        &self,
        state: &mut HedgeState,
        quantity_btc: Sats,
        clock: &dyn Clock,
    ) -> Result<HedgeOutcome> {
        if state.is_active() {
            return Err(Error::AlreadyActive);
        }

        let call = self
            .venue
            .open_short(&self.config.symbol, quantity_btc, self.config.leverage);

        match tokio::time::timeout(self.config.venue_timeout, call).await {
            Ok(Ok(outcome)) => {
                info!(
                    "hedge opened: {quantity_btc} short @ {} (position {})",
                    outcome.entry_price, outcome.position_id
                );
                state.cumulative_hedged_btc =
                    state.cumulative_hedged_btc.checked_add(quantity_btc)?;
                state.active = Some(HedgePosition {
                    venue_position_id: outcome.position_id,
                    short_size_btc: quantity_btc,
                    entry_price: outcome.entry_price,
                    opened_at: clock.now(),
                    last_mark: outcome.entry_price,
                    unrealized_pnl_usd: outcome.initial_unrealized_pnl_usd,
                });
                Ok(HedgeOutcome::HedgedAt(outcome.entry_price))
            }
            Ok(Err(venue_err)) => {
                warn!("hedge open_short failed, spot side still executes: {venue_err}");
                Ok(HedgeOutcome::HedgeFailed(venue_err.into()))
            }
            Err(_elapsed) => {
                warn!(
                    "hedge open_short timed out after {:?}, spot side still executes",
                    self.config.venue_timeout
                );
                Ok(HedgeOutcome::HedgeFailed(HedgeFailureReason::Timeout))
            }
        }
    }

    /// Close the active hedge in full (Active -> Closing -> Idle/Active, §4.3).
    /// A close failure retains the position as `Active` and reports
    /// `HedgeFailed`; the caller's spot mutation proceeds regardless.
    pub async fn close(&self, state: &mut HedgeState) -> Result<HedgeOutcome> {
        let position_id = match &state.active {
            Some(position) => position.venue_position_id.clone(),
            None => return Err(Error::NoActivePosition),
        };

        let call = self.venue.close_position(&position_id);

        match tokio::time::timeout(self.config.venue_timeout, call).await {
            Ok(Ok(outcome)) => {
                info!(
                    "hedge closed: position {position_id}, net pnl {}",
                    outcome.net_pnl_usd
                );
                state.active = None;
                Ok(HedgeOutcome::HedgeClosed(HedgeCloseReport {
                    realized_pnl_usd: outcome.realized_pnl_usd,
                    fees_usd: outcome.fees_usd,
                    net_pnl_usd: outcome.net_pnl_usd,
                    closed_at: outcome.closed_at,
                }))
            }
            Ok(Err(venue_err)) => {
                warn!("hedge close_position failed, retaining active position: {venue_err}");
                Ok(HedgeOutcome::HedgeFailed(venue_err.into()))
            }
            Err(_elapsed) => {
                warn!(
                    "hedge close_position timed out after {:?}, retaining active position",
                    self.config.venue_timeout
                );
                Ok(HedgeOutcome::HedgeFailed(HedgeFailureReason::Timeout))
            }
        }
    }

    /// Refresh the mark price and unrealized PnL of the active position, if any.
    /// Returns `Ok(None)` when there is nothing to mark.
    pub async fn mark(&self, state: &mut HedgeState) -> Result<Option<MarkOutcome>> {
        let position_id = match &state.active {
            Some(position) => position.venue_position_id.clone(),
            None => return Ok(None),
        };

        let call = self.venue.mark(&position_id);
        let outcome = match tokio::time::timeout(self.config.venue_timeout, call).await {
            Ok(result) => result?,
            Err(_elapsed) => return Err(Error::Venue(reserve_ports::VenueError::Timeout)),
        };

        if let Some(active) = state.active.as_mut() {
            active.last_mark = outcome.mark_price;
            active.unrealized_pnl_usd = outcome.unrealized_pnl_usd;
        }
        Ok(Some(outcome))
    }
}
