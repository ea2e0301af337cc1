//! Executor
//!
//! Sole mutator of `ReserveState`. `execute` turns a `TradeSignal` into a
//! state transition, a hedge side effect, and an audit record, as one
//! atomic step from the caller's point of view (§4.4). The caller (typically
//! `reserve-manager`) is responsible for the single-writer critical section
//! around this call (§5); `execute` itself only assumes it has exclusive
//! access to the `&mut` state it is given for the duration of the call.

mod error;

pub use error::Error;

use chrono::Utc;
use reserve_core::{
    HedgeOutcome, HedgeState, Price, Ratio, ReserveState, Sats, TradeExecution, TradeSignal,
    UsdCents,
};
use reserve_hedge::HedgeCoordinator;
use reserve_ports::Clock;

pub type Result<T> = std::result::Result<T, Error>;

/// Trading fee heuristic applied when no venue-supplied fill price/fee is
/// available (§4.4): 0.1% of notional, expressed in ppm for `Ratio::apply`.
const BASELINE_FEE_PPM: i64 = 1_000;

/// Stateless orchestrator: all mutable state lives in the `ReserveState` and
/// `HedgeState` the caller passes in.
pub struct Executor;

impl Executor {
    /// Apply `signal` to `state`, calling into `hedge` as required by the
    /// state machine in §4.3, and return the emitted execution (`None` for
    /// `Hold` or a caller-contract Buy-while-Active, both of which leave
    /// state untouched).
    pub async fn execute(
        hedge: &HedgeCoordinator,
        state: &mut ReserveState,
        hedge_state: &mut HedgeState,
        signal: TradeSignal,
        price: Price,
        min_float_btc: Sats,
        reason: impl Into<String>,
        clock: &dyn Clock,
    ) -> Result<Option<TradeExecution>> {
        match signal {
            TradeSignal::Hold => Ok(None),
            TradeSignal::BuyBTC { usd } => {
                if state.total_reserves(price)?.is_zero() {
                    return Err(Error::ZeroReserves);
                }
                Self::execute_buy(hedge, state, hedge_state, usd, price, reason.into(), clock)
                    .await
            }
            TradeSignal::SellBTC { btc } => {
                if state.total_reserves(price)?.is_zero() {
                    return Err(Error::ZeroReserves);
                }
                Self::execute_sell(
                    hedge,
                    state,
                    hedge_state,
                    btc,
                    price,
                    min_float_btc,
                    reason.into(),
                    clock,
                )
                .await
            }
        }
    }

    async fn execute_buy(
        hedge: &HedgeCoordinator,
        state: &mut ReserveState,
        hedge_state: &mut HedgeState,
        usd: UsdCents,
        price: Price,
        reason: String,
        clock: &dyn Clock,
    ) -> Result<Option<TradeExecution>> {
        if hedge_state.is_active() {
            // §4.3 state table: Active + BuyBTC is a caller-contract error,
            // never a second hedge. The signal generator should never emit
            // this, but the executor holds the line regardless.
            return Ok(None);
        }

        if state.usd_reserves < usd {
            return Err(Error::InsufficientUsd {
                requested: usd,
                available: state.usd_reserves,
            });
        }

        let btc_sats = usd.to_sats(price.cents_per_btc())?;

        let hedge_outcome = hedge.open(hedge_state, btc_sats, clock).await?;

        state.usd_reserves = state.usd_reserves.checked_sub(usd)?;
        state.btc_sats = state.btc_sats.checked_add(btc_sats)?;
        state.rebalance_count += 1;
        state.last_rebalance_at = clock.now();

        let execution = TradeExecution {
            signal: TradeSignal::BuyBTC { usd },
            price,
            btc_amount_sats: btc_sats,
            usd_amount_cents: usd,
            at: clock.now(),
            wall_clock_at: Utc::now(),
            reason,
            hedge_outcome,
            fee_usd_estimate: Ratio::from_ppm(BASELINE_FEE_PPM)
                .expect("baseline fee ppm is in range")
                .apply(usd),
        };
        hedge_state.history.push(execution.clone());
        Ok(Some(execution))
    }

    async fn execute_sell(
        hedge: &HedgeCoordinator,
        state: &mut ReserveState,
        hedge_state: &mut HedgeState,
        btc: Sats,
        price: Price,
        min_float_btc: Sats,
        reason: String,
        clock: &dyn Clock,
    ) -> Result<Option<TradeExecution>> {
        if state.btc_sats < btc {
            return Err(Error::InsufficientBtc {
                requested: btc,
                available: state.btc_sats,
            });
        }

        let remaining = state.btc_sats.checked_sub(btc)?;
        if remaining < min_float_btc {
            return Err(Error::FloorViolation {
                remaining,
                floor: min_float_btc,
            });
        }

        let usd = btc.value_usd_cents(price.cents_per_btc())?;

        let hedge_outcome = if hedge_state.is_active() {
            hedge.close(hedge_state).await?
        } else {
            HedgeOutcome::None
        };

        state.btc_sats = remaining;
        state.usd_reserves = state.usd_reserves.checked_add(usd)?;
        state.rebalance_count += 1;
        state.last_rebalance_at = clock.now();

        let execution = TradeExecution {
            signal: TradeSignal::SellBTC { btc },
            price,
            btc_amount_sats: btc,
            usd_amount_cents: usd,
            at: clock.now(),
            wall_clock_at: Utc::now(),
            reason,
            hedge_outcome,
            fee_usd_estimate: Ratio::from_ppm(BASELINE_FEE_PPM)
                .expect("baseline fee ppm is in range")
                .apply(usd),
        };
        hedge_state.history.push(execution.clone());
        Ok(Some(execution))
    }
}
