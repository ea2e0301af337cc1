//! Rebalance Scheduler
//!
//! Stateless, advisory (§4.7). Combines the allocation policy's urgency
//! classification, the signal generator's proposed action, and a trading
//! cost heuristic into a single `Recommendation` for periodic callers. Never
//! mutates anything and never talks to a venue; `reserve-manager::tick`
//! decides whether to actually act on a recommendation.

use reserve_core::{Price, ReserveState, TradeSignal, UsdCents};
use reserve_policy::{AllocationPolicy, Urgency};
use reserve_signal::SignalGenerator;

/// Trading fee heuristic used for the recommendation's cost estimate only
/// (§4.7: "0.001 * notional"). Independent of the executor's own baseline
/// fee constant since a recommendation may be produced without ever
/// executing anything.
const ESTIMATED_FEE_PPM: i64 = 1_000;

/// An advisory rebalance recommendation for a single tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub should_rebalance: bool,
    pub signal: TradeSignal,
    pub urgency: Urgency,
    pub reason: String,
    pub estimated_cost_usd: UsdCents,
}

pub struct RebalanceScheduler;

impl RebalanceScheduler {
    /// Produce a recommendation for `state` at `price` under `policy` (§4.7).
    /// Read-only and side-effect-free: no venue call, no state mutation.
    pub fn recommend(
        state: &ReserveState,
        price: Price,
        policy: &AllocationPolicy,
    ) -> Result<Recommendation, reserve_core::Error> {
        let signal = SignalGenerator::generate(state, price, policy)?;
        let needs_rebalance =
            policy.needs_rebalance(state.usd_reserves, state.btc_sats, price)?;
        let urgency = policy.urgency(state.usd_reserves, state.btc_sats, price)?;
        let should_rebalance = needs_rebalance && !matches!(signal, TradeSignal::Hold);

        let notional = Self::notional(signal, price)?;
        let estimated_cost_usd = reserve_core::Ratio::from_ppm(ESTIMATED_FEE_PPM)
            .expect("estimated fee ppm is in range")
            .apply(notional);

        let reason = Self::reason(state, price, policy, signal, urgency)?;

        Ok(Recommendation {
            should_rebalance,
            signal,
            urgency,
            reason,
            estimated_cost_usd,
        })
    }

    fn notional(signal: TradeSignal, price: Price) -> Result<UsdCents, reserve_core::Error> {
        match signal {
            TradeSignal::Hold => Ok(UsdCents::ZERO),
            TradeSignal::BuyBTC { usd } => Ok(usd),
            TradeSignal::SellBTC { btc } => btc.value_usd_cents(price.cents_per_btc()),
        }
    }

    fn reason(
        state: &ReserveState,
        price: Price,
        policy: &AllocationPolicy,
        signal: TradeSignal,
        urgency: Urgency,
    ) -> Result<String, reserve_core::Error> {
        let drift_ppm = match AllocationPolicy::usd_ratio(state.usd_reserves, state.btc_sats, price)? {
            Some(ratio) => ratio.diff_ppm(policy.target_usd_ratio()),
            None => 0,
        };
        let direction = if drift_ppm > 0 {
            "over-weight USD"
        } else if drift_ppm < 0 {
            "over-weight BTC"
        } else {
            "on target"
        };
        Ok(format!(
            "{urgency:?} urgency, {direction} by {:.4}%, signal={signal:?}",
            (drift_ppm.unsigned_abs() as f64) / 10_000.0
        ))
    }
}
