//! Signal Generator
//!
//! Turns `(ReserveState, price, AllocationPolicy)` into a `TradeSignal`.
//! Pure function, no internal state: `SignalGenerator` is a marker type
//! whose methods are effectively free functions grouped for discoverability.

use reserve_core::{Price, ReserveState, TradeSignal};
use reserve_policy::AllocationPolicy;

/// Stateless signal generator.
pub struct SignalGenerator;

impl SignalGenerator {
    /// Compute the rebalance signal for the given state, price, and policy.
    pub fn generate(
        state: &ReserveState,
        price: Price,
        policy: &AllocationPolicy,
    ) -> Result<TradeSignal, reserve_core::Error> {
        let total = state.total_reserves(price)?;
        if total.is_zero() {
            return Ok(TradeSignal::Hold);
        }

        if !policy.needs_rebalance(state.usd_reserves, state.btc_sats, price)? {
            return Ok(TradeSignal::Hold);
        }

        let current_usd_ratio =
            reserve_core::Ratio::of(state.usd_reserves.value(), total.value())?;
        let target = policy.target_usd_ratio();
        let diff_ppm = current_usd_ratio.diff_ppm(target);

        if diff_ppm > 0 {
            // current_usd_ratio > target: too much USD, buy BTC with the excess.
            let excess_ratio = reserve_core::Ratio::from_ppm(diff_ppm)?;
            let excess_usd = excess_ratio.apply(total);
            if excess_usd.is_positive() {
                Ok(TradeSignal::BuyBTC { usd: excess_usd })
            } else {
                Ok(TradeSignal::Hold)
            }
        } else if diff_ppm < 0 {
            // current_usd_ratio < target: too much BTC, sell the excess.
            let excess_ratio = reserve_core::Ratio::from_ppm(-diff_ppm)?;
            let excess_usd = excess_ratio.apply(total);
            let excess_btc_sats = excess_usd.to_sats(price.cents_per_btc())?;

            if excess_btc_sats.is_zero() {
                return Ok(TradeSignal::Hold);
            }

            let remaining = state.btc_sats.checked_sub(excess_btc_sats)?;
            if remaining < policy.min_float_btc {
                // Floor invariant dominates.
                Ok(TradeSignal::Hold)
            } else {
                Ok(TradeSignal::SellBTC {
                    btc: excess_btc_sats,
                })
            }
        } else {
            Ok(TradeSignal::Hold)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reserve_core::{Instant, Sats, UsdCents};

    fn price(usd_per_btc: i64) -> Price {
        Price::from_usd_per_btc(usd_per_btc).unwrap()
    }

    fn state(btc_whole: i64, usd_cents: i64) -> ReserveState {
        ReserveState {
            btc_sats: Sats::new(btc_whole * reserve_core::SATS_PER_BTC),
            usd_reserves: UsdCents::new(usd_cents),
            last_rebalance_at: Instant::now(),
            rebalance_count: 0,
        }
    }

    #[test]
    fn zero_reserves_hold() {
        let policy = AllocationPolicy::defaults();
        let s = state(0, 0);
        let signal = SignalGenerator::generate(&s, price(50_000), &policy).unwrap();
        assert_eq!(signal, TradeSignal::Hold);
    }

    #[test]
    fn no_drift_holds() {
        let policy = AllocationPolicy::defaults();
        // 40% usd / 60% btc matches target exactly
        let s = state(60, 40_000_000 * 100);
        let signal = SignalGenerator::generate(&s, price(50_000), &policy).unwrap();
        assert_eq!(signal, TradeSignal::Hold);
    }

    #[test]
    fn excess_usd_triggers_buy() {
        let policy = AllocationPolicy::defaults();
        // Scenario 1 from end-to-end tests: 100 BTC, $95,000,000 USD @ $50,000/BTC.
        let s = state(100, 95_000_000 * 100);
        let signal = SignalGenerator::generate(&s, price(50_000), &policy).unwrap();
        match signal {
            TradeSignal::BuyBTC { usd } => {
                // total = 100,000,000; drift = 0.95 - 0.40 = 0.55; excess = 0.55 * 100,000,000
                assert_eq!(usd.value(), 55_000_000 * 100);
            }
            other => panic!("expected BuyBTC, got {other:?}"),
        }
    }

    #[test]
    fn floor_dominates_sell() {
        let policy = AllocationPolicy::defaults();
        // Scenario 2: btc=50 BTC (== min_float), usd=$0.
        let s = state(50, 0);
        let signal = SignalGenerator::generate(&s, price(50_000), &policy).unwrap();
        assert_eq!(signal, TradeSignal::Hold);
    }

    #[test]
    fn excess_btc_triggers_sell_above_floor() {
        let policy = AllocationPolicy::defaults();
        // 200 BTC, $0 USD: all BTC, way over target; floor allows selling down to 50 BTC.
        let s = state(200, 0);
        let signal = SignalGenerator::generate(&s, price(50_000), &policy).unwrap();
        match signal {
            TradeSignal::SellBTC { btc } => {
                assert!(btc.value() > 0);
                let remaining = s.btc_sats.checked_sub(btc).unwrap();
                assert!(remaining >= policy.min_float_btc);
            }
            other => panic!("expected SellBTC, got {other:?}"),
        }
    }

    #[test]
    fn determinism_same_inputs_same_signal() {
        let policy = AllocationPolicy::defaults();
        let s = state(100, 95_000_000 * 100);
        let a = SignalGenerator::generate(&s, price(50_000), &policy).unwrap();
        let b = SignalGenerator::generate(&s, price(50_000), &policy).unwrap();
        assert_eq!(a, b);
    }
}
