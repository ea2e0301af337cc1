//! Allocation Policy
//!
//! Pure functions over the target allocation invariant: target USD share,
//! drift threshold, and the min/max BTC float bounds. Nothing here performs
//! I/O or holds mutable state; an `AllocationPolicy` is constructed by the
//! caller from already-resolved configuration (§6: "the core never reads
//! environment") and is immutable for the duration of a decision cycle.

mod error;
mod urgency;

pub use error::ConfigError;
pub use urgency::Urgency;

use reserve_core::{Price, Ratio, Sats, UsdCents};
use std::time::Duration;

/// Target allocation and rebalance thresholds for the reserve float.
#[derive(Debug, Clone, Copy)]
pub struct AllocationPolicy {
    /// Floor: the reserve must never hold fewer BTC than this.
    pub min_float_btc: Sats,
    /// Ceiling: the reserve must never (intentionally) hold more BTC than this.
    pub max_float_btc: Sats,
    /// Target share of total reserves held as USD, in `(0, 1)`.
    pub target_usd_ratio: Ratio,
    /// Drift beyond which a rebalance is triggered, in `(0, 1)`.
    pub rebalance_threshold: Ratio,
    /// Whether periodic dollar-cost-averaging into BTC is enabled.
    pub dca_enabled: bool,
    /// Period between DCA buys, when enabled.
    pub dca_period: Duration,
    /// Fixed leverage the Hedge Coordinator applies to every open, in `1..=20`
    /// (§6). Policy owns validation of this bound even though the value is
    /// consumed by `reserve-hedge::HedgeConfig`, since policy validation is
    /// the one gate every tick passes through.
    pub hedge_leverage: u8,
}

impl AllocationPolicy {
    /// Construct the protocol defaults: 40% USD target, 10% drift threshold,
    /// 50 BTC floor, 10,000 BTC ceiling, DCA disabled.
    pub fn defaults() -> Self {
        Self {
            min_float_btc: Sats::new(50 * reserve_core::SATS_PER_BTC),
            max_float_btc: Sats::new(10_000 * reserve_core::SATS_PER_BTC),
            target_usd_ratio: Ratio::from_ppm(400_000).expect("400_000 ppm is in range"),
            rebalance_threshold: Ratio::from_ppm(100_000).expect("100_000 ppm is in range"),
            dca_enabled: false,
            dca_period: Duration::from_secs(7 * 24 * 3600),
            hedge_leverage: 5,
        }
    }

    /// Validate this policy. No rebalance may proceed with an invalid policy (§7).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rebalance_threshold.ppm() == 0 {
            return Err(ConfigError::InvalidRatio {
                field: "rebalance_threshold",
                reason: "must be strictly positive",
            });
        }
        if self.target_usd_ratio.ppm() == 0 || self.target_usd_ratio.ppm() == Ratio::ONE.ppm() {
            return Err(ConfigError::InvalidRatio {
                field: "target_usd_ratio",
                reason: "must be strictly between 0 and 1",
            });
        }
        if self.min_float_btc.value() < 0 {
            return Err(ConfigError::InvalidFloor {
                reason: "min_float_btc must be non-negative",
            });
        }
        if self.max_float_btc <= self.min_float_btc {
            return Err(ConfigError::InvalidFloor {
                reason: "max_float_btc must exceed min_float_btc",
            });
        }
        if self.hedge_leverage < 1 || self.hedge_leverage > 20 {
            return Err(ConfigError::InvalidLeverage {
                reason: "hedge_leverage must be in 1..=20",
            });
        }
        Ok(())
    }

    pub fn target_usd_ratio(&self) -> Ratio {
        self.target_usd_ratio
    }

    /// Current USD share of total reserves at `price`. `None` if total reserves are zero.
    pub fn usd_ratio(
        usd_reserves: UsdCents,
        btc_sats: Sats,
        price: Price,
    ) -> Result<Option<Ratio>, reserve_core::Error> {
        let btc_value = btc_sats.value_usd_cents(price.cents_per_btc())?;
        let total = usd_reserves.checked_add(btc_value)?;
        if total.is_zero() {
            return Ok(None);
        }
        Ok(Some(Ratio::of(usd_reserves.value(), total.value())?))
    }

    /// Whether the current allocation has drifted beyond `rebalance_threshold`
    /// from `target_usd_ratio` (§4.1). Returns `false` when total reserves are zero.
    pub fn needs_rebalance(
        &self,
        usd_reserves: UsdCents,
        btc_sats: Sats,
        price: Price,
    ) -> Result<bool, reserve_core::Error> {
        let ratio = match Self::usd_ratio(usd_reserves, btc_sats, price)? {
            Some(r) => r,
            None => return Ok(false),
        };
        let drift = ratio.abs_diff_ppm(self.target_usd_ratio);
        Ok(drift > self.rebalance_threshold.ppm())
    }

    /// Classify rebalance urgency by drift magnitude (§4.1 fixed bands).
    pub fn urgency(
        &self,
        usd_reserves: UsdCents,
        btc_sats: Sats,
        price: Price,
    ) -> Result<Urgency, reserve_core::Error> {
        let ratio = match Self::usd_ratio(usd_reserves, btc_sats, price)? {
            Some(r) => r,
            None => return Ok(Urgency::Low),
        };
        let drift_ppm = ratio.abs_diff_ppm(self.target_usd_ratio);
        Ok(Urgency::from_drift_ppm(drift_ppm))
    }

    /// Split an incoming USD surplus between the USD and BTC sides per the
    /// target ratio (§4.1), e.g. when allocating an incoming premium.
    /// Non-positive surplus passes through entirely to the USD side.
    /// Any one-cent rounding residual from the split is attributed to USD.
    pub fn split_surplus(&self, surplus_cents: UsdCents) -> (UsdCents, UsdCents) {
        if !surplus_cents.is_positive() {
            return (surplus_cents, UsdCents::ZERO);
        }
        let to_usd = self.target_usd_ratio.apply(surplus_cents);
        let to_btc = surplus_cents - to_usd;
        (to_usd, to_btc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(usd_per_btc: i64) -> Price {
        Price::from_usd_per_btc(usd_per_btc).unwrap()
    }

    #[test]
    fn defaults_validate() {
        assert!(AllocationPolicy::defaults().validate().is_ok());
    }

    #[test]
    fn needs_rebalance_false_on_zero_reserves() {
        let policy = AllocationPolicy::defaults();
        let result = policy
            .needs_rebalance(UsdCents::ZERO, Sats::ZERO, price(50_000))
            .unwrap();
        assert!(!result);
    }

    #[test]
    fn needs_rebalance_detects_drift() {
        let policy = AllocationPolicy::defaults();
        // 100 BTC @ $50k = $5,000,000; $95,000,000 USD -> usd_ratio ~0.95
        let btc = Sats::new(100 * reserve_core::SATS_PER_BTC);
        let usd = UsdCents::new(95_000_000 * 100);
        assert!(
            policy
                .needs_rebalance(usd, btc, price(50_000))
                .unwrap()
        );
    }

    #[test]
    fn urgency_bands() {
        let policy = AllocationPolicy::defaults();
        let btc = Sats::new(100 * reserve_core::SATS_PER_BTC);

        // drift ~0.55 -> Critical (> 0.25)
        let usd = UsdCents::new(95_000_000 * 100);
        assert_eq!(
            policy.urgency(usd, btc, price(50_000)).unwrap(),
            Urgency::Critical
        );

        // drift ~0 -> Low
        let usd_balanced = UsdCents::new(3_333_333 * 100);
        assert_eq!(
            policy.urgency(usd_balanced, btc, price(50_000)).unwrap(),
            Urgency::Low
        );
    }

    #[test]
    fn split_surplus_passes_through_non_positive() {
        let policy = AllocationPolicy::defaults();
        let (usd, btc) = policy.split_surplus(UsdCents::new(-500));
        assert_eq!(usd.value(), -500);
        assert_eq!(btc.value(), 0);
    }

    #[test]
    fn split_surplus_respects_target_ratio() {
        let policy = AllocationPolicy::defaults();
        let (to_usd, to_btc) = policy.split_surplus(UsdCents::new(10_000));
        assert_eq!(to_usd.value(), 4_000); // 40% of 10,000
        assert_eq!(to_btc.value(), 6_000);
        assert_eq!((to_usd + to_btc).value(), 10_000);
    }

    #[test]
    fn split_surplus_residual_goes_to_usd() {
        // target ratio with a fraction that leaves a 1-cent residual
        let mut policy = AllocationPolicy::defaults();
        policy.target_usd_ratio = Ratio::from_ppm(333_333).unwrap(); // ~1/3
        let (to_usd, to_btc) = policy.split_surplus(UsdCents::new(100));
        // 100 * 0.333333 = 33.3333 -> floors to 33; residual of 1 stays on USD side
        // via to_usd = 33, to_btc = 100 - 33 = 67 (whole complement, no separate residual bucket)
        assert_eq!((to_usd + to_btc).value(), 100);
        assert_eq!(to_usd.value(), 33);
    }

    #[test]
    fn invalid_policy_rejected() {
        let mut policy = AllocationPolicy::defaults();
        policy.max_float_btc = policy.min_float_btc;
        assert!(matches!(
            policy.validate(),
            Err(ConfigError::InvalidFloor { .. })
        ));
    }

    #[test]
    fn leverage_out_of_range_rejected() {
        let mut policy = AllocationPolicy::defaults();
        policy.hedge_leverage = 0;
        assert!(matches!(
            policy.validate(),
            Err(ConfigError::InvalidLeverage { .. })
        ));

        policy.hedge_leverage = 21;
        assert!(matches!(
            policy.validate(),
            Err(ConfigError::InvalidLeverage { .. })
        ));

        policy.hedge_leverage = 20;
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn target_usd_ratio_of_zero_or_one_rejected() {
        let mut policy = AllocationPolicy::defaults();
        policy.target_usd_ratio = Ratio::ZERO;
        assert!(matches!(
            policy.validate(),
            Err(ConfigError::InvalidRatio {
                field: "target_usd_ratio",
                ..
            })
        ));

        policy.target_usd_ratio = Ratio::ONE;
        assert!(matches!(
            policy.validate(),
            Err(ConfigError::InvalidRatio {
                field: "target_usd_ratio",
                ..
            })
        ));
    }
}
