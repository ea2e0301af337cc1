use crate::sustainability::sustainability_periods;
use crate::Error;
use reserve_core::{Price, ReserveState, Sats, TradeExecution, TradeSignal, UsdCents};

/// Running cost basis and BTC acquired from buy executions only — sells do
/// not reduce cost basis (§4.6: "pure cost basis of what was bought").
#[derive(Debug, Clone, Copy, Default)]
pub struct PerformanceTracker {
    cost_basis_usd: UsdCents,
    btc_purchased_sats: Sats,
}

impl PerformanceTracker {
    pub fn new() -> Self {
        Self {
            cost_basis_usd: UsdCents::ZERO,
            btc_purchased_sats: Sats::ZERO,
        }
    }

    /// Fold a full execution history into a tracker from scratch.
    pub fn from_history(history: &[TradeExecution]) -> Result<Self, Error> {
        let mut tracker = Self::new();
        for execution in history {
            tracker.record_execution(execution)?;
        }
        Ok(tracker)
    }

    /// Incorporate one more execution. No-op for `SellBTC` executions.
    pub fn record_execution(&mut self, execution: &TradeExecution) -> Result<(), Error> {
        if let TradeSignal::BuyBTC { .. } = execution.signal {
            self.cost_basis_usd = self.cost_basis_usd.checked_add(execution.usd_amount_cents)?;
            self.btc_purchased_sats = self
                .btc_purchased_sats
                .checked_add(execution.btc_amount_sats)?;
        }
        Ok(())
    }

    pub fn cost_basis_usd(&self) -> UsdCents {
        self.cost_basis_usd
    }

    pub fn btc_purchased_sats(&self) -> Sats {
        self.btc_purchased_sats
    }

    /// Compute the full metrics snapshot for `state` at `price` (§4.6).
    pub fn metrics(
        &self,
        state: &ReserveState,
        price: Price,
        annual_premiums_usd: UsdCents,
        required_yield_btc_per_period: Sats,
    ) -> Result<PerformanceMetrics, Error> {
        let total_btc = state.btc_sats;
        let current_value = state.btc_value_usd(price)?;
        let unrealized_gain = current_value.value() - self.cost_basis_usd.value();

        let unrealized_gain_ratio_ppm = if self.cost_basis_usd.is_zero() {
            0
        } else {
            ((unrealized_gain as i128) * 1_000_000).div_euclid(self.cost_basis_usd.value() as i128)
                as i64
        };

        let average_purchase_price_cents_per_btc = if total_btc.is_zero() {
            0
        } else {
            ((self.cost_basis_usd.value() as i128) * (reserve_core::SATS_PER_BTC as i128))
                .div_euclid(total_btc.value() as i128) as i64
        };

        let periods_of_yield_coverage = sustainability_periods(
            state,
            price,
            required_yield_btc_per_period,
            annual_premiums_usd,
        )?;

        Ok(PerformanceMetrics {
            total_btc,
            current_value_usd: current_value,
            cost_basis_usd: self.cost_basis_usd,
            unrealized_gain_usd: UsdCents::new(unrealized_gain),
            unrealized_gain_ratio_ppm,
            average_purchase_price_cents_per_btc,
            periods_of_yield_coverage,
        })
    }
}

/// Snapshot of reserve performance at a point in time (§3, §4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerformanceMetrics {
    pub total_btc: Sats,
    pub current_value_usd: UsdCents,
    pub cost_basis_usd: UsdCents,
    pub unrealized_gain_usd: UsdCents,
    /// Signed parts-per-million; unlike `reserve_core::Ratio` this is not
    /// bounded to `[0, 1]` since a gain ratio can exceed 100% or be negative.
    pub unrealized_gain_ratio_ppm: i64,
    /// USD cents per whole BTC; `0` means no purchases have been recorded yet.
    pub average_purchase_price_cents_per_btc: i64,
    pub periods_of_yield_coverage: i64,
}
