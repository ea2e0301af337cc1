use crate::{Instant, Price, Result, Sats, UsdCents};

/// Current BTC/USD holdings backing protocol liabilities.
///
/// Owned exclusively by the executor that mutates it; this type itself is a
/// plain data carrier so that read-only consumers (the signal generator,
/// analytics, the scheduler) can depend on it without depending on whatever
/// owns the mutation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReserveState {
    pub btc_sats: Sats,
    pub usd_reserves: UsdCents,
    #[cfg_attr(feature = "serde", serde(skip, default = "Instant::now"))]
    pub last_rebalance_at: Instant,
    pub rebalance_count: u32,
}

impl ReserveState {
    pub fn genesis(clock_now: Instant) -> Self {
        Self {
            btc_sats: Sats::ZERO,
            usd_reserves: UsdCents::ZERO,
            last_rebalance_at: clock_now,
            rebalance_count: 0,
        }
    }

    /// USD value of the BTC holding at `price`, floored to the cent.
    pub fn btc_value_usd(&self, price: Price) -> Result<UsdCents> {
        self.btc_sats.value_usd_cents(price.cents_per_btc())
    }

    /// `usd_reserves + btc_value_usd(price)`.
    pub fn total_reserves(&self, price: Price) -> Result<UsdCents> {
        self.usd_reserves.checked_add(self.btc_value_usd(price)?)
    }
}
