use std::fmt;

use crate::{Error, Result};

/// BTC spot price expressed as USD cents per whole bitcoin.
///
/// The distilled spec allows "micro-USD per BTC or equivalent fixed-point";
/// cents-per-BTC is the equivalent chosen here because it is exactly the
/// unit the Executor's own formulas are written in (§4.4:
/// `price_cents_per_btc = price_usd_per_btc * 100`), so no further scaling
/// is needed at the call sites that matter most.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Price(i64);

impl Price {
    pub fn from_usd_cents_per_btc(cents_per_btc: i64) -> Result<Self> {
        if cents_per_btc <= 0 {
            return Err(Error::NotPositive);
        }
        Ok(Price(cents_per_btc))
    }

    /// Construct from a whole-dollar price, e.g. `Price::from_usd_per_btc(50_000)`.
    pub fn from_usd_per_btc(usd_per_btc: i64) -> Result<Self> {
        let cents = usd_per_btc
            .checked_mul(100)
            .ok_or(Error::Overflow)?;
        Self::from_usd_cents_per_btc(cents)
    }

    pub fn cents_per_btc(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dollars = self.0.div_euclid(100);
        let cents = self.0.rem_euclid(100);
        write!(f, "${dollars}.{cents:02}/BTC")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive() {
        assert_eq!(Price::from_usd_cents_per_btc(0), Err(Error::NotPositive));
        assert_eq!(Price::from_usd_cents_per_btc(-1), Err(Error::NotPositive));
    }

    #[test]
    fn from_usd_per_btc_scales_to_cents() {
        let p = Price::from_usd_per_btc(50_000).unwrap();
        assert_eq!(p.cents_per_btc(), 5_000_000);
    }

    #[test]
    fn display_formats_price() {
        let p = Price::from_usd_per_btc(52_345).unwrap();
        assert_eq!(p.to_string(), "$52345.00/BTC");
    }
}
