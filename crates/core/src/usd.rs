use std::fmt;
use std::ops::{Add, Sub};

use crate::{Error, Result, SATS_PER_BTC};

/// A USD amount, denominated in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UsdCents(i64);

impl UsdCents {
    pub const ZERO: UsdCents = UsdCents(0);

    pub fn new(cents: i64) -> Self {
        UsdCents(cents)
    }

    pub fn value(self) -> i64 {
        self.0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn checked_add(self, other: UsdCents) -> Result<UsdCents> {
        self.0
            .checked_add(other.0)
            .map(UsdCents)
            .ok_or(Error::Overflow)
    }

    pub fn checked_sub(self, other: UsdCents) -> Result<UsdCents> {
        self.0
            .checked_sub(other.0)
            .map(UsdCents)
            .ok_or(Error::Overflow)
    }

    /// Converts this USD amount to sats at `price` (USD cents per whole BTC),
    /// floored toward zero sats (§4.4: `floor(usd * 1e8 / price_cents_per_btc)`).
    pub fn to_sats(self, price_cents_per_btc: i64) -> Result<crate::Sats> {
        if price_cents_per_btc <= 0 {
            return Err(Error::DivisionByZero);
        }
        let numerator = (self.0 as i128) * (SATS_PER_BTC as i128);
        let sats = numerator.div_euclid(price_cents_per_btc as i128);
        if sats > i64::MAX as i128 || sats < i64::MIN as i128 {
            return Err(Error::Overflow);
        }
        Ok(crate::Sats::new(sats as i64))
    }
}

impl Add for UsdCents {
    type Output = UsdCents;
    fn add(self, rhs: UsdCents) -> UsdCents {
        UsdCents(self.0 + rhs.0)
    }
}

impl Sub for UsdCents {
    type Output = UsdCents;
    fn sub(self, rhs: UsdCents) -> UsdCents {
        UsdCents(self.0 - rhs.0)
    }
}

impl fmt::Display for UsdCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dollars = self.0.div_euclid(100);
        let cents = self.0.rem_euclid(100);
        write!(f, "${dollars}.{cents:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_sats_floors_down() {
        // $1.00 at $50,000/BTC (5_000_000 cents/BTC) = 100 / 5_000_000 * 1e8 = 2000 sats
        let usd = UsdCents::new(100);
        assert_eq!(usd.to_sats(5_000_000).unwrap().value(), 2000);
    }

    #[test]
    fn to_sats_rejects_zero_price() {
        let usd = UsdCents::new(100);
        assert_eq!(usd.to_sats(0), Err(Error::DivisionByZero));
    }

    #[test]
    fn display_formats_dollars() {
        assert_eq!(UsdCents::new(12345).to_string(), "$123.45");
    }
}
