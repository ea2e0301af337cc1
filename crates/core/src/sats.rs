use std::fmt;
use std::ops::{Add, Sub};

use crate::{Error, Result, SATS_PER_BTC};

/// An amount of bitcoin, denominated in satoshis.
///
/// `Sats` never represents a negative holding in `ReserveState`, but signed
/// arithmetic is allowed so intermediate deltas (e.g. a proposed sell size)
/// can be computed and checked before being applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sats(i64);

impl Sats {
    pub const ZERO: Sats = Sats(0);

    pub fn new(sats: i64) -> Self {
        Sats(sats)
    }

    /// Construct from a whole-and-fractional BTC amount already scaled to sats.
    pub fn from_btc_sats(sats: i64) -> Self {
        Sats(sats)
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

    pub fn checked_add(self, other: Sats) -> Result<Sats> {
        self.0.checked_add(other.0).map(Sats).ok_or(Error::Overflow)
    }

    pub fn checked_sub(self, other: Sats) -> Result<Sats> {
        self.0.checked_sub(other.0).map(Sats).ok_or(Error::Overflow)
    }

    /// Value of this many sats at `price` (USD cents per whole BTC), floored to cents.
    pub fn value_usd_cents(self, price_cents_per_btc: i64) -> Result<crate::UsdCents> {
        let numerator = (self.0 as i128) * (price_cents_per_btc as i128);
        let cents = numerator.div_euclid(SATS_PER_BTC as i128);
        if cents > i64::MAX as i128 || cents < i64::MIN as i128 {
            return Err(Error::Overflow);
        }
        Ok(crate::UsdCents::new(cents as i64))
    }
}

impl Add for Sats {
    type Output = Sats;
    fn add(self, rhs: Sats) -> Sats {
        Sats(self.0 + rhs.0)
    }
}

impl Sub for Sats {
    type Output = Sats;
    fn sub(self, rhs: Sats) -> Sats {
        Sats(self.0 - rhs.0)
    }
}

impl fmt::Display for Sats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0.div_euclid(SATS_PER_BTC);
        let frac = self.0.rem_euclid(SATS_PER_BTC);
        write!(f, "{whole}.{frac:08} BTC")
    }
}
