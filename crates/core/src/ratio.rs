use std::fmt;

use crate::{Error, Result, UsdCents};

const DENOM: i64 = 1_000_000;

/// A bounded rational in `[0, 1]` with 1e-6 resolution, stored as
/// parts-per-million to avoid floating point entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ratio(i64);

impl Ratio {
    pub const ZERO: Ratio = Ratio(0);
    pub const ONE: Ratio = Ratio(DENOM);

    /// Construct from a parts-per-million value in `[0, 1_000_000]`.
    pub fn from_ppm(ppm: i64) -> Result<Self> {
        if !(0..=DENOM).contains(&ppm) {
            return Err(Error::OutOfRange(ppm));
        }
        Ok(Ratio(ppm))
    }

    pub fn ppm(self) -> i64 {
        self.0
    }

    /// Ratio of `numerator / denominator`, floored to the nearest ppm.
    /// Both must be non-negative; returns `Err` if the result would exceed 1.
    pub fn of(numerator: i64, denominator: i64) -> Result<Self> {
        if denominator == 0 {
            return Err(Error::DivisionByZero);
        }
        if numerator < 0 || denominator < 0 {
            return Err(Error::Negative);
        }
        let ppm = ((numerator as i128) * (DENOM as i128)).div_euclid(denominator as i128);
        if ppm > DENOM as i128 {
            return Err(Error::OutOfRange(ppm as i64));
        }
        Ok(Ratio(ppm as i64))
    }

    /// Absolute difference between two ratios, in ppm.
    pub fn abs_diff_ppm(self, other: Ratio) -> i64 {
        (self.0 - other.0).abs()
    }

    /// Signed difference `self - other`, in ppm.
    pub fn diff_ppm(self, other: Ratio) -> i64 {
        self.0 - other.0
    }

    /// Apply this ratio to a USD amount, floored to the cent.
    pub fn apply(self, amount: UsdCents) -> UsdCents {
        let cents = ((amount.value() as i128) * (self.0 as i128)).div_euclid(DENOM as i128);
        UsdCents::new(cents as i64)
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // ppm / 1_000_000 expressed as a percentage with 4 decimal digits,
        // computed with integer division so formatting never touches floats.
        let percent_whole = self.0 / 10_000;
        let percent_frac = self.0 % 10_000;
        write!(f, "{percent_whole}.{percent_frac:04}%")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn of_computes_ppm() {
        // 40 / 100 = 0.40 = 400_000 ppm
        assert_eq!(Ratio::of(40, 100).unwrap().ppm(), 400_000);
    }

    #[test]
    fn of_rejects_over_one() {
        assert!(Ratio::of(101, 100).is_err());
    }

    #[test]
    fn apply_floors_to_cent() {
        let r = Ratio::from_ppm(333_333).unwrap(); // ~1/3
        // 100 cents * 1/3 = 33.3333 -> floors to 33
        assert_eq!(r.apply(UsdCents::new(100)).value(), 33);
    }

    #[test]
    fn diff_ppm_is_signed() {
        let a = Ratio::from_ppm(400_000).unwrap();
        let b = Ratio::from_ppm(950_000).unwrap();
        assert_eq!(b.diff_ppm(a), 550_000);
        assert_eq!(a.diff_ppm(b), -550_000);
    }
}
