use crate::Error;
use reserve_core::{Price, ReserveState, Sats, UsdCents, SATS_PER_BTC};

/// Sentinel returned by [`sustainability_periods`] when premiums already
/// cover the yield obligation indefinitely.
pub const UNBOUNDED_PERIODS: i64 = i64::MAX;

/// Input to [`simulate_accumulation`]: a single forward-looking assumption set.
#[derive(Debug, Clone, Copy)]
pub struct SustainabilityScenario {
    /// Per-period BTC price appreciation, as a ratio in `[0, 1]` (e.g. 0.05 = 5%).
    pub btc_appreciation_per_period: reserve_core::Ratio,
    pub annual_premiums_usd: UsdCents,
    pub target_yield_btc_per_period: Sats,
    pub periods: u32,
}

/// One row of a [`simulate_accumulation`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccumulationRow {
    pub period: u32,
    pub btc: Sats,
    pub btc_value: UsdCents,
    pub price: Price,
}

/// How many periods the current BTC holding can cover the yield shortfall
/// not already covered by premiums (§4.5.1). Returns `UNBOUNDED_PERIODS` when
/// premiums already meet or exceed the obligation.
pub fn sustainability_periods(
    state: &ReserveState,
    price: Price,
    required_yield_btc_per_period: Sats,
    annual_premiums_usd: UsdCents,
) -> Result<i64, Error> {
    let required_usd_per_period = required_yield_btc_per_period.value_usd_cents(price.cents_per_btc())?;
    let shortfall = required_usd_per_period.value() - annual_premiums_usd.value();
    if shortfall <= 0 {
        return Ok(UNBOUNDED_PERIODS);
    }
    let btc_value = state.btc_value_usd(price)?;
    Ok(btc_value.value().div_euclid(shortfall))
}

/// Scale a price (USD cents per whole BTC) up by `ratio`, floored to the cent.
fn appreciate(price: Price, ratio: reserve_core::Ratio) -> Result<Price, Error> {
    let cents = price.cents_per_btc();
    let increment = ((cents as i128) * (ratio.ppm() as i128)).div_euclid(1_000_000);
    let new_cents = cents + increment as i64;
    Ok(Price::from_usd_cents_per_btc(new_cents)?)
}

/// Deterministic period-by-period accumulation simulation (§4.5.2). Price
/// appreciates before that period's obligation is computed ("period-end
/// pricing"). Once BTC hits zero it remains zero for all subsequent periods
/// even if a later period would otherwise produce a surplus — exhaustion is
/// terminal, not a floor on a single period's arithmetic.
pub fn simulate_accumulation(
    initial_state: &ReserveState,
    initial_price: Price,
    scenario: &SustainabilityScenario,
) -> Result<Vec<AccumulationRow>, Error> {
    let mut rows = Vec::with_capacity(scenario.periods as usize);
    let mut btc = initial_state.btc_sats;
    let mut price = initial_price;
    let mut exhausted = btc.is_zero();

    for period in 0..scenario.periods {
        price = appreciate(price, scenario.btc_appreciation_per_period)?;

        if !exhausted {
            let required_usd = scenario
                .target_yield_btc_per_period
                .value_usd_cents(price.cents_per_btc())?;
            let surplus = scenario.annual_premiums_usd.value() - required_usd.value();

            if surplus >= 0 {
                let gained = UsdCents::new(surplus).to_sats(price.cents_per_btc())?;
                btc = btc.checked_add(gained)?;
            } else {
                let lost = UsdCents::new(-surplus).to_sats(price.cents_per_btc())?;
                btc = match btc.checked_sub(lost) {
                    Ok(remaining) if !remaining.is_negative() => remaining,
                    _ => {
                        exhausted = true;
                        Sats::ZERO
                    }
                };
            }
        }

        let btc_value = btc.value_usd_cents(price.cents_per_btc())?;
        rows.push(AccumulationRow {
            period,
            btc,
            btc_value,
            price,
        });
    }

    Ok(rows)
}

/// The BTC spot price at which `annual_premiums_usd` exactly covers
/// `target_yield_btc_per_period` (§4.5.3). Errors when the yield is zero.
pub fn break_even_price(
    annual_premiums_usd: UsdCents,
    target_yield_btc_per_period: Sats,
) -> Result<Price, Error> {
    if target_yield_btc_per_period.is_zero() {
        return Err(Error::ZeroYield);
    }
    let numerator = (annual_premiums_usd.value() as i128) * (SATS_PER_BTC as i128);
    let denom = target_yield_btc_per_period.value() as i128;
    let cents = numerator.div_euclid(denom);
    Ok(Price::from_usd_cents_per_btc(cents as i64)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reserve_core::{Instant, Ratio};

    fn state(btc_whole: i64) -> ReserveState {
        ReserveState {
            btc_sats: Sats::new(btc_whole * SATS_PER_BTC),
            usd_reserves: UsdCents::ZERO,
            last_rebalance_at: Instant::now(),
            rebalance_count: 0,
        }
    }

    fn price(usd_per_btc: i64) -> Price {
        Price::from_usd_per_btc(usd_per_btc).unwrap()
    }

    #[test]
    fn bounded_scenario() {
        // btc_value=$10,000,000, required_yield=60 BTC @ $50,000 -> required=$3,000,000
        // premiums=$2,000,000 -> shortfall=$1,000,000 -> periods=10
        let s = state(200); // 200 BTC @ 50,000 = $10,000,000
        let periods = sustainability_periods(
            &s,
            price(50_000),
            Sats::new(60 * SATS_PER_BTC),
            UsdCents::new(2_000_000 * 100),
        )
        .unwrap();
        assert_eq!(periods, 10);
    }

    #[test]
    fn unbounded_scenario() {
        let s = state(200);
        let periods = sustainability_periods(
            &s,
            price(50_000),
            Sats::new(60 * SATS_PER_BTC),
            UsdCents::new(5_000_000 * 100),
        )
        .unwrap();
        assert_eq!(periods, UNBOUNDED_PERIODS);
    }

    #[test]
    fn monotonicity_in_required_yield_and_premiums() {
        // P8: non-increasing in required yield, non-decreasing in premiums.
        let s = state(200);
        let low_yield = sustainability_periods(
            &s,
            price(50_000),
            Sats::new(40 * SATS_PER_BTC),
            UsdCents::new(1_000_000 * 100),
        )
        .unwrap();
        let high_yield = sustainability_periods(
            &s,
            price(50_000),
            Sats::new(80 * SATS_PER_BTC),
            UsdCents::new(1_000_000 * 100),
        )
        .unwrap();
        assert!(high_yield <= low_yield);

        let low_premiums = sustainability_periods(
            &s,
            price(50_000),
            Sats::new(60 * SATS_PER_BTC),
            UsdCents::new(500_000 * 100),
        )
        .unwrap();
        let high_premiums = sustainability_periods(
            &s,
            price(50_000),
            Sats::new(60 * SATS_PER_BTC),
            UsdCents::new(1_500_000 * 100),
        )
        .unwrap();
        assert!(high_premiums >= low_premiums);
    }

    #[test]
    fn break_even_identity() {
        // P9: at price = break_even_price(p, y), required_usd_per_period == p.
        let premiums = UsdCents::new(3_000_000 * 100);
        let yield_btc = Sats::new(60 * SATS_PER_BTC);
        let bep = break_even_price(premiums, yield_btc).unwrap();
        let required = yield_btc.value_usd_cents(bep.cents_per_btc()).unwrap();
        assert_eq!(required.value(), premiums.value());
    }

    #[test]
    fn break_even_rejects_zero_yield() {
        assert_eq!(
            break_even_price(UsdCents::new(100), Sats::ZERO),
            Err(Error::ZeroYield)
        );
    }

    #[test]
    fn accumulation_is_finite_and_deterministic() {
        let scenario = SustainabilityScenario {
            btc_appreciation_per_period: Ratio::from_ppm(50_000).unwrap(), // 5%
            annual_premiums_usd: UsdCents::new(2_000_000 * 100),
            target_yield_btc_per_period: Sats::new(60 * SATS_PER_BTC),
            periods: 5,
        };
        let s = state(200);
        let rows_a = simulate_accumulation(&s, price(50_000), &scenario).unwrap();
        let rows_b = simulate_accumulation(&s, price(50_000), &scenario).unwrap();
        assert_eq!(rows_a.len(), 5);
        assert_eq!(rows_a, rows_b);
    }

    #[test]
    fn accumulation_exhaustion_is_terminal() {
        // Huge yield obligation relative to premiums and starting BTC drains to zero
        // and stays there.
        let scenario = SustainabilityScenario {
            btc_appreciation_per_period: Ratio::ZERO,
            annual_premiums_usd: UsdCents::ZERO,
            target_yield_btc_per_period: Sats::new(10 * SATS_PER_BTC),
            periods: 6,
        };
        let s = state(1);
        let rows = simulate_accumulation(&s, price(50_000), &scenario).unwrap();
        let first_zero = rows.iter().position(|r| r.btc.is_zero()).unwrap();
        assert!(rows[first_zero..].iter().all(|r| r.btc.is_zero()));
    }
}
