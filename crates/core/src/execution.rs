use crate::{HedgeOutcome, Instant, Price, Sats, TradeSignal, UsdCents, WallClock};

/// Append-only audit record emitted by the executor for every non-Hold
/// signal it processes. Immutable once emitted; ordered by `at` (ties
/// broken by insertion order into whatever sequence the caller keeps them
/// in — this type carries no ordinal of its own).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TradeExecution {
    pub signal: TradeSignal,
    pub price: Price,
    pub btc_amount_sats: Sats,
    pub usd_amount_cents: UsdCents,
    #[cfg_attr(feature = "serde", serde(skip, default = "Instant::now"))]
    pub at: Instant,
    pub wall_clock_at: WallClock,
    pub reason: String,
    pub hedge_outcome: HedgeOutcome,
    /// Estimated trading fee on the notional, for downstream analytics. The
    /// executor derives this from the 0.1% baseline heuristic whenever no
    /// effective fill price/fee is available from the venue (§4.4).
    pub fee_usd_estimate: UsdCents,
}
