use crate::{Instant, Price, Sats, UsdCents};

/// A single open delta-hedge short position. At most one exists at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HedgePosition {
    pub venue_position_id: String,
    pub short_size_btc: Sats,
    pub entry_price: Price,
    #[cfg_attr(feature = "serde", serde(skip, default = "Instant::now"))]
    pub opened_at: Instant,
    pub last_mark: Price,
    pub unrealized_pnl_usd: UsdCents,
}

/// Outcome of closing a hedge position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HedgeCloseReport {
    pub realized_pnl_usd: UsdCents,
    pub fees_usd: UsdCents,
    pub net_pnl_usd: UsdCents,
    pub closed_at: crate::WallClock,
}

/// A venue-side failure reason carried on an audit record, independent of
/// the capability port's own error type so that this data-model crate never
/// has to depend on the port crate that implements it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HedgeFailureReason {
    Timeout,
    RateLimited,
    Transport(String),
    InsufficientMargin,
    NotFound(String),
    Unknown(String),
}

/// What happened to the hedge side of a spot execution.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HedgeOutcome {
    /// No hedge action was attempted for this execution (e.g. Sell with no
    /// active hedge).
    None,
    /// A hedge was opened successfully at this entry price.
    HedgedAt(Price),
    /// The venue call failed; the spot side still executed (degraded mode).
    HedgeFailed(HedgeFailureReason),
    /// An active hedge was closed as part of this execution.
    HedgeClosed(HedgeCloseReport),
}

/// At most one active hedge, plus the append-only execution log (§3).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HedgeState {
    pub active: Option<HedgePosition>,
    pub cumulative_hedged_btc: Sats,
    pub history: Vec<crate::TradeExecution>,
}

impl HedgeState {
    pub fn new() -> Self {
        Self {
            active: None,
            cumulative_hedged_btc: Sats::ZERO,
            history: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}

impl Default for HedgeState {
    fn default() -> Self {
        Self::new()
    }
}
