use async_trait::async_trait;
use reserve_core::{Price, Sats, UsdCents, WallClock};
use thiserror::Error;

/// Errors the futures venue capability can surface.
///
/// Not every operation can produce every kind: `open_short` alone can
/// surface `InsufficientMargin` and `RateLimited`; `close_position` and
/// `mark` can surface `NotFound`. All three can time out or hit a
/// transport-level failure (§6, §7).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VenueError {
    #[error("venue call timed out")]
    Timeout,

    #[error("venue rate limited the request")]
    RateLimited,

    #[error("venue transport error: {0}")]
    Transport(String),

    #[error("insufficient margin to open position")]
    InsufficientMargin,

    #[error("position not found: {0}")]
    NotFound(String),

    #[error("unknown venue error: {0}")]
    Unknown(String),
}

pub type VenueResult<T> = std::result::Result<T, VenueError>;

impl From<VenueError> for reserve_core::HedgeFailureReason {
    fn from(err: VenueError) -> Self {
        use reserve_core::HedgeFailureReason as Reason;
        match err {
            VenueError::Timeout => Reason::Timeout,
            VenueError::RateLimited => Reason::RateLimited,
            VenueError::Transport(msg) => Reason::Transport(msg),
            VenueError::InsufficientMargin => Reason::InsufficientMargin,
            VenueError::NotFound(msg) => Reason::NotFound(msg),
            VenueError::Unknown(msg) => Reason::Unknown(msg),
        }
    }
}

/// Result of a successful `open_short` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenShortOutcome {
    pub position_id: String,
    pub entry_price: Price,
    pub initial_unrealized_pnl_usd: UsdCents,
}

/// Result of a successful `close_position` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosePositionOutcome {
    pub realized_pnl_usd: UsdCents,
    pub fees_usd: UsdCents,
    pub net_pnl_usd: UsdCents,
    pub closed_at: WallClock,
}

/// Result of a successful `mark` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkOutcome {
    pub mark_price: Price,
    pub unrealized_pnl_usd: UsdCents,
}

/// Capability contract for the external futures venue used to delta-hedge
/// the spot BTC float (§4.3, §6). The integrator supplies a real
/// implementation (signing, REST transport); this crate only specifies the
/// boundary.
#[async_trait]
pub trait FuturesVenue: Send + Sync {
    /// Open a short position of `quantity_btc` at `leverage`x.
    async fn open_short(
        &self,
        symbol: &str,
        quantity_btc: Sats,
        leverage: u8,
    ) -> VenueResult<OpenShortOutcome>;

    /// Close the position identified by `position_id` in full.
    async fn close_position(&self, position_id: &str) -> VenueResult<ClosePositionOutcome>;

    /// Fetch the current mark price and unrealized PnL for `position_id`.
    async fn mark(&self, position_id: &str) -> VenueResult<MarkOutcome>;
}
