use thiserror::Error;

/// Errors the executor can surface. Configuration and state errors propagate
/// synchronously with no mutation (§7); venue errors never appear here — they
/// are captured in `TradeExecution.hedge_outcome` instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("insufficient USD reserves to buy {requested}, have {available}")]
    InsufficientUsd {
        requested: reserve_core::UsdCents,
        available: reserve_core::UsdCents,
    },

    #[error("insufficient BTC reserves to sell {requested}, have {available}")]
    InsufficientBtc {
        requested: reserve_core::Sats,
        available: reserve_core::Sats,
    },

    #[error("sell would breach the BTC float floor: {remaining} < {floor}")]
    FloorViolation {
        remaining: reserve_core::Sats,
        floor: reserve_core::Sats,
    },

    #[error("cannot rebalance a reserve with zero total value")]
    ZeroReserves,

    #[error("reserve snapshot went stale across {retries} retries")]
    StaleSnapshot { retries: u8 },

    #[error(transparent)]
    Core(#[from] reserve_core::Error),

    #[error(transparent)]
    Hedge(#[from] reserve_hedge::Error),
}
