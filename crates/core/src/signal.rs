use crate::{Sats, UsdCents};

/// A proposed rebalance action. Both payload variants carry strictly
/// positive amounts; a zero-sized proposal is represented as `Hold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TradeSignal {
    Hold,
    BuyBTC { usd: UsdCents },
    SellBTC { btc: Sats },
}
