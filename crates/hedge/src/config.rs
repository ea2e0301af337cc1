use std::time::Duration;

/// Hedge Coordinator configuration (§6: resolved externally, passed in).
#[derive(Debug, Clone)]
pub struct HedgeConfig {
    /// Futures symbol to hedge on, e.g. `"BTC-PERP"`.
    pub symbol: String,
    /// Fixed leverage applied to every open (§4.3: protocol constant, default 5x).
    pub leverage: u8,
    /// Deadline for every venue call (§5, default 30s).
    pub venue_timeout: Duration,
}

impl Default for HedgeConfig {
    fn default() -> Self {
        Self {
            symbol: "BTC-PERP".to_string(),
            leverage: 5,
            venue_timeout: Duration::from_secs(30),
        }
    }
}
