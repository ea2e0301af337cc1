//! Reserve Analytics
//!
//! Sustainability forecasting (§4.5) and performance tracking (§4.6) for the
//! Bitcoin float reserve. Both are pure computations over a `ReserveState`
//! snapshot and a price; neither crate holds the canonical state itself.

mod error;
mod performance;
mod sustainability;

pub use error::Error;
pub use performance::{PerformanceMetrics, PerformanceTracker};
pub use sustainability::{
    break_even_price, simulate_accumulation, sustainability_periods, AccumulationRow,
    SustainabilityScenario, UNBOUNDED_PERIODS,
};
