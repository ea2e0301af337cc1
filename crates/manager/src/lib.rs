//! Reserve Manager
//!
//! The orchestration facade (§6): the single-writer owner of `ReserveState`
//! and `HedgeState`, exposing exactly the five external operations the core
//! promises to callers — `recommend`, `tick`, `apply_premium_inflow`,
//! `metrics`, `sustainability`, `simulate`.
//!
//! Concurrency (§5) is the two-phase optimistic-locking design the spec
//! recommends: compute the intended signal and perform the venue I/O
//! against a snapshot taken *outside* the lock, then re-acquire the lock,
//! check that `rebalance_count` hasn't moved since the snapshot was taken,
//! and commit. A snapshot that went stale is retried from scratch, at most
//! twice, before surfacing `Error::Execution(reserve_executor::Error::StaleSnapshot)`.
//! No venue call is ever made
//! with the lock held.

mod error;

pub use error::Error;

use std::sync::Arc;

use log::{info, warn};
use reserve_analytics::{
    AccumulationRow, PerformanceMetrics, PerformanceTracker, SustainabilityScenario,
};
use reserve_core::{HedgeOutcome, HedgeState, Price, ReserveState, Sats, TradeExecution, UsdCents};
use reserve_executor::Executor;
use reserve_hedge::HedgeCoordinator;
use reserve_policy::AllocationPolicy;
use reserve_ports::{Clock, FuturesVenue};
use reserve_scheduler::{RebalanceScheduler, Recommendation};
use tokio::sync::RwLock;

pub type Result<T> = std::result::Result<T, Error>;

/// Retries attempted after the first stale snapshot before a tick is
/// abandoned (§5: "at most twice").
const MAX_STALE_RETRIES: u8 = 2;

/// Single-writer orchestrator for one reserve's spot + hedge state.
pub struct ReserveManager {
    state: RwLock<ReserveState>,
    hedge_state: RwLock<HedgeState>,
    performance: RwLock<PerformanceTracker>,
    hedge: HedgeCoordinator,
    clock: Arc<dyn Clock>,
}

impl ReserveManager {
    pub fn new(
        initial_state: ReserveState,
        hedge_config: reserve_hedge::HedgeConfig,
        venue: Arc<dyn FuturesVenue>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            state: RwLock::new(initial_state),
            hedge_state: RwLock::new(HedgeState::new()),
            performance: RwLock::new(PerformanceTracker::new()),
            hedge: HedgeCoordinator::new(hedge_config, venue),
            clock,
        }
    }

    /// Read-only, side-effect-free snapshot of current state (§6).
    pub async fn snapshot(&self) -> ReserveState {
        *self.state.read().await
    }

    /// Advisory recommendation for the current state (§4.7, §6). Never
    /// touches the venue or mutates anything.
    pub async fn recommend(
        &self,
        price: Price,
        policy: &AllocationPolicy,
    ) -> Result<Recommendation> {
        policy.validate()?;
        let state = *self.state.read().await;
        Ok(RebalanceScheduler::recommend(&state, price, policy)?)
    }

    /// Acquire the critical section and perform at most one rebalance (§6).
    pub async fn tick(
        &self,
        price: Price,
        policy: &AllocationPolicy,
    ) -> Result<Option<TradeExecution>> {
        policy.validate()?;

        for attempt in 0..=MAX_STALE_RETRIES {
            let (snapshot_state, snapshot_hedge, snapshot_version) = {
                let state = self.state.read().await;
                let hedge_state = self.hedge_state.read().await;
                (*state, hedge_state.clone(), state.rebalance_count)
            };

            let signal = reserve_signal::SignalGenerator::generate(&snapshot_state, price, policy)?;
            if matches!(signal, reserve_core::TradeSignal::Hold) {
                return Ok(None);
            }

            let mut state_local = snapshot_state;
            let mut hedge_local = snapshot_hedge;
            let execution = Executor::execute(
                &self.hedge,
                &mut state_local,
                &mut hedge_local,
                signal,
                price,
                policy.min_float_btc,
                "scheduled rebalance",
                self.clock.as_ref(),
            )
            .await?;

            match self
                .commit(snapshot_version, state_local, hedge_local, &execution)
                .await
            {
                Some(()) => return Ok(execution),
                None if attempt < MAX_STALE_RETRIES => continue,
                None => {
                    return Err(Error::Execution(reserve_executor::Error::StaleSnapshot {
                        retries: MAX_STALE_RETRIES,
                    }))
                }
            }
        }
        unreachable!("loop always returns or errors by the final attempt")
    }

    /// Split an incoming premium per the allocation policy and buy BTC with
    /// the portion earmarked for the float (§4.1, §6).
    pub async fn apply_premium_inflow(
        &self,
        usd_amount: UsdCents,
        price: Price,
        policy: &AllocationPolicy,
    ) -> Result<Option<TradeExecution>> {
        policy.validate()?;
        if !usd_amount.is_positive() {
            return Ok(None);
        }

        let (_to_usd, to_btc) = policy.split_surplus(usd_amount);

        for attempt in 0..=MAX_STALE_RETRIES {
            let (snapshot_state, snapshot_hedge, snapshot_version) = {
                let state = self.state.read().await;
                let hedge_state = self.hedge_state.read().await;
                (*state, hedge_state.clone(), state.rebalance_count)
            };

            let mut state_local = snapshot_state;
            state_local.usd_reserves = state_local.usd_reserves.checked_add(usd_amount)?;
            let mut hedge_local = snapshot_hedge;

            let execution = if to_btc.is_positive() {
                Executor::execute(
                    &self.hedge,
                    &mut state_local,
                    &mut hedge_local,
                    reserve_core::TradeSignal::BuyBTC { usd: to_btc },
                    price,
                    policy.min_float_btc,
                    "premium inflow",
                    self.clock.as_ref(),
                )
                .await?
            } else {
                None
            };

            match self
                .commit(snapshot_version, state_local, hedge_local, &execution)
                .await
            {
                Some(()) => return Ok(execution),
                None if attempt < MAX_STALE_RETRIES => continue,
                None => {
                    return Err(Error::Execution(reserve_executor::Error::StaleSnapshot {
                        retries: MAX_STALE_RETRIES,
                    }))
                }
            }
        }
        unreachable!("loop always returns or errors by the final attempt")
    }

    /// Refresh the mark price of the active hedge, if any (§5: Hedge Mark Task).
    pub async fn mark_hedge(&self) -> Result<Option<reserve_ports::MarkOutcome>> {
        let mut hedge_state = self.hedge_state.write().await;
        Ok(self.hedge.mark(&mut hedge_state).await?)
    }

    /// Current performance snapshot (§4.6, §6).
    pub async fn metrics(
        &self,
        price: Price,
        annual_premiums_usd: UsdCents,
        required_yield_btc_per_period: Sats,
    ) -> Result<PerformanceMetrics> {
        let state = *self.state.read().await;
        let tracker = *self.performance.read().await;
        Ok(tracker.metrics(&state, price, annual_premiums_usd, required_yield_btc_per_period)?)
    }

    /// Number of periods the current float can sustain the yield obligation
    /// (§4.5.1, §6).
    pub async fn sustainability(
        &self,
        price: Price,
        required_yield_btc_per_period: Sats,
        annual_premiums_usd: UsdCents,
    ) -> Result<i64> {
        let state = *self.state.read().await;
        Ok(reserve_analytics::sustainability_periods(
            &state,
            price,
            required_yield_btc_per_period,
            annual_premiums_usd,
        )?)
    }

    /// Deterministic forward simulation from the current state (§4.5.2, §6).
    pub async fn simulate(
        &self,
        price: Price,
        scenario: &SustainabilityScenario,
    ) -> Result<Vec<AccumulationRow>> {
        let state = *self.state.read().await;
        Ok(reserve_analytics::simulate_accumulation(&state, price, scenario)?)
    }

    /// Validate `snapshot_version` against the live `rebalance_count` and,
    /// if unchanged, commit `state_local`/`hedge_local` and fold `execution`
    /// into the performance tracker. Returns `None` on a stale snapshot so
    /// the caller can retry.
    async fn commit(
        &self,
        snapshot_version: u32,
        state_local: ReserveState,
        hedge_local: HedgeState,
        execution: &Option<TradeExecution>,
    ) -> Option<()> {
        let mut state_guard = self.state.write().await;
        let mut hedge_guard = self.hedge_state.write().await;

        if state_guard.rebalance_count != snapshot_version {
            warn!(
                "stale reserve snapshot (expected rebalance_count {snapshot_version}, found {}), retrying",
                state_guard.rebalance_count
            );
            return None;
        }

        if state_local.btc_sats.is_negative() || state_local.usd_reserves.is_negative() {
            log::error!(
                "invariant violation about to be committed: btc_sats={} usd_reserves={}",
                state_local.btc_sats,
                state_local.usd_reserves
            );
            panic!("reserve state invariant violated: negative holdings");
        }

        *state_guard = state_local;
        *hedge_guard = hedge_local;
        drop(state_guard);
        drop(hedge_guard);

        if let Some(execution) = execution {
            info!(
                "tick executed: {:?} {} btc / {} usd @ {}, hedge={:?}",
                execution.signal,
                execution.btc_amount_sats,
                execution.usd_amount_cents,
                execution.price,
                execution.hedge_outcome
            );
            if matches!(
                execution.hedge_outcome,
                HedgeOutcome::HedgeFailed(_)
            ) {
                warn!("hedge degraded for this execution: {:?}", execution.hedge_outcome);
            }
            let mut tracker = self.performance.write().await;
            let _ = tracker.record_execution(execution);
        }

        Some(())
    }
}
