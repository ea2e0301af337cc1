use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use reserve_core::Sats;
use reserve_ports::{
    ClosePositionOutcome, FuturesVenue, MarkOutcome, OpenShortOutcome, VenueError, VenueResult,
};

/// In-memory `FuturesVenue` test double. Each method pops the next queued
/// result; an empty queue yields `VenueError::Unknown` rather than panicking,
/// so a test that forgets to queue a result gets a loud, inspectable failure
/// instead of a panic mid-coordinator-call.
#[derive(Default)]
pub struct MockVenue {
    open_results: Mutex<VecDeque<VenueResult<OpenShortOutcome>>>,
    close_results: Mutex<VecDeque<VenueResult<ClosePositionOutcome>>>,
    mark_results: Mutex<VecDeque<VenueResult<MarkOutcome>>>,
}

impl MockVenue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_open_result(&self, result: VenueResult<OpenShortOutcome>) {
        self.open_results.lock().unwrap().push_back(result);
    }

    pub fn push_close_result(&self, result: VenueResult<ClosePositionOutcome>) {
        self.close_results.lock().unwrap().push_back(result);
    }

    pub fn push_mark_result(&self, result: VenueResult<MarkOutcome>) {
        self.mark_results.lock().unwrap().push_back(result);
    }
}

#[async_trait]
impl FuturesVenue for MockVenue {
    async fn open_short(
        &self,
        _symbol: &str,
        _quantity_btc: Sats,
        _leverage: u8,
    ) -> VenueResult<OpenShortOutcome> {
        self.open_results.lock().unwrap().pop_front().unwrap_or(Err(
            VenueError::Unknown("MockVenue: no queued open_short result".to_string()),
        ))
    }

    async fn close_position(&self, _position_id: &str) -> VenueResult<ClosePositionOutcome> {
        self.close_results.lock().unwrap().pop_front().unwrap_or(Err(
            VenueError::Unknown("MockVenue: no queued close_position result".to_string()),
        ))
    }

    async fn mark(&self, _position_id: &str) -> VenueResult<MarkOutcome> {
        self.mark_results.lock().unwrap().pop_front().unwrap_or(Err(
            VenueError::Unknown("MockVenue: no queued mark result".to_string()),
        ))
    }
}
