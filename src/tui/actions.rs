use std::time::Instant;

use super::state::AppState;
use crate::QuoteSource;

/// Process background work between frames: fetch results, log records and
/// the info bubble timer.
pub fn process_state<S>(state: &mut AppState<S>)
where
    S: QuoteSource + Send + Sync + 'static,
{
    state.apply_fetch_results();
    state.drain_log();
    state.expire_info_bubble(Instant::now());
}
