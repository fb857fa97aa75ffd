use crate::state::AppState;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Spawn the tick source for a running round.
///
/// Each tick runs to completion under the match write lock before the next
/// one fires. The task ends on its own once the round is over; reset aborts it.
pub fn spawn_round_ticker(state: Arc<AppState>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let period = state.tick_interval().await;
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;

            if !state.tick_at(state.now_ms()).await {
                break;
            }
        }

        tracing::debug!("Round ticker finished");
    })
}
