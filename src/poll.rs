// Fixed-interval refresh for live views (rankings, matchmaking queue).
//
// Each view runs its own poller; nothing is coordinated with session state.
// A poll that fires after logout simply goes out unauthenticated and any
// rejection is published as a normal fetch failure.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::error::ApiError;

/// Latest result of a polled fetch.
#[derive(Debug, Clone)]
pub enum PollState<T> {
    /// No fetch has completed yet.
    Pending,
    Ready(T),
    /// The last fetch failed; the poller keeps running on its interval.
    Failed(String),
}

impl<T> PollState<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, PollState::Ready(_))
    }
}

/// Spawn a background task that runs `fetch` on a fixed interval and
/// publishes the latest state on a watch channel. The first fetch fires
/// immediately. The task stops once every receiver is dropped.
pub fn spawn_poller<T, F, Fut>(every: Duration, mut fetch: F) -> watch::Receiver<PollState<T>>
where
    T: Clone + Send + Sync + 'static,
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, ApiError>> + Send,
{
    let (tx, rx) = watch::channel(PollState::Pending);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let update = match fetch().await {
                Ok(value) => PollState::Ready(value),
                Err(e) => {
                    tracing::warn!("poll fetch failed: {e}");
                    PollState::Failed(e.to_string())
                }
            };
            if tx.send(update).is_err() {
                break;
            }
        }
    });
    rx
}
