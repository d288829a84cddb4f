//! The periodic refresh countdown.
//!
//! One scheduler task exists per session, started by the runtime and
//! cancelled implicitly when the backend runtime drops. It ticks once per
//! second, emitting the remaining seconds into the backend event queue, and
//! emits a refresh-due event when the countdown reaches zero. A manual
//! refresh restarts the countdown through the reset signal.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::sync::mpsc::Sender;

use crate::app::BackendEvent;

/// Spawns the countdown loop. Must be called at most once per session.
pub(crate) fn spawn(events: Sender<BackendEvent>, reset: Arc<Notify>, interval_secs: u64) {
    tokio::spawn(async move {
        let mut seconds_left = interval_secs;
        loop {
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_secs(1)) => {
                    seconds_left = seconds_left.saturating_sub(1);
                    let event = if seconds_left == 0 {
                        seconds_left = interval_secs;
                        BackendEvent::RefreshDue
                    } else {
                        BackendEvent::Tick(seconds_left)
                    };
                    if events.send(event).await.is_err() {
                        return;
                    }
                }
                _ = reset.notified() => {
                    seconds_left = interval_secs;
                }
            }
        }
    });
}
