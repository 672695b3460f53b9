//! Periodic dashboard refresh.
//!
//! The dashboard section reloads itself every five minutes while it is
//! the current section. Refreshes issued here go through the same
//! sequence-numbered fetch path as user actions, so a user action always
//! supersedes a timer-driven reload that is still in flight.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::warn;

use crate::domain::Section;
use crate::services::data_source::DataSource;
use crate::services::list_controller::ListViewController;
use crate::ui::Renderer;

/// Default interval between dashboard refreshes.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(300);

/// Handle for the periodic dashboard refresh task.
///
/// Dropping the handle stops the task.
pub struct AutoRefresh {
    handle: JoinHandle<()>,
}

impl AutoRefresh {
    /// Spawns a task that refreshes `controller` every `interval` while
    /// the dashboard section is current.
    pub fn start<D, R>(controller: Arc<ListViewController<D, R>>, interval: Duration) -> Self
    where
        D: DataSource + 'static,
        R: Renderer + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; skip it so the task
            // waits a full interval before its first refresh.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if controller.section().await != Section::Dashboard {
                    continue;
                }
                if let Err(err) = controller.refresh().await {
                    warn!(%err, "periodic dashboard refresh failed");
                }
            }
        });
        Self { handle }
    }

    /// Stops the refresh task.
    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for AutoRefresh {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
