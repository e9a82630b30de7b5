use crate::state::messages::UiEvent;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

pub const BOARDS_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Periodic leaderboard/standings refresh. Only ticks; the UI loop decides
/// whether a session exists to refresh for. Predictions and points are never
/// refreshed from here.
pub struct PeriodicRefresher {
    ui_events: mpsc::Sender<UiEvent>,
    period: Duration,
}

impl PeriodicRefresher {
    pub fn new(ui_events: mpsc::Sender<UiEvent>) -> Self {
        Self { ui_events, period: BOARDS_REFRESH_INTERVAL }
    }

    pub async fn run(self) {
        let mut boards_interval = interval(self.period);
        // Skip the immediate first tick so startup loading isn't double-triggered.
        boards_interval.tick().await;

        loop {
            boards_interval.tick().await;
            if self.ui_events.send(UiEvent::RefreshTick).await.is_err() {
                break;
            }
        }
    }
}
