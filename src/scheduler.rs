use crate::dashboard::Action;
use crate::state::AppState;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

/// The dashboard's recurring work. Both loops stop when this is dropped.
pub struct Timers {
    handles: Vec<JoinHandle<()>>,
}

impl Timers {
    pub fn shutdown(self) {
        drop(self);
    }
}

impl Drop for Timers {
    fn drop(&mut self) {
        for handle in &self.handles {
            handle.abort();
        }
    }
}

/// Starts the header clock and the daily reset check, each firing every
/// `period` (the first firing is one full period after start).
pub fn spawn_timers(state: AppState, period: Duration) -> Timers {
    let clock = tokio::spawn(run_every(state.clone(), period, Action::ClockTick));
    let reset = tokio::spawn(run_every(state, period, Action::ResetCheck));
    debug!(?period, "timers started");
    Timers {
        handles: vec![clock, reset],
    }
}

async fn run_every(state: AppState, period: Duration, action: Action) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // the first tick completes immediately
    ticker.tick().await;

    loop {
        ticker.tick().await;
        state.dispatch(action.clone()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};
    use crate::dashboard::Dashboard;
    use crate::models::demo_goals;
    use chrono::{TimeZone, Utc};
    use chrono_tz::America::Sao_Paulo;
    use std::sync::Arc;

    fn setup() -> (ManualClock, AppState) {
        // 23:58 in Sao Paulo
        let start = Utc.with_ymd_and_hms(2026, 10, 18, 2, 58, 0).unwrap();
        let clock = ManualClock::new(start);
        let dashboard = Dashboard::new(Sao_Paulo, start).with_goals(demo_goals(start, Sao_Paulo));
        let state = AppState::new(Arc::new(clock.clone()), dashboard);
        (clock, state)
    }

    async fn completed_tasks(state: &AppState) -> usize {
        let dashboard = state.dashboard.lock().await;
        dashboard.goals().iter().map(|goal| goal.completed_count()).sum()
    }

    #[tokio::test(start_paused = true)]
    async fn reset_fires_after_local_midnight() {
        let (clock, state) = setup();
        let _timers = spawn_timers(state.clone(), Duration::from_secs(60));
        assert_eq!(completed_tasks(&state).await, 3);

        clock.advance(chrono::Duration::seconds(60));
        tokio::time::sleep(Duration::from_secs(61)).await;
        assert_eq!(completed_tasks(&state).await, 3);

        clock.advance(chrono::Duration::seconds(60));
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(completed_tasks(&state).await, 0);

        let dashboard = state.dashboard.lock().await;
        assert_eq!(dashboard.current_time(), clock.now());
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_timers_stop_ticking() {
        let (clock, state) = setup();
        let timers = spawn_timers(state.clone(), Duration::from_secs(60));
        timers.shutdown();

        clock.advance(chrono::Duration::minutes(10));
        tokio::time::sleep(Duration::from_secs(600)).await;
        assert_eq!(completed_tasks(&state).await, 3);
    }
}
