use crate::clock::Clock;
use crate::dashboard::{Action, Dashboard, Outcome};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub clock: Arc<dyn Clock>,
    pub dashboard: Arc<Mutex<Dashboard>>,
}

impl AppState {
    pub fn new(clock: Arc<dyn Clock>, dashboard: Dashboard) -> Self {
        Self {
            clock,
            dashboard: Arc::new(Mutex::new(dashboard)),
        }
    }

    /// Applies one action at the clock's current instant.
    pub async fn dispatch(&self, action: Action) -> Outcome {
        let now = self.clock.now();
        self.dashboard.lock().await.apply(action, now)
    }
}
