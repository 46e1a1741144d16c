pub mod app;
pub mod clock;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod grid;
pub mod handlers;
pub mod models;
pub mod scheduler;
pub mod state;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use dashboard::Dashboard;
pub use scheduler::spawn_timers;
pub use state::AppState;
