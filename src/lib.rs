pub mod app;
pub mod chart;
pub mod compare;
pub mod config;
pub mod dashboard;
pub mod dom;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod palette;
pub mod poller;
pub mod source;
pub mod state;
pub mod ui;
pub mod widgets;

pub use app::router;
pub use config::DashboardConfig;
pub use dashboard::Dashboard;
pub use source::{DataSource, HttpSource};
pub use state::AppState;
