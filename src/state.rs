use crate::config::Features;
use crate::dashboard::Dashboard;
use crate::dom::Page;
use std::sync::Arc;
use tokio::sync::Mutex;

pub type SharedDashboard = Arc<Mutex<Dashboard>>;

#[derive(Clone)]
pub struct AppState {
    pub dashboard: SharedDashboard,
}

impl AppState {
    pub fn new(features: Features) -> Self {
        Self {
            dashboard: Arc::new(Mutex::new(Dashboard::new(Page::dashboard(), features))),
        }
    }
}
