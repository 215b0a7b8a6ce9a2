use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::IncidentTrackerService;

#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub incident_tracker: Arc<dyn IncidentTrackerService>,
}

impl AppContext {
    pub fn new(config: AppConfig, incident_tracker: Arc<dyn IncidentTrackerService>) -> Self {
        Self {
            config: Arc::new(config),
            incident_tracker,
        }
    }
}
