pub mod browser;
pub mod incident_tracker;

pub use browser::BrowserLauncher;
pub use incident_tracker::IncidentTrackerService;
