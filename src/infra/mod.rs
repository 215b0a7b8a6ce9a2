pub mod browser;
pub mod servicenow;
