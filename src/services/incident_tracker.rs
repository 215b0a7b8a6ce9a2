use async_trait::async_trait;

use crate::domain::incident::{Credentials, Incident, IncidentPayload};
use crate::error::AppResult;

#[async_trait]
pub trait IncidentTrackerService: Send + Sync {
    async fn create_incident(
        &self,
        payload: &IncidentPayload,
        credentials: &Credentials,
    ) -> AppResult<Incident>;
}
