use log::{debug, info};

use crate::context::AppContext;
use crate::domain::incident::{Incident, IncidentSubmission};
use crate::error::{AppError, AppResult};

pub async fn submit_incident(
    ctx: &AppContext,
    submission: IncidentSubmission,
) -> AppResult<Incident> {
    let Some(credentials) = submission.credentials() else {
        debug!("Neither username/password nor API key provided");
        return Err(AppError::MissingCredentials);
    };

    let payload = submission.payload();
    let incident = ctx
        .incident_tracker
        .create_incident(&payload, &credentials)
        .await?;

    if incident.number.is_empty() {
        return Err(AppError::MissingIncidentNumber);
    }

    info!("Incident created: {}", incident.number);
    Ok(incident)
}
