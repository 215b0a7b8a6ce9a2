use async_trait::async_trait;
use base64::prelude::{BASE64_STANDARD, Engine as _};
use log::info;
use reqwest::{
    Client, RequestBuilder,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use serde::Deserialize;

use crate::domain::incident::{Credentials, Incident, IncidentPayload};
use crate::error::{AppError, AppResult};
use crate::services::IncidentTrackerService;

pub const API_KEY_HEADER: &str = "X-sn-apikey";

pub struct ServiceNowClient {
    http: Client,
    instance_url: String,
}

impl ServiceNowClient {
    pub fn new(instance_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            instance_url: instance_url.into(),
        }
    }

    fn auth_header(username: &str, password: &str) -> String {
        let credentials = format!("{username}:{password}");
        let encoded = BASE64_STANDARD.encode(credentials);
        format!("Basic {encoded}")
    }

    pub fn incident_endpoint(instance_url: &str) -> String {
        format!(
            "{}/api/now/table/incident",
            instance_url.trim_end_matches('/')
        )
    }

    fn authenticate(request: RequestBuilder, credentials: &Credentials) -> RequestBuilder {
        match credentials {
            Credentials::Basic { username, password } => {
                request.header(AUTHORIZATION, Self::auth_header(username, password))
            }
            Credentials::ApiKey(key) => request.header(API_KEY_HEADER, key),
        }
    }
}

#[async_trait]
impl IncidentTrackerService for ServiceNowClient {
    async fn create_incident(
        &self,
        payload: &IncidentPayload,
        credentials: &Credentials,
    ) -> AppResult<Incident> {
        let endpoint = Self::incident_endpoint(&self.instance_url);
        info!("Endpoint URL: {endpoint}");
        info!("Using {}", credentials.mode());

        let request = self
            .http
            .post(&endpoint)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(payload);

        let response = Self::authenticate(request, credentials)
            .send()
            .await
            .map_err(|err| AppError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| AppError::ResponseRead(err.to_string()))?;

        info!("Response Status: {status}");
        info!("Response Body: {body}");

        let parsed: Option<IncidentResponse> = serde_json::from_str(&body)
            .map_err(|err| AppError::ResponseDecode(format!("{status}: {err}")))?;

        // A null document or null result carries no number, same as a missing one.
        let number = parsed
            .and_then(|response| response.result)
            .and_then(|result| result.number)
            .unwrap_or_default();

        Ok(Incident { number })
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct IncidentResponse {
    result: Option<IncidentResult>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct IncidentResult {
    number: Option<String>,
}
