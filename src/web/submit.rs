use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::Method;
use axum::http::header::CONTENT_TYPE;
use log::warn;

use crate::context::AppContext;
use crate::domain::incident::IncidentSubmission;
use crate::error::{AppError, AppResult};
use crate::workflow::incident::submit_incident;

pub async fn submit(
    State(ctx): State<AppContext>,
    SubmissionForm(submission): SubmissionForm,
) -> AppResult<String> {
    let incident = submit_incident(&ctx, submission).await?;
    Ok(format!(
        "Incident was successfully created: {}",
        incident.number
    ))
}

pub async fn method_not_allowed(method: Method) -> AppError {
    AppError::MethodNotAllowed(method.to_string())
}

/// Form fields from a URL-encoded or multipart body, followed by the query
/// string. Undecodable bodies yield no fields rather than a rejection.
pub struct SubmissionForm(pub IncidentSubmission);

enum BodyKind {
    UrlEncoded,
    Multipart,
    Other,
}

impl BodyKind {
    fn of(request: &Request) -> Self {
        let content_type = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/x-www-form-urlencoded") {
            BodyKind::UrlEncoded
        } else if content_type.starts_with("multipart/form-data") {
            BodyKind::Multipart
        } else {
            BodyKind::Other
        }
    }
}

impl<S> FromRequest<S> for SubmissionForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let query = request.uri().query().unwrap_or_default().to_string();

        let mut pairs = match BodyKind::of(&request) {
            BodyKind::UrlEncoded => match Bytes::from_request(request, state).await {
                Ok(body) => parse_urlencoded(&body),
                Err(err) => {
                    warn!("Could not read form body: {err}");
                    Vec::new()
                }
            },
            BodyKind::Multipart => match multipart_pairs(request, state).await {
                Ok(pairs) => pairs,
                Err(err) => {
                    warn!("Could not parse multipart form: {err}");
                    Vec::new()
                }
            },
            BodyKind::Other => Vec::new(),
        };
        pairs.extend(parse_urlencoded(query.as_bytes()));

        Ok(Self(IncidentSubmission::from_pairs(pairs)))
    }
}

fn parse_urlencoded(input: &[u8]) -> Vec<(String, String)> {
    url::form_urlencoded::parse(input).into_owned().collect()
}

async fn multipart_pairs<S>(request: Request, state: &S) -> Result<Vec<(String, String)>, String>
where
    S: Send + Sync,
{
    let mut multipart = Multipart::from_request(request, state)
        .await
        .map_err(|err| err.to_string())?;

    let mut pairs = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(|err| err.to_string())? {
        // File parts are not form values.
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let value = field.text().await.map_err(|err| err.to_string())?;
        pairs.push((name, value));
    }
    Ok(pairs)
}
