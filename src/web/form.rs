use askama::Template;
use axum::response::Html;

use crate::error::{AppError, AppResult};

/// Values pre-filled in the incident form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDefaults {
    pub category: String,
    pub subcategory: String,
    pub urgency: String,
    pub impact: String,
    pub caller_id: String,
    pub cmdb_ci: String,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            category: "software".to_string(),
            subcategory: "email".to_string(),
            urgency: "2".to_string(),
            impact: "2".to_string(),
            caller_id: "8fe6a1a983821210e5f1b3a6feaad309".to_string(),
            cmdb_ci: "ded5656983821210e5f1b3a6feaad3c6".to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "form.html")]
pub struct FormPage<'a> {
    pub defaults: &'a FormDefaults,
}

pub async fn show_form() -> AppResult<Html<String>> {
    let defaults = FormDefaults::default();
    let page = FormPage {
        defaults: &defaults,
    };
    page.render()
        .map(Html)
        .map_err(|err| AppError::Render(err.to_string()))
}
