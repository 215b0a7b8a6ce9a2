use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

/// Fields posted by the incident form. Missing fields are empty strings.
#[derive(Clone, Default)]
pub struct IncidentSubmission {
    pub short_description: String,
    pub category: String,
    pub subcategory: String,
    pub urgency: String,
    pub impact: String,
    pub caller_id: String,
    pub description: String,
    pub cmdb_ci: String,
    pub username: String,
    pub password: String,
    pub apikey: String,
}

impl IncidentSubmission {
    /// Builds a submission from decoded form pairs. The first value of a
    /// repeated field wins; unknown fields are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut submission = Self::default();
        let mut seen = HashSet::new();
        for (name, value) in pairs {
            let Some(slot) = submission.field_mut(&name) else {
                continue;
            };
            if seen.insert(name) {
                *slot = value;
            }
        }
        submission
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        let slot = match name {
            "short_description" => &mut self.short_description,
            "category" => &mut self.category,
            "subcategory" => &mut self.subcategory,
            "urgency" => &mut self.urgency,
            "impact" => &mut self.impact,
            "caller_id" => &mut self.caller_id,
            "description" => &mut self.description,
            "cmdb_ci" => &mut self.cmdb_ci,
            "username" => &mut self.username,
            "password" => &mut self.password,
            "apikey" => &mut self.apikey,
            _ => return None,
        };
        Some(slot)
    }

    /// Basic auth wins when both username and password are present.
    pub fn credentials(&self) -> Option<Credentials> {
        if !self.username.is_empty() && !self.password.is_empty() {
            Some(Credentials::Basic {
                username: self.username.clone(),
                password: self.password.clone(),
            })
        } else if !self.apikey.is_empty() {
            Some(Credentials::ApiKey(self.apikey.clone()))
        } else {
            None
        }
    }

    pub fn payload(&self) -> IncidentPayload {
        IncidentPayload {
            short_description: self.short_description.clone(),
            category: self.category.clone(),
            subcategory: self.subcategory.clone(),
            urgency: self.urgency.clone(),
            impact: self.impact.clone(),
            caller_id: self.caller_id.clone(),
            description: self.description.clone(),
            cmdb_ci: self.cmdb_ci.clone(),
        }
    }
}

impl fmt::Debug for IncidentSubmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IncidentSubmission")
            .field("short_description", &self.short_description)
            .field("category", &self.category)
            .field("subcategory", &self.subcategory)
            .field("urgency", &self.urgency)
            .field("impact", &self.impact)
            .field("caller_id", &self.caller_id)
            .field("description", &self.description)
            .field("cmdb_ci", &self.cmdb_ci)
            .field("username", &self.username)
            .field("password", &mask(&self.password))
            .field("apikey", &mask(&self.apikey))
            .finish()
    }
}

fn mask(secret: &str) -> &'static str {
    if secret.is_empty() { "" } else { "***" }
}

/// Body sent to the incident table. Never carries credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncidentPayload {
    pub short_description: String,
    pub category: String,
    pub subcategory: String,
    pub urgency: String,
    pub impact: String,
    pub caller_id: String,
    pub description: String,
    pub cmdb_ci: String,
}

#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    Basic { username: String, password: String },
    ApiKey(String),
}

impl Credentials {
    pub fn mode(&self) -> &'static str {
        match self {
            Credentials::Basic { .. } => "username and password",
            Credentials::ApiKey(_) => "API key",
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
            Credentials::ApiKey(_) => f.debug_tuple("ApiKey").field(&"***").finish(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incident {
    pub number: String,
}
