use crate::error::{AppError, AppResult};

pub const DEFAULT_LISTEN_ADDR: &str = "localhost:8080";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub instance_url: String,
    pub listen_addr: String,
    pub open_browser: bool,
}

impl AppConfig {
    pub fn load(hostname: Option<&str>, listen_addr: &str, open_browser: bool) -> AppResult<Self> {
        let hostname = hostname
            .map(str::trim)
            .filter(|host| !host.is_empty())
            .ok_or_else(|| AppError::Configuration("Hostname must not be empty".to_string()))?;

        if hostname.contains('/') || hostname.contains(char::is_whitespace) {
            return Err(AppError::Configuration(format!(
                "invalid hostname '{hostname}', expected e.g. dev12345.service-now.com"
            )));
        }

        Ok(Self::with_instance_url(
            format!("https://{hostname}"),
            listen_addr,
            open_browser,
        ))
    }

    /// Builds a config against an explicit instance URL (scheme included).
    pub fn with_instance_url(
        instance_url: impl Into<String>,
        listen_addr: &str,
        open_browser: bool,
    ) -> Self {
        Self {
            instance_url: instance_url.into(),
            listen_addr: listen_addr.to_string(),
            open_browser,
        }
    }

    pub fn local_url(&self) -> String {
        format!("http://{}", self.listen_addr)
    }
}
