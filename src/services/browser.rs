use async_trait::async_trait;

use crate::error::AppResult;

/// Opens a URL in the user's default browser.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn open(&self, url: &str) -> AppResult<()>;
}
