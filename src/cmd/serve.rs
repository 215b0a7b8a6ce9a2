use std::sync::Arc;

use log::{info, warn};
use tokio::net::TcpListener;

use crate::context::AppContext;
use crate::error::AppResult;
use crate::services::BrowserLauncher;
use crate::web::build_router;

pub async fn run(ctx: AppContext, browser: Arc<dyn BrowserLauncher>) -> AppResult<()> {
    let listen_addr = ctx.config.listen_addr.clone();
    let local_url = ctx.config.local_url();
    let open_browser = ctx.config.open_browser;
    info!("Forwarding incidents to {}", ctx.config.instance_url);

    if open_browser {
        tokio::spawn(launch_browser(browser, local_url));
    }

    info!("Starting server on {listen_addr}");
    let listener = TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, build_router(ctx)).await?;
    Ok(())
}

async fn launch_browser(browser: Arc<dyn BrowserLauncher>, url: String) {
    if let Err(err) = browser.open(&url).await {
        warn!("Could not open a browser at {url}: {err}");
    }
}
