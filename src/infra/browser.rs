use async_trait::async_trait;
use log::debug;
use tokio::process::Command;

use crate::error::AppResult;
use crate::services::BrowserLauncher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserStrategy {
    Windows,
    MacOs,
    Wsl,
    Linux,
}

impl BrowserStrategy {
    /// Picks a strategy from the OS name and, on Linux, the kernel release.
    pub fn from_platform(os: &str, kernel_release: Option<&str>) -> Self {
        match os {
            "windows" => BrowserStrategy::Windows,
            "macos" => BrowserStrategy::MacOs,
            _ if kernel_release.is_some_and(is_wsl_release) => BrowserStrategy::Wsl,
            _ => BrowserStrategy::Linux,
        }
    }

    pub async fn detect() -> Self {
        let os = std::env::consts::OS;
        let release = match os {
            "windows" | "macos" => None,
            _ => kernel_release().await,
        };
        Self::from_platform(os, release.as_deref())
    }

    pub fn command(&self, url: &str) -> (&'static str, Vec<String>) {
        match self {
            BrowserStrategy::Windows => ("cmd", start_args(url)),
            BrowserStrategy::Wsl => ("cmd.exe", start_args(url)),
            BrowserStrategy::MacOs => ("open", vec![url.to_string()]),
            BrowserStrategy::Linux => ("xdg-open", vec![url.to_string()]),
        }
    }
}

fn start_args(url: &str) -> Vec<String> {
    vec![
        "/c".to_string(),
        "start".to_string(),
        String::new(),
        url.to_string(),
    ]
}

fn is_wsl_release(release: &str) -> bool {
    release.to_lowercase().contains("microsoft")
}

async fn kernel_release() -> Option<String> {
    let output = Command::new("uname").arg("-r").output().await.ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Launches the platform's default browser without waiting for it to exit.
pub struct SystemBrowser;

#[async_trait]
impl BrowserLauncher for SystemBrowser {
    async fn open(&self, url: &str) -> AppResult<()> {
        let strategy = BrowserStrategy::detect().await;
        let (program, args) = strategy.command(url);
        debug!("Opening browser with {strategy:?}: {program} {args:?}");

        Command::new(program).args(&args).spawn()?;
        Ok(())
    }
}
