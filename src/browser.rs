//! Browser automation using chromiumoxide.
//!
//! The roster page renders its content client-side, so the page is kept open
//! and re-snapshotted on every poll tick rather than fetched once.

use anyhow::Result;
use chromiumoxide::browser::{Browser as ChromeBrowser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;

use crate::extractor::PageSource;

/// Browser wrapper for roster extraction
pub struct Browser {
    browser: ChromeBrowser,
    handle: tokio::task::JoinHandle<()>,
}

impl Browser {
    /// Launch a new headless browser instance
    pub async fn launch(chrome_path: Option<&str>) -> Result<Self> {
        // Find Chrome executable
        let default_path = if cfg!(target_os = "macos") {
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome"
        } else if cfg!(target_os = "windows") {
            "C:\\Program Files\\Google\\Chrome\\Application\\chrome.exe"
        } else {
            "google-chrome"
        };
        let chrome_path = chrome_path.unwrap_or(default_path);

        let config = BrowserConfig::builder()
            .chrome_executable(chrome_path)
            .no_sandbox()
            .disable_default_args()
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-software-rasterizer")
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-extensions")
            .arg("--disable-background-networking")
            .arg("--disable-sync")
            .arg("--disable-translate")
            .arg("--mute-audio")
            .window_size(1920, 1080)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build browser config: {}", e))?;

        let (browser, mut handler) = ChromeBrowser::launch(config)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to launch browser: {}", e))?;

        // Spawn handler task - must keep running for browser to work
        let handle = tokio::spawn(async move {
            loop {
                match handler.next().await {
                    Some(Ok(_)) => continue,
                    Some(Err(_)) => continue, // Don't break on errors
                    None => break,
                }
            }
        });

        // Wait for browser to be ready
        tokio::time::sleep(tokio::time::Duration::from_secs(1)).await;

        Ok(Self { browser, handle })
    }

    /// Navigate to a URL and keep the page open for repeated snapshots
    pub async fn open(&self, url: &str) -> Result<LivePage> {
        let page = self
            .browser
            .new_page(url)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to open page: {}", e))?;

        Ok(LivePage {
            page,
            url: url.to_string(),
        })
    }

    /// Close the browser
    pub async fn close(mut self) -> Result<()> {
        let _ = self.browser.close().await;
        self.handle.abort();
        Ok(())
    }
}

/// An open page whose DOM is still rendering; each snapshot re-reads the
/// current document content.
pub struct LivePage {
    page: Page,
    url: String,
}

impl LivePage {
    /// Close the underlying page
    #[allow(dead_code)]
    pub async fn close(self) -> Result<()> {
        let _ = self.page.close().await;
        Ok(())
    }
}

impl PageSource for LivePage {
    fn location(&self) -> Option<String> {
        Some(self.url.clone())
    }

    async fn snapshot(&self) -> Result<String> {
        self.page
            .content()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to get page content: {}", e))
    }
}
