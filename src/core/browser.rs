use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use log::{debug, info, warn};
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::core::html_parser;
use crate::error::watch::{Result, WatchError};

const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Where raw table rows come from.
#[async_trait::async_trait]
pub trait RowSource: Send + Sync {
    async fn fetch_rows(&self) -> Result<Vec<Vec<String>>>;
}

/// Renders the design page in headless Chromium and reads its table.
pub struct BrowserExtractor {
    target_url: String,
    selector: String,
    navigation_timeout: Duration,
    selector_timeout: Duration,
}

impl BrowserExtractor {
    pub fn new(config: &Config) -> Self {
        BrowserExtractor {
            target_url: config.target_url.clone(),
            selector: config.table_selector.clone(),
            navigation_timeout: config.navigation_timeout,
            selector_timeout: config.selector_timeout,
        }
    }

    async fn rendered_html(&self, page: &Page) -> Result<String> {
        info!("Navigating to {}...", self.target_url);
        match tokio::time::timeout(self.navigation_timeout, page.goto(self.target_url.as_str())).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => return Err(WatchError::Navigation(e.to_string())),
            Err(_) => {
                return Err(WatchError::Navigation(format!(
                    "{} did not load within {}s",
                    self.target_url,
                    self.navigation_timeout.as_secs()
                )));
            }
        }

        info!("Waiting for selector `{}`...", self.selector);
        self.wait_for_selector(page).await?;

        page.content()
            .await
            .map_err(|e| WatchError::Extraction(format!("failed to read page content: {}", e)))
    }

    async fn wait_for_selector(&self, page: &Page) -> Result<()> {
        let poll = async {
            loop {
                match page.find_element(self.selector.as_str()).await {
                    Ok(_) => return,
                    Err(e) => debug!("Selector `{}` not there yet: {}", self.selector, e),
                }
                tokio::time::sleep(SELECTOR_POLL_INTERVAL).await;
            }
        };

        tokio::time::timeout(self.selector_timeout, poll)
            .await
            .map_err(|_| WatchError::SelectorTimeout {
                selector: self.selector.clone(),
                timeout_secs: self.selector_timeout.as_secs(),
            })
    }
}

#[async_trait::async_trait]
impl RowSource for BrowserExtractor {
    async fn fetch_rows(&self) -> Result<Vec<Vec<String>>> {
        let mut session = BrowserSession::launch(self.navigation_timeout).await?;
        let html = self.rendered_html(&session.page).await;
        session.close().await;

        let rows = html_parser::parse_table_rows(&html?, &self.selector)?;
        info!("Extracted {} rows", rows.len());
        Ok(rows)
    }
}

/// A running Chromium with one open page.
///
/// `close` must be awaited on every path; dropping without it only stops the
/// event handler and leaves process cleanup to chromiumoxide.
struct BrowserSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
}

impl BrowserSession {
    async fn launch(request_timeout: Duration) -> Result<Self> {
        info!("Starting browser...");
        let config = BrowserConfig::builder()
            .request_timeout(request_timeout)
            .no_sandbox()
            .arg("--disable-setuid-sandbox")
            .arg("--disable-dev-shm-usage")
            .build()
            .map_err(|e| WatchError::Browser(format!("failed to build browser config: {}", e)))?;

        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| WatchError::Browser(format!("failed to launch browser: {}", e)))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler error: {}", e);
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                if let Err(close_err) = browser.close().await {
                    warn!("Failed to close browser: {}", close_err);
                }
                if let Err(wait_err) = browser.wait().await {
                    warn!("Failed to wait for browser exit: {}", wait_err);
                }
                handler.abort();
                return Err(WatchError::Browser(format!("failed to open page: {}", e)));
            }
        };

        Ok(BrowserSession {
            browser,
            page,
            handler,
        })
    }

    async fn close(mut self) {
        debug!("Closing browser");
        if let Err(e) = self.browser.close().await {
            warn!("Failed to close browser: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            warn!("Failed to wait for browser exit: {}", e);
        }
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler.abort();
    }
}
