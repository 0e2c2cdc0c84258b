// src/browser_handler.rs
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;
use futures::StreamExt;
use serde_json::Value;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Result, ScrapeError};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

// Clicks through JS so overlays sitting on top of the button don't swallow the click.
const CLICK_JS: &str = "function() { this.click(); }";

// True when the element is rendered, visible and enabled, i.e. a user could click it.
const CLICKABLE_JS: &str = r#"function() {
    const style = window.getComputedStyle(this);
    const rect = this.getBoundingClientRect();
    return rect.width > 0 && rect.height > 0
        && style.visibility !== 'hidden' && style.display !== 'none'
        && !this.disabled;
}"#;

// Picks the largest page size of a DataTables length <select>; `-1` means "All".
// Returns the label of the chosen option, or null if there are no options.
const SELECT_LARGEST_JS: &str = r#"function() {
    const rank = (o) => {
        const n = parseInt(o.value, 10);
        if (Number.isNaN(n)) return -Infinity;
        return n < 0 ? Infinity : n;
    };
    const options = Array.from(this.options);
    if (options.length === 0) return null;
    const best = options.reduce((a, b) => (rank(b) > rank(a) ? b : a));
    this.value = best.value;
    this.dispatchEvent(new Event('change', { bubbles: true }));
    return best.text.trim();
}"#;

/// The browser-side steps of a run. Implemented by [`BrowserSession`] and by page fixtures in tests.
#[async_trait]
pub trait PageSession: Send {
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// Returns `true` if a cookie banner was found and dismissed. Absence is not an error.
    async fn dismiss_cookie_banner(&mut self) -> bool;

    /// Switches the paginated table to its largest page size; returns the chosen option label.
    async fn expand_all_rows(&mut self) -> Result<String>;

    /// Outer HTML of the price table.
    async fn table_html(&mut self) -> Result<String>;

    /// Releases the browser. Safe to call more than once.
    async fn close(&mut self);
}

/// A headless Chromium with one page, driven over CDP.
pub struct BrowserSession {
    browser: Option<Browser>,
    handler: Option<JoinHandle<()>>,
    page: Page,
    cookie_button_selector: String,
    page_length_selector: String,
    table_selector: String,
    wait_timeout: Duration,
    settle_delay: Duration,
}

impl BrowserSession {
    pub async fn launch(config: &Config) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .new_headless_mode()
            .no_sandbox()
            .arg("--disable-dev-shm-usage")
            .window_size(1920, 1080)
            .request_timeout(config.navigation_timeout);
        if let Some(path) = &config.chrome_executable {
            builder = builder.chrome_executable(path);
        }
        let browser_config = builder.build().map_err(ScrapeError::Navigation)?;

        let (mut browser, mut events) = Browser::launch(browser_config)
            .await
            .map_err(|e| ScrapeError::Navigation(format!("failed to launch Chromium: {e}")))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if let Err(e) = event {
                    debug!("CDP handler: {e}");
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                let _ = browser.close().await;
                let _ = browser.wait().await;
                handler.abort();
                return Err(ScrapeError::Navigation(format!("failed to open a page: {e}")));
            }
        };

        Ok(BrowserSession {
            browser: Some(browser),
            handler: Some(handler),
            page,
            cookie_button_selector: config.cookie_button_selector.clone(),
            page_length_selector: config.page_length_selector.clone(),
            table_selector: config.table_selector(),
            wait_timeout: config.wait_timeout,
            settle_delay: config.settle_delay,
        })
    }

    /// Polls until `selector` is present and clickable, or the wait bound passes.
    async fn wait_for_clickable(&self, selector: &str) -> Result<Element> {
        let deadline = Instant::now() + self.wait_timeout;
        loop {
            if let Ok(element) = self.page.find_element(selector).await {
                let clickable = element
                    .call_js_fn(CLICKABLE_JS, false)
                    .await
                    .map(|r| is_true(r.result.value.as_ref()))
                    .unwrap_or(false);
                if clickable {
                    return Ok(element);
                }
            }
            if Instant::now() >= deadline {
                return Err(ScrapeError::Navigation(format!(
                    "`{}` not clickable within {:?}",
                    selector, self.wait_timeout
                )));
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    /// Polls for `selector` until it appears or the wait bound passes.
    async fn wait_for(&self, selector: &str) -> Result<Element> {
        let deadline = Instant::now() + self.wait_timeout;
        loop {
            match self.page.find_element(selector).await {
                Ok(element) => return Ok(element),
                Err(e) if Instant::now() >= deadline => {
                    return Err(ScrapeError::Navigation(format!(
                        "`{}` not found within {:?}: {}",
                        selector, self.wait_timeout, e
                    )));
                }
                Err(_) => sleep(POLL_INTERVAL).await,
            }
        }
    }
}

#[async_trait]
impl PageSession for BrowserSession {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| ScrapeError::Navigation(format!("failed to load {url}: {e}")))?;
        Ok(())
    }

    async fn dismiss_cookie_banner(&mut self) -> bool {
        let dismissed = match self.wait_for_clickable(&self.cookie_button_selector).await {
            Ok(button) => match button.call_js_fn(CLICK_JS, false).await {
                Ok(_) => true,
                Err(e) => {
                    debug!("cookie button not clickable: {e}");
                    false
                }
            },
            Err(e) => {
                debug!("{e}");
                false
            }
        };
        sleep(self.settle_delay).await;
        dismissed
    }

    async fn expand_all_rows(&mut self) -> Result<String> {
        let select = self.wait_for_clickable(&self.page_length_selector).await?;
        let returns = select
            .call_js_fn(SELECT_LARGEST_JS, false)
            .await
            .map_err(|e| ScrapeError::Navigation(format!("failed to change the page length: {e}")))?;

        let label = returns
            .result
            .value
            .as_ref()
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                ScrapeError::Navigation(format!("`{}` has no options", self.page_length_selector))
            })?;

        sleep(self.settle_delay).await;
        Ok(label)
    }

    async fn table_html(&mut self) -> Result<String> {
        let table = self.wait_for(&self.table_selector).await?;
        table
            .outer_html()
            .await
            .map_err(|e| ScrapeError::Navigation(format!("failed to read the table: {e}")))?
            .ok_or_else(|| ScrapeError::Navigation(format!("`{}` has no HTML", self.table_selector)))
    }

    async fn close(&mut self) {
        if let Some(mut browser) = self.browser.take() {
            if let Err(e) = browser.close().await {
                warn!("failed to close the browser cleanly: {e}");
            }
            if let Err(e) = browser.wait().await {
                warn!("failed to wait for the browser process: {e}");
            }
            debug!("browser process exited");
        }
        if let Some(handler) = self.handler.take() {
            handler.abort();
        }
    }
}

fn is_true(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Bool(true)))
}
