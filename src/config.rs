// src/config.rs
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{Local, NaiveDate};

use crate::error::{Result, ScrapeError};

pub const PRICE_LIST_URL: &str = "https://ngxgroup.com/exchange/data/equities-price-list/";
pub const SPREADSHEET_NAME: &str = "NGX Daily Equity Prices";
pub const CREDENTIALS_ENV: &str = "GOOGLE_CREDS_JSON";
pub const CHROME_ENV: &str = "CHROME_BIN";
pub const LOG_FILE_NAME: &str = "web_scrap_log.txt";

const TABLE_ID: &str = "latestdiclosuresEquities";
const COOKIE_BUTTON: &str = "#cookie_action_close_header";
const COMPANY_COLUMN: &str = "Company";

/// Run configuration, built once at process start from the environment and the clock.
#[derive(Debug, Clone)]
pub struct Config {
    pub url: String,
    /// Element id of the price table.
    pub table_id: String,
    /// CSS selector of the page-length `<select>` of the paginated table.
    pub page_length_selector: String,
    pub cookie_button_selector: String,
    pub company_column: String,
    pub spreadsheet_name: String,
    /// Raw service-account key JSON, checked only when publishing.
    pub credentials_json: Option<String>,
    pub chrome_executable: Option<PathBuf>,
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
    pub run_date: NaiveDate,
    /// Upper bound for page elements to show up.
    pub wait_timeout: Duration,
    /// Limit for a single browser command, page loads included.
    pub navigation_timeout: Duration,
    /// Pause after page interactions so the table can re-render.
    pub settle_delay: Duration,
}

impl Config {
    /// Defaults rooted at `base_dir`, without reading the environment.
    pub fn new(base_dir: impl Into<PathBuf>, run_date: NaiveDate) -> Self {
        let base_dir = base_dir.into();
        Config {
            url: PRICE_LIST_URL.to_string(),
            table_id: TABLE_ID.to_string(),
            page_length_selector: format!("#{}_length select", TABLE_ID),
            cookie_button_selector: COOKIE_BUTTON.to_string(),
            company_column: COMPANY_COLUMN.to_string(),
            spreadsheet_name: SPREADSHEET_NAME.to_string(),
            credentials_json: None,
            chrome_executable: None,
            data_dir: base_dir.join("data"),
            log_dir: base_dir.join("logs"),
            run_date,
            wait_timeout: Duration::from_secs(20),
            navigation_timeout: Duration::from_secs(300),
            settle_delay: Duration::from_secs(3),
        }
    }

    /// Working directory, today's local date, and `GOOGLE_CREDS_JSON` / `CHROME_BIN`.
    pub fn from_env() -> Result<Self> {
        let base_dir = env::current_dir().map_err(|e| ScrapeError::io(".", e))?;
        let mut config = Config::new(base_dir, Local::now().date_naive());

        config.credentials_json = env::var(CREDENTIALS_ENV).ok().filter(|v| !v.trim().is_empty());
        config.chrome_executable = env::var_os(CHROME_ENV).map(PathBuf::from);

        Ok(config)
    }

    pub fn table_selector(&self) -> String {
        format!("#{}", self.table_id)
    }

    /// `data/data_<YYYY-MM-DD>.csv`; one file per calendar day.
    pub fn csv_path(&self) -> PathBuf {
        self.data_dir
            .join(format!("data_{}.csv", self.run_date.format("%Y-%m-%d")))
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_dir.join(LOG_FILE_NAME)
    }

    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.log_dir, &self.data_dir] {
            fs::create_dir_all(dir).map_err(|e| ScrapeError::io(dir, e))?;
        }
        Ok(())
    }
}
