// src/lib.rs
//! Scrapes the NGX daily equities price list with a headless browser, saves it as a
//! dated CSV file and overwrites a Google spreadsheet with it.

pub mod browser_handler;
pub mod cloud_handler;
pub mod config;
pub mod csv_handler;
pub mod data_types;
pub mod error;
pub mod logger;
pub mod pipeline;
pub mod table_parser;
pub mod transform;

pub use browser_handler::{BrowserSession, PageSession};
pub use cloud_handler::{CloudHandler, SheetPublisher};
pub use config::Config;
pub use data_types::TableData;
pub use error::{Result, ScrapeError};
