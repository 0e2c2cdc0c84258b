// src/pipeline.rs
use tracing::{error, info};

use crate::browser_handler::{BrowserSession, PageSession};
use crate::cloud_handler::SheetPublisher;
use crate::config::Config;
use crate::csv_handler::CSVHandler;
use crate::data_types::TableData;
use crate::error::Result;
use crate::{table_parser, transform};

/// Launches Chromium and runs the whole job against it.
pub async fn run<P: SheetPublisher>(config: &Config, publisher: &P) -> Result<TableData> {
    info!("Job started at {}", config.run_date.format("%Y-%m-%d"));

    // Nothing to tear down yet if the launch fails.
    let mut session = match BrowserSession::launch(config).await {
        Ok(session) => session,
        Err(e) => {
            error!("CRITICAL ERROR: {}", e);
            return Err(e);
        }
    };
    scrape_and_push(config, &mut session, publisher).await
}

/// Scrape, clean, save and publish. The session is closed on every path out.
pub async fn scrape_and_push<S, P>(config: &Config, session: &mut S, publisher: &P) -> Result<TableData>
where
    S: PageSession,
    P: SheetPublisher,
{
    let result = run_stages(config, session, publisher).await;
    if let Err(e) = &result {
        error!("CRITICAL ERROR: {}", e);
    }

    session.close().await;
    info!("Browser closed. Job finished.");

    result
}

async fn run_stages<S, P>(config: &Config, session: &mut S, publisher: &P) -> Result<TableData>
where
    S: PageSession,
    P: SheetPublisher,
{
    info!("Opening URL: {}", config.url);
    session.navigate(&config.url).await?;

    if session.dismiss_cookie_banner().await {
        info!("Cookie popup closed");
    } else {
        info!("No cookie popup found (skipping)");
    }

    info!("Setting table to show all rows...");
    let page_size = session.expand_all_rows().await?;
    info!("Page length set to '{}'", page_size);

    info!("Capturing table data...");
    let html = session.table_html().await?;
    let table = table_parser::parse(&html)?;
    info!("Successfully scraped {} rows.", table.len());

    let table = transform::clean(table, &config.company_column)?;

    let csv_path = config.csv_path();
    CSVHandler::new().write_csv(&csv_path, &table).await?;
    info!("CSV saved locally to {}", csv_path.display());

    publisher.publish(&table).await?;

    Ok(table)
}
