// src/main.rs
use anyhow::Context;

use ngx_price_sync::{logger, pipeline, CloudHandler, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // A local .env may carry GOOGLE_CREDS_JSON outside CI.
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("failed to read configuration")?;
    config.ensure_dirs().context("failed to create output directories")?;
    logger::init(&config.log_path()).context("failed to open the job log")?;

    let publisher = CloudHandler::from_config(&config);
    pipeline::run(&config, &publisher).await?;

    Ok(())
}
