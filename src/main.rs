use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::error;

use gcp_sku_extractor::config::{Endpoints, KEY_PATH};
use gcp_sku_extractor::fetcher::HttpFetcher;
use gcp_sku_extractor::{logging, pipeline};

fn main() -> ExitCode {
    logging::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let endpoints = Endpoints::google_cloud().context("invalid endpoint configuration")?;
    let fetcher = HttpFetcher::new()?;
    let stdout = std::io::stdout().lock();

    pipeline::run(&fetcher, &endpoints, Path::new(KEY_PATH), stdout)?;
    Ok(())
}
