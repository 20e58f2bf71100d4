use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::archiver::{WriteSummary, flatten_and_write};
use crate::catalog::Catalog;
use crate::config::Endpoints;
use crate::credentials::load_key;
use crate::error::PipelineError;
use crate::fetcher::Fetch;
use crate::groups::{ScrapeOutcome, build_vm_family_map};

#[derive(Debug)]
pub struct RunSummary {
    pub scrape: ScrapeOutcome,
    pub services: usize,
    pub write: WriteSummary,
}

/// Runs the whole extraction and writes CSV to `out`.
///
/// The key is read and the full catalog fetched before anything is written,
/// so a fatal error leaves `out` untouched.
pub fn run<F: Fetch, W: Write>(
    fetch: &F,
    endpoints: &Endpoints,
    key_path: &Path,
    out: W,
) -> Result<RunSummary, PipelineError> {
    info!("Getting key");
    let key = load_key(key_path)?;

    info!("Getting SKU group data by scraping HTML tables");
    let scrape = build_vm_family_map(fetch, endpoints);

    info!("Getting services list");
    let catalog = Catalog::new(fetch, endpoints, &key);
    let services = catalog.list_services().map_err(PipelineError::Services)?;

    info!("Getting sku details");
    let mut skus_by_service = HashMap::with_capacity(services.len());
    for service in &services {
        info!(service = %service.display_name, "Getting skus for service");
        let skus = catalog
            .list_skus(&service.service_id)
            .map_err(|source| PipelineError::Skus {
                service_id: service.service_id.clone(),
                source,
            })?;
        skus_by_service.insert(service.service_id.clone(), skus);
    }

    info!("Writing CSV");
    let write = flatten_and_write(&services, &skus_by_service, &scrape.map, out)?;
    info!(
        rows = write.rows_written,
        skus = write.skus_written,
        skipped = write.skipped.len(),
        "Done"
    );

    Ok(RunSummary {
        scrape,
        services: services.len(),
        write,
    })
}
