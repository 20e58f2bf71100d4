//! SKU -> VM family mapping scraped from the public SKU group pages.
//!
//! Scraping is auxiliary enrichment: nothing here fails the run. Every problem
//! becomes a warning on the returned [`ScrapeOutcome`] and whatever mapping was
//! built so far is kept.

use std::error::Error;

use tracing::{error, info, warn};

use crate::config::Endpoints;
use crate::error::ScrapeError;
use crate::fetcher::Fetch;
use crate::models::SkuVmFamilyMap;
use crate::parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeStatus {
    /// Every group page and row was parsed.
    Complete,
    /// Some groups or rows were skipped.
    Partial,
    /// The index page itself could not be read; the map is empty.
    Failed,
}

#[derive(Debug)]
pub struct ScrapeOutcome {
    pub map: SkuVmFamilyMap,
    pub warnings: Vec<ScrapeError>,
    pub status: ScrapeStatus,
}

pub fn build_vm_family_map(fetch: &impl Fetch, endpoints: &Endpoints) -> ScrapeOutcome {
    let mut map = SkuVmFamilyMap::new();
    let mut warnings = Vec::new();

    let links = match fetch
        .fetch_text(&endpoints.sku_groups_index)
        .map_err(ScrapeError::from)
        .and_then(|html| parser::parse_group_links(&html, &endpoints.site_origin))
    {
        Ok(links) => links,
        Err(e) => {
            error!(error = &e as &dyn Error, "Failed to get SKU groups");
            return ScrapeOutcome {
                map,
                warnings: vec![e],
                status: ScrapeStatus::Failed,
            };
        }
    };

    info!(groups = links.len(), "Parsing content for each sku group");
    for link in links {
        let group = match link {
            Ok(group) => group,
            Err(e) => {
                warn!(error = &e as &dyn Error, "Skipping sku group cell");
                warnings.push(e);
                continue;
            }
        };
        let Some(vm_family) = parser::vm_family_code(&group.name) else {
            continue;
        };

        info!(group = %group.name, vm_family, "Parsing content for sku group");
        let rows = match fetch
            .fetch_text(&group.url)
            .map_err(ScrapeError::from)
            .and_then(|html| parser::parse_group_skus(&html))
        {
            Ok(rows) => rows,
            Err(e) => {
                error!(
                    group = %group.name,
                    error = &e as &dyn Error,
                    "Failed to get sku group"
                );
                warnings.push(e);
                continue;
            }
        };

        for row in rows {
            match row {
                Ok(sku_id) => {
                    info!(sku_id = %sku_id, vm_family, "Mapping sku to VM family");
                    map.insert(sku_id, vm_family.to_string());
                }
                Err(e) => {
                    warn!(
                        group = %group.name,
                        error = &e as &dyn Error,
                        "Skipping malformed sku row"
                    );
                    warnings.push(e);
                }
            }
        }
    }

    let status = if warnings.is_empty() {
        ScrapeStatus::Complete
    } else {
        ScrapeStatus::Partial
    };
    info!(skus = map.len(), ?status, "Built VM family map");

    ScrapeOutcome { map, warnings, status }
}
