//! Paginated reads of the Cloud Billing catalog.
//!
//! Both endpoints follow the same cursor rule: keep requesting with the
//! returned `nextPageToken` until it is absent or empty. A page with no items
//! but a token still advances.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use tracing::{error, info};
use url::Url;

use crate::config::Endpoints;
use crate::error::CatalogError;
use crate::fetcher::{Fetch, redacted};
use crate::models::{Page, ServiceRecord, ServicesPage, SkuRecord, SkusPage};

pub struct Catalog<'a, F> {
    fetch: &'a F,
    endpoints: &'a Endpoints,
    key: &'a str,
}

impl<'a, F: Fetch> Catalog<'a, F> {
    pub fn new(fetch: &'a F, endpoints: &'a Endpoints, key: &'a str) -> Self {
        Self { fetch, endpoints, key }
    }

    pub fn list_services(&self) -> Result<Vec<ServiceRecord>, CatalogError> {
        let url = self.endpoints.services_url()?;
        let services = paginate::<ServicesPage>(self.fetch, &url, self.key)?;
        info!(services = services.len(), "Found services");
        Ok(services)
    }

    /// SKUs of one service in API order. Items that do not decode as a SKU are
    /// logged and left out.
    pub fn list_skus(&self, service_id: &str) -> Result<Vec<SkuRecord>, CatalogError> {
        let url = self.endpoints.skus_url(service_id)?;
        let raw = paginate::<SkusPage>(self.fetch, &url, self.key)?;

        let skus: Vec<SkuRecord> = raw
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<SkuRecord>(item) {
                Ok(sku) => Some(sku),
                Err(e) => {
                    error!(service_id, error = %e, "Failed to decode sku, skipping");
                    None
                }
            })
            .collect();
        info!(service_id, skus = skus.len(), "Found skus");
        Ok(skus)
    }
}

/// Build the request URL for one page. The first page carries no token.
pub fn page_url(base: &Url, key: &str, page_token: Option<&str>) -> Url {
    let mut url = base.clone();
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("key", key);
        if let Some(token) = page_token {
            query.append_pair("pageToken", token);
        }
    }
    url
}

/// Fetches every page in order. A token that was already requested ends the
/// walk with [`CatalogError::StalledCursor`], so cursor cycles terminate.
pub fn paginate<P>(
    fetch: &impl Fetch,
    base: &Url,
    key: &str,
) -> Result<Vec<P::Item>, CatalogError>
where
    P: Page + DeserializeOwned,
{
    let mut items = Vec::new();
    let mut token: Option<String> = None;
    let mut seen: HashSet<String> = HashSet::new();

    loop {
        let url = page_url(base, key, token.as_deref());
        info!(
            url = %redacted(base),
            page_token = token.as_deref().unwrap_or(""),
            "Getting page"
        );

        let body = fetch.fetch_text(&url)?;
        let page: P = serde_json::from_str(&body).map_err(|source| CatalogError::Decode {
            url: redacted(&url),
            source,
        })?;
        let (page_items, next) = page.into_parts();
        items.extend(page_items);

        match next.filter(|t| !t.is_empty()) {
            Some(next) if seen.contains(&next) => {
                return Err(CatalogError::StalledCursor {
                    url: redacted(base),
                    token: next,
                });
            }
            Some(next) => {
                seen.insert(next.clone());
                token = Some(next);
            }
            None => break,
        }
    }

    Ok(items)
}
