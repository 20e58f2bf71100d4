use std::time::Duration;

use url::Url;

pub const SITE_ORIGIN: &str = "https://cloud.google.com";
pub const SKU_GROUPS_PATH: &str = "/skus/sku-groups";
pub const BILLING_API_BASE: &str = "https://cloudbilling.googleapis.com";

/// API key file, relative to the working directory.
pub const KEY_PATH: &str = "key.secret";

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const MAX_REDIRECTS: usize = 10;
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

/// Where every upstream request goes.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Origin that relative group links are resolved against.
    pub site_origin: Url,
    pub sku_groups_index: Url,
    pub billing_api_base: Url,
}

impl Endpoints {
    pub fn new(
        site_origin: &str,
        groups_path: &str,
        billing_api_base: &str,
    ) -> Result<Self, url::ParseError> {
        let site_origin = Url::parse(site_origin)?;
        let sku_groups_index = site_origin.join(groups_path)?;
        Ok(Self {
            site_origin,
            sku_groups_index,
            billing_api_base: Url::parse(billing_api_base)?,
        })
    }

    pub fn google_cloud() -> Result<Self, url::ParseError> {
        Self::new(SITE_ORIGIN, SKU_GROUPS_PATH, BILLING_API_BASE)
    }

    pub fn services_url(&self) -> Result<Url, url::ParseError> {
        self.billing_api_base.join("/v1/services")
    }

    /// `service_id` is one path segment; reserved characters in it are escaped.
    pub fn skus_url(&self, service_id: &str) -> Result<Url, url::ParseError> {
        let mut url = self.services_url()?;
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .push(service_id)
            .push("skus");
        Ok(url)
    }
}
