use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// SKU id -> VM family code ("N2", "C3D").
pub type SkuVmFamilyMap = HashMap<String, String>;

/// Missing and `null` both decode to the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    pub service_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default, deserialize_with = "null_as_default")]
    pub resource_family: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub resource_group: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub usage_type: String,
}

/// A SKU as returned by `services/{id}/skus`. The owning service is implied
/// by the request it came from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuRecord {
    pub sku_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub service_regions: Vec<String>,
}

/// One response page of a paginated billing endpoint.
pub trait Page {
    type Item;

    fn into_parts(self) -> (Vec<Self::Item>, Option<String>);
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicesPage {
    #[serde(default)]
    pub services: Option<Vec<ServiceRecord>>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl Page for ServicesPage {
    type Item = ServiceRecord;

    fn into_parts(self) -> (Vec<ServiceRecord>, Option<String>) {
        (self.services.unwrap_or_default(), self.next_page_token)
    }
}

/// SKUs stay undecoded here so one malformed item cannot fail the page.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkusPage {
    #[serde(default)]
    pub skus: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl Page for SkusPage {
    type Item = serde_json::Value;

    fn into_parts(self) -> (Vec<serde_json::Value>, Option<String>) {
        (self.skus.unwrap_or_default(), self.next_page_token)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupLink {
    pub name: String,
    pub url: url::Url,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRow {
    pub service_name: String,
    pub service_id: String,
    pub sku_name: String,
    pub sku_id: String,
    pub sku_resource_family: String,
    pub sku_resource_group: String,
    pub sku_usage_type: String,
    pub sku_region: String,
    pub sku_vm_family: Option<String>,
}

impl OutputRow {
    pub const HEADERS: [&'static str; 9] = [
        "service_name",
        "service_id",
        "sku_name",
        "sku_id",
        "sku_resource_family",
        "sku_resource_group",
        "sku_usage_type",
        "sku_region",
        "sku_vm_family",
    ];
}
