//! Flattens the Cloud Billing SKU catalog into CSV, one row per SKU per
//! region, enriched with the VM family scraped from the SKU group pages.

pub mod archiver;
pub mod catalog;
pub mod config;
pub mod credentials;
pub mod error;
pub mod fetcher;
pub mod flatten;
pub mod groups;
pub mod logging;
pub mod models;
pub mod parser;
pub mod pipeline;
