use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("failed to read key file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("key file {} is empty", .0.display())]
    Empty(PathBuf),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("invalid endpoint URL")]
    Url(#[from] url::ParseError),
    #[error("failed to decode page from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("page token {token:?} returned twice by {url}")]
    StalledCursor { url: String, token: String },
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("invalid link {href:?}")]
    Link {
        href: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid selector {css:?}: {message}")]
    Selector { css: &'static str, message: String },
    #[error("index cell {0} has no link")]
    MissingLink(usize),
    #[error("row {row} has {cells} cells, expected at least 3")]
    ShortRow { row: usize, cells: usize },
    #[error("row {0} has no SKU link in its third cell")]
    MissingSkuLink(usize),
}

#[derive(Debug, Error)]
pub enum FlattenError {
    #[error("sku {sku_id} has no {field}")]
    MissingField { sku_id: String, field: &'static str },
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to get key")]
    Credentials(#[from] CredentialError),
    #[error("failed to get service list")]
    Services(#[source] CatalogError),
    #[error("failed to get skus for service {service_id}")]
    Skus {
        service_id: String,
        #[source]
        source: CatalogError,
    },
    #[error("failed to write csv")]
    Csv(#[from] csv::Error),
}
