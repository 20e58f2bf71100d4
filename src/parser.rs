use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::ScrapeError;
use crate::models::GroupLink;

static VM_FAMILY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z][0-9][A-Z]?) VMs\b").expect("static regex"));

fn selector(css: &'static str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector {
        css,
        message: e.to_string(),
    })
}

fn anchor_text(anchor: ElementRef) -> String {
    anchor.text().collect::<String>().trim().to_string()
}

/// VM family code of a group named like "N2 VMs" or "C3D VMs".
pub fn vm_family_code(group_name: &str) -> Option<&str> {
    VM_FAMILY_RE
        .captures(group_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Every linked table cell of the index page, resolved against `base`.
/// Cells without a link come back as errors so the caller can log them.
pub fn parse_group_links(
    html: &str,
    base: &Url,
) -> Result<Vec<Result<GroupLink, ScrapeError>>, ScrapeError> {
    let doc = Html::parse_document(html);
    let cell_selector = selector("td")?;
    let anchor_selector = selector("a")?;

    let links: Vec<_> = doc
        .select(&cell_selector)
        .enumerate()
        .map(|(idx, cell)| -> Result<GroupLink, ScrapeError> {
            let anchor = cell
                .select(&anchor_selector)
                .next()
                .ok_or(ScrapeError::MissingLink(idx))?;
            let href = anchor.value().attr("href").ok_or(ScrapeError::MissingLink(idx))?;
            let url = base.join(href).map_err(|source| ScrapeError::Link {
                href: href.to_string(),
                source,
            })?;
            Ok(GroupLink {
                name: anchor_text(anchor),
                url,
            })
        })
        .collect();

    Ok(links)
}

/// SKU ids from a group detail table: the header row is skipped and the id is
/// the link text of each row's third cell. Rows are numbered from 1 after the
/// header.
pub fn parse_group_skus(html: &str) -> Result<Vec<Result<String, ScrapeError>>, ScrapeError> {
    let doc = Html::parse_document(html);
    let row_selector = selector("tr")?;
    let cell_selector = selector("td")?;
    let anchor_selector = selector("a")?;

    let skus: Vec<_> = doc
        .select(&row_selector)
        .skip(1)
        .enumerate()
        .map(|(idx, row)| -> Result<String, ScrapeError> {
            let row_no = idx + 1;
            let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
            let third = cells.get(2).ok_or(ScrapeError::ShortRow {
                row: row_no,
                cells: cells.len(),
            })?;
            third
                .select(&anchor_selector)
                .next()
                .map(anchor_text)
                .filter(|id| !id.is_empty())
                .ok_or(ScrapeError::MissingSkuLink(row_no))
        })
        .collect();

    Ok(skus)
}
