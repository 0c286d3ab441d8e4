//! table context resolution
//!
//! The table id normally arrives inside the url the customer scanned at the
//! table; a fixed id covers deployments that print one code per table.

use log::warn;
use url::Url;

/// identifier of the physical table placing the order
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TableContext {
    pub id: String,
}

/// Resolve the active table, preferring the scanned url's `table` query
/// parameter over the fixed fallback id. Returns `None` when neither yields
/// an id; submission stays blocked until a table is present.
pub(crate) fn resolve(scan_url: Option<&str>, fixed_id: Option<&str>) -> Option<TableContext> {
    if let Some(raw) = scan_url {
        match Url::parse(raw) {
            Ok(url) => {
                if let Some((_, id)) = url.query_pairs().find(|(k, _)| k == "table") {
                    if !id.is_empty() {
                        return Some(TableContext { id: id.into_owned() });
                    }
                }
                warn!("scan url carries no table parameter, {}", raw);
            }
            Err(e) => {
                warn!("failed to parse scan url, {}", e);
            }
        }
    }
    fixed_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| TableContext { id: id.to_string() })
}
