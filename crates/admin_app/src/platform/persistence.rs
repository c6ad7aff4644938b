use std::fs;
use std::path::Path;

use admin_core::PageSnapshot;
use admin_logging::admin_info;
use anyhow::{Context, Result};
use url::Url;

pub(crate) fn load_snapshot(path: &Path) -> Result<PageSnapshot> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read page {:?}", path))?;
    let snapshot: PageSnapshot =
        ron::from_str(&content).with_context(|| format!("failed to parse page {:?}", path))?;
    admin_info!(
        "Loaded page {} rows={} fields={}",
        snapshot.url,
        snapshot.rows.len(),
        snapshot.fields.len()
    );
    Ok(snapshot)
}

/// The page as the server renders it at `url`: same template, with the
/// search box showing the active filter.
pub(crate) fn snapshot_at(base: &PageSnapshot, url: &str, search_param: &str) -> PageSnapshot {
    let filter = Url::parse(url).ok().and_then(|parsed| {
        parsed
            .query_pairs()
            .find(|(key, _)| key == search_param)
            .map(|(_, value)| value.into_owned())
    });
    PageSnapshot {
        url: url.to_string(),
        search: base.search.as_ref().map(|_| filter.unwrap_or_default()),
        ..base.clone()
    }
}
