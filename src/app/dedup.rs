use std::collections::HashSet;

use super::types::LinkEntry;

/// Drops entries whose URL was already seen, keeping first occurrences in
/// their original order.
pub fn dedup_links(links: Vec<LinkEntry>) -> Vec<LinkEntry> {
    let mut seen = HashSet::with_capacity(links.len());
    links
        .into_iter()
        .filter(|link| seen.insert(link.url.clone()))
        .collect()
}
