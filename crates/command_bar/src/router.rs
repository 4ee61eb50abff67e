use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shared::{
    domain::{BookmarkEntry, CategoryId},
    protocol::{Navigation, WEB_SEARCH_ENDPOINT},
};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub entry: BookmarkEntry,
    pub matched_prefix_length: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteResult {
    pub matches: Vec<MatchResult>,
    pub exact_url: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePolicy {
    /// Navigate when exactly one non-exact prefix match exists instead of
    /// falling back to a web search.
    pub single_prefix_match_navigates: bool,
}

pub fn route(query: &str, entries: &[BookmarkEntry]) -> RouteResult {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return RouteResult::default();
    }
    let needle_chars = needle.chars().count();

    let mut result = RouteResult::default();
    for entry in entries {
        let title = entry.title.trim().to_lowercase();
        if !title.starts_with(&needle) {
            continue;
        }
        if result.exact_url.is_none() && title == needle {
            result.exact_url = Some(entry.url.clone());
        }
        result.matches.push(MatchResult {
            entry: entry.clone(),
            matched_prefix_length: title_prefix_chars(entry.title.trim(), needle_chars),
        });
    }

    debug!(
        query = %needle,
        matches = result.matches.len(),
        exact = result.exact_url.is_some(),
        "routed query"
    );
    result
}

/// Characters of `title` whose lowercase form covers the first `lowered_chars`
/// characters of the lowercased title. Some capitals lowercase to two chars.
fn title_prefix_chars(title: &str, lowered_chars: usize) -> usize {
    let mut lowered = 0;
    let mut taken = 0;
    for c in title.chars() {
        if lowered >= lowered_chars {
            break;
        }
        lowered += c.to_lowercase().count();
        taken += 1;
    }
    taken
}

pub fn category_counts(matches: &[MatchResult]) -> BTreeMap<CategoryId, usize> {
    let mut counts = BTreeMap::new();
    for m in matches {
        *counts.entry(m.entry.category_id).or_insert(0) += 1;
    }
    counts
}

/// Submit-time verdict for text the evaluator declined.
pub fn decide(query: &str, entries: &[BookmarkEntry], policy: RoutePolicy) -> Navigation {
    let RouteResult { matches, exact_url } = route(query, entries);

    if let Some(url) = exact_url {
        return Navigation::Bookmark { url };
    }
    if policy.single_prefix_match_navigates {
        if let [only] = matches.as_slice() {
            return Navigation::Bookmark {
                url: only.entry.url.clone(),
            };
        }
    }
    Navigation::WebSearch {
        url: web_search_url(query),
    }
}

pub fn web_search_url(query: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
    format!("{WEB_SEARCH_ENDPOINT}?q={encoded}")
}

#[cfg(test)]
#[path = "tests/router_tests.rs"]
mod tests;
