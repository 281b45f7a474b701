//! Header resolution: map observed column headers onto canonical metric keys.
//!
//! Resolution runs once per batch in two passes per key. Exact matching
//! compares trimmed, lower-cased headers against the key's alias list and
//! binds the first header (in input order) that equals an alias. If that
//! fails and fuzzy matching is enabled, each query in the key's search bag
//! (aliases in declared order, then the canonical key string itself) is
//! scored against every normalized header with a character-level similarity
//! ratio; the first query with a match at or above
//! [`FUZZY_MATCH_THRESHOLD`] binds the best-scoring header.
//!
//! Keys that match nothing are simply absent from the mapping; downstream
//! treats them as "column not present". Matching for each key is computed
//! independently against the full header set, so two keys can in principle
//! fuzzy-bind the same header.

use std::collections::BTreeMap;

use log::debug;
use similar::TextDiff;

use crate::schema::CanonicalKey;

/// Minimum similarity ratio for a fuzzy header match, inclusive.
pub const FUZZY_MATCH_THRESHOLD: f32 = 0.85;

/// Per-batch resolution result: canonical key to the originally-cased source
/// header it was bound to.
pub type HeaderMapping = BTreeMap<CanonicalKey, String>;

/// Character-level similarity ratio in `[0.0, 1.0]`.
pub fn similarity(a: &str, b: &str) -> f32 {
    TextDiff::from_chars(a, b).ratio()
}

/// Resolve the batch's observed headers against the canonical schema.
///
/// `headers` must be in observation order; ties in both exact and fuzzy
/// matching break toward the earlier header, so identical input order yields
/// an identical mapping.
pub fn resolve_headers(headers: &[String], enable_fuzzy: bool) -> HeaderMapping {
    let normalized: Vec<(String, &str)> = headers
        .iter()
        .map(|header| (header.trim().to_lowercase(), header.as_str()))
        .collect();

    let mut mapping = HeaderMapping::new();
    for key in CanonicalKey::ALL {
        if let Some((_, original)) = normalized
            .iter()
            .find(|(lowered, _)| key.aliases().contains(&lowered.as_str()))
        {
            mapping.insert(key, (*original).to_string());
            continue;
        }
        if !enable_fuzzy {
            continue;
        }
        if let Some(original) = fuzzy_candidate(key, &normalized) {
            debug!("Fuzzy-bound '{original}' to canonical key '{key}'");
            mapping.insert(key, original.to_string());
        }
    }
    mapping
}

/// First qualifying fuzzy match for `key` over the normalized headers.
///
/// Queries are tried in search-bag order; within a query, the best-scoring
/// header wins and earlier headers win score ties.
fn fuzzy_candidate<'a>(key: CanonicalKey, normalized: &[(String, &'a str)]) -> Option<&'a str> {
    let queries = key
        .aliases()
        .iter()
        .copied()
        .chain(std::iter::once(key.as_str()));
    for query in queries {
        let mut best: Option<(f32, &str)> = None;
        for (lowered, original) in normalized {
            let score = similarity(query, lowered);
            if score >= FUZZY_MATCH_THRESHOLD && best.is_none_or(|(top, _)| score > top) {
                best = Some((score, original));
            }
        }
        if let Some((_, original)) = best {
            return Some(original);
        }
    }
    None
}
