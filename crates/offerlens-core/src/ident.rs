//! URL normalization and canonical product identity
//!
//! The same product listed with different tracking parameters must resolve
//! to the same canonical key, so sessions and deduplication agree on
//! identity.

use crate::error::VerifierError;
use url::Url;

/// Query parameters that never change listing identity
const TRACKING_PARAMS: &[&str] = &["ref", "ref_", "tag", "fbclid", "gclid", "mc_cid", "mc_eid"];

fn is_tracking_param(name: &str) -> bool {
    name.starts_with("utm_") || TRACKING_PARAMS.contains(&name)
}

/// Validate and normalize a listing URL: https/http only, host required,
/// fragment dropped, tracking parameters removed, surviving query pairs
/// sorted for stability.
pub fn normalize_url(raw: &str) -> Result<String, VerifierError> {
    let mut parsed =
        Url::parse(raw.trim()).map_err(|e| VerifierError::InvalidUrl(e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(VerifierError::InvalidUrl(format!(
            "unsupported scheme: {}",
            parsed.scheme()
        )));
    }
    if parsed.host_str().is_none() {
        return Err(VerifierError::InvalidUrl("missing host".to_string()));
    }

    parsed.set_fragment(None);

    let mut kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(name, _)| !is_tracking_param(name))
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();
    kept.sort();

    if kept.is_empty() {
        parsed.set_query(None);
    } else {
        let query = kept
            .iter()
            .map(|(name, value)| {
                if value.is_empty() {
                    name.clone()
                } else {
                    format!("{}={}", name, value)
                }
            })
            .collect::<Vec<_>>()
            .join("&");
        parsed.set_query(Some(&query));
    }

    Ok(parsed.to_string())
}

/// Canonical product key for a normalized URL
pub fn canonical_key(normalized_url: &str) -> String {
    format!("blake3:{}", blake3::hash(normalized_url.as_bytes()))
}
