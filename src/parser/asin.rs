//! ASIN extraction from Amazon product URLs.
//!
//! Only the pure, network-free half lives here. Resolving `a.co/d/...` short
//! links is done by [`crate::services::LookupService::extract_id`], which feeds
//! the resolved URL back into [`asin_from_resolved_url`].

use regex::Regex;
use std::sync::OnceLock;

/// Marker that switches extraction into short-link mode.
pub const SHORT_LINK_MARKER: &str = "a.co/d/";

/// Characters the last-resort scan splits a URL on.
const SEGMENT_SEPARATORS: [char; 4] = ['/', '&', '?', '='];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsinMatch {
    /// A 10-character product identifier found directly in the URL.
    Asin(String),
    /// An `a.co/d/<code>` short link whose redirect target is still unknown.
    ShortLink(String),
}

struct AsinRegex {
    /// Tried in order, first match wins.
    standard: [Regex; 4],
    short_link: Regex,
}

impl AsinRegex {
    fn get() -> Option<&'static Self> {
        static INSTANCE: OnceLock<Option<AsinRegex>> = OnceLock::new();
        INSTANCE
            .get_or_init(|| {
                Some(Self {
                    standard: [
                        Regex::new(r"/dp/(\w{10})").ok()?,
                        Regex::new(r"/gp/product/(\w{10})").ok()?,
                        Regex::new(r"/ASIN/(\w{10})").ok()?,
                        Regex::new(r"amazon\.com.*?/(\w{10})(?:/|\?|$)").ok()?,
                    ],
                    short_link: Regex::new(r"a\.co/d/(\w{7,10})").ok()?,
                })
            })
            .as_ref()
    }
}

/// Parses a product URL without touching the network.
///
/// Returns `None` for empty input and for URLs with no extractable token.
#[must_use]
pub fn parse_product_url(url: &str) -> Option<AsinMatch> {
    if url.is_empty() {
        return None;
    }

    if url.contains(SHORT_LINK_MARKER)
        && let Some(code) = short_link_code(url)
    {
        return Some(AsinMatch::ShortLink(code));
    }

    match_standard(url)
        .or_else(|| scan_segments(url, &SEGMENT_SEPARATORS))
        .map(AsinMatch::Asin)
}

/// Picks the ASIN out of the URL a short link redirected to, falling back to
/// the short code itself when nothing better is found.
#[must_use]
pub fn asin_from_resolved_url(resolved_url: &str, short_code: &str) -> String {
    match_standard(resolved_url)
        .or_else(|| scan_segments(resolved_url, &['/']))
        .unwrap_or_else(|| short_code.to_string())
}

#[must_use]
pub fn short_link_code(url: &str) -> Option<String> {
    let re = AsinRegex::get()?;
    re.short_link
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

fn match_standard(url: &str) -> Option<String> {
    let re = AsinRegex::get()?;
    re.standard.iter().find_map(|pattern| {
        pattern
            .captures(url)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    })
}

fn scan_segments(url: &str, separators: &[char]) -> Option<String> {
    url.split(separators)
        .find(|part| is_asin_token(part))
        .map(str::to_string)
}

/// True for exactly ten ASCII letters or digits.
#[must_use]
pub fn is_asin_token(s: &str) -> bool {
    s.len() == 10 && s.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asin(url: &str) -> Option<String> {
        match parse_product_url(url) {
            Some(AsinMatch::Asin(a)) => Some(a),
            _ => None,
        }
    }

    #[test]
    fn test_standard_dp_url() {
        assert_eq!(
            asin("https://www.amazon.com/dp/B07PXGQC1Q/").as_deref(),
            Some("B07PXGQC1Q")
        );
    }

    #[test]
    fn test_slug_dp_url() {
        assert_eq!(
            asin("https://www.amazon.com/Apple-AirPods-Pro-2nd-Generation/dp/B0BDHWDR12/")
                .as_deref(),
            Some("B0BDHWDR12")
        );
    }

    #[test]
    fn test_gp_product_and_asin_paths() {
        assert_eq!(
            asin("https://www.amazon.com/gp/product/B08N5KWB9H?th=1").as_deref(),
            Some("B08N5KWB9H")
        );
        assert_eq!(
            asin("https://www.amazon.com/exec/obidos/ASIN/0596004478/ref=nosim").as_deref(),
            Some("0596004478")
        );
    }

    #[test]
    fn test_dp_wins_over_earlier_generic_token() {
        // The generic host pattern would match ABCDEFGHIJ first if it ran first.
        assert_eq!(
            asin("https://www.amazon.com/ABCDEFGHIJ/dp/B09G9FPHY6").as_deref(),
            Some("B09G9FPHY6")
        );
    }

    #[test]
    fn test_generic_host_path() {
        assert_eq!(
            asin("https://www.amazon.com/Some-Product/B08N5KWB9H?ref=sr_1_1").as_deref(),
            Some("B08N5KWB9H")
        );
        assert_eq!(
            asin("https://www.amazon.com/b/B08N5KWB9H").as_deref(),
            Some("B08N5KWB9H")
        );
    }

    #[test]
    fn test_segment_fallback() {
        assert_eq!(
            asin("https://smile.example.org/item?id=B012345678&x=1").as_deref(),
            Some("B012345678")
        );
    }

    #[test]
    fn test_short_link_detected() {
        assert_eq!(
            parse_product_url("https://a.co/d/8iGnbpL"),
            Some(AsinMatch::ShortLink("8iGnbpL".to_string()))
        );
    }

    #[test]
    fn test_short_link_with_too_short_code_falls_through() {
        assert_eq!(parse_product_url("https://a.co/d/abc"), None);
    }

    #[test]
    fn test_unrelated_and_malformed_input() {
        assert_eq!(parse_product_url("https://example.com"), None);
        assert_eq!(parse_product_url(""), None);
        assert_eq!(parse_product_url("not a url at all"), None);
        assert_eq!(parse_product_url("???///&&=="), None);
    }

    #[test]
    fn test_resolved_short_link() {
        assert_eq!(
            asin_from_resolved_url(
                "https://www.amazon.com/Acer-Nitro/dp/B0CRDCW3KM?ref=x",
                "8iGnbpL"
            ),
            "B0CRDCW3KM"
        );
        assert_eq!(
            asin_from_resolved_url("https://www.amazon.co.uk/x/B0CRDCW3KM", "8iGnbpL"),
            "B0CRDCW3KM"
        );
        assert_eq!(
            asin_from_resolved_url("https://www.amazon.com/errors/validate", "8iGnbpL"),
            "8iGnbpL"
        );
    }

    #[test]
    fn test_is_asin_token() {
        assert!(is_asin_token("B07PXGQC1Q"));
        assert!(is_asin_token("b07pxgqc1q"));
        assert!(!is_asin_token("B07PXGQC1"));
        assert!(!is_asin_token("B07PXG_C1Q"));
    }
}
