use regex::Regex;
use std::sync::OnceLock;

fn price_regex() -> Option<&'static Regex> {
    static INSTANCE: OnceLock<Option<Regex>> = OnceLock::new();
    INSTANCE
        .get_or_init(|| Regex::new(r"\d[\d,]*(?:\.\d+)?").ok())
        .as_ref()
}

/// Pulls the first numeric amount out of scraped price text such as
/// `"$1,299.99"` or `"24."`.
#[must_use]
pub fn parse_price(text: &str) -> Option<f64> {
    let re = price_regex()?;
    let m = re.find(text.trim())?;
    m.as_str().replace(',', "").parse::<f64>().ok()
}
