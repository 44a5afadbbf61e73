//! Lookup command handler

use crate::config::Config;
use crate::services::{LookupError, LookupOptions};
use crate::state::SharedState;

pub async fn cmd_lookup(config: &Config, url: &str, demo: bool) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;

    let options = LookupOptions {
        force_demo: demo,
        ..LookupOptions::default()
    };

    let outcome = match state.lookup_service.lookup(url, &options).await {
        Ok(outcome) => outcome,
        Err(e) => return report_lookup_error(e),
    };

    let product = &outcome.product;
    let heart = if outcome.is_favorite { " 💖" } else { "" };

    println!("{}{}", product.title, heart);
    println!("  ASIN: {} | Category: {}", product.asin, product.category);
    if outcome.demo {
        println!("  (demo data: live prices were unavailable)");
    }
    println!("{:-<60}", "");
    println!("  Current: ${:.2}", product.current_price);
    println!("  Peak:    ${:.2}", product.peak_price);
    println!("  Lowest:  ${:.2}", product.lowest_price);
    println!();
    println!(
        "  You're saving ${:.2} ({:.1}% off)!",
        outcome.girl_math.enhanced_savings, outcome.girl_math.enhanced_percent
    );
    println!("  {}", outcome.girl_math.statement);

    Ok(())
}

/// Bad input is reported to the user; anything else is a real failure.
fn report_lookup_error(err: LookupError) -> anyhow::Result<()> {
    match err {
        LookupError::InvalidUrl(_) | LookupError::NotFound(_) => {
            println!("{err}");
            Ok(())
        }
        LookupError::Internal(_) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_urls_are_reported_not_failed() {
        let err = LookupError::InvalidUrl("https://example.com".to_string());
        assert!(report_lookup_error(err).is_ok());
    }

    #[test]
    fn test_internal_errors_fail_the_command() {
        let err = LookupError::Internal("database is locked".to_string());
        let result = report_lookup_error(err);
        assert!(result.unwrap_err().to_string().contains("database is locked"));
    }
}
