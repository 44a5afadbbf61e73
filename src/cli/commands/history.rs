use crate::config::Config;
use crate::db::Store;

pub async fn cmd_history(config: &Config, limit: u64) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let searches = store.recent_searches(limit).await?;

    if searches.is_empty() {
        println!("No search history.");
        return Ok(());
    }

    println!("Recent Searches (last {}):", searches.len());
    println!("{:-<70}", "");

    for search in searches {
        let title = search
            .title
            .or(search.search_term)
            .unwrap_or_else(|| "Unknown product".to_string());
        let price = search
            .current_price
            .map_or_else(|| "?".to_string(), |p| format!("${p:.2}"));
        println!("• {} ({})", title, price);
        println!(
            "  ASIN: {} | {}",
            search.asin.as_deref().unwrap_or("-"),
            search.search_date
        );
    }

    Ok(())
}
