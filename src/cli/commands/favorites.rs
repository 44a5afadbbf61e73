use crate::config::Config;
use crate::db::Store;

pub async fn cmd_favorites(config: &Config) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let favorites = store.list_favorites().await?;

    if favorites.is_empty() {
        println!("No favorites yet.");
        println!();
        println!("Add one with: girlmath favorite <ASIN>");
        return Ok(());
    }

    println!("Favorites ({} total)", favorites.len());
    println!("{:-<70}", "");

    for fav in favorites {
        println!("💖 {} - ${:.2}", fav.title, fav.current_price);
        println!("  ASIN: {} | Added: {}", fav.asin, fav.added_at);
        if let Some(notes) = fav.notes {
            println!("  Notes: {notes}");
        }
    }

    Ok(())
}

pub async fn cmd_toggle_favorite(
    config: &Config,
    asin: &str,
    notes: Option<&str>,
) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    if store.toggle_favorite(asin, notes, None).await? {
        println!("✓ Added {asin} to favorites");
    } else {
        println!("✓ Removed {asin} from favorites");
    }

    Ok(())
}
