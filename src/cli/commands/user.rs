use crate::config::Config;
use crate::db::Store;
use crate::models::account::Tier;
use crate::services::{AccountError, AccountService, SeaOrmAccountService};

pub async fn cmd_user_create(
    config: &Config,
    username: &str,
    password: &str,
    email: Option<&str>,
    tier: &str,
) -> anyhow::Result<()> {
    let Some(tier) = Tier::parse(tier) else {
        println!("Unknown tier '{tier}'. Use: free, besties, platinum");
        return Ok(());
    };

    let store = Store::new(&config.general.database_path).await?;
    let accounts = SeaOrmAccountService::new(store, config.security.clone());

    match accounts.create_user(username, password, email, tier).await {
        Ok(Some(id)) => println!("✓ Created user '{username}' (ID: {id}, tier: {tier})"),
        Ok(None) => println!("Username '{username}' is already taken."),
        Err(AccountError::Validation(msg)) => println!("{msg}"),
        Err(e) => return Err(anyhow::anyhow!(e)),
    }

    Ok(())
}
