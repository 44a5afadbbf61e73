use crate::config::Config;
use crate::db::Store;
use crate::models::account::CouponStatus;
use crate::services::{AccountService, SeaOrmAccountService};

pub async fn cmd_coupon_check(config: &Config, code: &str) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;
    let accounts = SeaOrmAccountService::new(store, config.security.clone());

    match accounts.verify_coupon(code).await? {
        CouponStatus::Unknown => println!("Coupon '{code}' does not exist."),
        CouponStatus::AlreadyUsed => println!("Coupon '{code}' has already been used."),
        CouponStatus::Valid(tier) => {
            println!("✓ Coupon '{code}' is valid for {}", tier.features().name);
        }
    }

    Ok(())
}

pub async fn cmd_coupon_redeem(config: &Config, code: &str, username: &str) -> anyhow::Result<()> {
    let store = Store::new(&config.general.database_path).await?;

    let Some(user) = store.get_user_by_username(username).await? else {
        println!("User '{username}' not found.");
        return Ok(());
    };

    let accounts = SeaOrmAccountService::new(store, config.security.clone());
    match accounts.apply_coupon(code, user.id).await? {
        Some(tier) => println!("✓ {username} is now {} 💅", tier.features().name),
        None => println!("Coupon '{code}' is invalid or has already been used."),
    }

    Ok(())
}
