//! CLI module - Command-line interface for girlmath
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// girlmath - Amazon price history with a supportive spin
#[derive(Parser)]
#[command(name = "girlmath")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    #[command(alias = "web")]
    Serve,

    /// Look up an Amazon product URL
    #[command(alias = "l")]
    Lookup {
        /// Product URL (amazon.com or a.co short link)
        url: String,
        /// Skip scraping and use demo data
        #[arg(long)]
        demo: bool,
    },

    /// Show recent searches
    #[command(alias = "h")]
    History {
        /// Number of entries to show
        #[arg(default_value = "10")]
        limit: u64,
    },

    /// List favorite products
    #[command(alias = "favs")]
    Favorites,

    /// Add or remove a product from favorites
    #[command(alias = "fav")]
    Favorite {
        /// Product ASIN
        asin: String,
        /// Note to keep with the favorite
        #[arg(long)]
        notes: Option<String>,
    },

    /// Manage user accounts
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Check or redeem coupon codes
    Coupon {
        #[command(subcommand)]
        command: CouponCommands,
    },

    /// Show subscription tiers and their features
    Tiers,

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Create a new account
    Create {
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        email: Option<String>,
        /// free, besties or platinum
        #[arg(long, default_value = "free")]
        tier: String,
    },
}

#[derive(Subcommand)]
pub enum CouponCommands {
    /// Show whether a code is valid
    Check { code: String },
    /// Redeem a code for a user
    Redeem {
        code: String,
        #[arg(long)]
        username: String,
    },
}

pub use commands::*;
