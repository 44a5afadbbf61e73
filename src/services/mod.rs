pub mod account_service;
pub use account_service::{AccountError, AccountService};

pub mod account_service_impl;
pub use account_service_impl::SeaOrmAccountService;

pub mod lookup;
pub use lookup::{LookupError, LookupOptions, LookupOutcome, LookupService};
