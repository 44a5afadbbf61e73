pub mod account;
pub mod favorite;
pub mod history;
pub mod product;
