pub mod coupon;
pub mod favorite;
pub mod history;
pub mod product;
pub mod user;
