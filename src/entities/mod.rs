pub mod prelude;

pub mod coupon_codes;
pub mod favorites;
pub mod products;
pub mod search_history;
pub mod users;
