pub mod asin;
pub mod price;

pub use asin::{AsinMatch, asin_from_resolved_url, parse_product_url};
pub use price::parse_price;
