pub use super::coupon_codes::Entity as CouponCodes;
pub use super::favorites::Entity as Favorites;
pub use super::products::Entity as Products;
pub use super::search_history::Entity as SearchHistory;
pub use super::users::Entity as Users;
