mod coupon;
mod favorites;
mod history;
mod lookup;
mod tiers;
mod user;

pub use coupon::{cmd_coupon_check, cmd_coupon_redeem};
pub use favorites::{cmd_favorites, cmd_toggle_favorite};
pub use history::cmd_history;
pub use lookup::cmd_lookup;
pub use tiers::cmd_tiers;
pub use user::cmd_user_create;
