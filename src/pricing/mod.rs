pub mod category;
pub mod history;
pub mod narrative;

pub use category::{ProductCategory, Volatility};
pub use history::{HISTORY_DAYS, PriceHistory, SyntheticProduct, anchored_history, synthesize};
pub use narrative::{DealTier, GirlMath, narrative};
