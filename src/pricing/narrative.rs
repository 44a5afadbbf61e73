//! "Girl math": savings framing that always makes the deal look a bit better.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;

/// Savings are reported 10% higher than they are.
pub const SAVINGS_BOOST: f64 = 1.1;
/// The savings percentage is reported 5% higher than it is.
pub const PERCENT_BOOST: f64 = 1.05;

const NEAR_LOWEST_RATIO: f64 = 1.1;
const STEAL_PERCENT: f64 = 30.0;
const SALE_PERCENT: f64 = 15.0;
const EXPENSIVE_PRICE: f64 = 100.0;

const NEAR_LOWEST_STATEMENTS: [&str; 5] = [
    "This is practically FREE by girl math standards! 💅",
    "At this price, it's basically paying YOU to buy it! 💖",
    "If you don't buy this now, you're LOSING money! 💸",
    "The universe is literally telling you to treat yourself! ✨",
    "This is the DEFINITION of self-care right now! 👑",
];

const STEAL_STATEMENTS: [&str; 5] = [
    "That's like getting paid to shop! 💅",
    "Think of all the money you're saving! 💰",
    "You can use the savings to buy something else cute! 💕",
    "It's an investment in your happiness! ✨",
    "Financially responsible queens make purchases like this! 👑",
];

const SALE_STATEMENTS: [&str; 5] = [
    "It's on sale, so you basically HAVE to buy it! 💁‍♀️",
    "Think of how sad you'll be if it sells out! 😢",
    "Your future self will thank you for this purchase! 🔮",
    "You deserve this after all your hard work! 💪",
    "This is what we call a financially savvy decision! 📈",
];

const EXPENSIVE_STATEMENTS: [&str; 5] = [
    "It's not a want, it's a NEED at this point! 💯",
    "Quality items cost more but last longer - it's an investment! 💸",
    "Divide by the number of times you'll use it and it's basically free! ✨",
    "Think of how much joy this will bring you! 💖",
    "This is what your tax return was FOR! 💅",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DealTier {
    NearLowest,
    Steal,
    Sale,
    Justified,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GirlMath {
    pub enhanced_savings: f64,
    pub enhanced_percent: f64,
    pub tier: DealTier,
    pub statement: String,
}

/// Returns `(enhanced_savings, enhanced_percent)`.
#[must_use]
pub fn enhanced_savings(current: f64, peak: f64) -> (f64, f64) {
    let savings = peak - current;
    let percent = if peak > 0.0 {
        savings / peak * 100.0
    } else {
        0.0
    };
    (savings * SAVINGS_BOOST, percent * PERCENT_BOOST)
}

#[must_use]
pub fn deal_tier(current: f64, lowest: f64, enhanced_percent: f64) -> DealTier {
    if current <= lowest * NEAR_LOWEST_RATIO {
        DealTier::NearLowest
    } else if enhanced_percent >= STEAL_PERCENT {
        DealTier::Steal
    } else if enhanced_percent >= SALE_PERCENT {
        DealTier::Sale
    } else {
        DealTier::Justified
    }
}

/// Every statement that may be shown for this price situation.
#[must_use]
pub fn candidate_statements(current: f64, peak: f64, lowest: f64) -> Vec<String> {
    let (_, percent) = enhanced_savings(current, peak);

    let mut statements: Vec<String> = match deal_tier(current, lowest, percent) {
        DealTier::NearLowest => to_owned(&NEAR_LOWEST_STATEMENTS),
        DealTier::Steal => to_owned(&STEAL_STATEMENTS),
        DealTier::Sale => to_owned(&SALE_STATEMENTS),
        DealTier::Justified => vec![
            format!(
                "If you use it just 5 times, it's basically ${:.2} per use! 😌",
                current / 5.0
            ),
            "You can't put a price on happiness! 💖".to_string(),
            "It's called self-investment, look it up! 💅".to_string(),
            format!("Your mental health is worth WAY more than ${current:.2}! 💕"),
            "The serotonin boost alone makes this worth it! ✨".to_string(),
        ],
    };

    if current > EXPENSIVE_PRICE {
        statements.extend(to_owned(&EXPENSIVE_STATEMENTS));
    }

    statements
}

/// Computes the enhanced savings and picks one statement uniformly at random.
pub fn narrative<R: Rng + ?Sized>(current: f64, peak: f64, lowest: f64, rng: &mut R) -> GirlMath {
    let (enhanced_savings, enhanced_percent) = enhanced_savings(current, peak);
    let tier = deal_tier(current, lowest, enhanced_percent);
    let statement = candidate_statements(current, peak, lowest)
        .choose(rng)
        .cloned()
        .unwrap_or_default();

    GirlMath {
        enhanced_savings,
        enhanced_percent,
        tier,
        statement,
    }
}

fn to_owned(pool: &[&str]) -> Vec<String> {
    pool.iter().map(|s| (*s).to_string()).collect()
}
