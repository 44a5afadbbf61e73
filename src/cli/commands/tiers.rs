use crate::models::account::Tier;

pub fn cmd_tiers() {
    for tier in Tier::ALL {
        let features = tier.features();
        let searches = features
            .max_searches_per_day
            .map_or_else(|| "unlimited".to_string(), |n| n.to_string());

        println!("{} ({}) - {}", features.name, tier, features.price);
        println!("  {}", features.description);
        println!("  Searches per day: {searches}");
        for feature in features.features {
            println!("  • {feature}");
        }
        println!();
    }
}
