//! Integration tests for configuration loading and validation

use zoo_sim::core::error::ConfigError;
use zoo_sim::economy::loader::parse_economy;
use zoo_sim::player::behavior::{FeedOrder, SwapPolicy};
use zoo_sim::session::DurationFormula;
use zoo_sim::SimSettings;

const ECONOMY: &str = r#"
    [[animals]]
    animal_id = 1
    name = "Meerkat"
    set_id = 1
    rarity = 1
    level_unlocked = 1
    revenue = 1
    treats_earned = 5

    [[animals]]
    animal_id = 2
    name = "Lion"
    set_id = 1
    rarity = 3
    level_unlocked = 2
    revenue = 3
    treats_earned = 15

    [[sockets]]
    socket_id = 1
    unlock_level = 1

    [[candies]]
    candy_level = 1
    candy_cost = 25
    xp_earned = 1

    [[candy_slots]]
    candy_slot_id = 1
    candy_slots = 6
    unlock_level = 1

    [[rewards]]
    reward_id = 1
    rarity = [1, 0, 1, 0, 0]

    [[player_levels]]
    player_level = 1
    xp_req_next = 8
    xp_req_total = 8
    candy_level_min = 1
    candy_level_max = 1
    lur_soft = 100
    lur_egg_id = 1

    [[player_levels]]
    player_level = 2
    xp_req_next = 11
    xp_req_total = 19
    candy_level_min = 1
    candy_level_max = 1
    lur_soft = 200
"#;

#[test]
fn test_legacy_column_name_accepted() {
    let economy = parse_economy(ECONOMY).unwrap();
    let row = economy.player_level(1).unwrap();
    assert_eq!(row.lur_reward_id.map(|r| r.0), Some(1));
}

#[test]
fn test_unsorted_animals_rejected() {
    let broken = ECONOMY.replacen("level_unlocked = 1", "level_unlocked = 3", 1);
    let err = parse_economy(&broken).unwrap_err();
    assert!(matches!(err, ConfigError::Unsorted { table: "animals", .. }));
}

#[test]
fn test_dangling_reward_rejected() {
    let broken = ECONOMY.replace("lur_egg_id = 1", "lur_egg_id = 9");
    let err = parse_economy(&broken).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::MissingReference { table: "player_levels", id: 9, .. }
    ));
}

#[test]
fn test_malformed_toml_rejected() {
    let err = parse_economy("[[animals]]\nanimal_id = \"one\"").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn test_partial_settings_fill_defaults() {
    let settings = SimSettings::from_toml_str(
        r#"
        variant_label = "fast_feeders"
        snapshot_interval_secs = 30

        [behavior]
        feed_order = "shuffle"
        swap = "legacy"

        [session]
        duration_max = { kind = "linear", alpha = 12.0, beta = 600.0 }
        "#,
    )
    .unwrap();

    assert_eq!(settings.variant_label, "fast_feeders");
    assert_eq!(settings.ticks_per_second, 4);
    assert_eq!(settings.behavior.feed_order, FeedOrder::Shuffle);
    assert_eq!(settings.behavior.swap, SwapPolicy::Legacy);
    assert_eq!(
        settings.session.duration_max,
        DurationFormula::Linear {
            alpha: 12.0,
            beta: 600.0
        }
    );
    assert_eq!(settings.session.sessions_per_day, 4.0);
    assert!(settings.validate().is_ok());
}

#[test]
fn test_invalid_settings_rejected() {
    let settings = SimSettings::from_toml_str("ticks_per_second = 0");
    let err = match settings {
        Ok(s) => s.validate().unwrap_err(),
        Err(e) => e,
    };
    assert!(matches!(err, ConfigError::InvalidSetting { name: "ticks_per_second", .. }));
}
