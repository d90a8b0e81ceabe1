//! Fixtures shared by the unit tests

use crate::config::GameConfig;
use crate::core::{CardDefinition, CardId, Deck, PlayerId};
use crate::game::{GameState, VerbosityLevel};

pub fn yeti() -> CardDefinition {
    CardDefinition::minion("CS2_182", "Chillwind Yeti", 4, 4, 5)
}

/// Two mirror decks of `count` yetis each
pub fn decks(count: usize) -> [Deck; 2] {
    let deck = |hero: CardDefinition| {
        Deck::new(hero)
            .with_hero_power(CardDefinition::hero_power("CS2_102", "Armor Up!", 2))
            .with_cards(&yeti(), count)
    };
    [
        deck(CardDefinition::hero("HERO_01", "Garrosh Hellscream", 30)),
        deck(CardDefinition::hero("HERO_08", "Jaina Proudmoore", 30)),
    ]
}

pub fn quiet_config() -> GameConfig {
    GameConfig::default()
        .with_seed(7)
        .with_player_names("Alice", "Bob")
        .with_verbosity(VerbosityLevel::Silent)
}

/// A game past the mulligan, in the first player's action step
pub fn started_game() -> GameState {
    let mut game = GameState::new(quiet_config(), decks(10));
    game.start().unwrap();
    game
}

/// Put a fresh vanilla minion into play for `player`
pub fn summon_minion(game: &mut GameState, player: PlayerId, atk: i32, health: i32) -> CardId {
    let definition = CardDefinition::minion("TEST_MINION", "Test Minion", 1, atk, health);
    game.summon(player, &definition)
        .unwrap()
        .expect("board is full")
}
