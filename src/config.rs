//! Game configuration

use crate::game::VerbosityLevel;
use crate::{GameError, Result};
use serde::{Deserialize, Serialize};

/// Rules constants and engine settings for one game
///
/// Loadable from JSON; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player_names: [String; 2],

    /// RNG seed for the coin toss and shuffles (None = from entropy)
    pub seed: Option<u64>,

    /// Opening hand of the player who wins the coin toss
    pub first_player_cards: u32,

    /// Opening hand of the other player, before The Coin
    pub second_player_cards: u32,

    pub max_mana: u8,
    pub max_hand_size: usize,
    pub max_minions_on_field: usize,

    pub verbosity: VerbosityLevel,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            player_names: ["Player1".to_string(), "Player2".to_string()],
            seed: None,
            first_player_cards: 3,
            second_player_cards: 4,
            max_mana: 10,
            max_hand_size: 10,
            max_minions_on_field: 8,
            verbosity: VerbosityLevel::default(),
        }
    }
}

impl GameConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_verbosity(mut self, verbosity: VerbosityLevel) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_player_names(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.player_names = [first.into(), second.into()];
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig =
            serde_json::from_str(json).map_err(|e| GameError::SerializationError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| GameError::SerializationError(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        // The second player also receives The Coin
        let largest_hand = self
            .first_player_cards
            .max(self.second_player_cards.saturating_add(1)) as usize;
        if largest_hand > self.max_hand_size {
            return Err(GameError::Config(format!(
                "opening hand of {largest_hand} cards exceeds the hand limit of {}",
                self.max_hand_size
            )));
        }
        if self.max_minions_on_field == 0 {
            return Err(GameError::Config("the board must hold at least one minion".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.first_player_cards, 3);
        assert_eq!(config.second_player_cards, 4);
        assert_eq!(config.max_minions_on_field, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_oversized_opening_hand_rejected() {
        let json = format!(r#"{{ "second_player_cards": {} }}"#, u32::MAX);
        assert!(matches!(
            GameConfig::from_json(&json),
            Err(GameError::Config(_))
        ));
    }

    #[test]
    fn test_partial_json() {
        let config = GameConfig::from_json(r#"{ "seed": 7, "verbosity": "Silent" }"#).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.verbosity, VerbosityLevel::Silent);
        assert_eq!(config.max_mana, 10);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = GameConfig::default()
            .with_seed(42)
            .with_player_names("Alice", "Bob");
        let json = config.to_json().unwrap();
        assert_eq!(GameConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_oversized_opening_hand() {
        let json = r#"{ "second_player_cards": 10 }"#;
        assert!(matches!(GameConfig::from_json(json), Err(GameError::Config(_))));
        assert!(matches!(
            GameConfig::from_json("not json"),
            Err(GameError::SerializationError(_))
        ));
    }
}
