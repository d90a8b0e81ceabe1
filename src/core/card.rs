//! Card definitions and in-game card instances

use crate::core::{CardId, CardName, CardType, EntityId, GameEntity, PlayerId};
use crate::zones::Zone;
use serde::{Deserialize, Serialize};

/// Catalog id of The Coin
pub const THE_COIN: &str = "GAME_005";

/// Static definition of a card, supplied by the card catalog
///
/// Many card instances can share one definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Catalog id (e.g., "CS2_182")
    pub id: String,
    pub name: CardName,
    pub card_type: CardType,
    pub cost: u8,
    #[serde(default)]
    pub atk: i32,
    #[serde(default)]
    pub health: i32,
    /// Expires at the end of its controller's turn
    #[serde(default)]
    pub one_turn_effect: bool,
}

impl CardDefinition {
    fn new(id: &str, name: &str, card_type: CardType, cost: u8) -> Self {
        CardDefinition {
            id: id.to_string(),
            name: CardName::new(name),
            card_type,
            cost,
            atk: 0,
            health: 0,
            one_turn_effect: false,
        }
    }

    pub fn minion(id: &str, name: &str, cost: u8, atk: i32, health: i32) -> Self {
        CardDefinition {
            atk,
            health,
            ..Self::new(id, name, CardType::Minion, cost)
        }
    }

    pub fn hero(id: &str, name: &str, health: i32) -> Self {
        CardDefinition {
            health,
            ..Self::new(id, name, CardType::Hero, 0)
        }
    }

    pub fn hero_power(id: &str, name: &str, cost: u8) -> Self {
        Self::new(id, name, CardType::HeroPower, cost)
    }

    pub fn spell(id: &str, name: &str, cost: u8) -> Self {
        Self::new(id, name, CardType::Spell, cost)
    }

    pub fn enchantment(id: &str, name: &str, atk: i32, health: i32, one_turn_effect: bool) -> Self {
        CardDefinition {
            atk,
            health,
            one_turn_effect,
            ..Self::new(id, name, CardType::Enchantment, 0)
        }
    }

    /// The one-off resource card handed to the second player
    pub fn the_coin() -> Self {
        Self::spell(THE_COIN, "The Coin", 0)
    }
}

/// A hero plus the cards a player starts with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub hero: CardDefinition,
    #[serde(default)]
    pub hero_power: Option<CardDefinition>,
    pub cards: Vec<CardDefinition>,
}

impl Deck {
    pub fn new(hero: CardDefinition) -> Self {
        Deck {
            hero,
            hero_power: None,
            cards: Vec::new(),
        }
    }

    pub fn with_hero_power(mut self, hero_power: CardDefinition) -> Self {
        self.hero_power = Some(hero_power);
        self
    }

    /// Add `count` copies of a card
    pub fn with_cards(mut self, card: &CardDefinition, count: usize) -> Self {
        self.cards.extend(std::iter::repeat(card).take(count).cloned());
        self
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// A card instance during gameplay
///
/// Every non-player entity (heroes, hero powers, minions, spells,
/// enchantments) is a `Card`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,

    /// Catalog id of the definition this card was created from
    pub card_id: String,

    pub name: CardName,
    pub card_type: CardType,
    pub cost: u8,

    pub owner: PlayerId,
    pub controller: PlayerId,
    pub zone: Zone,

    pub base_atk: i32,
    pub base_health: i32,
    pub damage: i32,

    /// Derived bonuses, recomputed by every aura refresh
    pub atk_bonus: i32,
    pub health_bonus: i32,

    /// Character an enchantment is attached to
    pub attached_to: Option<CardId>,
    pub one_turn_effect: bool,

    /// Set by effects, consumed by the death sweep
    pub to_be_destroyed: bool,
    /// Set once death-processed; the card no longer reacts to events
    pub ignore_events: bool,

    pub frozen: bool,
    pub exhausted: bool,
    pub num_attacks: u32,
    pub turns_in_play: u32,

    pub attacking: bool,
    pub defending: bool,
    pub should_exit_combat: bool,
}

impl Card {
    pub fn from_definition(id: CardId, definition: &CardDefinition, owner: PlayerId) -> Self {
        Card {
            id,
            card_id: definition.id.clone(),
            name: definition.name.clone(),
            card_type: definition.card_type,
            cost: definition.cost,
            owner,
            controller: owner,
            zone: Zone::SetAside,
            base_atk: definition.atk,
            base_health: definition.health,
            damage: 0,
            atk_bonus: 0,
            health_bonus: 0,
            attached_to: None,
            one_turn_effect: definition.one_turn_effect,
            to_be_destroyed: false,
            ignore_events: false,
            frozen: false,
            exhausted: false,
            num_attacks: 0,
            turns_in_play: 0,
            attacking: false,
            defending: false,
            should_exit_combat: false,
        }
    }

    pub fn is_character(&self) -> bool {
        self.card_type.is_character()
    }

    pub fn is_minion(&self) -> bool {
        self.card_type == CardType::Minion
    }

    pub fn in_play(&self) -> bool {
        self.zone == Zone::Play
    }

    /// Current attack, including aura and enchantment bonuses
    pub fn atk(&self) -> i32 {
        (self.base_atk + self.atk_bonus).max(0)
    }

    pub fn max_health(&self) -> i32 {
        self.base_health + self.health_bonus
    }

    pub fn health(&self) -> i32 {
        self.max_health() - self.damage
    }

    pub fn is_damaged(&self) -> bool {
        self.damage > 0
    }

    /// Apply damage and flag the card for destruction at zero health
    ///
    /// Returns the amount of damage actually dealt.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        if amount <= 0 {
            return 0;
        }
        self.damage = self.damage.saturating_add(amount);
        if self.health() <= 0 {
            self.to_be_destroyed = true;
        }
        amount
    }
}

impl GameEntity<Card> for Card {
    fn id(&self) -> EntityId<Card> {
        self.id
    }

    fn name(&self) -> &str {
        self.name.as_str()
    }
}
