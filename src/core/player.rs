//! Player representation

use crate::core::{
    CardId, Deck, EntityId, EntityRef, EventListener, GameEntity, PlayState, PlayerId, PlayerName,
    RegisteredListener,
};
use crate::zones::{PlayerZones, Zone};
use serde::{Deserialize, Serialize};

/// Represents one side of the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Unique ID for this player
    pub id: PlayerId,

    /// Player name
    pub name: PlayerName,

    pub playstate: PlayState,

    /// Players sit in the Play zone once the game starts
    pub zone: Zone,

    /// Deck list the player brought to the game
    pub original_deck: Deck,

    pub hero: Option<CardId>,
    pub hero_power: Option<CardId>,

    pub zones: PlayerZones,

    /// Won the coin toss
    pub first_player: bool,

    /// Is this the active player?
    pub current_player: bool,

    pub max_mana: u8,
    pub used_mana: u8,
    pub temp_mana: u8,
    pub overloaded: u8,
    pub combo: bool,

    /// Unix timestamp (seconds) of the start of this player's turn
    pub turn_start: u64,

    /// Damage the next empty-deck draw will deal
    pub fatigue_counter: i32,

    pub cards_drawn_this_turn: u32,
    pub cards_played_this_turn: u32,
    pub minions_played_this_turn: u32,
    pub minions_killed_this_turn: u32,

    /// Registered event listeners, in registration order
    #[serde(skip)]
    events: Vec<RegisteredListener>,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<PlayerName>, deck: Deck) -> Self {
        Player {
            id,
            name: name.into(),
            playstate: PlayState::Playing,
            zone: Zone::SetAside,
            original_deck: deck,
            hero: None,
            hero_power: None,
            zones: PlayerZones::new(id),
            first_player: false,
            current_player: false,
            max_mana: 0,
            used_mana: 0,
            temp_mana: 0,
            overloaded: 0,
            combo: false,
            turn_start: 0,
            fatigue_counter: 0,
            cards_drawn_this_turn: 0,
            cards_played_this_turn: 0,
            minions_played_this_turn: 0,
            minions_killed_this_turn: 0,
            events: Vec::new(),
        }
    }

    /// Mana available to spend this turn
    pub fn mana(&self) -> u8 {
        self.max_mana
            .saturating_add(self.temp_mana)
            .saturating_sub(self.used_mana)
    }

    /// Reset per-turn state for the player entering their turn
    pub fn start_turn(&mut self, timestamp: u64, mana_cap: u8) {
        self.turn_start = timestamp;
        self.cards_played_this_turn = 0;
        self.minions_played_this_turn = 0;
        self.minions_killed_this_turn = 0;
        self.combo = false;
        self.max_mana = self.max_mana.saturating_add(1).min(mana_cap);
        self.used_mana = self.overloaded;
        self.overloaded = 0;
    }

    /// Hero and minions in play
    pub fn characters(&self) -> impl Iterator<Item = CardId> + '_ {
        self.hero.into_iter().chain(self.zones.field.iter())
    }

    /// Every card this player has in play
    pub fn live_entities(&self) -> impl Iterator<Item = CardId> + '_ {
        self.characters()
            .chain(self.hero_power)
            .chain(self.zones.enchantments.iter())
    }

    pub fn register_listener(&mut self, source: EntityRef, listener: EventListener) {
        self.events.push(RegisteredListener { source, listener });
    }

    pub fn listeners(&self) -> &[RegisteredListener] {
        &self.events
    }

    pub(crate) fn listeners_mut(&mut self) -> &mut Vec<RegisteredListener> {
        &mut self.events
    }
}

impl GameEntity<Player> for Player {
    fn id(&self) -> EntityId<Player> {
        self.id
    }

    fn name(&self) -> &str {
        self.name.as_str()
    }
}
