//! Main game state structure

use crate::config::GameConfig;
use crate::core::{
    Aura, Card, CardDefinition, CardId, Deck, EntityId, EntityManager, EntityRef, EntityStore,
    Player, PlayerId,
};
use crate::error::GameOver;
use crate::game::{ActionStack, CombatState, EngineStats, GameLogger, TurnStructure};
use crate::zones::Zone;
use crate::{GameError, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use std::fmt;

/// Complete game state
///
/// The root entity: owns both players, every card, the auras, the turn
/// counters and the action recursion stack.
#[derive(Debug, Clone)]
pub struct GameState {
    /// All non-player entities
    pub cards: EntityStore<Card>,

    /// Both players, in seating order
    pub players: Vec<Player>,

    pub turn: TurnStructure,

    /// Proposed attacker/defender pair
    pub combat: CombatState,

    pub auras: Vec<Aura>,

    /// Every minion killed this game
    pub minions_killed: Vec<CardId>,
    pub minions_killed_this_turn: Vec<CardId>,

    /// Identity tracking for everything the engine instantiates
    pub manager: EntityManager,

    pub config: GameConfig,

    pub stats: EngineStats,

    pub logger: GameLogger,

    /// Source of the coin toss and deck shuffles
    pub rng: ChaCha12Rng,

    /// Actions currently resolving; owned exclusively by this game
    pub(crate) action_stack: ActionStack,

    pub(crate) outcome: Option<GameOver>,

    /// Unified entity ID generator (shared across all entity types)
    next_entity_id: u32,
}

impl GameState {
    /// Create a game between two decks; players sit in deck order
    pub fn new(config: GameConfig, decks: [Deck; 2]) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha12Rng::seed_from_u64(seed),
            None => ChaCha12Rng::from_entropy(),
        };
        let logger = GameLogger::with_verbosity(config.verbosity);

        let mut game = GameState {
            cards: EntityStore::new(),
            players: Vec::with_capacity(2),
            turn: TurnStructure::new(),
            combat: CombatState::new(),
            auras: Vec::new(),
            minions_killed: Vec::new(),
            minions_killed_this_turn: Vec::new(),
            manager: EntityManager::new(),
            config,
            stats: EngineStats::default(),
            logger,
            rng,
            action_stack: ActionStack::new(),
            outcome: None,
            next_entity_id: 0,
        };
        game.manager.new_entity(EntityRef::Game);

        for (idx, deck) in decks.into_iter().enumerate() {
            let id = game.next_id();
            let name = game.config.player_names[idx].clone();
            game.players.push(Player::new(id, name, deck));
            game.manager.new_entity(EntityRef::Player(id));
        }
        game
    }

    /// Set the RNG seed for deterministic gameplay
    pub fn seed_rng(&mut self, seed: u64) {
        self.rng = ChaCha12Rng::seed_from_u64(seed);
    }

    /// Get next entity ID (unified across all entity types)
    pub fn next_id<T>(&mut self) -> EntityId<T> {
        let id = EntityId::new(self.next_entity_id);
        self.next_entity_id += 1;
        id
    }

    /// Instantiate a card and register it with the entity manager
    pub fn card(&mut self, definition: &CardDefinition, owner: PlayerId) -> CardId {
        let id = self.next_id();
        self.cards.insert(id, Card::from_definition(id, definition, owner));
        self.manager.new_entity(EntityRef::Card(id));
        id
    }

    /// Create a card directly in a player's hand
    pub fn give(&mut self, player_id: PlayerId, definition: &CardDefinition) -> Result<CardId> {
        self.player(player_id)?;
        let id = self.card(definition, player_id);
        self.cards.get_mut(id)?.zone = Zone::Hand;
        self.player_mut(player_id)?.zones.hand.add(id);
        Ok(id)
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player> {
        self.players
            .iter()
            .find(|p| p.id == id)
            .ok_or(GameError::EntityNotFound(id.as_u32()))
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player> {
        self.players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(GameError::EntityNotFound(id.as_u32()))
    }

    pub fn opponent_of(&self, id: PlayerId) -> Result<PlayerId> {
        self.player(id)?;
        self.players
            .iter()
            .find(|p| p.id != id)
            .map(|p| p.id)
            .ok_or(GameError::EntityNotFound(id.as_u32()))
    }

    pub fn current_player(&self) -> Option<PlayerId> {
        self.turn.current_player
    }

    /// The player controlling an action source; the game itself has none
    pub fn controller_of(&self, source: EntityRef) -> Result<PlayerId> {
        match source {
            EntityRef::Game => Err(GameError::InvalidAction(
                "the game has no controller".to_string(),
            )),
            EntityRef::Player(id) => self.player(id).map(|p| p.id),
            EntityRef::Card(id) => self.cards.get(id).map(|card| card.controller),
        }
    }

    /// Human-readable name of an entity, for logs
    pub fn describe(&self, entity: EntityRef) -> String {
        match entity {
            EntityRef::Game => self.to_string(),
            EntityRef::Player(id) => self
                .player(id)
                .map(|p| p.name.to_string())
                .unwrap_or_else(|_| entity.to_string()),
            EntityRef::Card(id) => self
                .cards
                .get(id)
                .map(|card| card.name.to_string())
                .unwrap_or_else(|_| entity.to_string()),
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// How the game ended, once it has
    pub fn outcome(&self) -> Option<&GameOver> {
        self.outcome.as_ref()
    }

    /// Number of actions currently resolving
    pub fn action_depth(&self) -> usize {
        self.action_stack.depth()
    }

    // Views over both players' zones, computed on demand

    /// Minions in play on both sides
    pub fn board(&self) -> impl Iterator<Item = CardId> + '_ {
        self.players.iter().flat_map(|p| p.zones.field.iter())
    }

    pub fn hands(&self) -> impl Iterator<Item = CardId> + '_ {
        self.players.iter().flat_map(|p| p.zones.hand.iter())
    }

    pub fn decks(&self) -> impl Iterator<Item = CardId> + '_ {
        self.players.iter().flat_map(|p| p.zones.deck.iter())
    }

    /// Heroes and minions in play
    pub fn characters(&self) -> impl Iterator<Item = CardId> + '_ {
        self.players.iter().flat_map(|p| p.characters())
    }

    /// Every card in play, across both players
    pub fn live_entities(&self) -> impl Iterator<Item = CardId> + '_ {
        self.players.iter().flat_map(|p| p.live_entities())
    }

    /// Cards in play plus graveyards
    pub fn entities(&self) -> impl Iterator<Item = CardId> + '_ {
        self.live_entities()
            .chain(self.players.iter().flat_map(|p| p.zones.graveyard.iter()))
    }

    pub fn all_entities(&self) -> impl Iterator<Item = CardId> + '_ {
        self.entities().chain(self.hands()).chain(self.decks())
    }

    /// Cards anywhere in the game matching a predicate
    pub fn filter<P>(&self, predicate: P) -> Vec<CardId>
    where
        P: Fn(&Card) -> bool,
    {
        self.all_entities()
            .filter(|&id| self.cards.get(id).map(&predicate).unwrap_or(false))
            .collect()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.players.iter().map(|p| p.name.as_str()).collect();
        write!(f, "{}", names.join(" vs "))
    }
}
