//! Core game types and entities

pub mod aura;
pub mod card;
pub mod entity;
pub mod events;
pub mod player;
pub mod types;

pub use aura::{Aura, AuraScope};
pub use card::{Card, CardDefinition, Deck, THE_COIN};
pub use entity::{EntityId, EntityManager, EntityRef, EntityStore, GameEntity};
pub use events::{EventListener, GameEvent, RegisteredListener};
pub use player::Player;
pub use types::{CardName, CardType, PlayState, PlayerName};

pub type CardId = EntityId<Card>;
pub type PlayerId = EntityId<Player>;
