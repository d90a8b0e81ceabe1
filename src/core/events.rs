//! Event listeners
//!
//! A listener is a registration request: when queued it is attached to the
//! source's controlling player instead of being resolved.

use crate::core::EntityRef;
use crate::game::Action;
use serde::{Deserialize, Serialize};

/// Game events the engine broadcasts to registered listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameEvent {
    /// An attack has been proposed and is about to resolve
    Attack,
    /// A character took damage
    Damage,
    /// A card is about to move to the graveyard
    Death,
    /// A player drew cards
    Draw,
    TurnBegin,
    TurnEnd,
}

/// Actions to queue whenever an event fires
#[derive(Debug, Clone)]
pub struct EventListener {
    pub event: GameEvent,
    pub actions: Vec<Action>,
    /// Remove the listener after it fires once
    pub once: bool,
}

impl EventListener {
    pub fn new(event: GameEvent, actions: Vec<Action>) -> Self {
        EventListener {
            event,
            actions,
            once: false,
        }
    }

    pub fn once(event: GameEvent, actions: Vec<Action>) -> Self {
        EventListener {
            event,
            actions,
            once: true,
        }
    }
}

/// A listener together with the entity that registered it
#[derive(Debug, Clone)]
pub struct RegisteredListener {
    pub source: EntityRef,
    pub listener: EventListener,
}
