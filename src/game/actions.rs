//! Game actions
//!
//! An [`Action`] is a unit of queued rules work. The resolution engine matches
//! on the variant; each variant carries only the data its resolution needs.

use crate::core::{CardId, EntityRef, EventListener, PlayerId};
use crate::game::GameState;
use crate::Resolution;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::rc::Rc;

/// Effect logic supplied by the card catalog
///
/// Implementations may call back into [`GameState::queue_actions`]; nested
/// actions resolve immediately, in order, before `resolve` returns.
pub trait ScriptedEffect {
    fn name(&self) -> &str;

    fn resolve(&self, game: &mut GameState, source: EntityRef) -> Resolution<ActionResult>;
}

/// Adapter turning a closure into a [`ScriptedEffect`]
struct FnEffect<F> {
    name: &'static str,
    f: F,
}

impl<F> ScriptedEffect for FnEffect<F>
where
    F: Fn(&mut GameState, EntityRef) -> Resolution<ActionResult>,
{
    fn name(&self) -> &str {
        self.name
    }

    fn resolve(&self, game: &mut GameState, source: EntityRef) -> Resolution<ActionResult> {
        (self.f)(game, source)
    }
}

#[derive(Clone)]
pub enum Action {
    /// Resolve combat between two characters
    Attack { attacker: CardId, defender: CardId },

    /// Enter the given player's turn
    BeginTurn { player: PlayerId },

    /// End the given player's turn and begin the opponent's
    EndTurn { player: PlayerId },

    /// Move a condemned card to the graveyard
    Death { card: CardId },

    /// Run the death sweep
    Deaths,

    /// Register a listener on the source's controller (never resolved)
    EventListener(EventListener),

    /// Deal damage to a character
    Hit { target: CardId, amount: i32 },

    /// Condemn a character, or expire an enchantment
    Destroy { target: CardId },

    Draw { player: PlayerId, count: u32 },

    /// Put a card into play under the player's control
    Summon { player: PlayerId, card: CardId },

    /// Attach an enchantment to a character
    Buff {
        target: CardId,
        atk: i32,
        health: i32,
        one_turn: bool,
    },

    /// Catalog-defined effect
    Script(Rc<dyn ScriptedEffect>),
}

impl Action {
    /// Wrap a closure as a scripted action
    pub fn script<F>(name: &'static str, f: F) -> Self
    where
        F: Fn(&mut GameState, EntityRef) -> Resolution<ActionResult> + 'static,
    {
        Action::Script(Rc::new(FnEffect { name, f }))
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Attack { .. } => ActionKind::Attack,
            Action::BeginTurn { .. } => ActionKind::BeginTurn,
            Action::EndTurn { .. } => ActionKind::EndTurn,
            Action::Death { .. } => ActionKind::Death,
            Action::Deaths => ActionKind::Deaths,
            Action::EventListener(_) => ActionKind::EventListener,
            Action::Hit { .. } => ActionKind::Hit,
            Action::Destroy { .. } => ActionKind::Destroy,
            Action::Draw { .. } => ActionKind::Draw,
            Action::Summon { .. } => ActionKind::Summon,
            Action::Buff { .. } => ActionKind::Buff,
            Action::Script(_) => ActionKind::Script,
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Attack { attacker, defender } => {
                write!(f, "Attack({attacker} -> {defender})")
            }
            Action::BeginTurn { player } => write!(f, "BeginTurn({player})"),
            Action::EndTurn { player } => write!(f, "EndTurn({player})"),
            Action::Death { card } => write!(f, "Death({card})"),
            Action::Deaths => write!(f, "Deaths"),
            Action::EventListener(listener) => write!(f, "EventListener({:?})", listener.event),
            Action::Hit { target, amount } => write!(f, "Hit({target}, {amount})"),
            Action::Destroy { target } => write!(f, "Destroy({target})"),
            Action::Draw { player, count } => write!(f, "Draw({player}, {count})"),
            Action::Summon { player, card } => write!(f, "Summon({player}, {card})"),
            Action::Buff {
                target,
                atk,
                health,
                one_turn,
            } => write!(f, "Buff({target}, +{atk}/+{health}, one_turn={one_turn})"),
            Action::Script(effect) => write!(f, "Script({})", effect.name()),
        }
    }
}

/// Variant tag, kept on the recursion stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Attack,
    BeginTurn,
    EndTurn,
    Death,
    Deaths,
    EventListener,
    Hit,
    Destroy,
    Draw,
    Summon,
    Buff,
    Script,
}

/// Value produced by resolving one action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    Resolved,
    /// Attack aborted before damage
    Interrupted,
    /// Damage actually dealt
    Damage(i32),
    /// Cards that reached the hand or were burned
    Drawn(SmallVec<[CardId; 4]>),
    Summoned(CardId),
    /// The enchantment created by a buff
    Enchanted(CardId),
}
