//! Error types for the rules engine
//!
//! Two kinds of failure travel up the resolution chain:
//! - [`GameError`]: a contract violation by the caller or the effect catalog
//! - [`GameOver`]: the normal way a finished game unwinds every pending action
//!
//! Both are wrapped in [`Interrupt`] so resolution code can use `?` uniformly.

use crate::core::PlayerId;
use crate::game::Step;
use smallvec::SmallVec;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Entity not found: {0}")]
    EntityNotFound(u32),

    #[error("Entity {0} is not tracked by the entity manager")]
    UntrackedEntity(String),

    #[error("Invalid game action: {0}")]
    InvalidAction(String),

    #[error("No attacker/defender pair has been proposed")]
    NoCombatProposal,

    #[error("Cannot {action} during step {step:?}")]
    InvalidStep { action: &'static str, step: Step },

    #[error("The game has already ended")]
    GameAlreadyOver,

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Terminal signal raised when the game ends
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("The game has ended with {} loser(s)", .losers.len())]
pub struct GameOver {
    /// Players that lost the game
    pub losers: SmallVec<[PlayerId; 2]>,
}

impl GameOver {
    pub fn new(losers: &[PlayerId]) -> Self {
        GameOver {
            losers: losers.iter().copied().collect(),
        }
    }

    pub fn is_loser(&self, player: PlayerId) -> bool {
        self.losers.contains(&player)
    }
}

/// Why a resolution chain stopped before completing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Interrupt {
    #[error(transparent)]
    GameOver(#[from] GameOver),

    #[error(transparent)]
    Rules(#[from] GameError),
}

impl Interrupt {
    pub fn is_game_over(&self) -> bool {
        matches!(self, Interrupt::GameOver(_))
    }

    pub fn game_over(&self) -> Option<&GameOver> {
        match self {
            Interrupt::GameOver(over) => Some(over),
            Interrupt::Rules(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GameError>;

/// Result of any operation that resolves game actions
pub type Resolution<T> = std::result::Result<T, Interrupt>;
