//! Hearthforge - rules-resolution core for a Hearthstone-style card game
//!
//! Takes high-level game actions (attacks, turn transitions, death sweeps) and
//! resolves them in a strict order. Auras are refreshed after every action and
//! a death sweep runs once the outermost action has completed.

pub mod config;
pub mod core;
pub mod error;
pub mod game;
pub mod zones;

pub use config::GameConfig;
pub use error::{GameError, GameOver, Interrupt, Resolution, Result};
