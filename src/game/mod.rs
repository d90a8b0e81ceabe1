//! Action resolution, turn structure and game state

/// Log a verbose message when verbose logging is compiled in
macro_rules! log_if_verbose {
    ($game:expr, $($arg:tt)*) => {
        #[cfg(feature = "verbose-logging")]
        {
            $game
                .logger
                .log_args($crate::game::VerbosityLevel::Verbose, format_args!($($arg)*));
        }
        #[cfg(not(feature = "verbose-logging"))]
        {
            let _ = &$game; // Suppress unused variable warning
        }
    };
}

pub mod actions;
pub mod auras;
pub mod combat;
pub mod deaths;
pub mod game_loop;
pub mod hand_setup;
pub mod logger;
pub mod phase;
pub mod queue;
pub mod state;
pub mod triggers;

#[cfg(test)]
pub(crate) mod test_support;

pub use actions::{Action, ActionKind, ActionResult, ScriptedEffect};
pub use combat::CombatState;
pub use logger::{GameLogger, LogEntry, LogGuard, OutputMode, VerbosityLevel};
pub use phase::{Step, TurnStructure};
pub use queue::{ActionStack, EngineStats};
pub use state::GameState;
