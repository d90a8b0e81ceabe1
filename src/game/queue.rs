//! Action queue / resolution engine
//!
//! Actions submitted together resolve strictly one at a time, in order. Each
//! may queue further actions, which resolve recursively before it returns.
//! Auras are refreshed after every resolved action, and the death sweep runs
//! once the outermost batch has finished and the recursion stack is empty.

use crate::core::{EntityRef, EventListener};
use crate::game::{Action, ActionKind, ActionResult, GameState};
use crate::{GameError, Resolution, Result};
use serde::{Deserialize, Serialize};

/// Recursion stack of the actions currently resolving
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionStack {
    frames: Vec<ActionKind>,
}

impl ActionStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: ActionKind) {
        self.frames.push(kind);
    }

    pub fn pop(&mut self) -> Option<ActionKind> {
        self.frames.pop()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Innermost resolving action
    pub fn peek(&self) -> Option<ActionKind> {
        self.frames.last().copied()
    }
}

/// Counters describing what the engine has done so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    pub actions_resolved: u64,
    pub aura_refreshes: u64,
    /// Sweeps run after an outermost batch
    pub death_sweeps: u64,
    /// Death actions handed back to the queue by sweeps
    pub deaths_queued: u64,
    pub listeners_registered: u64,
    pub max_depth: usize,
}

impl GameState {
    /// Queue a batch of actions for resolution from `source`
    ///
    /// Returns one result per resolved action; listener registrations produce
    /// no result. A game-ending condition stops the batch immediately: later
    /// actions are not attempted and neither the aura refresh nor the death
    /// sweep runs for the aborted action.
    pub fn queue_actions<I>(&mut self, source: EntityRef, actions: I) -> Resolution<Vec<ActionResult>>
    where
        I: IntoIterator<Item = Action>,
    {
        if self.is_over() {
            return Err(GameError::GameAlreadyOver.into());
        }
        self.manager.ensure_tracked(source)?;

        let mut results = Vec::new();
        for action in actions {
            match action {
                Action::EventListener(listener) => self.register_listener(source, listener)?,
                action => {
                    log_if_verbose!(
                        self,
                        "[depth {}] {:?} from {}",
                        self.action_stack.depth(),
                        action,
                        source
                    );
                    self.action_stack.push(action.kind());
                    self.stats.max_depth = self.stats.max_depth.max(self.action_stack.depth());
                    let outcome = self.trigger(source, action);
                    self.action_stack.pop();
                    results.push(outcome?);
                    self.stats.actions_resolved += 1;
                    self.refresh_auras();
                }
            }
        }

        if self.action_stack.is_empty() {
            self.stats.death_sweeps += 1;
            self.resolve_deaths()?;
        }

        Ok(results)
    }

    /// Attach a listener to the source's controlling player
    fn register_listener(&mut self, source: EntityRef, listener: EventListener) -> Result<()> {
        let controller = self.controller_of(source)?;
        log_if_verbose!(
            self,
            "Registering {:?} listener from {} on {}",
            listener.event,
            source,
            self.describe(EntityRef::Player(controller))
        );
        self.player_mut(controller)?.register_listener(source, listener);
        self.stats.listeners_registered += 1;
        Ok(())
    }

    /// Resolve a single action
    fn trigger(&mut self, source: EntityRef, action: Action) -> Resolution<ActionResult> {
        match action {
            Action::Attack { attacker, defender } => self.resolve_attack(attacker, defender),
            Action::BeginTurn { player } => self.resolve_begin_turn(player),
            Action::EndTurn { player } => self.resolve_end_turn(player),
            Action::Death { card } => self.resolve_death(card),
            // Sweeps only as the outermost frame; nested requests wait for the
            // empty-stack check of the enclosing batch
            Action::Deaths if self.action_stack.depth() == 1 => {
                self.resolve_deaths().map(|_| ActionResult::Resolved)
            }
            Action::Deaths => {
                log_if_verbose!(self, "Deferring nested death sweep");
                Ok(ActionResult::Resolved)
            }
            Action::EventListener(_) => Err(GameError::InvalidAction(
                "event listeners are registered, not resolved".to_string(),
            )
            .into()),
            Action::Hit { target, amount } => self.resolve_hit(source, target, amount),
            Action::Destroy { target } => self.resolve_destroy(target),
            Action::Draw { player, count } => self.resolve_draw(player, count),
            Action::Summon { player, card } => self.resolve_summon(player, card),
            Action::Buff {
                target,
                atk,
                health,
                one_turn,
            } => self.resolve_buff(source, target, atk, health, one_turn),
            Action::Script(effect) => effect.resolve(self, source),
        }
    }
}
