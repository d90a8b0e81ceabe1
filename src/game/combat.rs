//! Combat resolution
//!
//! An attack is proposed, announced to listeners, then resolved from the
//! proposal. Listeners may redirect the proposal or interrupt the attack
//! before any damage is dealt.

use crate::core::{CardId, EntityRef, GameEvent};
use crate::game::{Action, ActionResult, GameState};
use crate::{GameError, Resolution};
use serde::{Deserialize, Serialize};

/// The attacker/defender pair awaiting resolution
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatState {
    pub proposed_attacker: Option<CardId>,
    pub proposed_defender: Option<CardId>,
}

impl CombatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn propose(&mut self, attacker: CardId, defender: CardId) {
        self.proposed_attacker = Some(attacker);
        self.proposed_defender = Some(defender);
    }

    /// Clear the proposal, returning it if both sides were set
    pub fn take_proposal(&mut self) -> Option<(CardId, CardId)> {
        let attacker = self.proposed_attacker.take();
        let defender = self.proposed_defender.take();
        attacker.zip(defender)
    }

    pub fn has_proposal(&self) -> bool {
        self.proposed_attacker.is_some() && self.proposed_defender.is_some()
    }
}

impl GameState {
    /// Queue an attack between two characters
    pub fn attack(&mut self, attacker: CardId, defender: CardId) -> Resolution<ActionResult> {
        let source = EntityRef::Card(attacker);
        let mut results = self.queue_actions(source, [Action::Attack { attacker, defender }])?;
        Ok(results.pop().unwrap_or(ActionResult::Resolved))
    }

    pub(crate) fn resolve_attack(
        &mut self,
        attacker: CardId,
        defender: CardId,
    ) -> Resolution<ActionResult> {
        for id in [attacker, defender] {
            let card = self.cards.get(id)?;
            if !card.is_character() || !card.in_play() {
                return Err(GameError::InvalidAction(format!(
                    "{} is not a character in play",
                    card.name
                ))
                .into());
            }
        }
        let card = self.cards.get(attacker)?;
        if card.frozen {
            return Err(GameError::InvalidAction(format!("{} is frozen", card.name)).into());
        }

        self.logger.log_args(
            crate::game::VerbosityLevel::Normal,
            format_args!(
                "{} attacks {}",
                self.describe(EntityRef::Card(attacker)),
                self.describe(EntityRef::Card(defender))
            ),
        );
        self.combat.propose(attacker, defender);
        self.cards.get_mut(attacker)?.attacking = true;
        self.cards.get_mut(defender)?.defending = true;

        self.broadcast(GameEvent::Attack)?;
        let result = self.resolve_combat()?;

        // The original target may have been swapped out by a listener
        self.cards.get_mut(defender)?.defending = false;
        Ok(result)
    }

    /// Exchange damage between the proposed attacker and defender
    pub(crate) fn resolve_combat(&mut self) -> Resolution<ActionResult> {
        let (attacker, defender) = self
            .combat
            .take_proposal()
            .ok_or(GameError::NoCombatProposal)?;

        let card = self.cards.get(attacker)?;
        if card.should_exit_combat {
            self.logger.normal("Attack has been interrupted.");
            let card = self.cards.get_mut(attacker)?;
            card.should_exit_combat = false;
            card.attacking = false;
            self.cards.get_mut(defender)?.defending = false;
            return Ok(ActionResult::Interrupted);
        }

        // Retaliation uses the defender's attack from before the exchange
        let def_atk = self.cards.get(defender)?.atk();

        let source = EntityRef::Card(attacker);
        let amount = self.cards.get(attacker)?.atk();
        self.queue_actions(source, [Action::Hit { target: defender, amount }])?;
        if def_atk != 0 {
            let source = EntityRef::Card(defender);
            self.queue_actions(source, [Action::Hit { target: attacker, amount: def_atk }])?;
        }

        let card = self.cards.get_mut(attacker)?;
        card.attacking = false;
        card.num_attacks += 1;
        self.cards.get_mut(defender)?.defending = false;
        Ok(ActionResult::Resolved)
    }

    /// Deal damage to a character
    pub(crate) fn resolve_hit(
        &mut self,
        source: EntityRef,
        target: CardId,
        amount: i32,
    ) -> Resolution<ActionResult> {
        let card = self.cards.get_mut(target)?;
        if !card.is_character() {
            return Err(GameError::InvalidAction(format!("{} cannot take damage", card.name)).into());
        }
        let dealt = card.take_damage(amount);
        if dealt > 0 {
            log_if_verbose!(
                self,
                "{} deals {} damage to {}",
                self.describe(source),
                dealt,
                self.describe(EntityRef::Card(target))
            );
            self.broadcast(GameEvent::Damage)?;
        }
        Ok(ActionResult::Damage(dealt))
    }

    /// Flag a card for destruction; enchantments leave play at once
    pub(crate) fn resolve_destroy(&mut self, target: CardId) -> Resolution<ActionResult> {
        let card = self.cards.get_mut(target)?;
        if card.attached_to.is_some() {
            self.detach_enchantment(target)?;
        } else {
            card.to_be_destroyed = true;
        }
        Ok(ActionResult::Resolved)
    }
}
