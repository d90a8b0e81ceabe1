//! Death processing (state-based sweep) and game end

use crate::core::{CardId, CardType, EntityRef, GameEvent, PlayState, PlayerId};
use crate::error::GameOver;
use crate::game::{Action, ActionResult, GameState};
use crate::zones::Zone;
use crate::{GameError, Interrupt, Resolution};
use smallvec::SmallVec;

impl GameState {
    /// Queue a death sweep
    pub fn process_deaths(&mut self) -> Resolution<()> {
        self.queue_actions(EntityRef::Game, [Action::Deaths])
            .map(|_| ())
    }

    /// Condemn every live entity flagged for destruction
    ///
    /// Heroes take priority: if any hero died, the game ends and none of the
    /// collected deaths are queued.
    pub(crate) fn resolve_deaths(&mut self) -> Resolution<()> {
        let condemned: Vec<CardId> = self
            .live_entities()
            .filter(|&id| {
                self.cards
                    .get(id)
                    .map(|card| card.to_be_destroyed && !card.ignore_events)
                    .unwrap_or(false)
            })
            .collect();

        let mut actions = Vec::with_capacity(condemned.len());
        let mut losers: SmallVec<[PlayerId; 2]> = SmallVec::new();
        for id in condemned {
            let card = self.cards.get_mut(id)?;
            card.ignore_events = true;
            let (card_type, controller) = (card.card_type, card.controller);
            actions.push(Action::Death { card: id });

            match card_type {
                CardType::Minion => {
                    self.minions_killed.push(id);
                    self.minions_killed_this_turn.push(id);
                    self.player_mut(controller)?.minions_killed_this_turn += 1;
                }
                CardType::Hero => {
                    self.player_mut(controller)?.playstate = PlayState::Losing;
                    if !losers.contains(&controller) {
                        losers.push(controller);
                    }
                }
                _ => {}
            }
        }

        if !losers.is_empty() {
            return Err(self.end(&losers));
        }
        if !actions.is_empty() {
            self.stats.deaths_queued += actions.len() as u64;
            self.queue_actions(EntityRef::Game, actions)?;
        }
        Ok(())
    }

    /// Move a condemned card to its owner's graveyard
    pub(crate) fn resolve_death(&mut self, id: CardId) -> Resolution<ActionResult> {
        let card = self.cards.get(id)?;
        if !card.in_play() {
            return Err(GameError::InvalidAction(format!(
                "{} cannot die outside of play",
                card.name
            ))
            .into());
        }
        self.broadcast(GameEvent::Death)?;

        let card = self.cards.get(id)?;
        let (owner, controller) = (card.owner, card.controller);
        self.logger
            .log_args(crate::game::VerbosityLevel::Normal, format_args!("{} dies", card.name));

        let player = self.player_mut(controller)?;
        player.zones.remove_anywhere(id);
        if player.hero == Some(id) {
            player.hero = None;
        }
        if player.hero_power == Some(id) {
            player.hero_power = None;
        }
        self.player_mut(owner)?.zones.graveyard.add(id);

        for enchantment in self.enchantments_on(id) {
            self.detach_enchantment(enchantment)?;
        }

        let card = self.cards.get_mut(id)?;
        card.zone = Zone::Graveyard;
        card.to_be_destroyed = false;
        card.damage = 0;
        card.atk_bonus = 0;
        card.health_bonus = 0;
        card.frozen = false;
        card.attacking = false;
        card.defending = false;
        Ok(ActionResult::Resolved)
    }

    /// End the game with the given losers; every other player wins
    ///
    /// Returns the interrupt that unwinds the resolution in flight.
    pub fn end(&mut self, losers: &[PlayerId]) -> Interrupt {
        for player in &mut self.players {
            player.playstate = if losers.contains(&player.id) {
                PlayState::Lost
            } else {
                PlayState::Won
            };
        }
        self.turn.finish();

        let over = GameOver::new(losers);
        self.outcome = Some(over.clone());
        let names: Vec<String> = losers
            .iter()
            .map(|&id| self.describe(EntityRef::Player(id)))
            .collect();
        self.logger.log_args(
            crate::game::VerbosityLevel::Minimal,
            format_args!("Game over, lost: {}", names.join(", ")),
        );
        Interrupt::GameOver(over)
    }
}
