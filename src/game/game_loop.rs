//! Turn transitions and card draw
//!
//! `BeginTurn` and `EndTurn` are ordinary queued actions. Ending a turn
//! queues the opponent's `BeginTurn` from inside its own resolution, so a
//! full turn change finishes with a single death sweep.

use crate::core::{CardId, CardType, EntityRef, GameEvent, PlayerId};
use crate::game::{Action, ActionResult, GameState, Step, VerbosityLevel};
use crate::zones::Zone;
use crate::{GameError, Resolution};
use smallvec::SmallVec;
use std::time::{SystemTime, UNIX_EPOCH};

impl GameState {
    /// Queue the start of `player`'s turn
    pub fn begin_turn(&mut self, player: PlayerId) -> Resolution<()> {
        self.queue_actions(EntityRef::Game, [Action::BeginTurn { player }])
            .map(|_| ())
    }

    /// End the active player's turn; the opponent's turn begins immediately
    pub fn end_turn(&mut self) -> Resolution<()> {
        let player = self.current_player().ok_or(GameError::InvalidStep {
            action: "end the turn",
            step: self.turn.step,
        })?;
        self.queue_actions(EntityRef::Player(player), [Action::EndTurn { player }])
            .map(|_| ())
    }

    /// Draw `count` cards for `player`
    pub fn draw(&mut self, player: PlayerId, count: u32) -> Resolution<SmallVec<[CardId; 4]>> {
        let results = self.queue_actions(EntityRef::Player(player), [Action::Draw { player, count }])?;
        match results.into_iter().next() {
            Some(ActionResult::Drawn(cards)) => Ok(cards),
            _ => Ok(SmallVec::new()),
        }
    }

    pub(crate) fn resolve_begin_turn(&mut self, player: PlayerId) -> Resolution<ActionResult> {
        if self.turn.next_step != Step::MainReady {
            return Err(GameError::InvalidStep {
                action: "begin a turn",
                step: self.turn.step,
            }
            .into());
        }
        self.player(player)?;

        self.turn.advance();
        self.turn.advance();
        self.turn.advance();
        self.turn.turn += 1;
        self.logger.log_args(
            VerbosityLevel::Normal,
            format_args!(
                "{} begins turn {}",
                self.describe(EntityRef::Player(player)),
                self.turn.turn
            ),
        );
        self.turn.advance();
        self.turn.current_player = Some(player);

        self.minions_killed_this_turn.clear();
        for p in &mut self.players {
            p.cards_drawn_this_turn = 0;
            p.current_player = p.id == player;
        }

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(0);
        let mana_cap = self.config.max_mana;
        self.player_mut(player)?.start_turn(timestamp, mana_cap);

        let controlled: SmallVec<[CardId; 16]> = self.player(player)?.live_entities().collect();
        for id in controlled {
            let card = self.cards.get_mut(id)?;
            card.turns_in_play += 1;
            match card.card_type {
                CardType::HeroPower => card.exhausted = false,
                CardType::Hero | CardType::Minion => card.num_attacks = 0,
                _ => {}
            }
        }

        self.broadcast(GameEvent::TurnBegin)?;
        self.queue_actions(EntityRef::Player(player), [Action::Draw { player, count: 1 }])?;
        Ok(ActionResult::Resolved)
    }

    pub(crate) fn resolve_end_turn(&mut self, player: PlayerId) -> Resolution<ActionResult> {
        if self.turn.step != Step::MainAction {
            return Err(GameError::InvalidStep {
                action: "end the turn",
                step: self.turn.step,
            }
            .into());
        }
        if self.current_player() != Some(player) {
            return Err(GameError::InvalidAction(format!(
                "{} is not the active player",
                self.describe(EntityRef::Player(player))
            ))
            .into());
        }

        self.logger.log_args(
            VerbosityLevel::Normal,
            format_args!(
                "{} ends turn {}",
                self.describe(EntityRef::Player(player)),
                self.turn.turn
            ),
        );
        self.turn.advance();
        self.broadcast(GameEvent::TurnEnd)?;

        self.turn.advance();
        self.player_mut(player)?.temp_mana = 0;

        let characters: SmallVec<[CardId; 8]> = self.player(player)?.characters().collect();
        for id in characters {
            let card = self.cards.get_mut(id)?;
            if card.frozen && card.num_attacks == 0 {
                card.frozen = false;
            }
        }

        let expiring: Vec<CardId> = self
            .live_entities()
            .filter(|&id| {
                self.cards
                    .get(id)
                    .map(|card| card.one_turn_effect && card.controller == player)
                    .unwrap_or(false)
            })
            .collect();
        for &id in &expiring {
            log_if_verbose!(self, "{} expires", self.describe(EntityRef::Card(id)));
        }
        self.queue_actions(
            EntityRef::Player(player),
            expiring.into_iter().map(|target| Action::Destroy { target }),
        )?;

        self.turn.advance();
        let opponent = self.opponent_of(player)?;
        self.queue_actions(EntityRef::Game, [Action::BeginTurn { player: opponent }])?;
        Ok(ActionResult::Resolved)
    }

    /// Move cards from the top of the deck to the hand
    ///
    /// An empty deck deals increasing fatigue damage to the hero; a full hand
    /// burns the drawn card.
    pub(crate) fn resolve_draw(&mut self, player: PlayerId, count: u32) -> Resolution<ActionResult> {
        let hand_limit = self.config.max_hand_size;
        let mut drawn: SmallVec<[CardId; 4]> = SmallVec::new();

        for _ in 0..count {
            let p = self.player_mut(player)?;
            let Some(id) = p.zones.deck.draw_top() else {
                p.fatigue_counter += 1;
                let (fatigue, hero) = (p.fatigue_counter, p.hero);
                self.logger.log_args(
                    VerbosityLevel::Normal,
                    format_args!(
                        "{} takes {} fatigue damage",
                        self.describe(EntityRef::Player(player)),
                        fatigue
                    ),
                );
                if let Some(hero) = hero {
                    self.queue_actions(
                        EntityRef::Player(player),
                        [Action::Hit {
                            target: hero,
                            amount: fatigue,
                        }],
                    )?;
                }
                continue;
            };

            p.cards_drawn_this_turn += 1;
            let zone = if p.zones.hand.len() >= hand_limit {
                p.zones.graveyard.add(id);
                Zone::Graveyard
            } else {
                p.zones.hand.add(id);
                Zone::Hand
            };
            self.cards.get_mut(id)?.zone = zone;
            if zone == Zone::Graveyard {
                self.logger.log_args(
                    VerbosityLevel::Normal,
                    format_args!(
                        "{} burns {}",
                        self.describe(EntityRef::Player(player)),
                        self.describe(EntityRef::Card(id))
                    ),
                );
            } else {
                log_if_verbose!(
                    self,
                    "{} draws {}",
                    self.describe(EntityRef::Player(player)),
                    self.describe(EntityRef::Card(id))
                );
            }
            drawn.push(id);
        }

        if !drawn.is_empty() {
            self.broadcast(GameEvent::Draw)?;
        }
        Ok(ActionResult::Drawn(drawn))
    }
}
