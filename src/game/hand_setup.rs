//! Game setup: coin toss, heroes, decks and opening hands
//!
//! Also hosts summoning, the one way a card enters play.

use crate::core::{CardDefinition, CardId, CardType, EntityRef, PlayState, PlayerId};
use crate::game::{Action, ActionResult, GameState, Step, VerbosityLevel};
use crate::zones::Zone;
use crate::{GameError, Resolution};
use rand::Rng;

impl GameState {
    /// Pick the first player with a fair coin
    ///
    /// Returns `(winner, loser)`.
    pub fn toss_coin(&mut self) -> (PlayerId, PlayerId) {
        let idx = self.rng.gen_range(0..2);
        let winner = self.players[idx].id;
        let loser = self.players[1 - idx].id;
        self.logger.log_args(
            VerbosityLevel::Normal,
            format_args!("Tossing the coin... {} wins!", self.describe(winner.into())),
        );
        (winner, loser)
    }

    /// Set up the game and play up to the first player's action step
    pub fn start(&mut self) -> Resolution<()> {
        self.setup_game()?;
        self.begin_mulligan()
    }

    /// Toss the coin, put heroes in play, shuffle decks and draw opening hands
    pub fn setup_game(&mut self) -> Resolution<()> {
        let already_set_up = self.players.iter().any(|p| p.hero.is_some());
        if self.turn.step != Step::BeginFirst || already_set_up {
            return Err(GameError::InvalidStep {
                action: "set up the game",
                step: self.turn.step,
            }
            .into());
        }

        self.logger
            .log_args(VerbosityLevel::Normal, format_args!("Starting game: {}", self));
        let (first, second) = self.toss_coin();
        for idx in 0..self.players.len() {
            let id = self.players[idx].id;
            let deck = self.players[idx].original_deck.clone();
            self.players[idx].zone = Zone::Play;
            self.players[idx].first_player = id == first;

            let hero = self.card(&deck.hero, id);
            let mut summons = vec![Action::Summon {
                player: id,
                card: hero,
            }];
            if let Some(power) = &deck.hero_power {
                let power = self.card(power, id);
                summons.push(Action::Summon {
                    player: id,
                    card: power,
                });
            }
            self.queue_actions(EntityRef::Player(id), summons)?;

            for definition in &deck.cards {
                let card = self.card(definition, id);
                self.cards.get_mut(card)?.zone = Zone::Deck;
                self.players[idx].zones.deck.add(card);
            }
            self.players[idx].zones.deck.shuffle(&mut self.rng);
            self.players[idx].playstate = PlayState::Playing;
        }

        let (first_cards, second_cards) = (
            self.config.first_player_cards,
            self.config.second_player_cards,
        );
        self.queue_actions(
            EntityRef::Game,
            [
                Action::Draw {
                    player: first,
                    count: first_cards,
                },
                Action::Draw {
                    player: second,
                    count: second_cards,
                },
            ],
        )?;
        Ok(())
    }

    /// Grant The Coin to the second player and begin the first turn
    pub fn begin_mulligan(&mut self) -> Resolution<()> {
        if self.turn.next_step != Step::BeginMulligan {
            return Err(GameError::InvalidStep {
                action: "begin the mulligan",
                step: self.turn.step,
            }
            .into());
        }
        self.turn.advance();
        self.logger.normal("Entering mulligan phase");

        let first = self
            .players
            .iter()
            .find(|p| p.first_player)
            .map(|p| p.id)
            .ok_or_else(|| GameError::InvalidAction("no player won the coin toss".to_string()))?;
        let second = self.opponent_of(first)?;

        self.give(second, &CardDefinition::the_coin())?;
        self.logger.log_args(
            VerbosityLevel::Normal,
            format_args!("{} gets The Coin", self.describe(second.into())),
        );

        self.begin_turn(first)
    }

    /// Create a card from its definition and put it into play
    ///
    /// Returns `None` when the board was full.
    pub fn summon(
        &mut self,
        player: PlayerId,
        definition: &CardDefinition,
    ) -> Resolution<Option<CardId>> {
        let card = self.card(definition, player);
        let results = self.queue_actions(EntityRef::Player(player), [Action::Summon { player, card }])?;
        Ok(match results.first() {
            Some(ActionResult::Summoned(id)) => Some(*id),
            _ => None,
        })
    }

    pub(crate) fn resolve_summon(&mut self, player: PlayerId, id: CardId) -> Resolution<ActionResult> {
        let card_type = self.cards.get(id)?.card_type;
        if !matches!(
            card_type,
            CardType::Hero | CardType::HeroPower | CardType::Minion
        ) {
            return Err(GameError::InvalidAction(format!(
                "{} cannot be summoned",
                self.describe(id.into())
            ))
            .into());
        }
        if card_type == CardType::Minion
            && self.player(player)?.zones.field.len() >= self.config.max_minions_on_field
        {
            self.logger.log_args(
                VerbosityLevel::Normal,
                format_args!(
                    "{} cannot be summoned, the board is full",
                    self.describe(id.into())
                ),
            );
            return Ok(ActionResult::Resolved);
        }

        let previous = self.cards.get(id)?.controller;
        self.player_mut(previous)?.zones.remove_anywhere(id);

        let p = self.player_mut(player)?;
        let replaced = match card_type {
            CardType::Hero => p.hero.replace(id),
            CardType::HeroPower => p.hero_power.replace(id),
            _ => {
                p.zones.field.add(id);
                if p.current_player {
                    p.minions_played_this_turn += 1;
                }
                None
            }
        };
        if let Some(old) = replaced {
            self.cards.get_mut(old)?.zone = Zone::Removed;
        }

        let card = self.cards.get_mut(id)?;
        card.controller = player;
        card.zone = Zone::Play;
        card.turns_in_play = 0;
        log_if_verbose!(
            self,
            "{} summons {}",
            self.describe(player.into()),
            self.describe(id.into())
        );
        Ok(ActionResult::Summoned(id))
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{CardDefinition, PlayState, THE_COIN};
    use crate::game::test_support::{decks, quiet_config, summon_minion, yeti};
    use crate::game::{GameState, Step};
    use crate::zones::Zone;

    fn holding(game: &GameState, first: bool) -> Vec<String> {
        let player = game.players.iter().find(|p| p.first_player == first).unwrap();
        player
            .zones
            .hand
            .iter()
            .map(|id| game.cards.get(id).unwrap().card_id.clone())
            .collect()
    }

    #[test]
    fn test_opening_hands() {
        let mut game = GameState::new(quiet_config(), decks(10));
        game.setup_game().unwrap();

        assert_eq!(holding(&game, true).len(), 3);
        assert_eq!(holding(&game, false).len(), 4);
        assert_eq!(game.turn.step, Step::BeginFirst);
        assert_eq!(game.current_player(), None);

        game.begin_mulligan().unwrap();
        let second = holding(&game, false);
        assert_eq!(second.len(), 5);
        assert_eq!(second.iter().filter(|id| id.as_str() == THE_COIN).count(), 1);
        // First turn draw
        assert_eq!(holding(&game, true).len(), 4);
        assert_eq!(game.turn.turn, 1);
        assert_eq!(game.turn.step, Step::MainAction);
    }

    #[test]
    fn test_setup_puts_heroes_in_play() {
        let mut game = GameState::new(quiet_config(), decks(10));
        game.start().unwrap();

        for player in &game.players {
            assert_eq!(player.zone, Zone::Play);
            assert_eq!(player.playstate, PlayState::Playing);
            let hero = game.cards.get(player.hero.unwrap()).unwrap();
            assert_eq!(hero.zone, Zone::Play);
            assert_eq!(hero.health(), 30);
            assert!(player.hero_power.is_some());
            assert_eq!(player.zones.deck.len() + player.zones.hand.len(), 10 + usize::from(!player.first_player));
        }
        assert_eq!(game.players.iter().filter(|p| p.first_player).count(), 1);
        let first = game.players.iter().find(|p| p.first_player).unwrap().id;
        assert_eq!(game.current_player(), Some(first));
    }

    #[test]
    fn test_setup_twice_is_rejected() {
        let mut game = GameState::new(quiet_config(), decks(10));
        game.start().unwrap();
        assert!(game.setup_game().is_err());
        assert!(game.begin_mulligan().is_err());
    }

    #[test]
    fn test_coin_toss_is_seeded() {
        let winners: Vec<_> = (0..2)
            .map(|_| GameState::new(quiet_config(), decks(0)).toss_coin())
            .collect();
        assert_eq!(winners[0], winners[1]);
    }

    #[test]
    fn test_board_limit() {
        let mut game = GameState::new(quiet_config(), decks(10));
        game.start().unwrap();
        let first = game.current_player().unwrap();
        for _ in 0..game.config.max_minions_on_field {
            summon_minion(&mut game, first, 1, 1);
        }

        let overflow = game.summon(first, &yeti()).unwrap();
        assert_eq!(overflow, None);
        assert_eq!(
            game.player(first).unwrap().zones.field.len(),
            game.config.max_minions_on_field
        );
    }

    #[test]
    fn test_summoning_a_hero_replaces_the_old_one() {
        let mut game = GameState::new(quiet_config(), decks(10));
        game.start().unwrap();
        let first = game.current_player().unwrap();
        let old = game.player(first).unwrap().hero.unwrap();

        let jaraxxus = CardDefinition::hero("EX1_323h", "Lord Jaraxxus", 15);
        let new = game.summon(first, &jaraxxus).unwrap().unwrap();
        assert_eq!(game.player(first).unwrap().hero, Some(new));
        assert_eq!(game.cards.get(old).unwrap().zone, Zone::Removed);
    }
}
