//! Event broadcast to registered listeners
//!
//! Listeners live on the player that controlled their source at registration
//! time and fire in registration order. The active player's listeners fire
//! before the opponent's.

use crate::core::{EntityRef, GameEvent};
use crate::game::{Action, GameState};
use crate::Resolution;

impl GameState {
    /// Queue the actions of every live listener waiting on `event`
    pub fn broadcast(&mut self, event: GameEvent) -> Resolution<()> {
        let mut order: Vec<usize> = (0..self.players.len()).collect();
        if let Some(current) = self.current_player() {
            order.sort_by_key(|&idx| self.players[idx].id != current);
        }

        let mut fired = Vec::new();
        for idx in order {
            fired.extend(self.take_matching(idx, event));
        }

        for (source, actions) in fired {
            log_if_verbose!(self, "{:?} triggers {}", event, self.describe(source));
            self.queue_actions(source, actions)?;
        }
        Ok(())
    }

    /// Collect a player's matching listeners, dropping the one-shot ones
    fn take_matching(&mut self, idx: usize, event: GameEvent) -> Vec<(EntityRef, Vec<Action>)> {
        let matching: Vec<bool> = self.players[idx]
            .listeners()
            .iter()
            .map(|registered| {
                registered.listener.event == event && self.is_live_source(registered.source)
            })
            .collect();

        let mut fired = Vec::new();
        let mut flags = matching.into_iter();
        self.players[idx].listeners_mut().retain(|registered| {
            let hit = flags.next().unwrap_or(false);
            if hit {
                fired.push((registered.source, registered.listener.actions.clone()));
            }
            !(hit && registered.listener.once)
        });
        fired
    }

    /// Whether a listener's source can still react to events
    fn is_live_source(&self, source: EntityRef) -> bool {
        match source {
            EntityRef::Game => false,
            EntityRef::Player(id) => self.player(id).is_ok(),
            EntityRef::Card(id) => self
                .cards
                .get(id)
                .map(|card| card.in_play() && !card.ignore_events)
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{EntityRef, EventListener, GameEvent};
    use crate::game::test_support::{started_game, summon_minion};
    use crate::game::{Action, ActionResult, GameState};

    fn ping(target: crate::core::CardId) -> Action {
        Action::Hit { target, amount: 1 }
    }

    #[test]
    fn test_listener_fires_on_event() {
        let mut game = started_game();
        let p1 = game.players[0].id;
        let source = summon_minion(&mut game, p1, 1, 3);
        let target = summon_minion(&mut game, p1, 1, 5);

        game.queue_actions(
            EntityRef::Card(source),
            [Action::EventListener(EventListener::new(
                GameEvent::Draw,
                vec![ping(target)],
            ))],
        )
        .unwrap();

        game.broadcast(GameEvent::Draw).unwrap();
        game.broadcast(GameEvent::TurnEnd).unwrap();
        assert_eq!(game.cards.get(target).unwrap().damage, 1);

        game.broadcast(GameEvent::Draw).unwrap();
        assert_eq!(game.cards.get(target).unwrap().damage, 2);
    }

    #[test]
    fn test_once_listener_is_removed() {
        let mut game = started_game();
        let p1 = game.players[0].id;
        let target = summon_minion(&mut game, p1, 1, 5);

        game.queue_actions(
            EntityRef::Player(p1),
            [Action::EventListener(EventListener::once(
                GameEvent::Attack,
                vec![ping(target)],
            ))],
        )
        .unwrap();

        game.broadcast(GameEvent::Attack).unwrap();
        game.broadcast(GameEvent::Attack).unwrap();
        assert_eq!(game.cards.get(target).unwrap().damage, 1);
        assert!(game.player(p1).unwrap().listeners().is_empty());
    }

    #[test]
    fn test_condemned_source_does_not_fire() {
        let mut game = started_game();
        let p1 = game.players[0].id;
        let source = summon_minion(&mut game, p1, 1, 1);
        let target = summon_minion(&mut game, p1, 1, 5);

        game.queue_actions(
            EntityRef::Card(source),
            [Action::EventListener(EventListener::new(
                GameEvent::Death,
                vec![ping(target)],
            ))],
        )
        .unwrap();

        // The source's own death is broadcast after it stops reacting to events
        game.queue_actions(EntityRef::Game, [Action::Destroy { target: source }])
            .unwrap();
        assert_eq!(game.cards.get(target).unwrap().damage, 0);
    }

    #[test]
    fn test_triggered_actions_resolve_nested() {
        let mut game = started_game();
        let p1 = game.players[0].id;
        let source = summon_minion(&mut game, p1, 1, 3);

        let check = Action::script("depth check", |game: &mut GameState, _source| {
            assert!(game.action_depth() > 0);
            Ok(ActionResult::Resolved)
        });
        game.queue_actions(
            EntityRef::Card(source),
            [Action::EventListener(EventListener::new(
                GameEvent::TurnEnd,
                vec![check],
            ))],
        )
        .unwrap();

        let sweeps = game.stats.death_sweeps;
        game.end_turn().unwrap();
        // One sweep for the whole EndTurn batch
        assert_eq!(game.stats.death_sweeps - sweeps, 1);
    }
}
