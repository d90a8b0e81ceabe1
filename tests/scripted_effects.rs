//! Catalog-style effects submitted through the public queue

use hearthforge::core::{CardDefinition, CardId, Deck, EntityRef, EventListener, GameEvent};
use hearthforge::game::{Action, ActionResult, GameState, ScriptedEffect};
use hearthforge::{GameConfig, Resolution};
use std::cell::RefCell;
use std::rc::Rc;

/// Deals damage to every minion on the board, one hit at a time
struct Whirlwind {
    amount: i32,
}

impl ScriptedEffect for Whirlwind {
    fn name(&self) -> &str {
        "Whirlwind"
    }

    fn resolve(&self, game: &mut GameState, source: EntityRef) -> Resolution<ActionResult> {
        let targets: Vec<CardId> = game.board().collect();
        let hits = targets.into_iter().map(|target| Action::Hit {
            target,
            amount: self.amount,
        });
        game.queue_actions(source, hits)?;
        Ok(ActionResult::Resolved)
    }
}

fn started_game() -> GameState {
    let config = GameConfig::from_json(
        r#"{ "seed": 99, "verbosity": "Silent", "player_names": ["Alice", "Bob"] }"#,
    )
    .unwrap();
    let yeti = CardDefinition::minion("CS2_182", "Chillwind Yeti", 4, 4, 5);
    let deck = |hero| Deck::new(CardDefinition::hero(hero, "Hero", 30)).with_cards(&yeti, 10);
    let mut game = GameState::new(config, [deck("HERO_01"), deck("HERO_02")]);
    game.start().unwrap();
    game
}

#[test]
fn test_deaths_wait_for_the_outermost_action() {
    let mut game = started_game();
    let me = game.current_player().unwrap();
    let wisp = CardDefinition::minion("CS2_231", "Wisp", 0, 1, 1);
    let a = game.summon(me, &wisp).unwrap().unwrap();
    let b = game.summon(me, &wisp).unwrap().unwrap();

    // Both wisps are still on the board while the effect is resolving
    let board_during = Rc::new(RefCell::new(0));
    let seen = Rc::clone(&board_during);
    let observe = Action::script("observe", move |game: &mut GameState, _source| {
        *seen.borrow_mut() = game.board().count();
        Ok(ActionResult::Resolved)
    });

    let sweeps = game.stats.death_sweeps;
    game.queue_actions(
        me.into(),
        [Action::Script(Rc::new(Whirlwind { amount: 1 })), observe],
    )
    .unwrap();

    assert_eq!(*board_during.borrow(), 2);
    assert_eq!(game.board().count(), 0);
    assert_eq!(game.minions_killed, vec![a, b]);
    // Initial sweep, then one more after the queued deaths
    assert_eq!(game.stats.death_sweeps - sweeps, 2);
}

#[test]
fn test_death_listener_reacts_after_sweep() {
    let mut game = started_game();
    let me = game.current_player().unwrap();
    let enemy = game.opponent_of(me).unwrap();
    let wisp = CardDefinition::minion("CS2_231", "Wisp", 0, 1, 1);
    let watcher = game
        .summon(enemy, &CardDefinition::minion("EX1_tk", "Watcher", 1, 1, 5))
        .unwrap()
        .unwrap();
    let victim = game.summon(me, &wisp).unwrap().unwrap();

    // Each death grants the watcher +1/+1
    let grow = Action::Buff {
        target: watcher,
        atk: 1,
        health: 1,
        one_turn: false,
    };
    game.queue_actions(
        EntityRef::Card(watcher),
        [Action::EventListener(EventListener::new(
            GameEvent::Death,
            vec![grow],
        ))],
    )
    .unwrap();

    game.queue_actions(EntityRef::Game, [Action::Hit { target: victim, amount: 1 }])
        .unwrap();

    let card = game.cards.get(watcher).unwrap();
    assert_eq!((card.atk(), card.health()), (2, 6));
    assert_eq!(game.enchantments_on(watcher).len(), 1);
}
