//! End-to-end games driven through the public API
//!
//! A simple "summon what fits, attack everything" driver plays games to
//! completion. Games with the same seed must produce identical logs.

use hearthforge::core::{CardDefinition, CardType, Deck, PlayState};
use hearthforge::game::{GameState, OutputMode, Step, VerbosityLevel};
use hearthforge::{GameConfig, GameError, GameOver, Interrupt, Resolution};
use similar_asserts::assert_eq;

fn deck(hero: &str, name: &str) -> Deck {
    let wisp = CardDefinition::minion("CS2_231", "Wisp", 0, 1, 1);
    let raptor = CardDefinition::minion("CS2_172", "Bloodfen Raptor", 2, 3, 2);
    let yeti = CardDefinition::minion("CS2_182", "Chillwind Yeti", 4, 4, 5);
    Deck::new(CardDefinition::hero(hero, name, 30))
        .with_hero_power(CardDefinition::hero_power("CS2_102", "Armor Up!", 2))
        .with_cards(&wisp, 10)
        .with_cards(&raptor, 10)
        .with_cards(&yeti, 10)
}

fn new_game(seed: u64) -> GameState {
    let config = GameConfig::default()
        .with_seed(seed)
        .with_player_names("Alice", "Bob")
        .with_verbosity(VerbosityLevel::Verbose);
    let mut game = GameState::new(
        config,
        [
            deck("HERO_01", "Garrosh Hellscream"),
            deck("HERO_08", "Jaina Proudmoore"),
        ],
    );
    game.logger.set_output_mode(OutputMode::Memory);
    game
}

/// Summon what fits the mana, then attack with everything that has been in
/// play for a turn, enemy minions first
fn play_turn(game: &mut GameState) -> Resolution<()> {
    let me = game
        .current_player()
        .ok_or_else(|| GameError::InvalidAction("no active player".to_string()))?;
    let enemy = game.opponent_of(me)?;

    let hand: Vec<_> = game.player(me)?.zones.hand.iter().collect();
    for id in hand {
        let card = game.cards.get(id)?;
        if card.card_type != CardType::Minion || card.cost > game.player(me)?.mana() {
            continue;
        }
        let cost = card.cost;
        let summoned = game.queue_actions(
            me.into(),
            [hearthforge::game::Action::Summon { player: me, card: id }],
        )?;
        if !summoned.is_empty() {
            game.player_mut(me)?.used_mana += cost;
        }
    }

    let attackers: Vec<_> = game
        .player(me)?
        .zones
        .field
        .iter()
        .filter(|&id| {
            game.cards
                .get(id)
                .map(|c| c.turns_in_play > 0 && c.num_attacks == 0 && c.atk() > 0)
                .unwrap_or(false)
        })
        .collect();
    for attacker in attackers {
        if !game.cards.get(attacker)?.in_play() {
            continue;
        }
        let enemy_side = game.player(enemy)?;
        let target = enemy_side
            .zones
            .field
            .iter()
            .next()
            .or(enemy_side.hero)
            .ok_or_else(|| GameError::InvalidAction("nothing to attack".to_string()))?;
        game.attack(attacker, target)?;
    }

    game.end_turn()
}

fn play_out(seed: u64) -> (GameState, GameOver) {
    let mut game = new_game(seed);
    let mut result = game.start();
    let mut turns = 0;
    while result.is_ok() {
        turns += 1;
        assert!(turns < 200, "game did not finish");
        result = play_turn(&mut game);
    }
    match result {
        Err(Interrupt::GameOver(over)) => (game, over),
        other => panic!("game stopped without ending: {other:?}"),
    }
}

fn messages(game: &GameState) -> Vec<String> {
    game.logger
        .logs()
        .iter()
        .map(|entry| entry.message.clone())
        .collect()
}

#[test]
fn test_game_plays_to_completion() {
    let (game, over) = play_out(42);

    assert!(game.is_over());
    assert_eq!(game.outcome(), Some(&over));
    assert_eq!(game.turn.step, Step::FinalGameover);
    assert_eq!(over.losers.len(), 1);

    let loser = over.losers[0];
    for player in &game.players {
        let expected = if player.id == loser {
            PlayState::Lost
        } else {
            PlayState::Won
        };
        assert_eq!(player.playstate, expected);
    }
    assert!(game.stats.death_sweeps > 0);
    assert_eq!(game.action_depth(), 0);

    // Nothing may resolve once the game is over
    let result = game.clone().end_turn();
    assert!(matches!(
        result,
        Err(Interrupt::Rules(GameError::GameAlreadyOver))
    ));
}

#[test]
fn test_same_seed_same_game() {
    let (first, first_over) = play_out(7);
    let (second, second_over) = play_out(7);

    assert_eq!(messages(&first), messages(&second));
    assert_eq!(first_over, second_over);
    assert_eq!(first.stats, second.stats);
}

#[test]
fn test_log_mentions_setup_and_turns() {
    let (game, _) = play_out(3);
    let logs = messages(&game);

    assert_eq!(logs[0].as_str(), "Starting game: Alice vs Bob");
    assert!(logs[1].starts_with("Tossing the coin..."));
    assert!(logs.iter().any(|m| m == "Entering mulligan phase"));
    assert!(logs.iter().any(|m| m.ends_with("gets The Coin")));
    assert!(logs.iter().any(|m| m.ends_with("begins turn 1")));
    assert!(logs.iter().any(|m| m.starts_with("Game over")));
}

#[test]
fn test_minions_killed_tracks_every_death() {
    let (game, _) = play_out(11);
    let in_graveyards: usize = game
        .players
        .iter()
        .flat_map(|p| p.zones.graveyard.iter())
        .filter(|&id| game.cards.get(id).map(|c| c.is_minion()).unwrap_or(false))
        .filter(|&id| game.cards.get(id).map(|c| c.ignore_events).unwrap_or(false))
        .count();
    assert_eq!(game.minions_killed.len(), in_graveyards);
}
