//! Turn cycling benchmark
//!
//! Measures how fast the engine resolves turn changes (BeginTurn, EndTurn,
//! draws, aura refreshes and death sweeps) and full combat exchanges.
//! Run with `--no-default-features` to exclude verbose log formatting.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hearthforge::core::{CardDefinition, Deck};
use hearthforge::game::{GameState, VerbosityLevel};
use hearthforge::GameConfig;

fn new_game(seed: u64) -> GameState {
    let yeti = CardDefinition::minion("CS2_182", "Chillwind Yeti", 4, 4, 5);
    let deck = |hero| {
        Deck::new(CardDefinition::hero(hero, "Hero", 30))
            .with_hero_power(CardDefinition::hero_power("CS2_102", "Armor Up!", 2))
            .with_cards(&yeti, 30)
    };
    let config = GameConfig::default()
        .with_seed(seed)
        .with_verbosity(VerbosityLevel::Silent);
    GameState::new(config, [deck("HERO_01"), deck("HERO_08")])
}

fn bench_turns(c: &mut Criterion) {
    c.bench_function("setup_and_20_turns", |b| {
        b.iter(|| {
            let mut game = new_game(black_box(42));
            game.start().ok();
            for _ in 0..20 {
                if game.end_turn().is_err() {
                    break;
                }
            }
            black_box(game.turn.turn)
        })
    });
}

fn bench_combat(c: &mut Criterion) {
    let yeti = CardDefinition::minion("CS2_182", "Chillwind Yeti", 4, 4, 5);
    c.bench_function("attack_exchange", |b| {
        b.iter(|| {
            let mut game = new_game(7);
            game.start().ok();
            let me = game.players[0].id;
            let enemy = game.players[1].id;
            let (Ok(Some(a)), Ok(Some(d))) = (game.summon(me, &yeti), game.summon(enemy, &yeti))
            else {
                return;
            };
            black_box(game.attack(a, d).ok());
        })
    });
}

criterion_group!(benches, bench_turns, bench_combat);
criterion_main!(benches);
