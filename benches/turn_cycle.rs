//! Benchmarks for roll-cycles and complete simulated matches.

#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use walrus_estate::core::{ChaChaDice, MatchState, ScriptedDice};
use walrus_estate::rules::{Action, RulesEngine};
use walrus_estate::turn::{resolve_human_turn, NoSteps, WalrusRules};

/// Cycles before a simulated match is abandoned as undecided.
const MAX_CYCLES: usize = 500;

/// Play one match where the human buys whenever it can.
fn play_match(seed: u64) -> MatchState {
    let mut state = MatchState::standard();
    let mut rules = WalrusRules::new(ChaChaDice::new(seed), &state.config);

    for _ in 0..MAX_CYCLES {
        if state.is_terminal() {
            break;
        }
        if rules.apply_action(&mut state, &Action::Roll).is_err() {
            break;
        }
        let buy = rules
            .legal_actions(&state)
            .into_iter()
            .find(|a| matches!(a, Action::Buy(_)));
        if let Some(buy) = buy {
            let _ = rules.apply_action(&mut state, &buy);
        }
    }
    state
}

fn bench_single_cycle(c: &mut Criterion) {
    let state = MatchState::standard();

    c.bench_function("single_cycle", |b| {
        b.iter(|| {
            let mut state = state.clone();
            let mut dice = ScriptedDice::new([3]);
            let report = resolve_human_turn(&mut state, black_box(4), &mut dice, &mut NoSteps);
            black_box(report)
        });
    });
}

fn bench_full_match(c: &mut Criterion) {
    c.bench_function("full_match", |b| {
        b.iter(|| black_box(play_match(black_box(42))));
    });
}

fn bench_match_batch(c: &mut Criterion) {
    c.bench_function("10_matches_sequential", |b| {
        b.iter(|| {
            for seed in 0..10u64 {
                black_box(play_match(black_box(seed)));
            }
        });
    });
}

criterion_group!(benches, bench_single_cycle, bench_full_match, bench_match_batch);
criterion_main!(benches);
