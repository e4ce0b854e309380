use criterion::{black_box, criterion_group, criterion_main, Criterion};
use match_pairs::core::deck::generate_deck;
use match_pairs::core::session::TurnCoordinator;
use match_pairs::types::{
    GridConfig, CardId, CARD_FLIP_MS, MISMATCH_SETTLE_MS, ROUND_COMPLETE_DELAY_MS,
};

fn bench_tick(c: &mut Criterion) {
    let config = GridConfig::new(4, 5);
    let deck = generate_deck(&config, 32, 12345).unwrap();
    let mut coordinator = TurnCoordinator::new();
    coordinator.initialize_game(config, &deck).unwrap();
    coordinator.start_game();
    coordinator.handle_card_selected(0);

    c.bench_function("coordinator_tick_16ms", |b| {
        b.iter(|| {
            coordinator.tick(black_box(16));
        })
    });
}

fn bench_deck_generation(c: &mut Criterion) {
    let config = GridConfig::new(6, 6);

    c.bench_function("generate_deck_6x6", |b| {
        b.iter(|| {
            generate_deck(black_box(&config), 32, black_box(777)).unwrap();
        })
    });
}

fn bench_card_selection(c: &mut Criterion) {
    let config = GridConfig::new(4, 5);
    let deck = generate_deck(&config, 32, 9).unwrap();

    c.bench_function("handle_card_selected", |b| {
        b.iter(|| {
            let mut coordinator = TurnCoordinator::new();
            coordinator.initialize_game(config, &deck).unwrap();
            coordinator.start_game();
            coordinator.handle_card_selected(black_box(0));
            coordinator.tick(CARD_FLIP_MS);
            coordinator.handle_card_selected(black_box(1));
        })
    });
}

fn bench_full_round(c: &mut Criterion) {
    let config = GridConfig::new(4, 4);
    let deck = generate_deck(&config, 32, 4242).unwrap();

    c.bench_function("full_round_4x4", |b| {
        b.iter(|| {
            let mut coordinator = TurnCoordinator::new();
            coordinator.initialize_game(config, &deck).unwrap();
            coordinator.start_game();
            while coordinator.matched_count() < deck.len() {
                let (a, x) = next_pair(coordinator.cards().iter().map(|c| {
                    (c.id(), c.is_matched())
                }));
                coordinator.tick(CARD_FLIP_MS);
                coordinator.handle_card_selected(a);
                coordinator.tick(CARD_FLIP_MS);
                coordinator.handle_card_selected(x);
                coordinator.tick(MISMATCH_SETTLE_MS);
            }
            coordinator.tick(ROUND_COMPLETE_DELAY_MS);
            black_box(coordinator.is_completed())
        })
    });
}

fn next_pair(cards: impl Iterator<Item = (CardId, bool)>) -> (usize, usize) {
    let cards: Vec<(CardId, bool)> = cards.collect();
    for i in 0..cards.len() {
        if cards[i].1 {
            continue;
        }
        for j in (i + 1)..cards.len() {
            if !cards[j].1 && cards[i].0 == cards[j].0 {
                return (i, j);
            }
        }
    }
    unreachable!("unfinished grid always holds a pair");
}

criterion_group!(
    benches,
    bench_tick,
    bench_deck_generation,
    bench_card_selection,
    bench_full_round
);
criterion_main!(benches);
