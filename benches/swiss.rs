#[cfg(feature = "bench")]
use std::time::Duration;

#[cfg(feature = "bench")]
use criterion::{Criterion, criterion_group, criterion_main};

#[cfg(feature = "bench")]
use rand::{Rng, SeedableRng, rngs::StdRng};

#[cfg(feature = "bench")]
use swiss_tournament::{
    id::SequentialIds, outcome::Outcome, standings::compute_standings, tournament::Tournament,
};

#[cfg(feature = "bench")]
const PLAYERS: usize = 256;

#[cfg(feature = "bench")]
const ROUNDS: usize = 8;

#[cfg(feature = "bench")]
fn play_tournament() -> Tournament {
    let mut rng = StdRng::seed_from_u64(0);
    let mut ids = SequentialIds::new();

    let names: Vec<String> = (0..PLAYERS).map(|i| format!("Player {i:03}")).collect();
    let mut tournament = Tournament::new("Bench Open")
        .set_max_rounds(ROUNDS)
        .bulk_add(&names.join("\n"), &mut ids);

    for _ in 0..ROUNDS {
        let Ok(paired) = tournament.start_round(&mut ids) else {
            break;
        };

        let pending: Vec<String> = paired
            .current_round()
            .map(|round| {
                round
                    .pairings
                    .iter()
                    .filter(|pairing| pairing.is_pending())
                    .map(|pairing| pairing.id.clone())
                    .collect()
            })
            .unwrap_or_default();

        tournament = pending.iter().fold(paired, |tournament, match_id| {
            let outcome = match rng.random_range(0..3) {
                0 => Outcome::P1Win,
                1 => Outcome::P2Win,
                _ => Outcome::Draw,
            };
            tournament.record_result(match_id, outcome)
        });
    }

    tournament
}

#[cfg(feature = "bench")]
fn swiss_rounds(c: &mut Criterion) {
    c.bench_function("swiss_rounds", |b| {
        b.iter(play_tournament);
    });

    let tournament = play_tournament();
    c.bench_function("standings", move |b| {
        b.iter(|| compute_standings(&tournament));
    });
}

#[cfg(feature = "bench")]
criterion_group! {
    name = benches;
    config = Criterion::default().measurement_time(Duration::from_secs(10));
    targets = swiss_rounds
}

#[cfg(feature = "bench")]
criterion_main!(benches);

#[cfg(not(feature = "bench"))]
fn main() {
    eprintln!("You must pass `--features=bench`");
}
