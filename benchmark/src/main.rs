use carry_pathfinding::{CostConfig, EpisodeOutcome, MatchLayout};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;
use std::collections::HashMap;
use std::time::{Duration, Instant};

const WIDTH: usize = 20;
const HEIGHT: usize = 15;
const MAX_OBSTACLES: usize = 20;
const MATCHES: u64 = 1000;
const MAX_STEPS: usize = 500;

fn main() {
    let configs: HashMap<&str, CostConfig> = [
        ("standard", CostConfig::STANDARD),
        ("plain", CostConfig::PLAIN),
    ]
    .into_iter()
    .collect();

    let matches: Vec<MatchLayout> = (0..MATCHES)
        .map(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            MatchLayout::random((WIDTH, HEIGHT), MAX_OBSTACLES, |range| rng.gen_range(range))
                .expect("the Grid is large enough for a match")
        })
        .collect();
    println!("finished Match gen");

    for (name, config) in configs {
        let start_time = Instant::now();
        let results: Vec<(u128, EpisodeOutcome)> = matches
            .par_iter()
            .map(|game| {
                let start_time = Instant::now();
                let outcome = game
                    .episode(config)
                    .expect("a generated match is always valid")
                    .run(MAX_STEPS);
                (duration_as_nanos(Instant::now() - start_time), outcome)
            })
            .collect();
        let total = duration_as_nanos(Instant::now() - start_time) as f64 / 1_000_000.0;

        let times = results.iter().map(|r| r.0);
        let min_time = times.clone().min().unwrap_or(0) as f64 / 1_000_000.0;
        let max_time = times.clone().max().unwrap_or(0) as f64 / 1_000_000.0;
        let avg_time = times.sum::<u128>() as f64 / results.len() as f64 / 1_000_000.0;

        let steps: Vec<usize> = results
            .iter()
            .filter_map(|r| match r.1 {
                EpisodeOutcome::Delivered { steps } => Some(steps),
                _ => None,
            })
            .collect();
        let blocked = results
            .iter()
            .filter(|r| matches!(r.1, EpisodeOutcome::Blocked { .. }))
            .count();
        let avg_steps = steps.iter().sum::<usize>() as f64 / steps.len().max(1) as f64;

        println!(
            "{} | {:.3}ms total | {:.3}ms - {:.3}ms; {:.3}ms | delivered {} blocked {} | {:.1} steps",
            name,
            total,
            min_time,
            max_time,
            avg_time,
            steps.len(),
            blocked,
            avg_steps,
        );
    }
}

fn duration_as_nanos(d: Duration) -> u128 {
    d.as_secs() as u128 * 1_000_000_000 + d.subsec_nanos() as u128
}
