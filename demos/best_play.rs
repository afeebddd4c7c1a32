//! Estimate the best opening lead when only our own hand is known.
//!
//! North is on lead against 3NT with the three other hands hidden, East
//! constrained to a strong notrump.  Deals consistent with that picture are
//! sampled, solved double-dummy, and the per-card trick counts averaged.

use rand::rngs::StdRng;
use rand::SeedableRng as _;
use single_dummy::{Card, Game, Range, Seat, SolverError, Suit};
use std::process::ExitCode;

const DEAL: &str = "AQT5.K74.KJ3.A82 ... ... ...";

fn analyze(samples: u32) -> Result<(), SolverError> {
    let mut game = Game::new(
        DEAL.parse().expect("a valid PBN deal"),
        Seat::North,
        "3NT".parse().expect("a valid contract"),
    );
    game.constraints_mut().set_hcp(Seat::East, Range::new(15, 17));
    game.constraints_mut()
        .set_length(Seat::East, Suit::Spades, Range::new(2, 4));

    let sampler = game.sampling();
    let mut rng = StdRng::seed_from_u64(2024);
    let mut totals: Vec<(Card, u32, u32)> =
        sampler.moves().iter().map(|&card| (card, 0, 0)).collect();

    let mut accepted = 0;
    while accepted < samples {
        let Some(deal) = sampler.generate(&mut rng) else {
            continue;
        };
        if !sampler.filter(&deal) {
            continue;
        }
        accepted += 1;
        for (card, tricks) in sampler.solve(&deal)? {
            if let Some(entry) = totals.iter_mut().find(|entry| entry.0 == card) {
                entry.1 += u32::from(tricks);
                entry.2 += 1;
            }
        }
    }

    totals.sort_by(|a, b| (b.1 * a.2).cmp(&(a.1 * b.2)));
    println!("{accepted} accepted deals");
    for (card, tricks, count) in totals {
        if count > 0 {
            println!("{card}: {:.2}", f64::from(tricks) / f64::from(count));
        }
    }
    Ok(())
}

fn main() -> Result<ExitCode, SolverError> {
    match std::env::args().nth(1) {
        Some(string) => {
            if let Ok(n) = string.parse::<u32>() {
                analyze(n)
            } else {
                eprintln!("usage: best-play [SAMPLES]");
                return Ok(ExitCode::FAILURE);
            }
        }
        None => analyze(20),
    }?;
    Ok(ExitCode::SUCCESS)
}
