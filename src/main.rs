use std::error::Error;
use std::path::{Path, PathBuf};
use std::process;
use std::thread;
use std::time::Instant;

use clap::Parser;
use log::info;
use serde::Serialize;

use secret_hitler_rs::{Party, SecretHitler};

#[derive(Debug, Parser)]
#[command(name = "secret-hitler-rs")]
#[command(about = "Batch-simulates 7-player hidden-role policy games and reports win statistics")]
struct Args {
    /// Number of games to simulate
    #[arg(long, default_value_t = 10_000)]
    games: u64,

    /// Base seed; game i runs with seed base + i
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Worker threads; games are independent, so they split evenly
    #[arg(long, default_value_t = 4)]
    threads: usize,

    /// Write one row per game to this file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the summary as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
struct GameRow {
    game: u64,
    seed: u64,
    winner: Party,
    rounds: u32,
}

#[derive(Debug, Serialize)]
struct Summary {
    games: u64,
    liberal_wins: u64,
    liberal_win_rate: f64,
    mean_rounds: f64,
    elapsed_secs: f64,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if args.games == 0 {
        eprintln!("nothing to simulate: --games must be at least 1");
        process::exit(1);
    }

    let started = Instant::now();
    let rows = simulate(&args);
    let elapsed = started.elapsed().as_secs_f64();

    if let Some(path) = &args.csv {
        if let Err(err) = write_csv(path, &rows) {
            eprintln!("failed to write {}: {err}", path.display());
            process::exit(1);
        }
    }

    let liberal_wins = rows
        .iter()
        .filter(|row| row.winner == Party::Liberal)
        .count() as u64;
    let total_rounds: u64 = rows.iter().map(|row| u64::from(row.rounds)).sum();
    let summary = Summary {
        games: args.games,
        liberal_wins,
        liberal_win_rate: liberal_wins as f64 / args.games as f64,
        mean_rounds: total_rounds as f64 / args.games as f64,
        elapsed_secs: elapsed,
    };

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).expect("summary serializes")
        );
    } else {
        println!(
            "Liberals won {:.2}% of the time",
            summary.liberal_win_rate * 100.0
        );
        println!("Average number of rounds: {:.2}", summary.mean_rounds);
        println!(
            "Simulated {} games in {:.2}s",
            summary.games, summary.elapsed_secs
        );
    }
}

// Games share nothing, so the batch is striped across plain scoped threads
// and reduced at join.
fn simulate(args: &Args) -> Vec<GameRow> {
    let threads = args.threads.max(1);
    info!("simulating {} games across {threads} threads", args.games);

    let mut rows = Vec::with_capacity(args.games as usize);
    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(threads);
        for worker in 0..threads as u64 {
            let games = args.games;
            let base = args.seed;
            let stride = threads as u64;

            handles.push(scope.spawn(move || {
                let mut out = Vec::new();
                let mut index = worker;
                while index < games {
                    let seed = base.wrapping_add(index);
                    let mut game = SecretHitler::new(seed);
                    match game.run_to_completion() {
                        Ok(outcome) => out.push(GameRow {
                            game: index,
                            seed,
                            winner: outcome.winner,
                            rounds: outcome.rounds,
                        }),
                        Err(err) => {
                            panic!("game {index} (seed {seed}) violated an invariant: {err}")
                        }
                    }
                    index += stride;
                }
                out
            }));
        }

        for handle in handles {
            rows.extend(handle.join().expect("simulation worker panicked"));
        }
    });

    rows.sort_by_key(|row| row.game);
    rows
}

fn write_csv(path: &Path, rows: &[GameRow]) -> Result<(), Box<dyn Error>> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
