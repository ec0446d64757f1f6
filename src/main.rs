//! Bocce entry point
//!
//! Runs one headless round at the fixed timestep and prints the outcome.
//!
//! ```text
//! bocce [--seed N] [--tuning FILE] [--demo] [--local C] [--opponent C] [--json]
//! ```

use bocce::presentation::{HeadlessBridge, present};
use bocce::sim::{PointMassProvider, Round, RoundOutcome, TickInput, tick};
use bocce::{Controller, Lineup, RoundError, Tuning};

#[derive(Debug, Default)]
struct Args {
    seed: Option<u64>,
    tuning: Option<String>,
    demo: bool,
    local: Option<Controller>,
    opponent: Option<Controller>,
    json: bool,
}

fn controller(value: Option<String>) -> Result<Controller, String> {
    let value = value.ok_or("controller needs a value (player or rival)")?;
    Controller::from_str(&value).ok_or_else(|| format!("unknown controller: {value}"))
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--seed" => {
                let value = it.next().ok_or("--seed needs a value")?;
                args.seed = Some(value.parse().map_err(|e| format!("bad seed {value}: {e}"))?);
            }
            "--tuning" => args.tuning = Some(it.next().ok_or("--tuning needs a path")?),
            "--demo" => args.demo = true,
            "--local" => args.local = Some(controller(it.next())?),
            "--opponent" => args.opponent = Some(controller(it.next())?),
            "--json" => args.json = true,
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(args)
}

/// Scripted player: push toward the target with a little drift
fn player_input(tick_index: u64) -> TickInput {
    let drift = ((tick_index as f32) * 0.05).sin() * 0.3;
    TickInput::axes(drift, 1.0)
}

/// Tick until the round is decided, failing if it takes more than `max_ticks`
fn play(
    round: &mut Round<PointMassProvider>,
    bridge: &mut HeadlessBridge,
    dt: f32,
    max_ticks: u64,
) -> bocce::Result<RoundOutcome> {
    for i in 0..max_ticks {
        tick(round, &player_input(i), dt)?;
        present(round, bridge);
        if round.is_decided() {
            break;
        }
    }
    round
        .outcome()
        .copied()
        .ok_or(RoundError::Undecided { ticks: max_ticks })
}

fn run(args: Args) -> bocce::Result<()> {
    let mut tuning = match &args.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    if args.demo {
        tuning.lineup = Lineup::demo();
    }
    if let Some(local) = args.local {
        tuning.lineup.local = local;
    }
    if let Some(opponent) = args.opponent {
        tuning.lineup.opponent = opponent;
    }
    log::info!(
        "Lineup: local={}, opponent={}",
        tuning.lineup.local.as_str(),
        tuning.lineup.opponent.as_str()
    );

    let seed = args.seed.unwrap_or(0x0b0c_ce);
    let dt = tuning.sim_dt;
    let max_ticks = tuning.ticks_per_throw();
    let provider = PointMassProvider::new(tuning.ball_mass);

    let mut round = Round::new(seed, tuning, provider)?;
    round.start_round()?;

    let mut bridge = HeadlessBridge::default();
    let outcome = play(&mut round, &mut bridge, dt, max_ticks)?;

    if args.json {
        match serde_json::to_string_pretty(&outcome) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to encode outcome: {}", e),
        }
    } else if let Some(board) = &bridge.board {
        println!("{}", board.headline);
        println!("{}{}", board.local_label, board.local_value);
        println!("{}{}", board.opponent_label, board.opponent_value);
    }
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bocce (headless) starting...");

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("usage: bocce [--seed N] [--tuning FILE] [--demo] [--local C] [--opponent C] [--json]");
            std::process::exit(2);
        }
    };

    if let Err(e) = run(args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
