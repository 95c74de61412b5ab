use anyhow::Context;
use clap::Parser;
use commonware_utils::hex;
use luckybot_execution::{Seeder, SoloEngine};
use luckybot_simulator::{load_configs, non_zero, parse_log_level, parse_seed, simulate_all};
use luckybot_types::casino::{GameConfigs, GameType};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 100_000)]
    trials: u64,

    #[arg(short, long, default_value_t = 100)]
    bet: u64,

    /// Only simulate this game (e.g. `slot_dice`).
    #[arg(short, long)]
    game: Option<GameType>,

    /// YAML file of per-game config overrides.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 32-byte hex seed; random when omitted.
    #[arg(short, long)]
    seed: Option<String>,

    #[arg(long)]
    json: bool,

    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    // Parse args
    let args = Args::parse();
    let trials = non_zero("trials", args.trials)?;
    let bet = non_zero("bet", args.bet)?;

    // Create logger
    tracing_subscriber::fmt()
        .with_max_level(parse_log_level(&args.log_level)?)
        .init();

    // Load configs
    let configs = match &args.config {
        Some(path) => {
            let yaml = std::fs::read_to_string(path)
                .with_context(|| format!("could not read config file {}", path.display()))?;
            load_configs(&yaml).context("could not parse config file")?
        }
        None => GameConfigs::default(),
    };
    let engine = SoloEngine::new(configs).context("invalid game config")?;

    // Pick a seed
    let seeder = match &args.seed {
        Some(seed) => Seeder::new(parse_seed(seed).context("invalid seed")?),
        None => Seeder::from_entropy(),
    };
    info!(seed = %hex(seeder.seed()), trials, bet, "starting simulation");

    // Run
    let games: Vec<GameType> = match args.game {
        Some(game) => vec![game],
        None => engine.configs().iter().map(|(game, _)| *game).collect(),
    };
    let reports =
        simulate_all(&engine, &games, trials, bet, seeder.seed()).context("simulation failed")?;
    for report in &reports {
        info!(
            game = %report.game,
            rtp = report.rtp,
            edge = report.realized_edge,
            "simulated"
        );
        if report.deviation() > 4.0 {
            warn!(
                game = %report.game,
                deviation = report.deviation(),
                "realized edge far from configured edge"
            );
        }
    }

    // Report
    if args.json {
        let output = serde_json::to_string_pretty(&reports).context("could not encode report")?;
        println!("{output}");
        return Ok(());
    }
    println!(
        "{:<20} {:>10} {:>9} {:>9} {:>9} {:>9}",
        "game", "trials", "rtp", "edge", "config", "stderr"
    );
    for report in &reports {
        println!(
            "{:<20} {:>10} {:>8.3}% {:>8.3}% {:>8.3}% {:>8.3}%",
            report.game.to_string(),
            report.trials,
            report.rtp * 100.0,
            report.realized_edge * 100.0,
            report.configured_edge * 100.0,
            report.stderr * 100.0
        );
    }
    Ok(())
}
