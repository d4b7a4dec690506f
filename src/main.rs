use blastgrid::config::{
    self, DEFAULT_MAX_TICKS, DEFAULT_SEED, TICK_INTERVAL_FAST_MS, TICK_INTERVAL_NORMAL_MS,
};
use blastgrid::logging;
use blastgrid::script::parse_script;
use blastgrid::{Game, GameStatus, Intent};
use clap::Parser;
use log::{error, info, warn};
use std::process;
use std::thread;
use std::time::Duration;

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about = "Headless driver for the blast grid arena", long_about = None)]
struct Args {
    /// Seed for the enemy random walk
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Maximum number of ticks to simulate
    #[arg(long, default_value_t = DEFAULT_MAX_TICKS)]
    max_ticks: u64,

    /// Intent script, one symbol per tick: U D L R (move), B (bomb), . (wait)
    #[arg(long, default_value = "")]
    script: String,

    /// Use the fast tick cadence
    #[arg(long)]
    fast: bool,

    /// Explicit tick interval in milliseconds (0 runs flat out); overrides --fast
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Print the board every N ticks (0 prints only the final board)
    #[arg(long, default_value_t = 0)]
    render_every: u64,

    /// Debug filter to specify log topics (e.g., "bomb,blast,enemy")
    /// Available topics: sim, bomb, blast, enemy, input
    #[arg(long)]
    debug_filter: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    let log_level = logging::parse_level(&args.log_level);
    if let Err(e) = logging::init_logger(log_level, args.debug_filter.clone()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }
    if let Some(filter) = &args.debug_filter {
        for topic in filter.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            if !logging::TOPICS.contains(&topic) {
                warn!("Unknown debug topic '{}'", topic);
            }
        }
    }

    let intents = match parse_script(&args.script) {
        Ok(intents) => intents,
        Err(e) => {
            error!("Invalid script: {}", e);
            process::exit(2);
        }
    };

    let interval = Duration::from_millis(args.tick_ms.unwrap_or(if args.fast {
        TICK_INTERVAL_FAST_MS
    } else {
        TICK_INTERVAL_NORMAL_MS
    }));

    info!(
        "Starting {}x{} arena, {} scripted intents, tick every {:?}",
        config::GRID_COLS,
        config::GRID_ROWS,
        intents.len(),
        interval
    );

    match run(&args, &intents, interval) {
        Ok(GameStatus::Won) => info!("You win!"),
        Ok(GameStatus::Lost) => info!("Game over!"),
        Ok(GameStatus::Running) => info!("Stopped after {} ticks with no winner", args.max_ticks),
        Err(e) => {
            error!("Simulation fault: {}", e);
            process::exit(1);
        }
    }
}

fn run(args: &Args, intents: &[Intent], interval: Duration) -> Result<GameStatus, blastgrid::SimError> {
    let mut game = Game::new(args.seed)?;
    let mut script = intents.iter();
    let mut status = game.status();

    while game.ticks() < args.max_ticks && !status.is_over() {
        if let Some(&intent) = script.next() {
            game.apply(intent)?;
        }
        status = game.tick()?;

        if args.render_every > 0 && game.ticks() % args.render_every == 0 {
            println!("tick {} ({})\n{}", game.ticks(), status, game.grid_snapshot());
        }
        if !interval.is_zero() {
            thread::sleep(interval);
        }
    }

    println!("final board after {} ticks ({})\n{}", game.ticks(), status, game.grid_snapshot());
    Ok(status)
}
