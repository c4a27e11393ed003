//! # Warren Main Entry Point
//!
//! Builds a session from the command line, then reads keys or action tokens
//! from stdin and prints the dungeon after every action.

use clap::Parser;
use log::{error, info};
use std::io::{self, BufRead, Write};
use warren::{
    GameEvent, GameState, GenerationConfig, InputHandler, PlayerInput, TextDisplay, WarrenResult,
};

/// Command line arguments for Warren.
#[derive(Parser, Debug)]
#[command(name = "warren")]
#[command(about = "A procedurally carved tile dungeon with turn-based combat")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Grid width in tiles
    #[arg(long, default_value_t = warren::config::DEFAULT_DUNGEON_WIDTH)]
    width: u32,

    /// Grid height in tiles
    #[arg(long, default_value_t = warren::config::DEFAULT_DUNGEON_HEIGHT)]
    height: u32,

    /// Number of enemies to spawn
    #[arg(long, default_value_t = warren::config::DEFAULT_ENEMY_COUNT)]
    enemies: u32,

    /// Number of sword markers to place
    #[arg(long, default_value_t = warren::config::DEFAULT_SWORD_COUNT)]
    swords: u32,

    /// Number of potion markers to place
    #[arg(long, default_value_t = warren::config::DEFAULT_POTION_COUNT)]
    potions: u32,

    /// Print JSON snapshots instead of the text map
    #[arg(long)]
    json: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    if let Err(e) = run(&args) {
        error!("{}", e);
        eprintln!("warren: {}", e);
        std::process::exit(1);
    }
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    env_logger::Builder::new()
        .parse_filters(log_level)
        .format_target(false)
        .init();
}

fn build_config(args: &Args) -> GenerationConfig {
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut config = GenerationConfig::new(seed);
    config.width = args.width;
    config.height = args.height;
    config.enemy_count = args.enemies;
    config.items.sword_count = args.swords;
    config.items.potion_count = args.potions;
    config
}

fn run(args: &Args) -> WarrenResult<()> {
    info!("Starting Warren v{}", warren::VERSION);

    let config = build_config(args);
    let mut rng = warren::generation::utils::create_rng(&config);
    let mut state = GameState::generate(config, &mut rng)?;

    let input_handler = InputHandler::new();
    let display = TextDisplay::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    present(&mut stdout, &display, &state, args.json)?;
    writeln!(stdout, "{}", display.help_text())?;

    'session: for line in stdin.lock().lines() {
        let line = line?;
        for input in input_handler.line_to_inputs(&line) {
            match input {
                PlayerInput::Quit => break 'session,
                PlayerInput::Help => writeln!(stdout, "{}", display.help_text())?,
                PlayerInput::Action(action) => {
                    let events = action.execute(&mut state, &mut rng)?;
                    report(&mut stdout, &events)?;
                    present(&mut stdout, &display, &state, args.json)?;
                }
            }

            if !state.is_playing() {
                break 'session;
            }
        }
    }

    info!(
        "Session over after {} turns: {:?}, {} enemies defeated",
        state.statistics.turns,
        state.status(),
        state.statistics.enemies_defeated
    );
    Ok(())
}

fn present(
    out: &mut impl Write,
    display: &TextDisplay,
    state: &GameState,
    json: bool,
) -> WarrenResult<()> {
    let snapshot = state.snapshot();
    if json {
        writeln!(out, "{}", snapshot.to_json()?)?;
    } else {
        write!(out, "{}", display.render(&snapshot))?;
    }
    out.flush()?;
    Ok(())
}

fn report(out: &mut impl Write, events: &[GameEvent]) -> WarrenResult<()> {
    for event in events {
        match event {
            GameEvent::UnitAttacked {
                attacker,
                target,
                damage,
                remaining_hp,
            } => writeln!(
                out,
                "{} hits {} for {} ({} hp left)",
                attacker, target, damage, remaining_hp
            )?,
            GameEvent::EnemyDefeated { enemy, .. } => writeln!(out, "{} is defeated", enemy)?,
            GameEvent::GameWon => writeln!(out, "Every enemy is defeated. You win!")?,
            GameEvent::GameLost => writeln!(out, "You have fallen. Game over.")?,
            GameEvent::UnitMoved { .. } | GameEvent::ItemTrampled { .. } => {}
        }
    }
    Ok(())
}
