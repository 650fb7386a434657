// Terminal 2048
// Controls: W/A/S/D, arrow keys or a mouse drag to slide. R restarts, Q quits.

use std::io;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use tile_merge::config::AppConfig;
use tile_merge::console_interface::{ConsoleActuator, ConsoleInput, InputManager, cleanup_terminal, setup_terminal};
use tile_merge::core::{Actuator, Direction, GameManager, GameSettings};
use tile_merge::logging;
use tile_merge::text_interface::{JsonLinesActuator, TextActuator, render_grid_to_string};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Play in the terminal
    Interactive,
    /// Let a random policy play headless and print every frame
    Autoplay,
}

#[derive(Debug, Parser)]
#[command(author, version, about = "Slide and merge numbered tiles until one reaches 2048")]
struct Cli {
    #[arg(value_enum, default_value_t = Mode::Interactive)]
    mode: Mode,

    /// TOML config file; flags below override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Grid side length
    #[arg(long, value_name = "N")]
    size: Option<usize>,

    /// Seed for tile spawns (and the autoplay policy)
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Write logs here instead of stderr
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Autoplay: stop after this many attempted moves
    #[arg(long, value_name = "N", default_value_t = 10_000)]
    max_moves: usize,

    /// Autoplay: emit JSON lines instead of text boards
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_toml(path)?,
        None => AppConfig::default(),
    };
    if let Some(size) = cli.size {
        config.game.size = size;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.log_file.is_some() {
        config.log_file = cli.log_file.clone();
    }
    config.game.validate()?;

    let default_filter = match (cli.mode, &config.log_file) {
        (Mode::Interactive, None) => "warn",
        _ => "info",
    };
    logging::init(config.log_file.as_deref(), default_filter)?;

    match cli.mode {
        Mode::Interactive => run_interactive(&config),
        Mode::Autoplay => run_autoplay(&config, cli.max_moves, cli.json),
    }
}

fn spawn_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn run_interactive(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let terminal = setup_terminal()?;
    let result = play_interactive(config, terminal);
    cleanup_terminal()?;

    let score = result?;
    println!("Final score: {}", score);
    Ok(())
}

fn play_interactive(
    config: &AppConfig,
    terminal: ratatui::Terminal<ratatui::backend::CrosstermBackend<io::Stdout>>,
) -> Result<u64, Box<dyn std::error::Error>> {
    let actuator = ConsoleActuator::new(terminal);
    let mut game = GameManager::new(config.game, spawn_rng(config.seed), actuator)?;
    let mut input = InputManager::new(config.interface.swipe_threshold);

    loop {
        match input.poll()? {
            ConsoleInput::Quit => break,
            ConsoleInput::UserAction(action) => {
                game.handle_action(action);
            }
            ConsoleInput::Timeout | ConsoleInput::Unknown => {
                // No input, continue polling
            }
        }
    }

    Ok(game.score())
}

fn run_autoplay(config: &AppConfig, max_moves: usize, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        autoplay(config.game, config.seed, max_moves, JsonLinesActuator::new(io::stdout().lock()))
    } else {
        autoplay(config.game, config.seed, max_moves, TextActuator::new(io::stdout().lock()))
    }
}

fn autoplay<A: Actuator>(
    settings: GameSettings,
    seed: Option<u64>,
    max_moves: usize,
    actuator: A,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut policy_rng = spawn_rng(seed.map(|seed| seed.wrapping_add(1)));
    let mut game = GameManager::new(settings, spawn_rng(seed), actuator)?;

    let mut attempts = 0;
    let mut moves = 0;
    while !game.is_end() && attempts < max_moves {
        let Some(&direction) = Direction::ALL.choose(&mut policy_rng) else {
            break;
        };
        attempts += 1;
        if game.handle_move(direction) {
            moves += 1;
        }
    }

    let outcome = if game.is_won() {
        "won"
    } else if game.is_over() {
        "lost"
    } else {
        "stopped"
    };
    info!(
        "autoplay {} after {} moves ({} attempts): score {}, highest tile {}",
        outcome,
        moves,
        attempts,
        game.score(),
        game.grid().highest_value().unwrap_or(0)
    );
    eprintln!("{}", render_grid_to_string(game.grid()));
    eprintln!("{} | score {} | {} moves", outcome, game.score(), moves);
    Ok(())
}
