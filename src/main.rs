//! Tengen: a small Go-variant rules engine.
//!
//! ## Usage
//!
//! - `tengen` - Show a demo game
//! - `tengen console` - Start the text command console for scripts/GUIs
//! - `tengen demo` - Run the demo game

use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

use tengen::console::{str_coord, Console};
use tengen::constants::{DEFAULT_SIZE, KOMI};
use tengen::game::{ConfigError, Game, GameConfig, Play};
use tengen::opponent::{self, Opponent};
use tengen::score;

/// Tengen: a small Go-variant rules engine
#[derive(Parser)]
#[command(name = "tengen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the text command console
    Console {
        /// Board side length
        #[arg(long, default_value_t = DEFAULT_SIZE)]
        size: usize,
        /// Opponent identity (none, passive, erratic, tactician)
        #[arg(long, default_value = "none")]
        opponent: String,
        /// Komi granted to White
        #[arg(long, default_value_t = KOMI)]
        komi: f32,
        /// Skill modifier applied to cheat attempts
        #[arg(long, default_value_t = 0.5)]
        skill: f64,
        /// Seed for deterministic play
        #[arg(long)]
        seed: Option<u64>,
        /// Log opponent deliberation to stderr
        #[arg(long)]
        verbose: bool,
    },
    /// Run a short demo game
    Demo,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Console {
            size,
            opponent,
            komi,
            skill,
            seed,
            verbose,
        }) => {
            if let Some(seed) = seed {
                fastrand::seed(seed);
            }
            let opponent = Opponent::parse(&opponent)
                .ok_or_else(|| ConfigError::UnknownOpponent(opponent.clone()))?;
            let game = Game::new(GameConfig {
                size,
                opponent,
                komi,
                ..GameConfig::default()
            })?;
            let mut console = Console::new(game);
            console.set_skill(skill);
            console.set_verbose(verbose);
            console.run()
        }
        Some(Commands::Demo) | None => run_demo(),
    }
}

fn run_demo() -> Result<()> {
    let mut game = Game::new(GameConfig {
        size: 9,
        opponent: Opponent::Tactician,
        ..GameConfig::default()
    })?;
    let size = game.board().size();
    println!("Tengen demo: Black opens against the {} opponent\n", game.opponent());

    for &(x, y) in &[(4, 4), (2, 2), (6, 6), (2, 6)] {
        if !game.play(x, y).is_valid() {
            break;
        }
        println!("black plays {}", str_coord((x, y), size));
        let pending = opponent::think_with_delay(&game, Duration::from_millis(100));
        match game.resolve_opponent(pending) {
            Some(Play::Move(mx, my)) => println!("white answers {}", str_coord((mx, my), size)),
            Some(Play::Pass) => println!("white passes"),
            Some(Play::GameOver) | None => break,
        }
    }

    println!("\n{}", game.board());
    let sheet = score::score(&game);
    println!(
        "score so far: black {:.1} - white {:.1}",
        sheet.black.total(),
        sheet.white.total()
    );
    Ok(())
}
