//! HEX CLASH CLI - Command-line interface
//!
//! Commands:
//! - play: Play a single AI vs AI game and show the board
//! - match: Play many games between two AI configurations
//! - league: Climb the rival ladder with saved progress

mod args;
mod league_cmd;
mod match_cmd;
mod play;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hexclash")]
#[command(about = "HEX CLASH territory capture on a hex grid")]
struct Cli {
    /// Random seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single game
    Play(play::PlayArgs),
    /// Play a series of games and report statistics
    Match(match_cmd::MatchArgs),
    /// League ladder: status, challenge the next rival, reset
    League(league_cmd::LeagueArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::run(args, cli.seed),
        Commands::Match(args) => match_cmd::run(args, cli.seed),
        Commands::League(args) => league_cmd::run(args, cli.seed),
    }
}
