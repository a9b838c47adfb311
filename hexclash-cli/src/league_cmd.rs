//! League command - climb the rival ladder with saved progress
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: show_status(), challenge(), reset()
//! - Level 3: record_result(), save_progress()
//! - Level 4: formatting

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use hexclash_core::{
    Advancement, FileStore, GameOutcome, GameResult, GameRunner, KeyValueStore, Progress, LEAGUES,
};

use crate::args::{with_budget, BoardArgs, GameSeeds, PlayerArgs};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct LeagueArgs {
    /// Directory holding saved progress
    #[arg(long, default_value = ".hexclash")]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: LeagueCommand,
}

#[derive(Subcommand)]
pub enum LeagueCommand {
    /// Show the current league, rival and record
    Status,
    /// Play the current rival and record the result
    Challenge(ChallengeArgs),
    /// Forget all progress
    Reset,
}

#[derive(Args)]
pub struct ChallengeArgs {
    #[command(flatten)]
    pub board: BoardArgs,

    #[command(flatten)]
    pub player: PlayerArgs,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run league command
pub fn run(args: LeagueArgs, seed: Option<u64>) -> Result<()> {
    let mut store = FileStore::new(args.data_dir.clone());

    match args.command {
        LeagueCommand::Status => show_status(&store),
        LeagueCommand::Challenge(challenge_args) => challenge(&mut store, &challenge_args, seed),
        LeagueCommand::Reset => reset(&mut store),
    }
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn show_status(store: &impl KeyValueStore) -> Result<()> {
    let progress = Progress::load_or_default(store);
    println!("{}", format_status(&progress));
    Ok(())
}

fn challenge(
    store: &mut impl KeyValueStore,
    args: &ChallengeArgs,
    seed: Option<u64>,
) -> Result<()> {
    let mut progress = Progress::load_or_default(&*store);
    let rival = progress.current_rival();
    let base_seed = seed.unwrap_or_else(rand::random);
    let seeds = GameSeeds::derive(base_seed);

    tracing::info!(
        "{}: challenging {} ({:?}, difficulty {})",
        progress.current_league().name,
        rival.name,
        rival.playstyle,
        rival.difficulty
    );

    let mut runner = GameRunner::new(
        args.player.ai_config(seeds.player),
        with_budget(rival.ai_config().with_seed(seeds.opponent), args.player.move_budget),
    );
    let outcome = runner
        .play(args.board.game_config(seeds.board))
        .context("AI produced an illegal move")?;

    println!(
        "{:?} against {}: {} - {} in {} rounds",
        outcome.result, rival.name, outcome.player_score, outcome.ai_score, outcome.rounds
    );

    if let Some(message) = record_result(&mut progress, &outcome) {
        println!("{}", message);
    }
    save_progress(&progress, store);
    println!("{}", format_status(&progress));
    Ok(())
}

fn reset(store: &mut impl KeyValueStore) -> Result<()> {
    Progress::reset(store).context("Failed to reset progress")?;
    println!("Progress reset");
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Apply a finished game to the ladder. Draws count as losses.
fn record_result(progress: &mut Progress, outcome: &GameOutcome) -> Option<String> {
    if outcome.result != GameResult::PlayerWins {
        progress.record_loss();
        return Some("Rematch next time.".to_string());
    }

    match progress.record_win() {
        Advancement::NextRival => None,
        Advancement::Promoted => Some(format!(
            "Promoted to the {}!",
            progress.current_league().name
        )),
        Advancement::Cycled => Some("Final league cleared, its rivals return.".to_string()),
    }
}

/// Persist progress; a failed write is logged and play goes on
fn save_progress(progress: &Progress, store: &mut impl KeyValueStore) {
    if let Err(e) = progress.save(store) {
        tracing::warn!("Could not save progress: {}", e);
    }
}

// ============================================================================
// LEVEL 4 - FORMATTING
// ============================================================================

fn format_status(progress: &Progress) -> String {
    let league = progress.current_league();
    let rival = progress.current_rival();
    let league_number = progress.league_index.min(LEAGUES.len() - 1) + 1;

    format!(
        "League:  {} ({}/{})\n\
         Rival:   {} ({:?}, difficulty {})\n\
         Record:  {}W {}L this league, {}W of {} games overall",
        league.name,
        league_number,
        LEAGUES.len(),
        rival.name,
        rival.playstyle,
        rival.difficulty,
        progress.wins,
        progress.losses,
        progress.total_wins,
        progress.total_games
    )
}

// ============================================================================
// TESTS
// ============================================================================
