//! Match command - play a series of games between two AI configurations
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_match(), report_results()
//! - Level 3: play_single_game(), compute_match_statistics()
//! - Level 4: formatting utilities

use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use hexclash_core::{GameOutcome, GameResult, GameRunner};

use crate::args::{BoardArgs, GameSeeds, OpponentArgs, PlayerArgs};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    #[command(flatten)]
    pub board: BoardArgs,

    #[command(flatten)]
    pub player: PlayerArgs,

    #[command(flatten)]
    pub opponent: OpponentArgs,

    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Play games one after another instead of in parallel
    #[arg(long)]
    pub sequential: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    seed: u64,
    outcome: GameOutcome,
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    games: Vec<GameRecord>,
    player_wins: usize,
    ai_wins: usize,
    draws: usize,
    avg_rounds: f32,
    avg_captured: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// 1. Play the match (multiple games)
/// 2. Report results
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    let base_seed = seed.unwrap_or_else(rand::random);

    tracing::info!(
        "Starting match: player d{} {:?} vs AI d{} {:?} ({} games, seed {})",
        args.player.player_difficulty,
        args.player.player_style,
        args.opponent.ai_difficulty,
        args.opponent.ai_style,
        args.games,
        base_seed
    );

    let results = play_match(&args, base_seed)?;

    report_results(&results, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games in the match
fn play_match(args: &MatchArgs, base_seed: u64) -> Result<MatchResults> {
    let progress = if args.json {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(args.games as u64)
    };
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} games ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let play = |game_index: usize| -> Result<GameRecord> {
        let seed = base_seed.wrapping_add(game_index as u64);
        let record = play_single_game(args, game_index + 1, seed)?;
        progress.inc(1);
        Ok(record)
    };

    let games: Vec<GameRecord> = if args.sequential {
        (0..args.games).map(play).collect::<Result<_>>()?
    } else {
        (0..args.games).into_par_iter().map(play).collect::<Result<_>>()?
    };
    progress.finish_and_clear();

    for record in &games {
        tracing::debug!(
            "Game {}: {:?} ({} rounds)",
            record.game_number,
            record.outcome.result,
            record.outcome.rounds
        );
    }

    Ok(compute_match_statistics(games))
}

/// Report match results
fn report_results(results: &MatchResults, args: &MatchArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play a single game with seeds derived from `seed`
fn play_single_game(args: &MatchArgs, game_number: usize, seed: u64) -> Result<GameRecord> {
    let seeds = GameSeeds::derive(seed);
    let mut runner = GameRunner::new(
        args.player.ai_config(seeds.player),
        args.opponent.ai_config(seeds.opponent, args.player.move_budget),
    );
    let outcome = runner.play(args.board.game_config(seeds.board))?;

    Ok(GameRecord {
        game_number,
        seed,
        outcome,
    })
}

/// Compute aggregate statistics from game records
fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let count = |result: GameResult| games.iter().filter(|g| g.outcome.result == result).count();
    let player_wins = count(GameResult::PlayerWins);
    let ai_wins = count(GameResult::AiWins);
    let draws = count(GameResult::Draw);

    let (avg_rounds, avg_captured) = if games.is_empty() {
        (0.0, 0.0)
    } else {
        let n = games.len() as f32;
        let rounds: u32 = games.iter().map(|g| g.outcome.rounds).sum();
        let captured: usize = games.iter().map(|g| g.outcome.captured).sum();
        (rounds as f32 / n, captured as f32 / n)
    };

    MatchResults {
        games,
        player_wins,
        ai_wins,
        draws,
        avg_rounds,
        avg_captured,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn percent(part: usize, total: usize) -> f32 {
    if total > 0 {
        part as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

/// Print results as JSON
fn print_json_results(results: &MatchResults) {
    #[derive(serde::Serialize)]
    struct JsonGame<'a> {
        game_number: usize,
        seed: u64,
        #[serde(flatten)]
        outcome: &'a GameOutcome,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        total_games: usize,
        player_wins: usize,
        ai_wins: usize,
        draws: usize,
        avg_rounds: f32,
        avg_captured: f32,
        games: Vec<JsonGame<'a>>,
    }

    let output = JsonOutput {
        total_games: results.games.len(),
        player_wins: results.player_wins,
        ai_wins: results.ai_wins,
        draws: results.draws,
        avg_rounds: results.avg_rounds,
        avg_captured: results.avg_captured,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                seed: g.seed,
                outcome: &g.outcome,
            })
            .collect(),
    };

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::warn!("Failed to encode results: {}", e),
    }
}

/// Print results as text
fn print_text_results(results: &MatchResults) {
    let total = results.games.len();

    println!("\n=== Match Results ===");
    println!("Total games:  {}", total);
    println!("Player wins:  {} ({:.1}%)", results.player_wins, percent(results.player_wins, total));
    println!("AI wins:      {} ({:.1}%)", results.ai_wins, percent(results.ai_wins, total));
    println!("Draws:        {} ({:.1}%)", results.draws, percent(results.draws, total));
    println!("Avg rounds:   {:.1}", results.avg_rounds);
    println!("Avg captured: {:.1}", results.avg_captured);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: {:?} {}-{} in {} rounds (seed {})",
            game.game_number,
            game.outcome.result,
            game.outcome.player_score,
            game.outcome.ai_score,
            game.outcome.rounds,
            game.seed
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(game_number: usize, result: GameResult, rounds: u32, captured: usize) -> GameRecord {
        GameRecord {
            game_number,
            seed: game_number as u64,
            outcome: GameOutcome {
                result,
                rounds,
                player_score: 0,
                ai_score: 0,
                placements: 0,
                passes: 0,
                captured,
            },
        }
    }

    #[test]
    fn test_compute_match_statistics_empty() {
        let results = compute_match_statistics(vec![]);
        assert_eq!(results.player_wins, 0);
        assert_eq!(results.ai_wins, 0);
        assert_eq!(results.draws, 0);
        assert_eq!(results.avg_rounds, 0.0);
    }

    #[test]
    fn test_compute_match_statistics() {
        let games = vec![
            record(1, GameResult::PlayerWins, 10, 2),
            record(2, GameResult::AiWins, 20, 0),
            record(3, GameResult::PlayerWins, 30, 4),
            record(4, GameResult::Draw, 20, 2),
        ];

        let results = compute_match_statistics(games);
        assert_eq!(results.player_wins, 2);
        assert_eq!(results.ai_wins, 1);
        assert_eq!(results.draws, 1);
        assert_eq!(results.avg_rounds, 20.0);
        assert_eq!(results.avg_captured, 2.0);
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(1, 4), 25.0);
        assert_eq!(percent(3, 0), 0.0);
    }
}
