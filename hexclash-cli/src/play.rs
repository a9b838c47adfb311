//! Play command - one AI vs AI game
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_game(), report_game()
//! - Level 3: describe_turn()
//! - Level 4: configuration (args.rs)

use anyhow::{Context, Result};
use clap::Args;

use hexclash_core::{get_shape, GameOutcome, GameRunner, GameState, MoveOutcome, Side};

use crate::args::{BoardArgs, GameSeeds, OpponentArgs, PlayerArgs};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    #[command(flatten)]
    pub board: BoardArgs,

    #[command(flatten)]
    pub player: PlayerArgs,

    #[command(flatten)]
    pub opponent: OpponentArgs,

    /// Print the board after every turn
    #[arg(long)]
    pub show_turns: bool,

    /// Output the final result as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let base_seed = seed.unwrap_or_else(rand::random);
    let seeds = GameSeeds::derive(base_seed);

    tracing::info!(
        "Starting game (seed {}): player d{} {:?} vs AI d{} {:?}",
        base_seed,
        args.player.player_difficulty,
        args.player.player_style,
        args.opponent.ai_difficulty,
        args.opponent.ai_style
    );

    let (final_board, outcome) = play_game(&args, seeds)?;
    report_game(&final_board, &outcome, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn play_game(args: &PlayArgs, seeds: GameSeeds) -> Result<(String, GameOutcome)> {
    let mut runner = GameRunner::new(
        args.player.ai_config(seeds.player),
        args.opponent.ai_config(seeds.opponent, args.player.move_budget),
    );
    let state = GameState::new(args.board.game_config(seeds.board));

    let mut final_board = String::new();
    let outcome = runner
        .play_with(state, |state, turn| {
            if args.show_turns && !args.json {
                println!("{}", describe_turn(state, turn));
                println!("{}", state.render_ascii());
            }
            final_board = state.render_ascii();
        })
        .context("AI produced an illegal move")?;

    Ok((final_board, outcome))
}

fn report_game(final_board: &str, outcome: &GameOutcome, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    println!("\n{}", final_board);
    println!("=== Game Over ===");
    println!("Result:      {:?}", outcome.result);
    println!("Score:       player {} - ai {}", outcome.player_score, outcome.ai_score);
    println!("Rounds:      {}", outcome.rounds);
    println!("Placements:  {} ({} passes)", outcome.placements, outcome.passes);
    println!("Captured:    {} cells", outcome.captured);
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// One-line summary of a turn
fn describe_turn(state: &GameState, turn: Option<&MoveOutcome>) -> String {
    match turn {
        Some(mv) => {
            let mut line = format!(
                "Round {}: {} placed {} at {}",
                state.round,
                side_name(mv.side),
                get_shape(mv.placement.shape).name,
                mv.placement.anchor
            );
            if !mv.captures.is_empty() {
                line.push_str(&format!(", captured {} cells", mv.captured_cells()));
            }
            if let Some(radius) = mv.grown_to {
                line.push_str(&format!(", board grew to radius {}", radius));
            }
            line
        }
        None => format!(
            "Round {}: {} passed",
            state.round,
            side_name(state.current_side().opponent())
        ),
    }
}

fn side_name(side: Side) -> &'static str {
    match side {
        Side::Player => "Player",
        Side::Ai => "AI",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexclash_core::{AiConfig, GameConfig, HexAi};

    #[test]
    fn test_describe_pass() {
        let mut state = GameState::new(GameConfig::default().with_seed(1));
        state.pass().unwrap();
        assert_eq!(describe_turn(&state, None), "Round 0: Player passed");
    }

    #[test]
    fn test_describe_placement() {
        let mut state = GameState::new(GameConfig::default().with_seed(1));
        let mut ai = HexAi::new(AiConfig::default().with_seed(1));
        let outcome = ai.play_turn(&mut state).unwrap().unwrap();
        let line = describe_turn(&state, Some(&outcome));
        assert!(line.starts_with("Round 0: Player placed "));
    }
}
