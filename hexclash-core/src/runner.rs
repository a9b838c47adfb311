//! Game runner - plays complete AI vs AI games

use crate::ai::{AiConfig, HexAi};
use crate::game::{GameConfig, GameError, GameResult, GameState, MoveOutcome};
use crate::grid::Side;
use serde::{Deserialize, Serialize};

/// Outcome of a single game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub result: GameResult,
    /// Number of completed rounds
    pub rounds: u32,
    pub player_score: usize,
    pub ai_score: usize,
    pub placements: usize,
    pub passes: usize,
    /// Cells flipped by captures, both sides
    pub captured: usize,
}

impl GameOutcome {
    pub fn winner(&self) -> Option<Side> {
        self.result.winner()
    }

    pub fn is_draw(&self) -> bool {
        self.result == GameResult::Draw
    }
}

/// Plays one AI for each side
pub struct GameRunner {
    player: HexAi,
    ai: HexAi,
}

impl GameRunner {
    pub fn new(player: AiConfig, ai: AiConfig) -> Self {
        Self {
            player: HexAi::new(player),
            ai: HexAi::new(ai),
        }
    }

    /// Play a fresh game to the end
    pub fn play(&mut self, config: GameConfig) -> Result<GameOutcome, GameError> {
        self.play_with(GameState::new(config), |_, _| {})
    }

    /// Play to the end, calling `on_turn` after every turn (`None` = pass)
    pub fn play_with<F>(
        &mut self,
        mut state: GameState,
        mut on_turn: F,
    ) -> Result<GameOutcome, GameError>
    where
        F: FnMut(&GameState, Option<&MoveOutcome>),
    {
        let mut placements = 0;
        let mut passes = 0;
        let mut captured = 0;

        while state.result() == GameResult::Ongoing {
            let mover = match state.current_side() {
                Side::Player => &mut self.player,
                Side::Ai => &mut self.ai,
            };
            let outcome = mover.play_turn(&mut state)?;
            match &outcome {
                Some(o) => {
                    placements += 1;
                    captured += o.captured_cells();
                }
                None => passes += 1,
            }
            on_turn(&state, outcome.as_ref());
        }

        Ok(GameOutcome {
            result: state.result(),
            rounds: state.round,
            player_score: state.score(Side::Player),
            ai_score: state.score(Side::Ai),
            placements,
            passes,
            captured,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::Playstyle;

    #[test]
    fn test_play_small_game() {
        let mut runner = GameRunner::new(
            AiConfig::new(3, Playstyle::Aggressive).with_seed(1),
            AiConfig::new(3, Playstyle::Sneaky).with_seed(2),
        );
        let outcome = runner.play(GameConfig::fixed(2).with_seed(3)).unwrap();
        assert_ne!(outcome.result, GameResult::Ongoing);
        assert!(outcome.placements > 0);
        assert!(outcome.player_score + outcome.ai_score <= 19);

        let expected = match outcome.player_score.cmp(&outcome.ai_score) {
            std::cmp::Ordering::Greater => GameResult::PlayerWins,
            std::cmp::Ordering::Less => GameResult::AiWins,
            std::cmp::Ordering::Equal => GameResult::Draw,
        };
        assert_eq!(outcome.result, expected);
    }

    #[test]
    fn test_observer_sees_every_turn() {
        let mut runner = GameRunner::new(
            AiConfig::new(2, Playstyle::Defensive).with_seed(4),
            AiConfig::new(2, Playstyle::Defensive).with_seed(5),
        );
        let mut turns = 0;
        let outcome = runner
            .play_with(GameState::new(GameConfig::fixed(2).with_seed(6)), |_, _| turns += 1)
            .unwrap();
        assert_eq!(turns, outcome.placements + outcome.passes);
    }

    #[test]
    fn test_seeded_games_repeat() {
        let play = || {
            GameRunner::new(
                AiConfig::new(4, Playstyle::Sneaky).with_seed(10),
                AiConfig::new(2, Playstyle::Aggressive).with_seed(11),
            )
            .play(GameConfig::fixed(2).with_seed(12))
            .unwrap()
        };
        assert_eq!(play(), play());
    }
}
