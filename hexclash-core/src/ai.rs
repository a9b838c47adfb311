//! Computer opponent: exhaustive placement search

use crate::eval::{
    score_placement, Heuristics, Playstyle, Profile, MAX_DIFFICULTY, MIN_DIFFICULTY,
};
use crate::game::{GameError, GameState, MoveOutcome};
use crate::grid::{Board, Side};
use crate::pieces::{valid_placements, Placement, ShapeId};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

// ============================================================================
// CONFIGURATION
// ============================================================================

/// AI configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    /// 1 (random-ish) to 5 (full look-ahead, no noise)
    pub difficulty: u8,
    pub playstyle: Playstyle,
    pub heuristics: Heuristics,
    /// Cap on scored candidates per move (None = score every legal move)
    pub move_budget: Option<usize>,
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            difficulty: 3,
            playstyle: Playstyle::Aggressive,
            heuristics: Heuristics::default(),
            move_budget: None,
            seed: None,
        }
    }
}

impl AiConfig {
    pub fn new(difficulty: u8, playstyle: Playstyle) -> Self {
        Self {
            difficulty: difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY),
            playstyle,
            ..Default::default()
        }
    }

    pub fn with_heuristics(mut self, heuristics: Heuristics) -> Self {
        self.heuristics = heuristics;
        self
    }

    pub fn with_move_budget(mut self, budget: usize) -> Self {
        self.move_budget = Some(budget);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

// ============================================================================
// AI PLAYER
// ============================================================================

/// A chosen move: which offer slot, and where it goes
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AiMove {
    pub slot: usize,
    pub placement: Placement,
    /// Heuristic score (negative infinity for a random fallback pick)
    pub score: f32,
}

pub struct HexAi {
    pub config: AiConfig,
    rng: ChaCha8Rng,
}

impl HexAi {
    pub fn new(config: AiConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { config, rng }
    }

    /// Best placement of any offered piece, or `None` when nothing fits.
    ///
    /// Every offered piece is tried in all 6 rotations at every anchor.
    pub fn choose_move(
        &mut self,
        board: &Board,
        offer: &[ShapeId],
        side: Side,
        active_radius: i32,
    ) -> Option<AiMove> {
        let mut candidates: Vec<(usize, Placement)> = offer
            .iter()
            .enumerate()
            .flat_map(|(slot, &shape)| {
                valid_placements(board, shape, active_radius)
                    .into_iter()
                    .map(move |p| (slot, p))
            })
            .collect();

        if candidates.is_empty() {
            tracing::debug!("{:?} has no legal placement", side);
            return None;
        }

        if let Some(budget) = self.config.move_budget {
            if candidates.len() > budget {
                tracing::debug!(
                    "Move budget {} hit, sampling from {} candidates",
                    budget,
                    candidates.len()
                );
                candidates.shuffle(&mut self.rng);
                candidates.truncate(budget.max(1));
            }
        }

        let profile = Profile {
            side,
            difficulty: self.config.difficulty,
            playstyle: self.config.playstyle,
        };

        let mut best: Option<AiMove> = None;
        for &(slot, placement) in &candidates {
            let noise = self.rng.gen::<f32>();
            let score = score_placement(
                board,
                &placement,
                active_radius,
                &profile,
                &self.config.heuristics,
                noise,
            );
            if best.map_or(score.is_finite(), |b| score > b.score) {
                best = Some(AiMove {
                    slot,
                    placement,
                    score,
                });
            }
        }

        best.or_else(|| {
            tracing::debug!("No scored move, picking a random legal placement");
            candidates.choose(&mut self.rng).map(|&(slot, placement)| AiMove {
                slot,
                placement,
                score: f32::NEG_INFINITY,
            })
        })
    }

    /// Play the side to move. Passes when no piece fits, returning `None`.
    pub fn play_turn(&mut self, state: &mut GameState) -> Result<Option<MoveOutcome>, GameError> {
        let side = state.current_side();
        let choice = self.choose_move(
            state.board(),
            state.offer(side),
            side,
            state.active_radius(),
        );

        match choice {
            Some(mv) => {
                let outcome =
                    state.place(mv.slot, mv.placement.rotation, mv.placement.anchor)?;
                Ok(Some(outcome))
            }
            None => {
                state.pass()?;
                Ok(None)
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
