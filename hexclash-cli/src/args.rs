//! Argument groups shared by several commands
//!
//! Level 4 - Configuration

use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use hexclash_core::{AiConfig, GameConfig, Playstyle};

/// Board size and pacing
#[derive(Args, Clone, Debug)]
pub struct BoardArgs {
    /// Active radius at the start of the game
    #[arg(long, default_value = "3")]
    pub radius: i32,

    /// Radius the board grows to
    #[arg(long, default_value = "5")]
    pub max_radius: i32,

    /// Grow the board every N rounds (0 = never)
    #[arg(long, default_value = "4")]
    pub grow_every: u32,

    /// Pieces offered to each side
    #[arg(long, default_value = "3")]
    pub offer: usize,

    /// Maximum rounds per game
    #[arg(long, default_value = "30")]
    pub max_rounds: u32,
}

impl BoardArgs {
    pub fn game_config(&self, seed: u64) -> GameConfig {
        GameConfig {
            start_radius: self.radius,
            max_radius: self.max_radius.max(self.radius),
            grow_every: self.grow_every,
            offer_size: self.offer.max(1),
            max_rounds: self.max_rounds,
            seed: Some(seed),
        }
    }
}

/// The AI standing in for the human player
#[derive(Args, Clone, Debug)]
pub struct PlayerArgs {
    /// Player-side AI difficulty (1-5)
    #[arg(long, default_value = "3")]
    pub player_difficulty: u8,

    /// Player-side AI playstyle (aggressive, defensive, sneaky)
    #[arg(long, default_value = "aggressive")]
    pub player_style: Playstyle,

    /// Cap on scored candidate moves per turn
    #[arg(long)]
    pub move_budget: Option<usize>,
}

impl PlayerArgs {
    pub fn ai_config(&self, seed: u64) -> AiConfig {
        with_budget(
            AiConfig::new(self.player_difficulty, self.player_style).with_seed(seed),
            self.move_budget,
        )
    }
}

/// The computer opponent
#[derive(Args, Clone, Debug)]
pub struct OpponentArgs {
    /// Opponent difficulty (1-5)
    #[arg(long, default_value = "3")]
    pub ai_difficulty: u8,

    /// Opponent playstyle (aggressive, defensive, sneaky)
    #[arg(long, default_value = "defensive")]
    pub ai_style: Playstyle,
}

impl OpponentArgs {
    pub fn ai_config(&self, seed: u64, move_budget: Option<usize>) -> AiConfig {
        with_budget(
            AiConfig::new(self.ai_difficulty, self.ai_style).with_seed(seed),
            move_budget,
        )
    }
}

pub fn with_budget(config: AiConfig, move_budget: Option<usize>) -> AiConfig {
    match move_budget {
        Some(budget) => config.with_move_budget(budget),
        None => config,
    }
}

// ============================================================================
// SEEDS
// ============================================================================

/// Seeds for one game: board, player AI, opponent AI
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameSeeds {
    pub board: u64,
    pub player: u64,
    pub opponent: u64,
}

impl GameSeeds {
    pub fn derive(base: u64) -> Self {
        Self {
            board: base,
            player: base.wrapping_mul(0x9E37_79B9_7F4A_7C15).wrapping_add(1),
            opponent: base.wrapping_mul(0xC2B2_AE3D_27D4_EB4F).wrapping_add(2),
        }
    }
}

/// Create RNG from seed or random
pub fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}
