//! HEX CLASH Core - Territory capture engine and AI
//!
//! This crate provides the core game logic for HEX CLASH:
//! - Board geometry (hex grid with axial coordinates, pixel layout)
//! - Cell ownership, flood-fill groups and surround captures
//! - Piece shapes, rotations and placement
//! - Game state and turn flow with a growing board
//! - Heuristic AI with difficulty levels and playstyles
//! - AI vs AI game runner
//! - League ladder with persisted progress

pub mod ai;
pub mod board;
pub mod eval;
pub mod game;
pub mod grid;
pub mod league;
pub mod pieces;
pub mod runner;
pub mod store;

// Re-exports for convenient access
pub use ai::{AiConfig, AiMove, HexAi};
pub use board::{hex_round, spiral, Hex, Layout, DIRECTIONS};
pub use eval::{score_placement, Heuristics, Playstyle, Profile};
pub use game::{GameConfig, GameError, GameResult, GameState, MoveOutcome};
pub use grid::{Board, Capture, Owner, Side};
pub use league::{Advancement, League, Progress, ProgressError, Rival, LEAGUES};
pub use pieces::{
    get_shape, shape_id_to_index, valid_placements, PieceBag, PieceShape, Placement, ShapeId,
    PIECE_SHAPES,
};
pub use runner::{GameOutcome, GameRunner};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
