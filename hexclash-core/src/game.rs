//! Game state and turn flow

use crate::board::Hex;
use crate::grid::{Board, Capture, Owner, Side};
use crate::pieces::{get_shape, valid_placements, PieceBag, Placement, ShapeId};
use serde::{Deserialize, Serialize};

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("no piece offered in slot {0}")]
    NotOffered(usize),

    #[error("cell {0} is off the board")]
    OutOfBounds(Hex),

    #[error("cell {0} is already taken")]
    Occupied(Hex),

    #[error("the game is over")]
    GameOver,
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Board size, growth and pacing for one game
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Active radius at round 0
    pub start_radius: i32,
    /// Radius the board grows to, at most
    pub max_radius: i32,
    /// Grow the active radius by one every this many rounds (0 = never)
    pub grow_every: u32,
    /// Pieces offered to each side
    pub offer_size: usize,
    /// Rounds before the game is scored regardless of board state
    pub max_rounds: u32,
    /// Seed for piece offers (None = random)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            start_radius: 3,
            max_radius: 5,
            grow_every: 4,
            offer_size: 3,
            max_rounds: 30,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Fixed-size board
    pub fn fixed(radius: i32) -> Self {
        Self {
            start_radius: radius,
            max_radius: radius,
            grow_every: 0,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }
}

// ============================================================================
// CORE TYPES
// ============================================================================

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    PlayerWins,
    AiWins,
    Draw,
}

impl GameResult {
    pub fn winner(self) -> Option<Side> {
        match self {
            GameResult::PlayerWins => Some(Side::Player),
            GameResult::AiWins => Some(Side::Ai),
            GameResult::Ongoing | GameResult::Draw => None,
        }
    }
}

/// What happened on a placement, for sound/particle hooks and logs
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub side: Side,
    pub placement: Placement,
    pub placed: Vec<Hex>,
    pub captures: Vec<Capture>,
    /// New active radius if the board grew after this move
    pub grown_to: Option<i32>,
}

impl MoveOutcome {
    pub fn captured_cells(&self) -> usize {
        self.captures.iter().map(|c| c.size).sum()
    }
}

// ============================================================================
// GAME STATE
// ============================================================================

/// One game between the player and the AI. The player moves first.
#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    active_radius: i32,
    config: GameConfig,
    bag: PieceBag,
    player_offer: Vec<ShapeId>,
    ai_offer: Vec<ShapeId>,
    current: Side,
    /// Consecutive passes
    passes: u8,
    /// Round number (increments after the AI's turn)
    pub round: u32,
    result: GameResult,
}

impl GameState {
    pub fn new(config: GameConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut bag = PieceBag::new(seed);
        let player_offer = bag.offer(config.offer_size);
        let ai_offer = bag.offer(config.offer_size);
        let start_radius = config.start_radius.min(config.max_radius).max(0);

        Self {
            board: Board::generate(start_radius),
            active_radius: start_radius,
            config,
            bag,
            player_offer,
            ai_offer,
            current: Side::Player,
            passes: 0,
            round: 0,
            result: GameResult::Ongoing,
        }
    }

    /// Replace both offers, e.g. to replay a recorded game
    pub fn with_offers(mut self, player: Vec<ShapeId>, ai: Vec<ShapeId>) -> Self {
        self.player_offer = player;
        self.ai_offer = ai;
        self
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active_radius(&self) -> i32 {
        self.active_radius
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn current_side(&self) -> Side {
        self.current
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    pub fn offer(&self, side: Side) -> &[ShapeId] {
        match side {
            Side::Player => &self.player_offer,
            Side::Ai => &self.ai_offer,
        }
    }

    pub fn score(&self, side: Side) -> usize {
        self.board.count(side.owner())
    }

    /// Can `side` place any of its offered pieces?
    pub fn has_legal_move(&self, side: Side) -> bool {
        self.offer(side)
            .iter()
            .any(|&shape| !valid_placements(&self.board, shape, self.active_radius).is_empty())
    }

    // ========================================================================
    // MOVES
    // ========================================================================

    /// Place the offered piece in `slot` for the side to move.
    ///
    /// Captures are computed on the board after placement and flipped in one
    /// step; the used slot is refilled from the bag.
    pub fn place(
        &mut self,
        slot: usize,
        rotation: u8,
        anchor: Hex,
    ) -> Result<MoveOutcome, GameError> {
        if self.result != GameResult::Ongoing {
            return Err(GameError::GameOver);
        }
        let side = self.current;
        let shape = *self.offer(side).get(slot).ok_or(GameError::NotOffered(slot))?;

        let placement = Placement::new(shape, rotation, anchor);
        placement.validate(&self.board, self.active_radius)?;

        let placed = placement.cells();
        for &hex in &placed {
            self.board.set(hex, side.owner());
        }

        let captures = self.board.find_captures(self.active_radius, side);
        self.board.execute_captures(&captures, side.owner());

        tracing::debug!(
            "{:?} placed {} at {} (rot {}), captured {} group(s)",
            side,
            get_shape(shape).name,
            anchor,
            placement.rotation,
            captures.len()
        );

        let next = self.bag.draw();
        match side {
            Side::Player => self.player_offer[slot] = next,
            Side::Ai => self.ai_offer[slot] = next,
        }

        self.passes = 0;
        let grown_to = self.end_turn();

        Ok(MoveOutcome {
            side,
            placement,
            placed,
            captures,
            grown_to,
        })
    }

    /// Skip the turn. Two passes in a row end the game.
    pub fn pass(&mut self) -> Result<(), GameError> {
        if self.result != GameResult::Ongoing {
            return Err(GameError::GameOver);
        }
        tracing::debug!("{:?} passes", self.current);
        self.passes += 1;
        self.end_turn();
        Ok(())
    }

    fn end_turn(&mut self) -> Option<i32> {
        let mut grown_to = None;
        if self.current == Side::Ai {
            self.round += 1;
            grown_to = self.maybe_grow();
        }
        self.current = self.current.opponent();
        self.check_game_end();
        grown_to
    }

    fn maybe_grow(&mut self) -> Option<i32> {
        let every = self.config.grow_every;
        if every == 0 || self.round % every != 0 || self.active_radius >= self.config.max_radius {
            return None;
        }
        self.active_radius += 1;
        self.board.expand_to(self.active_radius);
        tracing::debug!("Board grew to radius {}", self.active_radius);
        Some(self.active_radius)
    }

    fn check_game_end(&mut self) {
        let board_full = self.active_radius >= self.config.max_radius
            && self.board.empty_cells(self.active_radius).is_empty();

        if self.passes >= 2 || self.round >= self.config.max_rounds || board_full {
            self.result = self.tally();
        }
    }

    fn tally(&self) -> GameResult {
        let player = self.score(Side::Player);
        let ai = self.score(Side::Ai);
        match player.cmp(&ai) {
            std::cmp::Ordering::Greater => GameResult::PlayerWins,
            std::cmp::Ordering::Less => GameResult::AiWins,
            std::cmp::Ordering::Equal => GameResult::Draw,
        }
    }

    // ========================================================================
    // DISPLAY
    // ========================================================================

    /// Text view of the board: `X` player, `O` AI, `.` empty
    pub fn render_ascii(&self) -> String {
        let radius = self.board.radius();
        let mut out = String::new();
        for r in -radius..=radius {
            out.push_str(&" ".repeat(r.unsigned_abs() as usize));
            let q_min = (-radius).max(-r - radius);
            let q_max = radius.min(-r + radius);
            let row: Vec<&str> = (q_min..=q_max)
                .map(|q| {
                    let hex = Hex::new(q, r);
                    match self.board.get(hex) {
                        Some(_) if !hex.within(self.active_radius) => " ",
                        Some(Owner::Player) => "X",
                        Some(Owner::Ai) => "O",
                        _ => ".",
                    }
                })
                .collect();
            out.push_str(&row.join(" "));
            out.push('\n');
        }
        out
    }
}

// ============================================================================
// TESTS
// ============================================================================
