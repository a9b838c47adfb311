//! Placement scoring

use crate::board::Hex;
use crate::grid::{Board, Owner, Side};
use crate::pieces::Placement;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Lowest and highest AI difficulty
pub const MIN_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 5;

/// AI heuristic weighting profile
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Playstyle {
    Aggressive,
    Defensive,
    Sneaky,
}

impl std::str::FromStr for Playstyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "aggressive" => Ok(Playstyle::Aggressive),
            "defensive" => Ok(Playstyle::Defensive),
            "sneaky" => Ok(Playstyle::Sneaky),
            other => Err(format!("unknown playstyle: {other}")),
        }
    }
}

/// Heuristic weights for placement scoring
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Heuristics {
    /// Per placed cell, times (active radius - distance from center)
    pub center_weight: f32,
    /// Per cell captured by the placement
    pub capture_weight: f32,
    /// Per cell captured by a follow-up capture on the flipped board
    pub chain_weight: f32,
    /// Per nearly-surrounded placed cell (difficulty 5)
    pub vulnerability_weight: f32,
    /// Scale of the random term, times (5 - difficulty)
    pub noise_weight: f32,
    pub aggressive_adjacency: f32,
    pub aggressive_capture_bonus: f32,
    pub defensive_adjacency: f32,
    pub defensive_vulnerability: f32,
    pub sneaky_empty_adjacency: f32,
    pub sneaky_near_surround: f32,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            center_weight: 0.5,
            capture_weight: 10.0,
            chain_weight: 15.0,
            vulnerability_weight: 5.0,
            noise_weight: 3.0,
            aggressive_adjacency: 3.0,
            aggressive_capture_bonus: 5.0,
            defensive_adjacency: 3.0,
            defensive_vulnerability: 4.0,
            sneaky_empty_adjacency: 1.0,
            sneaky_near_surround: 6.0,
        }
    }
}

/// Who is scoring and how hard it tries
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub side: Side,
    pub difficulty: u8,
    pub playstyle: Playstyle,
}

/// Score one placement.
///
/// Terms are additive and gated by difficulty: lower levels stop early with
/// a coarser score. `noise` is a sample from [0, 1); its weight shrinks to
/// zero at the top difficulty.
pub fn score_placement(
    board: &Board,
    placement: &Placement,
    active_radius: i32,
    profile: &Profile,
    heuristics: &Heuristics,
    noise: f32,
) -> f32 {
    let difficulty = profile.difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY);
    let cells = placement.cells();
    let me = profile.side.owner();
    let enemy = profile.side.opponent().owner();

    let mut score = cells.len() as f32
        + noise * f32::from(MAX_DIFFICULTY - difficulty) * heuristics.noise_weight;
    if difficulty <= 1 {
        return score;
    }

    // Level 2: prefer the middle of the board
    for hex in &cells {
        score += (active_radius - hex.distance_to_center()) as f32 * heuristics.center_weight;
    }
    if difficulty <= 2 {
        return score;
    }

    // Level 3: simulate and count captures
    let mut sim = board.clone();
    for &hex in &cells {
        sim.set(hex, me);
    }
    let captures = sim.find_captures(active_radius, profile.side);
    let captured: usize = captures.iter().map(|c| c.size).sum();
    score += captured as f32 * heuristics.capture_weight;

    match profile.playstyle {
        Playstyle::Aggressive => {
            score += adjacent_cells(&sim, &cells, enemy, active_radius) as f32
                * heuristics.aggressive_adjacency;
            score += captured as f32 * heuristics.aggressive_capture_bonus;
        }
        Playstyle::Defensive => {
            score += adjacent_cells(&sim, &cells, me, active_radius) as f32
                * heuristics.defensive_adjacency;
        }
        Playstyle::Sneaky => {
            score += adjacent_cells(&sim, &cells, Owner::Empty, active_radius) as f32
                * heuristics.sneaky_empty_adjacency;
            score += near_surrounded_groups(&sim, enemy, active_radius) as f32
                * heuristics.sneaky_near_surround;
        }
    }
    if difficulty <= 3 {
        return score;
    }

    // Level 4: flip the captures and look for follow-up captures
    sim.execute_captures(&captures, me);
    for chained in sim.find_captures(active_radius, profile.side) {
        score += chained.size as f32 * heuristics.chain_weight;
    }

    let vulnerable = vulnerability(&sim, &cells, active_radius) as f32;
    if profile.playstyle == Playstyle::Defensive {
        score -= vulnerable * heuristics.defensive_vulnerability;
    }

    // Level 5: avoid leaving the new piece nearly boxed in
    if difficulty >= 5 {
        score -= vulnerable * heuristics.vulnerability_weight;
    }

    score
}

/// Distinct active cells next to `cells` (but not part of them) held by `owner`
pub fn adjacent_cells(board: &Board, cells: &[Hex], owner: Owner, active_radius: i32) -> usize {
    let mut seen: FxHashSet<Hex> = FxHashSet::default();
    for hex in cells {
        for n in hex.neighbors() {
            if !cells.contains(&n)
                && board.is_active(n, active_radius)
                && board.get(n) == Some(owner)
            {
                seen.insert(n);
            }
        }
    }
    seen.len()
}

/// Placed cells with at most one empty neighbor
pub fn vulnerability(board: &Board, cells: &[Hex], active_radius: i32) -> usize {
    cells
        .iter()
        .filter(|hex| {
            let empty = hex
                .neighbors()
                .iter()
                .filter(|n| {
                    board.is_active(**n, active_radius) && board.get(**n) == Some(Owner::Empty)
                })
                .count();
            empty <= 1
        })
        .count()
}

/// Groups of `owner` left with exactly one way out
pub fn near_surrounded_groups(board: &Board, owner: Owner, active_radius: i32) -> usize {
    let mut checked: FxHashSet<Hex> = FxHashSet::default();
    let mut count = 0;

    for (hex, cell) in board.cells() {
        if cell != owner || checked.contains(&hex) || !hex.within(active_radius) {
            continue;
        }
        let group = board.flood_fill(hex, owner);
        checked.extend(group.iter().copied());
        if board.liberties(&group, active_radius).len() == 1 {
            count += 1;
        }
    }

    count
}
