//! Cell ownership, group detection and captures

use crate::board::{spiral, Hex};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Who holds a cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    #[default]
    Empty = 0,
    Player = 1,
    Ai = 2,
}

impl Owner {
    /// The side holding this cell, if any
    pub fn side(self) -> Option<Side> {
        match self {
            Owner::Empty => None,
            Owner::Player => Some(Side::Player),
            Owner::Ai => Some(Side::Ai),
        }
    }

    /// Owner of the other side (Empty stays Empty)
    pub fn opponent(self) -> Owner {
        match self {
            Owner::Empty => Owner::Empty,
            Owner::Player => Owner::Ai,
            Owner::Ai => Owner::Player,
        }
    }
}

/// One of the two competing sides
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Ai,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Ai,
            Side::Ai => Side::Player,
        }
    }

    pub fn owner(self) -> Owner {
        match self {
            Side::Player => Owner::Player,
            Side::Ai => Owner::Ai,
        }
    }
}

/// A fully surrounded group
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capture {
    /// Member cells, sorted
    pub cells: Vec<Hex>,
    /// Owner of the group before the capture
    pub owner: Owner,
    pub size: usize,
}

impl Capture {
    fn from_group(group: FxHashSet<Hex>, owner: Owner) -> Self {
        let mut cells: Vec<Hex> = group.into_iter().collect();
        cells.sort();
        let size = cells.len();
        Self { cells, owner, size }
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// Board: hex -> owner, one entry per hex within `radius`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: FxHashMap<Hex, Owner>,
    /// Scan order (spiral from the center)
    order: Vec<Hex>,
    radius: i32,
}

impl Board {
    /// Create an all-empty board with every hex up to `radius`
    pub fn generate(radius: i32) -> Self {
        let order = spiral(radius);
        let cells = order.iter().map(|&hex| (hex, Owner::Empty)).collect();
        Self { cells, order, radius }
    }

    /// Grow the board, adding empty cells and keeping existing owners
    pub fn expand_to(&mut self, radius: i32) {
        if radius <= self.radius {
            return;
        }
        for hex in spiral(radius) {
            if !self.cells.contains_key(&hex) {
                self.cells.insert(hex, Owner::Empty);
                self.order.push(hex);
            }
        }
        self.radius = radius;
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Owner of a cell, `None` when the hex is not on the board
    pub fn get(&self, hex: Hex) -> Option<Owner> {
        self.cells.get(&hex).copied()
    }

    /// Set the owner of an existing cell; hexes off the board are ignored
    pub fn set(&mut self, hex: Hex, owner: Owner) {
        if let Some(cell) = self.cells.get_mut(&hex) {
            *cell = owner;
        }
    }

    /// Cells in scan order
    pub fn cells(&self) -> impl Iterator<Item = (Hex, Owner)> + '_ {
        self.order.iter().map(move |hex| (*hex, self.cells[hex]))
    }

    /// Is this hex part of the playable area?
    pub fn is_active(&self, hex: Hex, active_radius: i32) -> bool {
        self.cells.contains_key(&hex) && hex.within(active_radius)
    }

    pub fn count(&self, owner: Owner) -> usize {
        self.cells.values().filter(|&&o| o == owner).count()
    }

    /// Empty cells inside the active radius, in scan order
    pub fn empty_cells(&self, active_radius: i32) -> Vec<Hex> {
        self.cells()
            .filter(|&(hex, owner)| owner == Owner::Empty && hex.within(active_radius))
            .map(|(hex, _)| hex)
            .collect()
    }

    // ========================================================================
    // GROUPS
    // ========================================================================

    /// Collect every cell connected to `start` through cells owned by `owner`
    pub fn flood_fill(&self, start: Hex, owner: Owner) -> FxHashSet<Hex> {
        let mut visited = FxHashSet::default();
        let mut stack = vec![start];

        while let Some(hex) = stack.pop() {
            if visited.contains(&hex) || self.get(hex) != Some(owner) {
                continue;
            }
            visited.insert(hex);
            for n in hex.neighbors() {
                if !visited.contains(&n) {
                    stack.push(n);
                }
            }
        }

        visited
    }

    /// Neighbors of a group that let it breathe: on the active board and
    /// not held by the opponent of the group's owner
    pub fn liberties(&self, group: &FxHashSet<Hex>, active_radius: i32) -> FxHashSet<Hex> {
        let mut escapes = FxHashSet::default();
        let Some(owner) = group.iter().next().and_then(|&h| self.get(h)) else {
            return escapes;
        };
        let enemy = owner.opponent();

        for hex in group {
            for n in hex.neighbors() {
                if group.contains(&n) || !self.is_active(n, active_radius) {
                    continue;
                }
                if self.get(n) != Some(enemy) {
                    escapes.insert(n);
                }
            }
        }

        escapes
    }

    /// True iff every non-member neighbor is off the active board or held by
    /// the opponent. An empty neighbor, or a same-owner cell outside the
    /// group, is an escape route.
    pub fn is_group_surrounded(&self, group: &FxHashSet<Hex>, active_radius: i32) -> bool {
        let Some(owner) = group.iter().next().and_then(|&h| self.get(h)) else {
            return false;
        };
        let enemy = owner.opponent();

        group.iter().all(|hex| {
            hex.neighbors().iter().all(|n| {
                group.contains(n)
                    || !self.is_active(*n, active_radius)
                    || self.get(*n) == Some(enemy)
            })
        })
    }

    /// Find every opponent group that `placer` has surrounded.
    ///
    /// Each cell is flood-filled at most once per call.
    pub fn find_captures(&self, active_radius: i32, placer: Side) -> Vec<Capture> {
        let target = placer.opponent().owner();
        let mut checked: FxHashSet<Hex> = FxHashSet::default();
        let mut captures = Vec::new();

        for (hex, owner) in self.cells() {
            if owner != target || checked.contains(&hex) || !hex.within(active_radius) {
                continue;
            }
            let group = self.flood_fill(hex, target);
            checked.extend(group.iter().copied());

            if self.is_group_surrounded(&group, active_radius) {
                captures.push(Capture::from_group(group, target));
            }
        }

        captures
    }

    /// Flip every captured cell to `new_owner`.
    ///
    /// Captures must all be computed before calling this; they are judged
    /// against the board as it was before any flip.
    pub fn execute_captures(&mut self, captures: &[Capture], new_owner: Owner) {
        for capture in captures {
            for &hex in &capture.cells {
                self.set(hex, new_owner);
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
