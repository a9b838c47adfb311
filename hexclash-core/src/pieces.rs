//! Piece shapes and placement

use crate::board::Hex;
use crate::game::GameError;
use crate::grid::{Board, Owner};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Shape identifier (index into PIECE_SHAPES)
pub type ShapeId = u8;

/// Number of distinct 60° rotations
pub const ROTATIONS: u8 = 6;

/// A multi-cell shape, as offsets from its anchor cell
#[derive(Clone, Debug)]
pub struct PieceShape {
    pub id: &'static str,
    pub name: &'static str,
    pub offsets: &'static [(i32, i32)],
}

impl PieceShape {
    const fn new(id: &'static str, name: &'static str, offsets: &'static [(i32, i32)]) -> Self {
        Self { id, name, offsets }
    }

    pub fn size(&self) -> usize {
        self.offsets.len()
    }
}

/// All piece shapes
pub static PIECE_SHAPES: [PieceShape; 9] = [
    PieceShape::new("M1", "Mono", &[(0, 0)]),
    PieceShape::new("D1", "Duo", &[(0, 0), (1, 0)]),
    PieceShape::new("T1", "Line", &[(0, 0), (1, 0), (2, 0)]),
    PieceShape::new("T2", "Bend", &[(0, 0), (1, 0), (2, -1)]),
    PieceShape::new("T3", "Triangle", &[(0, 0), (1, 0), (1, -1)]),
    PieceShape::new("Q1", "Bar", &[(0, 0), (1, 0), (2, 0), (3, 0)]),
    PieceShape::new("Q2", "Diamond", &[(0, 0), (1, 0), (1, -1), (0, 1)]),
    PieceShape::new("Q3", "Arc", &[(0, 0), (1, 0), (2, -1), (2, -2)]),
    PieceShape::new("P1", "Crown", &[(0, 0), (1, 0), (-1, 0), (0, -1), (1, -1)]),
];

/// Get shape index from string ID
pub fn shape_id_to_index(id: &str) -> Option<ShapeId> {
    PIECE_SHAPES.iter().position(|s| s.id == id).map(|i| i as u8)
}

/// Get shape from index
pub fn get_shape(idx: ShapeId) -> &'static PieceShape {
    &PIECE_SHAPES[idx as usize % PIECE_SHAPES.len()]
}

/// Rotate an offset clockwise by `rotation` sixths of a turn
pub fn rotate(offset: (i32, i32), rotation: u8) -> (i32, i32) {
    let mut q = offset.0;
    let mut r = offset.1;
    for _ in 0..rotation % ROTATIONS {
        (q, r) = (-r, q + r);
    }
    (q, r)
}

// ============================================================================
// PLACEMENT
// ============================================================================

/// A shape at a given rotation, anchored on a board hex
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub shape: ShapeId,
    pub rotation: u8,
    pub anchor: Hex,
}

impl Placement {
    pub fn new(shape: ShapeId, rotation: u8, anchor: Hex) -> Self {
        Self {
            shape,
            rotation: rotation % ROTATIONS,
            anchor,
        }
    }

    /// Absolute cells covered by this placement
    pub fn cells(&self) -> Vec<Hex> {
        get_shape(self.shape)
            .offsets
            .iter()
            .map(|&off| {
                let (dq, dr) = rotate(off, self.rotation);
                self.anchor + Hex::new(dq, dr)
            })
            .collect()
    }

    /// Every covered cell must be on the active board and empty
    pub fn validate(&self, board: &Board, active_radius: i32) -> Result<(), GameError> {
        for hex in self.cells() {
            if !board.is_active(hex, active_radius) {
                return Err(GameError::OutOfBounds(hex));
            }
            if board.get(hex) != Some(Owner::Empty) {
                return Err(GameError::Occupied(hex));
            }
        }
        Ok(())
    }

    pub fn is_valid(&self, board: &Board, active_radius: i32) -> bool {
        self.validate(board, active_radius).is_ok()
    }
}

/// All legal (rotation, anchor) placements of a shape
pub fn valid_placements(board: &Board, shape: ShapeId, active_radius: i32) -> Vec<Placement> {
    let anchors = board.empty_cells(active_radius);
    let mut placements = Vec::new();
    for rotation in 0..ROTATIONS {
        for &anchor in &anchors {
            let placement = Placement::new(shape, rotation, anchor);
            if placement.is_valid(board, active_radius) {
                placements.push(placement);
            }
        }
    }
    placements
}

// ============================================================================
// PIECE BAG
// ============================================================================

/// Seeded source of offered shapes
#[derive(Clone, Debug)]
pub struct PieceBag {
    rng: ChaCha8Rng,
}

impl PieceBag {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn draw(&mut self) -> ShapeId {
        self.rng.gen_range(0..PIECE_SHAPES.len()) as ShapeId
    }

    pub fn offer(&mut self, count: usize) -> Vec<ShapeId> {
        (0..count).map(|_| self.draw()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_shape_lookup() {
        assert_eq!(shape_id_to_index("M1"), Some(0));
        assert_eq!(shape_id_to_index("P1"), Some(8));
        assert_eq!(shape_id_to_index("XX"), None);
    }

    #[test]
    fn test_shapes_are_connected() {
        for shape in &PIECE_SHAPES {
            let cells: Vec<Hex> = shape.offsets.iter().map(|&(q, r)| Hex::new(q, r)).collect();
            let unique: HashSet<Hex> = cells.iter().copied().collect();
            assert_eq!(unique.len(), cells.len(), "{} has duplicate cells", shape.id);
            for hex in &cells {
                if cells.len() > 1 {
                    assert!(
                        cells.iter().any(|o| o.distance_to(*hex) == 1),
                        "{} has a detached cell",
                        shape.id
                    );
                }
            }
        }
    }

    #[test]
    fn test_rotation_period() {
        for off in [(1, 0), (2, -1), (0, 3)] {
            assert_eq!(rotate(off, 6), off);
            assert_eq!(rotate(rotate(off, 2), 4), off);
        }
        assert_eq!(rotate((1, 0), 1), (0, 1));
        assert_eq!(rotate((1, 0), 3), (-1, 0));
    }

    #[test]
    fn test_rotation_preserves_distance() {
        for rotation in 0..ROTATIONS {
            let (q, r) = rotate((2, -1), rotation);
            assert_eq!(Hex::new(q, r).distance_to_center(), 2);
        }
    }

    #[test]
    fn test_placement_cells() {
        let duo = shape_id_to_index("D1").unwrap();
        let p = Placement::new(duo, 1, Hex::new(1, 1));
        assert_eq!(p.cells(), vec![Hex::new(1, 1), Hex::new(1, 2)]);
    }

    #[test]
    fn test_validate() {
        let mut board = Board::generate(2);
        let bar = shape_id_to_index("Q1").unwrap();

        assert!(Placement::new(bar, 0, Hex::new(-2, 0)).is_valid(&board, 2));
        assert_eq!(
            Placement::new(bar, 0, Hex::new(0, 0)).validate(&board, 2),
            Err(GameError::OutOfBounds(Hex::new(3, 0)))
        );
        // Inside the generated board but outside the active radius
        assert!(!Placement::new(bar, 0, Hex::new(-2, 0)).is_valid(&board, 1));

        board.set(Hex::new(0, 0), Owner::Ai);
        assert_eq!(
            Placement::new(bar, 0, Hex::new(-2, 0)).validate(&board, 2),
            Err(GameError::Occupied(Hex::new(0, 0)))
        );
    }

    #[test]
    fn test_valid_placements() {
        let board = Board::generate(1);
        let mono = shape_id_to_index("M1").unwrap();
        // Mono fits on each of 7 cells, once per rotation
        assert_eq!(valid_placements(&board, mono, 1).len(), 42);

        let crown = shape_id_to_index("P1").unwrap();
        let placements = valid_placements(&board, crown, 1);
        assert!(!placements.is_empty());
        assert!(placements.iter().all(|p| p.anchor == Hex::ORIGIN));
    }

    #[test]
    fn test_piece_bag_deterministic() {
        let mut a = PieceBag::new(7);
        let mut b = PieceBag::new(7);
        let offer = a.offer(10);
        assert_eq!(offer, b.offer(10));
        assert!(offer.iter().all(|&s| (s as usize) < PIECE_SHAPES.len()));
    }
}
