//! Hex board geometry with axial coordinates

use serde::{Deserialize, Serialize};

/// Axial hex coordinates (the implicit third coordinate is `s = -q - r`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Hex {
    pub q: i32,
    pub r: i32,
}

impl Hex {
    pub const ORIGIN: Hex = Hex::new(0, 0);

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    pub fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// Distance from center (0,0)
    pub fn distance_to_center(&self) -> i32 {
        (self.q.abs() + (self.q + self.r).abs() + self.r.abs()) / 2
    }

    /// Distance between two hexes
    pub fn distance_to(&self, other: Hex) -> i32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = ((self.q + self.r) - (other.q + other.r)).abs();
        (dq + dr + ds) / 2
    }

    /// Check if this hex lies inside a board of the given radius
    pub fn within(&self, radius: i32) -> bool {
        self.distance_to_center() <= radius
    }

    /// Get neighbor in direction (0-5)
    pub fn neighbor(&self, direction: usize) -> Hex {
        let (dq, dr) = DIRECTIONS[direction % 6];
        Hex::new(self.q + dq, self.r + dr)
    }

    /// All six neighbors, in `DIRECTIONS` order
    pub fn neighbors(&self) -> [Hex; 6] {
        DIRECTIONS.map(|(dq, dr)| Hex::new(self.q + dq, self.r + dr))
    }
}

impl std::ops::Add for Hex {
    type Output = Hex;

    fn add(self, rhs: Hex) -> Hex {
        Hex::new(self.q + rhs.q, self.r + rhs.r)
    }
}

impl std::fmt::Display for Hex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.q, self.r)
    }
}

/// Direction vectors in axial coordinates (dq, dr)
/// Index: 0=E, 1=NE, 2=NW, 3=W, 4=SW, 5=SE (flat-top)
pub const DIRECTIONS: [(i32, i32); 6] = [
    (1, 0),   // E
    (1, -1),  // NE
    (0, -1),  // NW
    (-1, 0),  // W
    (-1, 1),  // SW
    (0, 1),   // SE
];

/// Every hex within `radius` of the origin, ring by ring starting at the center
pub fn spiral(radius: i32) -> Vec<Hex> {
    let mut hexes = Vec::with_capacity((3 * radius * (radius + 1) + 1).max(0) as usize);
    if radius < 0 {
        return hexes;
    }
    hexes.push(Hex::ORIGIN);
    for ring in 1..=radius {
        // Start on the SW corner and walk the ring edge by edge
        let mut hex = Hex::new(-ring, ring);
        for direction in 0..6 {
            for _ in 0..ring {
                hexes.push(hex);
                hex = hex.neighbor(direction);
            }
        }
    }
    hexes
}

/// Round fractional axial coordinates to the containing hex.
///
/// All three cube coordinates are rounded and the one with the largest
/// rounding error is rebuilt from the other two, so `q + r + s == 0` holds.
pub fn hex_round(fq: f32, fr: f32) -> Hex {
    let fs = -fq - fr;
    let mut q = fq.round();
    let mut r = fr.round();
    let s = fs.round();

    let q_diff = (q - fq).abs();
    let r_diff = (r - fr).abs();
    let s_diff = (s - fs).abs();

    if q_diff > r_diff && q_diff > s_diff {
        q = -r - s;
    } else if r_diff > s_diff {
        r = -q - s;
    }

    Hex::new(q as i32, r as i32)
}

/// Flat-top pixel layout
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Distance from hex center to a corner, in pixels
    pub size: f32,
    /// Pixel position of hex (0,0)
    pub origin: (f32, f32),
}

impl Layout {
    pub fn new(size: f32, origin: (f32, f32)) -> Self {
        Self { size, origin }
    }

    pub fn hex_to_pixel(&self, hex: Hex) -> (f32, f32) {
        let q = hex.q as f32;
        let r = hex.r as f32;
        let x = self.size * 1.5 * q;
        let y = self.size * 3f32.sqrt() * (r + q / 2.0);
        (x + self.origin.0, y + self.origin.1)
    }

    /// Fractional axial coordinates under a pixel
    pub fn pixel_to_axial(&self, x: f32, y: f32) -> (f32, f32) {
        let px = x - self.origin.0;
        let py = y - self.origin.1;
        let q = (2.0 / 3.0 * px) / self.size;
        let r = (-1.0 / 3.0 * px + 3f32.sqrt() / 3.0 * py) / self.size;
        (q, r)
    }

    pub fn pixel_to_hex(&self, x: f32, y: f32) -> Hex {
        let (q, r) = self.pixel_to_axial(x, y);
        hex_round(q, r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_distance() {
        assert_eq!(Hex::new(0, 0).distance_to_center(), 0);
        assert_eq!(Hex::new(1, 0).distance_to_center(), 1);
        assert_eq!(Hex::new(2, 2).distance_to_center(), 4);
        assert_eq!(Hex::new(-3, 1).distance_to_center(), 3);
    }

    #[test]
    fn test_distance_symmetric() {
        for a in spiral(3) {
            for b in spiral(3) {
                assert_eq!(a.distance_to(b), b.distance_to(a));
            }
            assert_eq!(a.distance_to(Hex::ORIGIN), a.distance_to_center());
        }
    }

    #[test]
    fn test_neighbors_distinct_and_adjacent() {
        for hex in [Hex::new(0, 0), Hex::new(2, -3), Hex::new(-4, 1)] {
            let neighbors = hex.neighbors();
            let unique: HashSet<Hex> = neighbors.iter().copied().collect();
            assert_eq!(unique.len(), 6);
            for n in neighbors {
                assert_eq!(hex.distance_to(n), 1);
            }
        }
    }

    #[test]
    fn test_spiral_counts() {
        assert_eq!(spiral(0), vec![Hex::ORIGIN]);
        assert_eq!(spiral(1).len(), 7);
        assert_eq!(spiral(3).len(), 37);
        let unique: HashSet<Hex> = spiral(4).into_iter().collect();
        assert_eq!(unique.len(), 61);
        assert!(unique.iter().all(|h| h.within(4)));
    }

    #[test]
    fn test_hex_round_exact() {
        assert_eq!(hex_round(0.0, 0.0), Hex::ORIGIN);
        assert_eq!(hex_round(2.1, -0.9), Hex::new(2, -1));
    }

    #[test]
    fn test_hex_round_near_boundary() {
        // Rounding q and r independently would give (0,0) for both points
        assert_eq!(hex_round(0.45, 0.4), Hex::new(1, 0));
        assert_eq!(hex_round(0.4, 0.45), Hex::new(0, 1));
    }

    #[test]
    fn test_pixel_round_trip() {
        let layout = Layout::new(20.0, (300.0, 200.0));
        for hex in spiral(4) {
            let (x, y) = layout.hex_to_pixel(hex);
            assert_eq!(layout.pixel_to_hex(x, y), hex);
            // Slightly off-center clicks still land on the same hex
            assert_eq!(layout.pixel_to_hex(x + 5.0, y - 5.0), hex);
        }
    }
}
