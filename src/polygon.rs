use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::VertexLocation;
use crate::direction::Position;
use crate::grid::Label;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fv2 {
    pub x: f64,
    pub y: f64,
}

impl Fv2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// Vertex projection
// -----------------------------------------------------------------------------

// Offsets from the cursor pixel's top-left corner, indexed by
// [VertexLocation][Direction]. Direction order is RIGHT, UP, LEFT, DOWN.
const VERTEX_OFFSETS: [[(f64, f64); 4]; 3] = [
    // Corner: start of the side being walked.
    [(0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0)],
    // EdgeCenter: middle of the side being walked.
    [(0.5, 1.0), (1.0, 0.5), (0.5, 0.0), (0.0, 0.5)],
    // Pixel: centre of the pixel.
    [(0.5, 0.5), (0.5, 0.5), (0.5, 0.5), (0.5, 0.5)],
];

impl VertexLocation {
    #[inline(always)]
    fn table_index(self) -> usize {
        match self {
            VertexLocation::Corner => 0,
            VertexLocation::EdgeCenter => 1,
            VertexLocation::Pixel => 2,
        }
    }

    /// Output coordinate of one cursor state.
    #[inline(always)]
    pub fn project(self, pos: &Position) -> Fv2 {
        let (ox, oy) = VERTEX_OFFSETS[self.table_index()][pos.direction.index()];
        Fv2::new(pos.x as f64 + ox, pos.y as f64 + oy)
    }

    /// Factor that makes every projected coordinate an integer.
    pub fn lattice_scale(self) -> i64 {
        match self {
            VertexLocation::Corner => 1,
            VertexLocation::EdgeCenter | VertexLocation::Pixel => 2,
        }
    }
}

// Polygon
// -----------------------------------------------------------------------------

/// Closed polygon; the last vertex connects back to the first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon {
    pub points: Vec<Fv2>,
}

/// Boundary polygons per label, outer boundaries and holes alike.
pub type BoundaryMap = BTreeMap<Label, Vec<Polygon>>;

impl Polygon {
    pub fn new(points: Vec<Fv2>) -> Self {
        Self { points }
    }

    pub fn from_positions(positions: &[Position], loc: VertexLocation) -> Self {
        Self {
            points: positions.iter().map(|p| loc.project(p)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fv2> {
        self.points.iter()
    }

    /// Copy with runs of equal consecutive points (including the wrap from
    /// last to first) collapsed to one.
    pub fn dedup_consecutive(&self) -> Polygon {
        let mut points = self.points.clone();
        points.dedup();
        while points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        Polygon { points }
    }

    /// Shoelace area with image axes (y down): outer boundaries are positive,
    /// holes negative. For corner vertices the sum over a label's polygons is
    /// its pixel count.
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut acc = 0.0;
        for i in 0..n {
            let p0 = self.points[i];
            let p1 = self.points[(i + 1) % n];
            acc += p0.x * p1.y - p1.x * p0.y;
        }
        -0.5 * acc
    }

    pub fn is_hole(&self) -> bool {
        self.signed_area() < 0.0
    }

    /// (min, max) corners of the bounding box.
    pub fn bounds(&self) -> Option<(Fv2, Fv2)> {
        let first = *self.points.first()?;
        let mut lo = first;
        let mut hi = first;
        for p in &self.points[1..] {
            lo.x = lo.x.min(p.x);
            lo.y = lo.y.min(p.y);
            hi.x = hi.x.max(p.x);
            hi.y = hi.y.max(p.y);
        }
        Some((lo, hi))
    }
}

pub fn boundary_map_to_json(map: &BoundaryMap) -> serde_json::Result<String> {
    serde_json::to_string(map)
}
