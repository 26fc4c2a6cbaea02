// Whole-image scan: find and trace every boundary loop of every label.
//
// Pixels are visited in raster order. A pixel whose left (right) neighbour has
// a different label starts a candidate loop on its left (right) side, walking
// DOWN (UP). Every closed loop has sides of both vertical orientations, so this
// finds all of them. Consumed states live in a bitmap with two bits per pixel,
// one per vertical side; horizontal sides never start a trace so they are not
// recorded.

use crate::bitmap::Bitmap;
use crate::direction::{Direction, Position};
use crate::error::{Result, TraceError};
use crate::grid::LabelGrid;
use crate::polygon::{BoundaryMap, Polygon};
use crate::trace::Tracer;

/// Consumed vertical-side states of a scan.
struct SideMask {
    bits: Bitmap,
}

impl SideMask {
    fn new(w: usize, h: usize) -> Self {
        Self {
            bits: Bitmap::new(2 * w, h),
        }
    }

    #[inline(always)]
    fn column(pos: &Position) -> Option<usize> {
        match pos.direction {
            Direction::Down => Some(2 * pos.x as usize),
            Direction::Up => Some(2 * pos.x as usize + 1),
            Direction::Left | Direction::Right => None,
        }
    }

    fn is_consumed(&self, pos: &Position) -> bool {
        Self::column(pos).is_some_and(|c| self.bits.get(c, pos.y as usize))
    }

    fn consume(&mut self, positions: &[Position]) {
        for pos in positions {
            if let Some(c) = Self::column(pos) {
                let was = self.bits.set(c, pos.y as usize);
                debug_assert!(!was, "boundary state traced twice: {pos:?}");
            }
        }
    }
}

/// Totals for one scan, for logging.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanStats {
    pub loops: usize,
    pub vertices: usize,
}

impl Tracer {
    /// Trace every boundary loop of every non-background label.
    pub fn scan<G: LabelGrid + ?Sized>(&self, grid: &G) -> Result<BoundaryMap> {
        self.scan_with_abort(grid, |_| false)
    }

    /// Like `scan`, but asks `should_abort(loops_traced_so_far)` before each
    /// new loop and stops with `TraceError::Aborted` when it returns true.
    pub fn scan_with_abort<G, F>(&self, grid: &G, mut should_abort: F) -> Result<BoundaryMap>
    where
        G: LabelGrid + ?Sized,
        F: FnMut(usize) -> bool,
    {
        let w = grid.w();
        let h = grid.h();
        let background = self.background();

        let mut consumed = SideMask::new(w, h);
        let mut boundaries = BoundaryMap::new();
        let mut stats = ScanStats::default();

        for y in 0..h {
            for x in 0..w {
                let v = grid.label(x, y);
                if v == background {
                    continue;
                }

                let left_differs = x == 0 || grid.label(x - 1, y) != v;
                let right_differs = x + 1 == w || grid.label(x + 1, y) != v;

                for (differs, direction) in [(left_differs, Direction::Down), (right_differs, Direction::Up)] {
                    if !differs {
                        continue;
                    }
                    let start = Position::new(x as i64, y as i64, direction);
                    if consumed.is_consumed(&start) {
                        continue;
                    }

                    if should_abort(stats.loops) {
                        return Err(TraceError::Aborted { loops: stats.loops });
                    }

                    let positions = self.trace_positions(grid, v, start)?;
                    consumed.consume(&positions);

                    stats.loops += 1;
                    stats.vertices += positions.len();
                    boundaries
                        .entry(v)
                        .or_default()
                        .push(Polygon::from_positions(&positions, self.vertex_location()));
                }
            }
        }

        tracing::debug!(
            w,
            h,
            conn = %self.connectivity(),
            labels = boundaries.len(),
            loops = stats.loops,
            vertices = stats.vertices,
            "scan complete"
        );

        Ok(boundaries)
    }
}

// Tests
// -----------------------------------------------------------------------------
