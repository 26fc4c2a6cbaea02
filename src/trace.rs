use crate::config::{Connectivity, TraceConfig, VertexLocation};
use crate::direction::{Direction, Position};
use crate::error::{Result, TraceError};
use crate::grid::{Label, LabelGrid};
use crate::polygon::Polygon;

/// Crack-code boundary tracer. Configuration is fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tracer {
    config: TraceConfig,
}

impl Default for Tracer {
    fn default() -> Self {
        Self::new(TraceConfig::default())
    }
}

impl Tracer {
    pub fn new(config: TraceConfig) -> Self {
        Self { config }
    }

    /// Tracer with corner vertices and background 0; rejects anything but 4 or 8.
    pub fn with_connectivity(conn: u8) -> Result<Self> {
        let connectivity = Connectivity::try_from(conn)?;
        Ok(Self::new(TraceConfig {
            connectivity,
            ..TraceConfig::default()
        }))
    }

    pub fn with_vertex_location(mut self, loc: VertexLocation) -> Self {
        self.config.vertex_location = loc;
        self
    }

    pub fn with_background(mut self, background: Label) -> Self {
        self.config.background = background;
        self
    }

    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    pub fn connectivity(&self) -> Connectivity {
        self.config.connectivity
    }

    pub fn vertex_location(&self) -> VertexLocation {
        self.config.vertex_location
    }

    pub fn background(&self) -> Label {
        self.config.background
    }

    /// Walk the boundary loop through `start` and return every cursor state in
    /// order. The state after the last one is `start` again.
    ///
    /// `start` must be on a pixel labeled `value` whose side selected by the
    /// direction faces a different label (or the grid border).
    pub fn trace_positions<G: LabelGrid + ?Sized>(
        &self,
        grid: &G,
        value: Label,
        start: Position,
    ) -> Result<Vec<Position>> {
        if !grid.contains(start.x, start.y) {
            return Err(TraceError::OutOfBounds {
                x: start.x,
                y: start.y,
                w: grid.w(),
                h: grid.h(),
            });
        }

        let (ox, oy) = start.outside_pixel();
        if grid.sample(start.x, start.y) != Some(value) || grid.sample(ox, oy) == Some(value) {
            return Err(TraceError::NotOnBoundary {
                x: start.x,
                y: start.y,
                direction: start.direction,
                label: value,
            });
        }

        // Each cursor state appears at most once in a loop.
        let max_steps = 4 * grid.w() * grid.h();
        let conn = self.config.connectivity;

        let mut positions: Vec<Position> = Vec::new();
        let mut pos = start;
        loop {
            positions.push(pos);
            pos = pos.step(grid, value, conn)?;
            if pos == start {
                break;
            }
            if positions.len() >= max_steps {
                return Err(TraceError::Inconsistent {
                    x: pos.x,
                    y: pos.y,
                    direction: pos.direction,
                    label: value,
                });
            }
        }

        tracing::trace!(
            label = value,
            x = start.x,
            y = start.y,
            direction = ?start.direction,
            n_vertices = positions.len(),
            "traced loop"
        );

        Ok(positions)
    }

    /// Trace one loop and project it with the configured vertex location.
    pub fn trace_loop<G: LabelGrid + ?Sized>(
        &self,
        grid: &G,
        value: Label,
        start: Position,
    ) -> Result<Polygon> {
        let positions = self.trace_positions(grid, value, start)?;
        Ok(Polygon::from_positions(&positions, self.config.vertex_location))
    }

    /// Trace the loop through side `direction` of pixel (x, y), using that
    /// pixel's own label as the region.
    pub fn trace_from<G: LabelGrid + ?Sized>(
        &self,
        grid: &G,
        x: i64,
        y: i64,
        direction: Direction,
    ) -> Result<Polygon> {
        let value = grid.sample(x, y).ok_or(TraceError::OutOfBounds {
            x,
            y,
            w: grid.w(),
            h: grid.h(),
        })?;
        self.trace_loop(grid, value, Position::new(x, y, direction))
    }
}

// Tests
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Iv2;
    use crate::im::Im;
    use crate::polygon::Fv2;
    use crate::test_helpers::{fill_rect, label_im_from_ascii};
    use std::collections::HashSet;

    fn expanded_corners(dim: usize, big: (usize, usize), corners: [(usize, usize); 4], big_side: usize) -> Im<u8, 1> {
        let mut im = Im::<u8, 1>::new(dim, dim);
        fill_rect(&mut im, big.0, big.1, big_side, big_side, 255);
        for (x, y) in corners {
            fill_rect(&mut im, x, y, 2, 2, 255);
        }
        im
    }

    #[test]
    fn rejects_bad_connectivity() {
        assert!(matches!(
            Tracer::with_connectivity(6),
            Err(TraceError::InvalidConnectivity(6))
        ));
        assert_eq!(Tracer::with_connectivity(8).unwrap().connectivity(), Connectivity::Eight);
    }

    #[test]
    fn square_in_4x4_has_8_vertices_and_closes() {
        let mut im = Im::<u8, 1>::new(4, 4);
        fill_rect(&mut im, 1, 1, 2, 2, 255);

        let tracer = Tracer::default();
        let start = Position::new(1, 1, Direction::Down);
        let positions = tracer.trace_positions(&im, 255, start).unwrap();
        assert_eq!(positions.len(), 8);
        assert_eq!(positions[0], start);

        let last = positions[positions.len() - 1];
        assert_eq!(last.step(&im, 255, Connectivity::Four).unwrap(), start);

        let poly = tracer.trace_from(&im, 1, 1, Direction::Down).unwrap();
        let corners: Vec<(f64, f64)> = poly.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(
            corners,
            vec![
                (1.0, 1.0),
                (1.0, 2.0),
                (1.0, 3.0),
                (2.0, 3.0),
                (3.0, 3.0),
                (3.0, 2.0),
                (3.0, 1.0),
                (2.0, 1.0),
            ]
        );
    }

    #[test]
    fn rectangle_has_twice_its_perimeter_in_vertices() {
        for (w, h) in [(1usize, 1usize), (3, 1), (1, 4), (5, 3), (7, 7)] {
            let mut im = Im::<i32, 1>::new(w + 4, h + 4);
            fill_rect(&mut im, 2, 2, w, h, 3);
            let poly = Tracer::default().trace_from(&im, 2, 2, Direction::Down).unwrap();
            assert_eq!(poly.len(), 2 * (w + h), "rect {w}x{h}");
            assert_eq!(poly.signed_area(), (w * h) as f64);
        }
    }

    #[test]
    fn expanded_corners_c4() {
        let im = expanded_corners(8, (2, 2), [(1, 1), (5, 1), (1, 5), (5, 5)], 4);
        let poly = Tracer::default().trace_from(&im, 1, 1, Direction::Down).unwrap();
        assert!(!poly.is_empty());
        assert_eq!(poly.len(), 32);
    }

    #[test]
    fn expanded_corners_c4_touch_borders() {
        let im = expanded_corners(6, (1, 1), [(0, 0), (4, 0), (0, 4), (4, 4)], 4);
        let poly = Tracer::default().trace_from(&im, 0, 0, Direction::Down).unwrap();
        assert_eq!(poly.len(), 32);
    }

    #[test]
    fn expanded_corners_c8() {
        let im = expanded_corners(8, (2, 2), [(1, 1), (5, 1), (1, 5), (5, 5)], 4);
        let tracer = Tracer::with_connectivity(8).unwrap();
        let poly = tracer.trace_from(&im, 1, 1, Direction::Down).unwrap();
        assert_eq!(poly.len(), 32);
    }

    #[test]
    fn expanded_corners_c8_touch_borders() {
        let im = expanded_corners(6, (1, 1), [(0, 0), (4, 0), (0, 4), (4, 4)], 4);
        let tracer = Tracer::with_connectivity(8).unwrap();
        let poly = tracer.trace_from(&im, 0, 0, Direction::Down).unwrap();
        assert_eq!(poly.len(), 32);
    }

    #[test]
    fn no_state_repeats_within_a_loop() {
        let im = label_im_from_ascii(
            r#"
                0000000
                0111110
                0101010
                0111100
                0001010
                0000000
            "#,
        );
        for conn in [4u8, 8] {
            let tracer = Tracer::with_connectivity(conn).unwrap();
            let positions = tracer
                .trace_positions(&im, 1, Position::new(1, 1, Direction::Down))
                .unwrap();
            let unique: HashSet<Position> = positions.iter().copied().collect();
            assert_eq!(unique.len(), positions.len(), "conn {conn}");

            // Closing early at any step would need the start state to reappear.
            assert!(positions[1..].iter().all(|p| *p != positions[0]));
        }
    }

    #[test]
    fn saddle_free_blob_has_no_repeated_vertex() {
        let im = label_im_from_ascii(
            r#"
                000000
                011100
                011110
                001110
                000000
            "#,
        );
        for conn in [4u8, 8] {
            let poly = Tracer::with_connectivity(conn)
                .unwrap()
                .trace_from(&im, 1, 1, Direction::Down)
                .unwrap();
            let unique: HashSet<(i64, i64)> = poly.iter().map(|p| (p.x as i64, p.y as i64)).collect();
            assert_eq!(unique.len(), poly.len(), "conn {conn}");
            assert_eq!(poly.signed_area(), 10.0);
        }
    }

    #[test]
    fn pinch_vertex_is_visited_twice_under_eight() {
        let im = label_im_from_ascii(
            r#"
                0000
                0100
                0010
                0000
            "#,
        );
        let tracer = Tracer::with_connectivity(8).unwrap();
        let positions = tracer
            .trace_positions(&im, 1, Position::new(1, 1, Direction::Down))
            .unwrap();
        assert_eq!(positions.len(), 8);

        let pinch = Iv2 { x: 2, y: 2 };
        assert_eq!(positions.iter().filter(|p| p.vertex() == pinch).count(), 2);

        let poly = Polygon::from_positions(&positions, VertexLocation::Corner);
        assert_eq!(poly.signed_area(), 2.0);
    }

    #[test]
    fn tracing_is_deterministic() {
        let im = label_im_from_ascii(
            r#"
                022220
                020020
                022200
                000022
            "#,
        );
        let tracer = Tracer::with_connectivity(8)
            .unwrap()
            .with_vertex_location(VertexLocation::EdgeCenter);
        let a = tracer.trace_from(&im, 1, 0, Direction::Down).unwrap();
        let b = tracer.trace_from(&im, 1, 0, Direction::Down).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn hole_boundary_runs_clockwise() {
        let im = label_im_from_ascii(
            r#"
                00000
                01110
                01010
                01110
                00000
            "#,
        );
        let tracer = Tracer::default();
        // Right side of (1, 2) faces the hole.
        let hole = tracer.trace_from(&im, 1, 2, Direction::Up).unwrap();
        assert_eq!(hole.len(), 4);
        assert_eq!(hole.signed_area(), -1.0);
        assert_eq!(
            hole.points,
            vec![
                Fv2::new(2.0, 3.0),
                Fv2::new(2.0, 2.0),
                Fv2::new(3.0, 2.0),
                Fv2::new(3.0, 3.0),
            ]
        );

        let outer = tracer.trace_from(&im, 1, 1, Direction::Down).unwrap();
        assert_eq!(outer.len(), 12);
        assert_eq!(outer.signed_area(), 9.0);
    }

    #[test]
    fn start_outside_grid_is_rejected() {
        let im = Im::<u8, 1>::new(3, 3);
        let err = Tracer::default()
            .trace_loop(&im, 0, Position::new(3, 0, Direction::Down))
            .unwrap_err();
        assert!(matches!(err, TraceError::OutOfBounds { x: 3, y: 0, w: 3, h: 3 }));

        let err = Tracer::default().trace_from(&im, -1, 1, Direction::Up).unwrap_err();
        assert!(matches!(err, TraceError::OutOfBounds { .. }));
    }

    #[test]
    fn start_off_boundary_is_rejected() {
        let im = label_im_from_ascii(
            r#"
                0000
                0110
                0110
                0000
            "#,
        );
        let tracer = Tracer::default();

        // Left side of (2, 1) faces (1, 1), same label.
        let err = tracer
            .trace_loop(&im, 1, Position::new(2, 1, Direction::Down))
            .unwrap_err();
        assert!(matches!(err, TraceError::NotOnBoundary { x: 2, y: 1, .. }));

        // Pixel does not carry the requested label.
        let err = tracer
            .trace_loop(&im, 1, Position::new(0, 0, Direction::Down))
            .unwrap_err();
        assert!(matches!(err, TraceError::NotOnBoundary { .. }));
    }

    /// Claims to be 3x3 but reports label 1 along the whole row y = 0, so a
    /// walk along its bottom side never comes back.
    struct EndlessRow;

    impl LabelGrid for EndlessRow {
        fn w(&self) -> usize {
            3
        }

        fn h(&self) -> usize {
            3
        }

        fn label(&self, _x: usize, y: usize) -> Label {
            if y == 0 { 1 } else { 0 }
        }

        fn sample(&self, x: i64, y: i64) -> Option<Label> {
            if x >= 0 && y == 0 {
                Some(1)
            } else if self.contains(x, y) {
                Some(0)
            } else {
                None
            }
        }
    }

    #[test]
    fn walk_that_never_closes_is_cut_off() {
        let err = Tracer::default()
            .trace_positions(&EndlessRow, 1, Position::new(0, 0, Direction::Down))
            .unwrap_err();
        // 4 * 3 * 3 states recorded, then the walk is still heading right.
        assert!(matches!(
            err,
            TraceError::Inconsistent { x: 35, y: 0, direction: Direction::Right, label: 1 }
        ));

        assert!(matches!(
            Tracer::default().scan(&EndlessRow),
            Err(TraceError::Inconsistent { .. })
        ));
    }
}
