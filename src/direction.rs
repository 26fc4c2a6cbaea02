// Direction automaton and walk cursor for crack-code tracing.
//
// A cursor sits on one side of a pixel that belongs to the traced region. The
// direction says which side and which way we walk along it:
//
//   DOWN  = left side,   walking +y
//   RIGHT = bottom side, walking +x
//   UP    = right side,  walking -y
//   LEFT  = top side,    walking -x
//
// Image coordinates, y points down. The region is always on the left hand of
// the walk (as seen on screen), so outer boundaries come out counter-clockwise
// on screen and holes clockwise.

use crate::config::Connectivity;
use crate::error::{Result, TraceError};
use crate::grid::{Label, LabelGrid};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right = 0,
    Up = 1,
    Left = 2,
    Down = 3,
}

// All tables below are indexed by `Direction as usize`.
// -----------------------------------------------------------------------------

/// Step to the next pixel along the walk.
const FORWARD: [(i64, i64); 4] = [(1, 0), (0, -1), (-1, 0), (0, 1)];

/// Step from the pixel across the side being walked (the non-region side).
const OUTSIDE: [(i64, i64); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Lattice corner where the walked side starts, relative to the pixel's top-left corner.
const CORNER: [(i64, i64); 4] = [(0, 1), (1, 1), (1, 0), (0, 0)];

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Right, Self::Up, Self::Left, Self::Down];

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline(always)]
    fn from_index(i: usize) -> Self {
        Self::ALL[i & 3]
    }

    /// +90 degrees: RIGHT -> UP -> LEFT -> DOWN -> RIGHT.
    #[inline(always)]
    pub fn turn_left(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// -90 degrees, the inverse of `turn_left`.
    #[inline(always)]
    pub fn turn_right(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    #[inline(always)]
    pub fn forward(self) -> (i64, i64) {
        FORWARD[self.index()]
    }

    #[inline(always)]
    pub fn outside(self) -> (i64, i64) {
        OUTSIDE[self.index()]
    }

    /// The two pixels sampled to classify the next corner: straight ahead, and
    /// ahead-and-across (the diagonal).
    #[inline(always)]
    pub fn lookahead(self) -> [(i64, i64); 2] {
        let (fx, fy) = self.forward();
        let (ox, oy) = self.outside();
        [(fx, fy), (fx + ox, fy + oy)]
    }

    #[inline(always)]
    pub fn corner(self) -> (i64, i64) {
        CORNER[self.index()]
    }
}

/// Integer lattice point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Iv2 {
    pub x: i64,
    pub y: i64,
}

/// Walk cursor: the pixel whose side we are on, plus the direction of travel.
/// Two positions are equal only if pixel and direction both match, which is
/// what lets a loop pass through the same corner twice at a pinch point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i64,
    pub y: i64,
    pub direction: Direction,
}

/// How the cursor moved at one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Corner {
    Convex,
    Reentrant,
    Straight,
}

impl Position {
    pub fn new(x: i64, y: i64, direction: Direction) -> Self {
        Self { x, y, direction }
    }

    /// Corner at which the current side starts, in lattice coordinates.
    pub fn vertex(&self) -> Iv2 {
        let (cx, cy) = self.direction.corner();
        Iv2 {
            x: self.x + cx,
            y: self.y + cy,
        }
    }

    /// The pixel across the side being walked.
    pub fn outside_pixel(&self) -> (i64, i64) {
        let (ox, oy) = self.direction.outside();
        (self.x + ox, self.y + oy)
    }

    /// Convex corner: same pixel, next side.
    pub fn turn_left(&self) -> Self {
        Self::new(self.x, self.y, self.direction.turn_left())
    }

    /// Reentrant corner: hop to the diagonal pixel and walk its side.
    pub fn turn_right(&self) -> Self {
        let [_, (dx, dy)] = self.direction.lookahead();
        Self::new(self.x + dx, self.y + dy, self.direction.turn_right())
    }

    pub fn advance(&self) -> Self {
        let (fx, fy) = self.direction.forward();
        Self::new(self.x + fx, self.y + fy, self.direction)
    }

    /// Classify the corner at the end of the current side.
    pub fn classify<G: LabelGrid + ?Sized>(
        &self,
        grid: &G,
        value: Label,
        conn: Connectivity,
    ) -> Result<Corner> {
        let [(ax, ay), (bx, by)] = self.direction.lookahead();
        let ahead = grid.sample(self.x + ax, self.y + ay) == Some(value);
        let diag = grid.sample(self.x + bx, self.y + by) == Some(value);

        if !ahead && (!diag || conn == Connectivity::Four) {
            Ok(Corner::Convex)
        } else if diag && (ahead || conn == Connectivity::Eight) {
            Ok(Corner::Reentrant)
        } else if ahead && !diag {
            Ok(Corner::Straight)
        } else {
            Err(TraceError::Inconsistent {
                x: self.x,
                y: self.y,
                direction: self.direction,
                label: value,
            })
        }
    }

    /// One transition of the automaton.
    pub fn step<G: LabelGrid + ?Sized>(
        &self,
        grid: &G,
        value: Label,
        conn: Connectivity,
    ) -> Result<Self> {
        Ok(match self.classify(grid, value, conn)? {
            Corner::Convex => self.turn_left(),
            Corner::Reentrant => self.turn_right(),
            Corner::Straight => self.advance(),
        })
    }
}

// Tests
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{fill_rect, label_im_from_ascii};
    use crate::im::Im;

    fn square_4x4() -> Im<u8, 1> {
        let mut im = Im::<u8, 1>::new(4, 4);
        fill_rect(&mut im, 1, 1, 2, 2, 255);
        im
    }

    #[test]
    fn turns_are_inverse_and_cycle() {
        for d in Direction::ALL {
            assert_eq!(d.turn_left().turn_right(), d);
            assert_eq!(d.turn_left().turn_left().turn_left().turn_left(), d);
        }
        assert_eq!(Direction::Right.turn_left(), Direction::Up);
        assert_eq!(Direction::Up.turn_left(), Direction::Left);
        assert_eq!(Direction::Left.turn_left(), Direction::Down);
        assert_eq!(Direction::Down.turn_left(), Direction::Right);
    }

    #[test]
    fn corners_of_one_pixel_go_around_it() {
        let verts: Vec<Iv2> = [Direction::Down, Direction::Right, Direction::Up, Direction::Left]
            .iter()
            .map(|&d| Position::new(3, 5, d).vertex())
            .collect();
        assert_eq!(
            verts,
            vec![
                Iv2 { x: 3, y: 5 },
                Iv2 { x: 3, y: 6 },
                Iv2 { x: 4, y: 6 },
                Iv2 { x: 4, y: 5 },
            ]
        );
    }

    #[test]
    fn down_at_bottom_of_square_turns_right() {
        let im = square_4x4();
        let pos = Position::new(1, 2, Direction::Down);
        let next = pos.step(&im, 255, Connectivity::Four).unwrap();
        assert_eq!(next, Position::new(1, 2, Direction::Right));
    }

    #[test]
    fn down_at_top_of_square_goes_straight() {
        let im = square_4x4();
        let pos = Position::new(1, 1, Direction::Down);
        let next = pos.step(&im, 255, Connectivity::Four).unwrap();
        assert_eq!(next, Position::new(1, 2, Direction::Down));
    }

    #[test]
    fn saddle_under_four_stays_on_pixel() {
        let mut im = Im::<u8, 1>::new(4, 4);
        fill_rect(&mut im, 1, 1, 1, 1, 255);
        fill_rect(&mut im, 2, 2, 1, 1, 255);

        let pos = Position::new(1, 1, Direction::Down);
        assert_eq!(pos.classify(&im, 255, Connectivity::Four).unwrap(), Corner::Convex);
        let next = pos.step(&im, 255, Connectivity::Four).unwrap();
        assert_eq!(next, Position::new(1, 1, Direction::Right));
    }

    #[test]
    fn saddle_under_eight_hops_diagonal() {
        let mut im = Im::<u8, 1>::new(4, 4);
        fill_rect(&mut im, 2, 1, 1, 1, 255);
        fill_rect(&mut im, 1, 2, 1, 1, 255);

        let pos = Position::new(2, 1, Direction::Down);
        assert_eq!(pos.classify(&im, 255, Connectivity::Eight).unwrap(), Corner::Reentrant);
        let next = pos.step(&im, 255, Connectivity::Eight).unwrap();
        assert_eq!(next, Position::new(1, 2, Direction::Left));
    }

    #[test]
    fn reentrant_corner_hops_diagonal_under_four() {
        let mut im = Im::<u8, 1>::new(4, 4);
        fill_rect(&mut im, 2, 1, 1, 1, 255);
        fill_rect(&mut im, 1, 2, 2, 1, 255);

        let pos = Position::new(2, 1, Direction::Down);
        let next = pos.step(&im, 255, Connectivity::Four).unwrap();
        assert_eq!(next, Position::new(1, 2, Direction::Left));
    }

    #[test]
    fn lookahead_outside_grid_counts_as_different() {
        let im = label_im_from_ascii(
            r#"
                11
                11
            "#,
        );
        // Walking down the left edge of the image: ahead leaves the grid.
        let pos = Position::new(0, 1, Direction::Down);
        assert_eq!(pos.classify(&im, 1, Connectivity::Eight).unwrap(), Corner::Convex);

        // Walking right along the bottom: the diagonal is outside, ahead is inside.
        let pos = Position::new(0, 1, Direction::Right);
        assert_eq!(pos.classify(&im, 1, Connectivity::Four).unwrap(), Corner::Straight);
    }
}
