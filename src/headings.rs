use std::fmt;

use crate::coordinates::Cartesian2DCoordinate;

/// Absolute facing direction on the grid. Up is towards row 0.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum Heading {
    Up,
    Right,
    Down,
    Left,
}

const HEADINGS_COUNT: i64 = 4;

/// Clockwise order, indexed by the number of quarter turns away from `Up`.
const CLOCKWISE: [Heading; HEADINGS_COUNT as usize] =
    [Heading::Up, Heading::Right, Heading::Down, Heading::Left];

impl Heading {
    /// The heading reached after `quarter_turns` clockwise quarter turns from `Up`.
    /// Negative counts turn counter-clockwise, so -5 and 3 both give `Left`.
    pub fn from_quarter_turns(quarter_turns: i64) -> Heading {
        CLOCKWISE[quarter_turns.rem_euclid(HEADINGS_COUNT) as usize]
    }

    /// Quarter turns clockwise from `Up`, in 0..4.
    pub fn quarter_turns(self) -> i64 {
        match self {
            Heading::Up => 0,
            Heading::Right => 1,
            Heading::Down => 2,
            Heading::Left => 3,
        }
    }

    #[inline]
    pub fn clockwise(self) -> Heading {
        Heading::from_quarter_turns(self.quarter_turns() + 1)
    }

    #[inline]
    pub fn counter_clockwise(self) -> Heading {
        Heading::from_quarter_turns(self.quarter_turns() - 1)
    }

    /// Grid delta `(dx, dy)` of one step in this direction.
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Heading::Up => (0, -1),
            Heading::Right => (1, 0),
            Heading::Down => (0, 1),
            Heading::Left => (-1, 0),
        }
    }

    /// The neighbour of `coord` one step in this direction, if representable.
    #[inline]
    pub fn step_from(self, coord: Cartesian2DCoordinate) -> Option<Cartesian2DCoordinate> {
        let (dx, dy) = self.delta();
        coord.offset(dx, dy)
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            Heading::Up => "up",
            Heading::Right => "right",
            Heading::Down => "down",
            Heading::Left => "left",
        };
        write!(f, "{}", name)
    }
}
