use rand::Rng;

use crate::coordinates::Cartesian2DCoordinate;
use crate::headings::Heading;
use crate::units::GridSize;

/// Which side of the frame wall an exit is cut into.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum FrameSide {
    Top,
    Right,
    Bottom,
    Left,
}

impl FrameSide {
    /// Map a uniform draw in [0, 1) onto one of four equally likely sides.
    pub fn from_unit_draw(draw: f64) -> FrameSide {
        if draw < 0.25 {
            FrameSide::Top
        } else if draw < 0.5 {
            FrameSide::Right
        } else if draw < 0.75 {
            FrameSide::Bottom
        } else {
            FrameSide::Left
        }
    }

    /// Direction pointing from this side into the maze interior.
    pub fn inward(self) -> Heading {
        match self {
            FrameSide::Top => Heading::Down,
            FrameSide::Right => Heading::Left,
            FrameSide::Bottom => Heading::Up,
            FrameSide::Left => Heading::Right,
        }
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct MazeExit {
    coordinate: Cartesian2DCoordinate,
    side: FrameSide,
}

impl MazeExit {
    /// An exit on `side` of the frame of a `size` grid, `along` cells from the frame's
    /// top/left edge of the grid.
    pub fn on_side(size: GridSize, side: FrameSide, along: u32) -> MazeExit {
        let far = size.0.saturating_sub(2) as u32;
        let coordinate = match side {
            FrameSide::Top => Cartesian2DCoordinate::new(along, 1),
            FrameSide::Right => Cartesian2DCoordinate::new(far, along),
            FrameSide::Bottom => Cartesian2DCoordinate::new(along, far),
            FrameSide::Left => Cartesian2DCoordinate::new(1, along),
        };
        MazeExit { coordinate, side }
    }

    /// Pick a side uniformly and a position on it uniformly in [2, N-3], avoiding the frame's
    /// corners.
    pub fn random<R>(size: GridSize, rng: &mut R) -> MazeExit
        where R: Rng + ?Sized
    {
        let last = size.0.saturating_sub(3).max(2) as u32;
        let along = rng.gen_range(2..=last);
        let side = FrameSide::from_unit_draw(rng.gen::<f64>());
        MazeExit::on_side(size, side, along)
    }

    #[inline]
    pub fn coordinate(&self) -> Cartesian2DCoordinate {
        self.coordinate
    }

    #[inline]
    pub fn side(&self) -> FrameSide {
        self.side
    }

    /// The cell next to the exit on the inside of the frame. It is carved out along with the
    /// exit itself so the gap is reachable from the interior.
    pub fn egress_neighbour(&self) -> Option<Cartesian2DCoordinate> {
        self.side.inward().step_from(self.coordinate)
    }
}
