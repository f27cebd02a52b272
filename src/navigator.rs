//! A wall following agent that only ever looks at the cells right in front of it.
//!
//! While `Following` it walks straight ahead until it bumps into a wall. It then turns
//! clockwise and starts `Hugging` the obstacle, keeping it on its left hand side. Whenever the
//! release rule holds it goes back to walking straight.

use log::trace;

use crate::coordinates::Cartesian2DCoordinate;
use crate::grid::OccupancyGrid;
use crate::headings::Heading;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum Mode {
    Following,
    Hugging,
}

/// When does a `Hugging` navigator let go of the wall and walk straight again?
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum ReleaseRule {
    /// As soon as it faces up again, however many turns it has made.
    AbsoluteHeading,
    /// Only when all of its clockwise and counter-clockwise turns cancel out.
    NetRotation,
}

impl Default for ReleaseRule {
    fn default() -> ReleaseRule {
        ReleaseRule::NetRotation
    }
}

/// What a single update did.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Manoeuvre {
    /// Stepped one cell along the heading.
    Forward,
    /// Turned a quarter clockwise without moving.
    TurnClockwise,
    /// Stepped forward and turned a quarter counter-clockwise around a passed corner.
    WrapCorner,
}

/// Cells inspected relative to the navigator's position and heading.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
enum Probe {
    Ahead,
    /// One step ahead and one step to the left: the wall being hugged.
    AheadLeft,
}

/// Everything that decides the navigator's future moves on a fixed grid.
///
/// Under `ReleaseRule::AbsoluteHeading` only the heading matters, otherwise the full turn count.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct NavigatorState {
    pub position: Cartesian2DCoordinate,
    pub mode: Mode,
    pub turns: i64,
}

#[derive(Clone, Debug)]
pub struct Navigator {
    position: Cartesian2DCoordinate,
    quarter_turns: i64,
    mode: Mode,
    release_rule: ReleaseRule,
}

impl Navigator {
    /// A navigator at `position` facing up and not touching any wall.
    pub fn new(position: Cartesian2DCoordinate, release_rule: ReleaseRule) -> Navigator {
        Navigator::with_state(position, 0, Mode::Following, release_rule)
    }

    /// A navigator with an arbitrary net turn count and mode.
    pub fn with_state(position: Cartesian2DCoordinate,
                      quarter_turns: i64,
                      mode: Mode,
                      release_rule: ReleaseRule)
                      -> Navigator {
        Navigator {
            position,
            quarter_turns,
            mode,
            release_rule,
        }
    }

    #[inline]
    pub fn position(&self) -> Cartesian2DCoordinate {
        self.position
    }

    #[inline]
    pub fn heading(&self) -> Heading {
        Heading::from_quarter_turns(self.quarter_turns)
    }

    /// Net quarter turns made so far, clockwise positive.
    #[inline]
    pub fn quarter_turns(&self) -> i64 {
        self.quarter_turns
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn release_rule(&self) -> ReleaseRule {
        self.release_rule
    }

    pub fn state(&self) -> NavigatorState {
        let turns = match self.release_rule {
            ReleaseRule::AbsoluteHeading => self.heading().quarter_turns(),
            ReleaseRule::NetRotation => self.quarter_turns,
        };
        NavigatorState {
            position: self.position,
            mode: self.mode,
            turns,
        }
    }

    /// Take one step of the wall following state machine on `grid`.
    ///
    /// The grid is only read. Cells beyond the edge of the grid count as walls.
    pub fn update(&mut self, grid: &OccupancyGrid) -> Manoeuvre {
        let ahead = self.open_cell(grid, Probe::Ahead);

        let manoeuvre = match self.mode {
            Mode::Following => {
                if let Some(next) = ahead {
                    self.position = next;
                    Manoeuvre::Forward
                } else {
                    self.quarter_turns += 1;
                    self.mode = Mode::Hugging;
                    Manoeuvre::TurnClockwise
                }
            }
            Mode::Hugging => {
                let manoeuvre = match ahead {
                    None => {
                        self.quarter_turns += 1;
                        Manoeuvre::TurnClockwise
                    }
                    Some(next) => {
                        let wall_alongside = self.open_cell(grid, Probe::AheadLeft).is_none();
                        self.position = next;
                        if wall_alongside {
                            Manoeuvre::Forward
                        } else {
                            self.quarter_turns -= 1;
                            Manoeuvre::WrapCorner
                        }
                    }
                };
                if self.is_released() {
                    self.mode = Mode::Following;
                }
                manoeuvre
            }
        };

        trace!("{:?} -> at ({}, {}) facing {} {:?}",
               manoeuvre, self.position.x, self.position.y, self.heading(), self.mode);
        manoeuvre
    }

    fn is_released(&self) -> bool {
        match self.release_rule {
            ReleaseRule::AbsoluteHeading => self.heading() == Heading::Up,
            ReleaseRule::NetRotation => self.quarter_turns == 0,
        }
    }

    fn probe(&self, probe: Probe) -> Option<Cartesian2DCoordinate> {
        let heading = self.heading();
        let ahead = heading.step_from(self.position);
        match probe {
            Probe::Ahead => ahead,
            Probe::AheadLeft => ahead.and_then(|c| heading.counter_clockwise().step_from(c)),
        }
    }

    /// The probed cell if it is open.
    fn open_cell(&self, grid: &OccupancyGrid, probe: Probe) -> Option<Cartesian2DCoordinate> {
        self.probe(probe).filter(|&c| grid.is_open(c))
    }
}
