use fnv::{FnvHashMap, FnvHashSet};
use log::{info, warn};

use crate::coordinates::Cartesian2DCoordinate;
use crate::headings::Heading;
use crate::navigator::{Mode, NavigatorState};
use crate::units::TicksCount;

// Room for the states of a typical walk on the default 51x51 grid.
const SEEN_STATES_CAPACITY: usize = 1024;

/// How a walk is going after the latest tick.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Verdict {
    Walking,
    Escaped { ticks: TicksCount },
    /// The navigator is back in a state it has already been in, or is winding around the same
    /// obstacle with no way of letting go of it, so it will loop forever.
    Trapped { ticks: TicksCount },
    OutOfTicks { ticks: TicksCount },
}

impl Verdict {
    pub fn is_finished(&self) -> bool {
        *self != Verdict::Walking
    }

    /// Log a finished verdict, escapes at info level and the rest as warnings.
    pub fn log(&self) {
        match *self {
            Verdict::Walking => {}
            Verdict::Escaped { ticks } => info!("Escaped after {} ticks", ticks.0),
            Verdict::Trapped { ticks } => warn!("Navigator is walking in circles after {} ticks", ticks.0),
            Verdict::OutOfTicks { ticks } => warn!("Gave up watching after {} ticks", ticks.0),
        }
    }
}

/// The turn count last seen while hugging from some cell and heading, and how many releases
/// from hugging had been seen at that time.
#[derive(Copy, Clone, Debug)]
struct HugMark {
    turns: i64,
    releases: u64,
}

/// Watches a deterministic walk on a fixed grid for escape, cycles and an optional tick limit.
#[derive(Debug)]
pub struct Watchdog {
    seen: FnvHashSet<NavigatorState>,
    hugs: FnvHashMap<(Cartesian2DCoordinate, Heading), HugMark>,
    releases: u64,
    ticks: TicksCount,
    max_ticks: Option<TicksCount>,
    verdict: Verdict,
}

impl Watchdog {
    pub fn new(max_ticks: Option<TicksCount>) -> Watchdog {
        Watchdog {
            seen: FnvHashSet::with_capacity_and_hasher(SEEN_STATES_CAPACITY, Default::default()),
            hugs: FnvHashMap::with_capacity_and_hasher(SEEN_STATES_CAPACITY, Default::default()),
            releases: 0,
            ticks: TicksCount::default(),
            max_ticks,
            verdict: Verdict::Walking,
        }
    }

    #[inline]
    pub fn ticks(&self) -> TicksCount {
        self.ticks
    }

    #[inline]
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Record the navigator's state before its next move.
    ///
    /// Once a verdict other than `Walking` is reached it sticks and later observations are
    /// ignored.
    pub fn observe(&mut self, state: NavigatorState, at_exit: bool) -> Verdict {
        if self.verdict.is_finished() {
            return self.verdict;
        }

        let ticks = self.ticks;
        self.verdict = if at_exit {
            Verdict::Escaped { ticks }
        } else if !self.seen.insert(state) || self.is_winding(state) {
            Verdict::Trapped { ticks }
        } else if self.max_ticks.map_or(false, |max| ticks >= max) {
            Verdict::OutOfTicks { ticks }
        } else {
            Verdict::Walking
        };
        self.verdict
    }

    /// Does a hugging navigator stand where it stood before, facing the same way, having turned
    /// further away from a net rotation of 0 without being released in between?
    ///
    /// Moves depend only on the position, heading and mode until the turn count reaches 0, and a
    /// count that changes one quarter at a time while moving away from 0 never gets there. The
    /// walk since the last visit then repeats forever.
    fn is_winding(&mut self, state: NavigatorState) -> bool {
        match state.mode {
            Mode::Following => {
                self.releases += 1;
                false
            }
            Mode::Hugging => {
                let key = (state.position, Heading::from_quarter_turns(state.turns));
                let mark = HugMark {
                    turns: state.turns,
                    releases: self.releases,
                };
                match self.hugs.insert(key, mark) {
                    Some(previous) => {
                        let drift = state.turns - previous.turns;
                        previous.releases == self.releases &&
                        previous.turns != 0 &&
                        drift.signum() == previous.turns.signum()
                    }
                    None => false,
                }
            }
        }
    }

    /// Count one navigation step.
    pub fn tick(&mut self) {
        self.ticks.0 += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinates::Cartesian2DCoordinate;
    use crate::navigator::Mode;

    fn state(x: u32, turns: i64) -> NavigatorState {
        NavigatorState {
            position: Cartesian2DCoordinate::new(x, 1),
            mode: Mode::Hugging,
            turns,
        }
    }

    fn following(x: u32) -> NavigatorState {
        NavigatorState {
            mode: Mode::Following,
            ..state(x, 0)
        }
    }

    #[test]
    fn repeated_state_is_a_trap() {
        let mut w = Watchdog::new(None);
        assert_eq!(w.observe(state(1, 0), false), Verdict::Walking);
        w.tick();
        assert_eq!(w.observe(state(2, 0), false), Verdict::Walking);
        w.tick();
        assert_eq!(w.observe(state(2, 1), false), Verdict::Walking);
        w.tick();
        assert_eq!(w.observe(state(1, 0), false), Verdict::Trapped { ticks: TicksCount(3) });
    }

    #[test]
    fn escape_wins() {
        let mut w = Watchdog::new(Some(TicksCount(0)));
        assert_eq!(w.observe(state(1, 0), true), Verdict::Escaped { ticks: TicksCount(0) });
    }

    #[test]
    fn tick_limit() {
        let mut w = Watchdog::new(Some(TicksCount(2)));
        for x in 0..2 {
            assert_eq!(w.observe(state(x, 0), false), Verdict::Walking);
            w.tick();
        }
        assert_eq!(w.observe(state(9, 0), false), Verdict::OutOfTicks { ticks: TicksCount(2) });
    }

    #[test]
    fn verdicts_stick() {
        let mut w = Watchdog::new(None);
        assert!(w.observe(state(1, 0), true).is_finished());
        w.tick();
        assert_eq!(w.observe(state(2, 0), false), Verdict::Escaped { ticks: TicksCount(0) });
        assert_eq!(w.verdict(), Verdict::Escaped { ticks: TicksCount(0) });
        assert_eq!(w.ticks(), TicksCount(1));
    }

    #[test]
    fn winding_away_from_release_is_a_trap() {
        let mut w = Watchdog::new(None);
        assert_eq!(w.observe(state(1, 1), false), Verdict::Walking);
        w.tick();
        assert_eq!(w.observe(state(2, 3), false), Verdict::Walking);
        w.tick();
        // same cell and heading, one lap further clockwise
        assert_eq!(w.observe(state(1, 5), false), Verdict::Trapped { ticks: TicksCount(2) });

        let mut w = Watchdog::new(None);
        assert_eq!(w.observe(state(1, -3), false), Verdict::Walking);
        w.tick();
        assert_eq!(w.observe(state(1, -7), false), Verdict::Trapped { ticks: TicksCount(1) });
    }

    #[test]
    fn winding_back_towards_release_keeps_walking() {
        let mut w = Watchdog::new(None);
        assert_eq!(w.observe(state(1, 5), false), Verdict::Walking);
        w.tick();
        assert_eq!(w.observe(state(1, 1), false), Verdict::Walking);
    }

    #[test]
    fn a_release_in_between_is_not_winding() {
        let mut w = Watchdog::new(None);
        assert_eq!(w.observe(state(1, 1), false), Verdict::Walking);
        w.tick();
        assert_eq!(w.observe(following(2), false), Verdict::Walking);
        w.tick();
        assert_eq!(w.observe(state(1, 5), false), Verdict::Walking);
        w.tick();
        assert_eq!(w.observe(state(1, 9), false), Verdict::Trapped { ticks: TicksCount(3) });
    }
}
