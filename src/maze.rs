use log::{debug, info};
use rand::Rng;

use crate::coordinates::Cartesian2DCoordinate;
use crate::exits::MazeExit;
use crate::generators::{self, DEFAULT_WALL_PROBABILITY};
use crate::grid::OccupancyGrid;
use crate::headings::Heading;
use crate::navigator::{Manoeuvre, Navigator, ReleaseRule};
use crate::renderers;
use crate::surfaces::RenderSurface;
use crate::units::{GridSize, TicksCount, WallProbability};
use crate::watchdog::{Verdict, Watchdog};

#[derive(Debug, Copy, Clone)]
pub struct MazeOptions {
    size: GridSize,
    wall_probability: WallProbability,
    release_rule: ReleaseRule,
}

impl Default for MazeOptions {
    fn default() -> MazeOptions {
        MazeOptions {
            size: GridSize(51),
            wall_probability: DEFAULT_WALL_PROBABILITY,
            release_rule: ReleaseRule::default(),
        }
    }
}

impl MazeOptions {
    pub fn size(&self) -> GridSize {
        self.size
    }
    pub fn wall_probability(&self) -> WallProbability {
        self.wall_probability
    }
    pub fn release_rule(&self) -> ReleaseRule {
        self.release_rule
    }
}

#[derive(Debug)]
pub struct MazeOptionsBuilder {
    options: MazeOptions,
}

impl MazeOptionsBuilder {
    pub fn new() -> MazeOptionsBuilder {
        MazeOptionsBuilder { options: MazeOptions::default() }
    }
    pub fn size(mut self, size: GridSize) -> MazeOptionsBuilder {
        self.options.size = size;
        self
    }
    pub fn wall_probability(mut self, wall_probability: WallProbability) -> MazeOptionsBuilder {
        self.options.wall_probability = wall_probability;
        self
    }
    pub fn release_rule(mut self, release_rule: ReleaseRule) -> MazeOptionsBuilder {
        self.options.release_rule = release_rule;
        self
    }
    pub fn build(self) -> MazeOptions {
        self.options
    }
}

impl Default for MazeOptionsBuilder {
    fn default() -> MazeOptionsBuilder {
        MazeOptionsBuilder::new()
    }
}

/// Result of asking the maze to move on by one tick.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Progress {
    Moved(Manoeuvre),
    /// The navigator is standing on the exit and no longer moves.
    AtExit,
}

/// A framed grid, its exit and the navigator trying to reach it.
#[derive(Clone, Debug)]
pub struct Maze {
    grid: OccupancyGrid,
    exit: MazeExit,
    navigator: Navigator,
}

impl Maze {
    /// Generate a maze with the default options and the thread local random generator.
    pub fn new(size: GridSize) -> Maze {
        let options = MazeOptionsBuilder::new().size(size).build();
        Maze::generate(&options, &mut rand::thread_rng())
    }

    /// Generate a random framed grid with an exit in the frame and a navigator at the centre.
    ///
    /// The exit, the cell inside the frame next to it, the centre and the centre's four
    /// neighbours are all cleared of walls. The size is not validated: it should be odd and at
    /// least 5.
    pub fn generate<R>(options: &MazeOptions, rng: &mut R) -> Maze
        where R: Rng + ?Sized
    {
        let size = options.size();
        let mut grid = generators::framed_random_fill(size, options.wall_probability(), rng);
        let exit = MazeExit::random(size, rng);
        let start = grid.centre();

        grid.set_open(exit.coordinate());
        if let Some(egress) = exit.egress_neighbour() {
            grid.set_open(egress);
        }

        grid.set_open(start);
        let headings = [Heading::Up, Heading::Right, Heading::Down, Heading::Left];
        for neighbour in headings.iter().filter_map(|h| h.step_from(start)) {
            grid.set_open(neighbour);
        }

        debug!("Exit at ({}, {}) on the {:?} side, start at ({}, {})",
               exit.coordinate().x, exit.coordinate().y, exit.side(), start.x, start.y);

        Maze::from_parts(grid, exit, Navigator::new(start, options.release_rule()))
    }

    /// Assemble a maze as is, without clearing any cells.
    pub fn from_parts(grid: OccupancyGrid, exit: MazeExit, navigator: Navigator) -> Maze {
        Maze {
            grid,
            exit,
            navigator,
        }
    }

    #[inline]
    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    #[inline]
    pub fn exit(&self) -> &MazeExit {
        &self.exit
    }

    #[inline]
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn is_solved(&self) -> bool {
        self.navigator.position() == self.exit.coordinate()
    }

    /// Move the navigator on by one step, unless it has already reached the exit.
    pub fn update(&mut self) -> Progress {
        if self.is_solved() {
            return Progress::AtExit;
        }

        let manoeuvre = self.navigator.update(&self.grid);
        if self.is_solved() {
            let Cartesian2DCoordinate { x, y } = self.exit.coordinate();
            info!("Navigator reached the exit at ({}, {})", x, y);
        }
        Progress::Moved(manoeuvre)
    }

    /// Paint the walls and the navigator onto the unit square of the surface's current
    /// transform.
    pub fn render<S>(&self, surface: &mut S)
        where S: RenderSurface + ?Sized
    {
        renderers::render_maze(surface, &self.grid, &self.navigator);
    }

    /// Update until the exit is reached, the walk repeats itself or `max_ticks` updates happened.
    pub fn run(&mut self, max_ticks: Option<TicksCount>) -> Verdict {
        let mut watchdog = Watchdog::new(max_ticks);
        loop {
            let verdict = watchdog.observe(self.navigator.state(), self.is_solved());
            if verdict.is_finished() {
                return verdict;
            }
            self.update();
            watchdog.tick();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exits::FrameSide;
    use crate::generators::{ring_of, Ring};
    use crate::navigator::Mode;
    use quickcheck::quickcheck;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    /// A maze whose only walls are the frame, with the exit carved into it.
    fn open_frame_maze(n: usize, side: FrameSide, along: u32, rule: ReleaseRule) -> Maze {
        let mut rng = XorShiftRng::seed_from_u64(0);
        let mut grid = generators::framed_random_fill(GridSize(n), WallProbability(0.0), &mut rng);
        let exit = MazeExit::on_side(GridSize(n), side, along);
        grid.set_open(exit.coordinate());
        let start = grid.centre();
        Maze::from_parts(grid, exit, Navigator::new(start, rule))
    }

    #[test]
    fn generation_clears_exit_and_start() {
        let mut rng = XorShiftRng::seed_from_u64(42);
        let options = MazeOptionsBuilder::new()
            .size(GridSize(21))
            .wall_probability(WallProbability(1.0))
            .build();
        let maze = Maze::generate(&options, &mut rng);
        let g = maze.grid();
        let exit = maze.exit();

        assert!(g.is_open(exit.coordinate()));
        assert!(g.is_open(exit.egress_neighbour().expect("inside the grid")));

        let start = maze.navigator().position();
        assert_eq!(start, gc(10, 10));
        for &c in &[start, gc(10, 9), gc(11, 10), gc(10, 11), gc(9, 10)] {
            assert!(g.is_open(c), "{:?} should be open", c);
        }
        // everything else inside the frame is still a wall
        assert!(g.is_wall(gc(11, 11)));
        assert!(g.is_wall(gc(10, 8)));
    }

    #[test]
    fn initial_navigator_state() {
        let maze = Maze::new(GridSize(11));
        let n = maze.navigator();
        assert_eq!(n.position(), gc(5, 5));
        assert_eq!(n.heading(), Heading::Up);
        assert_eq!(n.mode(), Mode::Following);
    }

    #[test]
    fn escapes_an_open_frame_from_every_side() {
        let n = 11;
        for &side in &[FrameSide::Top, FrameSide::Right, FrameSide::Bottom, FrameSide::Left] {
            for along in 2..=(n as u32 - 3) {
                let mut maze = open_frame_maze(n, side, along, ReleaseRule::NetRotation);
                match maze.run(Some(TicksCount(10_000))) {
                    Verdict::Escaped { .. } => assert!(maze.is_solved()),
                    other => panic!("{:?} exit at {} ended with {:?}", side, along, other),
                }
            }
        }
    }

    #[test]
    fn absolute_heading_rule_circles_past_a_left_exit() {
        let mut maze = open_frame_maze(11, FrameSide::Left, 4, ReleaseRule::AbsoluteHeading);
        match maze.run(Some(TicksCount(10_000))) {
            Verdict::Trapped { .. } => assert!(!maze.is_solved()),
            other => panic!("expected a trap, got {:?}", other),
        }

        let mut maze = open_frame_maze(11, FrameSide::Top, 3, ReleaseRule::AbsoluteHeading);
        assert!(matches!(maze.run(Some(TicksCount(10_000))), Verdict::Escaped { .. }));
    }

    #[test]
    fn sealed_chamber_is_a_trap() {
        let grid = OccupancyGrid::from_rows(&[".........",
                                              "#########",
                                              "#.......#",
                                              "#.#####.#",
                                              "#.#...#.#",
                                              "#.#####.#",
                                              "#.......#",
                                              "####.####",
                                              "........."]).expect("square grid");
        let exit = MazeExit::on_side(GridSize(9), FrameSide::Bottom, 4);
        for &rule in &[ReleaseRule::NetRotation, ReleaseRule::AbsoluteHeading] {
            let mut maze = Maze::from_parts(grid.clone(), exit, Navigator::new(gc(4, 4), rule));
            // one lap around the three cell room
            assert_eq!(maze.run(Some(TicksCount(100_000))),
                       Verdict::Trapped { ticks: TicksCount(9) },
                       "{:?}", rule);
            assert!(!maze.is_solved());
        }
    }

    #[test]
    fn updates_freeze_at_the_exit() {
        let mut maze = open_frame_maze(9, FrameSide::Top, 4, ReleaseRule::default());
        // straight up from the centre
        for _ in 0..3 {
            assert_eq!(maze.update(), Progress::Moved(Manoeuvre::Forward));
        }
        assert!(maze.is_solved());

        let before = maze.navigator().state();
        let heading = maze.navigator().heading();
        for _ in 0..5 {
            assert_eq!(maze.update(), Progress::AtExit);
        }
        assert_eq!(maze.navigator().state(), before);
        assert_eq!(maze.navigator().heading(), heading);
    }

    quickcheck! {
        fn generated_frame_has_a_single_gap(seed: u64, half_size: u8) -> bool {
            let n = 7 + 2 * (half_size as usize % 20);
            let size = GridSize(n);
            let mut rng = XorShiftRng::seed_from_u64(seed);
            let options = MazeOptionsBuilder::new().size(size).build();
            let maze = Maze::generate(&options, &mut rng);
            let g = maze.grid();

            let border_open = g.iter()
                .filter(|&c| ring_of(size, c) == Ring::Border)
                .all(|c| g.is_open(c));
            let frame_gaps: Vec<_> = g.iter()
                .filter(|&c| ring_of(size, c) == Ring::Frame && g.is_open(c))
                .collect();
            border_open && frame_gaps == vec![maze.exit().coordinate()]
        }
    }
}
