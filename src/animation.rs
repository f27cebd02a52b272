use crate::maze::{Maze, Progress};
use crate::surfaces::{Affine, Colour, ImageSurface, RenderSurface};
use crate::units::{Height, TicksCount, Width};
use crate::watchdog::{Verdict, Watchdog};

/// Everything one animation needs between frames: the surface it draws on, the maze, and the
/// frame counter.
///
/// Each `tick` moves the navigator one step and redraws the whole maze. The host calls it once
/// per display refresh.
#[derive(Debug)]
pub struct Animation<S: RenderSurface> {
    surface: S,
    maze: Maze,
    frame: u64,
    watchdog: Watchdog,
}

impl<S: RenderSurface> Animation<S> {
    /// Maps the unit square onto the whole surface. `max_ticks` only affects the reported
    /// verdict, the maze is still updated after it is reached.
    pub fn new(mut surface: S, maze: Maze, max_ticks: Option<TicksCount>) -> Animation<S> {
        fit_unit_square(&mut surface);

        let mut watchdog = Watchdog::new(max_ticks);
        watchdog.observe(maze.navigator().state(), maze.is_solved());

        Animation {
            surface,
            maze,
            frame: 0,
            watchdog,
        }
    }

    /// Update the maze then draw it from scratch.
    pub fn tick(&mut self) -> Verdict {
        self.surface.clear();

        let before = self.watchdog.verdict();
        if let Progress::Moved(_) = self.maze.update() {
            self.watchdog.tick();
            let verdict = self.watchdog.observe(self.maze.navigator().state(), self.maze.is_solved());
            if verdict != before {
                verdict.log();
            }
        }

        self.maze.render(&mut self.surface);
        self.frame += 1;
        self.watchdog.verdict()
    }

    /// Tick until the walk is over, returning the final verdict.
    pub fn run_to_end(&mut self) -> Verdict {
        loop {
            let verdict = self.tick();
            if verdict.is_finished() {
                return verdict;
            }
        }
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[inline]
    pub fn verdict(&self) -> Verdict {
        self.watchdog.verdict()
    }

    #[inline]
    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    #[inline]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[inline]
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}

/// Scale the unit square the maze is drawn in up to the surface's full pixel size.
fn fit_unit_square<S>(surface: &mut S)
    where S: RenderSurface + ?Sized
{
    let (Width(width), Height(height)) = surface.pixel_size();
    surface.set_transform(Affine::scale(f64::from(width), f64::from(height)));
}

/// Draw the maze as it stands onto a new image, without animating anything.
pub fn snapshot(maze: &Maze, width: Width, height: Height, background: Colour) -> ImageSurface {
    let mut surface = ImageSurface::new(width, height, background);
    fit_unit_square(&mut surface);
    maze.render(&mut surface);
    surface
}
