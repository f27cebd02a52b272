use log::{info, warn};
use sdl2::event::Event;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::video::Window;

use crate::animation::Animation;
use crate::maze::Maze;
use crate::surfaces::{Colour, RenderSurface, StateStack};
use crate::units::{Height, TicksCount, Width};

pub struct SdlSetup {
    pub sdl_context: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
}

pub fn init() -> Result<SdlSetup, String> {

    let sdl_context: sdl2::Sdl = sdl2::init()?;
    let video_subsystem: sdl2::VideoSubsystem = sdl_context.video()?;

    Ok(SdlSetup {
        sdl_context,
        video_subsystem,
    })
}

impl From<Colour> for Color {
    fn from(c: Colour) -> Color {
        Color::RGB(c.r, c.g, c.b)
    }
}

/// A window canvas presented with vsync, so one frame is drawn per display refresh.
///
/// Drawing through `RenderSurface` cannot fail, so the first SDL error of a frame is kept and
/// handed back by `present`.
pub struct CanvasSurface {
    canvas: Canvas<Window>,
    background: Colour,
    states: StateStack,
    failure: Option<String>,
}

impl CanvasSurface {
    pub fn new(canvas: Canvas<Window>, background: Colour) -> CanvasSurface {
        CanvasSurface {
            canvas,
            background,
            states: StateStack::default(),
            failure: None,
        }
    }

    /// Show the frame, or return the first drawing error since the last call.
    pub fn present(&mut self) -> Result<(), String> {
        if let Some(e) = self.failure.take() {
            return Err(e);
        }
        self.canvas.present();
        Ok(())
    }
}

/// Keep the first error of `result` in `failure`.
fn latch_failure(failure: &mut Option<String>, result: Result<(), String>) {
    if let Err(e) = result {
        warn!("SDL drawing failed: {}", e);
        failure.get_or_insert(e);
    }
}

impl RenderSurface for CanvasSurface {
    fn pixel_size(&self) -> (Width, Height) {
        let (w, h) = self.canvas.logical_size();
        (Width(w), Height(h))
    }

    fn states(&self) -> &StateStack {
        &self.states
    }

    fn states_mut(&mut self) -> &mut StateStack {
        &mut self.states
    }

    fn fill_span(&mut self, y: u32, x_start: u32, x_end: u32, colour: Colour) {
        self.canvas.set_draw_color(colour);
        let span = Rect::new(x_start as i32, y as i32, x_end - x_start, 1);
        let result = self.canvas.fill_rect(span);
        latch_failure(&mut self.failure, result);
    }

    fn clear(&mut self) {
        self.canvas.set_draw_color(self.background);
        self.canvas.clear();
    }
}

/// Animate `maze` in a `resolution` pixels square window until the window is closed.
pub fn animate_on_screen(maze: Maze,
                         resolution: u32,
                         background: Colour,
                         max_ticks: Option<TicksCount>)
                         -> Result<Maze, String> {

    let sdl_setup = init()?;

    let window = sdl_setup.video_subsystem
        .window("Maze walker", resolution, resolution)
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;
    let mut canvas = window.into_canvas()
        .present_vsync()
        .accelerated()
        .build()
        .map_err(|e| e.to_string())?;
    // The drawing keeps a fixed pixel size however the window is scaled.
    canvas.set_logical_size(resolution, resolution)
        .map_err(|e| e.to_string())?;

    let mut animation = Animation::new(CanvasSurface::new(canvas, background), maze, max_ticks);
    let mut events = sdl_setup.sdl_context.event_pump()?;

    'event: loop {
        for event in events.poll_iter() {
            if let Event::Quit { .. } = event {
                break 'event;
            }
        }

        animation.tick();
        animation.surface_mut().present()?;
    }

    info!("Window closed after {} frames", animation.frame());
    Ok(animation.maze().clone())
}
