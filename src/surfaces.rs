//! Drawing surfaces with a canvas-like transform stack.
//!
//! Drawing commands are given in logical coordinates, mapped through the current affine
//! transform to pixels, and rasterized with a scanline polygon fill sampling pixel centres.
//! A backend only has to provide its pixel size and a way to fill one horizontal run of pixels.

use std::path::Path;

use image::{ImageResult, Rgb, RgbImage};
use smallvec::SmallVec;

use crate::units::{Height, Width};

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Colour {
        Colour { r, g, b }
    }
}

pub const BLACK: Colour = Colour::rgb(0, 0, 0);
pub const WHITE: Colour = Colour::rgb(0xff, 0xff, 0xff);

impl From<Colour> for Rgb<u8> {
    fn from(c: Colour) -> Rgb<u8> {
        Rgb([c.r, c.g, c.b])
    }
}

#[derive(PartialEq, Copy, Clone, Debug)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }
}

/// The 2D affine map `(x, y) -> (a*x + c*y + e, b*x + d*y + f)`.
#[derive(PartialEq, Copy, Clone, Debug)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Affine {
    pub const IDENTITY: Affine = Affine { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 };

    pub fn scale(sx: f64, sy: f64) -> Affine {
        Affine { a: sx, d: sy, ..Affine::IDENTITY }
    }

    pub fn translate(tx: f64, ty: f64) -> Affine {
        Affine { e: tx, f: ty, ..Affine::IDENTITY }
    }

    /// The map applying `inner` first and then `self`.
    pub fn compose(&self, inner: &Affine) -> Affine {
        Affine {
            a: self.a * inner.a + self.c * inner.b,
            b: self.b * inner.a + self.d * inner.b,
            c: self.a * inner.c + self.c * inner.d,
            d: self.b * inner.c + self.d * inner.d,
            e: self.a * inner.e + self.c * inner.f + self.e,
            f: self.b * inner.e + self.d * inner.f + self.f,
        }
    }

    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        Point::new(self.a * p.x + self.c * p.y + self.e,
                   self.b * p.x + self.d * p.y + self.f)
    }
}

#[derive(Copy, Clone, Debug)]
struct DrawState {
    transform: Affine,
    fill: Colour,
}

/// Current transform and fill colour plus the states pushed by `save`.
#[derive(Clone, Debug)]
pub struct StateStack {
    current: DrawState,
    saved: Vec<DrawState>,
}

impl Default for StateStack {
    fn default() -> StateStack {
        StateStack {
            current: DrawState {
                transform: Affine::IDENTITY,
                fill: BLACK,
            },
            saved: Vec::new(),
        }
    }
}

impl StateStack {
    pub fn transform(&self) -> Affine {
        self.current.transform
    }

    pub fn fill(&self) -> Colour {
        self.current.fill
    }
}

pub trait RenderSurface {
    fn pixel_size(&self) -> (Width, Height);

    fn states(&self) -> &StateStack;

    fn states_mut(&mut self) -> &mut StateStack;

    /// Paint pixels `x_start..x_end` of pixel row `y`, already clipped to the surface.
    fn fill_span(&mut self, y: u32, x_start: u32, x_end: u32, colour: Colour);

    /// Reset every pixel to the background. Transform state is untouched.
    fn clear(&mut self);

    fn save(&mut self) {
        let states = self.states_mut();
        let current = states.current;
        states.saved.push(current);
    }

    /// Return to the state of the matching `save`. Unbalanced restores are ignored.
    fn restore(&mut self) {
        let states = self.states_mut();
        if let Some(previous) = states.saved.pop() {
            states.current = previous;
        }
    }

    /// Multiply the current transform by `t`; later drawing goes through `t` first.
    fn transform(&mut self, t: Affine) {
        let states = self.states_mut();
        states.current.transform = states.current.transform.compose(&t);
    }

    /// Replace the current transform.
    fn set_transform(&mut self, t: Affine) {
        self.states_mut().current.transform = t;
    }

    fn set_fill_colour(&mut self, colour: Colour) {
        self.states_mut().current.fill = colour;
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let corners = [Point::new(x, y),
                       Point::new(x + width, y),
                       Point::new(x + width, y + height),
                       Point::new(x, y + height)];
        self.fill_polygon(&corners);
    }

    /// Fill the closed polygon through `points` using the even-odd rule.
    fn fill_polygon(&mut self, points: &[Point]) {
        let transform = self.states().transform();
        let colour = self.states().fill();
        let pixels: SmallVec<[Point; 8]> = points.iter().map(|&p| transform.apply(p)).collect();
        let (Width(width), Height(height)) = self.pixel_size();

        for (y, x_start, x_end) in scanline_spans(&pixels, width, height) {
            self.fill_span(y, x_start, x_end, colour);
        }
    }
}

/// The horizontal pixel runs `(row, x_start, x_end)` whose centres lie inside `polygon`,
/// clipped to a `width` x `height` pixel area.
pub fn scanline_spans(polygon: &[Point], width: u32, height: u32) -> Vec<(u32, u32, u32)> {
    let mut spans = Vec::new();
    if polygon.len() < 3 || width == 0 || height == 0 {
        return spans;
    }

    let (min_y, max_y) = polygon.iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
    let first_row = (min_y - 0.5).ceil().max(0.0) as u32;
    let end_row = ((max_y - 0.5).ceil().max(0.0) as u32).min(height);

    let mut crossings: SmallVec<[f64; 8]> = SmallVec::new();
    for row in first_row..end_row {
        let centre_y = f64::from(row) + 0.5;
        crossings.clear();

        let edges = polygon.iter().zip(polygon.iter().cycle().skip(1));
        for (p, q) in edges {
            let (top, bottom) = if p.y <= q.y { (p, q) } else { (q, p) };
            if top.y <= centre_y && centre_y < bottom.y {
                let t = (centre_y - top.y) / (bottom.y - top.y);
                crossings.push(top.x + t * (bottom.x - top.x));
            }
        }
        crossings.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        for pair in crossings.chunks(2) {
            if let &[left, right] = pair {
                let x_start = (left - 0.5).ceil().max(0.0) as u32;
                let x_end = ((right - 0.5).ceil().max(0.0) as u32).min(width);
                if x_start < x_end {
                    spans.push((row, x_start, x_end));
                }
            }
        }
    }
    spans
}

/// An in-memory RGB image to draw frames into and save as PNG files.
#[derive(Debug)]
pub struct ImageSurface {
    image: RgbImage,
    background: Colour,
    states: StateStack,
}

impl ImageSurface {
    pub fn new(width: Width, height: Height, background: Colour) -> ImageSurface {
        ImageSurface {
            image: RgbImage::from_pixel(width.0, height.0, background.into()),
            background,
            states: StateStack::default(),
        }
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Colour of the pixel at `(x, y)`, None when outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Colour> {
        if x < self.image.width() && y < self.image.height() {
            let Rgb([r, g, b]) = *self.image.get_pixel(x, y);
            Some(Colour::rgb(r, g, b))
        } else {
            None
        }
    }

    /// Always PNG format, whatever the file extension.
    pub fn save_png(&self, path: &Path) -> ImageResult<()> {
        self.image.save_with_format(path, image::ImageFormat::Png)
    }
}

impl RenderSurface for ImageSurface {
    fn pixel_size(&self) -> (Width, Height) {
        (Width(self.image.width()), Height(self.image.height()))
    }

    fn states(&self) -> &StateStack {
        &self.states
    }

    fn states_mut(&mut self) -> &mut StateStack {
        &mut self.states
    }

    fn fill_span(&mut self, y: u32, x_start: u32, x_end: u32, colour: Colour) {
        let pixel: Rgb<u8> = colour.into();
        for x in x_start..x_end {
            self.image.put_pixel(x, y, pixel);
        }
    }

    fn clear(&mut self) {
        let background: Rgb<u8> = self.background.into();
        for pixel in self.image.pixels_mut() {
            *pixel = background;
        }
    }
}
