use std::f64::consts::PI;

use smallvec::SmallVec;

use crate::grid::OccupancyGrid;
use crate::navigator::Navigator;
use crate::surfaces::{Affine, Colour, Point, RenderSurface, BLACK};

pub const WALL_COLOUR: Colour = BLACK;
pub const NAVIGATOR_COLOUR: Colour = Colour::rgb(0xff, 0x99, 0x00);

/// Gap left around each wall square, in cells.
const WALL_INSET: f64 = 0.05;
const NAVIGATOR_RADIUS: f64 = 0.3;

/// Paint the grid walls and the navigator, with the whole grid mapped onto the surface's
/// current unit square.
pub fn render_maze<S>(surface: &mut S, grid: &OccupancyGrid, navigator: &Navigator)
    where S: RenderSurface + ?Sized
{
    let cells_per_side = grid.size().0 as f64;
    surface.save();
    surface.transform(Affine::scale(1.0 / cells_per_side, 1.0 / cells_per_side));

    render_walls(surface, grid);
    render_navigator(surface, navigator);

    surface.restore();
}

/// Each wall cell is a square slightly smaller than its cell, in cell coordinates.
pub fn render_walls<S>(surface: &mut S, grid: &OccupancyGrid)
    where S: RenderSurface + ?Sized
{
    surface.set_fill_colour(WALL_COLOUR);
    let side = 1.0 - 2.0 * WALL_INSET;
    for wall in grid.iter_walls() {
        surface.fill_rect(f64::from(wall.x) + WALL_INSET, f64::from(wall.y) + WALL_INSET, side, side);
    }
}

/// A triangle centred in the navigator's cell with its tip along the heading, in cell
/// coordinates.
pub fn render_navigator<S>(surface: &mut S, navigator: &Navigator)
    where S: RenderSurface + ?Sized
{
    let position = navigator.position();
    surface.save();
    surface.transform(Affine::translate(f64::from(position.x) + 0.5, f64::from(position.y) + 0.5));
    surface.set_fill_colour(NAVIGATOR_COLOUR);
    surface.fill_polygon(&heading_triangle(navigator.heading().quarter_turns()));
    surface.restore();
}

/// Vertices of the heading marker around the origin, tip first. With y growing downwards a
/// heading of 0 quarter turns points up.
pub fn heading_triangle(quarter_turns: i64) -> SmallVec<[Point; 3]> {
    let tip = (quarter_turns - 1) as f64 * PI / 2.0;
    [tip, tip + 3.0 * PI / 4.0, tip - 3.0 * PI / 4.0]
        .iter()
        .map(|angle| Point::new(NAVIGATOR_RADIUS * angle.cos(), NAVIGATOR_RADIUS * angle.sin()))
        .collect()
}
