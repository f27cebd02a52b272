use std::fmt;

use crate::coordinates::Cartesian2DCoordinate;
use crate::headings::Heading;
use crate::maze::Maze;

const WALL: &str = "██";
const OPEN: &str = "  ";
const EXIT: &str = "()";

fn navigator_glyph(heading: Heading) -> &'static str {
    match heading {
        Heading::Up => "^^",
        Heading::Right => ">>",
        Heading::Down => "vv",
        Heading::Left => "<<",
    }
}

/// Two characters per cell so the text keeps roughly square cells.
impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let grid = self.grid();
        let navigator = self.navigator();
        let size = grid.size().0 as u32;

        let mut output = String::with_capacity((size as usize * 2 + 1) * size as usize * 3);
        for y in 0..size {
            for x in 0..size {
                let coord = Cartesian2DCoordinate::new(x, y);
                let cell = if coord == navigator.position() {
                    navigator_glyph(navigator.heading())
                } else if coord == self.exit().coordinate() {
                    EXIT
                } else if grid.is_wall(coord) {
                    WALL
                } else {
                    OPEN
                };
                output.push_str(cell);
            }
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}
