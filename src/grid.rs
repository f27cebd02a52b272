use std::fmt;

use bit_set::BitSet;
use itertools::Itertools;

use crate::coordinates::Cartesian2DCoordinate;
use crate::units::{ColumnIndex, GridSize, RowIndex};

/// A square grid of wall/open cells.
///
/// Walls are stored as set bits in row-major order. Coordinates outside of the grid read as
/// walls, so anything probing beyond the edge is simply blocked.
#[derive(Clone)]
pub struct OccupancyGrid {
    walls: BitSet,
    size: usize,
}

impl OccupancyGrid {
    /// A grid of `size * size` open cells.
    pub fn open(size: GridSize) -> OccupancyGrid {
        let GridSize(size) = size;
        OccupancyGrid {
            walls: BitSet::with_capacity(size * size),
            size,
        }
    }

    /// Build a grid from text rows, `#` marking a wall and anything else open.
    ///
    /// Returns None unless there are as many rows as every row has characters.
    pub fn from_rows(rows: &[&str]) -> Option<OccupancyGrid> {
        let size = rows.len();
        if rows.iter().any(|row| row.chars().count() != size) {
            return None;
        }

        let mut grid = OccupancyGrid::open(GridSize(size));
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                if c == '#' {
                    grid.set_wall(Cartesian2DCoordinate::new(x as u32, y as u32));
                }
            }
        }
        Some(grid)
    }

    #[inline]
    pub fn size(&self) -> GridSize {
        GridSize(self.size)
    }

    /// The cell in the middle of the grid, rounding down.
    pub fn centre(&self) -> Cartesian2DCoordinate {
        let middle = (self.size / 2) as u32;
        Cartesian2DCoordinate::new(middle, middle)
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.size && (coord.y as usize) < self.size
    }

    /// Is there a wall at `coord`? Always true outside the grid.
    #[inline]
    pub fn is_wall(&self, coord: Cartesian2DCoordinate) -> bool {
        self.bit_index(coord)
            .map_or(true, |index| self.walls.contains(index))
    }

    #[inline]
    pub fn is_open(&self, coord: Cartesian2DCoordinate) -> bool {
        !self.is_wall(coord)
    }

    /// Returns false, changing nothing, if the coordinate is outside the grid.
    pub fn set_wall(&mut self, coord: Cartesian2DCoordinate) -> bool {
        self.bit_index(coord)
            .map(|index| self.walls.insert(index))
            .is_some()
    }

    /// Returns false, changing nothing, if the coordinate is outside the grid.
    pub fn set_open(&mut self, coord: Cartesian2DCoordinate) -> bool {
        self.bit_index(coord)
            .map(|index| self.walls.remove(index))
            .is_some()
    }

    pub fn walls_count(&self) -> usize {
        self.walls.len()
    }

    /// All coordinates in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Cartesian2DCoordinate> {
        (0..self.size)
            .cartesian_product(0..self.size)
            .map(|(row, column)| {
                Cartesian2DCoordinate::from_row_column_indices(ColumnIndex(column), RowIndex(row))
            })
    }

    /// Coordinates of all the wall cells in row-major order.
    pub fn iter_walls<'a>(&'a self) -> impl Iterator<Item = Cartesian2DCoordinate> + 'a {
        let size = self.size;
        self.walls
            .iter()
            .map(move |index| Cartesian2DCoordinate::new((index % size) as u32, (index / size) as u32))
    }

    fn bit_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.size + coord.x as usize)
        } else {
            None
        }
    }
}

impl fmt::Debug for OccupancyGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "OccupancyGrid :: size: {}", self.size)?;
        for y in 0..self.size {
            let row: String = (0..self.size)
                .map(|x| {
                    if self.is_wall(Cartesian2DCoordinate::new(x as u32, y as u32)) {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    #[test]
    fn open_grid_has_no_walls() {
        let g = OccupancyGrid::open(GridSize(5));
        assert_eq!(g.walls_count(), 0);
        assert!(g.iter().all(|c| g.is_open(c)));
        assert_eq!(g.iter().count(), 25);
    }

    #[test]
    fn outside_reads_as_wall() {
        let g = OccupancyGrid::open(GridSize(3));
        assert!(g.is_wall(gc(3, 0)));
        assert!(g.is_wall(gc(0, 3)));
        assert!(g.is_wall(gc(u32::MAX, u32::MAX)));
        assert!(g.is_open(gc(2, 2)));
    }

    #[test]
    fn setting_cells() {
        let mut g = OccupancyGrid::open(GridSize(4));
        assert!(g.set_wall(gc(1, 2)));
        assert!(g.is_wall(gc(1, 2)));
        assert!(g.is_open(gc(2, 1)));
        assert_eq!(g.walls_count(), 1);

        assert!(g.set_open(gc(1, 2)));
        assert!(g.is_open(gc(1, 2)));
        assert_eq!(g.walls_count(), 0);

        assert!(!g.set_wall(gc(4, 0)));
        assert!(!g.set_open(gc(0, 4)));
        assert_eq!(g.walls_count(), 0);
    }

    #[test]
    fn rows_parse() {
        let g = OccupancyGrid::from_rows(&["#..", ".#.", "..#"]).expect("square rows");
        assert_eq!(g.size(), GridSize(3));
        assert_eq!(g.iter_walls().collect::<Vec<_>>(), vec![gc(0, 0), gc(1, 1), gc(2, 2)]);
        assert!(OccupancyGrid::from_rows(&["..", "..."]).is_none());
        assert!(OccupancyGrid::from_rows(&["...", "..."]).is_none());
    }

    #[test]
    fn iteration_is_row_major() {
        let g = OccupancyGrid::open(GridSize(2));
        assert_eq!(g.iter().collect::<Vec<_>>(),
                   vec![gc(0, 0), gc(1, 0), gc(0, 1), gc(1, 1)]);
    }

    #[test]
    fn centre_rounds_down() {
        assert_eq!(OccupancyGrid::open(GridSize(5)).centre(), gc(2, 2));
        assert_eq!(OccupancyGrid::open(GridSize(51)).centre(), gc(25, 25));
        assert_eq!(OccupancyGrid::open(GridSize(6)).centre(), gc(3, 3));
    }
}
