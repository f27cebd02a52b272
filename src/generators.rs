use log::debug;
use rand::Rng;

use crate::coordinates::Cartesian2DCoordinate;
use crate::grid::OccupancyGrid;
use crate::units::{GridSize, WallProbability};

pub const DEFAULT_WALL_PROBABILITY: WallProbability = WallProbability(0.3);

/// Where a cell sits relative to the concentric outer rings of a grid.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Ring {
    /// Row or column 0 or N-1: the open perimeter corridor.
    Border,
    /// Row or column 1 or N-2: the closed frame wall.
    Frame,
    Interior,
}

pub fn ring_of(size: GridSize, coord: Cartesian2DCoordinate) -> Ring {
    let GridSize(size) = size;
    let on_ring = |depth: usize| {
        let far = size.saturating_sub(depth + 1);
        let (x, y) = (coord.x as usize, coord.y as usize);
        x == depth || y == depth || x == far || y == far
    };

    if on_ring(0) {
        Ring::Border
    } else if on_ring(1) {
        Ring::Frame
    } else {
        Ring::Interior
    }
}

/// Generate a framed random grid.
///
/// Each interior cell becomes a wall with independent probability `wall_probability`.
/// The frame (second ring) is always wall and the border (outer ring) always open.
/// Nothing guarantees the open interior cells are connected to each other.
pub fn framed_random_fill<R>(size: GridSize,
                             wall_probability: WallProbability,
                             rng: &mut R)
                             -> OccupancyGrid
    where R: Rng + ?Sized
{
    let WallProbability(p) = wall_probability;
    let mut grid = OccupancyGrid::open(size);

    for coord in grid.iter().collect::<Vec<_>>() {
        let is_wall = match ring_of(size, coord) {
            Ring::Border => false,
            Ring::Frame => true,
            Ring::Interior => rng.gen::<f64>() < p,
        };
        if is_wall {
            grid.set_wall(coord);
        }
    }

    debug!("Generated {}x{} grid with {} walls (wall probability {})",
           size.0, size.0, grid.walls_count(), p);
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    #[test]
    fn rings_of_a_seven_grid() {
        let size = GridSize(7);
        assert_eq!(ring_of(size, gc(0, 3)), Ring::Border);
        assert_eq!(ring_of(size, gc(6, 6)), Ring::Border);
        assert_eq!(ring_of(size, gc(1, 1)), Ring::Frame);
        assert_eq!(ring_of(size, gc(3, 5)), Ring::Frame);
        assert_eq!(ring_of(size, gc(2, 2)), Ring::Interior);
        assert_eq!(ring_of(size, gc(4, 3)), Ring::Interior);
    }

    #[test]
    fn certain_walls_fill_the_interior() {
        let mut rng = XorShiftRng::seed_from_u64(7);
        let size = GridSize(9);
        let g = framed_random_fill(size, WallProbability(1.0), &mut rng);
        for coord in g.iter() {
            let expect_wall = ring_of(size, coord) != Ring::Border;
            assert_eq!(g.is_wall(coord), expect_wall, "at {:?}", coord);
        }
    }

    #[test]
    fn zero_probability_leaves_only_the_frame() {
        let mut rng = XorShiftRng::seed_from_u64(7);
        let g = framed_random_fill(GridSize(9), WallProbability(0.0), &mut rng);
        // 4 * (9 - 3) frame cells
        assert_eq!(g.walls_count(), 24);
    }

    #[test]
    fn density_is_roughly_the_probability() {
        let mut rng = XorShiftRng::seed_from_u64(1234);
        let size = GridSize(101);
        let g = framed_random_fill(size, DEFAULT_WALL_PROBABILITY, &mut rng);
        let interior = g.iter().filter(|&c| ring_of(size, c) == Ring::Interior);
        let (walls, total) = interior.fold((0, 0), |(w, t), c| {
            (w + g.is_wall(c) as usize, t + 1)
        });
        let density = walls as f64 / total as f64;
        assert!(density > 0.25 && density < 0.35, "density {}", density);
    }

    quickcheck! {
        fn border_open_and_frame_closed(seed: u64, half_size: u8) -> bool {
            let size = GridSize(5 + 2 * (half_size as usize % 20));
            let mut rng = XorShiftRng::seed_from_u64(seed);
            let g = framed_random_fill(size, DEFAULT_WALL_PROBABILITY, &mut rng);
            g.iter().all(|c| match ring_of(size, c) {
                Ring::Border => g.is_open(c),
                Ring::Frame => g.is_wall(c),
                Ring::Interior => true,
            })
        }
    }
}
