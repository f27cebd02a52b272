/// Side length of a square maze grid, in cells.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct GridSize(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RowIndex(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ColumnIndex(pub usize);

/// Number of navigation steps taken.
#[derive(Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Debug, Default)]
pub struct TicksCount(pub u64);

/// Pixel dimensions of a drawing surface.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Width(pub u32);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Height(pub u32);

/// Probability, in [0, 1], that an interior cell of a generated grid is a wall.
#[derive(PartialEq, PartialOrd, Copy, Clone, Debug)]
pub struct WallProbability(pub f64);
