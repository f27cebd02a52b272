//! **maze_walker** generates framed random grid mazes and animates a wall following navigator
//! finding its way from the centre to the exit.

pub mod animation;
pub mod coordinates;
pub mod exits;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod headings;
pub mod maze;
pub mod navigator;
pub mod renderers;
pub mod surfaces;
pub mod units;
pub mod watchdog;
#[cfg(feature = "screen")]
pub mod sdl;
