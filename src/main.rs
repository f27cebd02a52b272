use docopt::Docopt;
use error_chain::bail;
use log::info;
use maze_walker::{
    animation,
    maze::{Maze, MazeOptions, MazeOptionsBuilder},
    navigator::ReleaseRule,
    surfaces::WHITE,
    units::{GridSize, Height, TicksCount, WallProbability, Width},
};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use serde_derive::Deserialize;
use std::path::Path;

const USAGE: &str = "Maze walker

Usage:
    maze_walker_driver -h | --help
    maze_walker_driver [--grid-size=<n>] [--wall-density=<p>] [--seed=<s>] [--absolute-heading] [--max-ticks=<n>] [--text] [--image-out=<path>] [--resolution=<px>] [--screen-view]

Options:
    -h --help              Show this screen.
    --grid-size=<n>        The grid is n * n cells, n odd and at least 5 [default: 51].
    --wall-density=<p>     Probability that a cell inside the frame starts as a wall [default: 0.3].
    --seed=<s>             Seed for a reproducible maze. A random maze is made if not given.
    --absolute-heading     Stop hugging a wall as soon as the walker faces up again, instead of
                           when its left and right turns cancel out.
    --max-ticks=<n>        Give up watching a walk after n steps [default: 100000].
    --text                 Print the final state of the maze as text.
    --image-out=<path>     Output file path for an image of the final state of the maze. Always PNG format.
    --resolution=<px>      Width and height in pixels of the image or window [default: 800].
    --screen-view          Animate the walk in a window until it is closed. Needs the `screen` feature.
";
#[derive(Debug, Deserialize)]
struct WalkerArgs {
    flag_grid_size: usize,
    flag_wall_density: f64,
    flag_seed: Option<u64>,
    flag_absolute_heading: bool,
    flag_max_ticks: u64,
    flag_text: bool,
    flag_image_out: String,
    flag_resolution: u32,
    flag_screen_view: bool,
}

// Everything `error_chain!` generates lives in `errors`: Error, ErrorKind, ResultExt (for
// `chain_err`) and a Result alias.
mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            ImageSaveError(::image::ImageError);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: WalkerArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let options = maze_options(&args)?;
    let maze = match args.flag_seed {
        Some(seed) => Maze::generate(&options, &mut XorShiftRng::seed_from_u64(seed)),
        None => Maze::generate(&options, &mut rand::thread_rng()),
    };
    let exit = maze.exit().coordinate();
    info!("Generated a {0}x{0} maze with its exit at ({1}, {2})",
          options.size().0, exit.x, exit.y);

    let max_ticks = Some(TicksCount(args.flag_max_ticks));
    let maze = if args.flag_screen_view {
        show_on_screen(maze, &args, max_ticks)?
    } else {
        walk_headless(maze, &args, max_ticks)?
    };

    if args.flag_text {
        println!("{}", maze);
    }

    Ok(())
}

fn maze_options(args: &WalkerArgs) -> Result<MazeOptions> {

    let size = args.flag_grid_size;
    if size < 5 || size % 2 == 0 {
        bail!("--grid-size must be odd and at least 5, not {}", size);
    }
    let density = args.flag_wall_density;
    if !(0.0..=1.0).contains(&density) {
        bail!("--wall-density must be between 0 and 1, not {}", density);
    }
    let release_rule = if args.flag_absolute_heading {
        ReleaseRule::AbsoluteHeading
    } else {
        ReleaseRule::NetRotation
    };

    Ok(MazeOptionsBuilder::new()
        .size(GridSize(size))
        .wall_probability(WallProbability(density))
        .release_rule(release_rule)
        .build())
}

/// Walk without a window, then draw the end result once if an image of it is wanted.
fn walk_headless(mut maze: Maze, args: &WalkerArgs, max_ticks: Option<TicksCount>) -> Result<Maze> {

    maze.run(max_ticks).log();

    if !args.flag_image_out.is_empty() {
        let resolution = args.flag_resolution;
        let image = animation::snapshot(&maze, Width(resolution), Height(resolution), WHITE);
        image.save_png(Path::new(&args.flag_image_out))
            .chain_err(|| format!("Failed to write maze image {}", args.flag_image_out))?;
    }

    Ok(maze)
}

#[cfg(feature = "screen")]
fn show_on_screen(maze: Maze, args: &WalkerArgs, max_ticks: Option<TicksCount>) -> Result<Maze> {
    let maze = maze_walker::sdl::animate_on_screen(maze, args.flag_resolution, WHITE, max_ticks)
        .map_err(Error::from)
        .chain_err(|| "Failed to animate the maze on screen")?;
    Ok(maze)
}

#[cfg(not(feature = "screen"))]
fn show_on_screen(_maze: Maze, _args: &WalkerArgs, _max_ticks: Option<TicksCount>) -> Result<Maze> {
    bail!("--screen-view needs the driver to be built with `--features screen`")
}
