use rand::{SeedableRng, rngs::StdRng};

mod recur_backtrack;

pub use recur_backtrack::recursive_backtrack;

use crate::maze::Maze;

/// Get a random number generator, optionally seeded for reproducibility.
pub(crate) fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Carves a perfect maze over the whole grid and opens the entrance and exit
/// boundary walls. Same seed and dimensions produce the same wall
/// configuration.
pub fn generate_maze(maze: &mut Maze, seed: Option<u64>) {
    recursive_backtrack(maze, seed);
    maze.break_boundary();
}
