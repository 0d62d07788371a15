mod dfs;

pub use dfs::solve_dfs;

use crate::maze::Maze;

/// Finds a path from the top-left cell to the bottom-right cell using only
/// open walls. Returns the ordered cell sequence on success, or `None` when
/// the target is unreachable — a legal outcome on arbitrary grids, never an
/// error. Callers must reset the `visited` flags after generation and before
/// solving.
pub fn solve_maze(maze: &mut Maze) -> Option<Vec<(u16, u16)>> {
    let start = (0, 0);
    let goal = (maze.num_cols() - 1, maze.num_rows() - 1);
    solve_dfs(maze, start, goal)
}
