use rand::Rng;

use crate::generators::get_rng;
use crate::maze::{Direction, Maze};

/// Randomized recursive backtracker, run on an explicit stack so the carve
/// depth (up to the full cell count on a serpentine run) never touches the
/// call stack.
///
/// Starting from `(0,0)`, every iteration pops a cell, collects its unvisited
/// neighbors, and either backtracks (none left) or opens the wall to one
/// picked uniformly at random and descends into it. The popped cell is pushed
/// back first so its remaining neighbors are retried after the descent
/// returns. Each descent claims a previously unvisited cell, which bounds the
/// iteration count and leaves the open-wall graph a spanning tree: every cell
/// reachable, exactly one simple path between any two.
pub fn recursive_backtrack(maze: &mut Maze, seed: Option<u64>) {
    let mut rng = get_rng(seed);

    let start = (0, 0);
    maze.mark_visited(start);

    let mut stack = vec![start];

    while let Some(cell) = stack.pop() {
        let neighbors = Direction::ALL
            .into_iter()
            .filter_map(|direction| maze.neighbor(cell, direction))
            .filter(|&c| !maze[c].visited())
            .collect::<Vec<_>>();

        if !neighbors.is_empty() {
            let neighbor = neighbors[rng.random_range(0..neighbors.len())];
            maze.open_wall(cell, neighbor);
            maze.mark_visited(neighbor);
            // Put the cell back first so we can look at another neighbor of this cell later
            stack.push(cell);
            // Put the neighbor to carve the maze in that neighbor's direction
            stack.push(neighbor);
        }
    }
}
