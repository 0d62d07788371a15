use mazeway::{generators::generate_maze, maze::Maze, solvers::solve_maze};

/// Headless generate+solve loop for profiling, no terminal rendering.
fn main() {
    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iterations = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10);

    for _ in 0..num_iterations {
        let mut maze = Maze::new(255, 255, 16).expect("dimensions are non-zero");
        generate_maze(&mut maze, None);
        maze.reset_visited();
        let path = solve_maze(&mut maze);
        assert!(path.is_some(), "generated mazes are always solvable");
    }
}
