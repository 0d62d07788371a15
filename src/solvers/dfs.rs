use crate::maze::{Direction, Maze};

/// Fixed tie-break order for candidate directions. Part of the solver's
/// contract: it decides which of several valid paths is returned.
const PRIORITY: [Direction; 4] = [
    Direction::Up,
    Direction::Right,
    Direction::Down,
    Direction::Left,
];

/// One suspended exploration step: the candidate neighbors of a cell in
/// priority order, and how many have been tried so far.
struct Frame {
    candidates: Vec<(u16, u16)>,
    next: usize,
}

/// Depth-first search with backtracking from `start` to `goal`, walking only
/// open walls and reporting each tentative move and each undone dead end to
/// the maze's visualizer.
///
/// The recursion is replaced by an explicit frame stack so the search depth
/// (up to the full cell count) never touches the call stack. The path is the
/// chain of cells the live frames were entered through; on success it is
/// returned as-is, giving the same result the recursive formulation would
/// short-circuit with. Walls are never modified.
pub fn solve_dfs(
    maze: &mut Maze,
    start: (u16, u16),
    goal: (u16, u16),
) -> Option<Vec<(u16, u16)>> {
    if !maze.is_in_bounds(start) || !maze.is_in_bounds(goal) {
        return None;
    }

    maze.mark_visited(start);
    let mut path = vec![start];
    if start == goal {
        return Some(path);
    }

    let mut frames = vec![Frame {
        candidates: open_unvisited_neighbors(maze, start),
        next: 0,
    }];

    while !frames.is_empty() {
        let depth = frames.len() - 1;
        let at = path[depth];

        let candidate = {
            let frame = &mut frames[depth];
            if frame.next < frame.candidates.len() {
                let c = frame.candidates[frame.next];
                frame.next += 1;
                Some(c)
            } else {
                None
            }
        };

        match candidate {
            // An earlier branch claimed this neighbor in the meantime
            Some(to) if maze[to].visited() => continue,
            Some(to) => {
                maze.report_move_attempt(at, to);
                maze.mark_visited(to);
                path.push(to);
                if to == goal {
                    return Some(path);
                }
                let candidates = open_unvisited_neighbors(maze, to);
                frames.push(Frame {
                    candidates,
                    next: 0,
                });
            }
            None => {
                // Dead end: abandon this cell and undo the move that entered it
                frames.pop();
                if let Some(dead) = path.pop()
                    && let Some(&back) = path.last()
                {
                    maze.report_move_undo(back, dead);
                }
            }
        }
    }

    None
}

/// Neighbors reachable through an open wall and not yet visited, in the
/// fixed priority order. A wall open toward the grid boundary (the entrance
/// or exit) has no neighbor and is skipped.
fn open_unvisited_neighbors(maze: &Maze, at: (u16, u16)) -> Vec<(u16, u16)> {
    PRIORITY
        .into_iter()
        .filter(|&direction| maze[at].walls().is_open(direction))
        .filter_map(|direction| maze.neighbor(at, direction))
        .filter(|&c| !maze[c].visited())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::generate_maze;
    use crate::solvers::solve_maze;
    use crate::viz::{RecordingVisualizer, VizEvent};

    /// Checks that consecutive path cells are adjacent with an open shared wall.
    fn assert_path_is_walkable(maze: &Maze, path: &[(u16, u16)]) {
        for pair in path.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let direction = Direction::ALL
                .into_iter()
                .find(|&d| maze.neighbor(from, d) == Some(to))
                .unwrap_or_else(|| panic!("{from:?} and {to:?} are not adjacent"));
            assert!(
                maze[from].walls().is_open(direction),
                "wall between {from:?} and {to:?} is closed"
            );
        }
    }

    #[test]
    fn test_solver_succeeds_on_any_generated_maze() {
        for seed in 0..8u64 {
            let mut maze = Maze::new(9, 6, 16).unwrap();
            generate_maze(&mut maze, Some(seed));
            maze.reset_visited();
            let path = solve_maze(&mut maze).expect("generated mazes are always connected");
            assert_eq!(path.first(), Some(&(0, 0)));
            assert_eq!(path.last(), Some(&(8, 5)));
            assert!(path.len() <= 9 * 6);
            assert_path_is_walkable(&maze, &path);
        }
    }

    #[test]
    fn test_one_by_one_is_trivially_solved() {
        let recorder = RecordingVisualizer::new();
        let events = recorder.handle();
        let mut maze = Maze::with_visualizer(1, 1, 16, Box::new(recorder)).unwrap();
        let path = solve_maze(&mut maze).unwrap();
        assert_eq!(path, vec![(0, 0)]);
        // A single visit, no moves attempted or undone
        assert_eq!(
            events.borrow().as_slice(),
            &[VizEvent::CellVisited { coord: (0, 0) }]
        );
    }

    #[test]
    fn test_unreachable_goal_is_a_false_outcome() {
        // Fully walled 2x2 grid with only the boundary broken: no internal
        // passage exists, so the goal is unreachable and the solver reports
        // failure rather than an error.
        let mut maze = Maze::new(2, 2, 16).unwrap();
        maze.break_boundary();
        assert_eq!(solve_maze(&mut maze), None);
    }

    #[test]
    fn test_direction_priority_prefers_right_over_down() {
        // All four internal walls open: both corner-to-corner routes exist,
        // and the up/right/down/left priority picks the one through (1,0).
        let mut maze = Maze::new(2, 2, 16).unwrap();
        maze.open_wall((0, 0), (1, 0));
        maze.open_wall((0, 0), (0, 1));
        maze.open_wall((1, 0), (1, 1));
        maze.open_wall((0, 1), (1, 1));
        let path = solve_maze(&mut maze).unwrap();
        assert_eq!(path, vec![(0, 0), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_dead_end_reports_undo_and_backtracks() {
        // Tree: (0,0)-(1,0), (0,0)-(0,1), (0,1)-(1,1). The right-first
        // priority walks into the (1,0) dead end, undoes it, then reaches the
        // goal through (0,1).
        let recorder = RecordingVisualizer::new();
        let events = recorder.handle();
        let mut maze = Maze::with_visualizer(2, 2, 16, Box::new(recorder)).unwrap();
        maze.open_wall((0, 0), (1, 0));
        maze.open_wall((0, 0), (0, 1));
        maze.open_wall((0, 1), (1, 1));

        let path = solve_maze(&mut maze).unwrap();
        assert_eq!(path, vec![(0, 0), (0, 1), (1, 1)]);

        let moves = events
            .borrow()
            .iter()
            .filter(|e| matches!(e, VizEvent::MoveAttempt { .. } | VizEvent::MoveUndo { .. }))
            .copied()
            .collect::<Vec<_>>();
        assert_eq!(
            moves,
            vec![
                VizEvent::MoveAttempt {
                    from: (0, 0),
                    to: (1, 0)
                },
                VizEvent::MoveUndo {
                    from: (0, 0),
                    to: (1, 0)
                },
                VizEvent::MoveAttempt {
                    from: (0, 0),
                    to: (0, 1)
                },
                VizEvent::MoveAttempt {
                    from: (0, 1),
                    to: (1, 1)
                },
            ]
        );
    }

    #[test]
    fn test_visited_reset_round_trip() {
        // Solving after a reset gives the same path as solving a fresh copy
        // of the same wall configuration.
        let mut first = Maze::new(7, 5, 16).unwrap();
        generate_maze(&mut first, Some(99));
        first.reset_visited();
        let path_after_reset = solve_maze(&mut first).unwrap();

        let mut second = Maze::new(7, 5, 16).unwrap();
        generate_maze(&mut second, Some(99));
        second.reset_visited();
        let path_fresh = solve_maze(&mut second).unwrap();

        assert_eq!(path_after_reset, path_fresh);

        // The same maze can be reused for a repeat solve after another reset
        first.reset_visited();
        assert_eq!(solve_maze(&mut first).unwrap(), path_after_reset);
    }

    #[test]
    fn test_noop_and_recording_ports_agree() {
        let mut silent = Maze::new(6, 6, 16).unwrap();
        generate_maze(&mut silent, Some(5));
        silent.reset_visited();
        let silent_path = solve_maze(&mut silent).unwrap();

        let recorder = RecordingVisualizer::new();
        let mut observed = Maze::with_visualizer(6, 6, 16, Box::new(recorder)).unwrap();
        generate_maze(&mut observed, Some(5));
        observed.reset_visited();
        let observed_path = solve_maze(&mut observed).unwrap();

        assert_eq!(silent_path, observed_path);
        for row in 0..6 {
            for col in 0..6 {
                assert_eq!(silent[(col, row)].walls(), observed[(col, row)].walls());
            }
        }
    }

    #[test]
    fn test_two_by_two_path_is_always_three_cells() {
        // In any 2x2 spanning tree the corner-to-corner distance is two
        // moves, so the solved path is exactly three cells.
        for seed in 0..16u64 {
            let mut maze = Maze::new(2, 2, 16).unwrap();
            generate_maze(&mut maze, Some(seed));
            maze.reset_visited();
            let path = solve_maze(&mut maze).unwrap();
            assert_eq!(path.len(), 3);
            assert_eq!(path[0], (0, 0));
            assert_eq!(path[2], (1, 1));
            assert_path_is_walkable(&maze, &path);
        }
    }
}
