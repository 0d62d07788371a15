use crate::maze::Direction;

/// Wall state of a single cell: four independent flags, one per side.
/// `true` means the wall is standing, `false` means it has been carved open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walls {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl Walls {
    /// All four walls standing, the state of every cell in a freshly built maze.
    pub const CLOSED: Walls = Walls {
        top: true,
        bottom: true,
        left: true,
        right: true,
    };

    /// Whether the wall on the given side has been carved open.
    pub fn is_open(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => !self.top,
            Direction::Down => !self.bottom,
            Direction::Left => !self.left,
            Direction::Right => !self.right,
        }
    }

    pub(crate) fn open(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.top = false,
            Direction::Down => self.bottom = false,
            Direction::Left => self.left = false,
            Direction::Right => self.right = false,
        }
    }
}

/// A single maze cell: its wall flags plus the transient `visited` marker
/// shared by generation and solving. The marker must be reset between the
/// two passes via [`Maze::reset_visited`](crate::maze::Maze::reset_visited).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    walls: Walls,
    visited: bool,
}

impl Cell {
    pub(crate) fn new() -> Self {
        Cell {
            walls: Walls::CLOSED,
            visited: false,
        }
    }

    pub fn walls(&self) -> Walls {
        self.walls
    }

    pub(crate) fn walls_mut(&mut self) -> &mut Walls {
        &mut self.walls
    }

    pub fn visited(&self) -> bool {
        self.visited
    }

    pub(crate) fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_is_fully_walled() {
        let cell = Cell::new();
        assert_eq!(cell.walls(), Walls::CLOSED);
        assert!(!cell.visited());
        for direction in Direction::ALL {
            assert!(!cell.walls().is_open(direction));
        }
    }

    #[test]
    fn test_open_wall_flag() {
        let mut walls = Walls::CLOSED;
        walls.open(Direction::Right);
        assert!(walls.is_open(Direction::Right));
        assert!(!walls.is_open(Direction::Left));
        assert!(!walls.is_open(Direction::Up));
        assert!(!walls.is_open(Direction::Down));
    }
}
