pub mod cell;

use thiserror::Error;

pub use cell::{Cell, Walls};

use crate::viz::{NoopVisualizer, Visualizer};

/// The four cardinal directions over the grid. Row indices grow downward,
/// matching screen coordinates: `Up` decrements the row, `Down` increments it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    #[error("maze dimensions must be at least 1x1 (got {num_cols}x{num_rows})")]
    InvalidDimensions { num_cols: u16, num_rows: u16 },
}

/// A rectangular grid of cells with per-cell wall state.
///
/// The grid is the single owned, mutable structure both the generator and the
/// solver operate on. Every wall mutation and every fresh visit is reported to
/// the attached [`Visualizer`]; a no-op visualizer leaves behavior unchanged.
pub struct Maze {
    cells: Box<[Cell]>,
    num_cols: u16,
    num_rows: u16,
    cell_size: u16,
    viz: Box<dyn Visualizer>,
}

impl Maze {
    /// Creates a fully walled maze of the given dimensions with a no-op
    /// visualizer. `cell_size` is the pixel edge length used only for
    /// [`bounding_box`](Maze::bounding_box); it has no logical meaning.
    pub fn new(num_cols: u16, num_rows: u16, cell_size: u16) -> Result<Self, MazeError> {
        Maze::with_visualizer(num_cols, num_rows, cell_size, Box::new(NoopVisualizer))
    }

    /// Like [`Maze::new`] but reporting state changes to the given visualizer.
    pub fn with_visualizer(
        num_cols: u16,
        num_rows: u16,
        cell_size: u16,
        viz: Box<dyn Visualizer>,
    ) -> Result<Self, MazeError> {
        if num_cols < 1 || num_rows < 1 {
            return Err(MazeError::InvalidDimensions { num_cols, num_rows });
        }
        let cells =
            vec![Cell::new(); num_cols as usize * num_rows as usize].into_boxed_slice();
        Ok(Maze {
            cells,
            num_cols,
            num_rows,
            cell_size,
            viz,
        })
    }

    pub fn num_cols(&self) -> u16 {
        self.num_cols
    }

    pub fn num_rows(&self) -> u16 {
        self.num_rows
    }

    pub fn cell_size(&self) -> u16 {
        self.cell_size
    }

    /// Checks if the given `(col, row)` coordinate is within the grid.
    pub fn is_in_bounds(&self, coord: (u16, u16)) -> bool {
        coord.0 < self.num_cols && coord.1 < self.num_rows
    }

    fn ravel_index(&self, coord: (u16, u16)) -> usize {
        if !self.is_in_bounds(coord) {
            panic!("The given coordinate is out of bounds");
        }
        // Overflow-safe since both dimensions are u16 (assuming usize is at least 32 bits)
        coord.1 as usize * self.num_cols as usize + coord.0 as usize
    }

    /// Returns the coordinate of the adjacent cell in the given direction,
    /// or `None` at the grid boundary.
    pub fn neighbor(&self, coord: (u16, u16), direction: Direction) -> Option<(u16, u16)> {
        let (col, row) = coord;
        let neighbor = match direction {
            Direction::Up => (col, row.checked_sub(1)?),
            Direction::Down => (col, row + 1),
            Direction::Left => (col.checked_sub(1)?, row),
            Direction::Right => (col + 1, row),
        };
        if self.is_in_bounds(neighbor) {
            Some(neighbor)
        } else {
            None
        }
    }

    /// Direction leading from `from` to the immediately adjacent `to`,
    /// or `None` if the two cells are not grid neighbors.
    fn direction_between(&self, from: (u16, u16), to: (u16, u16)) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&direction| self.neighbor(from, direction) == Some(to))
    }

    /// Opens the wall between two adjacent cells as a matched pair: the flag
    /// on `a`'s side and the opposite flag on `b`'s side are cleared together,
    /// so the wall-symmetry invariant holds after every call. Both cells are
    /// reported to the visualizer.
    ///
    /// # Panics
    /// If the cells are not immediate grid neighbors. Requesting a wall
    /// toggle between non-adjacent cells is a programmer error, not a
    /// runtime condition callers handle.
    pub fn open_wall(&mut self, a: (u16, u16), b: (u16, u16)) {
        let Some(direction) = self.direction_between(a, b) else {
            panic!("Cannot open a wall between non-adjacent cells {a:?} and {b:?}");
        };
        self.open_wall_side(a, direction);
        self.open_wall_side(b, direction.opposite());
    }

    /// Clears one cell's wall flag and reports the change. Used directly only
    /// for the two boundary walls, which have no paired neighbor.
    fn open_wall_side(&mut self, coord: (u16, u16), direction: Direction) {
        let idx = self.ravel_index(coord);
        let walls = self.cells[idx].walls_mut();
        if !walls.is_open(direction) {
            walls.open(direction);
            let walls = self.cells[idx].walls();
            self.viz.on_walls_changed(coord, walls);
        }
    }

    /// Opens the entrance (top wall of `(0,0)`) and the exit (bottom wall of
    /// the bottom-right cell). Safe to call before or after carving; neither
    /// wall is ever re-closed.
    pub fn break_boundary(&mut self) {
        self.open_wall_side((0, 0), Direction::Up);
        self.open_wall_side((self.num_cols - 1, self.num_rows - 1), Direction::Down);
    }

    /// Marks a cell visited, reporting the visit the first time only.
    pub fn mark_visited(&mut self, coord: (u16, u16)) {
        let idx = self.ravel_index(coord);
        if !self.cells[idx].visited() {
            self.cells[idx].set_visited(true);
            self.viz.on_cell_visited(coord);
        }
    }

    /// Clears the `visited` flag on every cell. Must run between generation
    /// and solving, as both passes consume the same marker.
    pub fn reset_visited(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.set_visited(false);
        }
    }

    pub(crate) fn report_move_attempt(&mut self, from: (u16, u16), to: (u16, u16)) {
        self.viz.on_move_attempt(from, to);
    }

    pub(crate) fn report_move_undo(&mut self, from: (u16, u16), to: (u16, u16)) {
        self.viz.on_move_undo(from, to);
    }

    /// Pixel bounding box `((x1, y1), (x2, y2))` of a cell, derived from the
    /// uniform cell size. Rendering geometry only, never logical state.
    pub fn bounding_box(&self, coord: (u16, u16)) -> ((u32, u32), (u32, u32)) {
        let (col, row) = coord;
        let size = self.cell_size as u32;
        let x1 = col as u32 * size;
        let y1 = row as u32 * size;
        ((x1, y1), (x1 + size, y1 + size))
    }
}

impl std::fmt::Debug for Maze {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Maze")
            .field("num_cols", &self.num_cols)
            .field("num_rows", &self.num_rows)
            .field("cell_size", &self.cell_size)
            .finish_non_exhaustive()
    }
}

impl std::ops::Index<(u16, u16)> for Maze {
    type Output = Cell;

    fn index(&self, index: (u16, u16)) -> &Self::Output {
        &self.cells[self.ravel_index(index)]
    }
}
