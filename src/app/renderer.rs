use std::{
    fmt,
    io::{Stdout, Write},
    sync::{atomic::AtomicBool, mpsc::Receiver},
    time::Duration,
};

use crossterm::{
    QueueableCommand, cursor, queue,
    style::{self, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::viz::VizEvent;

/// One block of the rendered grid, each occupying [`Tile::CELL_WIDTH`]
/// terminal columns. The maze is drawn as a `(2*cols+1) x (2*rows+1)` block
/// grid: cell interiors at odd coordinates, wall slots between them.
#[derive(Debug, Clone, Copy)]
enum Tile {
    Wall,
    Empty,
    Start,
    Goal,
    Visited,
    Move,
    Undo,
}

impl Tile {
    /// The width of each tile when rendered, in character widths.
    pub const CELL_WIDTH: u16 = 2;
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Tile::Wall => "⬜".with(Color::White),
            Tile::Empty => "  ".with(Color::Reset),
            Tile::Start => "🟩".with(Color::Green),
            Tile::Goal => "🟥".with(Color::Red),
            Tile::Visited => "* ".with(Color::Blue),
            Tile::Move => "██".with(Color::Red),
            Tile::Undo => "░░".with(Color::DarkRed),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Tile::CELL_WIDTH as usize,
                "Each tile must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

/// Final state of a render run.
#[derive(Debug, PartialEq, Eq)]
pub enum RendererStatus {
    Completed,
    Cancelled,
}

/// Consumes [`VizEvent`]s from the compute thread and draws them to the
/// terminal. Events are self-contained, so the renderer never reads the maze.
pub struct Renderer {
    /// Standard output handle to write to the terminal
    stdout: Stdout,
    /// Maze dimensions in cells, known after the initial event
    maze_dims: Option<(u16, u16)>,
    /// Time to wait after each rendered event to pace the animation
    render_refresh_time: Duration,
}

impl Renderer {
    pub fn new(render_refresh_time: Duration) -> Self {
        Self {
            stdout: std::io::stdout(),
            maze_dims: None,
            render_refresh_time,
        }
    }

    /// Block-grid dimensions for a maze: n cells -> n + 1 wall slots -> 2n + 1 total.
    fn grid_dims(num_cols: u16, num_rows: u16) -> (u32, u32) {
        (
            num_cols as u32 * 2 + 1,
            num_rows as u32 * 2 + 1,
        )
    }

    /// Block-grid coordinate of a cell's interior.
    fn center(coord: (u16, u16)) -> (u32, u32) {
        (coord.0 as u32 * 2 + 1, coord.1 as u32 * 2 + 1)
    }

    /// Block-grid coordinate of the wall slot between two adjacent cells.
    fn passage(from: (u16, u16), to: (u16, u16)) -> (u32, u32) {
        let (fx, fy) = Renderer::center(from);
        let (tx, ty) = Renderer::center(to);
        ((fx + tx) / 2, (fy + ty) / 2)
    }

    fn put(&mut self, grid_coord: (u32, u32), tile: Tile) -> std::io::Result<()> {
        // Safe to narrow: the initial size check guarantees the grid fits the
        // terminal, whose dimensions are u16
        queue!(
            self.stdout,
            cursor::MoveTo(grid_coord.0 as u16 * Tile::CELL_WIDTH, grid_coord.1 as u16),
            style::Print(tile)
        )
    }

    /// Checks that the terminal can hold the block grid. Logs and returns
    /// `false` when it cannot, which cancels the run.
    fn check_size(&mut self, num_cols: u16, num_rows: u16) -> std::io::Result<bool> {
        let (grid_width, grid_height) = Renderer::grid_dims(num_cols, num_rows);
        let (term_width, term_height) = terminal::size()?;
        if (term_width as u32) < grid_width * Tile::CELL_WIDTH as u32
            || (term_height as u32) < grid_height
        {
            tracing::warn!(
                "Terminal size {}x{} is too small for a {}x{} maze (needs {}x{})",
                term_width,
                term_height,
                num_cols,
                num_rows,
                grid_width * Tile::CELL_WIDTH as u32,
                grid_height,
            );
            return Ok(false);
        }
        Ok(true)
    }

    /// Renders a single event.
    /// Returns Ok(true) if rendering can continue
    /// Returns Ok(false) if rendering must be cancelled (terminal too small)
    /// Returns Err if there was an I/O error
    fn render_event(&mut self, event: &VizEvent) -> std::io::Result<bool> {
        match *event {
            VizEvent::Initial { num_cols, num_rows } => {
                if !self.check_size(num_cols, num_rows)? {
                    return Ok(false);
                }
                self.maze_dims = Some((num_cols, num_rows));

                // Fully walled grid with empty cell interiors
                let (grid_width, grid_height) = Renderer::grid_dims(num_cols, num_rows);
                self.stdout.queue(cursor::MoveTo(0, 0))?;
                for gy in 0..grid_height {
                    for gx in 0..grid_width {
                        let tile = if gx % 2 == 1 && gy % 2 == 1 {
                            Tile::Empty
                        } else {
                            Tile::Wall
                        };
                        self.stdout.queue(style::Print(tile))?;
                    }
                    self.stdout.queue(style::Print("\r\n"))?;
                }
                self.put(Renderer::center((0, 0)), Tile::Start)?;
                self.put(
                    Renderer::center((num_cols - 1, num_rows - 1)),
                    Tile::Goal,
                )?;
            }
            VizEvent::WallsChanged { coord, walls } => {
                if self.maze_dims.is_none() {
                    return Ok(true);
                }
                let (cx, cy) = Renderer::center(coord);
                // Wall slots around the cell interior: up, down, left, right
                let slots = [
                    ((cx, cy - 1), !walls.top),
                    ((cx, cy + 1), !walls.bottom),
                    ((cx - 1, cy), !walls.left),
                    ((cx + 1, cy), !walls.right),
                ];
                for (slot, open) in slots {
                    let tile = if open { Tile::Empty } else { Tile::Wall };
                    self.put(slot, tile)?;
                }
            }
            VizEvent::CellVisited { coord } => {
                if !self.is_endpoint(coord) {
                    self.put(Renderer::center(coord), Tile::Visited)?;
                }
            }
            VizEvent::MoveAttempt { from, to } => {
                self.put(Renderer::passage(from, to), Tile::Move)?;
                if !self.is_endpoint(to) {
                    self.put(Renderer::center(to), Tile::Move)?;
                }
            }
            VizEvent::MoveUndo { from, to } => {
                self.put(Renderer::passage(from, to), Tile::Undo)?;
                if !self.is_endpoint(to) {
                    self.put(Renderer::center(to), Tile::Undo)?;
                }
            }
        }
        self.stdout.flush()?;
        Ok(true)
    }

    /// Whether the cell carries a start/goal marker that should not be
    /// painted over.
    fn is_endpoint(&self, coord: (u16, u16)) -> bool {
        match self.maze_dims {
            Some((num_cols, num_rows)) => {
                coord == (0, 0) || coord == (num_cols - 1, num_rows - 1)
            }
            None => false,
        }
    }

    /// Render loop over the event channel. Exits when the channel
    /// disconnects (compute finished) or the cancel flag is raised.
    pub fn render(
        &mut self,
        viz_event_rx: Receiver<VizEvent>,
        cancel: &AtomicBool,
    ) -> std::io::Result<RendererStatus> {
        queue!(self.stdout, terminal::Clear(ClearType::All), cursor::Hide)?;
        self.stdout.flush()?;

        loop {
            match viz_event_rx.recv() {
                Err(_e) => {
                    // Channel disconnected, the compute thread is done
                    break;
                }
                Ok(event) => {
                    if cancel.load(std::sync::atomic::Ordering::Acquire) {
                        return Ok(RendererStatus::Cancelled);
                    }
                    if !self.render_event(&event)? {
                        cancel.store(true, std::sync::atomic::Ordering::Release);
                        return Ok(RendererStatus::Cancelled);
                    }
                    std::thread::sleep(self.render_refresh_time);
                }
            }
        }
        // Move cursor below the maze after exiting
        if let Some((num_cols, num_rows)) = self.maze_dims {
            let (_, grid_height) = Renderer::grid_dims(num_cols, num_rows);
            queue!(self.stdout, cursor::MoveTo(0, grid_height as u16), cursor::Show)?;
            self.stdout.flush()?;
        }
        Ok(RendererStatus::Completed)
    }
}
