use std::{cell::RefCell, rc::Rc, sync::mpsc::SyncSender};

use crate::maze::Walls;

/// Sink for maze state changes. The grid and the algorithms call out to it,
/// never the other way around: all callbacks are fire-and-forget and nothing
/// in the core inspects a result, so a no-op implementation leaves every
/// algorithmic output unchanged.
pub trait Visualizer {
    /// A cell's wall flags changed (carving reports both sides of the pair).
    fn on_walls_changed(&mut self, coord: (u16, u16), walls: Walls);
    /// A cell was visited for the first time in the current pass.
    fn on_cell_visited(&mut self, coord: (u16, u16));
    /// The solver tentatively steps from one cell into an adjacent one.
    fn on_move_attempt(&mut self, from: (u16, u16), to: (u16, u16));
    /// A previously attempted step turned out to be a dead end.
    fn on_move_undo(&mut self, from: (u16, u16), to: (u16, u16));
}

/// Discards every report. The default port for headless use and tests.
pub struct NoopVisualizer;

impl Visualizer for NoopVisualizer {
    fn on_walls_changed(&mut self, _coord: (u16, u16), _walls: Walls) {}
    fn on_cell_visited(&mut self, _coord: (u16, u16)) {}
    fn on_move_attempt(&mut self, _from: (u16, u16), _to: (u16, u16)) {}
    fn on_move_undo(&mut self, _from: (u16, u16), _to: (u16, u16)) {}
}

/// A visualizer callback serialized for transport to a render thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VizEvent {
    Initial { num_cols: u16, num_rows: u16 },
    WallsChanged { coord: (u16, u16), walls: Walls },
    CellVisited { coord: (u16, u16) },
    MoveAttempt { from: (u16, u16), to: (u16, u16) },
    MoveUndo { from: (u16, u16), to: (u16, u16) },
}

/// Forwards each callback as a [`VizEvent`] over a bounded channel, typically
/// to a render thread. Send errors are ignored: a disconnected renderer must
/// not affect the algorithms.
pub struct ChannelVisualizer {
    sender: SyncSender<VizEvent>,
}

impl ChannelVisualizer {
    /// Announces the grid dimensions to the receiving end immediately, before
    /// any state change can be reported.
    pub fn new(sender: SyncSender<VizEvent>, num_cols: u16, num_rows: u16) -> Self {
        let _ = sender.send(VizEvent::Initial { num_cols, num_rows });
        ChannelVisualizer { sender }
    }
}

impl Visualizer for ChannelVisualizer {
    fn on_walls_changed(&mut self, coord: (u16, u16), walls: Walls) {
        let _ = self.sender.send(VizEvent::WallsChanged { coord, walls });
    }

    fn on_cell_visited(&mut self, coord: (u16, u16)) {
        let _ = self.sender.send(VizEvent::CellVisited { coord });
    }

    fn on_move_attempt(&mut self, from: (u16, u16), to: (u16, u16)) {
        let _ = self.sender.send(VizEvent::MoveAttempt { from, to });
    }

    fn on_move_undo(&mut self, from: (u16, u16), to: (u16, u16)) {
        let _ = self.sender.send(VizEvent::MoveUndo { from, to });
    }
}

/// Buffers every report in memory. The maze owns the visualizer, so callers
/// keep a cloned [`handle`](RecordingVisualizer::handle) to read the events
/// back afterwards.
pub struct RecordingVisualizer {
    events: Rc<RefCell<Vec<VizEvent>>>,
}

impl RecordingVisualizer {
    pub fn new() -> Self {
        RecordingVisualizer {
            events: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn handle(&self) -> Rc<RefCell<Vec<VizEvent>>> {
        self.events.clone()
    }
}

impl Default for RecordingVisualizer {
    fn default() -> Self {
        RecordingVisualizer::new()
    }
}

impl Visualizer for RecordingVisualizer {
    fn on_walls_changed(&mut self, coord: (u16, u16), walls: Walls) {
        self.events
            .borrow_mut()
            .push(VizEvent::WallsChanged { coord, walls });
    }

    fn on_cell_visited(&mut self, coord: (u16, u16)) {
        self.events.borrow_mut().push(VizEvent::CellVisited { coord });
    }

    fn on_move_attempt(&mut self, from: (u16, u16), to: (u16, u16)) {
        self.events.borrow_mut().push(VizEvent::MoveAttempt { from, to });
    }

    fn on_move_undo(&mut self, from: (u16, u16), to: (u16, u16)) {
        self.events.borrow_mut().push(VizEvent::MoveUndo { from, to });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{Direction, Maze};

    #[test]
    fn test_recording_visualizer_sees_wall_pairs() {
        let recorder = RecordingVisualizer::new();
        let events = recorder.handle();
        let mut maze = Maze::with_visualizer(2, 2, 16, Box::new(recorder)).unwrap();
        maze.open_wall((0, 0), (1, 0));

        let events = events.borrow();
        assert_eq!(events.len(), 2);
        match events[0] {
            VizEvent::WallsChanged { coord, walls } => {
                assert_eq!(coord, (0, 0));
                assert!(walls.is_open(Direction::Right));
            }
            _ => panic!("expected a walls-changed event"),
        }
        match events[1] {
            VizEvent::WallsChanged { coord, walls } => {
                assert_eq!(coord, (1, 0));
                assert!(walls.is_open(Direction::Left));
            }
            _ => panic!("expected a walls-changed event"),
        }
    }

    #[test]
    fn test_visit_reported_once() {
        let recorder = RecordingVisualizer::new();
        let events = recorder.handle();
        let mut maze = Maze::with_visualizer(2, 1, 16, Box::new(recorder)).unwrap();
        maze.mark_visited((1, 0));
        maze.mark_visited((1, 0));

        assert_eq!(
            events.borrow().as_slice(),
            &[VizEvent::CellVisited { coord: (1, 0) }]
        );
    }

    #[test]
    fn test_channel_visualizer_announces_dimensions() {
        let (tx, rx) = std::sync::mpsc::sync_channel(8);
        let _viz = ChannelVisualizer::new(tx, 5, 4);
        assert_eq!(
            rx.recv().unwrap(),
            VizEvent::Initial {
                num_cols: 5,
                num_rows: 4
            }
        );
    }
}
