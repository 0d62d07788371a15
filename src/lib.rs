//! Perfect-maze generation and solving over a rectangular grid.
//!
//! The core is the [`maze`] grid model plus two algorithms: a randomized
//! recursive backtracker in [`generators`] that carves a spanning tree over
//! the grid, and a depth-first solver in [`solvers`] that finds a route from
//! the top-left entrance to the bottom-right exit. Both report their steps
//! through the [`viz`] port, which the terminal front end in [`app`] consumes
//! for animation; with the no-op port the core runs headlessly.

pub mod app;
pub mod generators;
pub mod maze;
pub mod solvers;
pub mod viz;
