//! Observation seam between the engine and a presentation layer
//!
//! The engine never draws anything; it reports state changes through a
//! single capability the presentation layer implements. Every callback
//! carries explicit coordinates instead of being bound per cell, and every
//! method defaults to a no-op so callers implement only what they render.

use crate::types::{Cell, InvalidMove};

/// Callbacks raised by the engine while it mutates the board.
///
/// All calls happen synchronously inside `select`/`tick`; by the time those
/// return, the board is settled and full, even though intermediate
/// `cell_changed` events may report cleared (empty) cells.
pub trait BoardObserver {
    /// A cell's token changed (swap, clear, collapse slide, or refill)
    fn cell_changed(&mut self, _x: usize, _y: usize, _cell: Cell) {}

    /// The cumulative score changed
    fn score_changed(&mut self, _score: u32) {}

    /// A click was rejected; advisory only, the engine already handled it
    fn invalid_move(&mut self, _reason: InvalidMove) {}

    /// No legal swap exists; the engine is about to reshuffle
    fn no_moves_left(&mut self) {}
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl BoardObserver for NullObserver {}
