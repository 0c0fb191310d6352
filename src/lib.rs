//! Three-in-row: a deterministic, headless match-3 grid engine.
//!
//! The engine owns a square grid of colored tokens, detects runs of three
//! or more (including their cross/L extensions), removes them, collapses
//! columns under gravity, refills from a seedable token source, and keeps
//! the board alive by reshuffling when no legal move remains.
//!
//! Rendering, event loops, and dialogs live outside: a presentation layer
//! drives [`GameSession::select`] from its click events and
//! [`GameSession::tick`] from a periodic timer, and mirrors state through
//! a [`BoardObserver`] it implements.
//!
//! # Example
//!
//! ```
//! use three_in_row::{GameSession, NullObserver, SessionConfig};
//!
//! let mut game = GameSession::new(SessionConfig { seed: 12345, scoring: true });
//! let mut observer = NullObserver;
//!
//! // Two clicks attempt a swap; the board settles before select returns.
//! game.select(2, 0, &mut observer)?;
//! game.select(3, 0, &mut observer)?;
//!
//! // Periodic defensive pass: re-resolves, reshuffles dead boards,
//! // re-opens input.
//! game.tick(&mut observer);
//! # Ok::<(), three_in_row::EngineError>(())
//! ```

pub mod core;
pub mod observe;
pub mod types;

pub use crate::core::{GameSession, Grid, MatchSet, SessionConfig, SimpleRng};
pub use crate::observe::{BoardObserver, NullObserver};
pub use crate::types::{Cell, EngineError, InvalidMove, SelectOutcome, Token};
