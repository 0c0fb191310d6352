//! Core engine module - pure game logic with no external dependencies
//!
//! This module contains all the match-3 rules, state management, and
//! simulation logic. It has zero dependencies on UI, timers, or I/O,
//! making it:
//!
//! - **Deterministic**: the same seed produces identical boards and refills
//! - **Testable**: every rule is exercised without a presentation layer
//! - **Portable**: runs headless in any environment
//!
//! # Module Structure
//!
//! - [`board`]: square token grid with gravity collapse and reshuffling
//! - [`matcher`]: run/cross detection, the resolve pass, and the move oracle
//! - [`rng`]: seedable LCG token source
//! - [`session`]: selection protocol, cascades, scoring, defensive tick
//! - [`snapshot`]: serializable state export for presentation layers

pub mod board;
pub mod matcher;
pub mod rng;
pub mod session;
pub mod snapshot;

// Re-export commonly used types
pub use board::Grid;
pub use matcher::{has_any_move, matches_at, resolve_pass, MatchSet};
pub use rng::SimpleRng;
pub use session::{GameSession, SessionConfig};
pub use snapshot::BoardSnapshot;
