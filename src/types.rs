//! Core types shared across the engine
//! This module contains pure data types and the board constants

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Board edge length (the board is square)
pub const GRID_SIZE: usize = 10;

/// Minimum run length that forms a match
pub const MATCH_MIN: usize = 3;

/// Suggested cadence for the defensive tick, in milliseconds.
/// The engine itself is tick-agnostic; this is the reference cadence
/// a presentation layer should drive [`tick`](crate::core::GameSession::tick) at.
pub const TICK_INTERVAL_MS: u64 = 1250;

/// In-place permutations attempted on a dead board before the reshuffle
/// falls back to drawing a fresh random board
pub const RESHUFFLE_RETRY_LIMIT: u32 = 8;

/// Token kinds (the color palette)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Token {
    Red,
    Blue,
    Green,
    Pink,
    Purple,
    Orange,
}

impl Token {
    /// All drawable tokens, in palette order
    pub const PALETTE: [Token; 6] = [
        Token::Red,
        Token::Blue,
        Token::Green,
        Token::Pink,
        Token::Purple,
        Token::Orange,
    ];

    /// Parse a token from its color name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(Token::Red),
            "blue" => Some(Token::Blue),
            "green" => Some(Token::Green),
            "pink" => Some(Token::Pink),
            "purple" => Some(Token::Purple),
            "orange" => Some(Token::Orange),
            _ => None,
        }
    }

    /// Convert to the lowercase color name
    pub fn as_str(&self) -> &'static str {
        match self {
            Token::Red => "red",
            Token::Blue => "blue",
            Token::Green => "green",
            Token::Pink => "pink",
            Token::Purple => "purple",
            Token::Orange => "orange",
        }
    }
}

/// Cell on the board (None = empty, only transiently between removal and
/// collapse inside a single resolve cycle)
pub type Cell = Option<Token>;

/// Why a click was rejected (advisory, surfaced through
/// [`BoardObserver::invalid_move`](crate::observe::BoardObserver::invalid_move))
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidMove {
    /// Input is gated until the next tick confirms the board settled
    MoveLocked,
    /// The swap produced no match and was reverted
    NoMatch,
}

impl InvalidMove {
    pub fn message(self) -> &'static str {
        match self {
            InvalidMove::MoveLocked => "cannot move now",
            InvalidMove::NoMatch => "no combinations, move reverted",
        }
    }
}

/// Outcome of a [`select`](crate::core::GameSession::select) call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Input is gated; nothing changed
    Locked,
    /// First click of a swap gesture; the coordinate is now selected
    Selected,
    /// Second click was not orthogonally adjacent; the selection cleared
    Deselected,
    /// Adjacent swap produced no match and was reverted
    Reverted,
    /// Adjacent swap committed and cascades settled
    Swapped { cells_cleared: u32 },
}

/// Contract violations surfaced to the caller.
///
/// Gameplay anomalies (invalid move, locked input, dead board) are expected
/// states reported through [`SelectOutcome`] and observer advisories; only
/// out-of-contract input is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("coordinate ({x}, {y}) is outside the {size}x{size} board")]
    OutOfBounds { x: usize, y: usize, size: usize },
}
