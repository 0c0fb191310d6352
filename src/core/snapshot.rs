use serde::{Deserialize, Serialize};

use crate::types::Cell;

/// Externally observable session state, exported for presentation layers
/// that mirror the whole board instead of tracking per-cell events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Board edge length
    pub size: usize,
    /// Row-major cells; a settled board never contains empties
    pub cells: Vec<Cell>,
    pub score: u32,
    pub can_move: bool,
    pub selected: Option<(usize, usize)>,
    /// Current RNG state (restarting from it replays the same draws)
    pub seed: u32,
}
