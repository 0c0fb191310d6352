//! Session module - the player-facing engine surface
//!
//! Ties together the grid, RNG, and matcher: the selection state machine,
//! swap commit/revert, cascade settling, score accounting, and the
//! defensive tick with dead-board reshuffling. All calls are synchronous
//! and non-reentrant; callers serialize access.

use crate::core::board::Grid;
use crate::core::matcher::{has_any_move, resolve_pass};
use crate::core::rng::SimpleRng;
use crate::core::snapshot::BoardSnapshot;
use crate::observe::{BoardObserver, NullObserver};
use crate::types::{
    Cell, EngineError, InvalidMove, SelectOutcome, GRID_SIZE, RESHUFFLE_RETRY_LIMIT,
};

/// Session construction parameters.
///
/// One engine serves both the scoring and the score-free variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// RNG seed; identical seeds replay identical games
    pub seed: u32,
    /// Accrue score on resolve passes triggered after construction
    pub scoring: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            scoring: true,
        }
    }
}

/// Complete session state: board, token source, selection cursor, input
/// lock, and score.
#[derive(Debug, Clone)]
pub struct GameSession {
    grid: Grid,
    rng: SimpleRng,
    selected: Option<(usize, usize)>,
    can_move: bool,
    score: u32,
    scoring: bool,
}

impl GameSession {
    /// Create a session with a freshly drawn board, settled to a stable,
    /// match-free state. The initial settle never scores.
    pub fn new(config: SessionConfig) -> Self {
        let mut rng = SimpleRng::new(config.seed);
        let mut grid = Grid::new(GRID_SIZE);
        grid.fill_random(&mut rng);

        let mut session = Self {
            grid,
            rng,
            selected: None,
            can_move: true,
            score: 0,
            scoring: config.scoring,
        };
        session.settle(false, &mut NullObserver);
        session
    }

    /// Create a session over a prepared board (embedders and tests).
    /// Holes are refilled and the board is settled the same way `new`
    /// settles a drawn one.
    pub fn with_grid(grid: Grid, config: SessionConfig) -> Self {
        let mut session = Self {
            grid,
            rng: SimpleRng::new(config.seed),
            selected: None,
            can_move: true,
            score: 0,
            scoring: config.scoring,
        };
        session.refill();
        session.settle(false, &mut NullObserver);
        session
    }

    /// Board edge length
    pub fn size(&self) -> usize {
        self.grid.size()
    }

    /// The underlying board
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Token at (x, y). Out-of-bounds coordinates are a contract violation.
    pub fn token_at(&self, x: usize, y: usize) -> Result<Cell, EngineError> {
        self.grid.get(x, y).ok_or(EngineError::OutOfBounds {
            x,
            y,
            size: self.grid.size(),
        })
    }

    /// Cumulative score
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Whether player input is currently accepted
    pub fn can_move(&self) -> bool {
        self.can_move
    }

    /// Pending first click of a swap gesture, if any
    pub fn selected(&self) -> Option<(usize, usize)> {
        self.selected
    }

    /// Export the externally observable state
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            size: self.grid.size(),
            cells: self.grid.cells().to_vec(),
            score: self.score,
            can_move: self.can_move,
            selected: self.selected,
            seed: self.rng.state(),
        }
    }

    /// Handle a click at (x, y) per the two-click swap protocol.
    ///
    /// First in-bounds click stores the selection. Second click: an
    /// orthogonally adjacent target swaps and settles (reverting when no
    /// match forms); anything else silently clears the selection. A
    /// committed swap locks input until the next [`tick`](Self::tick).
    pub fn select<O: BoardObserver>(
        &mut self,
        x: usize,
        y: usize,
        observer: &mut O,
    ) -> Result<SelectOutcome, EngineError> {
        self.check_bounds(x, y)?;

        if !self.can_move {
            observer.invalid_move(InvalidMove::MoveLocked);
            return Ok(SelectOutcome::Locked);
        }

        let Some((sx, sy)) = self.selected else {
            self.selected = Some((x, y));
            return Ok(SelectOutcome::Selected);
        };
        self.selected = None;

        if !is_adjacent(sx, sy, x, y) {
            return Ok(SelectOutcome::Deselected);
        }

        self.grid.swap(sx, sy, x, y);
        self.notify_pair(sx, sy, x, y, observer);

        let cleared = self.settle(self.scoring, observer);
        if cleared == 0 {
            self.grid.swap(sx, sy, x, y);
            self.notify_pair(sx, sy, x, y, observer);
            observer.invalid_move(InvalidMove::NoMatch);
            return Ok(SelectOutcome::Reverted);
        }

        self.can_move = false;
        Ok(SelectOutcome::Swapped {
            cells_cleared: cleared,
        })
    }

    /// Defensive consistency pass, driven on an external cadence.
    ///
    /// Settles any latent matches, reshuffles while no legal move exists,
    /// and re-opens input. Returns true when anything changed.
    pub fn tick<O: BoardObserver>(&mut self, observer: &mut O) -> bool {
        let cleared = self.settle(self.scoring, observer);
        let reshuffled = self.ensure_live(self.scoring, observer);
        self.can_move = true;
        cleared > 0 || reshuffled
    }

    fn check_bounds(&self, x: usize, y: usize) -> Result<(), EngineError> {
        let size = self.grid.size();
        if x >= size || y >= size {
            return Err(EngineError::OutOfBounds { x, y, size });
        }
        Ok(())
    }

    /// Run resolve -> collapse -> refill until a resolve pass removes
    /// nothing. Returns the total number of cells cleared; the board is
    /// stable and full on return.
    fn settle<O: BoardObserver>(&mut self, scoring: bool, observer: &mut O) -> u32 {
        let mut total = 0u32;
        loop {
            let before = self.grid.clone();
            let cleared = resolve_pass(&mut self.grid);
            if cleared == 0 {
                break;
            }
            total = total.saturating_add(cleared);
            emit_diff(&before, &self.grid, observer);

            if scoring {
                self.score = self.score.saturating_add(cleared);
                observer.score_changed(self.score);
            }

            let before = self.grid.clone();
            self.grid.collapse_columns();
            self.refill();
            emit_diff(&before, &self.grid, observer);
        }
        total
    }

    /// Fill every empty cell with a freshly drawn token (post-collapse the
    /// empties sit at the top of their columns)
    fn refill(&mut self) {
        for y in 0..self.grid.size() {
            for x in 0..self.grid.size() {
                if self.grid.get(x, y) == Some(None) {
                    let token = self.rng.draw_token();
                    self.grid.set(x, y, Some(token));
                }
            }
        }
    }

    /// Reshuffle until at least one legal move exists. Permutes the
    /// existing tokens first; past the retry cap, permutations of a
    /// pathological multiset can never go live, so fall back to fresh
    /// draws to guarantee termination. Returns true when any reshuffle
    /// happened.
    fn ensure_live<O: BoardObserver>(&mut self, scoring: bool, observer: &mut O) -> bool {
        let mut attempts = 0u32;
        let mut reshuffled = false;

        while !has_any_move(&self.grid) {
            observer.no_moves_left();

            let before = self.grid.clone();
            if attempts < RESHUFFLE_RETRY_LIMIT {
                self.grid.shuffle(&mut self.rng);
            } else {
                self.grid.fill_random(&mut self.rng);
            }
            attempts += 1;
            reshuffled = true;
            emit_diff(&before, &self.grid, observer);

            // A reshuffle may line up matches of its own; settle before
            // re-checking liveness.
            self.settle(scoring, observer);
        }
        reshuffled
    }

    fn notify_pair<O: BoardObserver>(
        &self,
        x1: usize,
        y1: usize,
        x2: usize,
        y2: usize,
        observer: &mut O,
    ) {
        if let Some(cell) = self.grid.get(x1, y1) {
            observer.cell_changed(x1, y1, cell);
        }
        if let Some(cell) = self.grid.get(x2, y2) {
            observer.cell_changed(x2, y2, cell);
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

/// Orthogonal adjacency: Manhattan distance exactly 1
fn is_adjacent(x1: usize, y1: usize, x2: usize, y2: usize) -> bool {
    x1.abs_diff(x2) + y1.abs_diff(y2) == 1
}

/// Report every cell whose value differs between two boards
fn emit_diff<O: BoardObserver>(before: &Grid, after: &Grid, observer: &mut O) {
    for (idx, (old, new)) in before.cells().iter().zip(after.cells()).enumerate() {
        if old != new {
            let (x, y) = after.coords_of(idx);
            observer.cell_changed(x, y, *new);
        }
    }
}
