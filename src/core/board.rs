//! Board module - owns the token grid
//!
//! The board is a square grid where each cell holds a palette token or is
//! empty. Uses a flat row-major Vec for cache locality.
//! Coordinates: (x, y) where x is the column (left to right) and y is the
//! row (top to bottom). Gravity pulls tokens toward y = size - 1.

use crate::core::rng::SimpleRng;
use crate::types::{Cell, GRID_SIZE};

/// Match sets index cells through a u128 bitmask, which caps the board edge
pub const MAX_SIZE: usize = 11;

/// The game board - size x size cells using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    /// Flat array of cells, row-major order (y * size + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty board with the given edge length (1..=MAX_SIZE)
    pub fn new(size: usize) -> Self {
        assert!(
            (1..=MAX_SIZE).contains(&size),
            "board edge must be 1..={}, got {}",
            MAX_SIZE,
            size
        );
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Build a board from row-major rows. Rows must form a square grid
    /// within the size cap.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        let size = rows.len();
        assert!((1..=MAX_SIZE).contains(&size), "board edge must be 1..={}", MAX_SIZE);
        assert!(
            rows.iter().all(|row| row.len() == size),
            "rows must form a square grid"
        );

        let mut grid = Self::new(size);
        for (y, row) in rows.into_iter().enumerate() {
            for (x, cell) in row.into_iter().enumerate() {
                grid.cells[y * size + x] = cell;
            }
        }
        grid
    }

    /// Convert to row-major rows (for assertions and display)
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        (0..self.size)
            .map(|y| self.cells[y * self.size..(y + 1) * self.size].to_vec())
            .collect()
    }

    /// Edge length of the board
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.size || y >= self.size {
            return None;
        }
        Some(y * self.size + x)
    }

    /// Flat index of an in-bounds coordinate
    #[inline(always)]
    pub fn index_of(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.size && y < self.size);
        y * self.size + x
    }

    /// Coordinates (x, y) of a flat index
    #[inline(always)]
    pub fn coords_of(&self, idx: usize) -> (usize, usize) {
        debug_assert!(idx < self.cells.len());
        (idx % self.size, idx / self.size)
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Swap the cells at two in-bounds coordinates
    pub fn swap(&mut self, x1: usize, y1: usize, x2: usize, y2: usize) {
        let a = self.index_of(x1, y1);
        let b = self.index_of(x2, y2);
        self.cells.swap(a, b);
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Check that no cell is empty
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// Fill every cell with a freshly drawn random token
    pub fn fill_random(&mut self, rng: &mut SimpleRng) {
        for cell in &mut self.cells {
            *cell = Some(rng.draw_token());
        }
    }

    /// Permute the existing tokens uniformly at random (dead-board reshuffle).
    /// The token multiset is preserved exactly.
    pub fn shuffle(&mut self, rng: &mut SimpleRng) {
        rng.shuffle(&mut self.cells);
    }

    /// Apply per-column gravity: scanning bottom to top, slide every token
    /// down by the number of empty cells beneath it. Vacated cells at the
    /// top of each column stay empty; refill is the caller's job.
    pub fn collapse_columns(&mut self) {
        for x in 0..self.size {
            let mut empty_below = 0;
            for y in (0..self.size).rev() {
                let idx = self.index_of(x, y);
                match self.cells[idx] {
                    None => empty_below += 1,
                    Some(token) if empty_below > 0 => {
                        let dst = self.index_of(x, y + empty_below);
                        self.cells[dst] = Some(token);
                        self.cells[idx] = None;
                    }
                    Some(_) => {}
                }
            }
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(GRID_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Token;

    const R: Cell = Some(Token::Red);
    const B: Cell = Some(Token::Blue);
    const G: Cell = Some(Token::Green);
    const E: Cell = None;

    #[test]
    fn test_grid_index_calculation() {
        let grid = Grid::new(10);
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(9, 0), Some(9));
        assert_eq!(grid.index(0, 1), Some(10));
        assert_eq!(grid.index(9, 9), Some(99));
        assert_eq!(grid.index(10, 0), None);
        assert_eq!(grid.index(0, 10), None);
    }

    #[test]
    fn test_coords_roundtrip() {
        let grid = Grid::new(7);
        for idx in 0..grid.cell_count() {
            let (x, y) = grid.coords_of(idx);
            assert_eq!(grid.index_of(x, y), idx);
        }
    }

    #[test]
    fn test_set_and_get() {
        let mut grid = Grid::new(10);

        assert!(grid.set(5, 2, R));
        assert_eq!(grid.get(5, 2), Some(R));

        assert!(grid.set(5, 2, E));
        assert_eq!(grid.get(5, 2), Some(E));

        // Out of bounds
        assert!(!grid.set(10, 0, B));
        assert_eq!(grid.get(0, 10), None);
    }

    #[test]
    fn test_swap() {
        let mut grid = Grid::new(4);
        grid.set(0, 0, R);
        grid.set(1, 0, B);

        grid.swap(0, 0, 1, 0);
        assert_eq!(grid.get(0, 0), Some(B));
        assert_eq!(grid.get(1, 0), Some(R));
    }

    #[test]
    fn test_from_rows_roundtrip() {
        let rows = vec![
            vec![R, B, G],
            vec![G, R, B],
            vec![B, G, R],
        ];
        let grid = Grid::from_rows(rows.clone());
        assert_eq!(grid.to_rows(), rows);
        assert_eq!(grid.size(), 3);
    }

    #[test]
    fn test_fill_random_fills_every_cell() {
        let mut rng = SimpleRng::new(42);
        let mut grid = Grid::new(10);
        assert!(!grid.is_full());

        grid.fill_random(&mut rng);
        assert!(grid.is_full());
    }

    #[test]
    fn test_shuffle_preserves_multiset() {
        let mut rng = SimpleRng::new(42);
        let mut grid = Grid::new(6);
        grid.fill_random(&mut rng);

        let mut before: Vec<Cell> = grid.cells().to_vec();
        grid.shuffle(&mut rng);
        let mut after: Vec<Cell> = grid.cells().to_vec();

        before.sort_by_key(|c| c.map(|t| t.as_str()));
        after.sort_by_key(|c| c.map(|t| t.as_str()));
        assert_eq!(before, after);
    }

    #[test]
    fn test_collapse_slides_tokens_down() {
        // Column 0: R at top, gap, B, gap, G at bottom edge area
        let mut grid = Grid::from_rows(vec![
            vec![R, E, E, E],
            vec![E, E, E, E],
            vec![B, E, E, E],
            vec![E, E, E, E],
        ]);

        grid.collapse_columns();

        assert_eq!(grid.get(0, 0), Some(E));
        assert_eq!(grid.get(0, 1), Some(E));
        assert_eq!(grid.get(0, 2), Some(R));
        assert_eq!(grid.get(0, 3), Some(B));
    }

    #[test]
    fn test_collapse_keeps_column_order() {
        let mut grid = Grid::from_rows(vec![
            vec![R, E, E],
            vec![B, E, E],
            vec![E, E, E],
        ]);

        grid.collapse_columns();

        // Relative order within the column is preserved
        assert_eq!(grid.get(0, 1), Some(R));
        assert_eq!(grid.get(0, 2), Some(B));
        assert_eq!(grid.get(0, 0), Some(E));
    }

    #[test]
    fn test_collapse_is_per_column() {
        let mut grid = Grid::from_rows(vec![
            vec![R, E, G],
            vec![E, B, E],
            vec![E, E, E],
        ]);

        grid.collapse_columns();

        assert_eq!(grid.get(0, 2), Some(R));
        assert_eq!(grid.get(1, 2), Some(B));
        assert_eq!(grid.get(2, 2), Some(G));
        // Everything above is empty
        for x in 0..3 {
            for y in 0..2 {
                assert_eq!(grid.get(x, y), Some(E));
            }
        }
    }

    #[test]
    fn test_collapse_full_column_is_noop() {
        let mut grid = Grid::from_rows(vec![
            vec![R, R, R],
            vec![B, B, B],
            vec![G, G, G],
        ]);
        let before = grid.clone();

        grid.collapse_columns();
        assert_eq!(grid, before);
    }

    #[test]
    #[should_panic]
    fn test_oversized_board_rejected() {
        let _ = Grid::new(MAX_SIZE + 1);
    }
}
