//! Match detection - runs, crosses, and the move oracle
//!
//! Detection is a pure probe over the grid; the commit path
//! ([`resolve_pass`]) is the only mutator. A match rooted at a coordinate is
//! the maximal horizontal run through it (when long enough), the vertical
//! runs through every cell of that run, and the cross/L closure that pulls
//! in perpendicular runs sharing a single cell.

use arrayvec::ArrayVec;

use crate::core::board::{Grid, MAX_SIZE};
use crate::types::MATCH_MIN;

/// The four orthogonal directions
const DIRS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Set of matched cell indices over the flat grid, stored as a bitmask.
/// A cell joins at most once even when it sits in several runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchSet {
    bits: u128,
}

impl MatchSet {
    pub fn insert(&mut self, idx: usize) {
        debug_assert!(idx < 128);
        self.bits |= 1u128 << idx;
    }

    pub fn contains(&self, idx: usize) -> bool {
        idx < 128 && (self.bits >> idx) & 1 == 1
    }

    /// Number of matched cells
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Iterate the matched flat indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> {
        let bits = self.bits;
        (0..128).filter(move |&i| (bits >> i) & 1 == 1)
    }
}

#[inline]
fn in_bounds(size: usize, x: isize, y: isize) -> bool {
    x >= 0 && y >= 0 && (x as usize) < size && (y as usize) < size
}

/// Probe the full removable pattern rooted at (x, y). Pure: the grid is not
/// mutated. An empty cell never matches.
pub fn matches_at(grid: &Grid, x: usize, y: usize) -> MatchSet {
    let mut set = MatchSet::default();
    let Some(Some(color)) = grid.get(x, y) else {
        return set;
    };
    let size = grid.size();
    let hit = |cx: usize, cy: usize| grid.get(cx, cy) == Some(Some(color));

    // Maximal horizontal run through (x, y)
    let mut x0 = x;
    while x0 > 0 && hit(x0 - 1, y) {
        x0 -= 1;
    }
    let mut x1 = x;
    while x1 + 1 < size && hit(x1 + 1, y) {
        x1 += 1;
    }

    // Vertical runs are checked through every cell of a matching horizontal
    // run, or through just the probed cell when the run is too short
    let mut columns: ArrayVec<usize, MAX_SIZE> = ArrayVec::new();
    if x1 - x0 + 1 >= MATCH_MIN {
        for cx in x0..=x1 {
            set.insert(grid.index_of(cx, y));
            columns.push(cx);
        }
    } else {
        columns.push(x);
    }

    for &cx in &columns {
        let mut y0 = y;
        while y0 > 0 && hit(cx, y0 - 1) {
            y0 -= 1;
        }
        let mut y1 = y;
        while y1 + 1 < size && hit(cx, y1 + 1) {
            y1 += 1;
        }
        if y1 - y0 + 1 >= MATCH_MIN {
            for cy in y0..=y1 {
                set.insert(grid.index_of(cx, cy));
            }
        }
    }

    // Cross/L closure: a matched cell pulls in the two cells beyond it in
    // an axis direction when both continue the color. Iterated until
    // nothing new joins (bounded by the cell count).
    loop {
        let before = set;
        for idx in before.iter() {
            let (cx, cy) = grid.coords_of(idx);
            for (dx, dy) in DIRS {
                let bx = cx as isize + 2 * dx;
                let by = cy as isize + 2 * dy;
                if !in_bounds(size, bx, by) {
                    continue;
                }
                let ax = (cx as isize + dx) as usize;
                let ay = (cy as isize + dy) as usize;
                let (bx, by) = (bx as usize, by as usize);
                if hit(ax, ay) && hit(bx, by) {
                    set.insert(grid.index_of(ax, ay));
                    set.insert(grid.index_of(bx, by));
                }
            }
        }
        if set == before {
            break;
        }
    }

    set
}

/// Commit mode: scan the whole grid row-major and clear every match rooted
/// at each coordinate. Cells cleared earlier in the scan read as empty for
/// later coordinates, so overlapping groups are never double counted.
/// Returns the number of cells cleared.
pub fn resolve_pass(grid: &mut Grid) -> u32 {
    let mut cleared = 0u32;
    for y in 0..grid.size() {
        for x in 0..grid.size() {
            let matches = matches_at(grid, x, y);
            for idx in matches.iter() {
                let (cx, cy) = grid.coords_of(idx);
                grid.set(cx, cy, None);
                cleared += 1;
            }
        }
    }
    cleared
}

/// Move oracle: true when at least one orthogonal swap somewhere on the
/// board would produce a match. Callers invoke this on settled boards.
/// Speculative swaps run on a scratch copy; the input grid is untouched.
pub fn has_any_move(grid: &Grid) -> bool {
    let mut scratch = grid.clone();
    let size = scratch.size();

    for y in 0..size {
        for x in 0..size {
            for (dx, dy) in DIRS {
                let nx = x as isize + dx;
                let ny = y as isize + dy;
                if !in_bounds(size, nx, ny) {
                    continue;
                }
                let (nx, ny) = (nx as usize, ny as usize);

                scratch.swap(x, y, nx, ny);
                let produces = !matches_at(&scratch, x, y).is_empty()
                    || !matches_at(&scratch, nx, ny).is_empty();
                scratch.swap(x, y, nx, ny);

                if produces {
                    return true;
                }
            }
        }
    }
    false
}
