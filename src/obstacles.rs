use crate::{neighbors::euclidean_distance, Cell, Cost};

use hashbrown::HashSet;

/// The set of Cells that cannot be walked over.
///
/// Cells outside of the Grid may be part of the set, they simply never block anything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Obstacles {
    cells: HashSet<Cell>,
}

impl Obstacles {
    /// Creates an empty set of Obstacles
    pub fn new() -> Obstacles {
        Obstacles::default()
    }

    /// Marks `cell` as blocked. Returns `false` if it already was.
    pub fn insert(&mut self, cell: Cell) -> bool {
        self.cells.insert(cell)
    }

    /// Unblocks `cell`. Returns `false` if it was not blocked.
    pub fn remove(&mut self, cell: Cell) -> bool {
        self.cells.remove(&cell)
    }

    /// Checks if `cell` is blocked
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// The number of blocked Cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// `true` if nothing is blocked
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates over the blocked Cells in no particular order
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    /// The straight-line distance from `cell` to the closest obstacle that is at most `reach`
    /// Cells away along each axis, or `None` if there is no such obstacle.
    ///
    /// Only the `(2 * reach + 1)²` Cells around `cell` are looked at, so the cost does not depend
    /// on the number of obstacles.
    pub fn nearest_distance(&self, cell: Cell, reach: usize) -> Option<Cost> {
        let (cx, cy) = cell;
        let xs = cx.saturating_sub(reach)..=cx.saturating_add(reach);

        xs.flat_map(|x| {
            (cy.saturating_sub(reach)..=cy.saturating_add(reach)).map(move |y| (x, y))
        })
        .filter(|&other| self.cells.contains(&other))
        .map(|obstacle| euclidean_distance(cell, obstacle))
        .min_by(|a, b| a.total_cmp(b))
    }
}

impl FromIterator<Cell> for Obstacles {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Obstacles {
        Obstacles {
            cells: iter.into_iter().collect(),
        }
    }
}

impl Extend<Cell> for Obstacles {
    fn extend<I: IntoIterator<Item = Cell>>(&mut self, iter: I) {
        self.cells.extend(iter);
    }
}

impl From<Vec<Cell>> for Obstacles {
    fn from(cells: Vec<Cell>) -> Obstacles {
        cells.into_iter().collect()
    }
}
