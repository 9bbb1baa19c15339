//! The Neighborhood an Agent moves in

use crate::{Cell, Cost, Obstacles};

/// A Neighborhood for Agents moving along the 4 cardinal directions and the 4 diagonals.
///
/// Also known as [Moore Neighborhood](https://en.wikipedia.org/wiki/Moore_neighborhood).
///
/// ```no_code
/// A: Agent, o: reachable in one step
/// o o o
///  \|/
/// o-A-o
///  /|\
/// o o o
/// ```
///
/// Neighbors are always produced in the same order, starting with the Cell above (`y - 1`) and
/// going clockwise. This keeps tie-breaking between equally good Paths reproducible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MooreNeighborhood {
	width: usize,
	height: usize,
}

const OFFSETS: [(isize, isize); 8] = [
	(0, -1),
	(1, -1),
	(1, 0),
	(1, 1),
	(0, 1),
	(-1, 1),
	(-1, 0),
	(-1, -1),
];

impl MooreNeighborhood {
	/// Creates a new MooreNeighborhood.
	///
	/// `width` and `height` are the size of the Grid to move on.
	pub fn new(width: usize, height: usize) -> MooreNeighborhood {
		MooreNeighborhood { width, height }
	}

	/// The size of the Grid as `(width, height)`
	pub fn size(&self) -> (usize, usize) {
		(self.width, self.height)
	}

	/// Checks if a Cell lies on the Grid
	pub fn contains(&self, (x, y): Cell) -> bool {
		x < self.width && y < self.height
	}

	/// Adds all Neighbors of `point` that lie on the Grid to `target`.
	///
	/// `target` is not cleared.
	pub fn get_all_neighbors(&self, point: Cell, target: &mut Vec<Cell>) {
		target.extend(self.neighbors(point));
	}

	/// Adds all Neighbors of `point` that lie on the Grid and are not blocked by an obstacle to
	/// `target`.
	///
	/// `target` is not cleared.
	pub fn walkable_neighbors(&self, point: Cell, obstacles: &Obstacles, target: &mut Vec<Cell>) {
		target.extend(self.neighbors(point).filter(|&cell| !obstacles.contains(cell)));
	}

	fn neighbors(&self, point: Cell) -> impl Iterator<Item = Cell> {
		let (width, height) = (self.width as isize, self.height as isize);
		let (px, py) = (point.0 as isize, point.1 as isize);

		OFFSETS
			.iter()
			.map(move |(dx, dy)| (px + dx, py + dy))
			.filter(move |&(x, y)| x >= 0 && y >= 0 && x < width && y < height)
			.map(|(x, y)| (x as usize, y as usize))
	}

	/// The straight-line distance from `point` to `goal`.
	///
	/// Every step costs at least its length, so this never overestimates the remaining cost.
	pub fn heuristic(&self, point: Cell, goal: Cell) -> Cost {
		euclidean_distance(point, goal)
	}
}

/// The straight-line distance between two Cells
pub fn euclidean_distance(a: Cell, b: Cell) -> Cost {
	let dx = a.0.abs_diff(b.0) as Cost;
	let dy = a.1.abs_diff(b.1) as Cost;
	(dx * dx + dy * dy).sqrt()
}

#[test]
fn test_moore_get_all_neighbors() {
	let neighborhood = MooreNeighborhood::new(5, 5);
	let mut neighbors = vec![];
	neighborhood.get_all_neighbors((0, 2), &mut neighbors);
	assert_eq!(neighbors, vec![(0, 1), (1, 1), (1, 2), (1, 3), (0, 3)]);
}

#[test]
fn test_moore_get_all_neighbors_center() {
	let neighborhood = MooreNeighborhood::new(3, 3);
	let mut neighbors = vec![];
	neighborhood.get_all_neighbors((1, 1), &mut neighbors);
	assert_eq!(
		neighbors,
		vec![(1, 0), (2, 0), (2, 1), (2, 2), (1, 2), (0, 2), (0, 1), (0, 0)]
	);
}

#[test]
fn test_moore_single_cell_grid() {
	let neighborhood = MooreNeighborhood::new(1, 1);
	let mut neighbors = vec![];
	neighborhood.get_all_neighbors((0, 0), &mut neighbors);
	assert!(neighbors.is_empty());
}

#[test]
fn test_walkable_neighbors() {
	let neighborhood = MooreNeighborhood::new(5, 5);
	let obstacles: Obstacles = [(1, 1), (1, 3), (9, 9)].into_iter().collect();
	let mut neighbors = vec![(4, 4)];
	neighborhood.walkable_neighbors((0, 2), &obstacles, &mut neighbors);
	assert_eq!(neighbors, vec![(4, 4), (0, 1), (1, 2), (0, 3)]);
}

#[test]
fn test_moore_heuristic() {
	let neighborhood = MooreNeighborhood::new(5, 5);
	assert_eq!(neighborhood.heuristic((3, 4), (0, 0)), 5.0);
	assert_eq!(neighborhood.heuristic((2, 2), (2, 2)), 0.0);
}
