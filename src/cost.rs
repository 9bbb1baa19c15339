use crate::{Cell, Cost, Obstacles};

/// The cost of a diagonal step
pub const DIAGONAL_COST: Cost = std::f64::consts::SQRT_2;

/// Penalties for changing direction, graded by the angle between the step into a Cell and the
/// step out of it.
///
/// The bands are defined on the cosine of that angle:
///
/// | cosine         | turn                 | field      |
/// |----------------|----------------------|------------|
/// | `> 0.9`        | straight (~0°)       | none       |
/// | `(0.7, 0.9]`   | gentle (~25° - 45°)  | `gentle`   |
/// | `(0, 0.7]`     | medium (~45° - 90°)  | `medium`   |
/// | `(-0.7, 0]`    | sharp (~90° - 135°)  | `sharp`    |
/// | `<= -0.7`      | reversal (~135° - 180°) | `reversal` |
///
/// On a Moore Grid the only angles are multiples of 45°, so a 45° turn counts as `gentle`,
/// 90° as `sharp` and both 135° and 180° as `reversal`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TurnPenalties {
	/// Penalty for a gentle curve (defaults to `0.3`)
	pub gentle: Cost,
	/// Penalty for a medium curve (defaults to `0.6`)
	pub medium: Cost,
	/// Penalty for a sharp turn (defaults to `1.0`)
	pub sharp: Cost,
	/// Penalty for turning around (defaults to `2.0`)
	pub reversal: Cost,
}

impl TurnPenalties {
	/// No penalties at all
	pub const NONE: TurnPenalties = TurnPenalties {
		gentle: 0.0,
		medium: 0.0,
		sharp: 0.0,
		reversal: 0.0,
	};

	/// The penalty for a turn with the given cosine
	pub fn for_cosine(&self, cos_angle: f64) -> Cost {
		if cos_angle > 0.9 {
			0.0
		} else if cos_angle > 0.7 {
			self.gentle
		} else if cos_angle > 0.0 {
			self.medium
		} else if cos_angle > -0.7 {
			self.sharp
		} else {
			self.reversal
		}
	}

	/// The penalty for entering `current` from `previous` and leaving towards `next`.
	///
	/// Returns `0` if either step has no length.
	pub fn for_turn(&self, previous: Cell, current: Cell, next: Cell) -> Cost {
		let dir_in = direction(previous, current);
		let dir_out = direction(current, next);

		let length_in = length(dir_in);
		let length_out = length(dir_out);
		if length_in == 0.0 || length_out == 0.0 {
			return 0.0;
		}

		let dot = (dir_in.0 * dir_out.0 + dir_in.1 * dir_out.1) as f64;
		self.for_cosine(dot / (length_in * length_out))
	}
}

impl Default for TurnPenalties {
	fn default() -> TurnPenalties {
		CostConfig::STANDARD.turn_penalties
	}
}

/// Obstacles further away than this along either axis are more than `2.5` away.
const DANGER_REACH: usize = 2;

/// Surcharges for stepping onto a Cell close to an obstacle.
///
/// The bands are defined on the straight-line distance to the closest obstacle:
///
/// | distance        | field      |
/// |-----------------|------------|
/// | `<= 1.0`        | `touching` |
/// | `(1.0, 1.414]`  | `adjacent` |
/// | `(1.414, 2.0]`  | `near`     |
/// | `(2.0, 2.5]`    | `close`    |
/// | `> 2.5`         | none       |
///
/// Note that a diagonal neighbor of an obstacle is `√2 > 1.414` away and thus only `near`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DangerZones {
	/// Surcharge right next to an obstacle (defaults to `3.0`)
	pub touching: Cost,
	/// Surcharge up to a distance of `1.414` (defaults to `2.0`)
	pub adjacent: Cost,
	/// Surcharge up to a distance of `2.0` (defaults to `1.0`)
	pub near: Cost,
	/// Surcharge up to a distance of `2.5` (defaults to `0.5`)
	pub close: Cost,
}

impl DangerZones {
	/// No surcharges at all
	pub const NONE: DangerZones = DangerZones {
		touching: 0.0,
		adjacent: 0.0,
		near: 0.0,
		close: 0.0,
	};

	/// The surcharge for a Cell at `distance` from the closest obstacle
	pub fn for_distance(&self, distance: Cost) -> Cost {
		if distance <= 1.0 {
			self.touching
		} else if distance <= 1.414 {
			self.adjacent
		} else if distance <= 2.0 {
			self.near
		} else if distance <= 2.5 {
			self.close
		} else {
			0.0
		}
	}

	/// The surcharge for stepping onto `cell`. `0` if there are no obstacles nearby.
	pub fn for_cell(&self, cell: Cell, obstacles: &Obstacles) -> Cost {
		if *self == DangerZones::NONE {
			return 0.0;
		}
		obstacles
			.nearest_distance(cell, DANGER_REACH)
			.map_or(0.0, |distance| self.for_distance(distance))
	}
}

impl Default for DangerZones {
	fn default() -> DangerZones {
		CostConfig::STANDARD.danger_zones
	}
}

/// Options for the Cost of moving across the Grid
///
/// The cost of a single step from `current` to `next` is
/// ```text
/// (base + turn + danger) * multiplier
/// ```
/// - `base`: `1` for a straight step, [`diagonal_cost`](CostConfig::diagonal_cost) for a
///   diagonal one
/// - `turn`: the [`TurnPenalties`] for the change of direction at `current`. `0` on the first
///   step of a Path. Multiplied by [`carry_turn_factor`](CostConfig::carry_turn_factor) while
///   carrying.
/// - `danger`: the [`DangerZones`] surcharge for `next`
/// - `multiplier`: [`carry_multiplier`](CostConfig::carry_multiplier) while carrying, `1`
///   otherwise
///
/// Default options:
/// ```
/// # use carry_pathfinding::{CostConfig, DangerZones, TurnPenalties};
/// assert_eq!(
/// 	CostConfig {
/// 		diagonal_cost: std::f64::consts::SQRT_2,
/// 		turn_penalties: TurnPenalties {
/// 			gentle: 0.3,
/// 			medium: 0.6,
/// 			sharp: 1.0,
/// 			reversal: 2.0,
/// 		},
/// 		danger_zones: DangerZones {
/// 			touching: 3.0,
/// 			adjacent: 2.0,
/// 			near: 1.0,
/// 			close: 0.5,
/// 		},
/// 		carry_turn_factor: 2.0,
/// 		carry_multiplier: 1.5,
/// 	},
/// 	Default::default()
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CostConfig {
	/// The base cost of a diagonal step (defaults to `√2`)
	pub diagonal_cost: Cost,
	/// Penalties for changing direction
	pub turn_penalties: TurnPenalties,
	/// Surcharges for moving close to obstacles
	pub danger_zones: DangerZones,
	/// Factor applied to the turn penalty while carrying (defaults to `2.0`)
	pub carry_turn_factor: Cost,
	/// Factor applied to the whole step while carrying (defaults to `1.5`)
	pub carry_multiplier: Cost,
}

impl CostConfig {
	/// The full cost model with all modifiers enabled. Same as `Default::default()`.
	pub const STANDARD: CostConfig = CostConfig {
		diagonal_cost: DIAGONAL_COST,
		turn_penalties: TurnPenalties {
			gentle: 0.3,
			medium: 0.6,
			sharp: 1.0,
			reversal: 2.0,
		},
		danger_zones: DangerZones {
			touching: 3.0,
			adjacent: 2.0,
			near: 1.0,
			close: 0.5,
		},
		carry_turn_factor: 2.0,
		carry_multiplier: 1.5,
	};

	/// Plain movement cost: straight and diagonal steps only, no turns, no danger, no carry state.
	///
	/// Values:
	/// ```
	/// # use carry_pathfinding::{CostConfig, DangerZones, TurnPenalties};
	/// assert_eq!(
	/// 	CostConfig {
	/// 		diagonal_cost: std::f64::consts::SQRT_2,
	/// 		turn_penalties: TurnPenalties::NONE,
	/// 		danger_zones: DangerZones::NONE,
	/// 		carry_turn_factor: 1.0,
	/// 		carry_multiplier: 1.0,
	/// 	},
	/// 	CostConfig::PLAIN
	/// );
	/// ```
	pub const PLAIN: CostConfig = CostConfig {
		diagonal_cost: DIAGONAL_COST,
		turn_penalties: TurnPenalties::NONE,
		danger_zones: DangerZones::NONE,
		carry_turn_factor: 1.0,
		carry_multiplier: 1.0,
	};

	/// The base cost of a single step. `current` and `next` have to be neighbors.
	pub fn base_cost(&self, current: Cell, next: Cell) -> Cost {
		if current.0 != next.0 && current.1 != next.1 {
			self.diagonal_cost
		} else {
			1.0
		}
	}

	/// The turn penalty for a step, including the carry factor.
	pub fn turn_cost(&self, previous: Option<Cell>, current: Cell, next: Cell, carrying: bool) -> Cost {
		let penalty = previous.map_or(0.0, |previous| {
			self.turn_penalties.for_turn(previous, current, next)
		});
		if carrying {
			penalty * self.carry_turn_factor
		} else {
			penalty
		}
	}

	/// The cost of stepping from `current` to `next`, having entered `current` from `previous`.
	///
	/// ## Examples
	/// ```
	/// # use carry_pathfinding::{CostConfig, Obstacles};
	/// let config = CostConfig::default();
	/// let obstacles = Obstacles::new();
	///
	/// // turning around on the spot
	/// assert_eq!(config.edge_cost(Some((0, 0)), (1, 0), (0, 0), false, &obstacles), 1.0 + 2.0);
	/// assert_eq!(config.edge_cost(Some((0, 0)), (1, 0), (0, 0), true, &obstacles), (1.0 + 4.0) * 1.5);
	/// ```
	pub fn edge_cost(
		&self,
		previous: Option<Cell>,
		current: Cell,
		next: Cell,
		carrying: bool,
		obstacles: &Obstacles,
	) -> Cost {
		let base = self.base_cost(current, next);
		let turn = self.turn_cost(previous, current, next, carrying);
		let danger = self.danger_zones.for_cell(next, obstacles);
		let multiplier = if carrying { self.carry_multiplier } else { 1.0 };

		(base + turn + danger) * multiplier
	}

	/// The total cost of walking `steps` from `start`.
	///
	/// `steps` does not include `start`, just like the Paths returned by
	/// [`find_path`](crate::find_path). The first step is charged without a turn penalty.
	pub fn path_cost(&self, start: Cell, steps: &[Cell], carrying: bool, obstacles: &Obstacles) -> Cost {
		let mut previous = None;
		let mut current = start;
		let mut cost = 0.0;
		for &next in steps {
			cost += self.edge_cost(previous, current, next, carrying, obstacles);
			previous = Some(current);
			current = next;
		}
		cost
	}
}

impl Default for CostConfig {
	fn default() -> CostConfig {
		CostConfig::STANDARD
	}
}

fn direction(from: Cell, to: Cell) -> (isize, isize) {
	(
		to.0 as isize - from.0 as isize,
		to.1 as isize - from.1 as isize,
	)
}

fn length((dx, dy): (isize, isize)) -> f64 {
	((dx * dx + dy * dy) as f64).sqrt()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn base_cost() {
		let config = CostConfig::default();
		assert_eq!(config.base_cost((1, 1), (2, 1)), 1.0);
		assert_eq!(config.base_cost((1, 1), (1, 0)), 1.0);
		assert_eq!(config.base_cost((1, 1), (2, 2)), DIAGONAL_COST);
		assert_eq!(config.base_cost((1, 1), (0, 2)), DIAGONAL_COST);
	}

	#[test]
	fn turn_bands() {
		let turns = TurnPenalties::default();

		// straight ahead
		assert_eq!(turns.for_turn((0, 0), (1, 0), (2, 0)), 0.0);
		assert_eq!(turns.for_turn((0, 0), (1, 1), (2, 2)), 0.0);
		// 45°
		assert_eq!(turns.for_turn((0, 0), (1, 0), (2, 1)), 0.3);
		// 90°
		assert_eq!(turns.for_turn((0, 1), (1, 1), (1, 0)), 1.0);
		assert_eq!(turns.for_turn((0, 0), (1, 1), (2, 0)), 1.0);
		// 135°
		assert_eq!(turns.for_turn((0, 0), (1, 0), (0, 1)), 2.0);
		// 180°
		assert_eq!(turns.for_turn((0, 0), (1, 0), (0, 0)), 2.0);
		// no movement
		assert_eq!(turns.for_turn((1, 0), (1, 0), (2, 0)), 0.0);
	}

	#[test]
	fn turn_breakpoints() {
		let turns = TurnPenalties::default();

		assert_eq!(turns.for_cosine(1.0), 0.0);
		assert_eq!(turns.for_cosine(0.91), 0.0);
		assert_eq!(turns.for_cosine(0.9), 0.3);
		assert_eq!(turns.for_cosine(0.71), 0.3);
		assert_eq!(turns.for_cosine(0.7), 0.6);
		assert_eq!(turns.for_cosine(0.01), 0.6);
		assert_eq!(turns.for_cosine(0.0), 1.0);
		assert_eq!(turns.for_cosine(-0.69), 1.0);
		assert_eq!(turns.for_cosine(-0.7), 2.0);
		assert_eq!(turns.for_cosine(-1.0), 2.0);
	}

	#[test]
	fn carrying_doubles_turns() {
		let config = CostConfig::default();

		assert_eq!(config.turn_cost(None, (1, 0), (0, 0), true), 0.0);
		assert_eq!(config.turn_cost(Some((0, 0)), (1, 0), (2, 0), true), 0.0);
		assert_eq!(config.turn_cost(Some((0, 0)), (1, 0), (0, 0), false), 2.0);
		assert_eq!(config.turn_cost(Some((0, 0)), (1, 0), (0, 0), true), 4.0);
	}

	#[test]
	fn danger_breakpoints() {
		let zones = DangerZones::default();

		assert_eq!(zones.for_distance(1.0), 3.0);
		assert_eq!(zones.for_distance(1.2), 2.0);
		assert_eq!(zones.for_distance(1.414), 2.0);
		assert_eq!(zones.for_distance(DIAGONAL_COST), 1.0);
		assert_eq!(zones.for_distance(2.0), 1.0);
		assert_eq!(zones.for_distance(2.2), 0.5);
		assert_eq!(zones.for_distance(2.5), 0.5);
		assert_eq!(zones.for_distance(2.6), 0.0);
	}

	#[test]
	fn danger_for_cell() {
		let zones = DangerZones::default();
		let obstacles: Obstacles = [(0, 0)].into_iter().collect();

		assert_eq!(zones.for_cell((1, 0), &obstacles), 3.0);
		assert_eq!(zones.for_cell((1, 1), &obstacles), 1.0);
		assert_eq!(zones.for_cell((2, 0), &obstacles), 1.0);
		assert_eq!(zones.for_cell((2, 1), &obstacles), 0.5);
		assert_eq!(zones.for_cell((2, 2), &obstacles), 0.0);
		assert_eq!(zones.for_cell((3, 0), &obstacles), 0.0);
		assert_eq!(zones.for_cell((1, 0), &Obstacles::new()), 0.0);
		assert_eq!(DangerZones::NONE.for_cell((1, 0), &obstacles), 0.0);
	}

	#[test]
	fn danger_ignores_far_obstacles() {
		let zones = DangerZones::default();
		// a dense field of obstacles, all at least 3 Cells away along one axis
		let obstacles: Obstacles = (0..100)
			.flat_map(|x| (0..100).map(move |y| (x, y)))
			.filter(|&(x, y): &(usize, usize)| x.abs_diff(50) >= 3 || y.abs_diff(50) >= 3)
			.collect();

		assert_eq!(zones.for_cell((50, 50), &obstacles), 0.0);
		assert_eq!(zones.for_cell((50, 49), &obstacles), 1.0);
	}

	#[test]
	fn edge_cost_combines_in_order() {
		let config = CostConfig::default();
		let obstacles: Obstacles = [(3, 0)].into_iter().collect();

		// straight step next to an obstacle: 1 + 0 + 3
		assert_eq!(config.edge_cost(Some((0, 0)), (1, 0), (2, 0), false, &obstacles), 4.0);
		// carrying: (1 + 0 + 3) * 1.5
		assert_eq!(config.edge_cost(Some((0, 0)), (1, 0), (2, 0), true, &obstacles), 6.0);
		// 90° turn away from it: (1 + 1 * 2 + 0.5) * 1.5
		assert_eq!(config.edge_cost(Some((0, 0)), (1, 0), (1, 1), true, &obstacles), 5.25);
	}

	#[test]
	fn plain_ignores_modifiers() {
		let config = CostConfig::PLAIN;
		let obstacles: Obstacles = [(0, 1)].into_iter().collect();

		assert_eq!(config.edge_cost(Some((0, 0)), (1, 0), (0, 0), true, &obstacles), 1.0);
		assert_eq!(config.edge_cost(None, (1, 0), (2, 1), true, &obstacles), DIAGONAL_COST);
	}

	#[test]
	fn path_cost() {
		let config = CostConfig::default();
		let obstacles = Obstacles::new();

		let straight = [(1, 2), (2, 2), (3, 2), (4, 2)];
		assert_eq!(config.path_cost((0, 2), &straight, false, &obstacles), 4.0);
		assert_eq!(config.path_cost((0, 2), &straight, true, &obstacles), 6.0);

		// right, then down: the second step turns by 90°
		let corner = [(1, 0), (1, 1)];
		assert_eq!(config.path_cost((0, 0), &corner, false, &obstacles), 1.0 + 2.0);

		assert_eq!(config.path_cost((0, 0), &[], false, &obstacles), 0.0);
	}
}
