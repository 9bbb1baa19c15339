#![warn(
	missing_docs,
	missing_debug_implementations,
	missing_copy_implementations,
	trivial_casts,
	trivial_numeric_casts,
	unsafe_code,
	unstable_features,
	unused_import_braces,
	unused_qualifications
)]

//! A crate to find careful Paths on a Grid.
//!
//! ## Introduction
//! Regular A* on a Grid treats every step as a fixed price: one for a straight step, √2 for a
//! diagonal one. An Agent that has to physically move along the Path usually cares about more
//! than distance. Turning around takes time, moving while holding something is slower and
//! riskier, and brushing past an obstacle is best avoided when there is room to spare.
//!
//! This crate runs A* with an edge cost that accounts for all three:
//! - a **turn penalty**, graded by the angle between the step into a Cell and the step out of it
//! - a **carry state** that doubles the turn penalty and scales the whole step by `1.5`
//! - a **danger surcharge** for Cells close to an obstacle (they stay walkable)
//!
//! The exact values are described in [`CostConfig`].
//!
//! ## Examples
//! Finding a Path on an open Grid:
//! ```
//! use carry_pathfinding::prelude::*;
//!
//! let obstacles = Obstacles::new();
//!
//! let path = find_path((0, 2), (4, 2), &obstacles, 5, 5, false).unwrap();
//!
//! // the start is not part of the Path
//! assert_eq!(path, vec![(1, 2), (2, 2), (3, 2), (4, 2)]);
//! assert_eq!(path.cost(), 4.0);
//! ```
//!
//! An unreachable Goal is not an error, it simply results in an empty Path:
//! ```
//! # use carry_pathfinding::prelude::*;
//! // wall off the right half of the Grid
//! let obstacles: Obstacles = (0..5).map(|y| (2, y)).collect();
//!
//! let path = find_path((0, 2), (4, 2), &obstacles, 5, 5, false).unwrap();
//!
//! assert!(path.is_empty());
//! ```
//!
//! Only an invalid [`Scenario`] (empty Grid, start or goal outside of the Grid) is reported as
//! an error:
//! ```
//! # use carry_pathfinding::prelude::*;
//! let result = find_path((0, 2), (9, 2), &Obstacles::new(), 5, 5, false);
//!
//! assert_eq!(result, Err(ScenarioError::GoalOutOfBounds((9, 2))));
//! ```
//!
//! ### Scenarios and Configuration
//! The same search is available through a [`Scenario`], which also allows supplying a
//! different [`CostConfig`]:
//! ```
//! use carry_pathfinding::{prelude::*, CostConfig};
//!
//! let scenario = Scenario {
//!     start: (0, 0),
//!     goal: (3, 3),
//!     obstacles: Obstacles::new(),
//!     width: 4,
//!     height: 4,
//!     carrying: true,
//! };
//!
//! let careful = scenario.find_path().unwrap();
//! let plain = scenario.find_path_with(&CostConfig::PLAIN).unwrap();
//!
//! // the same diagonal either way, but carrying makes every step more expensive
//! assert_eq!(plain.steps(), careful.steps());
//! assert!(plain.cost() < careful.cost());
//! ```
//!
//! ### Fetch and Deliver
//! An [`Episode`] drives an Agent one Cell at a time: first to an object, then, carrying it,
//! to a delivery point.
//! ```
//! use carry_pathfinding::{prelude::*, CostConfig, EpisodeOutcome};
//!
//! let mut episode = Episode::new(
//!     (0, 0),           // the Agent
//!     (3, 4),           // the object to fetch
//!     (6, 0),           // the delivery point
//!     Obstacles::new(),
//!     (7, 5),           // the size of the Grid
//!     CostConfig::default(),
//! )
//! .unwrap();
//!
//! let outcome = episode.run(100);
//!
//! assert!(matches!(outcome, EpisodeOutcome::Delivered { .. }));
//! assert_eq!(episode.position(), (6, 0));
//! ```

/// A shorthand for Cells on the Grid
pub type Cell = (usize, usize);

/// The Type used for the Cost of a step or a Path
pub type Cost = f64;

#[cfg(feature = "log")]
macro_rules! search_log {
	($level:ident, $($arg:tt)+) => {
		log::$level!($($arg)+)
	};
}

#[cfg(not(feature = "log"))]
macro_rules! search_log {
	($level:ident, $($arg:tt)+) => {{
		let _ = format_args!($($arg)+);
	}};
}

mod cost;
pub use cost::{CostConfig, DangerZones, TurnPenalties};

mod episode;
pub use episode::{Episode, EpisodeEvent, EpisodeOutcome, MatchLayout, Phase};

pub mod neighbors;

mod obstacles;
pub use obstacles::Obstacles;

mod path;
pub use path::{Iter, Path};

mod scenario;
pub use scenario::{Scenario, ScenarioError};

mod search;
pub use search::{find_path, find_paths};

/// The prelude for this crate.
pub mod prelude {
	pub use crate::{
		find_path, neighbors::MooreNeighborhood, Cell, Episode, Obstacles, Path, Scenario,
		ScenarioError,
	};
}
