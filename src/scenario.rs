use crate::{neighbors::MooreNeighborhood, search, Cell, CostConfig, Obstacles, Path};

use std::{error::Error, fmt};

/// Everything a single search needs to know.
///
/// `carrying` selects the cost regime for the whole search, see [`CostConfig`].
#[derive(Clone, Debug, PartialEq)]
pub struct Scenario {
    /// Where the Agent stands
    pub start: Cell,
    /// Where the Agent wants to go
    pub goal: Cell,
    /// Cells that cannot be walked over
    pub obstacles: Obstacles,
    /// The width of the Grid
    pub width: usize,
    /// The height of the Grid
    pub height: usize,
    /// `true` while the Agent is carrying something
    pub carrying: bool,
}

impl Scenario {
    /// Checks that the Grid is not empty and that both `start` and `goal` lie on it.
    pub fn validate(&self) -> Result<MooreNeighborhood, ScenarioError> {
        validate(self.start, self.goal, self.width, self.height)
    }

    /// Finds the cheapest Path from `start` to `goal` using the default [`CostConfig`].
    ///
    /// See [`find_path`](crate::find_path) for details.
    pub fn find_path(&self) -> Result<Path<Cell>, ScenarioError> {
        self.find_path_with(&CostConfig::default())
    }

    /// Finds the cheapest Path from `start` to `goal` using the given [`CostConfig`].
    pub fn find_path_with(&self, config: &CostConfig) -> Result<Path<Cell>, ScenarioError> {
        let neighborhood = self.validate()?;
        Ok(search::a_star_search(
            &neighborhood,
            config,
            &self.obstacles,
            self.start,
            self.goal,
            self.carrying,
        ))
    }
}

pub(crate) fn validate(
    start: Cell,
    goal: Cell,
    width: usize,
    height: usize,
) -> Result<MooreNeighborhood, ScenarioError> {
    if width == 0 || height == 0 {
        return Err(ScenarioError::EmptyGrid { width, height });
    }
    let neighborhood = MooreNeighborhood::new(width, height);
    if !neighborhood.contains(start) {
        return Err(ScenarioError::StartOutOfBounds(start));
    }
    if !neighborhood.contains(goal) {
        return Err(ScenarioError::GoalOutOfBounds(goal));
    }
    Ok(neighborhood)
}

/// The reasons a [`Scenario`] can be rejected.
///
/// An unreachable goal is not one of them, it results in an empty [`Path`] instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScenarioError {
    /// The Grid has no Cells
    EmptyGrid {
        /// the requested width
        width: usize,
        /// the requested height
        height: usize,
    },
    /// The start lies outside of the Grid
    StartOutOfBounds(Cell),
    /// The goal lies outside of the Grid
    GoalOutOfBounds(Cell),
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScenarioError::EmptyGrid { width, height } => {
                write!(f, "invalid scenario: empty grid of size {}x{}", width, height)
            }
            ScenarioError::StartOutOfBounds(cell) => {
                write!(f, "invalid scenario: start {:?} is outside of the grid", cell)
            }
            ScenarioError::GoalOutOfBounds(cell) => {
                write!(f, "invalid scenario: goal {:?} is outside of the grid", cell)
            }
        }
    }
}

impl Error for ScenarioError {}
