use crate::{
    neighbors::MooreNeighborhood, scenario, Cell, Cost, CostConfig, Obstacles, Path, Scenario,
    ScenarioError,
};

use hashbrown::{HashMap, HashSet};
use slab::Slab;

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::ops::{Index, IndexMut};

/// Finds the cheapest Path from `start` to `goal` using the default [`CostConfig`].
///
/// The Agent may move to any of the 8 surrounding Cells that are on the Grid and not blocked by
/// `obstacles`. Every step is priced by [`CostConfig::edge_cost`], taking into account the
/// direction the Agent came from, whether it is `carrying` something and how close the next Cell
/// is to an obstacle.
///
/// ## Examples
/// Basic usage:
/// ```
/// use carry_pathfinding::prelude::*;
///
/// let obstacles: Obstacles = [(2, 2)].into_iter().collect();
///
/// let path = find_path((0, 2), (4, 2), &obstacles, 5, 5, false).unwrap();
///
/// assert_eq!(path.last(), Some(&(4, 2)));
/// assert!(!path.iter().any(|&cell| cell == (2, 2)));
/// assert!(path.cost() > 4.0);
/// ```
///
/// ## Returns
/// The Path, starting with the first step **after** `start` and ending with `goal`.
/// If `goal` cannot be reached, or if `start == goal`, the Path is empty.
///
/// ## Errors
/// A [`ScenarioError`] if the Grid is empty or `start` or `goal` lie outside of it.
pub fn find_path(
    start: Cell,
    goal: Cell,
    obstacles: &Obstacles,
    width: usize,
    height: usize,
    carrying: bool,
) -> Result<Path<Cell>, ScenarioError> {
    let neighborhood = scenario::validate(start, goal, width, height)?;
    Ok(a_star_search(
        &neighborhood,
        &CostConfig::default(),
        obstacles,
        start,
        goal,
        carrying,
    ))
}

/// Runs [`Scenario::find_path_with`] on every Scenario.
///
/// With the `parallel` feature (enabled by default) the Scenarios are searched in parallel.
/// The results are in the same order as `scenarios`.
pub fn find_paths(
    scenarios: &[Scenario],
    config: &CostConfig,
) -> Vec<Result<Path<Cell>, ScenarioError>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        scenarios
            .par_iter()
            .map(|scenario| scenario.find_path_with(config))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        scenarios
            .iter()
            .map(|scenario| scenario.find_path_with(config))
            .collect()
    }
}

#[derive(Clone, Copy, Debug)]
struct SearchNode {
    position: Cell,
    g: Cost,
    h: Cost,
    f: Cost,
    parent: Option<Cell>,
}

/// All SearchNodes of one search, at most one per position.
#[derive(Debug)]
struct NodeTable {
    nodes: Slab<SearchNode>,
    pos_map: HashMap<Cell, usize>,
}

impl NodeTable {
    fn with_capacity(capacity: usize) -> NodeTable {
        NodeTable {
            nodes: Slab::with_capacity(capacity),
            pos_map: HashMap::with_capacity(capacity),
        }
    }

    fn insert(&mut self, node: SearchNode) -> usize {
        let id = self.nodes.insert(node);
        self.pos_map.insert(node.position, id);
        id
    }

    fn id_at(&self, pos: Cell) -> Option<usize> {
        self.pos_map.get(&pos).copied()
    }

    fn node_at(&self, pos: Cell) -> Option<&SearchNode> {
        self.id_at(pos).map(|id| &self.nodes[id])
    }
}

impl Index<usize> for NodeTable {
    type Output = SearchNode;
    #[track_caller]
    fn index(&self, index: usize) -> &SearchNode {
        &self.nodes[index]
    }
}
impl IndexMut<usize> for NodeTable {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut SearchNode {
        &mut self.nodes[index]
    }
}

/// A Frontier entry: the node, and the `g` and `f` it had when it was pushed.
#[derive(Clone, Copy, Debug)]
struct HeuristicElement(usize, Cost, Cost);
impl PartialEq for HeuristicElement {
    fn eq(&self, rhs: &Self) -> bool {
        self.cmp(rhs) == Ordering::Equal
    }
}
impl Eq for HeuristicElement {}
impl PartialOrd for HeuristicElement {
    fn partial_cmp(&self, rhs: &Self) -> Option<Ordering> {
        Some(self.cmp(rhs))
    }
}
impl Ord for HeuristicElement {
    fn cmp(&self, rhs: &Self) -> Ordering {
        rhs.2.total_cmp(&self.2)
    }
}

/// Expects a validated Scenario: a non-empty Grid with `start` and `goal` on it.
pub(crate) fn a_star_search(
    neighborhood: &MooreNeighborhood,
    config: &CostConfig,
    obstacles: &Obstacles,
    start: Cell,
    goal: Cell,
    carrying: bool,
) -> Path<Cell> {
    search_log!(
        debug,
        "searching {:?} -> {:?} (carrying: {})",
        start,
        goal,
        carrying
    );
    if start == goal {
        return Path::empty();
    }

    let (width, height) = neighborhood.size();
    let size_hint = width.saturating_mul(height).min(1 << 16);

    let mut nodes = NodeTable::with_capacity(size_hint);
    let mut finalized = HashSet::with_capacity(size_hint);
    let mut frontier = BinaryHeap::with_capacity(size_hint / 2);

    let h = neighborhood.heuristic(start, goal);
    let start_id = nodes.insert(SearchNode {
        position: start,
        g: 0.0,
        h,
        f: h,
        parent: None,
    });
    frontier.push(HeuristicElement(start_id, 0.0, h));

    let mut neighbors = Vec::with_capacity(8);
    let mut expanded = 0usize;

    while let Some(HeuristicElement(current_id, current_cost, _)) = frontier.pop() {
        let current = nodes[current_id];
        // a cheaper route was found after this entry was pushed
        if current_cost > current.g || finalized.contains(&current.position) {
            continue;
        }

        if current.position == goal {
            let path = reconstruct_path(&nodes, &current);
            search_log!(
                debug,
                "found {} steps with cost {:.3} after {} expansions",
                path.len(),
                path.cost(),
                expanded
            );
            return path;
        }

        finalized.insert(current.position);
        expanded += 1;
        search_log!(
            trace,
            "expanding {:?} (g = {:.3}, f = {:.3})",
            current.position,
            current.g,
            current.f
        );

        neighbors.clear();
        neighborhood.walkable_neighbors(current.position, obstacles, &mut neighbors);
        for &other_pos in neighbors.iter() {
            if finalized.contains(&other_pos) {
                continue;
            }

            let other_cost = current.g
                + config.edge_cost(
                    current.parent,
                    current.position,
                    other_pos,
                    carrying,
                    obstacles,
                );

            let other_id = match nodes.id_at(other_pos) {
                Some(other_id) => {
                    let other = &mut nodes[other_id];
                    if other_cost >= other.g {
                        continue;
                    }
                    other.g = other_cost;
                    other.f = other_cost + other.h;
                    other.parent = Some(current.position);
                    other_id
                }
                None => {
                    let h = neighborhood.heuristic(other_pos, goal);
                    nodes.insert(SearchNode {
                        position: other_pos,
                        g: other_cost,
                        h,
                        f: other_cost + h,
                        parent: Some(current.position),
                    })
                }
            };
            frontier.push(HeuristicElement(other_id, other_cost, nodes[other_id].f));
        }
    }

    search_log!(
        debug,
        "{:?} is unreachable, gave up after {} expansions",
        goal,
        expanded
    );
    Path::empty()
}

fn reconstruct_path(nodes: &NodeTable, goal: &SearchNode) -> Path<Cell> {
    let mut steps = vec![];
    let mut current = goal;

    while let Some(parent) = current.parent {
        steps.push(current.position);
        match nodes.node_at(parent) {
            Some(node) => current = node,
            None => break,
        }
    }
    steps.reverse();

    Path::new(steps, goal.g)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacles(cells: &[Cell]) -> Obstacles {
        cells.iter().copied().collect()
    }

    fn assert_walkable(path: &Path<Cell>, start: Cell, goal: Cell, blocked: &Obstacles) {
        let mut previous = start;
        for &cell in path.iter() {
            assert!(
                previous.0.abs_diff(cell.0) <= 1 && previous.1.abs_diff(cell.1) <= 1,
                "{:?} -> {:?} is not a single step",
                previous,
                cell
            );
            assert_ne!(previous, cell);
            assert!(!blocked.contains(cell), "{:?} is blocked", cell);
            previous = cell;
        }
        assert_eq!(path.last(), Some(&goal));
        let distinct: HashSet<Cell> = path.iter().copied().collect();
        assert_eq!(distinct.len(), path.len());
        assert!(!distinct.contains(&start));
    }

    #[test]
    fn straight_line() {
        let path = find_path((0, 2), (4, 2), &Obstacles::new(), 5, 5, false).unwrap();

        assert_eq!(path, vec![(1, 2), (2, 2), (3, 2), (4, 2)]);
        assert_eq!(path.cost(), 4.0);
    }

    #[test]
    fn straight_line_carrying() {
        let path = find_path((0, 2), (4, 2), &Obstacles::new(), 5, 5, true).unwrap();

        assert_eq!(path, vec![(1, 2), (2, 2), (3, 2), (4, 2)]);
        assert_eq!(path.cost(), 6.0);
    }

    #[test]
    fn detour() {
        let blocked = obstacles(&[(2, 2)]);
        let path = find_path((0, 2), (4, 2), &blocked, 5, 5, false).unwrap();

        assert_walkable(&path, (0, 2), (4, 2), &blocked);
        assert!(path.cost() > 4.0);

        let recomputed = CostConfig::default().path_cost((0, 2), path.steps(), false, &blocked);
        assert!((recomputed - path.cost()).abs() < 1e-9);
    }

    #[test]
    fn enclosed_goal() {
        let blocked = obstacles(&[
            (1, 1),
            (2, 1),
            (3, 1),
            (1, 2),
            (3, 2),
            (1, 3),
            (2, 3),
            (3, 3),
        ]);
        let path = find_path((0, 0), (2, 2), &blocked, 5, 5, false).unwrap();

        assert!(path.is_empty());
        assert_eq!(path.cost(), 0.0);
    }

    #[test]
    fn enclosed_start() {
        let blocked = obstacles(&[(1, 0), (1, 1), (0, 1)]);
        let path = find_path((0, 0), (4, 4), &blocked, 5, 5, true).unwrap();

        assert!(path.is_empty());
    }

    #[test]
    fn blocked_goal() {
        let path = find_path((0, 0), (3, 3), &obstacles(&[(3, 3)]), 5, 5, false).unwrap();

        assert!(path.is_empty());
    }

    #[test]
    fn start_is_goal() {
        let path = find_path((2, 2), (2, 2), &Obstacles::new(), 5, 5, false).unwrap();

        assert!(path.is_empty());
    }

    #[test]
    fn single_step() {
        let path = find_path((0, 0), (1, 1), &Obstacles::new(), 2, 2, false).unwrap();

        assert_eq!(path, vec![(1, 1)]);
        assert_eq!(path.cost(), std::f64::consts::SQRT_2);
    }

    #[test]
    fn obstacles_outside_of_the_grid() {
        let blocked = obstacles(&[(10, 2), (100, 100)]);
        let path = find_path((0, 2), (4, 2), &blocked, 5, 5, false).unwrap();

        assert_eq!(path, vec![(1, 2), (2, 2), (3, 2), (4, 2)]);
    }

    #[test]
    fn invalid_scenarios() {
        let none = Obstacles::new();
        assert_eq!(
            find_path((0, 0), (0, 0), &none, 0, 0, false),
            Err(ScenarioError::EmptyGrid {
                width: 0,
                height: 0
            })
        );
        assert_eq!(
            find_path((5, 0), (0, 0), &none, 5, 5, false),
            Err(ScenarioError::StartOutOfBounds((5, 0)))
        );
        assert_eq!(
            find_path((0, 0), (0, 5), &none, 5, 5, false),
            Err(ScenarioError::GoalOutOfBounds((0, 5)))
        );
    }

    #[test]
    fn avoids_danger_when_cheap() {
        // a single obstacle right above the straight line: hugging it costs 3 per step
        let blocked = obstacles(&[(4, 0)]);
        let path = find_path((0, 1), (8, 1), &blocked, 9, 6, false).unwrap();

        assert_walkable(&path, (0, 1), (8, 1), &blocked);
        assert!(!path.iter().any(|&cell| cell == (4, 1)));
    }

    #[test]
    fn path_cost_matches_search() {
        let blocked = obstacles(&[(3, 0), (3, 1), (3, 2), (3, 3), (5, 5), (6, 4)]);
        let config = CostConfig::default();
        for carrying in [false, true] {
            let path = find_path((0, 0), (7, 2), &blocked, 8, 7, carrying).unwrap();
            assert_walkable(&path, (0, 0), (7, 2), &blocked);

            let recomputed = config.path_cost((0, 0), path.steps(), carrying, &blocked);
            assert!((recomputed - path.cost()).abs() < 1e-9);
        }
    }

    #[test]
    fn carrying_is_never_cheaper() {
        let blocked = obstacles(&[(2, 2)]);
        let relaxed = find_path((0, 2), (4, 2), &blocked, 5, 5, false).unwrap();
        let careful = find_path((0, 2), (4, 2), &blocked, 5, 5, true).unwrap();

        assert!(careful.cost() > relaxed.cost());
    }

    #[test]
    fn batch() {
        let scenarios = vec![
            Scenario {
                start: (0, 2),
                goal: (4, 2),
                obstacles: Obstacles::new(),
                width: 5,
                height: 5,
                carrying: false,
            },
            Scenario {
                start: (0, 2),
                goal: (4, 2),
                obstacles: Obstacles::new(),
                width: 5,
                height: 5,
                carrying: true,
            },
            Scenario {
                start: (0, 2),
                goal: (5, 2),
                obstacles: Obstacles::new(),
                width: 5,
                height: 5,
                carrying: false,
            },
        ];

        let results = find_paths(&scenarios, &CostConfig::default());

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().map(Path::cost), Ok(4.0));
        assert_eq!(results[1].as_ref().map(Path::cost), Ok(6.0));
        assert_eq!(results[2], Err(ScenarioError::GoalOutOfBounds((5, 2))));
    }
}
