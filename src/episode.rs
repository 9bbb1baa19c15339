use crate::{
    neighbors::MooreNeighborhood, scenario, search, Cell, CostConfig, Obstacles, Scenario,
    ScenarioError,
};

use std::collections::VecDeque;
use std::ops::Range;

/// What an [`Episode`] is currently doing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Walking to the object, not carrying anything
    Fetching,
    /// Carrying the object to the delivery point
    Delivering,
    /// The object has been delivered
    Complete,
}

/// The result of a single [`Episode::step`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EpisodeEvent {
    /// The Agent moved to the Cell
    Moved(Cell),
    /// The Agent reached the object at the Cell and is now carrying it
    Captured(Cell),
    /// The Agent delivered the object at the Cell
    Delivered(Cell),
    /// There is no Path to the current objective
    Blocked,
    /// The Episode was already complete, nothing happened
    Finished,
}

/// How [`Episode::run`] ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EpisodeOutcome {
    /// The object was delivered after `steps` moves
    Delivered {
        /// the number of Cells walked
        steps: usize,
    },
    /// The objective of `phase` cannot be reached
    Blocked {
        /// the Phase the Agent got stuck in
        phase: Phase,
    },
    /// `max_steps` moves were made without delivering the object
    OutOfSteps,
}

/// An Agent that fetches an object and carries it to a delivery point.
///
/// The Agent follows a planned Path one Cell per [`step`](Episode::step). A Path is planned
/// whenever the Agent has none: towards the object without carrying, and once the object is
/// captured, towards the delivery point while carrying.
#[derive(Clone, Debug)]
pub struct Episode {
    neighborhood: MooreNeighborhood,
    obstacles: Obstacles,
    config: CostConfig,
    position: Cell,
    object: Cell,
    delivery: Cell,
    phase: Phase,
    plan: VecDeque<Cell>,
    steps: usize,
}

impl Episode {
    /// Creates a new Episode
    ///
    /// ## Arguments
    /// - `start` - where the Agent stands
    /// - `object` - the Cell of the object to fetch
    /// - `delivery` - where to bring the object
    /// - `obstacles` - Cells that cannot be walked over
    /// - `(width, height)` - the size of the Grid
    /// - `config` - the Cost of moving (see [`CostConfig`])
    ///
    /// ## Errors
    /// A [`ScenarioError`] if the Grid is empty or `start` lies outside of it. An `object` or
    /// `delivery` outside of the Grid is reported as [`ScenarioError::GoalOutOfBounds`].
    pub fn new(
        start: Cell,
        object: Cell,
        delivery: Cell,
        obstacles: Obstacles,
        (width, height): (usize, usize),
        config: CostConfig,
    ) -> Result<Episode, ScenarioError> {
        scenario::validate(start, object, width, height)?;
        let neighborhood = scenario::validate(start, delivery, width, height)?;

        Ok(Episode {
            neighborhood,
            obstacles,
            config,
            position: start,
            object,
            delivery,
            phase: Phase::Fetching,
            plan: VecDeque::new(),
            steps: 0,
        })
    }

    /// The current position of the Agent
    pub fn position(&self) -> Cell {
        self.position
    }

    /// The current Phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// `true` while the Agent carries the object
    pub fn carrying(&self) -> bool {
        self.phase == Phase::Delivering
    }

    /// The Cell the Agent is currently heading for, if any
    pub fn objective(&self) -> Option<Cell> {
        match self.phase {
            Phase::Fetching => Some(self.object),
            Phase::Delivering => Some(self.delivery),
            Phase::Complete => None,
        }
    }

    /// The number of Cells walked so far
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The remaining planned Cells, excluding the current position
    pub fn planned(&self) -> impl Iterator<Item = Cell> + '_ {
        self.plan.iter().copied()
    }

    /// The Scenario the next plan is computed from, if there is an objective left
    pub fn scenario(&self) -> Option<Scenario> {
        let (width, height) = self.neighborhood.size();
        self.objective().map(|goal| Scenario {
            start: self.position,
            goal,
            obstacles: self.obstacles.clone(),
            width,
            height,
            carrying: self.carrying(),
        })
    }

    /// Advances the Episode by one Cell.
    ///
    /// Plans a Path first if there is none. Reaching the object or the delivery point is
    /// reported instead of [`EpisodeEvent::Moved`].
    pub fn step(&mut self) -> EpisodeEvent {
        let Some(goal) = self.objective() else {
            return EpisodeEvent::Finished;
        };
        if let Some(event) = self.arrive() {
            return event;
        }

        if self.plan.is_empty() {
            let path = search::a_star_search(
                &self.neighborhood,
                &self.config,
                &self.obstacles,
                self.position,
                goal,
                self.carrying(),
            );
            self.plan.extend(path.iter().copied());
        }

        let Some(next) = self.plan.pop_front() else {
            search_log!(
                debug,
                "no path from {:?} to {:?} while {:?}",
                self.position,
                goal,
                self.phase
            );
            return EpisodeEvent::Blocked;
        };
        self.position = next;
        self.steps += 1;

        self.arrive().unwrap_or(EpisodeEvent::Moved(next))
    }

    /// Steps until the object is delivered, the Agent is blocked or `max_steps` Cells have been
    /// walked in this call.
    pub fn run(&mut self, max_steps: usize) -> EpisodeOutcome {
        let start_steps = self.steps;
        loop {
            if self.phase == Phase::Complete {
                return EpisodeOutcome::Delivered { steps: self.steps };
            }
            if self.steps - start_steps >= max_steps {
                return EpisodeOutcome::OutOfSteps;
            }
            match self.step() {
                EpisodeEvent::Delivered(_) | EpisodeEvent::Finished => {
                    return EpisodeOutcome::Delivered { steps: self.steps };
                }
                EpisodeEvent::Blocked => return EpisodeOutcome::Blocked { phase: self.phase },
                EpisodeEvent::Moved(_) | EpisodeEvent::Captured(_) => {}
            }
        }
    }

    fn arrive(&mut self) -> Option<EpisodeEvent> {
        let event = match self.phase {
            Phase::Fetching if self.position == self.object => {
                self.phase = Phase::Delivering;
                EpisodeEvent::Captured(self.position)
            }
            Phase::Delivering if self.position == self.delivery => {
                self.phase = Phase::Complete;
                EpisodeEvent::Delivered(self.position)
            }
            _ => return None,
        };
        search_log!(debug, "{:?} at {:?}", event, self.position);
        self.plan.clear();
        Some(event)
    }
}

/// The starting positions of a fetch-and-deliver match.
///
/// The Agent starts on the left at `(2, height / 2)`, the delivery point is on the right edge at
/// `(width - 1, height / 2)` and the object lies somewhere in the right half of the Grid.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchLayout {
    /// Where the Agent starts
    pub agent: Cell,
    /// The object to fetch
    pub object: Cell,
    /// Where to bring the object
    pub delivery: Cell,
    /// Cells that cannot be walked over
    pub obstacles: Obstacles,
    /// The size of the Grid as `(width, height)`
    pub size: (usize, usize),
}

impl MatchLayout {
    /// Places the object and up to `max_obstacles` obstacles at random.
    ///
    /// `random` returns a value within the given range. Obstacles are never placed on the
    /// object, closer than 3 Cells (Manhattan distance) to the Agent or right next to the
    /// delivery point. After 1000 failed attempts in a row, fewer obstacles are placed.
    ///
    /// ## Errors
    /// A [`ScenarioError`] if the Grid is too small to hold the Agent and the delivery point.
    pub fn random(
        (width, height): (usize, usize),
        max_obstacles: usize,
        mut random: impl FnMut(Range<usize>) -> usize,
    ) -> Result<MatchLayout, ScenarioError> {
        let agent = (2, height / 2);
        let delivery = (width.saturating_sub(1), height / 2);
        scenario::validate(agent, delivery, width, height)?;

        let candidates: Vec<Cell> = (width / 2..width)
            .flat_map(|x| (0..height).map(move |y| (x, y)))
            .filter(|&cell| cell != agent && cell != delivery)
            .collect();
        let object = match candidates.len() {
            0 => agent,
            len => candidates[random(0..len)],
        };

        let mut obstacles = Obstacles::new();
        let mut attempts = 0;
        while width > 3 && obstacles.len() < max_obstacles {
            let cell = (random(3..width), random(0..height));
            if cell == object
                || obstacles.contains(cell)
                || manhattan(cell, agent) < 3
                || manhattan(cell, delivery) <= 1
            {
                attempts += 1;
                if attempts > 1000 {
                    search_log!(
                        debug,
                        "could only place {} of {} obstacles",
                        obstacles.len(),
                        max_obstacles
                    );
                    break;
                }
                continue;
            }
            obstacles.insert(cell);
            attempts = 0;
        }

        Ok(MatchLayout {
            agent,
            object,
            delivery,
            obstacles,
            size: (width, height),
        })
    }

    /// Creates an [`Episode`] that plays this match
    pub fn episode(&self, config: CostConfig) -> Result<Episode, ScenarioError> {
        Episode::new(
            self.agent,
            self.object,
            self.delivery,
            self.obstacles.clone(),
            self.size,
            config,
        )
    }
}

fn manhattan(a: Cell, b: Cell) -> usize {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}
