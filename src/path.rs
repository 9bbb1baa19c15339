use crate::Cost;

use std::sync::Arc;

/// A Path across the Grid, together with the Cost of walking it.
///
/// The starting Cell is not part of the Path: the first element is the first step taken, the
/// last element is the goal. An empty Path means that the goal could not be reached.
#[derive(Debug, Clone, PartialEq)]
pub struct Path<P> {
    path: Arc<[P]>,
    cost: Cost,
}

impl<P> Path<P> {
    /// Creates a Path from its steps and total Cost
    pub fn new(path: Vec<P>, cost: Cost) -> Path<P> {
        Path {
            path: path.into(),
            cost,
        }
    }

    /// A Path without any steps
    pub fn empty() -> Path<P> {
        Path::new(Vec::new(), 0.0)
    }

    /// The total Cost of walking the Path. `0` for an empty Path.
    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// The number of steps
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// `true` if there are no steps, which means that the goal is unreachable
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// The steps of the Path
    pub fn steps(&self) -> &[P] {
        &self.path
    }

    /// The first step, if any
    pub fn first(&self) -> Option<&P> {
        self.path.first()
    }

    /// The last step (the goal), if any
    pub fn last(&self) -> Option<&P> {
        self.path.last()
    }

    /// Returns an Iterator over the Path
    pub fn iter(&self) -> Iter<'_, P> {
        Iter {
            iter: self.path.iter(),
        }
    }
}

impl<P: Clone> Path<P> {
    /// Copies the steps into a Vec
    pub fn to_vec(&self) -> Vec<P> {
        self.path.to_vec()
    }
}

use std::ops::Index;

impl<P> Index<usize> for Path<P> {
    type Output = P;
    fn index(&self, index: usize) -> &P {
        &self.path[index]
    }
}

/// An Iterator over the steps of a [`Path`]
#[derive(Debug, Clone)]
pub struct Iter<'a, P> {
    iter: std::slice::Iter<'a, P>,
}

impl<'a, P> Iterator for Iter<'a, P> {
    type Item = &'a P;
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<P> DoubleEndedIterator for Iter<'_, P> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back()
    }
}
impl<P> ExactSizeIterator for Iter<'_, P> {}
impl<P> std::iter::FusedIterator for Iter<'_, P> {}

impl<'a, P> IntoIterator for &'a Path<P> {
    type Item = &'a P;
    type IntoIter = Iter<'a, P>;
    fn into_iter(self) -> Iter<'a, P> {
        self.iter()
    }
}

impl<P: PartialEq> PartialEq<Vec<P>> for Path<P> {
    fn eq(&self, rhs: &Vec<P>) -> bool {
        self.steps() == rhs.as_slice()
    }
}

impl<'a, P: PartialEq> PartialEq<&'a [P]> for Path<P> {
    fn eq(&self, rhs: &&'a [P]) -> bool {
        self.steps() == *rhs
    }
}

use std::cmp::Ordering;

/// Paths are ordered by their Cost only.
///
/// Two different Paths with the same Cost compare as [`Ordering::Equal`] even though they are
/// not `==`.
impl<P: PartialEq> PartialOrd for Path<P> {
    fn partial_cmp(&self, other: &Path<P>) -> Option<Ordering> {
        self.cost.partial_cmp(&other.cost)
    }
}

use std::fmt;
impl<P: fmt::Debug> fmt::Display for Path<P> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Path[Cost = {:.3}]: ", self.cost)?;
        if self.path.is_empty() {
            write!(fmt, "<empty>")
        } else {
            write!(fmt, "{:?}", self.path[0])?;
            for p in self.path.iter().skip(1) {
                write!(fmt, " -> {:?}", p)?;
            }
            Ok(())
        }
    }
}
