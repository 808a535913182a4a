use std::collections::VecDeque;

use nalgebra::Point3;

/// Bounded history of recent positions, oldest first.
///
/// The renderer draws this as the fading path behind a moving body; the
/// engine only ever appends, evicting the oldest entry once the bound is
/// reached.
#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<Point3<f64>>,
    bound: usize,
}

impl Trail {
    /// `bound` must be positive; scenario validation enforces this upstream.
    pub fn new(bound: usize) -> Self {
        Trail {
            points: VecDeque::with_capacity(bound),
            bound,
        }
    }

    pub fn record(&mut self, position: Point3<f64>) {
        if self.points.len() == self.bound {
            self.points.pop_front();
        }
        self.points.push_back(position);
    }

    /// Positions in chronological order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Point3<f64>> + '_ {
        self.points.iter()
    }

    pub fn latest(&self) -> Option<&Point3<f64>> {
        self.points.back()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
