//! Bounded position history shared by every moving entity

use std::collections::VecDeque;

use glam::Vec2;

use crate::trail_capacity_for;

/// Fixed-capacity ring of past positions, oldest first
///
/// Storage is allocated once at construction; pushing past capacity evicts
/// the oldest entry without reallocating.
#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<Vec2>,
    capacity: usize,
}

impl Trail {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Trail sized from the owning entity's size
    pub fn for_size(size: f32) -> Self {
        Self::with_capacity(trail_capacity_for(size))
    }

    pub fn push(&mut self, point: Vec2) {
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Oldest retained point
    pub fn oldest(&self) -> Option<Vec2> {
        self.points.front().copied()
    }

    /// Most recently pushed point
    pub fn newest(&self) -> Option<Vec2> {
        self.points.back().copied()
    }

    /// Points in chronological order
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Vec2> + '_ {
        self.points.iter().copied()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

/// A moving object that leaves a trail
///
/// `update` is called at most once per frame and records the pre-move
/// position into the trail before moving.
pub trait Trailed {
    fn update(&mut self);
    fn position(&self) -> Vec2;
    fn trail(&self) -> &Trail;
    fn size(&self) -> f32;
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_push_evicts_oldest() {
        let mut trail = Trail::with_capacity(3);
        for i in 0..5 {
            trail.push(Vec2::new(i as f32, 0.0));
        }
        assert_eq!(trail.len(), 3);
        assert_eq!(trail.oldest(), Some(Vec2::new(2.0, 0.0)));
        assert_eq!(trail.newest(), Some(Vec2::new(4.0, 0.0)));
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        let mut trail = Trail::with_capacity(0);
        trail.push(Vec2::ONE);
        trail.push(Vec2::ZERO);
        assert_eq!(trail.capacity(), 1);
        assert_eq!(trail.iter().collect::<Vec<_>>(), vec![Vec2::ZERO]);
    }

    proptest! {
        #[test]
        fn trail_keeps_most_recent_points(capacity in 1usize..32, pushes in 0usize..100) {
            let mut trail = Trail::with_capacity(capacity);
            for i in 0..pushes {
                trail.push(Vec2::new(i as f32, -(i as f32)));
                prop_assert!(trail.len() <= capacity);
            }

            let expected: Vec<Vec2> = (pushes.saturating_sub(capacity)..pushes)
                .map(|i| Vec2::new(i as f32, -(i as f32)))
                .collect();
            prop_assert_eq!(trail.iter().collect::<Vec<_>>(), expected);
        }
    }
}
