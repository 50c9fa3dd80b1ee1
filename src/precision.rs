//! Tolerant floating-point comparisons
//!
//! Every comparison made during hull construction goes through a
//! [`Precision`] value so that a single epsilon governs one computation
//! from start to finish. Two floats within epsilon of each other are equal;
//! everything else orders normally.

use crate::EPSILON;
use crate::types::{Vertex2, Vertex3};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Tolerant comparator over `f64` values with a fixed epsilon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Precision {
    epsilon: f64,
}

impl Default for Precision {
    fn default() -> Self {
        Self { epsilon: EPSILON }
    }
}

impl Precision {
    /// Create a comparator with the given epsilon. Negative values are
    /// treated as their magnitude.
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon: epsilon.abs(),
        }
    }

    /// Create a comparator whose epsilon is scaled to the coordinate extent
    /// of the data, so that large point clouds are not compared against an
    /// absolute tolerance meant for unit-scale data.
    pub fn scaled(extent: f64) -> Self {
        Self {
            epsilon: EPSILON * extent.abs().max(1.0),
        }
    }

    /// Scale-aware comparator for a 2D point set.
    pub fn relative_2d(points: &[Vertex2]) -> Self {
        let extent = points
            .iter()
            .fold(0.0_f64, |m, p| m.max(p.x.abs()).max(p.y.abs()));
        Self::scaled(extent)
    }

    /// Scale-aware comparator for a 3D point set.
    pub fn relative_3d(points: &[Vertex3]) -> Self {
        let extent = points
            .iter()
            .fold(0.0_f64, |m, p| m.max(p.x.abs()).max(p.y.abs()).max(p.z.abs()));
        Self::scaled(extent)
    }

    /// The epsilon this comparator applies.
    #[inline]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Tolerant three-way comparison: `Equal` when `|a - b| <= epsilon`.
    #[inline]
    pub fn compare(&self, a: f64, b: f64) -> Ordering {
        if (a - b).abs() <= self.epsilon {
            Ordering::Equal
        } else if a < b {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }

    /// `a` and `b` are equal within epsilon.
    #[inline]
    pub fn eq(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.epsilon
    }

    /// `a` is zero within epsilon.
    #[inline]
    pub fn eq_zero(&self, a: f64) -> bool {
        a.abs() <= self.epsilon
    }

    /// `a` exceeds `b` by more than epsilon.
    #[inline]
    pub fn gt(&self, a: f64, b: f64) -> bool {
        a - b > self.epsilon
    }

    /// `a` falls below `b` by more than epsilon.
    #[inline]
    pub fn lt(&self, a: f64, b: f64) -> bool {
        b - a > self.epsilon
    }

    /// `a` is below `b` or equal to it within epsilon.
    #[inline]
    pub fn le(&self, a: f64, b: f64) -> bool {
        !self.gt(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_within_epsilon() {
        let p = Precision::new(1e-9);
        assert_eq!(p.compare(1.0, 1.0 + 1e-10), Ordering::Equal);
        assert_eq!(p.compare(1.0, 2.0), Ordering::Less);
        assert_eq!(p.compare(2.0, 1.0), Ordering::Greater);
    }

    #[test]
    fn test_eq_zero() {
        let p = Precision::default();
        assert!(p.eq_zero(5e-11));
        assert!(p.eq_zero(-5e-11));
        assert!(!p.eq_zero(2e-10));
    }

    #[test]
    fn test_ordering_helpers() {
        let p = Precision::new(1e-6);
        assert!(p.gt(1.0, 0.5));
        assert!(!p.gt(1.0, 1.0 + 1e-7));
        assert!(p.lt(0.5, 1.0));
        assert!(p.le(1.0 + 1e-7, 1.0));
    }

    #[test]
    fn test_scaled_tracks_extent() {
        let small = Precision::scaled(0.5);
        let large = Precision::scaled(1e6);
        assert_eq!(small.epsilon(), crate::EPSILON);
        assert!(large.epsilon() > small.epsilon());
    }
}
