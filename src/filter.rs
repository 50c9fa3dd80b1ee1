//! Extremal quadrilateral prefilter (Akl–Toussaint heuristic)
//!
//! Before the O(n log n) chain construction, candidates strictly inside the
//! quadrilateral spanned by the four coordinate extrema can be discarded in
//! O(n): no point inside that quadrilateral can be a hull vertex. The filter
//! never discards a true hull vertex, so it does not affect the exact result
//! downstream.

use crate::precision::Precision;
use crate::types::Vertex2;

/// Discard points that provably cannot be hull vertices.
///
/// One pass finds the min-x, max-x, min-y and max-y extrema (ties keep the
/// first point encountered). Points strictly interior to the quadrilateral
/// they span are dropped; the extrema themselves, points outside, and points
/// on an edge within tolerance are kept, so collinear boundary points remain
/// available to the hull builder. When the extrema span fewer than 3
/// distinct corners (all points collinear or coincident) nothing can be
/// discarded safely and the input is returned unchanged.
///
/// The output is always a superset of the true hull vertices.
pub fn reduce_points(points: &[Vertex2], precision: Precision) -> Vec<Vertex2> {
    let Some(quad) = Extrema::scan(points).and_then(|e| e.quadrilateral(precision)) else {
        return points.to_vec();
    };

    let reduced: Vec<Vertex2> = points
        .iter()
        .filter(|p| !quad.strictly_contains(p, precision))
        .copied()
        .collect();

    log::debug!(
        "extremal filter kept {} of {} candidate points",
        reduced.len(),
        points.len()
    );

    reduced
}

/// Running coordinate extrema of a point stream.
#[derive(Debug, Clone, Copy)]
struct Extrema {
    min_x: Vertex2,
    min_y: Vertex2,
    max_x: Vertex2,
    max_y: Vertex2,
}

impl Extrema {
    fn first(point: Vertex2) -> Self {
        Self {
            min_x: point,
            min_y: point,
            max_x: point,
            max_y: point,
        }
    }

    fn scan(points: &[Vertex2]) -> Option<Self> {
        let (&head, tail) = points.split_first()?;
        let mut extrema = Self::first(head);
        for &p in tail {
            extrema.update(p);
        }
        Some(extrema)
    }

    /// Strict comparisons keep the first point encountered on ties.
    fn update(&mut self, point: Vertex2) {
        if point.x < self.min_x.x {
            self.min_x = point;
        }
        if point.x > self.max_x.x {
            self.max_x = point;
        }
        if point.y < self.min_y.y {
            self.min_y = point;
        }
        if point.y > self.max_y.y {
            self.max_y = point;
        }
    }

    /// The counter-clockwise quadrilateral spanned by the extrema, with
    /// tolerance-duplicate corners collapsed. `None` when fewer than 3
    /// distinct corners remain.
    fn quadrilateral(&self, precision: Precision) -> Option<Quadrilateral> {
        let candidates = [self.min_x, self.min_y, self.max_x, self.max_y];
        let mut corners = [Vertex2::new(0.0, 0.0); 4];
        let mut len = 0;

        for candidate in candidates {
            if corners[..len]
                .iter()
                .all(|c| !c.coincident(&candidate, precision))
            {
                corners[len] = candidate;
                len += 1;
            }
        }

        (len >= 3).then_some(Quadrilateral { corners, len })
    }
}

/// Convex CCW polygon with 3 or 4 corners.
#[derive(Debug, Clone, Copy)]
struct Quadrilateral {
    corners: [Vertex2; 4],
    len: usize,
}

impl Quadrilateral {
    /// Whether `p` lies strictly left of every edge, beyond tolerance.
    fn strictly_contains(&self, p: &Vertex2, precision: Precision) -> bool {
        for i in 0..self.len {
            let a = self.corners[i];
            let b = self.corners[(i + 1) % self.len];
            let offset = b.sub(&a).cross(&p.sub(&a));
            if !precision.gt(offset, 0.0) {
                return false;
            }
        }
        true
    }
}

/// Streaming variant of the extremal quadrilateral filter.
///
/// Points are appended one at a time; each is tested against the
/// quadrilateral of the extrema seen *so far* and dropped when strictly
/// inside it. Because a corner can be superseded by a later point, a point
/// discarded early is never re-examined, so the retained set may differ
/// from what [`reduce_points`] keeps for the same points in batch. Both are
/// supersets of the true hull vertices, which is what the exact hull
/// builder downstream needs.
#[derive(Debug, Clone)]
pub struct ExtremalFilter {
    precision: Precision,
    extrema: Option<Extrema>,
    retained: Vec<Vertex2>,
}

impl Default for ExtremalFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtremalFilter {
    /// An empty filter with the default epsilon
    pub fn new() -> Self {
        Self::with_precision(Precision::default())
    }

    /// An empty filter with an explicit comparator
    pub fn with_precision(precision: Precision) -> Self {
        Self {
            precision,
            extrema: None,
            retained: Vec::new(),
        }
    }

    /// The comparator this filter applies
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Offer a point; it is retained unless strictly inside the current
    /// extremal quadrilateral.
    pub fn append(&mut self, point: Vertex2) {
        let precision = self.precision;
        if let Some(extrema) = &mut self.extrema {
            if let Some(quad) = extrema.quadrilateral(precision)
                && quad.strictly_contains(&point, precision)
            {
                return;
            }
            extrema.update(point);
        } else {
            self.extrema = Some(Extrema::first(point));
        }
        self.retained.push(point);
    }

    /// The points retained so far
    pub fn points(&self) -> &[Vertex2] {
        &self.retained
    }

    /// Consume the filter, yielding the retained points
    pub fn into_points(self) -> Vec<Vertex2> {
        self.retained
    }

    /// Number of retained points
    pub fn len(&self) -> usize {
        self.retained.len()
    }

    /// Whether no points have been retained
    pub fn is_empty(&self) -> bool {
        self.retained.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond_with_center() -> Vec<Vertex2> {
        vec![
            Vertex2::new(0.0, 2.0),
            Vertex2::new(2.0, 0.0),
            Vertex2::new(4.0, 2.0),
            Vertex2::new(2.0, 4.0),
            Vertex2::new(2.0, 2.0),
        ]
    }

    #[test]
    fn test_interior_point_discarded() {
        let reduced = reduce_points(&diamond_with_center(), Precision::default());
        assert_eq!(reduced.len(), 4);
        assert!(!reduced.contains(&Vertex2::new(2.0, 2.0)));
    }

    #[test]
    fn test_corners_kept() {
        let points = diamond_with_center();
        let reduced = reduce_points(&points, Precision::default());
        for corner in &points[..4] {
            assert!(reduced.contains(corner));
        }
    }

    #[test]
    fn test_edge_point_kept() {
        // On the quadrilateral boundary, not strictly inside
        let mut points = diamond_with_center();
        points.push(Vertex2::new(1.0, 1.0));
        let reduced = reduce_points(&points, Precision::default());
        assert!(reduced.contains(&Vertex2::new(1.0, 1.0)));
    }

    #[test]
    fn test_collinear_input_unchanged() {
        let points: Vec<Vertex2> = (0..5).map(|i| Vertex2::new(i as f64, 0.0)).collect();
        let reduced = reduce_points(&points, Precision::default());
        assert_eq!(reduced, points);
    }

    #[test]
    fn test_empty_input() {
        assert!(reduce_points(&[], Precision::default()).is_empty());
    }

    #[test]
    fn test_streaming_matches_batch_on_fixed_extrema() {
        // Extrema arrive first, so the streaming quad never changes and the
        // two variants agree.
        let points = diamond_with_center();
        let mut filter = ExtremalFilter::new();
        for &p in &points {
            filter.append(p);
        }
        assert_eq!(filter.points(), reduce_points(&points, Precision::default()));
    }

    #[test]
    fn test_streaming_never_reexamines() {
        // (1.5, 1.5) is outside the first triangle's span, gets retained,
        // and stays retained even after the larger square arrives.
        let mut filter = ExtremalFilter::new();
        for p in [
            Vertex2::new(0.0, 0.0),
            Vertex2::new(1.0, 0.0),
            Vertex2::new(0.0, 1.0),
            Vertex2::new(1.5, 1.5),
            Vertex2::new(4.0, 0.0),
            Vertex2::new(4.0, 4.0),
            Vertex2::new(0.0, 4.0),
        ] {
            filter.append(p);
        }
        assert!(filter.points().contains(&Vertex2::new(1.5, 1.5)));
    }
}
