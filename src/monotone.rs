//! 2D convex hull via Andrew's monotone chain
//!
//! Candidates are sorted lexicographically with the tolerant comparator, a
//! lower and an upper chain are grown with a stack discipline, and the two
//! chains are joined into one counter-clockwise loop. Collinear points on
//! the boundary are either dropped or kept in order, depending on
//! `include_collinear`.

use crate::filter::{self, ExtremalFilter};
use crate::precision::Precision;
use crate::types::{ConvexHull2D, Vertex2};
use crate::{ConvexHullError, Result};

/// Full 2D pipeline: finiteness check, extremal prefilter, chain
/// construction, convexity validation.
pub(crate) fn generate(
    points: &[Vertex2],
    precision: Precision,
    include_collinear: bool,
) -> Result<Vec<Vertex2>> {
    check_finite(points)?;
    let candidates = filter::reduce_points(points, precision);
    chain_hull(candidates, precision, include_collinear)
}

fn check_finite(points: &[Vertex2]) -> Result<()> {
    match points.iter().position(|p| !p.is_finite()) {
        Some(index) => Err(ConvexHullError::InvalidInput { index }),
        None => Ok(()),
    }
}

/// Monotone chain over prefiltered candidates.
fn chain_hull(
    mut candidates: Vec<Vertex2>,
    precision: Precision,
    include_collinear: bool,
) -> Result<Vec<Vertex2>> {
    // Tolerant lexicographic order: points within epsilon of equal x are
    // ordered deterministically by y rather than by floating noise.
    candidates.sort_by(|a, b| {
        precision
            .compare(a.x, b.x)
            .then_with(|| precision.compare(a.y, b.y))
    });

    let mut lower = Vec::new();
    for &p in &candidates {
        push_chain_point(&mut lower, p, precision, include_collinear);
    }

    let mut upper = Vec::new();
    for &p in candidates.iter().rev() {
        push_chain_point(&mut upper, p, precision, include_collinear);
    }

    // Each chain's last point duplicates the other chain's first.
    let mut hull: Vec<Vertex2> = Vec::with_capacity(lower.len() + upper.len());
    hull.extend_from_slice(&lower[..lower.len().saturating_sub(1)]);
    hull.extend_from_slice(&upper[..upper.len().saturating_sub(1)]);

    // All input points identical within tolerance collapse to one vertex.
    if hull.is_empty()
        && let Some(&only) = lower.first()
    {
        hull.push(only);
    }

    // A fully collinear input bounds no area; the loop reduces to the two
    // extreme endpoints no matter how many boundary points were kept.
    if hull.len() >= 3
        && loop_is_collinear(&hull, precision)
        && let (Some(&first), Some(&last)) = (lower.first(), lower.last())
    {
        hull = vec![first, last];
    }

    validate_ccw_loop(&hull, precision)?;

    Ok(hull)
}

/// Append one point to a growing chain.
///
/// Non-left turns beyond tolerance pop the chain tail. A point collinear
/// with the last segment is dropped as a duplicate, replaces a nearer
/// endpoint, or is inserted by distance, per `include_collinear`.
fn push_chain_point(
    chain: &mut Vec<Vertex2>,
    p: Vertex2,
    precision: Precision,
    include_collinear: bool,
) {
    if let Some(last) = chain.last()
        && last.coincident(&p, precision)
    {
        return;
    }

    loop {
        if chain.len() < 2 {
            chain.push(p);
            return;
        }
        let a = chain[chain.len() - 2];
        let b = chain[chain.len() - 1];

        let offset = b.sub(&a).cross(&p.sub(&a));

        if precision.lt(offset, 0.0) {
            // Clockwise: the previous endpoint cannot be on the hull.
            chain.pop();
            continue;
        }

        if precision.eq_zero(offset) {
            if p.coincident(&b, precision) || p.coincident(&a, precision) {
                return;
            }
            if include_collinear {
                // Keep interior collinear points, ordered by how far along
                // the segment they sit.
                if p.distance(&a) < b.distance(&a) {
                    let at = chain.len() - 1;
                    chain.insert(at, p);
                } else {
                    chain.push(p);
                }
            } else if p.distance(&a) > b.distance(&a) {
                chain.pop();
                chain.push(p);
            }
            return;
        }

        chain.push(p);
        return;
    }
}

fn loop_is_collinear(hull: &[Vertex2], precision: Precision) -> bool {
    (0..hull.len()).all(|i| {
        let a = hull[i];
        let b = hull[(i + 1) % hull.len()];
        let c = hull[(i + 2) % hull.len()];
        precision.eq_zero(b.sub(&a).cross(&c.sub(&b)))
    })
}

/// Every consecutive vertex triple must turn counter-clockwise within
/// tolerance; anything else means the epsilon was too coarse for the point
/// spread.
fn validate_ccw_loop(hull: &[Vertex2], precision: Precision) -> Result<()> {
    if hull.len() < 3 {
        return Ok(());
    }

    for i in 0..hull.len() {
        let a = hull[i];
        let b = hull[(i + 1) % hull.len()];
        let c = hull[(i + 2) % hull.len()];
        let turn = b.sub(&a).cross(&c.sub(&b));
        if precision.lt(turn, 0.0) {
            return Err(ConvexHullError::ConvexityValidation(format!(
                "clockwise turn of {turn:e} at vertex {} exceeds tolerance {:e}",
                (i + 1) % hull.len(),
                precision.epsilon()
            )));
        }
    }

    Ok(())
}

/// Incremental 2D hull builder.
///
/// Points are appended one at a time through a streaming
/// [`ExtremalFilter`]; a single terminal [`build`](Self::build) runs the
/// exact monotone chain over the retained candidates. Builders are
/// single-use and not meant for concurrent mutation; confine one builder to
/// one thread.
#[derive(Debug, Clone)]
pub struct ConvexHull2DBuilder {
    filter: ExtremalFilter,
    include_collinear: bool,
}

impl Default for ConvexHull2DBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConvexHull2DBuilder {
    /// An empty builder with the default epsilon
    pub fn new() -> Self {
        Self::with_precision(Precision::default())
    }

    /// An empty builder with an explicit comparator
    pub fn with_precision(precision: Precision) -> Self {
        Self {
            filter: ExtremalFilter::with_precision(precision),
            include_collinear: false,
        }
    }

    /// Keep collinear boundary points in the final loop
    pub fn include_collinear(mut self, include: bool) -> Self {
        self.include_collinear = include;
        self
    }

    /// Add a candidate point
    pub fn append(&mut self, point: Vertex2) {
        self.filter.append(point);
    }

    /// Number of candidates retained so far
    pub fn len(&self) -> usize {
        self.filter.len()
    }

    /// Whether no candidates are retained
    pub fn is_empty(&self) -> bool {
        self.filter.is_empty()
    }

    /// Consume the builder and construct the hull.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ConvexHull2D::generate`].
    pub fn build(self) -> Result<ConvexHull2D> {
        let precision = self.filter.precision();
        check_finite(self.filter.points())?;
        let vertices = chain_hull(self.filter.into_points(), precision, self.include_collinear)?;
        Ok(ConvexHull2D::from_loop(vertices, precision))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64) -> Vertex2 {
        Vertex2::new(x, y)
    }

    fn hull_of(points: &[Vertex2], include_collinear: bool) -> Vec<Vertex2> {
        generate(points, Precision::default(), include_collinear).unwrap()
    }

    #[test]
    fn test_collinear_midpoint_dropped() {
        let points = [v(0.0, 0.0), v(1.0, 0.0), v(2.0, 0.0), v(1.0, 1.0)];
        let hull = hull_of(&points, false);
        assert_eq!(hull, vec![v(0.0, 0.0), v(2.0, 0.0), v(1.0, 1.0)]);
    }

    #[test]
    fn test_collinear_midpoint_kept() {
        let points = [v(0.0, 0.0), v(1.0, 0.0), v(2.0, 0.0), v(1.0, 1.0)];
        let hull = hull_of(&points, true);
        assert_eq!(
            hull,
            vec![v(0.0, 0.0), v(1.0, 0.0), v(2.0, 0.0), v(1.0, 1.0)]
        );
    }

    #[test]
    fn test_square_with_interior_point() {
        let points = [
            v(0.0, 0.0),
            v(2.0, 0.0),
            v(2.0, 2.0),
            v(0.0, 2.0),
            v(1.0, 1.0),
        ];
        let hull = hull_of(&points, false);
        assert_eq!(hull, vec![v(0.0, 0.0), v(2.0, 0.0), v(2.0, 2.0), v(0.0, 2.0)]);
    }

    #[test]
    fn test_empty_and_tiny_inputs() {
        assert!(hull_of(&[], false).is_empty());
        assert_eq!(hull_of(&[v(3.0, 4.0)], false), vec![v(3.0, 4.0)]);
        assert_eq!(
            hull_of(&[v(0.0, 0.0), v(1.0, 1.0)], false),
            vec![v(0.0, 0.0), v(1.0, 1.0)]
        );
    }

    #[test]
    fn test_coincident_points_collapse() {
        let points = [v(1.0, 1.0), v(1.0, 1.0), v(1.0, 1.0)];
        assert_eq!(hull_of(&points, false), vec![v(1.0, 1.0)]);
    }

    #[test]
    fn test_all_collinear_collapses_to_extremes() {
        let points: Vec<Vertex2> = (0..6).map(|i| v(i as f64, i as f64)).collect();
        for include in [false, true] {
            let hull = hull_of(&points, include);
            assert_eq!(hull, vec![v(0.0, 0.0), v(5.0, 5.0)]);
        }
    }

    #[test]
    fn test_duplicate_corners_collapse() {
        let points = [
            v(0.0, 0.0),
            v(0.0, 0.0),
            v(2.0, 0.0),
            v(2.0, 2.0),
            v(2.0, 2.0),
            v(0.0, 2.0),
        ];
        let hull = hull_of(&points, false);
        assert_eq!(hull.len(), 4);
    }

    #[test]
    fn test_non_finite_rejected() {
        let points = [v(0.0, 0.0), v(f64::NAN, 1.0)];
        let result = generate(&points, Precision::default(), false);
        assert_eq!(result, Err(ConvexHullError::InvalidInput { index: 1 }));
    }

    #[test]
    fn test_builder_matches_batch() {
        let points = [
            v(0.0, 10.0),
            v(1.0, 1.0),
            v(10.0, 0.0),
            v(1.0, -1.0),
            v(0.0, -10.0),
            v(-1.0, -1.0),
            v(-10.0, 0.0),
            v(-1.0, 1.0),
        ];

        let mut builder = ConvexHull2DBuilder::new();
        for &p in &points {
            builder.append(p);
        }
        let streamed = builder.build().unwrap();
        let batch = ConvexHull2D::generate(&points, Precision::default(), false).unwrap();
        assert_eq!(streamed, batch);
    }
}
