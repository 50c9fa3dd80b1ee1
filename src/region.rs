//! Convex regions bounded by hull boundaries
//!
//! A hull's region is the closed convex set enclosed by its boundary,
//! represented as the intersection of half-planes (2D) or half-spaces (3D)
//! with outward unit normals. Membership tests use the epsilon of the hull
//! the region was derived from. Degenerate hulls bound no region.

use crate::precision::Precision;
use crate::types::{Facet, Vertex2, Vertex3};
use serde::{Deserialize, Serialize};

/// Closed half-plane bounded by a hull edge; `normal` points out of the hull
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HalfPlane2 {
    /// A point on the boundary line
    pub point: Vertex2,
    /// Outward unit normal
    pub normal: Vertex2,
}

impl HalfPlane2 {
    /// Signed distance from `p`; positive outside the hull
    pub fn signed_distance(&self, p: &Vertex2) -> f64 {
        self.normal.dot(&p.sub(&self.point))
    }
}

/// Closed half-space bounded by a facet plane; `normal` points out of the hull
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HalfSpace3 {
    /// A point on the boundary plane
    pub point: Vertex3,
    /// Outward unit normal
    pub normal: Vertex3,
}

impl HalfSpace3 {
    /// Signed distance from `p`; positive outside the hull
    pub fn signed_distance(&self, p: &Vertex3) -> f64 {
        self.normal.dot(&p.sub(&self.point))
    }
}

/// The closed convex set bounded by a 2D hull
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region2D {
    half_planes: Vec<HalfPlane2>,
    area: f64,
    precision: Precision,
}

impl Region2D {
    /// The boundary half-planes, one per hull edge in loop order
    pub fn half_planes(&self) -> &[HalfPlane2] {
        &self.half_planes
    }

    /// The enclosed area
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Whether `p` lies inside the region or on its boundary within tolerance
    pub fn contains(&self, p: &Vertex2) -> bool {
        self.half_planes
            .iter()
            .all(|hp| self.precision.le(hp.signed_distance(p), 0.0))
    }
}

/// The closed convex set bounded by a 3D hull
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region3D {
    half_spaces: Vec<HalfSpace3>,
    volume: f64,
    precision: Precision,
}

impl Region3D {
    /// The boundary half-spaces, one per facet in facet order
    pub fn half_spaces(&self) -> &[HalfSpace3] {
        &self.half_spaces
    }

    /// The enclosed volume
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Whether `p` lies inside the region or on its boundary within tolerance
    pub fn contains(&self, p: &Vertex3) -> bool {
        self.half_spaces
            .iter()
            .all(|hs| self.precision.le(hs.signed_distance(p), 0.0))
    }
}

/// Twice-signed shoelace sum halved; positive for CCW loops.
pub(crate) fn polygon_area(vertices: &[Vertex2]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }

    let mut doubled = 0.0;
    for i in 0..vertices.len() {
        let a = vertices[i];
        let b = vertices[(i + 1) % vertices.len()];
        doubled += a.cross(&b);
    }
    doubled / 2.0
}

/// Derive the bounded region of a CCW vertex loop, or `None` when the loop
/// is degenerate.
pub(crate) fn polygon_region(vertices: &[Vertex2], precision: Precision) -> Option<Region2D> {
    if vertices.len() < 3 {
        return None;
    }

    let area = polygon_area(vertices);
    if precision.eq_zero(area) {
        return None;
    }

    let mut half_planes = Vec::with_capacity(vertices.len());
    for i in 0..vertices.len() {
        let a = vertices[i];
        let b = vertices[(i + 1) % vertices.len()];
        let edge = b.sub(&a);
        // For a CCW loop the interior is left of each edge, so the outward
        // normal is the edge direction rotated clockwise.
        let normal = Vertex2::new(edge.y, -edge.x).try_normalize()?;
        half_planes.push(HalfPlane2 { point: a, normal });
    }

    Some(Region2D {
        half_planes,
        area: area.abs(),
        precision,
    })
}

/// Derive the bounded region of a facet table, or `None` when the hull is
/// degenerate.
pub(crate) fn polytope_region(
    vertices: &[Vertex3],
    facets: &[Facet],
    precision: Precision,
) -> Option<Region3D> {
    if facets.is_empty() {
        return None;
    }

    let half_spaces = facets
        .iter()
        .map(|f| HalfSpace3 {
            point: f.plane.point,
            normal: f.plane.normal,
        })
        .collect();

    let mut volume = 0.0;
    for facet in facets {
        let v0 = &vertices[facet.vertices[0]];
        let v1 = &vertices[facet.vertices[1]];
        let v2 = &vertices[facet.vertices[2]];
        volume += v0.dot(&v1.cross(v2)) / 6.0;
    }

    Some(Region3D {
        half_spaces,
        volume: volume.abs(),
        precision,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ConvexHull2D, ConvexHull3D};

    #[test]
    fn test_square_region() {
        let points = vec![
            Vertex2::new(0.0, 0.0),
            Vertex2::new(2.0, 0.0),
            Vertex2::new(2.0, 2.0),
            Vertex2::new(0.0, 2.0),
        ];
        let hull = ConvexHull2D::build(&points).unwrap();
        let region = hull.region().unwrap();

        assert!((region.area() - 4.0).abs() < 1e-12);
        assert!(region.contains(&Vertex2::new(1.0, 1.0)));
        assert!(region.contains(&Vertex2::new(2.0, 1.0))); // on the boundary
        assert!(!region.contains(&Vertex2::new(2.5, 1.0)));
    }

    #[test]
    fn test_degenerate_2d_has_no_region() {
        let points = vec![Vertex2::new(0.0, 0.0), Vertex2::new(1.0, 0.0)];
        let hull = ConvexHull2D::build(&points).unwrap();
        assert!(hull.region().is_none());
    }

    #[test]
    fn test_tetrahedron_region() {
        let points = vec![
            Vertex3::new(0.0, 0.0, 0.0),
            Vertex3::new(1.0, 0.0, 0.0),
            Vertex3::new(0.0, 1.0, 0.0),
            Vertex3::new(0.0, 0.0, 1.0),
        ];
        let hull = ConvexHull3D::build(&points).unwrap();
        let region = hull.region().unwrap();

        assert!((region.volume() - 1.0 / 6.0).abs() < 1e-10);
        assert!(region.contains(&Vertex3::new(0.1, 0.1, 0.1)));
        assert!(region.contains(&Vertex3::new(0.0, 0.0, 0.0))); // a vertex
        assert!(!region.contains(&Vertex3::new(1.0, 1.0, 1.0)));
    }

    #[test]
    fn test_degenerate_3d_has_no_region() {
        let points: Vec<Vertex3> = (0..4).map(|i| Vertex3::new(i as f64, 0.0, 0.0)).collect();
        let hull = ConvexHull3D::build(&points).unwrap();
        assert!(hull.region().is_none());
    }

    #[test]
    fn test_region_cached_once() {
        let points = vec![
            Vertex2::new(0.0, 0.0),
            Vertex2::new(1.0, 0.0),
            Vertex2::new(0.0, 1.0),
        ];
        let hull = ConvexHull2D::build(&points).unwrap();
        let first = hull.region().unwrap() as *const Region2D;
        let second = hull.region().unwrap() as *const Region2D;
        assert_eq!(first, second);
    }
}
