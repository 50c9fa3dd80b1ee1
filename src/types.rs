//! Core data types for convex hull computation

use crate::precision::Precision;
use crate::region::{self, Region2D, Region3D};
use crate::{Result, monotone, quickhull};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// A 2D point/vector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex2 {
    pub x: f64,
    pub y: f64,
}

impl Vertex2 {
    /// Create a new 2D vertex
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Subtract another vertex
    pub fn sub(&self, other: &Vertex2) -> Vertex2 {
        Vertex2 {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Add another vertex
    pub fn add(&self, other: &Vertex2) -> Vertex2 {
        Vertex2 {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Scale by a scalar
    pub fn scale(&self, s: f64) -> Vertex2 {
        Vertex2 {
            x: self.x * s,
            y: self.y * s,
        }
    }

    /// Dot product with another vertex
    pub fn dot(&self, other: &Vertex2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (twice the signed area of the triangle spanned
    /// with the origin); positive when `other` lies counter-clockwise
    /// of `self`.
    pub fn cross(&self, other: &Vertex2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Compute the magnitude/length
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Normalize to unit length, or `None` for a near-zero vector
    pub fn try_normalize(&self) -> Option<Vertex2> {
        let mag = self.magnitude();
        if mag > crate::EPSILON {
            Some(self.scale(1.0 / mag))
        } else {
            None
        }
    }

    /// Distance to another vertex
    pub fn distance(&self, other: &Vertex2) -> f64 {
        self.sub(other).magnitude()
    }

    /// Whether this point and `other` are the same point within tolerance
    pub fn coincident(&self, other: &Vertex2, precision: Precision) -> bool {
        precision.eq_zero(self.distance(other))
    }

    /// All coordinates are finite (no NaN/infinity)
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for Vertex2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.x, self.y)
    }
}

/// A 3D point/vector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vertex3 {
    /// Create a new 3D vertex
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Dot product with another vertex
    pub fn dot(&self, other: &Vertex3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product with another vertex
    pub fn cross(&self, other: &Vertex3) -> Vertex3 {
        Vertex3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Subtract another vertex
    pub fn sub(&self, other: &Vertex3) -> Vertex3 {
        Vertex3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }

    /// Add another vertex
    pub fn add(&self, other: &Vertex3) -> Vertex3 {
        Vertex3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }

    /// Scale by a scalar
    pub fn scale(&self, s: f64) -> Vertex3 {
        Vertex3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    /// Compute the magnitude/length
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Normalize to unit length, or `None` for a near-zero vector
    pub fn try_normalize(&self) -> Option<Vertex3> {
        let mag = self.magnitude();
        if mag > crate::EPSILON {
            Some(self.scale(1.0 / mag))
        } else {
            None
        }
    }

    /// Distance to another vertex
    pub fn distance(&self, other: &Vertex3) -> f64 {
        self.sub(other).magnitude()
    }

    /// Whether this point and `other` are the same point within tolerance
    pub fn coincident(&self, other: &Vertex3, precision: Precision) -> bool {
        precision.eq_zero(self.distance(other))
    }

    /// All coordinates are finite (no NaN/infinity)
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl fmt::Display for Vertex3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6}, {:.6})", self.x, self.y, self.z)
    }
}

/// An oriented plane given by a point on it and its unit normal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane3 {
    /// A point on the plane
    pub point: Vertex3,
    /// Unit normal; for hull facets it points out of the hull
    pub normal: Vertex3,
}

impl Plane3 {
    /// Signed distance from `p` to the plane; positive on the normal side
    pub fn signed_distance(&self, p: &Vertex3) -> f64 {
        self.normal.dot(&p.sub(&self.point))
    }
}

/// A triangular facet of a 3D convex hull
///
/// Vertex indices refer to the owning hull's vertex table and wind
/// counter-clockwise when seen from outside. `neighbors[i]` is the index of
/// the facet sharing edge `(vertices[i], vertices[(i + 1) % 3])`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Facet {
    pub vertices: [usize; 3],
    /// Outward-oriented supporting plane
    pub plane: Plane3,
    pub neighbors: [usize; 3],
}

impl Facet {
    /// Get vertex indices as an array
    pub fn indices(&self) -> [usize; 3] {
        self.vertices
    }

    /// Check if this facet contains a vertex index
    pub fn contains(&self, v: usize) -> bool {
        self.vertices.contains(&v)
    }

    /// The directed edge `i` of this facet
    pub fn edge(&self, i: usize) -> (usize, usize) {
        (self.vertices[i % 3], self.vertices[(i + 1) % 3])
    }

    /// Compute the centroid of this facet
    pub fn centroid(&self, vertices: &[Vertex3]) -> Vertex3 {
        let v0 = &vertices[self.vertices[0]];
        let v1 = &vertices[self.vertices[1]];
        let v2 = &vertices[self.vertices[2]];

        Vertex3 {
            x: (v0.x + v1.x + v2.x) / 3.0,
            y: (v0.y + v1.y + v2.y) / 3.0,
            z: (v0.z + v1.z + v2.z) / 3.0,
        }
    }
}

/// The result of a 2D convex hull computation
///
/// An ordered, non-repeating counter-clockwise vertex loop. The sequence has
/// length 0 (empty input), 1 (all points coincident), 2 (all points
/// collinear), or at least 3 (a proper polygon). Results are immutable;
/// equality compares the vertex sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvexHull2D {
    vertices: Vec<Vertex2>,
    precision: Precision,
    #[serde(skip)]
    region: OnceLock<Option<Region2D>>,
}

impl PartialEq for ConvexHull2D {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices
    }
}

impl ConvexHull2D {
    pub(crate) fn from_loop(vertices: Vec<Vertex2>, precision: Precision) -> Self {
        Self {
            vertices,
            precision,
            region: OnceLock::new(),
        }
    }

    /// Compute the convex hull of `points` with an explicit comparator.
    ///
    /// With `include_collinear` set, points lying on a hull edge (within
    /// tolerance) are kept in the loop; otherwise only the corner points
    /// survive.
    ///
    /// # Errors
    ///
    /// [`ConvexHullError::InvalidInput`] for non-finite coordinates and
    /// [`ConvexHullError::ConvexityValidation`] when the post-construction
    /// turn check fails, which signals an epsilon too coarse for the point
    /// spread.
    ///
    /// [`ConvexHullError::InvalidInput`]: crate::ConvexHullError::InvalidInput
    /// [`ConvexHullError::ConvexityValidation`]: crate::ConvexHullError::ConvexityValidation
    pub fn generate(
        points: &[Vertex2],
        precision: Precision,
        include_collinear: bool,
    ) -> Result<Self> {
        let vertices = monotone::generate(points, precision, include_collinear)?;
        Ok(Self::from_loop(vertices, precision))
    }

    /// Compute the convex hull with a scale-aware default epsilon,
    /// dropping collinear edge points.
    pub fn build(points: &[Vertex2]) -> Result<Self> {
        Self::generate(points, Precision::relative_2d(points), false)
    }

    /// The hull vertices in counter-clockwise order
    pub fn vertices(&self) -> &[Vertex2] {
        &self.vertices
    }

    /// Get the number of hull vertices
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// The comparator used during construction
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Whether the input lacked 3 non-collinear points, so the hull bounds
    /// no region
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    /// The closed convex region bounded by the hull, or `None` for a
    /// degenerate hull. Computed on first use and cached.
    pub fn region(&self) -> Option<&Region2D> {
        self.region
            .get_or_init(|| region::polygon_region(&self.vertices, self.precision))
            .as_ref()
    }

    /// Compute the enclosed area (zero for degenerate hulls)
    pub fn area(&self) -> f64 {
        region::polygon_area(&self.vertices).abs()
    }
}

/// The result of a 3D convex hull computation
///
/// A vertex table plus triangulated facets with outward planes and complete
/// edge adjacency. Degenerate inputs (fewer than 4 effective dimensions of
/// spread) yield a result with no facets and the original input points
/// preserved verbatim. Results are immutable; equality compares the vertex
/// and facet tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvexHull3D {
    vertices: Vec<Vertex3>,
    facets: Vec<Facet>,
    precision: Precision,
    #[serde(skip)]
    region: OnceLock<Option<Region3D>>,
}

impl PartialEq for ConvexHull3D {
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices && self.facets == other.facets
    }
}

impl ConvexHull3D {
    pub(crate) fn new(vertices: Vec<Vertex3>, facets: Vec<Facet>, precision: Precision) -> Self {
        Self {
            vertices,
            facets,
            precision,
            region: OnceLock::new(),
        }
    }

    /// A degenerate hull: no facets, no region, input preserved as-is.
    pub(crate) fn degenerate(vertices: Vec<Vertex3>, precision: Precision) -> Self {
        Self::new(vertices, Vec::new(), precision)
    }

    /// Compute the convex hull of `points` with an explicit comparator.
    ///
    /// # Errors
    ///
    /// [`ConvexHullError::InvalidInput`] for non-finite coordinates,
    /// [`ConvexHullError::ConvexityValidation`] when the facet-plane or
    /// edge-manifold check fails after construction, and
    /// [`ConvexHullError::MaxIterationsExceeded`] if the conflict loop does
    /// not settle.
    ///
    /// [`ConvexHullError::InvalidInput`]: crate::ConvexHullError::InvalidInput
    /// [`ConvexHullError::ConvexityValidation`]: crate::ConvexHullError::ConvexityValidation
    /// [`ConvexHullError::MaxIterationsExceeded`]: crate::ConvexHullError::MaxIterationsExceeded
    pub fn generate(points: &[Vertex3], precision: Precision) -> Result<Self> {
        quickhull::quickhull_3d(points, precision)
    }

    /// Compute the convex hull with a scale-aware default epsilon.
    pub fn build(points: &[Vertex3]) -> Result<Self> {
        Self::generate(points, Precision::relative_3d(points))
    }

    /// Get the vertices
    pub fn vertices(&self) -> &[Vertex3] {
        &self.vertices
    }

    /// Get the facets
    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    /// Get the number of vertices
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangular faces
    pub fn num_faces(&self) -> usize {
        self.facets.len()
    }

    /// The comparator used during construction
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Whether the input lacked 4 non-coplanar points, so the hull bounds
    /// no region and carries no facets
    pub fn is_degenerate(&self) -> bool {
        self.facets.is_empty()
    }

    /// The closed convex region bounded by the hull, or `None` for a
    /// degenerate hull. Computed on first use and cached.
    pub fn region(&self) -> Option<&Region3D> {
        self.region
            .get_or_init(|| region::polytope_region(&self.vertices, &self.facets, self.precision))
            .as_ref()
    }

    /// Compute the volume of the convex hull
    pub fn volume(&self) -> f64 {
        let mut volume = 0.0;

        for facet in &self.facets {
            let v0 = &self.vertices[facet.vertices[0]];
            let v1 = &self.vertices[facet.vertices[1]];
            let v2 = &self.vertices[facet.vertices[2]];

            // Signed volume of the tetrahedron formed by the origin and the facet
            volume += v0.dot(&v1.cross(v2)) / 6.0;
        }

        volume.abs()
    }

    /// Compute the surface area of the convex hull
    pub fn surface_area(&self) -> f64 {
        let mut area = 0.0;

        for facet in &self.facets {
            let v0 = &self.vertices[facet.vertices[0]];
            let v1 = &self.vertices[facet.vertices[1]];
            let v2 = &self.vertices[facet.vertices[2]];

            let e1 = v1.sub(v0);
            let e2 = v2.sub(v0);
            area += e1.cross(&e2).magnitude() / 2.0;
        }

        area
    }

    /// The hull vertex farthest in the given direction, or `None` for an
    /// empty hull
    pub fn support_point(&self, direction: Vertex3) -> Option<Vertex3> {
        let mut best: Option<(f64, Vertex3)> = None;

        for point in &self.vertices {
            let dot = point.dot(&direction);
            match best {
                Some((max, _)) if dot <= max => {}
                _ => best = Some((dot, *point)),
            }
        }

        best.map(|(_, p)| p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_sign() {
        let e1 = Vertex2::new(1.0, 0.0);
        let e2 = Vertex2::new(0.0, 1.0);
        assert!(e1.cross(&e2) > 0.0);
        assert!(e2.cross(&e1) < 0.0);
    }

    #[test]
    fn test_coincident_uses_tolerance() {
        let precision = Precision::new(1e-6);
        let a = Vertex2::new(0.0, 0.0);
        let b = Vertex2::new(1e-7, -1e-7);
        let c = Vertex2::new(1e-3, 0.0);
        assert!(a.coincident(&b, precision));
        assert!(!a.coincident(&c, precision));
    }

    #[test]
    fn test_plane_signed_distance() {
        let plane = Plane3 {
            point: Vertex3::new(0.0, 0.0, 1.0),
            normal: Vertex3::new(0.0, 0.0, 1.0),
        };
        assert!((plane.signed_distance(&Vertex3::new(5.0, -2.0, 3.0)) - 2.0).abs() < 1e-12);
        assert!((plane.signed_distance(&Vertex3::new(0.0, 0.0, 0.0)) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_try_normalize_rejects_zero() {
        assert!(Vertex3::new(0.0, 0.0, 0.0).try_normalize().is_none());
        let n = Vertex3::new(0.0, 3.0, 4.0).try_normalize().unwrap();
        assert!((n.magnitude() - 1.0).abs() < 1e-12);
    }
}
