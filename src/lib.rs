//! Robust 2D and 3D Convex Hull Construction
//!
//! This library computes convex hulls of finite point sets in 2- and
//! 3-dimensional Euclidean space. All geometric comparisons are
//! tolerance-based: a [`Precision`] value fixes one epsilon per computation,
//! so near-collinear and near-coplanar configurations are classified
//! deterministically instead of drowning in floating-point noise.
//!
//! The 2D path filters candidates with the Akl–Toussaint extremal
//! quadrilateral heuristic and builds the hull with Andrew's monotone chain.
//! The 3D path is an incremental quickhull producing triangulated facets
//! with outward planes and per-edge adjacency.
//!
//! Inputs without enough dimensional spread (a point, a segment, collinear
//! or coplanar clouds) are not errors: they produce a degenerate result
//! that keeps the original points and has no region.
//!
//! # 2D Example
//! ```
//! use robust_hull::{ConvexHull2D, Vertex2};
//!
//! let points = vec![
//!     Vertex2::new(0.0, 0.0),
//!     Vertex2::new(2.0, 0.0),
//!     Vertex2::new(2.0, 2.0),
//!     Vertex2::new(0.0, 2.0),
//!     Vertex2::new(1.0, 1.0),
//! ];
//!
//! let hull = ConvexHull2D::build(&points).unwrap();
//! // Counter-clockwise loop; the interior point is gone.
//! assert_eq!(hull.num_vertices(), 4);
//! ```
//!
//! # 3D Example
//! ```
//! use robust_hull::{ConvexHull3D, Vertex3};
//!
//! let points = vec![
//!     Vertex3::new(0.0, 0.0, 0.0),
//!     Vertex3::new(1.0, 0.0, 0.0),
//!     Vertex3::new(0.0, 1.0, 0.0),
//!     Vertex3::new(0.0, 0.0, 1.0),
//! ];
//!
//! let hull = ConvexHull3D::build(&points).unwrap();
//! assert_eq!(hull.num_faces(), 4);
//! ```

mod filter;
mod monotone;
mod precision;
mod quickhull;
mod region;
mod types;

// Make testdata publicly available for tests and benches
pub mod testdata;

pub use filter::{ExtremalFilter, reduce_points};
pub use monotone::ConvexHull2DBuilder;
pub use precision::Precision;
pub use region::{HalfPlane2, HalfSpace3, Region2D, Region3D};
pub use types::{ConvexHull2D, ConvexHull3D, Facet, Plane3, Vertex2, Vertex3};

/// Error types for convex hull operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvexHullError {
    #[error("input contains a non-finite coordinate at index {index}")]
    InvalidInput {
        /// Index of the offending point in the input slice
        index: usize,
    },

    #[error("convexity validation failed: {0}")]
    ConvexityValidation(String),

    #[error("maximum iterations exceeded")]
    MaxIterationsExceeded,
}

pub type Result<T> = std::result::Result<T, ConvexHullError>;

/// Numerical tolerance for floating-point comparisons
/// Used as the default epsilon for:
/// - Distance calculations
/// - Turn-direction and visibility checks
/// - Degeneracy detection
pub(crate) const EPSILON: f64 = 1e-10;
