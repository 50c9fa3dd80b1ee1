//! Quickhull algorithm implementation for 3D convex hulls
//!
//! Based on:
//! - Barber, C.B., Dobkin, D.P., and Huhdanpaa, H.T., "The Quickhull algorithm
//!   for convex hulls," ACM Trans. on Mathematical Software, 22(4):469-483, 1996.
//!
//! Implementation notes:
//! - Facet arena with generation-style deletion flags (O(1) instead of O(n))
//! - Stable integer indices everywhere; no object back-references
//! - Farthest-first conflict processing with a cached furthest point per facet
//! - Horizon from an explicit edge-to-facet map, no recursion
//! - Adaptive compaction based on deleted facet ratio

use crate::precision::Precision;
use crate::types::{ConvexHull3D, Facet, Plane3, Vertex3};
use crate::{ConvexHullError, Result};
use std::collections::HashMap;

const MAX_ITERATIONS: usize = 100_000;

/// Internal representation of a facet during hull construction
#[derive(Debug, Clone)]
struct HullFace {
    vertices: [usize; 3],
    normal: Vertex3,
    d: f64, // Plane constant: normal.dot(v0), for faster distance computation
    outside_points: Vec<usize>,
    furthest_point: Option<usize>,
    furthest_distance: f64,
    deleted: bool, // Mark as deleted instead of removing
}

impl HullFace {
    fn new(v0: usize, v1: usize, v2: usize, vertices: &[Vertex3]) -> Self {
        let p0 = &vertices[v0];
        let p1 = &vertices[v1];
        let p2 = &vertices[v2];

        let e1 = p1.sub(p0);
        let e2 = p2.sub(p0);
        let normal = e1
            .cross(&e2)
            .try_normalize()
            .unwrap_or_else(|| Vertex3::new(0.0, 0.0, 1.0));

        // Pre-compute plane constant for faster distance calculation
        let d = normal.dot(p0);

        Self {
            vertices: [v0, v1, v2],
            normal,
            d,
            outside_points: Vec::new(),
            furthest_point: None,
            furthest_distance: 0.0,
            deleted: false,
        }
    }

    /// Fast signed distance from point to plane (positive = outside)
    #[inline]
    fn signed_distance(&self, point: &Vertex3) -> f64 {
        self.normal.dot(point) - self.d
    }

    #[inline]
    fn is_visible_from(&self, point: &Vertex3, precision: Precision) -> bool {
        precision.gt(self.signed_distance(point), 0.0)
    }

    fn assign_point(&mut self, point_idx: usize, distance: f64) {
        self.outside_points.push(point_idx);
        if distance > self.furthest_distance || self.furthest_point.is_none() {
            self.furthest_point = Some(point_idx);
            self.furthest_distance = distance;
        }
    }

    /// Detach one conflict point, keeping the furthest-point cache valid.
    fn remove_outside_point(&mut self, point_idx: usize, vertices: &[Vertex3]) {
        self.outside_points.retain(|&p| p != point_idx);
        self.furthest_point = None;
        self.furthest_distance = 0.0;
        for &idx in &self.outside_points {
            let distance = self.signed_distance(&vertices[idx]);
            if distance > self.furthest_distance || self.furthest_point.is_none() {
                self.furthest_point = Some(idx);
                self.furthest_distance = distance;
            }
        }
    }

    fn furthest(&self) -> Option<(usize, f64)> {
        self.furthest_point.map(|idx| (idx, self.furthest_distance))
    }

    fn clear_outside(&mut self) {
        self.outside_points.clear();
        self.furthest_point = None;
        self.furthest_distance = 0.0;
    }
}

/// Edge representation for horizon computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Edge {
    v0: usize,
    v1: usize,
}

impl Edge {
    #[inline]
    fn new(v0: usize, v1: usize) -> Self {
        // Normalize edge orientation for consistent hashing
        if v0 < v1 {
            Self { v0, v1 }
        } else {
            Self { v0: v1, v1: v0 }
        }
    }

    /// Create with explicit orientation (don't normalize)
    #[inline]
    fn oriented(v0: usize, v1: usize) -> Self {
        Self { v0, v1 }
    }
}

/// Scratch buffers to avoid allocations in the hot loop
struct ScratchBuffers {
    visible_face_indices: Vec<usize>,
    orphaned_points: Vec<usize>,
    new_faces: Vec<HullFace>,
    edge_to_face: HashMap<Edge, usize>,
    horizon_edges: Vec<Edge>,
}

impl ScratchBuffers {
    fn new() -> Self {
        Self {
            visible_face_indices: Vec::with_capacity(64),
            orphaned_points: Vec::with_capacity(256),
            new_faces: Vec::with_capacity(64),
            edge_to_face: HashMap::with_capacity(128),
            horizon_edges: Vec::with_capacity(64),
        }
    }

    fn clear(&mut self) {
        self.visible_face_indices.clear();
        self.orphaned_points.clear();
        self.new_faces.clear();
        self.edge_to_face.clear();
        self.horizon_edges.clear();
    }
}

/// Build a 3D convex hull using the Quickhull algorithm.
///
/// Inputs without 4 non-coplanar points within tolerance produce a
/// degenerate result carrying the original point list verbatim.
pub(crate) fn quickhull_3d(points: &[Vertex3], precision: Precision) -> Result<ConvexHull3D> {
    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        return Err(ConvexHullError::InvalidInput { index });
    }

    // Duplicates within tolerance collapse before construction
    let unique_vertices = deduplicate_vertices(points, precision);

    let Some(initial_simplex) = find_initial_simplex(&unique_vertices, precision) else {
        return Ok(ConvexHull3D::degenerate(points.to_vec(), precision));
    };

    // Centroid of the initial simplex - guaranteed to be inside the hull
    let simplex_centroid = centroid4(&unique_vertices, &initial_simplex);

    // Build initial hull from the simplex
    let mut hull_faces = create_initial_hull(&initial_simplex, &unique_vertices);

    // Track which points are in the initial simplex
    let mut in_simplex = vec![false; unique_vertices.len()];
    for &idx in &initial_simplex {
        in_simplex[idx] = true;
    }

    // Assign every remaining point to the first facet it is outside of
    for point_idx in (0..unique_vertices.len()).filter(|&i| !in_simplex[i]) {
        let vertex = &unique_vertices[point_idx];
        for face in hull_faces.iter_mut() {
            if face.is_visible_from(vertex, precision) {
                let distance = face.signed_distance(vertex);
                face.assign_point(point_idx, distance);
                break;
            }
        }
    }

    // Scratch buffers for the main loop
    let mut scratch = ScratchBuffers::new();

    // Main iteration loop
    let mut iterations = 0;
    loop {
        iterations += 1;
        if iterations > MAX_ITERATIONS {
            log::error!(
                "max iterations exceeded after {} iterations with {} faces",
                iterations,
                hull_faces.iter().filter(|f| !f.deleted).count()
            );
            return Err(ConvexHullError::MaxIterationsExceeded);
        }

        // Adaptive compaction: trigger when deleted facet ratio exceeds threshold
        let deleted_count = hull_faces.iter().filter(|f| f.deleted).count();
        let deleted_ratio = deleted_count as f64 / hull_faces.len() as f64;

        if deleted_ratio > 0.3 || (iterations % 500 == 0 && deleted_count > 0) {
            compact_faces(&mut hull_faces);

            let total_outside_points: usize =
                hull_faces.iter().map(|f| f.outside_points.len()).sum();
            log::debug!(
                "iteration {}: {} faces, {} outside points remaining",
                iterations,
                hull_faces.len(),
                total_outside_points
            );
        }

        // Deepest conflict point over all facets: farthest-first processing
        let Some((face_idx, point_idx)) = find_face_with_furthest_point(&hull_faces) else {
            break; // No more outside points
        };

        let point = unique_vertices[point_idx];

        scratch.clear();

        // Find all facets visible from the chosen point
        for (i, face) in hull_faces.iter().enumerate() {
            if !face.deleted && face.is_visible_from(&point, precision) {
                scratch.visible_face_indices.push(i);
            }
        }

        if scratch.visible_face_indices.is_empty() {
            // Shouldn't happen, but handle gracefully
            hull_faces[face_idx].remove_outside_point(point_idx, &unique_vertices);
            continue;
        }

        // Find horizon edges
        find_horizon(
            &hull_faces,
            &scratch.visible_face_indices,
            &mut scratch.edge_to_face,
            &mut scratch.horizon_edges,
        );

        // Collect orphaned points from visible facets
        for &face_idx in &scratch.visible_face_indices {
            scratch
                .orphaned_points
                .extend(hull_faces[face_idx].outside_points.iter().copied());
        }
        scratch.orphaned_points.retain(|&p| p != point_idx);

        // Delete visible facets (O(1) per facet instead of O(n) removal)
        for &face_idx in &scratch.visible_face_indices {
            hull_faces[face_idx].deleted = true;
            hull_faces[face_idx].clear_outside();
        }

        // Create one new facet per horizon edge, oriented outward
        for edge in &scratch.horizon_edges {
            let face = HullFace::new(edge.v0, edge.v1, point_idx, &unique_vertices);

            // Normal must point away from the interior
            let to_interior = simplex_centroid.sub(&unique_vertices[face.vertices[0]]);
            if face.normal.dot(&to_interior) < 0.0 {
                scratch.new_faces.push(face);
            } else {
                scratch
                    .new_faces
                    .push(HullFace::new(edge.v1, edge.v0, point_idx, &unique_vertices));
            }
        }

        // Redistribute orphaned points to new facets first, then survivors;
        // points no facet can see have become interior and are dropped.
        for &orphan_idx in &scratch.orphaned_points {
            let orphan = &unique_vertices[orphan_idx];
            let mut assigned = false;

            for face in &mut scratch.new_faces {
                if face.is_visible_from(orphan, precision) {
                    let distance = face.signed_distance(orphan);
                    face.assign_point(orphan_idx, distance);
                    assigned = true;
                    break;
                }
            }

            if !assigned {
                for face in hull_faces.iter_mut().filter(|f| !f.deleted) {
                    if face.is_visible_from(orphan, precision) {
                        let distance = face.signed_distance(orphan);
                        face.assign_point(orphan_idx, distance);
                        break;
                    }
                }
            }
        }

        hull_faces.append(&mut scratch.new_faces);
    }

    // Final compaction - remove all deleted facets
    compact_faces(&mut hull_faces);

    finalize(&unique_vertices, &hull_faces, precision)
}

/// Collapse points that coincide within tolerance, keeping first occurrences
/// in input order.
fn deduplicate_vertices(points: &[Vertex3], precision: Precision) -> Vec<Vertex3> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&i, &j| {
        let (a, b) = (&points[i], &points[j]);
        a.x.total_cmp(&b.x)
            .then(a.y.total_cmp(&b.y))
            .then(a.z.total_cmp(&b.z))
    });

    let mut keep = vec![true; points.len()];
    let mut last_kept: Option<usize> = None;
    for &i in &order {
        match last_kept {
            Some(k) if points[i].coincident(&points[k], precision) => keep[i] = false,
            _ => last_kept = Some(i),
        }
    }

    points
        .iter()
        .enumerate()
        .filter_map(|(i, p)| keep[i].then_some(*p))
        .collect()
}

/// Find the extreme points (min/max in each dimension)
fn find_extreme_points(vertices: &[Vertex3]) -> [usize; 6] {
    let mut min_x_idx = 0;
    let mut max_x_idx = 0;
    let mut min_y_idx = 0;
    let mut max_y_idx = 0;
    let mut min_z_idx = 0;
    let mut max_z_idx = 0;

    for (i, v) in vertices.iter().enumerate() {
        if v.x < vertices[min_x_idx].x {
            min_x_idx = i;
        }
        if v.x > vertices[max_x_idx].x {
            max_x_idx = i;
        }
        if v.y < vertices[min_y_idx].y {
            min_y_idx = i;
        }
        if v.y > vertices[max_y_idx].y {
            max_y_idx = i;
        }
        if v.z < vertices[min_z_idx].z {
            min_z_idx = i;
        }
        if v.z > vertices[max_z_idx].z {
            max_z_idx = i;
        }
    }

    [
        min_x_idx, max_x_idx, min_y_idx, max_y_idx, min_z_idx, max_z_idx,
    ]
}

/// Select 4 non-coplanar points maximizing extremal spread, or `None` when
/// every point is coincident, collinear or coplanar within tolerance.
fn find_initial_simplex(vertices: &[Vertex3], precision: Precision) -> Option<[usize; 4]> {
    if vertices.len() < 4 {
        return None;
    }

    // The pair of extreme points with maximum separation
    let extremes = find_extreme_points(vertices);

    let mut max_distance = 0.0;
    let mut v0 = 0;
    let mut v1 = 0;

    for i in 0..6 {
        for j in (i + 1)..6 {
            let dist = vertices[extremes[i]].distance(&vertices[extremes[j]]);
            if dist > max_distance {
                max_distance = dist;
                v0 = extremes[i];
                v1 = extremes[j];
            }
        }
    }

    if precision.eq_zero(max_distance) {
        return None;
    }

    // The point furthest from the line v0-v1
    let line_dir = vertices[v1].sub(&vertices[v0]).scale(1.0 / max_distance);

    let mut max_distance = 0.0;
    let mut v2 = 0;

    for (i, vertex) in vertices.iter().enumerate() {
        if i == v0 || i == v1 {
            continue;
        }

        let to_point = vertex.sub(&vertices[v0]);
        let projection = line_dir.scale(to_point.dot(&line_dir));
        let dist = to_point.sub(&projection).magnitude();

        if dist > max_distance {
            max_distance = dist;
            v2 = i;
        }
    }

    if precision.eq_zero(max_distance) {
        return None;
    }

    // The point furthest from the plane through v0, v1, v2, on either side
    let normal = vertices[v1]
        .sub(&vertices[v0])
        .cross(&vertices[v2].sub(&vertices[v0]))
        .try_normalize()?;

    let mut pos_dist = 0.0;
    let mut neg_dist = 0.0;
    let mut pos_idx = 0;
    let mut neg_idx = 0;

    for (i, vertex) in vertices.iter().enumerate() {
        if i == v0 || i == v1 || i == v2 {
            continue;
        }

        let dist = normal.dot(&vertex.sub(&vertices[v0]));

        if dist > pos_dist {
            pos_dist = dist;
            pos_idx = i;
        }
        if -dist > neg_dist {
            neg_dist = -dist;
            neg_idx = i;
        }
    }

    let (max_distance, v3) = if pos_dist >= neg_dist {
        (pos_dist, pos_idx)
    } else {
        (neg_dist, neg_idx)
    };

    if precision.eq_zero(max_distance) {
        return None;
    }

    Some([v0, v1, v2, v3])
}

fn centroid4(vertices: &[Vertex3], simplex: &[usize; 4]) -> Vertex3 {
    simplex
        .iter()
        .fold(Vertex3::new(0.0, 0.0, 0.0), |acc, &i| acc.add(&vertices[i]))
        .scale(0.25)
}

/// Create the initial hull from the simplex
fn create_initial_hull(simplex: &[usize; 4], vertices: &[Vertex3]) -> Vec<HullFace> {
    let [v0, v1, v2, v3] = *simplex;

    // The 4 triangular facets of the tetrahedron
    let mut faces = vec![
        HullFace::new(v0, v1, v2, vertices),
        HullFace::new(v0, v2, v3, vertices),
        HullFace::new(v0, v3, v1, vertices),
        HullFace::new(v1, v3, v2, vertices),
    ];

    // Ensure all normals point outward from the centroid
    let centroid = centroid4(vertices, simplex);

    for face in &mut faces {
        let to_centroid = centroid.sub(&vertices[face.vertices[0]]);

        // If the normal points inward, flip the facet
        if face.normal.dot(&to_centroid) > 0.0 {
            face.vertices.swap(1, 2);
            face.normal = face.normal.scale(-1.0);
            face.d = -face.d;
        }
    }

    faces
}

/// Find the facet holding the globally deepest conflict point
fn find_face_with_furthest_point(hull_faces: &[HullFace]) -> Option<(usize, usize)> {
    let mut max_distance = 0.0;
    let mut result = None;

    for (face_idx, face) in hull_faces.iter().enumerate() {
        if face.deleted {
            continue;
        }

        if let Some((point_idx, distance)) = face.furthest()
            && distance > max_distance
        {
            max_distance = distance;
            result = Some((face_idx, point_idx));
        }
    }

    result
}

/// Find horizon edges from an edge-to-facet map over the visible facets.
///
/// An edge shared by two visible facets cancels out of the map; the
/// survivors border exactly one visible facet and form the horizon loop.
fn find_horizon(
    hull_faces: &[HullFace],
    visible_faces: &[usize],
    edge_to_face: &mut HashMap<Edge, usize>,
    horizon: &mut Vec<Edge>,
) {
    edge_to_face.clear();
    horizon.clear();

    for &face_idx in visible_faces {
        let face = &hull_faces[face_idx];
        let edges = [
            (face.vertices[0], face.vertices[1]),
            (face.vertices[1], face.vertices[2]),
            (face.vertices[2], face.vertices[0]),
        ];

        for (v0, v1) in edges {
            let normalized = Edge::new(v0, v1);
            match edge_to_face.entry(normalized) {
                std::collections::hash_map::Entry::Vacant(e) => {
                    e.insert(face_idx);
                }
                std::collections::hash_map::Entry::Occupied(e) => {
                    // Edge is interior to the visible set - not a horizon edge
                    e.remove();
                }
            }
        }
    }

    // Remaining edges are horizon edges; recover their orientation from the
    // visible facet that owns them.
    for (&normalized_edge, &face_idx) in edge_to_face.iter() {
        let face = &hull_faces[face_idx];
        let edges = [
            (face.vertices[0], face.vertices[1]),
            (face.vertices[1], face.vertices[2]),
            (face.vertices[2], face.vertices[0]),
        ];

        for (v0, v1) in edges {
            if Edge::new(v0, v1) == normalized_edge {
                horizon.push(Edge::oriented(v0, v1));
                break;
            }
        }
    }
}

/// Remove deleted facets from the arena
fn compact_faces(hull_faces: &mut Vec<HullFace>) {
    hull_faces.retain(|f| !f.deleted);
}

/// Convert the facet arena to the immutable result: drop interior vertices,
/// remap indices, derive per-edge neighbors, and validate convexity and the
/// closed-manifold property.
fn finalize(
    unique_vertices: &[Vertex3],
    hull_faces: &[HullFace],
    precision: Precision,
) -> Result<ConvexHull3D> {
    // Drop vertices no facet references
    let mut used = vec![false; unique_vertices.len()];
    for face in hull_faces {
        for &v in &face.vertices {
            used[v] = true;
        }
    }

    let mut remap = vec![usize::MAX; unique_vertices.len()];
    let mut vertices = Vec::new();
    for (i, &is_used) in used.iter().enumerate() {
        if is_used {
            remap[i] = vertices.len();
            vertices.push(unique_vertices[i]);
        }
    }

    // Directed edge -> facet map; doubles as the manifold check
    let mut edge_owner: HashMap<(usize, usize), usize> =
        HashMap::with_capacity(hull_faces.len() * 3);
    for (face_idx, face) in hull_faces.iter().enumerate() {
        for j in 0..3 {
            let a = remap[face.vertices[j]];
            let b = remap[face.vertices[(j + 1) % 3]];
            if edge_owner.insert((a, b), face_idx).is_some() {
                return Err(ConvexHullError::ConvexityValidation(format!(
                    "edge ({a}, {b}) appears in more than one facet with the same orientation"
                )));
            }
        }
    }

    let mut facets = Vec::with_capacity(hull_faces.len());
    for face in hull_faces {
        let ids = face.vertices.map(|v| remap[v]);

        let mut neighbors = [0usize; 3];
        for (j, neighbor) in neighbors.iter_mut().enumerate() {
            let a = ids[j];
            let b = ids[(j + 1) % 3];
            // The facet across this edge holds it with opposite orientation
            match edge_owner.get(&(b, a)) {
                Some(&other) => *neighbor = other,
                None => {
                    return Err(ConvexHullError::ConvexityValidation(format!(
                        "edge ({a}, {b}) is not shared by exactly two facets"
                    )));
                }
            }
        }

        facets.push(Facet {
            vertices: ids,
            plane: Plane3 {
                point: vertices[ids[0]],
                normal: face.normal,
            },
            neighbors,
        });
    }

    // Every hull vertex must sit on the closed negative side of every facet
    for (face_idx, face) in hull_faces.iter().enumerate() {
        for (i, vertex) in vertices.iter().enumerate() {
            let dist = face.normal.dot(vertex) - face.d;
            if precision.gt(dist, 0.0) {
                return Err(ConvexHullError::ConvexityValidation(format!(
                    "vertex {i} lies {dist:e} outside the plane of facet {face_idx}"
                )));
            }
        }
    }

    Ok(ConvexHull3D::new(vertices, facets, precision))
}
