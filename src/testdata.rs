//! Test data for convex hull tests and benchmarks

use crate::types::{Vertex2, Vertex3};
use rand::Rng;

/// Generate random points on a sphere
pub fn random_sphere_points(n: usize, radius: f64) -> Vec<Vertex3> {
    let mut rng = rand::rng();
    let mut vertices = Vec::with_capacity(n);

    for _ in 0..n {
        let azimuth = rng.random::<f64>() * 2.0 * std::f64::consts::PI;
        let elevation = (rng.random::<f64>() * 2.0 - 1.0).asin();
        let r = radius * (0.9 + 0.2 * rng.random::<f64>()); // Add some radius variation

        vertices.push(Vertex3::new(
            r * elevation.cos() * azimuth.cos(),
            r * elevation.cos() * azimuth.sin(),
            r * elevation.sin(),
        ));
    }

    vertices
}

/// Generate uniformly distributed points on a sphere using a Fibonacci lattice
pub fn fibonacci_sphere_points(n: usize, radius: f64) -> Vec<Vertex3> {
    let mut vertices = Vec::with_capacity(n);
    let golden_ratio = (1.0 + 5.0_f64.sqrt()) / 2.0;

    for i in 0..n {
        let theta = 2.0 * std::f64::consts::PI * (i as f64) / golden_ratio;
        let phi = ((2 * i + 1) as f64 / n as f64 - 1.0).acos();

        vertices.push(Vertex3::new(
            radius * phi.sin() * theta.cos(),
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
        ));
    }

    vertices
}

/// Generate a cube's vertices centered on the origin
pub fn cube_vertices(size: f64) -> Vec<Vertex3> {
    let s = size / 2.0;
    vec![
        Vertex3::new(-s, -s, -s),
        Vertex3::new(s, -s, -s),
        Vertex3::new(s, s, -s),
        Vertex3::new(-s, s, -s),
        Vertex3::new(-s, -s, s),
        Vertex3::new(s, -s, s),
        Vertex3::new(s, s, s),
        Vertex3::new(-s, s, s),
    ]
}

/// The corners of the unit cube `{0, 1}^3`
pub fn unit_cube_corners() -> Vec<Vertex3> {
    let mut vertices = Vec::with_capacity(8);
    for x in 0..2 {
        for y in 0..2 {
            for z in 0..2 {
                vertices.push(Vertex3::new(x as f64, y as f64, z as f64));
            }
        }
    }
    vertices
}

/// Generate a cube with random interior points
pub fn cube_with_interior_points(size: f64, n_interior: usize) -> Vec<Vertex3> {
    let mut vertices = cube_vertices(size);
    let mut rng = rand::rng();
    let s = size / 2.0;

    for _ in 0..n_interior {
        vertices.push(Vertex3::new(
            rng.random::<f64>() * size - s,
            rng.random::<f64>() * size - s,
            rng.random::<f64>() * size - s,
        ));
    }

    vertices
}

/// Generate an equilateral tetrahedron
pub fn tetrahedron_vertices() -> Vec<Vertex3> {
    vec![
        Vertex3::new(0.0, 0.0, 0.0),
        Vertex3::new(1.0, 0.0, 0.0),
        Vertex3::new(0.5, (3.0_f64).sqrt() / 2.0, 0.0),
        Vertex3::new(0.5, (3.0_f64).sqrt() / 6.0, (2.0 / 3.0_f64).sqrt()),
    ]
}

/// The unit right tetrahedron with volume 1/6
pub fn unit_tetrahedron_vertices() -> Vec<Vertex3> {
    vec![
        Vertex3::new(0.0, 0.0, 0.0),
        Vertex3::new(1.0, 0.0, 0.0),
        Vertex3::new(0.0, 1.0, 0.0),
        Vertex3::new(0.0, 0.0, 1.0),
    ]
}

/// Generate vertices for an octahedron
pub fn octahedron_vertices() -> Vec<Vertex3> {
    vec![
        Vertex3::new(1.0, 0.0, 0.0),
        Vertex3::new(-1.0, 0.0, 0.0),
        Vertex3::new(0.0, 1.0, 0.0),
        Vertex3::new(0.0, -1.0, 0.0),
        Vertex3::new(0.0, 0.0, 1.0),
        Vertex3::new(0.0, 0.0, -1.0),
    ]
}

/// Generate vertices for an icosahedron
pub fn icosahedron_vertices() -> Vec<Vertex3> {
    let phi = (1.0 + 5.0_f64.sqrt()) / 2.0; // Golden ratio

    vec![
        Vertex3::new(-1.0, phi, 0.0),
        Vertex3::new(1.0, phi, 0.0),
        Vertex3::new(-1.0, -phi, 0.0),
        Vertex3::new(1.0, -phi, 0.0),
        Vertex3::new(0.0, -1.0, phi),
        Vertex3::new(0.0, 1.0, phi),
        Vertex3::new(0.0, -1.0, -phi),
        Vertex3::new(0.0, 1.0, -phi),
        Vertex3::new(phi, 0.0, -1.0),
        Vertex3::new(phi, 0.0, 1.0),
        Vertex3::new(-phi, 0.0, -1.0),
        Vertex3::new(-phi, 0.0, 1.0),
    ]
}

/// Generate evenly spaced points on a circle
pub fn circle_points(n: usize, radius: f64) -> Vec<Vertex2> {
    (0..n)
        .map(|i| {
            let angle = 2.0 * std::f64::consts::PI * (i as f64) / (n as f64);
            Vertex2::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

/// Generate random points inside a square centered on the origin
pub fn random_square_points(n: usize, size: f64) -> Vec<Vertex2> {
    let mut rng = rand::rng();
    let s = size / 2.0;

    (0..n)
        .map(|_| {
            Vertex2::new(
                rng.random::<f64>() * size - s,
                rng.random::<f64>() * size - s,
            )
        })
        .collect()
}

/// Generate a square with random interior points
pub fn square_with_interior_points(size: f64, n_interior: usize) -> Vec<Vertex2> {
    let s = size / 2.0;
    let mut vertices = vec![
        Vertex2::new(-s, -s),
        Vertex2::new(s, -s),
        Vertex2::new(s, s),
        Vertex2::new(-s, s),
    ];
    vertices.extend(random_square_points(n_interior, size));
    vertices
}

/// Generate evenly spaced collinear points on the x-axis
pub fn collinear_points(n: usize, spacing: f64) -> Vec<Vertex2> {
    (0..n)
        .map(|i| Vertex2::new(i as f64 * spacing, 0.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fibonacci_sphere_points() {
        let points = fibonacci_sphere_points(100, 1.0);
        assert_eq!(points.len(), 100);

        // Check that all points are on the sphere
        for p in &points {
            assert!((p.magnitude() - 1.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_random_sphere_points() {
        let points = random_sphere_points(100, 1.0);
        assert_eq!(points.len(), 100);

        // Allow for radius variation
        for p in &points {
            let dist = p.magnitude();
            assert!(dist > 0.8 && dist < 1.2);
        }
    }

    #[test]
    fn test_cube_vertices() {
        let vertices = cube_vertices(2.0);
        assert_eq!(vertices.len(), 8);

        for v in &vertices {
            assert!((v.magnitude() - 3.0_f64.sqrt()).abs() < 1e-10);
        }
    }

    #[test]
    fn test_circle_points() {
        let points = circle_points(36, 2.0);
        assert_eq!(points.len(), 36);
        for p in &points {
            assert!((p.magnitude() - 2.0).abs() < 1e-10);
        }
    }
}
