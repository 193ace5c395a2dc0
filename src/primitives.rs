//! Face tables for common convex polyhedra.
//!
//! Every generator returns `(points, faces)` with faces wound
//! counter-clockwise as seen from outside, ready for
//! [`build`](crate::mesh::build) or [`ConvexPolyhedron::new`](crate::shape::ConvexPolyhedron::new).

use std::f64::consts::TAU;

use nalgebra::Point3;

/// Points and counter-clockwise face loops of a polyhedron.
pub type FaceTable = (Vec<Point3<f64>>, Vec<Vec<usize>>);

/// A tetrahedron with one face on the `z = 0` plane.
pub fn tetrahedron() -> FaceTable {
    let points = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.5, 1.0, 0.0),
        Point3::new(0.5, 0.5, 1.0),
    ];
    let faces = vec![
        vec![0, 2, 1], // bottom
        vec![0, 1, 3], // front
        vec![1, 2, 3], // right
        vec![2, 0, 3], // left
    ];
    (points, faces)
}

/// An axis-aligned cube spanning `[-1, 1]` on every axis.
pub fn cube() -> FaceTable {
    let points = vec![
        Point3::new(-1.0, -1.0, -1.0),
        Point3::new(1.0, -1.0, -1.0),
        Point3::new(1.0, 1.0, -1.0),
        Point3::new(-1.0, 1.0, -1.0),
        Point3::new(-1.0, -1.0, 1.0),
        Point3::new(1.0, -1.0, 1.0),
        Point3::new(1.0, 1.0, 1.0),
        Point3::new(-1.0, 1.0, 1.0),
    ];
    let faces = vec![
        vec![0, 3, 2, 1], // -z
        vec![4, 5, 6, 7], // +z
        vec![0, 1, 5, 4], // -y
        vec![3, 7, 6, 2], // +y
        vec![0, 4, 7, 3], // -x
        vec![1, 2, 6, 5], // +x
    ];
    (points, faces)
}

/// A regular octahedron with vertices on the unit axes.
pub fn octahedron() -> FaceTable {
    let points = vec![
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(-1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, -1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(0.0, 0.0, -1.0),
    ];
    let faces = vec![
        vec![0, 2, 4],
        vec![2, 1, 4],
        vec![1, 3, 4],
        vec![3, 0, 4],
        vec![2, 0, 5],
        vec![1, 2, 5],
        vec![3, 1, 5],
        vec![0, 3, 5],
    ];
    (points, faces)
}

fn ring(n: usize, z: f64) -> impl Iterator<Item = Point3<f64>> {
    (0..n).map(move |i| {
        let angle = TAU * i as f64 / n as f64;
        Point3::new(angle.cos(), angle.sin(), z)
    })
}

/// A prism over a regular `n`-gon, spanning `z` in `[-1, 1]`.
///
/// Vertices `0..n` form the bottom ring and `n..2n` the top ring.
///
/// # Panics
/// Panics if `n < 3`.
pub fn prism(n: usize) -> FaceTable {
    assert!(n >= 3, "a prism needs at least 3 sides, got {}", n);

    let points: Vec<Point3<f64>> = ring(n, -1.0).chain(ring(n, 1.0)).collect();

    let mut faces: Vec<Vec<usize>> = Vec::with_capacity(n + 2);
    faces.push((0..n).rev().collect());
    faces.push((n..2 * n).collect());
    for i in 0..n {
        let j = (i + 1) % n;
        faces.push(vec![i, j, n + j, n + i]);
    }
    (points, faces)
}

/// A pyramid over a regular `n`-gon in the `z = 0` plane, apex at `z = 1`.
///
/// The apex is vertex `n`.
///
/// # Panics
/// Panics if `n < 3`.
pub fn pyramid(n: usize) -> FaceTable {
    assert!(n >= 3, "a pyramid needs at least 3 sides, got {}", n);

    let mut points: Vec<Point3<f64>> = ring(n, 0.0).collect();
    points.push(Point3::new(0.0, 0.0, 1.0));

    let mut faces: Vec<Vec<usize>> = Vec::with_capacity(n + 1);
    faces.push((0..n).rev().collect());
    for i in 0..n {
        faces.push(vec![i, (i + 1) % n, n]);
    }
    (points, faces)
}
