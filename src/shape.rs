//! Convex polyhedra with geometry.
//!
//! [`ConvexPolyhedron`] pairs vertex positions with a [`HalfEdgeStructure`]
//! and answers the queries collision code asks of a convex shape: face
//! normals, support points and support faces.
//!
//! # Example
//!
//! ```
//! use hullmesh::shape::ConvexPolyhedron;
//! use hullmesh::primitives;
//! use nalgebra::Vector3;
//!
//! let cube: ConvexPolyhedron = ConvexPolyhedron::from_table(primitives::cube()).unwrap();
//! let p = cube.support_point(&Vector3::new(1.0, 2.0, 3.0));
//! assert_eq!(p.coords, Vector3::new(1.0, 1.0, 1.0));
//! ```

use nalgebra::{Point3, Vector3};

use crate::error::Result;
use crate::mesh::{
    build_with_options, BuildOptions, EdgeId, FaceId, HalfEdgeStructure, MeshIndex, VertexId,
};
use crate::primitives::FaceTable;

/// A convex polyhedron: vertex positions plus half-edge connectivity.
#[derive(Debug, Clone)]
pub struct ConvexPolyhedron<I: MeshIndex = u32> {
    points: Vec<Point3<f64>>,
    topology: HalfEdgeStructure<I>,
}

impl<I: MeshIndex> ConvexPolyhedron<I> {
    /// Build a polyhedron from positions and counter-clockwise face loops.
    ///
    /// Convexity is not checked here; see [`is_convex`](Self::is_convex).
    pub fn new<F: AsRef<[usize]>>(points: Vec<Point3<f64>>, faces: &[F]) -> Result<Self> {
        Self::with_options(points, faces, &BuildOptions::default())
    }

    /// Build a polyhedron with explicit build options.
    pub fn with_options<F: AsRef<[usize]>>(
        points: Vec<Point3<f64>>,
        faces: &[F],
        options: &BuildOptions,
    ) -> Result<Self> {
        let topology = build_with_options(faces, points.len(), options)?;
        Ok(Self { points, topology })
    }

    /// Build a polyhedron from a `(points, faces)` table.
    pub fn from_table(table: FaceTable) -> Result<Self> {
        let (points, faces) = table;
        Self::new(points, &faces)
    }

    /// The half-edge connectivity.
    #[inline]
    pub fn topology(&self) -> &HalfEdgeStructure<I> {
        &self.topology
    }

    /// All vertex positions.
    #[inline]
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId<I>) -> &Point3<f64> {
        &self.points[v.index()]
    }

    // ==================== Faces ====================

    /// Compute the unit outward normal of a face.
    ///
    /// Uses Newell's method, which stays robust for slightly non-planar
    /// polygons.
    pub fn face_normal(&self, f: FaceId<I>) -> Vector3<f64> {
        let mut normal = Vector3::zeros();
        for e in self.topology.face_edges(f) {
            let a = self.position(self.topology.origin(e));
            let b = self.position(self.topology.dest(e));
            normal.x += (a.y - b.y) * (a.z + b.z);
            normal.y += (a.z - b.z) * (a.x + b.x);
            normal.z += (a.x - b.x) * (a.y + b.y);
        }
        normal.normalize()
    }

    /// Compute the centroid of a face's vertices.
    pub fn face_centroid(&self, f: FaceId<I>) -> Point3<f64> {
        let mut sum = Vector3::zeros();
        let mut count = 0usize;
        for v in self.topology.face_vertices(f) {
            sum += self.position(v).coords;
            count += 1;
        }
        Point3::from(sum / count as f64)
    }

    /// Signed distance from `p` to the plane of a face; positive outside.
    pub fn face_plane_distance(&self, f: FaceId<I>, p: &Point3<f64>) -> f64 {
        let normal = self.face_normal(f);
        normal.dot(&(p - self.face_centroid(f)))
    }

    // ==================== Edges ====================

    /// Compute the edge vector (from origin to destination).
    pub fn edge_vector(&self, e: EdgeId<I>) -> Vector3<f64> {
        self.position(self.topology.dest(e)) - self.position(self.topology.origin(e))
    }

    /// Compute the midpoint of an edge.
    pub fn edge_midpoint(&self, e: EdgeId<I>) -> Point3<f64> {
        let p0 = self.position(self.topology.origin(e));
        let p1 = self.position(self.topology.dest(e));
        Point3::from((p0.coords + p1.coords) * 0.5)
    }

    // ==================== Support queries ====================

    /// Find the vertex furthest along `dir`.
    ///
    /// Climbs from vertex to neighbor through the vertex stars; on a convex
    /// shape every local maximum is global.
    pub fn support_vertex(&self, dir: &Vector3<f64>) -> VertexId<I> {
        let start = self.topology.origin(EdgeId::new(0));
        self.support_vertex_from(dir, start)
    }

    /// Find the vertex furthest along `dir`, starting the climb at `hint`.
    ///
    /// A hint close to the answer (for instance the result of the previous
    /// frame) keeps the walk short.
    pub fn support_vertex_from(&self, dir: &Vector3<f64>, hint: VertexId<I>) -> VertexId<I> {
        let mut best = if self.topology.vertex(hint).edge.is_valid() {
            hint
        } else {
            self.topology.origin(EdgeId::new(0))
        };
        let mut best_dot = self.position(best).coords.dot(dir);

        loop {
            let mut improved = false;
            for n in self.topology.vertex_neighbors(best) {
                let d = self.position(n).coords.dot(dir);
                if d > best_dot {
                    best = n;
                    best_dot = d;
                    improved = true;
                }
            }
            if !improved {
                return best;
            }
        }
    }

    /// Position of the vertex furthest along `dir`.
    pub fn support_point(&self, dir: &Vector3<f64>) -> Point3<f64> {
        *self.position(self.support_vertex(dir))
    }

    /// Find the face whose outward normal is most aligned with `dir`.
    pub fn support_face(&self, dir: &Vector3<f64>) -> FaceId<I> {
        let mut best = FaceId::new(0);
        let mut best_dot = f64::NEG_INFINITY;
        for f in self.topology.face_ids() {
            let d = self.face_normal(f).dot(dir);
            if d > best_dot {
                best = f;
                best_dot = d;
            }
        }
        best
    }

    /// Check that every vertex lies on or behind every face plane.
    pub fn is_convex(&self, eps: f64) -> bool {
        self.topology.face_ids().all(|f| {
            self.topology
                .vertex_ids()
                .all(|v| self.face_plane_distance(f, self.position(v)) <= eps)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives;

    fn cube() -> ConvexPolyhedron {
        ConvexPolyhedron::from_table(primitives::cube()).unwrap()
    }

    #[test]
    fn test_cube_normals() {
        let c = cube();
        let expected = [
            Vector3::new(0.0, 0.0, -1.0),
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(0.0, -1.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(-1.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
        ];
        for (i, n) in expected.iter().enumerate() {
            let normal = c.face_normal(FaceId::new(i));
            assert!((normal - n).norm() < 1e-12, "face {} normal {:?}", i, normal);
        }
    }

    #[test]
    fn test_face_centroid() {
        let c = cube();
        let centroid = c.face_centroid(FaceId::new(1));
        assert!((centroid - Point3::new(0.0, 0.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_cube_support_vertex() {
        let c = cube();
        assert_eq!(c.support_vertex(&Vector3::new(1.0, 1.0, 1.0)).index(), 6);
        assert_eq!(c.support_vertex(&Vector3::new(-1.0, -1.0, -1.0)).index(), 0);
        assert_eq!(c.support_vertex(&Vector3::new(1.0, -1.0, 1.0)).index(), 5);
    }

    #[test]
    fn test_support_matches_brute_force() {
        let p: ConvexPolyhedron = ConvexPolyhedron::from_table(primitives::prism(16)).unwrap();
        for i in 0..64 {
            let theta = i as f64 * 0.37;
            let phi = i as f64 * 0.11 - 1.5;
            let dir = Vector3::new(theta.cos() * phi.cos(), theta.sin() * phi.cos(), phi.sin());

            let climbed = p.support_point(&dir).coords.dot(&dir);
            let brute = p
                .points()
                .iter()
                .map(|q| q.coords.dot(&dir))
                .fold(f64::NEG_INFINITY, f64::max);
            assert!((climbed - brute).abs() < 1e-12, "direction {:?}", dir);
        }
    }

    #[test]
    fn test_support_from_hint() {
        let p: ConvexPolyhedron = ConvexPolyhedron::from_table(primitives::pyramid(10)).unwrap();
        let apex = VertexId::new(10);
        let dir = Vector3::new(0.0, 0.0, 1.0);
        for v in p.topology().vertex_ids() {
            assert_eq!(p.support_vertex_from(&dir, v), apex);
        }
    }

    #[test]
    fn test_support_face() {
        let c = cube();
        assert_eq!(c.support_face(&Vector3::new(0.1, 0.2, 1.0)).index(), 1);
        assert_eq!(c.support_face(&Vector3::new(-1.0, 0.2, 0.1)).index(), 4);
    }

    #[test]
    fn test_edges() {
        let c = cube();
        let e = c.topology().find_edge(VertexId::new(0), VertexId::new(1)).unwrap();
        assert_eq!(c.edge_vector(e), Vector3::new(2.0, 0.0, 0.0));
        assert_eq!(c.edge_midpoint(e), Point3::new(0.0, -1.0, -1.0));
    }

    #[test]
    fn test_is_convex() {
        assert!(cube().is_convex(1e-9));

        // Push the apex through the base: same topology, no longer convex.
        let (mut points, faces) = primitives::pyramid(4);
        points[4].z = -0.5;
        let inverted: ConvexPolyhedron = ConvexPolyhedron::new(points, &faces).unwrap();
        assert!(!inverted.is_convex(1e-9));
    }
}
