//! # hullmesh
//!
//! Half-edge connectivity for convex polyhedra.
//!
//! hullmesh turns a face table (faces as counter-clockwise loops of vertex
//! indices) into an immutable half-edge structure with O(1) navigation, the
//! groundwork for support-point queries, face clipping and separating-axis
//! tests on convex shapes.
//!
//! ## Features
//!
//! - **One-shot builder**: twins, successors, vertex and face entry edges
//!   resolved in a single pass over the faces
//! - **Explicit failures**: degenerate faces, duplicated directed edges and
//!   unmatched edges are reported instead of silently dropped
//! - **Deterministic layout**: twins share adjacent slots and the layout
//!   depends only on input order, never on hashing
//! - **Type-safe indices**: 16-, 32- or 64-bit ids for vertices, half-edges and faces
//!
//! ## Quick Start
//!
//! ```
//! use hullmesh::prelude::*;
//!
//! let faces: Vec<Vec<usize>> = vec![
//!     vec![0, 2, 1], // bottom
//!     vec![0, 1, 3], // front
//!     vec![1, 2, 3], // right
//!     vec![2, 0, 3], // left
//! ];
//!
//! let tetra: HalfEdgeStructure = build(&faces, 4).unwrap();
//! assert_eq!(tetra.num_edges(), 12);
//!
//! // Walk the boundary of a face
//! let f = FaceId::new(0);
//! let loop_: Vec<_> = tetra.face_vertices(f).map(|v| v.index()).collect();
//! assert_eq!(loop_, vec![0, 2, 1]);
//!
//! // Walk the star of a vertex
//! let v = VertexId::new(3);
//! assert_eq!(tetra.vertex_edges(v).count(), 3);
//!
//! // Cross an edge to the neighboring face
//! let e = tetra.face(f).edge;
//! assert_ne!(tetra.adjacent_face(e), f);
//! ```
//!
//! ## Convex Shapes
//!
//! ```
//! use hullmesh::prelude::*;
//! use hullmesh::primitives;
//! use nalgebra::Vector3;
//!
//! let prism: ConvexPolyhedron = ConvexPolyhedron::from_table(primitives::prism(6)).unwrap();
//! let top = prism.support_face(&Vector3::z());
//! assert!((prism.face_normal(top) - Vector3::z()).norm() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod io;
pub mod mesh;
pub mod primitives;
pub mod shape;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use hullmesh::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Result, TopologyError};
    pub use crate::mesh::{
        build, build_with_options, BuildOptions, Edge, EdgeId, Face, FaceId, HalfEdgeStructure,
        MeshIndex, Vertex, VertexId,
    };
    pub use crate::shape::ConvexPolyhedron;
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_tetrahedron() {
        let faces: Vec<[usize; 3]> = vec![
            [0, 2, 1], // bottom
            [0, 1, 3], // front
            [1, 2, 3], // right
            [2, 0, 3], // left
        ];

        let s: HalfEdgeStructure = build(&faces, 4).unwrap();

        assert_eq!(s.num_vertices(), 4);
        assert_eq!(s.num_faces(), 4);
        // 4 triangles * 3 half-edges, every edge shared by two faces
        assert_eq!(s.num_edges(), 12);
        assert_eq!(s.num_undirected_edges(), 6);
        assert_eq!(s.euler_characteristic(), 2);
        assert!(s.is_valid());

        for v in s.vertex_ids() {
            assert_eq!(s.vertex_degree(v), 3, "vertex {:?} should have degree 3", v);
        }
    }
}
