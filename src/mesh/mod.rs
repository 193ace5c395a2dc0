//! Core half-edge data structures.
//!
//! This module provides the half-edge representation of closed polyhedra and
//! the builder that produces it from a face table.
//!
//! # Overview
//!
//! The primary type is [`HalfEdgeStructure`], an immutable arena of vertex,
//! half-edge and face records cross-referenced by index. It gives O(1)
//! navigation: twin, next, owning face and origin vertex of every half-edge,
//! plus an entry edge for every face walk and every vertex star.
//!
//! # Index Types
//!
//! Elements are identified by type-safe index wrappers:
//! - [`VertexId`] - Identifies a vertex
//! - [`EdgeId`] - Identifies a half-edge
//! - [`FaceId`] - Identifies a face
//!
//! These indices are generic over the underlying integer type ([`MeshIndex`] trait),
//! allowing you to choose `u16`, `u32`, or `u64`.
//!
//! # Construction
//!
//! ```
//! use hullmesh::mesh::{build, HalfEdgeStructure};
//!
//! // A square pyramid: base first, then the four sides.
//! let faces: Vec<Vec<usize>> = vec![
//!     vec![3, 2, 1, 0],
//!     vec![0, 1, 4],
//!     vec![1, 2, 4],
//!     vec![2, 3, 4],
//!     vec![3, 0, 4],
//! ];
//!
//! let pyramid: HalfEdgeStructure = build(&faces, 5).unwrap();
//! assert_eq!(pyramid.num_undirected_edges(), 8);
//! ```

mod builder;
mod index;
mod structure;
mod validate;

pub use builder::{build, build_with_hasher, build_with_options, BuildOptions};
pub use index::{EdgeId, FaceId, MeshIndex, VertexId};
pub use structure::{Edge, Face, FaceEdgeIter, HalfEdgeStructure, Vertex, VertexStarIter};
