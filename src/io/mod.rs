//! Face table input.
//!
//! Polyhedra can be read from Wavefront OBJ files. The half-edge structure
//! itself is never written out; only the face table it is built from is read.
//!
//! ```no_run
//! use hullmesh::io::obj;
//! use hullmesh::mesh::{build, HalfEdgeStructure};
//!
//! let (points, faces) = obj::load("hull.obj").unwrap();
//! let structure: HalfEdgeStructure = build(&faces, points.len()).unwrap();
//! ```

pub mod obj;
