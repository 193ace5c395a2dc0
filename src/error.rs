//! Error types for hullmesh.
//!
//! Every failure detected while building a half-edge structure is reported
//! through [`TopologyError`]. A build either returns a fully linked structure
//! or one of these errors, never a partially linked result.

use thiserror::Error;

/// Result type alias using [`TopologyError`].
pub type Result<T> = std::result::Result<T, TopologyError>;

/// Errors that can occur while building or loading a polyhedron.
#[derive(Error, Debug)]
pub enum TopologyError {
    /// The face table is empty.
    #[error("face table is empty")]
    EmptyInput,

    /// A face references a vertex outside the vertex table.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A face has fewer than three vertices, or repeats a vertex.
    #[error("face {face} is degenerate ({len} vertices, or a repeated vertex)")]
    DegenerateFace {
        /// The face index.
        face: usize,
        /// Number of vertices listed for the face.
        len: usize,
    },

    /// The same directed edge was listed by two faces with the same winding.
    #[error("directed edge ({v0}, {v1}) appears more than once (second time in face {face})")]
    MalformedTopology {
        /// The face where the duplicate was observed.
        face: usize,
        /// Origin vertex of the directed edge.
        v0: usize,
        /// Destination vertex of the directed edge.
        v1: usize,
    },

    /// A directed edge whose reverse is never listed by any face.
    #[error("directed edge ({v0}, {v1}) of face {face} has no twin")]
    UnmatchedEdge {
        /// The face that owns the unmatched edge.
        face: usize,
        /// Origin vertex of the directed edge.
        v0: usize,
        /// Destination vertex of the directed edge.
        v1: usize,
    },

    /// A vertex is not referenced by any face.
    #[error("vertex {vertex} is not referenced by any face")]
    IsolatedVertex {
        /// The isolated vertex.
        vertex: usize,
    },

    /// Faces around a vertex form more than one fan (a pinched vertex).
    #[error("vertex {vertex} is non-manifold: its star reaches {reached} of {outgoing} outgoing edges")]
    NonManifoldVertex {
        /// The pinched vertex.
        vertex: usize,
        /// Outgoing half-edges reached by walking the star.
        reached: usize,
        /// Outgoing half-edges in total.
        outgoing: usize,
    },

    /// An element count does not fit in the chosen index type.
    #[error("{count} elements exceed the index capacity of {max}")]
    IndexOverflow {
        /// The number of elements requested.
        count: usize,
        /// The largest representable index.
        max: usize,
    },

    /// Post-build validation found a broken invariant.
    #[error("invariant violated: {message}")]
    InvariantViolation {
        /// Description of the violated invariant.
        message: String,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed input file.
    #[error("parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },
}

impl TopologyError {
    /// Create an invariant violation error.
    pub fn invariant<T: Into<String>>(message: T) -> Self {
        TopologyError::InvariantViolation {
            message: message.into(),
        }
    }
}
