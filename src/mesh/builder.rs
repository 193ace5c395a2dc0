//! Half-edge construction from face tables.
//!
//! The builder consumes an ordered list of faces, each a counter-clockwise
//! loop of vertex indices, and links every half-edge to its twin, its
//! successor around the face, its origin vertex and its owning face.
//!
//! # Algorithm
//!
//! Faces are walked in input order. Every consecutive vertex pair `(a, b)`
//! of a face is a directed edge observation. The first observation of an
//! undirected edge is parked in a scratch table; when the reverse `(b, a)`
//! arrives from the neighboring face, both half-edges are committed to two
//! fresh adjacent slots:
//!
//! - slot `2k` receives the half-edge observed first,
//! - slot `2k + 1` receives the half-edge observed second,
//! - each half-edge's twin is the other slot.
//!
//! A vertex is pinned to the first committed half-edge leaving it, which is
//! also the lowest-indexed one, and is never re-pinned.
//!
//! Successors are recorded per directed edge while walking each face, since
//! commit order does not follow face order. Once every face has been walked
//! they are resolved to slots, together with each face's first edge.
//!
//! Everything is decided by input order alone, so the result does not depend
//! on the hasher used for the scratch tables.

use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::hash::BuildHasher;

use super::index::{EdgeId, FaceId, MeshIndex, VertexId};
use super::structure::{Edge, Face, HalfEdgeStructure, Vertex};
use crate::error::{Result, TopologyError};

/// Options controlling half-edge construction.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Accept vertices that no face references.
    ///
    /// Such vertices keep an invalid `edge` and have an empty star.
    pub allow_isolated_vertices: bool,

    /// Run the full invariant check on the finished structure.
    /// Defaults to on in debug builds.
    pub validate: bool,

    /// Expected number of half-edges, used to pre-size scratch storage.
    /// When unset the total face degree is used.
    pub edge_capacity_hint: Option<usize>,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            allow_isolated_vertices: false,
            validate: cfg!(debug_assertions),
            edge_capacity_hint: None,
        }
    }
}

impl BuildOptions {
    /// Create options that tolerate isolated vertices.
    pub fn allow_isolated_vertices(mut self) -> Self {
        self.allow_isolated_vertices = true;
        self
    }

    /// Set whether to validate the finished structure.
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Set the expected number of half-edges.
    pub fn with_edge_capacity(mut self, edges: usize) -> Self {
        self.edge_capacity_hint = Some(edges);
        self
    }
}

/// Build a half-edge structure from a face table.
///
/// # Arguments
/// * `faces` - Faces in order, each a counter-clockwise loop of vertex indices
/// * `vertex_count` - Number of vertices the indices refer to
///
/// # Returns
/// The fully linked structure, or the first topology error found.
///
/// # Example
/// ```
/// use hullmesh::mesh::{build, HalfEdgeStructure};
///
/// let faces: Vec<Vec<usize>> = vec![vec![0, 2, 1], vec![0, 1, 3], vec![1, 2, 3], vec![2, 0, 3]];
/// let tetra: HalfEdgeStructure = build(&faces, 4).unwrap();
///
/// assert_eq!(tetra.num_edges(), 12);
/// assert_eq!(tetra.num_undirected_edges(), 6);
/// ```
pub fn build<I, F>(faces: &[F], vertex_count: usize) -> Result<HalfEdgeStructure<I>>
where
    I: MeshIndex,
    F: AsRef<[usize]>,
{
    build_with_options(faces, vertex_count, &BuildOptions::default())
}

/// Build a half-edge structure with explicit options.
pub fn build_with_options<I, F>(
    faces: &[F],
    vertex_count: usize,
    options: &BuildOptions,
) -> Result<HalfEdgeStructure<I>>
where
    I: MeshIndex,
    F: AsRef<[usize]>,
{
    build_with_hasher::<RandomState, I, F>(faces, vertex_count, options)
}

/// Build a half-edge structure using `S` to hash the scratch tables.
///
/// The result is identical for every hasher, including degenerate ones that
/// send all keys to the same bucket.
pub fn build_with_hasher<S, I, F>(
    faces: &[F],
    vertex_count: usize,
    options: &BuildOptions,
) -> Result<HalfEdgeStructure<I>>
where
    S: BuildHasher + Default,
    I: MeshIndex,
    F: AsRef<[usize]>,
{
    if faces.is_empty() {
        return Err(TopologyError::EmptyInput);
    }

    check_index_width::<I>(vertex_count)?;
    check_index_width::<I>(faces.len())?;
    let total_degree = check_faces(faces, vertex_count)?;
    check_index_width::<I>(total_degree)?;

    log::debug!(
        "building half-edge structure: {} faces, {} vertices, {} directed edges",
        faces.len(),
        vertex_count,
        total_degree
    );

    let capacity = options.edge_capacity_hint.unwrap_or(total_degree);
    let mut builder = Builder::<I, S>::new(vertex_count, faces.len(), capacity);

    // First pass: observe every directed edge, committing twin pairs as they close
    for (fi, face) in faces.iter().enumerate() {
        builder.walk_face(fi, face.as_ref())?;
    }

    // Every observation must have met its reverse
    builder.check_unmatched()?;

    // Second pass: resolve successors and face entry edges to slots
    let structure = builder.finish(options)?;

    // Closed and consistently wound is not enough: every star must be one fan
    check_vertex_stars(&structure)?;

    log::debug!(
        "built half-edge structure: {} half-edges, {} edges",
        structure.num_edges(),
        structure.num_undirected_edges()
    );

    if options.validate {
        structure.check_invariants()?;
    }

    Ok(structure)
}

/// Validate face loops and return the total face degree.
fn check_faces<F: AsRef<[usize]>>(faces: &[F], vertex_count: usize) -> Result<usize> {
    // Face index that last touched each vertex, to spot repeats in O(1)
    let mut last_seen = vec![usize::MAX; vertex_count];
    let mut total = 0;

    for (fi, face) in faces.iter().enumerate() {
        let face = face.as_ref();
        if face.len() < 3 {
            return Err(TopologyError::DegenerateFace {
                face: fi,
                len: face.len(),
            });
        }
        for &vi in face {
            if vi >= vertex_count {
                return Err(TopologyError::InvalidVertexIndex { face: fi, vertex: vi });
            }
            if last_seen[vi] == fi {
                return Err(TopologyError::DegenerateFace {
                    face: fi,
                    len: face.len(),
                });
            }
            last_seen[vi] = fi;
        }
        total += face.len();
    }

    Ok(total)
}

/// Reject vertices whose star walk misses some of their outgoing half-edges.
fn check_vertex_stars<I: MeshIndex>(structure: &HalfEdgeStructure<I>) -> Result<()> {
    let mut outgoing = vec![0usize; structure.num_vertices()];
    for edge in structure.edges() {
        outgoing[edge.origin.index()] += 1;
    }

    for v in structure.vertex_ids() {
        let expected = outgoing[v.index()];
        let reached = structure.vertex_edges(v).take(expected + 1).count();
        if reached != expected {
            return Err(TopologyError::NonManifoldVertex {
                vertex: v.index(),
                reached,
                outgoing: expected,
            });
        }
    }

    Ok(())
}

fn check_index_width<I: MeshIndex>(count: usize) -> Result<()> {
    if I::fits(count) {
        Ok(())
    } else {
        Err(TopologyError::IndexOverflow {
            count,
            max: I::MAX.to_usize(),
        })
    }
}

/// An ordered vertex pair identifying one half-edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct DirectedEdge {
    from: usize,
    to: usize,
}

impl DirectedEdge {
    #[inline]
    fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    #[inline]
    fn reversed(self) -> Self {
        Self::new(self.to, self.from)
    }
}

/// A half-edge waiting for its twin.
#[derive(Debug, Clone, Copy)]
struct Pending<I: MeshIndex> {
    edge: Edge<I>,
    /// Position in the global observation sequence.
    order: usize,
}

/// Construction state; lives for a single build call.
struct Builder<I: MeshIndex, S> {
    vertices: Vec<Vertex<I>>,
    edges: Vec<Edge<I>>,
    /// Key of the half-edge stored in each slot.
    slot_keys: Vec<DirectedEdge>,
    /// First directed edge of each face's walk.
    face_entries: Vec<DirectedEdge>,
    face_loops: Vec<Vec<VertexId<I>>>,

    pending: HashMap<DirectedEdge, Pending<I>, S>,
    slots: HashMap<DirectedEdge, EdgeId<I>, S>,
    successors: HashMap<DirectedEdge, DirectedEdge, S>,
    observed: usize,
}

impl<I: MeshIndex, S: BuildHasher + Default> Builder<I, S> {
    fn new(vertex_count: usize, face_count: usize, edge_capacity: usize) -> Self {
        let mut pending = HashMap::with_hasher(S::default());
        pending.reserve(edge_capacity / 2);
        let mut slots = HashMap::with_hasher(S::default());
        slots.reserve(edge_capacity);
        let mut successors = HashMap::with_hasher(S::default());
        successors.reserve(edge_capacity);

        Self {
            vertices: vec![Vertex::default(); vertex_count],
            edges: Vec::with_capacity(edge_capacity),
            slot_keys: Vec::with_capacity(edge_capacity),
            face_entries: Vec::with_capacity(face_count),
            face_loops: Vec::with_capacity(face_count),
            pending,
            slots,
            successors,
            observed: 0,
        }
    }

    /// Observe every directed edge of one face.
    fn walk_face(&mut self, fi: usize, face: &[usize]) -> Result<()> {
        let n = face.len();
        let face_id = FaceId::<I>::new(fi);

        self.face_entries.push(DirectedEdge::new(face[0], face[1]));
        self.face_loops
            .push(face.iter().map(|&v| VertexId::new(v)).collect());

        for i in 0..n {
            let a = face[i];
            let b = face[(i + 1) % n];
            let c = face[(i + 2) % n];
            let key = DirectedEdge::new(a, b);

            if self.pending.contains_key(&key) || self.slots.contains_key(&key) {
                return Err(TopologyError::MalformedTopology { face: fi, v0: a, v1: b });
            }

            self.successors.insert(key, DirectedEdge::new(b, c));

            let edge = Edge::provisional(VertexId::new(a), face_id);
            match self.pending.remove(&key.reversed()) {
                Some(earlier) => self.commit(earlier.edge, key.reversed(), edge, key),
                None => {
                    self.pending.insert(
                        key,
                        Pending {
                            edge,
                            order: self.observed,
                        },
                    );
                }
            }
            self.observed += 1;
        }

        Ok(())
    }

    /// Store a matched pair in the next two slots and link them as twins.
    fn commit(
        &mut self,
        mut first: Edge<I>,
        first_key: DirectedEdge,
        mut second: Edge<I>,
        second_key: DirectedEdge,
    ) {
        let a = EdgeId::<I>::new(self.edges.len());
        let b = EdgeId::<I>::new(self.edges.len() + 1);

        first.twin = b;
        second.twin = a;

        log::trace!(
            "commit {:?} -> {:?} as {:?}/{:?}",
            first.origin,
            second.origin,
            a,
            b
        );

        self.pin(first.origin, a);
        self.pin(second.origin, b);

        self.edges.push(first);
        self.edges.push(second);
        self.slot_keys.push(first_key);
        self.slot_keys.push(second_key);
        self.slots.insert(first_key, a);
        self.slots.insert(second_key, b);
    }

    /// Pin a vertex to its first committed outgoing half-edge.
    #[inline]
    fn pin(&mut self, v: VertexId<I>, e: EdgeId<I>) {
        let vertex = &mut self.vertices[v.index()];
        if !vertex.edge.is_valid() {
            vertex.edge = e;
        }
    }

    /// Fail with the earliest observation whose reverse never showed up.
    fn check_unmatched(&self) -> Result<()> {
        let first = self
            .pending
            .iter()
            .min_by_key(|(_, pending)| pending.order);

        match first {
            Some((key, pending)) => Err(TopologyError::UnmatchedEdge {
                face: pending.edge.face.index(),
                v0: key.from,
                v1: key.to,
            }),
            None => Ok(()),
        }
    }

    fn slot_of(&self, key: &DirectedEdge) -> Result<EdgeId<I>> {
        self.slots.get(key).copied().ok_or_else(|| {
            TopologyError::invariant(format!(
                "directed edge ({}, {}) was never committed",
                key.from, key.to
            ))
        })
    }

    /// Resolve successor keys and face entries, and assemble the structure.
    fn finish(mut self, options: &BuildOptions) -> Result<HalfEdgeStructure<I>> {
        for i in 0..self.edges.len() {
            let key = self.slot_keys[i];
            let successor = self.successors.get(&key).copied().ok_or_else(|| {
                TopologyError::invariant(format!(
                    "directed edge ({}, {}) has no recorded successor",
                    key.from, key.to
                ))
            })?;
            let next = self.slot_of(&successor)?;
            self.edges[i].next = next;
        }

        let loops = std::mem::take(&mut self.face_loops);
        let mut faces = Vec::with_capacity(loops.len());
        for (entry, vertices) in self.face_entries.iter().zip(loops) {
            faces.push(Face {
                vertices,
                edge: self.slot_of(entry)?,
            });
        }

        for (vi, vertex) in self.vertices.iter().enumerate() {
            if vertex.edge.is_valid() {
                continue;
            }
            if options.allow_isolated_vertices {
                log::warn!("vertex {} is not referenced by any face", vi);
            } else {
                return Err(TopologyError::IsolatedVertex { vertex: vi });
            }
        }

        Ok(HalfEdgeStructure {
            vertices: self.vertices,
            edges: self.edges,
            faces,
        })
    }
}
