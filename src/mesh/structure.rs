//! Half-edge structure for closed polyhedra.
//!
//! This module provides the immutable half-edge (doubly-connected edge list)
//! representation produced by the builder. It enables O(1) adjacency queries
//! and is the foundation for the support-point and clipping queries on convex
//! shapes.
//!
//! # Structure
//!
//! - Each undirected edge is split into two **half-edges** pointing in opposite
//!   directions, one owned by each bordering face
//! - Each half-edge knows its **twin** (opposite half-edge), **next** (next
//!   half-edge around its face), **origin vertex**, and **owning face**
//! - Each vertex stores one outgoing half-edge
//! - Each face stores its input vertex loop and one half-edge on its boundary
//!
//! Twins are always stored in adjacent slots `2k` and `2k + 1`.
//!
//! # Panics
//!
//! Accessors taking an id index directly into the backing arrays and panic on
//! out-of-range ids. Use the `get_*` variants when the id is untrusted.

use super::index::{EdgeId, FaceId, MeshIndex, VertexId};

/// A vertex of the structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vertex<I: MeshIndex = u32> {
    /// One outgoing half-edge from this vertex; entry point of a star walk.
    ///
    /// Invalid only for isolated vertices, which the builder rejects unless
    /// explicitly allowed.
    pub edge: EdgeId<I>,
}

impl<I: MeshIndex> Default for Vertex<I> {
    fn default() -> Self {
        Self {
            edge: EdgeId::invalid(),
        }
    }
}

/// A half-edge of the structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge<I: MeshIndex = u32> {
    /// The vertex this half-edge originates from.
    pub origin: VertexId<I>,

    /// The face this half-edge belongs to.
    pub face: FaceId<I>,

    /// The opposite half-edge, owned by the adjacent face.
    pub twin: EdgeId<I>,

    /// The next half-edge around the owning face (counter-clockwise).
    pub next: EdgeId<I>,
}

impl<I: MeshIndex> Edge<I> {
    /// Create a provisional half-edge with unresolved links.
    pub(crate) fn provisional(origin: VertexId<I>, face: FaceId<I>) -> Self {
        Self {
            origin,
            face,
            twin: EdgeId::invalid(),
            next: EdgeId::invalid(),
        }
    }
}

/// A face of the structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face<I: MeshIndex = u32> {
    /// The vertex loop of this face, counter-clockwise seen from outside.
    pub vertices: Vec<VertexId<I>>,

    /// The half-edge leaving `vertices[0]` along this face.
    pub edge: EdgeId<I>,
}

impl<I: MeshIndex> Face<I> {
    /// Number of vertices (and half-edges) of this face.
    #[inline]
    pub fn degree(&self) -> usize {
        self.vertices.len()
    }
}

/// An immutable half-edge structure.
///
/// Built once by [`build`](super::build) and read-only afterwards. The
/// structure owns all records; cross references are plain indices, so it is
/// `Send + Sync` and can be traversed from several threads at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HalfEdgeStructure<I: MeshIndex = u32> {
    pub(crate) vertices: Vec<Vertex<I>>,
    pub(crate) edges: Vec<Edge<I>>,
    pub(crate) faces: Vec<Face<I>>,
}

impl<I: MeshIndex> HalfEdgeStructure<I> {
    // ==================== Counts ====================

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of half-edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Get the number of undirected edges.
    #[inline]
    pub fn num_undirected_edges(&self) -> usize {
        self.edges.len() / 2
    }

    /// Get the number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Euler characteristic `V - E + F`; equals 2 for any convex polyhedron.
    pub fn euler_characteristic(&self) -> i64 {
        self.num_vertices() as i64 - self.num_undirected_edges() as i64 + self.num_faces() as i64
    }

    // ==================== Records ====================

    /// Get a vertex by ID.
    #[inline]
    pub fn vertex(&self, id: VertexId<I>) -> &Vertex<I> {
        &self.vertices[id.index()]
    }

    /// Get a half-edge by ID.
    #[inline]
    pub fn edge(&self, id: EdgeId<I>) -> &Edge<I> {
        &self.edges[id.index()]
    }

    /// Get a face by ID.
    #[inline]
    pub fn face(&self, id: FaceId<I>) -> &Face<I> {
        &self.faces[id.index()]
    }

    /// Get a vertex by ID, or `None` if out of range.
    pub fn get_vertex(&self, id: VertexId<I>) -> Option<&Vertex<I>> {
        self.vertices.get(id.index())
    }

    /// Get a half-edge by ID, or `None` if out of range.
    pub fn get_edge(&self, id: EdgeId<I>) -> Option<&Edge<I>> {
        self.edges.get(id.index())
    }

    /// Get a face by ID, or `None` if out of range.
    pub fn get_face(&self, id: FaceId<I>) -> Option<&Face<I>> {
        self.faces.get(id.index())
    }

    /// All half-edges as a slice, indexed by [`EdgeId::index`].
    pub fn edges(&self) -> &[Edge<I>] {
        &self.edges
    }

    // ==================== Navigation ====================

    /// Get the twin (opposite) half-edge.
    #[inline]
    pub fn twin(&self, e: EdgeId<I>) -> EdgeId<I> {
        self.edge(e).twin
    }

    /// Get the next half-edge around the owning face.
    #[inline]
    pub fn next(&self, e: EdgeId<I>) -> EdgeId<I> {
        self.edge(e).next
    }

    /// Get the previous half-edge around the owning face.
    ///
    /// No `prev` link is stored, so this walks the face: O(face degree).
    pub fn prev(&self, e: EdgeId<I>) -> EdgeId<I> {
        let mut cur = e;
        loop {
            let nxt = self.next(cur);
            if nxt == e {
                return cur;
            }
            cur = nxt;
        }
    }

    /// Get the origin vertex of a half-edge.
    #[inline]
    pub fn origin(&self, e: EdgeId<I>) -> VertexId<I> {
        self.edge(e).origin
    }

    /// Get the destination vertex of a half-edge.
    #[inline]
    pub fn dest(&self, e: EdgeId<I>) -> VertexId<I> {
        self.origin(self.twin(e))
    }

    /// Get the face owning a half-edge.
    #[inline]
    pub fn face_of(&self, e: EdgeId<I>) -> FaceId<I> {
        self.edge(e).face
    }

    /// Get the face on the other side of a half-edge.
    #[inline]
    pub fn adjacent_face(&self, e: EdgeId<I>) -> FaceId<I> {
        self.face_of(self.twin(e))
    }

    /// Find the half-edge going from `from` to `to`, if the two vertices are adjacent.
    pub fn find_edge(&self, from: VertexId<I>, to: VertexId<I>) -> Option<EdgeId<I>> {
        self.vertex_edges(from).find(|&e| self.dest(e) == to)
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex IDs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        (0..self.vertices.len()).map(VertexId::new)
    }

    /// Iterate over all half-edge IDs.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId<I>> + '_ {
        (0..self.edges.len()).map(EdgeId::new)
    }

    /// Iterate over all face IDs.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId<I>> + '_ {
        (0..self.faces.len()).map(FaceId::new)
    }

    /// Iterate over the outgoing half-edges of a vertex (its star).
    pub fn vertex_edges(&self, v: VertexId<I>) -> VertexStarIter<'_, I> {
        VertexStarIter::new(self, v)
    }

    /// Iterate over vertices adjacent to a vertex.
    pub fn vertex_neighbors(&self, v: VertexId<I>) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.vertex_edges(v).map(|e| self.dest(e))
    }

    /// Iterate over faces incident to a vertex.
    pub fn vertex_faces(&self, v: VertexId<I>) -> impl Iterator<Item = FaceId<I>> + '_ {
        self.vertex_edges(v).map(|e| self.face_of(e))
    }

    /// Iterate over the half-edges bounding a face.
    pub fn face_edges(&self, f: FaceId<I>) -> FaceEdgeIter<'_, I> {
        FaceEdgeIter::new(self, f)
    }

    /// Iterate over the vertices of a face, in boundary order.
    pub fn face_vertices(&self, f: FaceId<I>) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.face_edges(f).map(|e| self.origin(e))
    }

    /// Iterate over the faces sharing an edge with a face.
    pub fn face_neighbors(&self, f: FaceId<I>) -> impl Iterator<Item = FaceId<I>> + '_ {
        self.face_edges(f).map(|e| self.adjacent_face(e))
    }

    /// Number of edges around a face.
    #[inline]
    pub fn face_degree(&self, f: FaceId<I>) -> usize {
        self.face(f).degree()
    }

    /// Number of edges leaving a vertex.
    pub fn vertex_degree(&self, v: VertexId<I>) -> usize {
        self.vertex_edges(v).count()
    }
}

/// Iterator over the outgoing half-edges around a vertex.
///
/// Steps with `next(twin(e))`: if `e` goes `v -> w`, its twin goes `w -> v`
/// and the edge following the twin leaves `v` again.
pub struct VertexStarIter<'a, I: MeshIndex = u32> {
    structure: &'a HalfEdgeStructure<I>,
    start: EdgeId<I>,
    current: EdgeId<I>,
    done: bool,
}

impl<'a, I: MeshIndex> VertexStarIter<'a, I> {
    fn new(structure: &'a HalfEdgeStructure<I>, v: VertexId<I>) -> Self {
        let start = structure.vertex(v).edge;
        Self {
            structure,
            start,
            current: start,
            done: !start.is_valid(),
        }
    }
}

impl<'a, I: MeshIndex> Iterator for VertexStarIter<'a, I> {
    type Item = EdgeId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.current;
        self.current = self.structure.next(self.structure.twin(self.current));

        if self.current == self.start {
            self.done = true;
        }

        Some(result)
    }
}

/// Iterator over the half-edges around a face.
pub struct FaceEdgeIter<'a, I: MeshIndex = u32> {
    structure: &'a HalfEdgeStructure<I>,
    start: EdgeId<I>,
    current: EdgeId<I>,
    done: bool,
}

impl<'a, I: MeshIndex> FaceEdgeIter<'a, I> {
    fn new(structure: &'a HalfEdgeStructure<I>, f: FaceId<I>) -> Self {
        let start = structure.face(f).edge;
        Self {
            structure,
            start,
            current: start,
            done: !start.is_valid(),
        }
    }
}

impl<'a, I: MeshIndex> Iterator for FaceEdgeIter<'a, I> {
    type Item = EdgeId<I>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.current;
        self.current = self.structure.next(self.current);

        if self.current == self.start {
            self.done = true;
        }

        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::build;
    use crate::primitives;

    fn cube() -> HalfEdgeStructure {
        let (points, faces) = primitives::cube();
        build(&faces, points.len()).unwrap()
    }

    #[test]
    fn test_counts() {
        let s = cube();
        assert_eq!(s.num_vertices(), 8);
        assert_eq!(s.num_faces(), 6);
        assert_eq!(s.num_edges(), 24);
        assert_eq!(s.num_undirected_edges(), 12);
        assert_eq!(s.euler_characteristic(), 2);
    }

    #[test]
    fn test_prev_inverts_next() {
        let s = cube();
        for e in s.edge_ids() {
            assert_eq!(s.prev(s.next(e)), e);
            assert_eq!(s.next(s.prev(e)), e);
        }
    }

    #[test]
    fn test_face_vertices_match_input_loop() {
        let s = cube();
        for f in s.face_ids() {
            let walked: Vec<_> = s.face_vertices(f).collect();
            assert_eq!(walked, s.face(f).vertices);
        }
    }

    #[test]
    fn test_find_edge() {
        let s = cube();
        let (v0, v1) = (VertexId::new(0), VertexId::new(1));
        let e = s.find_edge(v0, v1).unwrap();
        assert_eq!(s.origin(e), v0);
        assert_eq!(s.dest(e), v1);
        // Opposite corners of the cube are not adjacent.
        assert!(s.find_edge(v0, VertexId::new(6)).is_none());
    }

    #[test]
    fn test_adjacent_faces_differ() {
        let s = cube();
        for e in s.edge_ids() {
            assert_ne!(s.face_of(e), s.adjacent_face(e));
        }
        for f in s.face_ids() {
            assert_eq!(s.face_neighbors(f).count(), 4);
        }
    }

    #[test]
    fn test_get_out_of_range() {
        let s = cube();
        assert!(s.get_edge(EdgeId::new(24)).is_none());
        assert!(s.get_face(FaceId::new(6)).is_none());
        assert!(s.get_vertex(VertexId::new(8)).is_none());
        assert!(s.get_vertex(VertexId::new(7)).is_some());
    }

    #[test]
    #[should_panic]
    fn test_edge_out_of_range_panics() {
        let s = cube();
        let _ = s.edge(EdgeId::new(100));
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HalfEdgeStructure<u32>>();
        assert_send_sync::<HalfEdgeStructure<u16>>();
    }
}
