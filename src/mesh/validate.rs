//! Structural invariant checks.
//!
//! Edge, face and vertex checks are independent of each other and run in
//! parallel. The first violation in index order is the one reported.

use rayon::prelude::*;

use super::index::{EdgeId, FaceId, MeshIndex, VertexId};
use super::structure::HalfEdgeStructure;
use crate::error::{Result, TopologyError};

impl<I: MeshIndex> HalfEdgeStructure<I> {
    /// Check if every connectivity invariant holds.
    pub fn is_valid(&self) -> bool {
        self.check_invariants().is_ok()
    }

    /// Verify the connectivity invariants of the structure.
    ///
    /// - the half-edge count is even and equals the total face degree
    /// - `twin(twin(e)) == e`, and twins run between the same two vertices
    /// - `next` stays on the owning face
    /// - every face walk closes after exactly `degree(f)` steps and visits
    ///   the face's vertex loop in order
    /// - every vertex star starts at an edge leaving the vertex and closes
    ///   after exactly `degree(v)` steps
    ///
    /// Vertices without an edge (tolerated isolated vertices) are skipped.
    pub fn check_invariants(&self) -> Result<()> {
        let total_degree: usize = self.faces.iter().map(|f| f.degree()).sum();
        if self.edges.len() % 2 != 0 {
            return Err(TopologyError::invariant(format!(
                "odd half-edge count {}",
                self.edges.len()
            )));
        }
        if self.edges.len() != total_degree {
            return Err(TopologyError::invariant(format!(
                "{} half-edges for a total face degree of {}",
                self.edges.len(),
                total_degree
            )));
        }

        if let Some(message) = (0..self.edges.len())
            .into_par_iter()
            .find_map_first(|i| self.check_edge(EdgeId::new(i)))
        {
            return Err(TopologyError::invariant(message));
        }

        if let Some(message) = (0..self.faces.len())
            .into_par_iter()
            .find_map_first(|i| self.check_face(FaceId::new(i)))
        {
            return Err(TopologyError::invariant(message));
        }

        let mut out_degree = vec![0usize; self.vertices.len()];
        for edge in &self.edges {
            match out_degree.get_mut(edge.origin.index()) {
                Some(d) => *d += 1,
                None => {
                    return Err(TopologyError::invariant(format!(
                        "half-edge origin {:?} out of range",
                        edge.origin
                    )))
                }
            }
        }

        if let Some(message) = (0..self.vertices.len())
            .into_par_iter()
            .find_map_first(|i| self.check_vertex(VertexId::new(i), out_degree[i]))
        {
            return Err(TopologyError::invariant(message));
        }

        Ok(())
    }

    fn check_edge(&self, e: EdgeId<I>) -> Option<String> {
        let edge = self.edge(e);
        let Some(twin) = self.get_edge(edge.twin) else {
            return Some(format!("{:?} has twin {:?} out of range", e, edge.twin));
        };
        let Some(next) = self.get_edge(edge.next) else {
            return Some(format!("{:?} has next {:?} out of range", e, edge.next));
        };

        if edge.twin == e {
            return Some(format!("{:?} is its own twin", e));
        }
        if twin.twin != e {
            return Some(format!(
                "twin of {:?} is {:?}, whose twin is {:?}",
                e, edge.twin, twin.twin
            ));
        }
        if next.face != edge.face {
            return Some(format!(
                "{:?} on {:?} is followed by {:?} on {:?}",
                e, edge.face, edge.next, next.face
            ));
        }
        // The twin must run from this edge's destination back to its origin.
        if twin.origin != next.origin {
            return Some(format!(
                "{:?} ends at {:?} but its twin starts at {:?}",
                e, next.origin, twin.origin
            ));
        }
        None
    }

    fn check_face(&self, f: FaceId<I>) -> Option<String> {
        let face = self.face(f);
        if self.get_edge(face.edge).is_none() {
            return Some(format!("{:?} has entry edge {:?} out of range", f, face.edge));
        }

        let mut e = face.edge;
        for (step, &expected) in face.vertices.iter().enumerate() {
            if step > 0 && e == face.edge {
                return Some(format!("{:?} closes after {} of {} edges", f, step, face.degree()));
            }
            let edge = self.edge(e);
            if edge.face != f {
                return Some(format!("{:?} walks onto {:?} owned by {:?}", f, e, edge.face));
            }
            if edge.origin != expected {
                return Some(format!(
                    "{:?} step {} starts at {:?}, expected {:?}",
                    f, step, edge.origin, expected
                ));
            }
            e = edge.next;
        }

        if e != face.edge {
            return Some(format!("{:?} does not close after {} edges", f, face.degree()));
        }
        None
    }

    fn check_vertex(&self, v: VertexId<I>, degree: usize) -> Option<String> {
        let start = self.vertex(v).edge;
        if !start.is_valid() {
            return None;
        }
        if self.get_edge(start).is_none() {
            return Some(format!("{:?} has edge {:?} out of range", v, start));
        }
        if self.origin(start) != v {
            return Some(format!("{:?} is pinned to {:?}, which leaves {:?}", v, start, self.origin(start)));
        }

        let mut e = start;
        for step in 0..degree {
            if step > 0 && e == start {
                return Some(format!("star of {:?} closes after {} of {} edges", v, step, degree));
            }
            if self.origin(e) != v {
                return Some(format!("star of {:?} reaches {:?} leaving {:?}", v, e, self.origin(e)));
            }
            e = self.next(self.twin(e));
        }

        if e != start {
            return Some(format!("star of {:?} does not close after {} edges", v, degree));
        }
        None
    }
}
