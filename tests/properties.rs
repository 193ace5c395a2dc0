//! Structural properties of built half-edge structures.
//!
//! Inputs are the built-in polyhedra plus seeded random relabelings of them:
//! permuted vertex ids, shuffled face order and rotated face loops.

use std::hash::{BuildHasherDefault, Hasher};

use hullmesh::mesh::build_with_hasher;
use hullmesh::prelude::*;
use hullmesh::primitives;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Hashes every key to the same value.
#[derive(Default)]
struct CollidingHasher;

impl Hasher for CollidingHasher {
    fn finish(&self) -> u64 {
        7
    }

    fn write(&mut self, _bytes: &[u8]) {}
}

type Colliding = BuildHasherDefault<CollidingHasher>;

fn shapes() -> Vec<(&'static str, usize, Vec<Vec<usize>>)> {
    let mut out = Vec::new();
    for (name, (points, faces)) in [
        ("tetrahedron", primitives::tetrahedron()),
        ("cube", primitives::cube()),
        ("octahedron", primitives::octahedron()),
        ("prism5", primitives::prism(5)),
        ("prism12", primitives::prism(12)),
        ("pyramid3", primitives::pyramid(3)),
        ("pyramid9", primitives::pyramid(9)),
    ] {
        out.push((name, points.len(), faces));
    }
    out
}

/// Relabel vertices, shuffle faces and rotate every face loop.
fn scramble(rng: &mut StdRng, vertex_count: usize, faces: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let mut perm: Vec<usize> = (0..vertex_count).collect();
    perm.shuffle(rng);

    let mut out: Vec<Vec<usize>> = faces
        .iter()
        .map(|face| {
            let mut face: Vec<usize> = face.iter().map(|&v| perm[v]).collect();
            let shift = rng.random_range(0..face.len());
            face.rotate_left(shift);
            face
        })
        .collect();
    out.shuffle(rng);
    out
}

fn check_properties(name: &str, s: &HalfEdgeStructure, faces: &[Vec<usize>]) {
    // Edge count is even and equals the total face degree.
    let total: usize = faces.iter().map(|f| f.len()).sum();
    assert_eq!(s.num_edges() % 2, 0, "{}", name);
    assert_eq!(s.num_edges(), total, "{}", name);

    // Twin is an involution and reverses the endpoints.
    for e in s.edge_ids() {
        let t = s.twin(e);
        assert_ne!(t, e, "{}", name);
        assert_eq!(s.twin(t), e, "{}", name);
        assert_eq!(s.origin(t), s.origin(s.next(e)), "{}", name);
    }

    // Face walks close after exactly degree(f) steps on the same face.
    for f in s.face_ids() {
        let start = s.face(f).edge;
        let mut e = start;
        for step in 0..s.face_degree(f) {
            assert_eq!(s.face_of(e), f, "{}", name);
            if step > 0 {
                assert_ne!(e, start, "{}: face {:?} closed early", name, f);
            }
            e = s.next(e);
        }
        assert_eq!(e, start, "{}: face {:?} did not close", name, f);
    }

    // Vertex stars close after exactly degree(v) steps and stay on v.
    for v in s.vertex_ids() {
        let degree = s.edge_ids().filter(|&e| s.origin(e) == v).count();
        let start = s.vertex(v).edge;
        let mut e = start;
        for step in 0..degree {
            assert_eq!(s.origin(e), v, "{}", name);
            if step > 0 {
                assert_ne!(e, start, "{}: star of {:?} closed early", name, v);
            }
            e = s.next(s.twin(e));
        }
        assert_eq!(e, start, "{}: star of {:?} did not close", name, v);
        assert_eq!(s.vertex_degree(v), degree, "{}", name);
    }

    assert_eq!(s.euler_characteristic(), 2, "{}", name);
    assert!(s.is_valid(), "{}", name);
}

#[test]
fn test_primitives_satisfy_properties() {
    for (name, vertex_count, faces) in shapes() {
        let s: HalfEdgeStructure = build(&faces, vertex_count).unwrap();
        check_properties(name, &s, &faces);
    }
}

#[test]
fn test_scrambled_inputs_satisfy_properties() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for (name, vertex_count, faces) in shapes() {
        for _ in 0..20 {
            let scrambled = scramble(&mut rng, vertex_count, &faces);
            let s: HalfEdgeStructure = build(&scrambled, vertex_count).unwrap();
            check_properties(name, &s, &scrambled);
        }
    }
}

#[test]
fn test_known_counts() {
    let (points, faces) = primitives::tetrahedron();
    let s: HalfEdgeStructure = build(&faces, points.len()).unwrap();
    assert_eq!((s.num_edges(), s.num_undirected_edges()), (12, 6));
    assert!(s.vertex_ids().all(|v| s.vertex_degree(v) == 3));

    let (points, faces) = primitives::cube();
    let s: HalfEdgeStructure = build(&faces, points.len()).unwrap();
    assert_eq!((s.num_edges(), s.num_undirected_edges()), (24, 12));
    assert!(s.vertex_ids().all(|v| s.vertex_degree(v) == 3));

    let (points, faces) = primitives::pyramid(7);
    let s: HalfEdgeStructure = build(&faces, points.len()).unwrap();
    assert_eq!(s.vertex_degree(VertexId::new(7)), 7);
}

#[test]
fn test_rebuild_is_identical() {
    let mut rng = StdRng::seed_from_u64(17);
    let options = BuildOptions::default();
    for (name, vertex_count, faces) in shapes() {
        let scrambled = scramble(&mut rng, vertex_count, &faces);
        let a: HalfEdgeStructure = build(&scrambled, vertex_count).unwrap();
        let b: HalfEdgeStructure = build(&scrambled, vertex_count).unwrap();
        let c: HalfEdgeStructure =
            build_with_hasher::<Colliding, _, _>(&scrambled, vertex_count, &options).unwrap();
        assert_eq!(a, b, "{}", name);
        assert_eq!(a, c, "{}", name);
    }
}

#[test]
fn test_vertex_pinned_to_lowest_outgoing_edge() {
    let mut rng = StdRng::seed_from_u64(99);
    for (name, vertex_count, faces) in shapes() {
        let scrambled = scramble(&mut rng, vertex_count, &faces);
        let s: HalfEdgeStructure = build(&scrambled, vertex_count).unwrap();
        for v in s.vertex_ids() {
            let lowest = s.edge_ids().find(|&e| s.origin(e) == v).unwrap();
            assert_eq!(s.vertex(v).edge, lowest, "{}", name);
        }
        for e in s.edge_ids() {
            assert_eq!(s.twin(e).index(), e.index() ^ 1, "{}", name);
        }
    }
}

#[test]
fn test_duplicate_directed_edge_is_rejected() {
    let mut rng = StdRng::seed_from_u64(3);
    for (name, vertex_count, faces) in shapes() {
        let mut bad = scramble(&mut rng, vertex_count, &faces);
        let copy = bad[0].clone();
        bad.push(copy);
        let result: Result<HalfEdgeStructure> = build(&bad, vertex_count);
        assert!(
            matches!(result, Err(TopologyError::MalformedTopology { .. })),
            "{}: {:?}",
            name,
            result
        );
    }
}

#[test]
fn test_missing_face_is_unmatched() {
    let mut rng = StdRng::seed_from_u64(4);
    for (name, vertex_count, faces) in shapes() {
        let mut open = scramble(&mut rng, vertex_count, &faces);
        open.pop();
        let result: Result<HalfEdgeStructure> = build(&open, vertex_count);
        assert!(
            matches!(result, Err(TopologyError::UnmatchedEdge { .. })),
            "{}: {:?}",
            name,
            result
        );
    }
}

#[test]
fn test_concurrent_traversal() {
    let (points, faces) = primitives::prism(32);
    let s: HalfEdgeStructure = build(&faces, points.len()).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| s.vertex_ids().map(|v| s.vertex_degree(v)).sum::<usize>()))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), s.num_edges());
        }
    });
}
