mod common;

use std::collections::BTreeSet;

use common::{canonical_faces, pillow, quad, tetrahedron, undirected_edges};
use meshtopo::data_structure::{convert, DataStructure, Vertex};
use meshtopo::topology::{check_flip, check_invariants, find_edge, flip, is_flip_ok};
use meshtopo::{FlipRejection, HalfEdge, MeshError, SurfaceMesh};

fn edge_between<D: DataStructure>(mesh: &D, u: u32, v: u32) -> D::EdgeKey {
  let (a, b) = (mesh.vertex_key(u).unwrap(), mesh.vertex_key(v).unwrap());
  find_edge(mesh, a, b).unwrap()
}

fn boundary_edges_are_left_alone<D: DataStructure + Clone + PartialEq + std::fmt::Debug>() {
  let mut mesh: D = quad();
  let before = mesh.clone();
  let boundary: Vec<_> = mesh
    .edge_keys()
    .filter(|&edge| mesh.is_boundary_edge(edge))
    .collect();
  assert_eq!(boundary.len(), 4);

  for edge in boundary {
    assert!(!is_flip_ok(&mesh, edge));
    assert_eq!(check_flip(&mesh, edge), Err(FlipRejection::Boundary));
    assert!(!flip(&mut mesh, edge));
  }
  assert_eq!(mesh, before);
}

fn coinciding_apexes_are_rejected<D: DataStructure + Clone + PartialEq + std::fmt::Debug>() {
  let mut mesh: D = pillow();
  let before = mesh.clone();
  let edge = edge_between(&mesh, 0, 1);
  assert!(!mesh.is_boundary_edge(edge));
  assert_eq!(check_flip(&mesh, edge), Err(FlipRejection::DegenerateApex));
  assert!(!flip(&mut mesh, edge));
  assert_eq!(mesh, before);
}

fn existing_edges_are_rejected<D: DataStructure + Clone + PartialEq + std::fmt::Debug>() {
  let mut mesh: D = tetrahedron();
  let before = mesh.clone();
  let edges: Vec<_> = mesh.edge_keys().collect();
  assert_eq!(edges.len(), 6);

  for edge in edges {
    assert_eq!(check_flip(&mesh, edge), Err(FlipRejection::ExistingEdge));
    assert!(!flip(&mut mesh, edge));
  }
  assert_eq!(mesh, before);
}

fn quad_diagonal_flips<D: DataStructure>() {
  let mut mesh: D = quad();
  let counts = (
    mesh.num_vertices(),
    mesh.num_half_edges(),
    mesh.num_edges(),
    mesh.num_faces(),
  );
  let edge = edge_between(&mesh, 0, 1);

  assert!(is_flip_ok(&mesh, edge));
  assert!(flip(&mut mesh, edge));
  assert_eq!(check_invariants(&mesh), Ok(()));

  assert_eq!(
    counts,
    (
      mesh.num_vertices(),
      mesh.num_half_edges(),
      mesh.num_edges(),
      mesh.num_faces()
    )
  );

  // the handle now names the rotated edge
  let mut endpoints = mesh.get_endpoints(edge);
  endpoints.sort();
  let mut expected = [mesh.vertex_key(2).unwrap(), mesh.vertex_key(3).unwrap()];
  expected.sort();
  assert_eq!(endpoints, expected);

  let faces: BTreeSet<_> = vec![[0, 3, 2], [1, 2, 3]].into_iter().collect();
  assert_eq!(canonical_faces(&mesh), faces);
}

fn double_flip_restores_adjacency<D: DataStructure>() {
  let mut mesh: D = quad();
  let faces = canonical_faces(&mesh);
  let edges = undirected_edges(&mesh);
  let edge = edge_between(&mesh, 0, 1);

  assert!(flip(&mut mesh, edge));
  assert_ne!(undirected_edges(&mesh), edges);
  assert!(flip(&mut mesh, edge));

  assert_eq!(check_invariants(&mesh), Ok(()));
  assert_eq!(undirected_edges(&mesh), edges);
  assert_eq!(canonical_faces(&mesh), faces);
}

fn predicate_is_pure<D: DataStructure + Clone + PartialEq + std::fmt::Debug>() {
  let mesh: D = quad();
  let before = mesh.clone();
  for edge in mesh.edge_keys() {
    assert_eq!(is_flip_ok(&mesh, edge), is_flip_ok(&mesh, edge));
    assert_eq!(check_flip(&mesh, edge), check_flip(&mesh, edge));
  }
  assert_eq!(mesh, before);
}

macro_rules! on_both_kernels {
  ($($name:ident),* $(,)?) => {
    mod half_edge {
      use super::*;
      $(
        #[test]
        fn $name() {
          super::$name::<HalfEdge>();
        }
      )*
    }

    mod surface_mesh {
      use super::*;
      $(
        #[test]
        fn $name() {
          super::$name::<SurfaceMesh>();
        }
      )*
    }
  };
}

on_both_kernels!(
  boundary_edges_are_left_alone,
  coinciding_apexes_are_rejected,
  existing_edges_are_rejected,
  quad_diagonal_flips,
  double_flip_restores_adjacency,
  predicate_is_pure,
);

#[test]
fn kernels_agree_after_the_same_flip() {
  let mut a: HalfEdge = quad();
  let mut b: SurfaceMesh = convert(&a).unwrap();
  assert_eq!(canonical_faces(&a), canonical_faces(&b));

  let edge_a = edge_between(&a, 0, 1);
  let edge_b = edge_between(&b, 0, 1);
  assert!(flip(&mut a, edge_a));
  assert!(flip(&mut b, edge_b));

  assert_eq!(canonical_faces(&a), canonical_faces(&b));
}

#[test]
fn kernels_agree_on_a_vertex_with_two_fans() {
  // the last face touches 2 and 3 but shares no edge with the first two
  let vertices = vec![
    Vertex::new(0.0, 0.0, 0.0),
    Vertex::new(1.0, 0.0, 0.0),
    Vertex::new(0.5, 1.0, 0.0),
    Vertex::new(0.5, -1.0, 0.0),
    Vertex::new(2.0, 0.0, 0.0),
  ];
  let faces = vec![[0, 1, 2], [1, 0, 3], [2, 4, 3]];

  assert!(matches!(
    HalfEdge::from_iters(vertices.clone(), faces.clone()),
    Err(MeshError::NonManifoldVertex { .. })
  ));
  assert!(matches!(
    SurfaceMesh::from_iters(vertices, faces),
    Err(MeshError::NonManifoldVertex { .. })
  ));
}
