use log::trace;

use crate::data_structure::Connectivity;
use crate::error::FlipRejection;

/// The two triangles around a flippable edge.
struct FlipSite<H, F> {
  a0: H,
  b0: H,
  fa: F,
  fb: F,
}

fn locate<M: Connectivity>(
  mesh: &M,
  edge: M::EdgeKey,
) -> Result<FlipSite<M::HalfEdgeKey, M::FaceKey>, FlipRejection> {
  if mesh.is_boundary_edge(edge) {
    return Err(FlipRejection::Boundary);
  }

  let h = mesh.edge_half_edge(edge);
  let o = mesh.opposite(h).ok_or(FlipRejection::Boundary)?;
  let fa = mesh.face(h).ok_or(FlipRejection::Boundary)?;
  let fb = mesh.face(o).ok_or(FlipRejection::Boundary)?;

  // the vertices the flipped edge would join
  let a = mesh.to_vertex(mesh.next(h));
  let b = mesh.to_vertex(mesh.next(o));

  if a == b {
    return Err(FlipRejection::DegenerateApex);
  }

  if is_adjacent(mesh, a, b) {
    return Err(FlipRejection::ExistingEdge);
  }

  Ok(FlipSite {
    a0: h,
    b0: o,
    fa,
    fb,
  })
}

/// Whether `a` and `b` are joined by an edge. Linear in the valence of `a`.
pub fn is_adjacent<M: Connectivity>(
  mesh: &M,
  a: M::VertexKey,
  b: M::VertexKey,
) -> bool {
  mesh.vertex_neighbors(a).any(|neighbor| neighbor == b)
}

/// Classifies `edge` as flippable or explains why it is not.
pub fn check_flip<M: Connectivity>(
  mesh: &M,
  edge: M::EdgeKey,
) -> Result<(), FlipRejection> {
  locate(mesh, edge).map(|_| ())
}

/// Whether [`flip`] would succeed on `edge`.
///
/// Fails for boundary edges, when both apex vertices coincide, and when the
/// apex vertices are already connected (the flip would duplicate an edge).
pub fn is_flip_ok<M: Connectivity>(mesh: &M, edge: M::EdgeKey) -> bool {
  check_flip(mesh, edge).is_ok()
}

/// Rotates `edge` inside the quadrilateral formed by its two triangles so it
/// joins the two apex vertices instead of its current endpoints.
///
/// Returns false and leaves the mesh untouched when [`is_flip_ok`] fails. On
/// success no element is created or destroyed, both faces stay triangles and
/// `edge` stays a valid handle for the rotated edge.
pub fn flip<M: Connectivity>(mesh: &mut M, edge: M::EdgeKey) -> bool {
  let FlipSite { a0, b0, fa, fb } = match locate(mesh, edge) {
    Ok(site) => site,
    Err(reason) => {
      trace!("not flipping {:?}: {}", edge, reason);
      return false;
    }
  };

  let a1 = mesh.next(a0);
  let a2 = mesh.next(a1);

  let b1 = mesh.next(b0);
  let b2 = mesh.next(b1);

  let va0 = mesh.to_vertex(a0);
  let va1 = mesh.to_vertex(a1);

  let vb0 = mesh.to_vertex(b0);
  let vb1 = mesh.to_vertex(b1);

  mesh.set_to_vertex(a0, va1);
  mesh.set_to_vertex(b0, vb1);

  mesh.set_next(a0, a2);
  mesh.set_next(a2, b1);
  mesh.set_next(b1, a0);

  mesh.set_next(b0, b2);
  mesh.set_next(b2, a1);
  mesh.set_next(a1, b0);

  mesh.set_face(a1, fb);
  mesh.set_face(b1, fa);

  mesh.set_face_half_edge(fa, a0);
  mesh.set_face_half_edge(fb, b0);

  // a0 and b0 no longer start at the old endpoints
  if mesh.vertex_half_edge(va0) == Some(b0) {
    mesh.set_vertex_half_edge(va0, a1);
  }
  if mesh.vertex_half_edge(vb0) == Some(a0) {
    mesh.set_vertex_half_edge(vb0, b1);
  }

  trace!(
    "flipped {:?}: {:?}-{:?} -> {:?}-{:?}",
    edge,
    va0,
    vb0,
    va1,
    vb1
  );

  true
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::data_structure::{DataStructure, HalfEdge, Vertex};
  use crate::topology::{check_invariants, find_edge};

  fn quad() -> HalfEdge {
    let vertices = vec![
      Vertex::new(0.0, 0.0, 0.0),
      Vertex::new(1.0, 0.0, 0.0),
      Vertex::new(0.5, 1.0, 0.0),
      Vertex::new(0.5, -1.0, 0.0),
    ];
    HalfEdge::from_iters(vertices, vec![[0, 1, 2], [1, 0, 3]]).unwrap()
  }

  fn tetrahedron() -> HalfEdge {
    let vertices = vec![
      Vertex::new(0.0, 0.0, 0.0),
      Vertex::new(1.0, 0.0, 0.0),
      Vertex::new(0.5, 1.0, 0.0),
      Vertex::new(0.5, 0.5, 1.0),
    ];
    HalfEdge::from_iters(
      vertices,
      vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]],
    )
    .unwrap()
  }

  #[test]
  fn flips_the_diagonal_of_a_quad() {
    let mut mesh = quad();
    let edge = find_edge(&mesh, 0, 1).unwrap();

    assert_eq!(check_flip(&mesh, edge), Ok(()));
    assert!(flip(&mut mesh, edge));

    let mut endpoints = mesh.get_endpoints(edge);
    endpoints.sort();
    assert_eq!(endpoints, [2, 3]);
    assert!(!is_adjacent(&mesh, 0, 1));
    assert!(is_adjacent(&mesh, 2, 3));
    assert_eq!(check_invariants(&mesh), Ok(()));
  }

  #[test]
  fn boundary_edges_are_rejected() {
    let mesh = quad();
    let edge = find_edge(&mesh, 1, 2).unwrap();
    assert_eq!(check_flip(&mesh, edge), Err(FlipRejection::Boundary));
  }

  #[test]
  fn existing_edges_are_rejected() {
    let mut mesh = tetrahedron();
    let before = mesh.clone();
    for edge in mesh.edge_keys() {
      assert_eq!(check_flip(&mesh, edge), Err(FlipRejection::ExistingEdge));
      assert!(!flip(&mut mesh, edge));
    }
    assert_eq!(mesh, before);
  }

  #[test]
  fn coinciding_apexes_are_rejected() {
    // two triangles glued along all three edges
    let vertices = vec![
      Vertex::new(0.0, 0.0, 0.0),
      Vertex::new(1.0, 0.0, 0.0),
      Vertex::new(0.5, 1.0, 0.0),
    ];
    let mesh =
      HalfEdge::from_iters(vertices, vec![[0, 1, 2], [1, 0, 2]]).unwrap();
    for edge in mesh.edge_keys() {
      assert!(!mesh.is_boundary_edge(edge));
      assert_eq!(check_flip(&mesh, edge), Err(FlipRejection::DegenerateApex));
    }
  }
}
