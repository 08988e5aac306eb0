//! Edge flip and connectivity checks, generic over any [`Connectivity`].

mod flip;
mod validate;

pub use flip::{check_flip, flip, is_adjacent, is_flip_ok};
pub use validate::check_invariants;

use crate::data_structure::Connectivity;

/// The edge joining `u` and `v`, in either direction. Scans every edge.
pub fn find_edge<M: Connectivity>(
  mesh: &M,
  u: M::VertexKey,
  v: M::VertexKey,
) -> Option<M::EdgeKey> {
  mesh.edge_keys().find(|&edge| {
    let half_edge = mesh.edge_half_edge(edge);
    let (from, to) = (mesh.from_vertex(half_edge), mesh.to_vertex(half_edge));
    (from == u && to == v) || (from == v && to == u)
  })
}
