use std::collections::{HashMap, HashSet};

use crate::data_structure::Connectivity;
use crate::error::TopologyError;

fn name<T: std::fmt::Debug>(key: T) -> String {
  format!("{:?}", key)
}

/// Outgoing half-edges reached by rotating around the origin of `start`,
/// giving up past `limit`. Open fans are walked in both directions.
fn fan_size<M: Connectivity>(
  mesh: &M,
  start: M::HalfEdgeKey,
  limit: usize,
) -> usize {
  let mut count = 1;
  let mut h = start;

  // outgoing -> opposite (incoming) -> next (outgoing)
  while let Some(o) = mesh.opposite(h) {
    h = mesh.next(o);
    if h == start || count > limit {
      return count;
    }
    count += 1;
  }

  // face loops are triangles here, so next of next is the previous half
  h = start;
  while count <= limit {
    match mesh.opposite(mesh.next(mesh.next(h))) {
      Some(o) => {
        h = o;
        count += 1;
      }
      None => break,
    }
  }

  count
}

/// Walks the whole mesh and reports the first broken connectivity
/// invariant.
///
/// Checked, in order: every face loop is a 3-cycle whose half-edges chain
/// end to start and all point back to the face; every face caches a
/// half-edge of its own loop; opposites are involutive and swap endpoints;
/// no half-edge is a self loop and no two half-edges share the same ordered
/// endpoints; every cached vertex half-edge starts at that vertex and its
/// rotation reaches every outgoing half-edge of the vertex.
pub fn check_invariants<M: Connectivity>(mesh: &M) -> Result<(), TopologyError> {
  for h in mesh.half_edge_keys() {
    let face = match mesh.face(h) {
      Some(face) => face,
      None => continue,
    };

    let n1 = mesh.next(h);
    let n2 = mesh.next(n1);
    if n1 == h || n2 == h || mesh.next(n2) != h {
      return Err(TopologyError::BrokenFaceLoop { face: name(face) });
    }

    for (current, next) in [(h, n1), (n1, n2), (n2, h)] {
      if mesh.face(next) != Some(face) {
        return Err(TopologyError::FaceMismatch {
          half_edge: name(next),
          face: name(face),
        });
      }
      if mesh.to_vertex(current) != mesh.from_vertex(next) {
        return Err(TopologyError::BrokenFaceLoop { face: name(face) });
      }
    }
  }

  for face in mesh.face_keys() {
    if mesh.face(mesh.face_half_edge(face)) != Some(face) {
      return Err(TopologyError::StaleFaceHalfEdge { face: name(face) });
    }
  }

  let mut directed = HashSet::new();
  let mut outgoing: HashMap<M::VertexKey, usize> = HashMap::new();
  for h in mesh.half_edge_keys() {
    let from = mesh.from_vertex(h);
    let to = mesh.to_vertex(h);
    *outgoing.entry(from).or_insert(0) += 1;

    if let Some(o) = mesh.opposite(h) {
      if o == h || mesh.opposite(o) != Some(h) {
        return Err(TopologyError::OppositeMismatch { half_edge: name(h) });
      }
      if mesh.from_vertex(o) != to || mesh.to_vertex(o) != from {
        return Err(TopologyError::OppositeEndpoints { half_edge: name(h) });
      }
    }

    if from == to {
      return Err(TopologyError::SelfLoop { half_edge: name(h) });
    }
    if !directed.insert((from, to)) {
      return Err(TopologyError::DuplicateHalfEdge {
        from: name(from),
        to: name(to),
      });
    }
  }

  for v in mesh.vertex_keys() {
    if let Some(h) = mesh.vertex_half_edge(v) {
      if mesh.from_vertex(h) != v {
        return Err(TopologyError::StaleVertexHalfEdge { vertex: name(v) });
      }
    }
  }

  for v in mesh.vertex_keys() {
    if let Some(h) = mesh.vertex_half_edge(v) {
      let expected = outgoing.get(&v).copied().unwrap_or(0);
      if fan_size(mesh, h, expected) != expected {
        return Err(TopologyError::SplitFan { vertex: name(v) });
      }
    }
  }

  Ok(())
}
