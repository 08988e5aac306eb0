//! Boundary-representation kernel.
//!
//! Half-edges are allocated in opposite pairs, so the opposite of half-edge
//! `h` is `h ^ 1` and its edge is `h >> 1`. The outer halves of boundary edges
//! are stored explicitly, have no face, and are linked into boundary loops.
//! `prev` links are kept in sync by [`Connectivity::set_next`].

use std::collections::HashMap;
use std::fmt;

use log::debug;

use crate::data_structure::base::{Face, Vertex};
use crate::data_structure::{Connectivity, DataStructure};
use crate::error::{MeshError, Result};

macro_rules! index_type {
  ($(#[$attr:meta])* $name:ident, $display:literal) => {
    $(#[$attr])*
    #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
    pub struct $name(u32);

    impl $name {
      #[inline]
      pub fn new(idx: usize) -> Self {
        Self(idx as u32)
      }

      #[inline]
      pub fn idx(self) -> usize {
        self.0 as usize
      }
    }

    impl fmt::Debug for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", $display, self.0)
      }
    }
  };
}

index_type!(
  /// Handle of a vertex.
  VertexIndex,
  "v"
);
index_type!(
  /// Handle of a half-edge.
  HalfedgeIndex,
  "h"
);
index_type!(
  /// Handle of an edge.
  EdgeIndex,
  "e"
);
index_type!(
  /// Handle of a face.
  FaceIndex,
  "f"
);

impl HalfedgeIndex {
  /// The other half of the same edge; relies on pairwise allocation.
  #[inline]
  pub fn opposite(self) -> Self {
    Self(self.0 ^ 1)
  }

  #[inline]
  pub fn edge(self) -> EdgeIndex {
    EdgeIndex(self.0 >> 1)
  }
}

impl EdgeIndex {
  /// Half `i` (0 or 1) of this edge.
  #[inline]
  pub fn halfedge(self, i: u32) -> HalfedgeIndex {
    HalfedgeIndex((self.0 << 1) | (i & 1))
  }
}

#[derive(Clone, Debug, PartialEq)]
struct VertexConnectivity {
  halfedge: Option<HalfedgeIndex>,
}

#[derive(Clone, Debug, PartialEq)]
struct HalfedgeConnectivity {
  face: Option<FaceIndex>,
  vertex: VertexIndex,
  next: HalfedgeIndex,
  prev: HalfedgeIndex,
}

#[derive(Clone, Debug, PartialEq)]
struct FaceConnectivity {
  halfedge: HalfedgeIndex,
}

/// Triangle mesh with explicit boundary half-edges.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceMesh {
  points: Vec<Vertex>,
  vconn: Vec<VertexConnectivity>,
  hconn: Vec<HalfedgeConnectivity>,
  fconn: Vec<FaceConnectivity>,
}

impl SurfaceMesh {
  pub fn prev(&self, h: HalfedgeIndex) -> HalfedgeIndex {
    self.hconn[h.idx()].prev
  }

  /// Allocates the pair `from -> to` / `to -> from`, both without a face,
  /// and returns the first half.
  fn new_edge(&mut self, from: VertexIndex, to: VertexIndex) -> HalfedgeIndex {
    let h = HalfedgeIndex::new(self.hconn.len());
    let o = h.opposite();
    self.hconn.push(HalfedgeConnectivity {
      face: None,
      vertex: to,
      next: h,
      prev: h,
    });
    self.hconn.push(HalfedgeConnectivity {
      face: None,
      vertex: from,
      next: o,
      prev: o,
    });
    h
  }

  fn link(&mut self, h: HalfedgeIndex, next: HalfedgeIndex) {
    self.hconn[h.idx()].next = next;
    self.hconn[next.idx()].prev = h;
  }

  /// Chains the faceless half-edges into boundary loops and makes every
  /// boundary vertex cache its outgoing boundary half-edge.
  fn link_boundary_loops(&mut self) -> Result<()> {
    let boundary: Vec<HalfedgeIndex> = self
      .half_edge_keys()
      .filter(|&h| self.hconn[h.idx()].face.is_none())
      .collect();

    let mut outgoing: HashMap<VertexIndex, HalfedgeIndex> = HashMap::new();
    for &h in &boundary {
      let origin = self.from_vertex(h);
      if outgoing.insert(origin, h).is_some() {
        return Err(MeshError::NonManifoldVertex { vertex: origin.0 });
      }
    }

    for &h in &boundary {
      let dest = self.to_vertex(h);
      let next = *outgoing
        .get(&dest)
        .ok_or(MeshError::NonManifoldVertex { vertex: dest.0 })?;
      self.link(h, next);
    }

    for (vertex, h) in outgoing {
      self.vconn[vertex.idx()].halfedge = Some(h);
    }

    Ok(())
  }

  fn face_vertices(&self, f: FaceIndex) -> Face {
    let h0 = self.fconn[f.idx()].halfedge;
    let h1 = self.next(h0);
    let h2 = self.next(h1);
    [
      self.to_vertex(h0).0,
      self.to_vertex(h1).0,
      self.to_vertex(h2).0,
    ]
  }
}

/// Circulates the outgoing half-edges of a vertex.
pub struct VertexNeighbors<'a> {
  mesh: &'a SurfaceMesh,
  start: Option<HalfedgeIndex>,
  current: Option<HalfedgeIndex>,
}

impl<'a> Iterator for VertexNeighbors<'a> {
  type Item = VertexIndex;

  fn next(&mut self) -> Option<VertexIndex> {
    let h = self.current?;
    // the opposite of an outgoing half-edge comes back in; its successor
    // leaves the vertex again
    let next = self.mesh.next(h.opposite());
    self.current = if Some(next) == self.start {
      None
    } else {
      Some(next)
    };
    Some(self.mesh.to_vertex(h))
  }
}

impl DataStructure for SurfaceMesh {
  fn from_iters<IterVert, IterFace>(
    vertices: IterVert,
    faces: IterFace,
  ) -> Result<Self>
  where
    IterVert: IntoIterator<Item = Vertex>,
    IterFace: IntoIterator<Item = Face>,
  {
    let points: Vec<Vertex> = vertices.into_iter().collect();
    let mut mesh = SurfaceMesh {
      vconn: vec![VertexConnectivity { halfedge: None }; points.len()],
      points,
      hconn: Vec::new(),
      fconn: Vec::new(),
    };

    let mut directed: HashMap<(u32, u32), HalfedgeIndex> = HashMap::new();

    for (face_num, face) in faces.into_iter().enumerate() {
      if let Some(&vertex) =
        face.iter().find(|&&v| v as usize >= mesh.points.len())
      {
        return Err(MeshError::InvalidVertexIndex {
          face: face_num,
          vertex,
        });
      }
      if face[0] == face[1] || face[1] == face[2] || face[2] == face[0] {
        return Err(MeshError::DegenerateFace { face: face_num });
      }

      let f = FaceIndex::new(mesh.fconn.len());
      let mut corners = [HalfedgeIndex(0); 3];
      for i in 0..3 {
        let (from, to) = (face[i], face[(i + 1) % 3]);
        let h = match directed.get(&(from, to)) {
          Some(&h) => {
            if mesh.hconn[h.idx()].face.is_some() {
              return Err(MeshError::NonManifoldEdge { from, to });
            }
            h
          }
          None => {
            let h = mesh.new_edge(VertexIndex(from), VertexIndex(to));
            directed.insert((from, to), h);
            directed.insert((to, from), h.opposite());
            h
          }
        };
        mesh.hconn[h.idx()].face = Some(f);
        corners[i] = h;
      }

      for i in 0..3 {
        mesh.link(corners[i], corners[(i + 1) % 3]);
        let origin = VertexIndex(face[i]);
        if mesh.vconn[origin.idx()].halfedge.is_none() {
          mesh.vconn[origin.idx()].halfedge = Some(corners[i]);
        }
      }
      mesh.fconn.push(FaceConnectivity {
        halfedge: corners[0],
      });
    }

    if mesh.fconn.is_empty() {
      return Err(MeshError::EmptyMesh);
    }

    mesh.link_boundary_loops()?;

    debug!(
      "built surface mesh kernel: {} vertices, {} edges, {} faces",
      mesh.points.len(),
      mesh.hconn.len() / 2,
      mesh.fconn.len()
    );

    Ok(mesh)
  }

  fn num_vertices(&self) -> usize {
    self.points.len()
  }

  fn num_half_edges(&self) -> usize {
    self.hconn.len()
  }

  fn num_edges(&self) -> usize {
    self.hconn.len() / 2
  }

  fn num_faces(&self) -> usize {
    self.fconn.len()
  }

  fn vertex_key(&self, index: u32) -> Option<VertexIndex> {
    if (index as usize) < self.points.len() {
      Some(VertexIndex(index))
    } else {
      None
    }
  }

  fn set_position(&mut self, key: VertexIndex, position: &Vertex) {
    self.points[key.idx()] = *position;
  }

  fn get_position(&self, key: VertexIndex) -> Vertex {
    self.points[key.idx()]
  }

  fn to_vecs(&self) -> (Vec<Vertex>, Vec<Face>) {
    let faces = self.face_keys().map(|f| self.face_vertices(f)).collect();
    (self.points.clone(), faces)
  }
}

impl Connectivity for SurfaceMesh {
  type VertexKey = VertexIndex;
  type HalfEdgeKey = HalfedgeIndex;
  type EdgeKey = EdgeIndex;
  type FaceKey = FaceIndex;

  type IterVertexKeys = std::iter::Map<std::ops::Range<u32>, fn(u32) -> VertexIndex>;
  type IterHalfEdgeKeys =
    std::iter::Map<std::ops::Range<u32>, fn(u32) -> HalfedgeIndex>;
  type IterEdgeKeys = std::iter::Map<std::ops::Range<u32>, fn(u32) -> EdgeIndex>;
  type IterFaceKeys = std::iter::Map<std::ops::Range<u32>, fn(u32) -> FaceIndex>;
  type IterVertexNeighbors<'a> = VertexNeighbors<'a>;

  fn vertex_keys(&self) -> Self::IterVertexKeys {
    (0..self.points.len() as u32).map(VertexIndex as fn(u32) -> VertexIndex)
  }

  fn half_edge_keys(&self) -> Self::IterHalfEdgeKeys {
    (0..self.hconn.len() as u32).map(HalfedgeIndex as fn(u32) -> HalfedgeIndex)
  }

  fn edge_keys(&self) -> Self::IterEdgeKeys {
    (0..(self.hconn.len() / 2) as u32).map(EdgeIndex as fn(u32) -> EdgeIndex)
  }

  fn face_keys(&self) -> Self::IterFaceKeys {
    (0..self.fconn.len() as u32).map(FaceIndex as fn(u32) -> FaceIndex)
  }

  fn edge_half_edge(&self, edge: EdgeIndex) -> HalfedgeIndex {
    edge.halfedge(0)
  }

  fn opposite(&self, h: HalfedgeIndex) -> Option<HalfedgeIndex> {
    Some(h.opposite())
  }

  fn next(&self, h: HalfedgeIndex) -> HalfedgeIndex {
    self.hconn[h.idx()].next
  }

  fn to_vertex(&self, h: HalfedgeIndex) -> VertexIndex {
    self.hconn[h.idx()].vertex
  }

  fn from_vertex(&self, h: HalfedgeIndex) -> VertexIndex {
    self.hconn[h.opposite().idx()].vertex
  }

  fn face(&self, h: HalfedgeIndex) -> Option<FaceIndex> {
    self.hconn[h.idx()].face
  }

  fn vertex_neighbors(&self, v: VertexIndex) -> VertexNeighbors<'_> {
    let start = self.vconn[v.idx()].halfedge;
    VertexNeighbors {
      mesh: self,
      start,
      current: start,
    }
  }

  fn vertex_half_edge(&self, v: VertexIndex) -> Option<HalfedgeIndex> {
    self.vconn[v.idx()].halfedge
  }

  fn face_half_edge(&self, f: FaceIndex) -> HalfedgeIndex {
    self.fconn[f.idx()].halfedge
  }

  fn set_to_vertex(&mut self, h: HalfedgeIndex, v: VertexIndex) {
    self.hconn[h.idx()].vertex = v;
  }

  fn set_next(&mut self, h: HalfedgeIndex, next: HalfedgeIndex) {
    self.link(h, next);
  }

  fn set_face(&mut self, h: HalfedgeIndex, f: FaceIndex) {
    self.hconn[h.idx()].face = Some(f);
  }

  fn set_vertex_half_edge(&mut self, v: VertexIndex, h: HalfedgeIndex) {
    self.vconn[v.idx()].halfedge = Some(h);
  }

  fn set_face_half_edge(&mut self, f: FaceIndex, h: HalfedgeIndex) {
    self.fconn[f.idx()].halfedge = h;
  }
}
