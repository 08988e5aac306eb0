use crate::data_structure::base::Face;
use crate::data_structure::base::Vertex;
use crate::data_structure::{Connectivity, DataStructure};
use crate::error::{MeshError, Result};

use std::collections::HashMap;

use log::debug;

type IndexType = u32;

#[derive(Clone, Debug, PartialEq)]
struct HalfEdgeRef {
  // None on the boundary: the outer half is not stored
  twin_idx: Option<IndexType>,
  next_idx: IndexType,
  // destination vertex
  vertex_idx: IndexType,
  edge_idx: IndexType,
  face_idx: IndexType,
}

#[derive(Clone, Debug, PartialEq)]
struct VertexRef {
  half_edge_idx: Option<IndexType>,
  vertex: Vertex,
}

#[derive(Clone, Debug, PartialEq)]
struct EdgeRef {
  half_edge_idx: IndexType,
}

#[derive(Clone, Debug, PartialEq)]
struct FaceRef {
  half_edge_idx: IndexType,
}

/// Compact half-edge kernel: every stored half-edge belongs to a triangle,
/// and a boundary edge is a half-edge without a twin.
#[derive(Clone, Debug, PartialEq)]
pub struct HalfEdge {
  half_edge_refs: Vec<HalfEdgeRef>,
  vertex_refs: Vec<VertexRef>,
  edge_refs: Vec<EdgeRef>,
  face_refs: Vec<FaceRef>,
}

enum Offset {
  Current,
  Next,
  NextNext,
}

impl HalfEdge {
  fn relative_get(&self, idx: IndexType, offset: Offset) -> &HalfEdgeRef {
    let first = &self.half_edge_refs[idx as usize];

    match offset {
      Offset::Current => first,
      Offset::Next => &self.half_edge_refs[first.next_idx as usize],
      Offset::NextNext => {
        &self.half_edge_refs
          [self.half_edge_refs[first.next_idx as usize].next_idx as usize]
      }
    }
  }

  fn origin(&self, half_edge_idx: IndexType) -> IndexType {
    self.relative_get(half_edge_idx, Offset::NextNext).vertex_idx
  }

  #[cfg(debug_assertions)]
  fn verify_half_edge_valid(&self, half_edge_idx: IndexType) {
    let half_edge = &self.half_edge_refs[half_edge_idx as usize];
    if let Some(twin_idx) = half_edge.twin_idx {
      debug_assert_eq!(
        self.origin(half_edge_idx),
        self.half_edge_refs[twin_idx as usize].vertex_idx
      );
      debug_assert_eq!(
        self.half_edge_refs[twin_idx as usize].twin_idx,
        Some(half_edge_idx)
      );
    }

    debug_assert_eq!(
      self.relative_get(half_edge_idx, Offset::NextNext).next_idx,
      half_edge_idx
    );
  }

  #[cfg(not(debug_assertions))]
  fn verify_half_edge_valid(&self, _: IndexType) {}

  #[cfg(debug_assertions)]
  fn verify_vertex_valid(&self, vertex: IndexType) {
    let mut neighbors = Vec::new();
    self.get_vertex_neighbors(vertex, &mut neighbors);
    debug_assert!(!neighbors.contains(&vertex));
    if let Some(half_edge_idx) = self.vertex_refs[vertex as usize].half_edge_idx
    {
      debug_assert_eq!(self.origin(half_edge_idx), vertex);
    }
  }

  #[cfg(not(debug_assertions))]
  fn verify_vertex_valid(&self, _: IndexType) {}

  fn get_face_neighbors(&self, face: IndexType) -> [IndexType; 3] {
    let half_edge_idx = self.face_refs[face as usize].half_edge_idx;
    [
      self.relative_get(half_edge_idx, Offset::Current).vertex_idx,
      self.relative_get(half_edge_idx, Offset::Next).vertex_idx,
      self.relative_get(half_edge_idx, Offset::NextNext).vertex_idx,
    ]
  }

  /// Collects the neighbors of `key` into `neighbors`.
  ///
  /// Rotates around the vertex through twins; when a boundary is hit the
  /// remaining part of the fan is walked in the other direction.
  pub fn get_vertex_neighbors(
    &self,
    key: IndexType,
    neighbors: &mut Vec<IndexType>,
  ) {
    neighbors.clear();

    let start = match self.vertex_refs[key as usize].half_edge_idx {
      Some(start) => start,
      None => return,
    };

    let mut half_edge_idx = start;
    neighbors.push(self.half_edge_refs[start as usize].vertex_idx);

    // outgoing -> twin (incoming) -> next (outgoing)
    while let Some(twin_idx) = self.half_edge_refs[half_edge_idx as usize].twin_idx
    {
      half_edge_idx = self.half_edge_refs[twin_idx as usize].next_idx;
      if half_edge_idx == start {
        return;
      }
      neighbors.push(self.half_edge_refs[half_edge_idx as usize].vertex_idx);
    }

    // outgoing -> previous (incoming) -> twin (outgoing)
    half_edge_idx = start;
    loop {
      let prev = self.relative_get(half_edge_idx, Offset::NextNext);
      match prev.twin_idx {
        Some(twin_idx) => {
          half_edge_idx = twin_idx;
          neighbors.push(self.half_edge_refs[half_edge_idx as usize].vertex_idx);
        }
        None => {
          neighbors.push(self.relative_get(half_edge_idx, Offset::Next).vertex_idx);
          return;
        }
      }
    }
  }

  /// Number of outgoing half-edges reached by rotating around the origin of
  /// `start`, in both directions when the fan is open.
  fn fan_size(&self, start: IndexType) -> usize {
    let mut count = 1;
    let mut half_edge_idx = start;

    while let Some(twin_idx) = self.half_edge_refs[half_edge_idx as usize].twin_idx
    {
      half_edge_idx = self.half_edge_refs[twin_idx as usize].next_idx;
      if half_edge_idx == start {
        return count;
      }
      count += 1;
    }

    half_edge_idx = start;
    while let Some(twin_idx) =
      self.relative_get(half_edge_idx, Offset::NextNext).twin_idx
    {
      half_edge_idx = twin_idx;
      count += 1;
    }

    count
  }

  /// Fails on the first vertex whose faces do not form a single fan.
  fn check_fans(&self) -> Result<()> {
    let mut outgoing = vec![0; self.vertex_refs.len()];
    for half_edge_idx in 0..(self.half_edge_refs.len() as IndexType) {
      outgoing[self.origin(half_edge_idx) as usize] += 1;
    }

    for (vertex, vertex_ref) in self.vertex_refs.iter().enumerate() {
      if let Some(start) = vertex_ref.half_edge_idx {
        if self.fan_size(start) != outgoing[vertex] {
          return Err(MeshError::NonManifoldVertex {
            vertex: vertex as IndexType,
          });
        }
      }
    }

    Ok(())
  }

  /// Builds the connectivity of a soup without checking that every vertex
  /// has a single fan.
  pub(crate) fn assemble<IterVert, IterFace>(
    vertices: IterVert,
    faces: IterFace,
  ) -> Result<Self>
  where
    IterVert: IntoIterator<Item = Vertex>,
    IterFace: IntoIterator<Item = Face>,
  {
    let mut vertex_refs: Vec<VertexRef> = vertices
      .into_iter()
      .map(|vertex| VertexRef {
        half_edge_idx: None,
        vertex,
      })
      .collect();

    let mut vertex_pair_to_half_edge_idx = HashMap::new();

    let mut half_edge_refs = Vec::<HalfEdgeRef>::new();
    let mut edge_refs = Vec::new();
    let mut face_refs = Vec::new();

    for (face_num, face) in faces.into_iter().enumerate() {
      for &vertex_idx in face.iter() {
        if vertex_idx as usize >= vertex_refs.len() {
          return Err(MeshError::InvalidVertexIndex {
            face: face_num,
            vertex: vertex_idx,
          });
        }
      }
      if face[0] == face[1] || face[1] == face[2] || face[2] == face[0] {
        return Err(MeshError::DegenerateFace { face: face_num });
      }

      let face_idx = face_refs.len() as IndexType;
      let next_vertex = [face[1], face[2], face[0]];
      let start_idx = half_edge_refs.len() as IndexType;
      let next_idxs = [start_idx + 1, start_idx + 2, start_idx];
      for ((from_idx, to_idx), next_idx) in
        face.iter().zip(next_vertex.iter()).zip(next_idxs.iter())
      {
        let half_edge_idx = half_edge_refs.len() as IndexType;

        if vertex_pair_to_half_edge_idx
          .insert((*from_idx, *to_idx), half_edge_idx)
          .is_some()
        {
          return Err(MeshError::NonManifoldEdge {
            from: *from_idx,
            to: *to_idx,
          });
        }

        let twin_idx = vertex_pair_to_half_edge_idx
          .get(&(*to_idx, *from_idx))
          .copied();

        let edge_idx = match twin_idx {
          Some(v) => {
            half_edge_refs[v as usize].twin_idx = Some(half_edge_idx);
            half_edge_refs[v as usize].edge_idx
          }
          None => {
            edge_refs.push(EdgeRef { half_edge_idx });
            (edge_refs.len() - 1) as IndexType
          }
        };

        let vertex_ref = &mut vertex_refs[*from_idx as usize];
        if vertex_ref.half_edge_idx.is_none() {
          vertex_ref.half_edge_idx = Some(half_edge_idx);
        }

        half_edge_refs.push(HalfEdgeRef {
          twin_idx,
          next_idx: *next_idx,
          vertex_idx: *to_idx,
          edge_idx,
          face_idx,
        })
      }

      face_refs.push(FaceRef {
        half_edge_idx: start_idx,
      });
    }

    if face_refs.is_empty() {
      return Err(MeshError::EmptyMesh);
    }

    let vertex_length = vertex_refs.len() as IndexType;
    let half_edge_length = half_edge_refs.len() as IndexType;

    let out = HalfEdge {
      half_edge_refs,
      vertex_refs,
      edge_refs,
      face_refs,
    };

    for idx in 0..vertex_length {
      out.verify_vertex_valid(idx);
    }

    for idx in 0..half_edge_length {
      out.verify_half_edge_valid(idx);
    }

    Ok(out)
  }
}

impl DataStructure for HalfEdge {
  fn from_iters<IterVert, IterFace>(
    vertices: IterVert,
    faces: IterFace,
  ) -> Result<Self>
  where
    IterVert: IntoIterator<Item = Vertex>,
    IterFace: IntoIterator<Item = Face>,
  {
    let out = Self::assemble(vertices, faces)?;
    out.check_fans()?;

    debug!(
      "built half-edge kernel: {} vertices, {} edges, {} faces",
      out.vertex_refs.len(),
      out.edge_refs.len(),
      out.face_refs.len()
    );

    Ok(out)
  }

  fn num_vertices(&self) -> usize {
    self.vertex_refs.len()
  }

  fn num_half_edges(&self) -> usize {
    self.half_edge_refs.len()
  }

  fn num_edges(&self) -> usize {
    self.edge_refs.len()
  }

  fn num_faces(&self) -> usize {
    self.face_refs.len()
  }

  fn vertex_key(&self, index: u32) -> Option<IndexType> {
    if (index as usize) < self.vertex_refs.len() {
      Some(index)
    } else {
      None
    }
  }

  fn set_position(&mut self, key: IndexType, position: &Vertex) {
    self.vertex_refs[key as usize].vertex = *position;
  }

  fn get_position(&self, key: IndexType) -> Vertex {
    self.vertex_refs[key as usize].vertex
  }

  fn to_vecs(&self) -> (Vec<Vertex>, Vec<Face>) {
    let vertices = self.vertex_refs.iter().map(|v| v.vertex).collect();

    let faces = (0..(self.face_refs.len() as IndexType))
      .map(|i| self.get_face_neighbors(i))
      .collect();

    (vertices, faces)
  }
}

impl Connectivity for HalfEdge {
  type VertexKey = IndexType;
  type HalfEdgeKey = IndexType;
  type EdgeKey = IndexType;
  type FaceKey = IndexType;

  type IterVertexKeys = std::ops::Range<IndexType>;
  type IterHalfEdgeKeys = std::ops::Range<IndexType>;
  type IterEdgeKeys = std::ops::Range<IndexType>;
  type IterFaceKeys = std::ops::Range<IndexType>;
  type IterVertexNeighbors<'a> = std::vec::IntoIter<IndexType>;

  fn vertex_keys(&self) -> Self::IterVertexKeys {
    0..(self.vertex_refs.len() as IndexType)
  }

  fn half_edge_keys(&self) -> Self::IterHalfEdgeKeys {
    0..(self.half_edge_refs.len() as IndexType)
  }

  fn edge_keys(&self) -> Self::IterEdgeKeys {
    0..(self.edge_refs.len() as IndexType)
  }

  fn face_keys(&self) -> Self::IterFaceKeys {
    0..(self.face_refs.len() as IndexType)
  }

  fn edge_half_edge(&self, edge: IndexType) -> IndexType {
    self.edge_refs[edge as usize].half_edge_idx
  }

  fn opposite(&self, half_edge: IndexType) -> Option<IndexType> {
    self.half_edge_refs[half_edge as usize].twin_idx
  }

  fn next(&self, half_edge: IndexType) -> IndexType {
    self.half_edge_refs[half_edge as usize].next_idx
  }

  fn to_vertex(&self, half_edge: IndexType) -> IndexType {
    self.half_edge_refs[half_edge as usize].vertex_idx
  }

  fn from_vertex(&self, half_edge: IndexType) -> IndexType {
    self.origin(half_edge)
  }

  fn face(&self, half_edge: IndexType) -> Option<IndexType> {
    Some(self.half_edge_refs[half_edge as usize].face_idx)
  }

  fn vertex_neighbors(&self, vertex: IndexType) -> std::vec::IntoIter<IndexType> {
    let mut neighbors = Vec::new();
    self.get_vertex_neighbors(vertex, &mut neighbors);
    neighbors.into_iter()
  }

  fn vertex_half_edge(&self, vertex: IndexType) -> Option<IndexType> {
    self.vertex_refs[vertex as usize].half_edge_idx
  }

  fn face_half_edge(&self, face: IndexType) -> IndexType {
    self.face_refs[face as usize].half_edge_idx
  }

  fn set_to_vertex(&mut self, half_edge: IndexType, vertex: IndexType) {
    self.half_edge_refs[half_edge as usize].vertex_idx = vertex;
  }

  fn set_next(&mut self, half_edge: IndexType, next: IndexType) {
    self.half_edge_refs[half_edge as usize].next_idx = next;
  }

  fn set_face(&mut self, half_edge: IndexType, face: IndexType) {
    self.half_edge_refs[half_edge as usize].face_idx = face;
  }

  fn set_vertex_half_edge(&mut self, vertex: IndexType, half_edge: IndexType) {
    self.vertex_refs[vertex as usize].half_edge_idx = Some(half_edge);
  }

  fn set_face_half_edge(&mut self, face: IndexType, half_edge: IndexType) {
    self.face_refs[face as usize].half_edge_idx = half_edge;
  }
}
