use std::fmt::Debug;
use std::hash::Hash;
use std::path::Path;

use nalgebra::base::Vector3;

use crate::error::Result;
use crate::mesh::Mesh;

pub type Vertex = Vector3<f32>;
pub type Face = [u32; 3];

/// Bounds shared by every handle type a kernel hands out.
pub trait Key: Copy + Eq + Ord + Hash + Debug {}

impl<T: Copy + Eq + Ord + Hash + Debug> Key for T {}

/// Navigation queries and targeted setters over half-edge connectivity.
///
/// Handles are plain indices into storage owned by the implementor; nothing
/// here implies ownership between elements. Topological operators such as
/// [`flip`](crate::topology::flip) are written against this trait only.
pub trait Connectivity {
  type VertexKey: Key;
  type HalfEdgeKey: Key;
  type EdgeKey: Key;
  type FaceKey: Key;

  type IterVertexKeys: Iterator<Item = Self::VertexKey>;
  type IterHalfEdgeKeys: Iterator<Item = Self::HalfEdgeKey>;
  type IterEdgeKeys: Iterator<Item = Self::EdgeKey>;
  type IterFaceKeys: Iterator<Item = Self::FaceKey>;
  type IterVertexNeighbors<'a>: Iterator<Item = Self::VertexKey>
  where
    Self: 'a;

  fn vertex_keys(&self) -> Self::IterVertexKeys;

  fn half_edge_keys(&self) -> Self::IterHalfEdgeKeys;

  fn edge_keys(&self) -> Self::IterEdgeKeys;

  fn face_keys(&self) -> Self::IterFaceKeys;

  /// The canonical half of `edge`. For interior edges the other half is its
  /// [`opposite`](Connectivity::opposite).
  fn edge_half_edge(&self, edge: Self::EdgeKey) -> Self::HalfEdgeKey;

  /// `None` when the kernel does not store the outer half of a boundary edge.
  fn opposite(&self, half_edge: Self::HalfEdgeKey) -> Option<Self::HalfEdgeKey>;

  fn next(&self, half_edge: Self::HalfEdgeKey) -> Self::HalfEdgeKey;

  fn to_vertex(&self, half_edge: Self::HalfEdgeKey) -> Self::VertexKey;

  fn from_vertex(&self, half_edge: Self::HalfEdgeKey) -> Self::VertexKey;

  fn face(&self, half_edge: Self::HalfEdgeKey) -> Option<Self::FaceKey>;

  /// Vertices joined to `vertex` by an edge, each reported once for a
  /// manifold neighborhood.
  fn vertex_neighbors(
    &self,
    vertex: Self::VertexKey,
  ) -> Self::IterVertexNeighbors<'_>;

  /// Cached outgoing half-edge, `None` for isolated vertices.
  fn vertex_half_edge(
    &self,
    vertex: Self::VertexKey,
  ) -> Option<Self::HalfEdgeKey>;

  fn face_half_edge(&self, face: Self::FaceKey) -> Self::HalfEdgeKey;

  fn set_to_vertex(
    &mut self,
    half_edge: Self::HalfEdgeKey,
    vertex: Self::VertexKey,
  );

  fn set_next(&mut self, half_edge: Self::HalfEdgeKey, next: Self::HalfEdgeKey);

  fn set_face(&mut self, half_edge: Self::HalfEdgeKey, face: Self::FaceKey);

  fn set_vertex_half_edge(
    &mut self,
    vertex: Self::VertexKey,
    half_edge: Self::HalfEdgeKey,
  );

  fn set_face_half_edge(
    &mut self,
    face: Self::FaceKey,
    half_edge: Self::HalfEdgeKey,
  );

  fn is_boundary_half_edge(&self, half_edge: Self::HalfEdgeKey) -> bool {
    self.face(half_edge).is_none()
  }

  /// An edge is on the boundary unless both of its halves exist and own a
  /// face.
  fn is_boundary_edge(&self, edge: Self::EdgeKey) -> bool {
    let half_edge = self.edge_half_edge(edge);
    match self.opposite(half_edge) {
      None => true,
      Some(opposite) => {
        self.is_boundary_half_edge(half_edge)
          || self.is_boundary_half_edge(opposite)
      }
    }
  }

  fn edge_half_edges(
    &self,
    edge: Self::EdgeKey,
  ) -> (Self::HalfEdgeKey, Option<Self::HalfEdgeKey>) {
    let half_edge = self.edge_half_edge(edge);
    (half_edge, self.opposite(half_edge))
  }
}

/// A [`Connectivity`] carrying vertex positions, convertible to and from a
/// face-vertex soup.
pub trait DataStructure: Connectivity + Sized {
  fn from_iters<IterVert, IterFace>(
    vertices: IterVert,
    faces: IterFace,
  ) -> Result<Self>
  where
    IterVert: IntoIterator<Item = Vertex>,
    IterFace: IntoIterator<Item = Face>;

  fn from_mesh(mesh: &Mesh) -> Result<Self> {
    Self::from_iters(mesh.vertices.iter().cloned(), mesh.faces.iter().cloned())
  }

  fn from_obj(path: &Path) -> Result<Self> {
    Self::from_mesh(&Mesh::load(path)?)
  }

  fn num_vertices(&self) -> usize;

  fn num_half_edges(&self) -> usize;

  fn num_edges(&self) -> usize;

  fn num_faces(&self) -> usize;

  /// Handle of the vertex at position `index` of the soup this mesh was
  /// built from.
  fn vertex_key(&self, index: u32) -> Option<Self::VertexKey>;

  fn set_position(&mut self, key: Self::VertexKey, position: &Vertex);

  fn get_position(&self, key: Self::VertexKey) -> Vertex;

  fn degree(&self, key: Self::VertexKey) -> usize {
    self.vertex_neighbors(key).count()
  }

  fn get_endpoints(&self, key: Self::EdgeKey) -> [Self::VertexKey; 2] {
    let half_edge = self.edge_half_edge(key);
    [self.from_vertex(half_edge), self.to_vertex(half_edge)]
  }

  // endpoint, endpoint, and far points of adjacent faces
  fn get_edge_neighbors(
    &self,
    key: Self::EdgeKey,
  ) -> ([Self::VertexKey; 3], Option<Self::VertexKey>) {
    let (mut half_edge, mut twin) = self.edge_half_edges(key);
    if self.is_boundary_half_edge(half_edge) {
      if let Some(inner) = twin {
        twin = Some(half_edge);
        half_edge = inner;
      }
    }

    let far = |half_edge| self.to_vertex(self.next(half_edge));

    (
      [
        self.from_vertex(half_edge),
        self.to_vertex(half_edge),
        far(half_edge),
      ],
      twin
        .filter(|&twin| !self.is_boundary_half_edge(twin))
        .map(far),
    )
  }

  fn to_vecs(&self) -> (Vec<Vertex>, Vec<Face>);

  fn to_mesh(&self) -> Mesh {
    let (vertices, faces) = self.to_vecs();
    Mesh { vertices, faces }
  }

  fn save_obj(&self, path: &Path) -> Result<()> {
    self.to_mesh().save(path)
  }
}

/// Rebuilds `mesh` in another kernel. Vertex order is kept, half-edge,
/// edge and face handles are not.
pub fn convert<A, B>(mesh: &A) -> Result<B>
where
  A: DataStructure,
  B: DataStructure,
{
  let (vertices, faces) = mesh.to_vecs();
  B::from_iters(vertices, faces)
}
