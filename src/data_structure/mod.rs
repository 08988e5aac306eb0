mod base;
pub use base::convert;
pub use base::Connectivity;
pub use base::DataStructure;
pub use base::Face;
pub use base::Key;
pub use base::Vertex;

mod half_edge;
pub use half_edge::HalfEdge;

mod surface_mesh;
pub use surface_mesh::{
  EdgeIndex, FaceIndex, HalfedgeIndex, SurfaceMesh, VertexIndex,
  VertexNeighbors,
};
