pub mod data_structure;
pub mod error;
pub mod mesh;
pub mod mesh_operation;
pub mod topology;
pub mod utils;

pub use data_structure::Connectivity;
pub use data_structure::DataStructure;
pub use data_structure::HalfEdge;
pub use data_structure::SurfaceMesh;

pub use error::{FlipRejection, MeshError, TopologyError};

pub use mesh::Mesh;

pub use mesh_operation::Operation;

pub use mesh_operation::Delaunay;
pub use mesh_operation::EqualizeValence;
pub use mesh_operation::Scramble;

pub use topology::{flip, is_flip_ok};
