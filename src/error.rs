use thiserror::Error;

/// Errors raised while loading, building or saving a mesh.
#[derive(Error, Debug)]
pub enum MeshError {
  #[error("failed to load obj: {0}")]
  Load(#[from] tobj::LoadError),

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("mesh has no faces")]
  EmptyMesh,

  #[error("face {face} references invalid vertex index {vertex}")]
  InvalidVertexIndex { face: usize, vertex: u32 },

  #[error("face {face} is degenerate (repeats a vertex)")]
  DegenerateFace { face: usize },

  #[error("directed edge ({from}, {to}) is used by more than one face")]
  NonManifoldEdge { from: u32, to: u32 },

  #[error("vertex {vertex} has more than one boundary fan")]
  NonManifoldVertex { vertex: u32 },

  #[error("no edge joins vertices {0} and {1}")]
  EdgeNotFound(u32, u32),

  #[error("edge ({0}, {1}) cannot be flipped: {2}")]
  FlipRejected(u32, u32, FlipRejection),

  #[error(transparent)]
  Topology(#[from] TopologyError),
}

/// First violated connectivity invariant found by
/// [`check_invariants`](crate::topology::check_invariants).
///
/// Keys are reported through their `Debug` form so the error stays
/// independent of the kernel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
  #[error("opposite of opposite of {half_edge} is not itself")]
  OppositeMismatch { half_edge: String },

  #[error("{half_edge} and its opposite do not swap endpoints")]
  OppositeEndpoints { half_edge: String },

  #[error("loop of face {face} does not close after 3 steps")]
  BrokenFaceLoop { face: String },

  #[error("{half_edge} is in the loop of {face} but points to another face")]
  FaceMismatch { half_edge: String, face: String },

  #[error("face {face} caches a half-edge outside its loop")]
  StaleFaceHalfEdge { face: String },

  #[error("vertex {vertex} caches a half-edge that does not start there")]
  StaleVertexHalfEdge { vertex: String },

  #[error("more than one half-edge runs from {from} to {to}")]
  DuplicateHalfEdge { from: String, to: String },

  #[error("{half_edge} starts and ends at the same vertex")]
  SelfLoop { half_edge: String },

  #[error("faces around vertex {vertex} form more than one fan")]
  SplitFan { vertex: String },
}

/// Why an edge cannot be flipped.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipRejection {
  #[error("edge lies on the boundary")]
  Boundary,

  #[error("both apex vertices are the same vertex")]
  DegenerateApex,

  #[error("apex vertices are already connected")]
  ExistingEdge,
}

pub type Result<T> = std::result::Result<T, MeshError>;
