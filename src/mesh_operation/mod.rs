use crate::DataStructure;

/// A flip-driven rewrite of a mesh.
pub trait Operation {
  /// Runs the operation in place and returns the number of edges flipped.
  fn apply<D: DataStructure>(&self, mesh: &mut D) -> usize;
}

mod delaunay;
mod scramble;
mod valence;

pub use delaunay::Delaunay;
pub use scramble::Scramble;
pub use valence::EqualizeValence;
