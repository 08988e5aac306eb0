use crate::mesh_operation::Operation;
use crate::topology::flip;
use crate::DataStructure;

use clap::Args;
use log::{debug, info};

/// Flips edges to pull vertex valences towards 6.
#[derive(Args, Clone, Debug)]
pub struct EqualizeValence {
  /// Number of passes over all edges
  pub iterations: u32,
}

impl Operation for EqualizeValence {
  fn apply<D: DataStructure>(&self, mesh: &mut D) -> usize {
    let edges: Vec<_> = mesh.edge_keys().collect();
    let mut total = 0;

    for iteration in 0..self.iterations {
      let mut flipped = 0;

      for &edge_idx in &edges {
        if let ([l, r, top], Some(bottom)) = mesh.get_edge_neighbors(edge_idx) {
          let l_degree = mesh.degree(l) as i32;
          let r_degree = mesh.degree(r) as i32;
          let top_degree = mesh.degree(top) as i32;
          let bottom_degree = mesh.degree(bottom) as i32;

          let flip_dev = (l_degree - 7).abs()
            + (r_degree - 7).abs()
            + (top_degree - 5).abs()
            + (bottom_degree - 5).abs();
          let no_flip_dev = (l_degree - 6).abs()
            + (r_degree - 6).abs()
            + (top_degree - 6).abs()
            + (bottom_degree - 6).abs();

          if flip_dev < no_flip_dev
            && l_degree > 3
            && r_degree > 3
            && flip(mesh, edge_idx)
          {
            flipped += 1;
          }
        }
      }

      debug!("valence pass {}: {} flips", iteration, flipped);
      total += flipped;

      if flipped == 0 {
        break;
      }
    }

    info!("equalized valence with {} flips", total);
    total
  }
}
