use crate::mesh_operation::Operation;
use crate::topology::{flip, is_flip_ok};
use crate::DataStructure;

use clap::Args;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

// random picks allowed per requested flip before giving up
const ATTEMPTS_PER_FLIP: usize = 16;

/// Flips randomly chosen edges. The same seed gives the same result.
#[derive(Args, Clone, Debug)]
pub struct Scramble {
  /// Number of flips to perform
  pub flips: usize,
  #[arg(long, default_value_t = 0)]
  pub seed: u64,
}

impl Operation for Scramble {
  fn apply<D: DataStructure>(&self, mesh: &mut D) -> usize {
    let edges: Vec<_> = mesh.edge_keys().collect();
    let mut rng = StdRng::seed_from_u64(self.seed);

    let max_attempts = self.flips.saturating_mul(ATTEMPTS_PER_FLIP);
    if !edges.iter().any(|&edge_idx| is_flip_ok(mesh, edge_idx)) {
      info!("no edge can be flipped, leaving the mesh as is");
      return 0;
    }

    let mut flipped = 0;
    let mut attempts = 0;
    while flipped < self.flips && attempts < max_attempts {
      attempts += 1;
      if let Some(&edge_idx) = edges.choose(&mut rng) {
        if flip(mesh, edge_idx) {
          flipped += 1;
        }
      }
    }

    debug!("{} attempts for {} flips", attempts, flipped);
    info!("scrambled mesh with {} flips", flipped);
    flipped
  }
}
