use std::f32::consts::PI;

use crate::mesh_operation::Operation;
use crate::topology::flip;
use crate::utils::{get_normal, interior_angle};
use crate::DataStructure;

use clap::Args;
use log::{debug, info};
use ordered_float::OrderedFloat;

const ANGLE_EPSILON: f32 = 1e-5;

/// Flips interior edges until every one is locally Delaunay: the two angles
/// facing an edge sum to at most pi.
#[derive(Args, Clone, Debug, Default)]
pub struct Delaunay {
  /// Stop after this many flips; needed for surfaces that keep cycling
  #[arg(long)]
  pub max_flips: Option<usize>,
}

/// Sum of the angles facing `edge_idx` before and after flipping it, `None`
/// on the boundary.
fn opposite_angles<D: DataStructure>(
  mesh: &D,
  edge_idx: D::EdgeKey,
) -> Option<(f32, f32)> {
  let ([l, r, top], bottom) = mesh.get_edge_neighbors(edge_idx);
  let bottom = bottom?;

  let [l, r, top, bottom] = [l, r, top, bottom].map(|v| mesh.get_position(v));

  let current = interior_angle(top, l, r) + interior_angle(bottom, l, r);
  let flipped = interior_angle(l, top, bottom) + interior_angle(r, top, bottom);

  Some((current, flipped))
}

/// Whether the two triangles made by flipping `edge_idx` face the same
/// side, so the flip does not fold the surface over.
fn flip_keeps_orientation<D: DataStructure>(
  mesh: &D,
  edge_idx: D::EdgeKey,
) -> bool {
  let ([l, r, top], bottom) = mesh.get_edge_neighbors(edge_idx);
  let bottom = match bottom {
    Some(bottom) => bottom,
    None => return false,
  };

  let [l, r, top, bottom] = [l, r, top, bottom].map(|v| mesh.get_position(v));

  let first = get_normal([bottom, top, l]);
  let second = get_normal([top, bottom, r]);
  // degenerate triangles give NaN normals and fail here too
  first.dot(&second) > 0.0
}

impl Operation for Delaunay {
  fn apply<D: DataStructure>(&self, mesh: &mut D) -> usize {
    let limit = self.max_flips.unwrap_or(usize::MAX);
    let mut total = 0;
    let mut pass = 0;

    while total < limit {
      let mut candidates: Vec<_> = mesh
        .edge_keys()
        .filter_map(|edge_idx| {
          let (current, _) = opposite_angles(mesh, edge_idx)?;
          if current > PI + ANGLE_EPSILON {
            Some((OrderedFloat(current), edge_idx))
          } else {
            None
          }
        })
        .collect();

      // worst edge first
      candidates.sort_unstable_by(|a, b| b.cmp(a));

      let mut flipped = 0;
      for (_, edge_idx) in candidates {
        if total == limit {
          break;
        }
        // earlier flips in this pass may have changed the quad
        let improves = match opposite_angles(mesh, edge_idx) {
          Some((current, after)) => current > PI + ANGLE_EPSILON && after < current,
          None => false,
        };
        if improves
          && flip_keeps_orientation(mesh, edge_idx)
          && flip(mesh, edge_idx)
        {
          flipped += 1;
          total += 1;
        }
      }

      debug!("delaunay pass {}: {} flips", pass, flipped);
      pass += 1;

      if flipped == 0 {
        break;
      }
    }

    info!("delaunay flipping done after {} flips", total);
    total
  }
}
