#![allow(dead_code)]

use std::collections::BTreeSet;
use std::f32::consts::TAU;

use meshtopo::data_structure::{DataStructure, Face, Vertex};

fn build<D: DataStructure>(vertices: Vec<Vertex>, faces: Vec<Face>) -> D {
  D::from_iters(vertices, faces).unwrap()
}

/// Two triangles sharing the edge 0-1.
pub fn quad<D: DataStructure>() -> D {
  build(
    vec![
      Vertex::new(0.0, 0.0, 0.0),
      Vertex::new(1.0, 0.0, 0.0),
      Vertex::new(0.5, 1.0, 0.0),
      Vertex::new(0.5, -1.0, 0.0),
    ],
    vec![[0, 1, 2], [1, 0, 3]],
  )
}

pub fn tetrahedron<D: DataStructure>() -> D {
  build(
    vec![
      Vertex::new(0.0, 0.0, 0.0),
      Vertex::new(1.0, 0.0, 0.0),
      Vertex::new(0.5, 1.0, 0.0),
      Vertex::new(0.5, 0.5, 1.0),
    ],
    vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]],
  )
}

/// Two triangles glued along all three edges.
pub fn pillow<D: DataStructure>() -> D {
  build(
    vec![
      Vertex::new(0.0, 0.0, 0.0),
      Vertex::new(1.0, 0.0, 0.0),
      Vertex::new(0.5, 1.0, 0.0),
    ],
    vec![[0, 1, 2], [1, 0, 2]],
  )
}

/// Closed `m` x `n` triangulated torus; every vertex has valence 6.
pub fn torus<D: DataStructure>(m: u32, n: u32) -> D {
  assert!(m >= 3 && n >= 3);

  let mut vertices = Vec::new();
  for i in 0..m {
    let theta = TAU * i as f32 / m as f32;
    for j in 0..n {
      let phi = TAU * j as f32 / n as f32;
      let radius = 2.0 + phi.cos();
      vertices.push(Vertex::new(
        radius * theta.cos(),
        radius * theta.sin(),
        phi.sin(),
      ));
    }
  }

  let index = |i: u32, j: u32| (i % m) * n + (j % n);
  let mut faces = Vec::new();
  for i in 0..m {
    for j in 0..n {
      let (a, b) = (index(i, j), index(i + 1, j));
      let (c, d) = (index(i + 1, j + 1), index(i, j + 1));
      faces.push([a, b, c]);
      faces.push([a, c, d]);
    }
  }

  build(vertices, faces)
}

/// Open `m` x `n` grid of split squares in the plane.
pub fn grid<D: DataStructure>(m: u32, n: u32) -> D {
  assert!(m >= 1 && n >= 1);

  let mut vertices = Vec::new();
  for i in 0..=m {
    for j in 0..=n {
      vertices.push(Vertex::new(i as f32, j as f32, 0.0));
    }
  }

  let index = |i: u32, j: u32| i * (n + 1) + j;
  let mut faces = Vec::new();
  for i in 0..m {
    for j in 0..n {
      let (a, b) = (index(i, j), index(i + 1, j));
      let (c, d) = (index(i + 1, j + 1), index(i, j + 1));
      faces.push([a, b, c]);
      faces.push([a, c, d]);
    }
  }

  build(vertices, faces)
}

/// Closed double pyramid over a `ring`-gon.
pub fn bipyramid<D: DataStructure>(ring: u32) -> D {
  assert!(ring >= 3);

  let mut vertices: Vec<Vertex> = (0..ring)
    .map(|i| {
      let angle = TAU * i as f32 / ring as f32;
      Vertex::new(angle.cos(), angle.sin(), 0.0)
    })
    .collect();
  let (top, bottom) = (ring, ring + 1);
  vertices.push(Vertex::new(0.0, 0.0, 1.0));
  vertices.push(Vertex::new(0.0, 0.0, -1.0));

  let mut faces = Vec::new();
  for i in 0..ring {
    let j = (i + 1) % ring;
    faces.push([i, j, top]);
    faces.push([j, i, bottom]);
  }

  build(vertices, faces)
}

/// Faces rotated to start at their smallest vertex, as a set.
pub fn canonical_faces<D: DataStructure>(mesh: &D) -> BTreeSet<Face> {
  let (_, faces) = mesh.to_vecs();
  faces
    .into_iter()
    .map(|face| {
      let start = (0..3).min_by_key(|&i| face[i]).unwrap_or(0);
      [face[start], face[(start + 1) % 3], face[(start + 2) % 3]]
    })
    .collect()
}

pub fn undirected_edges<D: DataStructure>(mesh: &D) -> BTreeSet<[u32; 2]> {
  let (_, faces) = mesh.to_vecs();
  faces
    .iter()
    .flat_map(|face| {
      (0..3).map(move |i| {
        let (a, b) = (face[i], face[(i + 1) % 3]);
        [a.min(b), a.max(b)]
      })
    })
    .collect()
}

pub fn valence_deviation<D: DataStructure>(mesh: &D) -> usize {
  mesh
    .vertex_keys()
    .map(|v| (mesh.degree(v) as i64 - 6).unsigned_abs() as usize)
    .sum()
}
