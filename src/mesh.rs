use nalgebra::base::Vector3;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufWriter;
use std::path::Path;

use log::info;

use crate::data_structure::{Face, Vertex};
use crate::error::Result;

/// A face-vertex soup: positions plus triangles indexing into them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
  pub vertices: Vec<Vertex>,
  pub faces: Vec<Face>,
}

impl Mesh {
  /// Loads every model of an OBJ file into one soup. Polygons are
  /// triangulated, points and lines are dropped.
  pub fn load(path: &Path) -> Result<Self> {
    let options = tobj::LoadOptions {
      triangulate: true,
      ignore_points: true,
      ignore_lines: true,
      single_index: false,
      ..Default::default()
    };
    let (models, _) = tobj::load_obj(path, &options)?;

    let mut vertices = Vec::new();
    let mut faces = Vec::new();
    for m in models {
      let mesh = &m.mesh;
      let offset = vertices.len() as u32;
      vertices.extend(
        mesh
          .positions
          .chunks_exact(3)
          .map(|vals| Vector3::new(vals[0], vals[1], vals[2])),
      );
      faces.extend(
        mesh
          .indices
          .chunks_exact(3)
          .map(|vals| [vals[0] + offset, vals[1] + offset, vals[2] + offset]),
      );
    }

    info!(
      "loaded {} faces and {} vertices from {}",
      faces.len(),
      vertices.len(),
      path.display()
    );

    Ok(Mesh { vertices, faces })
  }

  pub fn save(&self, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);

    writeln!(
      &mut writer,
      "# {} vertices, {} faces",
      self.vertices.len(),
      self.faces.len()
    )?;

    for vertex in &self.vertices {
      writeln!(&mut writer, "v {} {} {}", vertex[0], vertex[1], vertex[2])?;
    }

    for face in &self.faces {
      writeln!(
        &mut writer,
        "f {} {} {}",
        face[0] + 1,
        face[1] + 1,
        face[2] + 1
      )?;
    }

    writer.flush()?;

    info!(
      "saved {} faces and {} vertices to {}",
      self.faces.len(),
      self.vertices.len(),
      path.display()
    );

    Ok(())
  }
}
