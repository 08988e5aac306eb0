use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use log::{error, info, LevelFilter};

use meshtopo::error::{MeshError, Result};
use meshtopo::topology::{check_flip, check_invariants, find_edge, flip, is_flip_ok};
use meshtopo::{
  DataStructure, Delaunay, EqualizeValence, HalfEdge, Operation, Scramble,
  SurfaceMesh,
};

#[derive(Parser)]
#[command(name = "meshtopo")]
#[command(version, about = "Edge flips on triangle meshes", long_about = None)]
struct Opts {
  /// More output per occurrence (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = ArgAction::Count)]
  verbose: u8,

  /// Mesh kernel to run on
  #[arg(long, value_enum, default_value = "half-edge")]
  kernel: Kernel,

  /// Input mesh file
  infile: PathBuf,
  /// Output mesh file
  outfile: PathBuf,

  #[command(subcommand)]
  method: Methods,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Kernel {
  HalfEdge,
  SurfaceMesh,
}

#[derive(Subcommand)]
enum Methods {
  /// Flip the edge joining two vertices (0-based indices)
  Flip { u: u32, v: u32 },
  /// Flip edges to bring vertex valences closer to 6
  Valence(EqualizeValence),
  /// Flip edges until the mesh is locally Delaunay
  Delaunay(Delaunay),
  /// Flip random edges
  Scramble(Scramble),
  /// Print mesh statistics and save the mesh unchanged
  Info,
}

fn log_filter_from_count(count: u8) -> LevelFilter {
  match count {
    0 => LevelFilter::Warn,
    1 => LevelFilter::Info,
    2 => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  }
}

fn print_info<D: DataStructure>(mesh: &D) {
  let boundary = mesh
    .edge_keys()
    .filter(|&edge| mesh.is_boundary_edge(edge))
    .count();
  let flippable = mesh
    .edge_keys()
    .filter(|&edge| is_flip_ok(mesh, edge))
    .count();
  let degrees: Vec<usize> = mesh
    .vertex_keys()
    .map(|vertex| mesh.degree(vertex))
    .filter(|&degree| degree > 0)
    .collect();

  println!("vertices:       {}", mesh.num_vertices());
  println!("edges:          {}", mesh.num_edges());
  println!("faces:          {}", mesh.num_faces());
  println!("boundary edges: {}", boundary);
  println!("flippable:      {}", flippable);
  if let (Some(min), Some(max)) = (degrees.iter().min(), degrees.iter().max()) {
    println!("valence:        {}..={}", min, max);
  }
}

fn run<D: DataStructure>(opts: &Opts) -> Result<()> {
  let mut mesh = D::from_obj(&opts.infile)?;
  check_invariants(&mesh)?;

  let flips = match &opts.method {
    Methods::Flip { u, v } => {
      let edge = match (mesh.vertex_key(*u), mesh.vertex_key(*v)) {
        (Some(a), Some(b)) => find_edge(&mesh, a, b),
        _ => None,
      }
      .ok_or(MeshError::EdgeNotFound(*u, *v))?;

      check_flip(&mesh, edge)
        .map_err(|reason| MeshError::FlipRejected(*u, *v, reason))?;
      usize::from(flip(&mut mesh, edge))
    }
    Methods::Valence(op) => op.apply(&mut mesh),
    Methods::Delaunay(op) => op.apply(&mut mesh),
    Methods::Scramble(op) => op.apply(&mut mesh),
    Methods::Info => {
      print_info(&mesh);
      0
    }
  };
  info!("{} edges flipped", flips);

  check_invariants(&mesh)?;
  mesh.save_obj(&opts.outfile)
}

fn main() -> ExitCode {
  let opts = Opts::parse();

  env_logger::Builder::new()
    .filter_level(log_filter_from_count(opts.verbose))
    .parse_default_env()
    .init();

  let result = match opts.kernel {
    Kernel::HalfEdge => run::<HalfEdge>(&opts),
    Kernel::SurfaceMesh => run::<SurfaceMesh>(&opts),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      error!("{}", e);
      ExitCode::FAILURE
    }
  }
}
