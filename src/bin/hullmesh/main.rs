//! hullmesh CLI - inspect the half-edge structure of convex polyhedra.
//!
//! Usage: hullmesh [--log-level LEVEL] <COMMAND> [OPTIONS]
//!
//! Run `hullmesh --help` for available commands.

use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use nalgebra::Vector3;

use hullmesh::io::obj;
use hullmesh::primitives::{self, FaceTable};
use hullmesh::shape::ConvexPolyhedron;

#[derive(Parser)]
#[command(name = "hullmesh")]
#[command(author, version, about = "Half-edge structure inspector", long_about = None)]
struct Cli {
    /// Log level (error, warn, info, debug, trace); falls back to RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<LevelFilter>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a polyhedron from an OBJ file and report its structure
    Info {
        /// Input OBJ file
        input: PathBuf,
    },

    /// Build a built-in polyhedron and report its structure
    Primitive {
        /// Shape to build
        #[arg(value_enum)]
        shape: Shape,

        /// Number of sides for prisms and pyramids
        #[arg(short, long, default_value = "6")]
        sides: usize,
    },

    /// Find the support vertex of a polyhedron along a direction
    Support {
        /// Built-in shape to query
        #[arg(long, value_enum, required_unless_present = "input", conflicts_with = "input")]
        shape: Option<Shape>,

        /// OBJ file to query
        #[arg(long)]
        input: Option<PathBuf>,

        /// Number of sides for prisms and pyramids
        #[arg(short, long, default_value = "6")]
        sides: usize,

        /// Query direction as x,y,z
        #[arg(long, value_parser = parse_direction, allow_hyphen_values = true)]
        dir: Vector3<f64>,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Shape {
    /// Four triangles
    Tetrahedron,
    /// Six squares
    Cube,
    /// Eight triangles
    Octahedron,
    /// Regular n-gon prism
    Prism,
    /// Regular n-gon pyramid
    Pyramid,
}

impl Shape {
    fn table(self, sides: usize) -> Result<FaceTable, String> {
        if matches!(self, Shape::Prism | Shape::Pyramid) && sides < 3 {
            return Err(format!("--sides must be at least 3, got {}", sides));
        }
        Ok(match self {
            Shape::Tetrahedron => primitives::tetrahedron(),
            Shape::Cube => primitives::cube(),
            Shape::Octahedron => primitives::octahedron(),
            Shape::Prism => primitives::prism(sides),
            Shape::Pyramid => primitives::pyramid(sides),
        })
    }
}

fn parse_direction(s: &str) -> Result<Vector3<f64>, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected x,y,z, got '{}'", s));
    }
    let mut v = Vector3::zeros();
    for (i, part) in parts.iter().enumerate() {
        v[i] = part
            .parse::<f64>()
            .map_err(|_| format!("bad component '{}'", part))?;
    }
    if v.norm() == 0.0 {
        return Err("direction must be non-zero".to_string());
    }
    Ok(v)
}

fn init_logging(level: Option<LevelFilter>) {
    let level = level
        .or_else(|| std::env::var("RUST_LOG").ok().and_then(|v| v.parse().ok()))
        .unwrap_or(LevelFilter::Warn);
    env_logger::Builder::new()
        .filter_level(level)
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Info { input } => {
            println!("File: {}", input.display());
            cmd_info(obj::load(&input)?)?;
        }

        Commands::Primitive { shape, sides } => {
            cmd_info(shape.table(sides)?)?;
        }

        Commands::Support {
            shape,
            input,
            sides,
            dir,
        } => {
            let table = match (shape, input) {
                (Some(shape), _) => shape.table(sides)?,
                (None, Some(input)) => obj::load(&input)?,
                (None, None) => return Err("either --shape or --input is required".into()),
            };
            cmd_support(table, &dir)?;
        }
    }

    Ok(())
}

fn cmd_info(table: FaceTable) -> Result<(), Box<dyn std::error::Error>> {
    let start = Instant::now();
    let hull: ConvexPolyhedron = ConvexPolyhedron::from_table(table)?;
    let elapsed = start.elapsed();
    let s = hull.topology();

    println!("Vertices: {}", s.num_vertices());
    println!("Faces: {}", s.num_faces());
    println!("Half-edges: {}", s.num_edges());
    println!("Edges: {}", s.num_undirected_edges());
    println!("Euler characteristic: {}", s.euler_characteristic());

    let face_degrees = s.face_ids().map(|f| s.face_degree(f));
    let (fmin, fmax) = min_max(face_degrees);
    println!("Face degree range: [{}, {}]", fmin, fmax);

    let vertex_degrees = s.vertex_ids().map(|v| s.vertex_degree(v));
    let (vmin, vmax) = min_max(vertex_degrees);
    println!("Vertex degree range: [{}, {}]", vmin, vmax);

    match s.check_invariants() {
        Ok(()) => println!("Topology: valid"),
        Err(e) => println!("Topology: INVALID ({})", e),
    }
    println!(
        "Geometry: {}",
        if hull.is_convex(1e-9) { "convex" } else { "not convex" }
    );
    println!("Build time: {:.3}ms", elapsed.as_secs_f64() * 1000.0);

    Ok(())
}

fn cmd_support(table: FaceTable, dir: &Vector3<f64>) -> Result<(), Box<dyn std::error::Error>> {
    let hull: ConvexPolyhedron = ConvexPolyhedron::from_table(table)?;

    let v = hull.support_vertex(dir);
    let p = hull.position(v);
    println!("Support vertex: {} at ({:.6}, {:.6}, {:.6})", v.index(), p.x, p.y, p.z);

    let f = hull.support_face(dir);
    let n = hull.face_normal(f);
    println!(
        "Support face: {} with normal ({:.6}, {:.6}, {:.6})",
        f.index(),
        n.x,
        n.y,
        n.z
    );

    Ok(())
}

fn min_max(values: impl Iterator<Item = usize>) -> (usize, usize) {
    values.fold((usize::MAX, 0), |(lo, hi), d| (lo.min(d), hi.max(d)))
}
