//! Mesh loader command line tool.
//!
//! Usage: rs-mesh-loaders [OPTIONS] <PATHS>...
//!
//! Loads each file and prints a summary. Set `RUST_LOG=debug` to follow the readers.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;

use rs_mesh_loaders::format::Format;
use rs_mesh_loaders::loader::{LoadOptions, load_mesh_with};
use rs_mesh_loaders::mesh::{LoadedMesh, Mesh};

#[derive(Parser)]
#[command(name = "rs-mesh-loaders")]
#[command(author, version, about = "Reads hydrodynamics mesh files", long_about = None)]
struct Cli {
    /// Mesh files to read
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Format keyword, instead of the file extension
    #[arg(short, long)]
    format: Option<String>,

    /// Name given to the loaded mesh
    #[arg(short, long)]
    name: Option<String>,

    /// Fail if a face refers to a missing vertex
    #[arg(long)]
    check_indices: bool,

    /// Print vertex and face tables
    #[arg(short, long)]
    verbose: bool,
}

fn dump_mesh(mesh: &Mesh) {
    for (i, v) in mesh.vertices.iter().enumerate() {
        println!("  v{:<6} {:12.6} {:12.6} {:12.6}", i, v.x, v.y, v.z);
    }
    for (i, f) in mesh.faces.iter().enumerate() {
        println!("  f{:<6} {:6} {:6} {:6} {:6}", i, f[0], f[1], f[2], f[3]);
    }
}

fn summary(path: &Path, loaded: &LoadedMesh) -> String {
    let mesh = loaded.stored();
    let mut line = format!(
        "{}: {} vertices, {} faces ({} triangles, {} quadrangles)",
        path.display(),
        mesh.nb_vertices(),
        mesh.nb_faces(),
        mesh.nb_triangles(),
        mesh.nb_quadrangles()
    );
    if let LoadedMesh::Symmetric(sym) = loaded {
        line.push_str(&format!(", half of a mesh symmetric about {:?}", sym.plane.normal.as_slice()));
    }
    if let Some(name) = loaded.name() {
        line.push_str(&format!(", named {}", name));
    }
    line
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if let Some(keyword) = &cli.format {
        keyword.parse::<Format>().with_context(|| {
            format!(
                "Known formats: {}",
                Format::keywords().collect::<Vec<_>>().join(", ")
            )
        })?;
    }

    let mut options = LoadOptions::new().check_indices(cli.check_indices);
    options.format = cli.format.clone();
    options.name = cli.name.clone();

    // Independent files, no state is shared between readers.
    let results: Vec<_> = cli
        .paths
        .par_iter()
        .map(|path| (path, load_mesh_with(path, &options)))
        .collect();

    let mut failures = 0;
    for (path, result) in results {
        match result {
            Ok(loaded) => {
                println!("{}", summary(path, &loaded));
                if cli.verbose {
                    dump_mesh(loaded.stored());
                }
            }
            Err(e) => {
                eprintln!("{}: {}", path.display(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} files could not be read", failures, cli.paths.len());
    }
    Ok(())
}
