//! objinfo: load OBJ meshes and report what the loader produced.
//! Usage: objinfo [--triangulation=fan|verbatim] [--dump] <file.obj>...

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use asset::{MeshData, MeshLibrary, ObjOptions, Triangulation};

#[derive(Debug, Default, PartialEq)]
struct Args {
    triangulation: Triangulation,
    dump: bool,
    files: Vec<PathBuf>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    for arg in args {
        if let Some(val) = arg.strip_prefix("--triangulation=") {
            parsed.triangulation = match val.to_ascii_lowercase().as_str() {
                "fan" => Triangulation::Fan,
                "verbatim" | "none" => Triangulation::Verbatim,
                other => bail!("Unknown triangulation '{}' (expected fan|verbatim)", other),
            };
        } else if arg == "--dump" {
            parsed.dump = true;
        } else if arg.starts_with("--") {
            bail!("Unknown flag '{}'", arg);
        } else {
            parsed.files.push(PathBuf::from(arg));
        }
    }
    if parsed.files.is_empty() {
        bail!("Usage: objinfo [--triangulation=fan|verbatim] [--dump] <file.obj>...");
    }
    Ok(parsed)
}

/// Verbatim meshes keep one index per face reference, so their index
/// buffer is only a triangle list for all-triangle files.
fn primitive_summary(mesh: &MeshData, triangulation: Triangulation) -> String {
    match triangulation {
        Triangulation::Fan => format!("{} triangles", mesh.triangle_count()),
        Triangulation::Verbatim => format!("{} face references", mesh.indices.len()),
    }
}

fn report(path: &Path, mesh: &MeshData, args: &Args) {
    log::info!(
        "{}: {} vertices, {} indices, {}, {} bytes of vertex data",
        path.display(),
        mesh.vertices.len(),
        mesh.indices.len(),
        primitive_summary(mesh, args.triangulation),
        mesh.vertex_bytes().len()
    );
    match mesh.bounds() {
        Some(aabb) => log::info!(
            "  bounds min={:?} max={:?} center={:?} size={:?}",
            aabb.min,
            aabb.max,
            aabb.center(),
            aabb.extent()
        ),
        None => log::warn!("  {} contains no faces", path.display()),
    }
    if args.dump {
        for (i, v) in mesh.vertices.iter().enumerate() {
            println!("{i:6} p={:?} n={:?} uv={:?}", v.position, v.normal, v.uv);
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args(std::env::args().skip(1))?;
    log::info!(
        "objinfo: {} file(s), triangulation={:?}",
        args.files.len(),
        args.triangulation
    );

    let mut library =
        MeshLibrary::with_options(ObjOptions::default().with_triangulation(args.triangulation));
    let mut failures = 0usize;
    for path in &args.files {
        match library
            .load(path)
            .with_context(|| format!("Failed to load {}", path.display()))
        {
            Ok(mesh) => report(path, &mesh, &args),
            Err(e) => {
                log::error!("{e:#}");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} file(s) failed to load", failures, args.files.len());
    }
    Ok(())
}
