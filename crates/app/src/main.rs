//! Entry point for objwire.
//! Loads an OBJ (plus material libraries and textures), waits for it the way a
//! render loop would, and reports or dumps the flattened buffers.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use asset::{Attribute, FlattenedMesh, ParseOptions};
use clap::Parser;
use platform::{FsFetcher, Session};

#[derive(Parser, Debug)]
#[command(name = "objwire", version, about = "Flatten Wavefront OBJ models into GPU-ready buffers")]
struct Cli {
    /// OBJ file to load
    path: PathBuf,

    /// Uniform scale applied to vertex positions
    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    /// Flip synthesized face normals
    #[arg(long)]
    reverse_normals: bool,

    /// Fail on the first malformed line instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Give up if loading takes longer than this
    #[arg(long, default_value_t = 10_000)]
    timeout_ms: u64,

    /// Write the flattened buffers to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output debug info
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            scale: self.scale,
            reverse_normals: self.reverse_normals,
            strict: self.strict,
        }
    }
}

/// Buffer dump: magic, corner count (u32 LE), then the attribute buffers in
/// [`Attribute::ALL`] order and the index buffer, all little-endian.
const DUMP_MAGIC: &[u8; 4] = b"OBJW";

fn write_dump(path: &Path, mesh: &FlattenedMesh) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Could not create file: {}", path.display()))?;
    let mut out = BufWriter::new(file);
    out.write_all(DUMP_MAGIC)?;
    out.write_all(&(mesh.corner_count() as u32).to_le_bytes())?;
    for attribute in Attribute::ALL {
        out.write_all(mesh.attribute_bytes(attribute))?;
    }
    out.write_all(mesh.index_bytes())?;
    out.flush()
        .with_context(|| format!("Could not write data to file: {}", path.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::new()
            .filter(None, log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let source = cli
        .path
        .to_str()
        .with_context(|| format!("Path is not valid UTF-8: {}", cli.path.display()))?
        .replace('\\', "/");
    log::info!("Starting objwire. scale={}, reverse_normals={}", cli.scale, cli.reverse_normals);

    let mut session = Session::new(FsFetcher::new(), cli.parse_options());
    session.open(&source);
    let mesh = session.wait(Duration::from_millis(cli.timeout_ms))?;

    if let Some(model) = session.model() {
        log::info!("vertex count: {}", model.vertex_count());
        for group in model.groups() {
            log::info!(
                "  group '{}': {} face(s), {} corner(s)",
                group.name,
                group.faces().len(),
                group.corner_count()
            );
        }
        for issue in model.report().errors() {
            log::warn!("{}", issue);
        }
        for (url, texture) in model.textures() {
            log::info!("  texture '{}': {}x{}", url, texture.width, texture.height);
        }
    }
    println!(
        "{}: {} triangles, {} corners",
        source,
        mesh.triangle_count(),
        mesh.corner_count()
    );

    if let Some(output) = &cli.output {
        write_dump(output, &mesh)?;
        log::info!("Wrote buffers to {}", output.display());
    }

    log::info!("Graceful shutdown. Bye!");
    Ok(())
}
