use anyhow::{Context, Result};
use clap::Parser;
use labtrace::config::parse_config_json;
use labtrace::im::{label_im, LabelIm};
use labtrace::polygon::boundary_map_to_json;
use labtrace::{Connectivity, TraceConfig, Tracer, VertexLocation};
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "labtrace")]
#[command(about = "Trace the boundaries of every region in a label image")]
struct Cmd {
    /// Label PNG: 8/16-bit grayscale, or RGBA8-packed i32
    input: PathBuf,

    /// JSON file with connectivity, vertex_location and background
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pixel connectivity, 4 or 8
    #[arg(long)]
    conn: Option<u8>,

    /// Vertex placement: corner, edge_center or pixel
    #[arg(long)]
    vertex: Option<VertexLocation>,

    /// Label value that is never traced
    #[arg(long, allow_hyphen_values = true)]
    background: Option<i64>,

    /// Collapse repeated consecutive vertices (pixel-centre outlines repeat points)
    #[arg(long)]
    dedup: bool,

    /// Split equal-valued regions into connected components before tracing
    #[arg(long)]
    components: bool,

    /// Write the component label image here (requires --components)
    #[arg(long, requires = "components")]
    labels_out: Option<PathBuf>,

    /// Output JSON path; stdout when omitted
    #[arg(long)]
    out: Option<PathBuf>,
}

fn load_config(cmd: &Cmd) -> Result<TraceConfig> {
    let mut config = match &cmd.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            parse_config_json(&json).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => TraceConfig::default(),
    };

    if let Some(conn) = cmd.conn {
        config.connectivity = Connectivity::try_from(conn)?;
    }
    if let Some(loc) = cmd.vertex {
        config.vertex_location = loc;
    }
    if let Some(background) = cmd.background {
        config.background = background;
    }
    Ok(config)
}

fn relabel_components(cmd: &Cmd, labels: &LabelIm, config: &mut TraceConfig) -> Result<LabelIm> {
    let background = i32::try_from(config.background)
        .with_context(|| format!("background {} does not fit an i32 label", config.background))?;

    let (components, infos) = label_im(labels, background, config.connectivity);
    tracing::info!(components = infos.len() - 1, conn = %config.connectivity, "labeled components");

    if let Some(path) = &cmd.labels_out {
        components
            .save_png(path)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    // Component ids start at 1; unlabeled pixels are 0.
    config.background = 0;
    Ok(components)
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();

    let mut config = load_config(&cmd)?;

    let mut labels = LabelIm::load_png(&cmd.input)
        .with_context(|| format!("loading {}", cmd.input.display()))?;
    tracing::info!(w = labels.w, h = labels.h, input = %cmd.input.display(), "loaded labels");

    if cmd.components {
        labels = relabel_components(&cmd, &labels, &mut config)?;
    }

    let tracer = Tracer::new(config);
    let mut boundaries = tracer.scan(&labels)?;
    if cmd.dedup {
        for poly in boundaries.values_mut().flatten() {
            *poly = poly.dedup_consecutive();
        }
    }
    let n_polys: usize = boundaries.values().map(Vec::len).sum();
    tracing::info!(
        labels = boundaries.len(),
        polygons = n_polys,
        conn = %tracer.connectivity(),
        vertex = ?tracer.vertex_location(),
        "traced"
    );

    let json = boundary_map_to_json(&boundaries)?;
    match &cmd.out {
        Some(path) => std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?,
        None => println!("{json}"),
    }

    Ok(())
}
