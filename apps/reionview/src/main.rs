//! reionview - slice viewer for meraxes ionization grids
//!
//! Reads one snapshot of a meraxes output file, cuts the requested slab out
//! of the neutral hydrogen fraction grid, optionally overlays the galaxies
//! inside the slab colored by their cooling state, and writes the figure as
//! PNG with a JSON sidecar carrying the title and axis labels.

use clap::Parser;
use reionview_core::{
    cooling_flags, extract_slice, render_figure, Annotations, FigureConfig, GalaxyOverlay,
    DEFAULT_TVIR_THRESH,
};
use reionview_io::Snapshot;
use reionview_slice::{parse_slice_spec, Slab};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Plot a slice through the neutral hydrogen fraction grid of a meraxes
/// snapshot, optionally overplotting the galaxies inside the slab.
#[derive(Debug, Parser)]
#[command(name = "reionview", version, about)]
struct Cli {
    /// meraxes output file
    input_file: PathBuf,

    /// Snapshot index to plot
    snapshot: u32,

    /// Output PNG filename
    output_file: PathBuf,

    /// Box slice, e.g. ":,10,:" or ":,:,5"
    slice: String,

    /// Show a color bar
    #[arg(long)]
    color_bar: bool,

    /// Colormap name
    #[arg(long, default_value = "bupu")]
    cmap: String,

    /// Overplot the galaxies inside the slab
    #[arg(long)]
    galaxies: bool,

    /// Virial temperature threshold for the cooling classification [K]
    #[arg(long, default_value_t = DEFAULT_TVIR_THRESH)]
    tvir_thresh: f64,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("reionview: {}", message);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let snapshot = Snapshot::open(&cli.input_file, cli.snapshot)
        .map_err(|e| format!("cannot open snapshot {}: {}", cli.snapshot, e))?;
    let redshift = snapshot
        .redshift()
        .map_err(|e| format!("cannot read snapshot metadata: {}", e))?;
    let (field, props) = snapshot
        .read_grid()
        .map_err(|e| format!("cannot read xH grid: {}", e))?;
    info!(
        snap = cli.snapshot,
        redshift,
        dim = props.dim,
        box_len = props.box_len,
        "loaded grid"
    );

    let spec = parse_slice_spec(&cli.slice, props.dim)
        .map_err(|e| format!("invalid slice '{}': {}", cli.slice, e))?;
    let reduced = extract_slice(&field, &spec)
        .map_err(|e| format!("invalid slice '{}': {}", cli.slice, e))?;
    let slab = Slab::from_spec(&spec, props.dim, props.box_len)
        .map_err(|e| format!("invalid slice '{}': {}", cli.slice, e))?;
    info!(
        slice_axis = %reduced.slice_axis(),
        shape = ?reduced.shape(),
        "extracted slice"
    );

    let overlay_data = if cli.galaxies {
        let galaxies = snapshot
            .read_galaxies()
            .map_err(|e| format!("cannot read galaxies: {}", e))?;
        let selected = galaxies.filter_slab(&slab);
        let flags = cooling_flags(&selected, &field, cli.tvir_thresh);
        let cooling = flags.iter().filter(|&&c| c).count();
        info!(
            total = galaxies.len(),
            selected = selected.len(),
            cooling,
            "classified galaxies in slab"
        );
        Some((selected, flags))
    } else {
        None
    };

    let config = FigureConfig {
        colormap: cli.cmap.clone(),
        color_bar: cli.color_bar,
        ..FigureConfig::default()
    };
    let overlay = overlay_data.as_ref().map(|(galaxies, flags)| GalaxyOverlay {
        galaxies,
        cooling: flags,
    });

    let image = render_figure(&reduced, &slab, &config, overlay)
        .map_err(|e| format!("cannot render figure: {}", e))?;
    reionview_core::export_png(&image, &cli.output_file)
        .map_err(|e| format!("cannot write {}: {}", cli.output_file.display(), e))?;

    let annotations = Annotations::new(redshift, props.global_xh, &cli.slice, reduced.slice_axis());
    write_sidecar(cli, &annotations, &config)?;

    info!(output = %cli.output_file.display(), "figure written");
    Ok(())
}

/// Write the title and axis labels next to the PNG
fn write_sidecar(
    cli: &Cli,
    annotations: &Annotations,
    config: &FigureConfig,
) -> Result<(), String> {
    let sidecar = serde_json::json!({
        "title": annotations.title,
        "x_label": annotations.x_label,
        "y_label": annotations.y_label,
        "colormap": config.colormap,
        "color_bar": config.color_bar,
        "input_file": cli.input_file,
        "snapshot": cli.snapshot,
        "slice": cli.slice,
    });

    let path = cli.output_file.with_extension("json");
    let body = serde_json::to_string_pretty(&sidecar)
        .map_err(|e| format!("cannot serialize sidecar: {}", e))?;
    std::fs::write(&path, body).map_err(|e| format!("cannot write {}: {}", path.display(), e))
}
