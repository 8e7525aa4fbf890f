use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

use hamgrid::config::Params;
use hamgrid::edgelist;
use hamgrid::error::Result;
use hamgrid::render;

const CELL_PX: usize = 24;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let defaults = Params::default();

    let params = Params {
        seed: args.get(1).and_then(|s| s.parse().ok()).unwrap_or(defaults.seed),
        width: args.get(2).and_then(|s| s.parse().ok()).unwrap_or(defaults.width),
        height: args.get(3).and_then(|s| s.parse().ok()).unwrap_or(defaults.height),
        steps: args.get(4).and_then(|s| s.parse().ok()).unwrap_or(defaults.steps),
        ..defaults
    };
    let out_dir: PathBuf = args
        .get(5)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("artifacts"));
    let loaded = args.get(6).map(edgelist::load_edges).transpose()?;

    std::fs::create_dir_all(&out_dir)?;

    info!(
        seed = params.seed,
        width = params.width,
        height = params.height,
        steps = params.steps,
        loaded = loaded.is_some(),
        "starting run"
    );

    let (run, timings) = hamgrid::run(&params, loaded)?;

    eprintln!("\nTimings:");
    for t in &timings {
        eprintln!("  {:20} {:8.1} ms", t.name, t.ms);
    }
    eprintln!(
        "\nCost {} -> {} ({} of {} steps accepted), path {}/{} cells, valid = {}",
        run.initial_cost,
        run.best_cost,
        run.stats.accepted,
        run.stats.steps,
        run.path.len(),
        run.edges.cell_count(),
        run.valid,
    );

    if run.edges.w <= 40 {
        eprintln!("\n{}", render::ascii(&run.edges, run.last_window.as_ref()));
    }

    let rgba = render::render_rgba(&run.edges, &run.zones, run.last_window.as_ref(), CELL_PX);
    let (pw, ph) = render::image_dims(&run.edges, CELL_PX);
    let png = out_dir.join("path.png");
    image::save_buffer(&png, &rgba, pw as u32, ph as u32, image::ColorType::Rgba8)?;
    info!(path = %png.display(), "saved image");

    edgelist::save_path(out_dir.join("path.txt"), &run.path)?;

    let summary = serde_json::json!({
        "params": params,
        "width": run.edges.w,
        "height": run.edges.h,
        "initial_cost": run.initial_cost,
        "best_cost": run.best_cost,
        "valid": run.valid,
        "path_len": run.path.len(),
        "stats": run.stats,
    });
    std::fs::write(out_dir.join("summary.json"), serde_json::to_string_pretty(&summary)?)?;

    eprintln!("\nDone.");
    Ok(())
}
