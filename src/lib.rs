pub mod config;
pub mod edgelist;
pub mod edges;
pub mod error;
pub mod grid;
pub mod optimize;
pub mod path;
pub mod render;
pub mod rewrite;
pub mod rng;
pub mod validate;
pub mod window;
pub mod zones;

use std::time::Instant;

use config::Params;
use edges::EdgeGrid;
use error::{Error, Result};
use grid::Cell;
use optimize::{Optimizer, Stats};
use rng::Rng;
use window::Window;
use zones::Zones;

/// Outcome of one optimization run.
pub struct Run {
    pub edges: EdgeGrid,
    pub zones: Zones,
    pub path: Vec<Cell>,
    pub initial_cost: usize,
    pub best_cost: usize,
    pub stats: Stats,
    /// Whether the final edge set is still one simple path over every cell.
    pub valid: bool,
    /// Window tried by the last optimizer step, if any step ran.
    pub last_window: Option<Window>,
}

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

fn lap(timings: &mut Vec<Timing>, name: &'static str, t: Instant) {
    timings.push(Timing {
        name,
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });
}

/// Seed (or take `loaded`), optimize for `params.steps`, extract the path.
///
/// A loaded edge set overrides `params.width`/`params.height`; zones are
/// assigned from `params.zones` for whatever size the grid ends up.
pub fn run(params: &Params, loaded: Option<EdgeGrid>) -> Result<(Run, Vec<Timing>)> {
    params.validate()?;
    let mut timings = Vec::new();
    let total_start = Instant::now();

    // 1. Seed path and zones
    let t = Instant::now();
    let edges = match loaded {
        Some(edges) => edges,
        None => EdgeGrid::zigzag(params.width, params.height),
    };
    if edges.w == 0 || edges.h == 0 {
        return Err(Error::EmptyGrid {
            width: edges.w,
            height: edges.h,
        });
    }
    let zones = params.zones.assign(edges.w, edges.h);
    let mut opt = Optimizer::new(edges, zones, Rng::new(params.seed), params)?;
    let initial_cost = opt.cost();
    lap(&mut timings, "seed", t);

    // 2. Local search (path recomputed once at the end)
    let t = Instant::now();
    let best_cost = opt.evolve(params.steps)?;
    lap(&mut timings, "evolve", t);

    // 3. Full validity check
    let t = Instant::now();
    let stats = opt.stats();
    let last_window = opt.last_window().cloned();
    let (edges, zones, path) = opt.into_parts();
    let valid = validate::validate(&edges).is_ok();
    lap(&mut timings, "validate", t);

    lap(&mut timings, "TOTAL", total_start);

    let run = Run {
        edges,
        zones,
        path,
        initial_cost,
        best_cost,
        stats,
        valid,
        last_window,
    };
    Ok((run, timings))
}
