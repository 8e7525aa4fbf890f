//! Accept/reject local search over rewrite operators.
//!
//! Each step rewrites one random window and keeps the result only if the
//! rewrite succeeded and the zone-crossing cost did not rise. Rejected steps
//! restore the window's internal flags, which are the only flags a rewrite
//! can touch, so a step is all-or-nothing.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Params;
use crate::edges::EdgeGrid;
use crate::error::{Error, Result};
use crate::grid::Cell;
use crate::path::extract_path;
use crate::rewrite::{Family, Operator, Outcome, Shape};
use crate::rng::Rng;
use crate::validate::validate;
use crate::window::Window;
use crate::zones::{Zones, crossings};

/// What happened to one trial rewrite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    Accepted,
    ShapeMismatch,
    NotRewritable,
    CostRose,
    /// Strict mode only: the rewrite broke the single-path invariant.
    BrokePath,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub steps: usize,
    pub accepted: usize,
    pub shape_mismatch: usize,
    pub not_rewritable: usize,
    pub cost_rose: usize,
    pub broke_path: usize,
}

impl Stats {
    fn record(&mut self, outcome: StepOutcome) {
        self.steps += 1;
        match outcome {
            StepOutcome::Accepted => self.accepted += 1,
            StepOutcome::ShapeMismatch => self.shape_mismatch += 1,
            StepOutcome::NotRewritable => self.not_rewritable += 1,
            StepOutcome::CostRose => self.cost_rose += 1,
            StepOutcome::BrokePath => self.broke_path += 1,
        }
    }
}

/// Search knobs taken from [`Params`].
#[derive(Clone, Copy, Debug)]
struct Knobs {
    flip_chance: f32,
    tall_chance: f32,
    all_orientations: bool,
    strict: bool,
    search_budget: u64,
}

pub struct Optimizer {
    edges: EdgeGrid,
    zones: Zones,
    rng: Rng,
    knobs: Knobs,
    cost: usize,
    path: Vec<Cell>,
    stats: Stats,
    last_window: Option<Window>,
}

impl Optimizer {
    pub fn new(edges: EdgeGrid, zones: Zones, rng: Rng, params: &Params) -> Result<Self> {
        zones.check_fits(&edges)?;
        let knobs = Knobs {
            flip_chance: params.flip_chance,
            tall_chance: params.tall_chance,
            all_orientations: params.all_orientations,
            strict: params.strict,
            search_budget: params.search_budget,
        };
        let cost = crossings(&edges, &zones);
        let path = extract_path(&edges, knobs.search_budget);
        Ok(Self {
            edges,
            zones,
            rng,
            knobs,
            cost,
            path,
            stats: Stats::default(),
            last_window: None,
        })
    }

    /// Swap in a new edge set and zone assignment (e.g. after loading a file).
    pub fn replace(&mut self, edges: EdgeGrid, zones: Zones) -> Result<()> {
        zones.check_fits(&edges)?;
        self.cost = crossings(&edges, &zones);
        self.path = extract_path(&edges, self.knobs.search_budget);
        self.edges = edges;
        self.zones = zones;
        self.stats = Stats::default();
        self.last_window = None;
        Ok(())
    }

    pub fn edges(&self) -> &EdgeGrid {
        &self.edges
    }

    pub fn zones(&self) -> &Zones {
        &self.zones
    }

    /// Current zone-crossing cost.
    pub fn cost(&self) -> usize {
        self.cost
    }

    /// Path as of the last `evolve` (or construction).
    pub fn path(&self) -> &[Cell] {
        &self.path
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Window used by the most recent step.
    pub fn last_window(&self) -> Option<&Window> {
        self.last_window.as_ref()
    }

    pub fn into_parts(self) -> (EdgeGrid, Zones, Vec<Cell>) {
        (self.edges, self.zones, self.path)
    }

    fn choose(&mut self) -> (Operator, Shape) {
        let family = if self.rng.chance(self.knobs.flip_chance) {
            Family::Flip
        } else {
            Family::Transpose
        };
        let op = if self.knobs.all_orientations {
            let ops: Vec<Operator> = Operator::ALL
                .into_iter()
                .filter(|op| op.family() == family)
                .collect();
            self.rng.pick(&ops).unwrap_or(Operator::Transpose)
        } else {
            match family {
                Family::Flip => Operator::Flip,
                Family::Transpose => Operator::Transpose,
            }
        };
        let shape = if op.accepts(Shape::Tall) && op.accepts(Shape::Wide) {
            if self.rng.chance(self.knobs.tall_chance) {
                Shape::Tall
            } else {
                Shape::Wide
            }
        } else {
            op.shapes().next().unwrap_or(Shape::Square)
        };
        (op, shape)
    }

    /// One trial rewrite at a random in-bounds anchor. Returns the cost
    /// after the step, which is never higher than before it.
    pub fn mutate(&mut self) -> Result<usize> {
        let (op, shape) = self.choose();
        let (w, h) = shape.dims();
        if w > self.edges.w || h > self.edges.h {
            return Err(Error::WindowTooLarge {
                shape,
                width: self.edges.w,
                height: self.edges.h,
            });
        }
        let x = self.rng.range_inclusive(0, self.edges.w - w);
        let y = self.rng.range_inclusive(0, self.edges.h - h);
        let window = self.edges.window_at(x, y, w, h);

        // Snapshot of everything the rewrite may change.
        let saved: Vec<(Cell, Cell, bool)> = window
            .internal_pairs()
            .map(|(a, b)| (a, b, self.edges.has_edge(a, b)))
            .collect();
        let before = self.cost;
        let local_before = self.local_crossings(&saved);

        let status = op.apply(&mut self.edges, &window);
        let outcome = match status.outcome {
            Outcome::ShapeMismatch => StepOutcome::ShapeMismatch,
            Outcome::NotRewritable => StepOutcome::NotRewritable,
            Outcome::Rewritten => {
                let now: Vec<(Cell, Cell, bool)> = saved
                    .iter()
                    .map(|&(a, b, _)| (a, b, self.edges.has_edge(a, b)))
                    .collect();
                let after = before - local_before + self.local_crossings(&now);
                debug_assert_eq!(after, crossings(&self.edges, &self.zones));
                if after > before {
                    StepOutcome::CostRose
                } else if self.knobs.strict && validate(&self.edges).is_err() {
                    StepOutcome::BrokePath
                } else {
                    self.cost = after;
                    StepOutcome::Accepted
                }
            }
        };

        if status.is_success() && outcome != StepOutcome::Accepted {
            for &(a, b, on) in &saved {
                self.edges.set_edge(a, b, on);
            }
        }
        if outcome == StepOutcome::BrokePath {
            warn!(op = %op, x, y, "strict mode: rewrite broke the path, rolled back");
        }
        debug!(op = %op, x, y, status = %status, ?outcome, cost = self.cost, "step");

        self.stats.record(outcome);
        self.last_window = Some(window);
        Ok(self.cost)
    }

    fn local_crossings(&self, pairs: &[(Cell, Cell, bool)]) -> usize {
        pairs
            .iter()
            .filter(|&&(a, b, on)| on && self.zones.zone(a.0, a.1) != self.zones.zone(b.0, b.1))
            .count()
    }

    /// Run up to `steps` mutations, stopping early at zero cost, then
    /// recompute the path once. Returns the best cost seen.
    pub fn evolve(&mut self, steps: usize) -> Result<usize> {
        let start = self.cost;
        let mut best = self.cost;
        let mut ran = 0;
        while ran < steps && best > 0 {
            best = best.min(self.mutate()?);
            ran += 1;
        }
        self.path = extract_path(&self.edges, self.knobs.search_budget);
        info!(
            steps = ran,
            start,
            best,
            accepted = self.stats.accepted,
            path_len = self.path.len(),
            "evolve finished"
        );
        Ok(best)
    }
}
