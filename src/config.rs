use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::path::DEFAULT_SEARCH_BUDGET;
use crate::zones::ZonePolicy;

/// All tunable parameters. Missing fields in JSON fall back to defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    pub seed: u64,
    pub width: usize,
    pub height: usize,

    // Search
    pub steps: usize,
    /// Probability a step attempts a flip rather than a transpose.
    pub flip_chance: f32,
    /// Probability a flip uses a 2x3 window rather than 3x2.
    pub tall_chance: f32,
    /// Pick among every operator matching the window shape instead of only
    /// the plain transpose and flip.
    pub all_orientations: bool,
    /// Roll back accepted steps that break the single-path invariant.
    pub strict: bool,

    // Path extraction
    pub search_budget: u64,

    pub zones: ZonePolicy,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            seed: 42,
            width: 10,
            height: 10,
            steps: 1000,
            flip_chance: 0.5,
            tall_chance: 0.5,
            all_orientations: false,
            strict: false,
            search_budget: DEFAULT_SEARCH_BUDGET,
            zones: ZonePolicy::Halves,
        }
    }
}

impl Params {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        for (name, p) in [("flip_chance", self.flip_chance), ("tall_chance", self.tall_chance)] {
            if !(0.0..=1.0).contains(&p) {
                return Err(Error::config(format!("{name} must be in [0, 1], got {p}")));
            }
        }
        Ok(())
    }
}
