use serde::{Deserialize, Serialize};

use crate::edges::EdgeGrid;
use crate::error::{Error, Result};
use crate::grid::Grid;

/// Zone label per cell. Supplied from outside the core; replaced wholesale
/// when the grid changes size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Zones {
    pub ids: Grid<u8>,
}

impl Zones {
    pub fn from_fn(w: usize, h: usize, f: impl FnMut(usize, usize) -> u8) -> Self {
        Self {
            ids: Grid::from_fn(w, h, f),
        }
    }

    /// Left half of the columns is zone 1, the right half zone 2.
    pub fn halves(w: usize, h: usize) -> Self {
        ZonePolicy::Halves.assign(w, h)
    }

    #[inline]
    pub fn zone(&self, x: usize, y: usize) -> u8 {
        self.ids.get(x, y)
    }

    /// Error unless sized for `edges`.
    pub fn check_fits(&self, edges: &EdgeGrid) -> Result<()> {
        if self.ids.w != edges.w || self.ids.h != edges.h {
            return Err(Error::ZoneMismatch {
                zones_w: self.ids.w,
                zones_h: self.ids.h,
                width: edges.w,
                height: edges.h,
            });
        }
        Ok(())
    }
}

/// Built-in ways to derive a zone assignment from the grid size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ZonePolicy {
    /// `x < w / 2` is zone 1, otherwise zone 2.
    #[default]
    Halves,
    /// `y < h / 2` is zone 1, otherwise zone 2.
    Rows,
    /// Square blocks of `size` cells alternating between zones 1 and 2.
    Checker { size: usize },
}

impl ZonePolicy {
    pub fn assign(self, w: usize, h: usize) -> Zones {
        match self {
            ZonePolicy::Halves => Zones::from_fn(w, h, |x, _| if x < w / 2 { 1 } else { 2 }),
            ZonePolicy::Rows => Zones::from_fn(w, h, |_, y| if y < h / 2 { 1 } else { 2 }),
            ZonePolicy::Checker { size } => {
                let size = size.max(1);
                Zones::from_fn(w, h, |x, y| if (x / size + y / size) % 2 == 0 { 1 } else { 2 })
            }
        }
    }
}

/// Number of true edges whose endpoints lie in different zones.
///
/// `zones` must cover the edge grid (see [`Zones::check_fits`]).
pub fn crossings(edges: &EdgeGrid, zones: &Zones) -> usize {
    edges
        .edges()
        .filter(|&(a, b)| zones.zone(a.0, a.1) != zones.zone(b.0, b.1))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halves_split_columns() {
        let z = Zones::halves(5, 2);
        let row: Vec<u8> = (0..5).map(|x| z.zone(x, 0)).collect();
        assert_eq!(row, vec![1, 1, 2, 2, 2]);
        assert_eq!(z.zone(1, 1), 1);
    }

    #[test]
    fn checker_blocks() {
        let z = ZonePolicy::Checker { size: 2 }.assign(4, 4);
        assert_eq!(z.zone(0, 0), 1);
        assert_eq!(z.zone(1, 1), 1);
        assert_eq!(z.zone(2, 0), 2);
        assert_eq!(z.zone(2, 2), 1);
        // size 0 is treated as 1
        let z = ZonePolicy::Checker { size: 0 }.assign(2, 2);
        assert_eq!(z.zone(1, 0), 2);
    }

    #[test]
    fn zigzag_crosses_once_per_row() {
        let e = EdgeGrid::zigzag(10, 10);
        let z = Zones::halves(10, 10);
        assert_eq!(crossings(&e, &z), 10);

        let rows = ZonePolicy::Rows.assign(10, 10);
        // Only the single vertical link between rows 4 and 5 crosses.
        assert_eq!(crossings(&e, &rows), 1);
    }

    #[test]
    fn empty_grid_costs_nothing() {
        let e = EdgeGrid::empty(4, 4);
        assert_eq!(crossings(&e, &Zones::halves(4, 4)), 0);
    }

    #[test]
    fn mismatched_zones_are_rejected() {
        let e = EdgeGrid::empty(4, 4);
        assert!(Zones::halves(4, 4).check_fits(&e).is_ok());
        assert!(matches!(
            Zones::halves(3, 4).check_fits(&e),
            Err(Error::ZoneMismatch { zones_w: 3, .. })
        ));
    }

    #[test]
    fn policy_serde_roundtrip_shape() {
        let json = serde_json::to_string(&ZonePolicy::Checker { size: 3 }).unwrap();
        assert_eq!(json, r#"{"kind":"checker","size":3}"#);
        let back: ZonePolicy = serde_json::from_str(r#"{"kind":"halves"}"#).unwrap();
        assert_eq!(back, ZonePolicy::Halves);
    }
}
