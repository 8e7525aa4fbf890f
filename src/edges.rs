use crate::grid::{Cell, Grid, adjacent, neighbors4};
use crate::window::Window;

/// Edge flags between grid-adjacent cells.
///
/// `horiz` is `(w-1) x h`: `horiz[x, y]` links `(x, y)-(x+1, y)`.
/// `vert` is `w x (h-1)`: `vert[x, y]` links `(x, y)-(x, y+1)`.
///
/// Intended invariant: the true edges form one simple path through all
/// `w * h` cells. Nothing here enforces it; see `validate`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeGrid {
    pub w: usize,
    pub h: usize,
    pub horiz: Grid<bool>,
    pub vert: Grid<bool>,
}

impl EdgeGrid {
    /// Grid with no edges set.
    pub fn empty(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            horiz: Grid::new(w.saturating_sub(1), h),
            vert: Grid::new(w, h.saturating_sub(1)),
        }
    }

    /// Grid seeded with the serpentine path.
    pub fn zigzag(w: usize, h: usize) -> Self {
        let mut edges = Self::empty(w, h);
        edges.init_zigzag();
        edges
    }

    /// Reset to the boustrophedon path: every row fully linked, rows joined
    /// on the right for even rows and on the left for odd rows.
    pub fn init_zigzag(&mut self) {
        self.clear();
        if self.w == 0 {
            return;
        }
        for y in 0..self.h {
            for x in 0..self.w.saturating_sub(1) {
                self.horiz.set(x, y, true);
            }
            if y + 1 < self.h {
                let x = if y % 2 == 0 { self.w - 1 } else { 0 };
                self.vert.set(x, y, true);
            }
        }
    }

    pub fn clear(&mut self) {
        self.horiz.data.fill(false);
        self.vert.data.fill(false);
    }

    #[inline]
    pub fn contains(&self, c: Cell) -> bool {
        c.0 < self.w && c.1 < self.h
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.w * self.h
    }

    /// Flag slot for the pair, or None if either cell is off-grid or the
    /// pair is not grid-adjacent.
    #[inline]
    fn slot(&self, a: Cell, b: Cell) -> Option<(bool, usize, usize)> {
        if !self.contains(a) || !self.contains(b) || !adjacent(a, b) {
            return None;
        }
        if a.1 == b.1 {
            Some((true, a.0.min(b.0), a.1))
        } else {
            Some((false, a.0, a.1.min(b.1)))
        }
    }

    /// Set the flag between `a` and `b`. Silent no-op for off-grid or
    /// non-adjacent pairs.
    pub fn set_edge(&mut self, a: Cell, b: Cell, value: bool) {
        match self.slot(a, b) {
            Some((true, x, y)) => self.horiz.set(x, y, value),
            Some((false, x, y)) => self.vert.set(x, y, value),
            None => {}
        }
    }

    /// Symmetric query; false for off-grid or non-adjacent pairs.
    pub fn has_edge(&self, a: Cell, b: Cell) -> bool {
        match self.slot(a, b) {
            Some((true, x, y)) => self.horiz.get(x, y),
            Some((false, x, y)) => self.vert.get(x, y),
            None => false,
        }
    }

    /// Cells linked to `c` by a true edge.
    pub fn neighbors(&self, c: Cell) -> impl Iterator<Item = Cell> + '_ {
        neighbors4(c.0, c.1, self.w, self.h).filter(move |&n| self.has_edge(c, n))
    }

    pub fn degree(&self, c: Cell) -> usize {
        self.neighbors(c).count()
    }

    /// All true edges, horizontal first, each as `(left/top, right/bottom)`.
    pub fn edges(&self) -> impl Iterator<Item = (Cell, Cell)> + '_ {
        let hw = self.horiz.w;
        let vw = self.vert.w;
        let horiz = self
            .horiz
            .data
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(move |(i, _)| {
                let (x, y) = (i % hw, i / hw);
                ((x, y), (x + 1, y))
            });
        let vert = self
            .vert
            .data
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(move |(i, _)| {
                let (x, y) = (i % vw, i / vw);
                ((x, y), (x, y + 1))
            });
        horiz.chain(vert)
    }

    pub fn edge_count(&self) -> usize {
        self.horiz.data.iter().chain(&self.vert.data).filter(|on| **on).count()
    }

    /// Window spanned by two corners; off-grid slots are absent.
    pub fn window(&self, corner1: Cell, corner2: Cell) -> Window {
        Window::span(corner1, corner2, self.w, self.h)
    }

    /// `w` x `h` window anchored at top-left `(x, y)`.
    pub fn window_at(&self, x: usize, y: usize, w: usize, h: usize) -> Window {
        debug_assert!(w > 0 && h > 0);
        self.window((x, y), (x + w - 1, y + h - 1))
    }

    /// Number of true edges with both endpoints inside the window.
    pub fn internal_edge_count(&self, window: &Window) -> usize {
        window
            .internal_pairs()
            .filter(|&(a, b)| self.has_edge(a, b))
            .count()
    }
}
