/// Grid coordinate `(x, y)`. Identity is the coordinate value.
pub type Cell = (usize, usize);

/// Row-major flat grid. No per-cell objects.
/// Bounded topology: no wrapping on either axis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    pub data: Vec<T>,
    pub w: usize,
    pub h: usize,
}

impl<T: Copy + Default> Grid<T> {
    pub fn new(w: usize, h: usize) -> Self {
        Self::filled(w, h, T::default())
    }

    pub fn filled(w: usize, h: usize, v: T) -> Self {
        Self {
            data: vec![v; w * h],
            w,
            h,
        }
    }

    /// Build a grid by evaluating `f` at every cell.
    pub fn from_fn(w: usize, h: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                data.push(f(x, y));
            }
        }
        Self { data, w, h }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.w && y < self.h);
        y * self.w + x
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.w && y < self.h
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[self.idx(x, y)]
    }

    /// Bounds-checked read.
    #[inline]
    pub fn try_get(&self, x: usize, y: usize) -> Option<T> {
        self.contains(x, y).then(|| self.get(x, y))
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: T) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }
}

/// 4-connected in-bounds neighbors of `(x, y)` on a `w` x `h` grid.
pub fn neighbors4(x: usize, y: usize, w: usize, h: usize) -> impl Iterator<Item = Cell> {
    let offsets: [(i64, i64); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
    let mut out = [(0usize, 0usize); 4];
    let mut n = 0;
    for (dx, dy) in offsets {
        let nx = x as i64 + dx;
        let ny = y as i64 + dy;
        if nx >= 0 && ny >= 0 && (nx as usize) < w && (ny as usize) < h {
            out[n] = (nx as usize, ny as usize);
            n += 1;
        }
    }
    out.into_iter().take(n)
}

/// True iff the two cells differ by exactly one step on one axis.
#[inline]
pub fn adjacent(a: Cell, b: Cell) -> bool {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1) == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fn_is_row_major() {
        let g = Grid::from_fn(3, 2, |x, y| (y * 10 + x) as u8);
        assert_eq!(g.data, vec![0, 1, 2, 10, 11, 12]);
        assert_eq!(g.get(2, 1), 12);
    }

    #[test]
    fn try_get_rejects_out_of_bounds() {
        let g = Grid::<u8>::filled(2, 2, 7);
        assert_eq!(g.try_get(1, 1), Some(7));
        assert_eq!(g.try_get(2, 0), None);
        assert_eq!(g.try_get(0, 2), None);
    }

    #[test]
    fn neighbors_are_clipped_at_borders() {
        let corner: Vec<Cell> = neighbors4(0, 0, 3, 3).collect();
        assert_eq!(corner, vec![(1, 0), (0, 1)]);

        let center: Vec<Cell> = neighbors4(1, 1, 3, 3).collect();
        assert_eq!(center.len(), 4);

        let single: Vec<Cell> = neighbors4(0, 0, 1, 1).collect();
        assert!(single.is_empty());
    }

    #[test]
    fn adjacency_is_manhattan_one() {
        assert!(adjacent((1, 1), (2, 1)));
        assert!(adjacent((1, 1), (1, 0)));
        assert!(!adjacent((1, 1), (2, 2)));
        assert!(!adjacent((1, 1), (1, 1)));
        assert!(!adjacent((0, 0), (2, 0)));
    }
}
