use std::fmt;

use crate::grid::Cell;

/// Rectangular block of cells, row-major. Slots outside the grid are `None`
/// and take no part in neighbor or precondition iteration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Window {
    pub w: usize,
    pub h: usize,
    pub slots: Vec<Option<Cell>>,
}

impl Window {
    /// Window spanned by two opposite corners (order-independent), clipped
    /// against a `grid_w` x `grid_h` grid by marking slots absent.
    pub fn span(corner1: Cell, corner2: Cell, grid_w: usize, grid_h: usize) -> Self {
        let (x0, x1) = (corner1.0.min(corner2.0), corner1.0.max(corner2.0));
        let (y0, y1) = (corner1.1.min(corner2.1), corner1.1.max(corner2.1));
        let w = x1 - x0 + 1;
        let h = y1 - y0 + 1;
        let mut slots = Vec::with_capacity(w * h);
        for y in y0..=y1 {
            for x in x0..=x1 {
                slots.push((x < grid_w && y < grid_h).then_some((x, y)));
            }
        }
        Self { w, h, slots }
    }

    /// `(width, height)` in cells.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.w, self.h)
    }

    #[inline]
    pub fn slot(&self, col: usize, row: usize) -> Option<Cell> {
        if col >= self.w || row >= self.h {
            return None;
        }
        self.slots[row * self.w + col]
    }

    /// Present cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.slots.iter().flatten().copied()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells().any(|c| c == cell)
    }

    /// Every grid-adjacent pair of present slots, each pair once
    /// (right neighbor, then down neighbor, in row-major slot order).
    pub fn internal_pairs(&self) -> impl Iterator<Item = (Cell, Cell)> + '_ {
        (0..self.h).flat_map(move |row| {
            (0..self.w).flat_map(move |col| {
                let here = self.slot(col, row);
                let right = self.slot(col + 1, row);
                let down = self.slot(col, row + 1);
                [here.zip(right), here.zip(down)].into_iter().flatten()
            })
        })
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.slots.chunks(self.w.max(1)) {
            let parts: Vec<String> = row
                .iter()
                .map(|s| match s {
                    Some((x, y)) => format!("({x}, {y})"),
                    None => "None".to_string(),
                })
                .collect();
            writeln!(f, "[{}]", parts.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_is_corner_order_independent() {
        let a = Window::span((1, 1), (3, 3), 10, 10);
        let b = Window::span((3, 3), (1, 1), 10, 10);
        let c = Window::span((1, 3), (3, 1), 10, 10);
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a.shape(), (3, 3));
        assert_eq!(a.slot(0, 0), Some((1, 1)));
        assert_eq!(a.slot(2, 0), Some((3, 1)));
        assert_eq!(a.slot(0, 2), Some((1, 3)));
    }

    #[test]
    fn span_marks_out_of_grid_slots_absent() {
        let win = Window::span((8, 8), (10, 10), 10, 10);
        assert_eq!(win.shape(), (3, 3));
        assert!(!win.is_complete());
        assert_eq!(win.cells().count(), 4);
        assert_eq!(win.slot(2, 0), None);
        assert_eq!(win.slot(1, 1), Some((9, 9)));
    }

    #[test]
    fn internal_pairs_count_matches_shape() {
        // 3x3: 6 horizontal + 6 vertical.
        assert_eq!(Window::span((0, 0), (2, 2), 5, 5).internal_pairs().count(), 12);
        // 3 wide x 2 tall: 4 horizontal + 3 vertical.
        assert_eq!(Window::span((0, 0), (2, 1), 5, 5).internal_pairs().count(), 7);
        // 2 wide x 3 tall: 3 horizontal + 4 vertical.
        assert_eq!(Window::span((0, 0), (1, 2), 5, 5).internal_pairs().count(), 7);
    }

    #[test]
    fn internal_pairs_skip_absent_slots() {
        let win = Window::span((3, 3), (5, 5), 4, 4);
        assert_eq!(win.cells().collect::<Vec<_>>(), vec![(3, 3)]);
        assert_eq!(win.internal_pairs().count(), 0);
    }

    #[test]
    fn display_lists_rows() {
        let win = Window::span((1, 0), (2, 1), 2, 2);
        assert_eq!(win.to_string(), "[(1, 0), None]\n[(1, 1), None]\n");
    }
}
