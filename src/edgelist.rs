//! Plain-text edge lists: one `x1,y1,x2,y2` record per line.
//!
//! Loading sizes the grid from the largest coordinate seen and sets each
//! listed edge; no seed path is laid down. Saving writes the consecutive
//! pairs of a path in path order, not the raw flags.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{info, warn};

use crate::edges::EdgeGrid;
use crate::error::Result;
use crate::grid::Cell;

/// Parsed edge records plus the lines that could not be read.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgeList {
    pub edges: Vec<(Cell, Cell)>,
    /// `(line number, line)` of each malformed record, 1-based.
    pub skipped: Vec<(usize, String)>,
}

/// Largest coordinate a record may carry. Loaded grids are at most
/// `(MAX_COORD + 1)` cells on a side.
pub const MAX_COORD: usize = 4095;

fn in_range(&((x1, y1), (x2, y2)): &(Cell, Cell)) -> bool {
    [x1, y1, x2, y2].iter().all(|&v| v <= MAX_COORD)
}

fn parse_record(line: &str) -> Option<(Cell, Cell)> {
    let mut it = line.split(',').map(|s| s.trim().parse::<usize>());
    let rec = match (it.next(), it.next(), it.next(), it.next(), it.next()) {
        (Some(Ok(x1)), Some(Ok(y1)), Some(Ok(x2)), Some(Ok(y2)), None) => ((x1, y1), (x2, y2)),
        _ => return None,
    };
    Some(rec)
}

/// Parse edge records. Blank lines are ignored; malformed lines and
/// records with a coordinate above [`MAX_COORD`] are skipped with a
/// warning and do not stop the parse.
pub fn parse_edge_list(text: &str) -> EdgeList {
    let mut out = EdgeList::default();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        match parse_record(line) {
            Some(rec) if in_range(&rec) => out.edges.push(rec),
            Some(_) => {
                warn!(line_no = i + 1, line, max = MAX_COORD, "skipping out-of-range edge record");
                out.skipped.push((i + 1, line.to_string()));
            }
            None => {
                warn!(line_no = i + 1, line, "skipping malformed edge record");
                out.skipped.push((i + 1, line.to_string()));
            }
        }
    }
    out
}

impl EdgeList {
    /// Grid dimensions implied by the largest coordinates (at least 1x1).
    /// Records above [`MAX_COORD`] do not count.
    pub fn dims(&self) -> (usize, usize) {
        let (mut mx, mut my) = (0, 0);
        for &((x1, y1), (x2, y2)) in self.edges.iter().filter(|rec| in_range(rec)) {
            mx = mx.max(x1).max(x2);
            my = my.max(y1).max(y2);
        }
        (mx + 1, my + 1)
    }

    /// Fresh grid sized by [`EdgeList::dims`] with every listed edge set.
    /// Non-adjacent or out-of-range records are ignored like any other bad
    /// `set_edge`.
    pub fn to_grid(&self) -> EdgeGrid {
        let (w, h) = self.dims();
        let mut edges = EdgeGrid::empty(w, h);
        for &(a, b) in &self.edges {
            edges.set_edge(a, b, true);
        }
        edges
    }
}

pub fn load_edges(path: impl AsRef<Path>) -> Result<EdgeGrid> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let list = parse_edge_list(&text);
    let edges = list.to_grid();
    info!(
        path = %path.display(),
        records = list.edges.len(),
        skipped = list.skipped.len(),
        w = edges.w,
        h = edges.h,
        "loaded edge list"
    );
    Ok(edges)
}

/// Write consecutive path pairs as `x1,y1,x2,y2` lines.
pub fn write_path<W: Write>(mut out: W, path: &[Cell]) -> Result<()> {
    for pair in path.windows(2) {
        let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
        writeln!(out, "{x1},{y1},{x2},{y2}")?;
    }
    out.flush()?;
    Ok(())
}

pub fn save_path(path: impl AsRef<Path>, cells: &[Cell]) -> Result<()> {
    let path = path.as_ref();
    let file = fs::File::create(path)?;
    write_path(BufWriter::new(file), cells)?;
    info!(path = %path.display(), cells = cells.len(), "saved path");
    Ok(())
}
