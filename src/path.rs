//! Recover an ordered visiting sequence from the edge flags.
//!
//! When every cell has degree <= 2 the edge set is a union of simple paths
//! and cycles, so a single linear walk per component is enough. Anything
//! with branches falls back to backtracking search from every start cell,
//! bounded by a visit budget.

use tracing::{debug, warn};

use crate::edges::EdgeGrid;
use crate::error::{Error, Result};
use crate::grid::{Cell, Grid};

pub const DEFAULT_SEARCH_BUDGET: u64 = 1_000_000;

/// Hamiltonian path over the true edges if one exists, otherwise the
/// longest simple path found. Callers test completeness against
/// `edges.cell_count()`.
///
/// Returns an empty path if the backtracking search runs out of budget.
pub fn extract_path(edges: &EdgeGrid, budget: u64) -> Vec<Cell> {
    if max_degree(edges) <= 2 {
        debug!(w = edges.w, h = edges.h, "path extraction: linear walk");
        return walk_components(edges);
    }
    debug!(w = edges.w, h = edges.h, budget, "path extraction: backtracking");
    match search_path(edges, budget) {
        Ok(path) => path,
        Err(err) => {
            warn!(%err, "path extraction abandoned");
            Vec::new()
        }
    }
}

pub fn max_degree(edges: &EdgeGrid) -> usize {
    cells(edges).map(|c| edges.degree(c)).max().unwrap_or(0)
}

fn cells(edges: &EdgeGrid) -> impl Iterator<Item = Cell> + '_ {
    (0..edges.h).flat_map(move |y| (0..edges.w).map(move |x| (x, y)))
}

/// Follow unvisited edges from `start` until stuck.
fn walk(edges: &EdgeGrid, start: Cell, visited: &mut Grid<bool>) -> Vec<Cell> {
    let mut seq = Vec::new();
    let mut cur = start;
    loop {
        visited.set(cur.0, cur.1, true);
        seq.push(cur);
        match edges.neighbors(cur).find(|n| !visited.get(n.0, n.1)) {
            Some(next) => cur = next,
            None => break,
        }
    }
    seq
}

/// Walk every component of a degree <= 2 graph and keep the longest.
/// Path components are entered from an endpoint; what remains are cycles.
fn walk_components(edges: &EdgeGrid) -> Vec<Cell> {
    let total = edges.cell_count();
    let mut visited = Grid::<bool>::new(edges.w, edges.h);
    let mut best: Vec<Cell> = Vec::new();

    let endpoints: Vec<Cell> = cells(edges).filter(|&c| edges.degree(c) <= 1).collect();
    let rest: Vec<Cell> = cells(edges).collect();

    for start in endpoints.into_iter().chain(rest) {
        if visited.get(start.0, start.1) {
            continue;
        }
        let seq = walk(edges, start, &mut visited);
        if seq.len() > best.len() {
            best = seq;
            if best.len() == total {
                break;
            }
        }
    }
    best
}

/// Exhaustive backtracking search for a simple path through every cell,
/// trying start cells in row-major order. Returns the longest simple path
/// seen when no full path exists.
pub fn search_path(edges: &EdgeGrid, budget: u64) -> Result<Vec<Cell>> {
    let total = edges.cell_count();
    let adj: Vec<Vec<Cell>> = cells(edges).map(|c| edges.neighbors(c).collect()).collect();

    let mut on_path = Grid::<bool>::new(edges.w, edges.h);
    let mut best: Vec<Cell> = Vec::new();
    let mut visits = 0u64;

    for start in cells(edges) {
        let mut path = vec![start];
        // Next neighbor index to try, one entry per path cell.
        let mut cursor = vec![0usize];
        on_path.set(start.0, start.1, true);
        if best.is_empty() {
            best = path.clone();
        }

        while let Some(&cur) = path.last() {
            if path.len() == total {
                return Ok(path);
            }
            let depth = cursor.len() - 1;
            let nbrs = &adj[cur.1 * edges.w + cur.0];
            if cursor[depth] < nbrs.len() {
                let cand = nbrs[cursor[depth]];
                cursor[depth] += 1;
                if on_path.get(cand.0, cand.1) {
                    continue;
                }
                visits += 1;
                if visits > budget {
                    return Err(Error::SearchBudget { visits: budget });
                }
                on_path.set(cand.0, cand.1, true);
                path.push(cand);
                cursor.push(0);
                if path.len() > best.len() {
                    best = path.clone();
                }
            } else {
                on_path.set(cur.0, cur.1, false);
                path.pop();
                cursor.pop();
            }
        }
    }
    Ok(best)
}
