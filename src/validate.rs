use thiserror::Error;

use crate::edges::EdgeGrid;
use crate::grid::{Cell, Grid};

/// Why an edge set is not a single simple path through every cell.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PathViolation {
    #[error("only {reached} of {total} cells reachable from (0, 0)")]
    Disconnected { reached: usize, total: usize },
    #[error("cell {cell:?} has degree {degree}")]
    Branch { cell: Cell, degree: usize },
    #[error("{edges} edges over {cells} cells: the path closes a cycle")]
    Cycle { edges: usize, cells: usize },
}

/// Number of cells reachable from `(0, 0)` over true edges.
pub fn reachable_count(edges: &EdgeGrid) -> usize {
    if edges.cell_count() == 0 {
        return 0;
    }
    let mut seen = Grid::<bool>::new(edges.w, edges.h);
    let mut stack = vec![(0usize, 0usize)];
    let mut count = 0;
    while let Some(cur) = stack.pop() {
        if seen.get(cur.0, cur.1) {
            continue;
        }
        seen.set(cur.0, cur.1, true);
        count += 1;
        stack.extend(edges.neighbors(cur).filter(|n| !seen.get(n.0, n.1)));
    }
    count
}

/// Connectivity only. Necessary, not sufficient, for a valid path:
/// branches and cycles still pass.
pub fn is_fully_connected(edges: &EdgeGrid) -> bool {
    reachable_count(edges) == edges.cell_count()
}

/// Full check: connected, every degree <= 2, and exactly `cells - 1` edges
/// (a connected graph with max degree 2 and no cycle is a simple path).
pub fn validate(edges: &EdgeGrid) -> Result<(), PathViolation> {
    let total = edges.cell_count();
    for y in 0..edges.h {
        for x in 0..edges.w {
            let degree = edges.degree((x, y));
            if degree > 2 {
                return Err(PathViolation::Branch {
                    cell: (x, y),
                    degree,
                });
            }
        }
    }
    let reached = reachable_count(edges);
    if reached != total {
        return Err(PathViolation::Disconnected { reached, total });
    }
    let count = edges.edge_count();
    if total > 0 && count != total - 1 {
        return Err(PathViolation::Cycle {
            edges: count,
            cells: total,
        });
    }
    Ok(())
}

/// True iff `path` visits every cell exactly once and each consecutive pair
/// is joined by a true edge.
pub fn is_hamiltonian(edges: &EdgeGrid, path: &[Cell]) -> bool {
    if path.len() != edges.cell_count() {
        return false;
    }
    let mut seen = Grid::<bool>::new(edges.w, edges.h);
    for &c in path {
        if !edges.contains(c) || seen.get(c.0, c.1) {
            return false;
        }
        seen.set(c.0, c.1, true);
    }
    path.windows(2).all(|p| edges.has_edge(p[0], p[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zigzag_is_valid() {
        for (w, h) in [(1, 1), (1, 5), (5, 1), (3, 3), (4, 7), (10, 10)] {
            let e = EdgeGrid::zigzag(w, h);
            assert!(is_fully_connected(&e), "{w}x{h}");
            assert_eq!(validate(&e), Ok(()), "{w}x{h}");
        }
    }

    #[test]
    fn missing_link_disconnects() {
        let mut e = EdgeGrid::zigzag(3, 3);
        e.set_edge((2, 0), (2, 1), false);
        assert!(!is_fully_connected(&e));
        assert_eq!(
            validate(&e),
            Err(PathViolation::Disconnected { reached: 3, total: 9 })
        );
    }

    #[test]
    fn connectivity_alone_misses_cycles_and_branches() {
        let mut cyc = EdgeGrid::zigzag(2, 2);
        cyc.set_edge((0, 0), (0, 1), true);
        assert!(is_fully_connected(&cyc));
        assert_eq!(
            validate(&cyc),
            Err(PathViolation::Cycle { edges: 4, cells: 4 })
        );

        let mut branch = EdgeGrid::zigzag(3, 3);
        branch.set_edge((1, 0), (1, 1), true);
        assert!(is_fully_connected(&branch));
        assert!(matches!(
            validate(&branch),
            Err(PathViolation::Branch { cell: (1, 0), degree: 3 })
        ));
    }

    #[test]
    fn hamiltonian_sequence_check() {
        let e = EdgeGrid::zigzag(2, 2);
        assert!(is_hamiltonian(&e, &[(0, 0), (1, 0), (1, 1), (0, 1)]));
        assert!(is_hamiltonian(&e, &[(0, 1), (1, 1), (1, 0), (0, 0)]));
        assert!(!is_hamiltonian(&e, &[(0, 0), (1, 0), (1, 1)]));
        assert!(!is_hamiltonian(&e, &[(0, 0), (0, 1), (1, 1), (1, 0)]));
        assert!(!is_hamiltonian(&e, &[(0, 0), (1, 0), (1, 0), (0, 1)]));
    }
}
