//! Local rewrite operators.
//!
//! Every operator clears the edges among a window's internal pairs and
//! re-threads the window along a fixed target pattern. Operators differ only
//! in the shapes they accept and the pattern used per shape, so the patterns
//! are static tables and there is a single routine, `rewrite`, that applies
//! any of them.
//!
//! Window slots are lettered row-major:
//!
//! ```text
//! 3x3        2x3 (2 wide)   3x2 (3 wide)
//! a b c      a b            a b c
//! d e f      c d            d e f
//! g h i      e f
//! ```

use std::fmt;

use crate::edges::EdgeGrid;
use crate::grid::Cell;
use crate::window::Window;

const A: u8 = 0;
const B: u8 = 1;
const C: u8 = 2;
const D: u8 = 3;
const E: u8 = 4;
const F: u8 = 5;
const G: u8 = 6;
const H: u8 = 7;
const I: u8 = 8;

/// Pair of slot indices inside a window.
type Pair = (u8, u8);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// 3 wide, 3 tall.
    Square,
    /// 3 wide, 2 tall.
    Wide,
    /// 2 wide, 3 tall.
    Tall,
}

impl Shape {
    pub const fn dims(self) -> (usize, usize) {
        match self {
            Shape::Square => (3, 3),
            Shape::Wide => (3, 2),
            Shape::Tall => (2, 3),
        }
    }

    pub fn of(w: usize, h: usize) -> Option<Shape> {
        match (w, h) {
            (3, 3) => Some(Shape::Square),
            (3, 2) => Some(Shape::Wide),
            (2, 3) => Some(Shape::Tall),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Shape::Square => "3x3",
            Shape::Wide => "3x2",
            Shape::Tall => "2x3",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Family {
    Transpose,
    Flip,
}

struct Pattern {
    shape: Shape,
    pairs: &'static [Pair],
}

const fn square(pairs: &'static [Pair]) -> Pattern {
    Pattern { shape: Shape::Square, pairs }
}

const fn tall(pairs: &'static [Pair]) -> Pattern {
    Pattern { shape: Shape::Tall, pairs }
}

const fn wide(pairs: &'static [Pair]) -> Pattern {
    Pattern { shape: Shape::Wide, pairs }
}

static TRANSPOSE: [Pattern; 1] =
    [square(&[(A, D), (B, C), (B, E), (C, F), (E, H), (G, H), (F, I)])];
static TRANSPOSE_WA: [Pattern; 1] =
    [square(&[(A, D), (D, G), (G, H), (H, E), (E, B), (B, C), (F, I)])];
static TRANSPOSE_RL: [Pattern; 1] =
    [square(&[(G, D), (D, A), (G, H), (B, E), (E, H), (B, C), (I, F)])];
static TRANSPOSE_SR: [Pattern; 1] =
    [square(&[(A, D), (B, C), (B, E), (C, F), (E, H), (F, I)])];
static TRANSPOSE_WB: [Pattern; 1] =
    [square(&[(A, B), (D, E), (E, F), (G, H), (H, I), (F, I)])];
static TRANSPOSE_EA: [Pattern; 1] =
    [square(&[(A, B), (B, C), (A, D), (D, E), (E, F), (G, H)])];
static TRANSPOSE_SL: [Pattern; 1] =
    [square(&[(A, B), (A, D), (B, E), (C, F), (D, G), (E, H)])];
static TRANSPOSE_NR: [Pattern; 1] =
    [square(&[(B, E), (C, F), (D, G), (E, H), (F, I), (H, I)])];
static TRANSPOSE_EB: [Pattern; 1] =
    [square(&[(A, B), (D, E), (E, F), (D, G), (G, H), (H, I)])];

static FLIP: [Pattern; 2] = [
    tall(&[(A, B), (A, C), (B, D), (E, F)]),
    wide(&[(A, D), (B, C), (B, E), (E, F)]),
];
static FLIP_W: [Pattern; 1] = [square(&[(G, H), (A, D), (A, B), (E, H), (D, E), (I, F)])];
static FLIP_E: [Pattern; 1] =
    [square(&[(A, B), (D, E), (G, H), (A, D), (E, H), (B, C), (F, I)])];
static FLIP_N: [Pattern; 1] = [tall(&[(A, C), (B, D), (C, D), (E, F)])];
static FLIP_S: [Pattern; 1] = [tall(&[(A, B), (C, D), (C, E), (D, F)])];

/// Named rewrite orientations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Transpose,
    /// West-above.
    TransposeWa,
    /// Right-left.
    TransposeRl,
    /// South-right.
    TransposeSr,
    /// West-below.
    TransposeWb,
    /// East-above.
    TransposeEa,
    /// South-left.
    TransposeSl,
    /// North-right.
    TransposeNr,
    /// East-below.
    TransposeEb,
    /// Accepts both 3x2 and 2x3 windows.
    Flip,
    FlipW,
    FlipE,
    FlipN,
    FlipS,
}

impl Operator {
    pub const ALL: [Operator; 14] = [
        Operator::Transpose,
        Operator::TransposeWa,
        Operator::TransposeRl,
        Operator::TransposeSr,
        Operator::TransposeWb,
        Operator::TransposeEa,
        Operator::TransposeSl,
        Operator::TransposeNr,
        Operator::TransposeEb,
        Operator::Flip,
        Operator::FlipW,
        Operator::FlipE,
        Operator::FlipN,
        Operator::FlipS,
    ];

    pub const fn family(self) -> Family {
        match self {
            Operator::Flip
            | Operator::FlipW
            | Operator::FlipE
            | Operator::FlipN
            | Operator::FlipS => Family::Flip,
            _ => Family::Transpose,
        }
    }

    fn patterns(self) -> &'static [Pattern] {
        match self {
            Operator::Transpose => &TRANSPOSE,
            Operator::TransposeWa => &TRANSPOSE_WA,
            Operator::TransposeRl => &TRANSPOSE_RL,
            Operator::TransposeSr => &TRANSPOSE_SR,
            Operator::TransposeWb => &TRANSPOSE_WB,
            Operator::TransposeEa => &TRANSPOSE_EA,
            Operator::TransposeSl => &TRANSPOSE_SL,
            Operator::TransposeNr => &TRANSPOSE_NR,
            Operator::TransposeEb => &TRANSPOSE_EB,
            Operator::Flip => &FLIP,
            Operator::FlipW => &FLIP_W,
            Operator::FlipE => &FLIP_E,
            Operator::FlipN => &FLIP_N,
            Operator::FlipS => &FLIP_S,
        }
    }

    fn pattern(self, shape: Shape) -> Option<&'static Pattern> {
        self.patterns().iter().find(|p| p.shape == shape)
    }

    /// Window shapes this operator can rewrite.
    pub fn shapes(self) -> impl Iterator<Item = Shape> {
        self.patterns().iter().map(|p| p.shape)
    }

    pub fn accepts(self, shape: Shape) -> bool {
        self.pattern(shape).is_some()
    }

    /// Number of internal edges left set after a successful rewrite.
    pub fn target_count(self, shape: Shape) -> Option<usize> {
        self.pattern(shape).map(|p| p.pairs.len())
    }

    /// Operators that accept `shape`, in catalogue order.
    pub fn for_shape(shape: Shape) -> impl Iterator<Item = Operator> {
        Self::ALL.into_iter().filter(move |op| op.accepts(shape))
    }

    pub const fn name(self) -> &'static str {
        match self {
            Operator::Transpose => "transpose",
            Operator::TransposeWa => "transpose_wa",
            Operator::TransposeRl => "transpose_rl",
            Operator::TransposeSr => "transpose_sr",
            Operator::TransposeWb => "transpose_wb",
            Operator::TransposeEa => "transpose_ea",
            Operator::TransposeSl => "transpose_sl",
            Operator::TransposeNr => "transpose_nr",
            Operator::TransposeEb => "transpose_eb",
            Operator::Flip => "flip",
            Operator::FlipW => "flip_w",
            Operator::FlipE => "flip_e",
            Operator::FlipN => "flip_n",
            Operator::FlipS => "flip_s",
        }
    }

    const fn success_tag(self) -> &'static str {
        match self {
            Operator::Transpose => "transposed",
            Operator::TransposeWa => "transposed_wa",
            Operator::TransposeRl => "transposed_rl",
            Operator::TransposeSr => "transposed_sr",
            Operator::TransposeWb => "transposed_wb",
            Operator::TransposeEa => "transposed_ea",
            Operator::TransposeSl => "transposed_sl",
            Operator::TransposeNr => "transposed_nr",
            Operator::TransposeEb => "transposed_eb",
            Operator::Flip => "flipped",
            Operator::FlipW => "flipped_w",
            Operator::FlipE => "flipped_e",
            Operator::FlipN => "flipped_n",
            Operator::FlipS => "flipped_s",
        }
    }

    const fn mismatch_tag(self) -> &'static str {
        match self {
            Operator::Flip => "not 3x2 or 2x3",
            Operator::FlipN | Operator::FlipS => "not 2x3",
            _ => "not 3x3",
        }
    }

    const fn untouchable_tag(self) -> &'static str {
        match self.family() {
            Family::Transpose => "not transposable",
            Family::Flip => "not flippable",
        }
    }

    /// Rewrite `window` in place. See [`rewrite`].
    pub fn apply(self, edges: &mut EdgeGrid, window: &Window) -> Status {
        rewrite(edges, window, self)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Window dimensions do not fit the operator, or a slot is off-grid.
    ShapeMismatch,
    /// Some window cell has no edge to another window cell.
    NotRewritable,
    Rewritten,
}

/// Result of one rewrite attempt. Displays as the status tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Status {
    pub op: Operator,
    pub outcome: Outcome,
}

impl Status {
    #[inline]
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Rewritten
    }

    pub fn tag(&self) -> &'static str {
        match self.outcome {
            Outcome::ShapeMismatch => self.op.mismatch_tag(),
            Outcome::NotRewritable => self.op.untouchable_tag(),
            Outcome::Rewritten => self.op.success_tag(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// True iff every present window cell has at least one true edge to another
/// present window cell.
pub fn touchable(edges: &EdgeGrid, window: &Window) -> bool {
    let mut touched = vec![false; window.slots.len()];
    let slot_of = |c: Cell| window.slots.iter().position(|s| *s == Some(c));
    for (a, b) in window.internal_pairs() {
        if edges.has_edge(a, b) {
            if let Some(i) = slot_of(a) {
                touched[i] = true;
            }
            if let Some(i) = slot_of(b) {
                touched[i] = true;
            }
        }
    }
    window
        .slots
        .iter()
        .zip(&touched)
        .all(|(slot, t)| slot.is_none() || *t)
}

/// Clear every internal edge of `window` and set the operator's target pattern.
///
/// Mutates only on success. The window must be complete and match one of
/// the operator's shapes, and must pass [`touchable`].
pub fn rewrite(edges: &mut EdgeGrid, window: &Window, op: Operator) -> Status {
    let status = |outcome| Status { op, outcome };

    let Some(pattern) = Shape::of(window.w, window.h).and_then(|s| op.pattern(s)) else {
        return status(Outcome::ShapeMismatch);
    };
    if !window.is_complete() {
        return status(Outcome::ShapeMismatch);
    }
    if !touchable(edges, window) {
        return status(Outcome::NotRewritable);
    }

    let pairs: Vec<(Cell, Cell)> = window.internal_pairs().collect();
    for (a, b) in pairs {
        edges.set_edge(a, b, false);
    }
    for &(i, j) in pattern.pairs {
        // Complete window: every slot is Some.
        if let (Some(a), Some(b)) = (window.slots[i as usize], window.slots[j as usize]) {
            edges.set_edge(a, b, true);
        }
    }
    status(Outcome::Rewritten)
}
