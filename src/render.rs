use rayon::prelude::*;

use crate::edges::EdgeGrid;
use crate::window::Window;
use crate::zones::Zones;

const BACKGROUND: [u8; 4] = [248, 249, 250, 255];
const ZONE_ONE: [u8; 4] = [65, 105, 225, 255]; // royal blue
const ZONE_OTHER: [u8; 4] = [46, 139, 87, 255]; // sea green
const EDGE_SAME: [u8; 4] = [20, 20, 20, 255];
const EDGE_CROSS: [u8; 4] = [220, 40, 40, 255];
const HIGHLIGHT: [u8; 4] = [255, 165, 0, 255];

/// Pixel size of a rendered grid.
pub fn image_dims(edges: &EdgeGrid, scale: usize) -> (usize, usize) {
    (edges.w * scale, edges.h * scale)
}

/// Render cells as zone-colored dots and true edges as strokes between
/// cell centers. Zone-crossing edges are red; cells in `highlight` are
/// drawn orange. `scale` is the pixel pitch per cell (min 4).
pub fn render_rgba(
    edges: &EdgeGrid,
    zones: &Zones,
    highlight: Option<&Window>,
    scale: usize,
) -> Vec<u8> {
    let scale = scale.max(4);
    let (pw, ph) = image_dims(edges, scale);
    let mut rgba = vec![0u8; pw * ph * 4];
    if pw == 0 || ph == 0 {
        return rgba;
    }
    let c = scale / 2;
    let dot = (scale / 4).max(1);
    let stroke = (scale / 12).max(1);

    let edge_color = |a: (usize, usize), b: (usize, usize)| {
        if zones.zone(a.0, a.1) != zones.zone(b.0, b.1) {
            EDGE_CROSS
        } else {
            EDGE_SAME
        }
    };

    rgba.par_chunks_mut(pw * 4).enumerate().for_each(|(py, row)| {
        let y = py / scale;
        let oy = py % scale;
        for px in 0..pw {
            let x = px / scale;
            let ox = px % scale;
            let cell = (x, y);

            let color = if ox.abs_diff(c) <= dot && oy.abs_diff(c) <= dot {
                if highlight.is_some_and(|win| win.contains(cell)) {
                    HIGHLIGHT
                } else if zones.zone(x, y) == 1 {
                    ZONE_ONE
                } else {
                    ZONE_OTHER
                }
            } else if oy.abs_diff(c) <= stroke && ox > c && edges.has_edge(cell, (x + 1, y)) {
                edge_color(cell, (x + 1, y))
            } else if oy.abs_diff(c) <= stroke && ox < c && x > 0 && edges.has_edge(cell, (x - 1, y)) {
                edge_color(cell, (x - 1, y))
            } else if ox.abs_diff(c) <= stroke && oy > c && edges.has_edge(cell, (x, y + 1)) {
                edge_color(cell, (x, y + 1))
            } else if ox.abs_diff(c) <= stroke && oy < c && y > 0 && edges.has_edge(cell, (x, y - 1)) {
                edge_color(cell, (x, y - 1))
            } else {
                BACKGROUND
            };

            row[px * 4..px * 4 + 4].copy_from_slice(&color);
        }
    });

    rgba
}

/// Text dump: `O` per cell (`X` if highlighted), `-` and `|` per edge.
pub fn ascii(edges: &EdgeGrid, highlight: Option<&Window>) -> String {
    if edges.w == 0 || edges.h == 0 {
        return String::new();
    }
    let gw = edges.w * 2 - 1;
    let gh = edges.h * 2 - 1;
    let mut canvas = vec![vec![' '; gw]; gh];

    for y in 0..edges.h {
        for x in 0..edges.w {
            let hl = highlight.is_some_and(|win| win.contains((x, y)));
            canvas[y * 2][x * 2] = if hl { 'X' } else { 'O' };
        }
    }
    for (a, b) in edges.edges() {
        if a.1 == b.1 {
            canvas[a.1 * 2][a.0 * 2 + 1] = '-';
        } else {
            canvas[a.1 * 2 + 1][a.0 * 2] = '|';
        }
    }

    let mut out = String::new();
    for row in canvas {
        let line: Vec<String> = row.iter().map(char::to_string).collect();
        out.push_str(line.join(" ").trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(rgba: &[u8], pw: usize, px: usize, py: usize) -> [u8; 4] {
        let i = (py * pw + px) * 4;
        [rgba[i], rgba[i + 1], rgba[i + 2], rgba[i + 3]]
    }

    #[test]
    fn ascii_zigzag_3x3() {
        let e = EdgeGrid::zigzag(3, 3);
        let expected = "\
O - O - O
        |
O - O - O
|
O - O - O
";
        assert_eq!(ascii(&e, None), expected);
    }

    #[test]
    fn ascii_marks_highlight() {
        let e = EdgeGrid::empty(2, 2);
        let win = e.window((1, 0), (1, 1));
        assert_eq!(ascii(&e, Some(&win)), "O   X\n\nO   X\n");
    }

    #[test]
    fn raster_colors_cells_and_edges() {
        let e = EdgeGrid::zigzag(4, 2);
        let z = Zones::halves(4, 2);
        let scale = 12;
        let rgba = render_rgba(&e, &z, None, scale);
        let (pw, ph) = image_dims(&e, scale);
        assert_eq!(rgba.len(), pw * ph * 4);

        let c = scale / 2;
        // Cell centers take zone colors.
        assert_eq!(pixel(&rgba, pw, c, c), ZONE_ONE);
        assert_eq!(pixel(&rgba, pw, 3 * scale + c, c), ZONE_OTHER);
        // Between (0,0) and (1,0): same zone.
        assert_eq!(pixel(&rgba, pw, scale, c), EDGE_SAME);
        // Between (1,0) and (2,0): zone crossing.
        assert_eq!(pixel(&rgba, pw, 2 * scale, c), EDGE_CROSS);
        // No vertical edge under (0,0).
        assert_eq!(pixel(&rgba, pw, c, scale), BACKGROUND);
        // Vertical link on the right column.
        assert_eq!(pixel(&rgba, pw, 3 * scale + c, scale), EDGE_SAME);
    }

    #[test]
    fn raster_highlights_window() {
        let e = EdgeGrid::zigzag(3, 3);
        let z = Zones::halves(3, 3);
        let win = e.window_at(0, 0, 2, 2);
        let scale = 8;
        let rgba = render_rgba(&e, &z, Some(&win), scale);
        let (pw, _) = image_dims(&e, scale);
        assert_eq!(pixel(&rgba, pw, 4, 4), HIGHLIGHT);
        assert_eq!(pixel(&rgba, pw, 2 * scale + 4, 4), ZONE_OTHER);
    }
}
