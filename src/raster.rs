// Pixel-exact shape stamping: filled discs and rounded-corner cutouts.
// Each stage takes the canvas by value and hands it back, so the pipeline
// fill -> stamp -> cut -> encode never shares a mutable canvas.

use crate::canvas::Canvas;
use crate::types::Color;
use std::ops::Range;

/// Stamp a filled disc centered at (width/2, height/2).
///
/// A pixel (i,j) is set when `(cx-i)^2 + (cy-j)^2 < radius^2`; pixels exactly
/// on the circle are left alone. A radius of zero or less draws nothing.
pub fn draw_filled_circle(mut canvas: Canvas, radius: i64, color: Color) -> Canvas {
    if radius <= 0 {
        return canvas;
    }
    let (w, h) = (i64::from(canvas.width()), i64::from(canvas.height()));
    let (cx, cy) = (w / 2, h / 2);
    let r2 = radius.saturating_mul(radius);

    // Bounding box [c-r, c+r), clipped to the canvas.
    let xs = clip(cx.saturating_sub(radius)..cx.saturating_add(radius), w);
    let ys = clip(cy.saturating_sub(radius)..cy.saturating_add(radius), h);
    for i in xs {
        let dx = cx - i;
        for j in ys.clone() {
            let dy = cy - j;
            if dx * dx + dy * dy < r2 {
                canvas.put_pixel(i as i32, j as i32, color);
            }
        }
    }
    canvas
}

/// Where the corner pivots sit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PivotMode {
    /// All four corners are exact mirror images of the bottom-left one.
    #[default]
    Mirrored,
    /// Top and right corners span one extra row/column with the pivot moved
    /// outwards by one pixel. Matches textures made by the older editor tool.
    Legacy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Corner {
    BottomLeft,
    TopLeft,
    BottomRight,
    TopRight,
}

impl Corner {
    /// Processing order; matters only when large radii make corners overlap.
    pub const CANONICAL_ORDER: [Corner; 4] =
        [Corner::BottomLeft, Corner::TopLeft, Corner::BottomRight, Corner::TopRight];
}

struct CornerRegion {
    xs: Range<i64>,
    ys: Range<i64>,
    pivot: (i64, i64),
}

fn corner_region(corner: Corner, w: i64, h: i64, r: i64, mode: PivotMode) -> CornerRegion {
    let near = (0..r, r - 1);
    let far = |n: i64| match mode {
        PivotMode::Mirrored => (n - r..n, n - r),
        PivotMode::Legacy => (n - r - 1..n, n - r - 1),
    };
    let ((xs, px), (ys, py)) = match corner {
        Corner::BottomLeft => (near.clone(), near),
        Corner::TopLeft => (near, far(h)),
        Corner::BottomRight => (far(w), near),
        Corner::TopRight => (far(w), far(h)),
    };
    CornerRegion { xs: clip(xs, w), ys: clip(ys, h), pivot: (px, py) }
}

/// Clear every corner pixel farther than `corner_radius` from its corner pivot,
/// leaving a quarter disc of the original color in each corner.
///
/// `_stroke_width` is accepted for call-site symmetry with the ring generator
/// and does not change the result.
pub fn round_corners(
    mut canvas: Canvas,
    corner_radius: u32,
    _stroke_width: u32,
    mode: PivotMode,
) -> Canvas {
    let r = i64::from(corner_radius);
    let r2 = i128::from(r) * i128::from(r);
    let (w, h) = (i64::from(canvas.width()), i64::from(canvas.height()));

    for corner in Corner::CANONICAL_ORDER {
        let CornerRegion { xs, ys, pivot: (px, py) } = corner_region(corner, w, h, r, mode);
        for i in xs {
            let dx = i128::from(px - i);
            for j in ys.clone() {
                let dy = i128::from(py - j);
                // Pivots of huge radii sit far off-canvas; i128 keeps the squares exact.
                if dx * dx + dy * dy > r2 {
                    canvas.put_pixel(i as i32, j as i32, Color::TRANSPARENT);
                }
            }
        }
    }
    canvas
}

#[inline]
fn clip(range: Range<i64>, len: i64) -> Range<i64> {
    range.start.max(0)..range.end.min(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(canvas: &Canvas, color: Color) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        for y in 0..canvas.height() as i32 {
            for x in 0..canvas.width() as i32 {
                if canvas.get_pixel(x, y) == Some(color) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn circle_matches_distance_formula() {
        let c = draw_filled_circle(Canvas::new(20, 20, Color::TRANSPARENT), 5, Color::WHITE);
        for y in 0..20 {
            for x in 0..20 {
                let (dx, dy) = (10 - x, 10 - y);
                let expected = if dx * dx + dy * dy < 25 { Color::WHITE } else { Color::TRANSPARENT };
                assert_eq!(c.get_pixel(x, y), Some(expected), "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn boundary_pixels_are_excluded() {
        let c = draw_filled_circle(Canvas::new(20, 20, Color::TRANSPARENT), 5, Color::WHITE);
        // (10-5, 10) sits exactly on the circle; (10-3, 10-4) too.
        assert_eq!(c.get_pixel(5, 10), Some(Color::TRANSPARENT));
        assert_eq!(c.get_pixel(7, 6), Some(Color::TRANSPARENT));
        assert_eq!(c.get_pixel(6, 10), Some(Color::WHITE));
    }

    #[test]
    fn zero_or_negative_radius_draws_nothing() {
        let blank = Canvas::new(8, 8, Color::TRANSPARENT);
        assert_eq!(draw_filled_circle(blank.clone(), 0, Color::WHITE), blank);
        assert_eq!(draw_filled_circle(blank.clone(), -4, Color::WHITE), blank);
    }

    #[test]
    fn oversized_circle_is_clipped_to_canvas() {
        let c = draw_filled_circle(Canvas::new(6, 4, Color::TRANSPARENT), 1_000, Color::WHITE);
        assert_eq!(c.count(Color::WHITE), 24);
    }

    #[test]
    fn zero_radius_cuts_nothing() {
        let solid = Canvas::new(100, 100, Color::WHITE);
        for mode in [PivotMode::Mirrored, PivotMode::Legacy] {
            assert_eq!(round_corners(solid.clone(), 0, 0, mode), solid);
        }
    }

    #[test]
    fn rounding_is_idempotent() {
        for mode in [PivotMode::Mirrored, PivotMode::Legacy] {
            let once = round_corners(Canvas::new(40, 30, Color::WHITE), 9, 2, mode);
            let twice = round_corners(once.clone(), 9, 2, mode);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn mirrored_corners_are_rotations_of_each_other() {
        let n = 100;
        let c = round_corners(Canvas::new(n, n, Color::WHITE), 10, 0, PivotMode::Mirrored);
        let cut = mask(&c, Color::TRANSPARENT);
        assert!(!cut.is_empty());

        // Rotating the whole canvas by 90 degrees maps the cut set onto itself.
        let last = n as i32 - 1;
        let mut rotated: Vec<(i32, i32)> = cut.iter().map(|&(x, y)| (last - y, x)).collect();
        rotated.sort_by_key(|&(x, y)| (y, x));
        assert_eq!(rotated, cut);

        // And each corner holds a quarter of the cut pixels.
        let bottom_left = cut.iter().filter(|&&(x, y)| x < 10 && y < 10).count();
        assert_eq!(bottom_left * 4, cut.len());
    }

    #[test]
    fn bottom_left_cut_follows_pivot_distance() {
        let r = 6i32;
        let c = round_corners(Canvas::new(30, 30, Color::WHITE), r as u32, 0, PivotMode::Mirrored);
        for y in 0..r {
            for x in 0..r {
                let (dx, dy) = (r - 1 - x, r - 1 - y);
                let cut = dx * dx + dy * dy > r * r;
                let expected = if cut { Color::TRANSPARENT } else { Color::WHITE };
                assert_eq!(c.get_pixel(x, y), Some(expected), "pixel ({x},{y})");
            }
        }
        // The very corner is always cut, the pivot never is.
        assert_eq!(c.get_pixel(0, 0), Some(Color::TRANSPARENT));
        assert_eq!(c.get_pixel(r - 1, r - 1), Some(Color::WHITE));
    }

    #[test]
    fn legacy_pivots_shift_top_and_right_corners() {
        let (n, r) = (50i32, 8i32);
        let c = round_corners(Canvas::new(n as u32, n as u32, Color::WHITE), r as u32, 0, PivotMode::Legacy);
        // Top-left pivot sits at (r-1, n-r-1): the top edge row is cut all the way to x = r-2.
        for x in 0..r - 1 {
            assert_eq!(c.get_pixel(x, n - 1), Some(Color::TRANSPARENT), "top row x={x}");
        }
        assert_eq!(c.get_pixel(r - 1, n - 1), Some(Color::WHITE));
        // Bottom-left is unchanged from the mirrored layout.
        let mirrored = round_corners(Canvas::new(n as u32, n as u32, Color::WHITE), r as u32, 0, PivotMode::Mirrored);
        for y in 0..r {
            for x in 0..r {
                assert_eq!(c.get_pixel(x, y), mirrored.get_pixel(x, y));
            }
        }
    }

    #[test]
    fn stroke_width_does_not_change_the_cut() {
        let a = round_corners(Canvas::new(64, 64, Color::WHITE), 12, 0, PivotMode::Mirrored);
        let b = round_corners(Canvas::new(64, 64, Color::WHITE), 12, 7, PivotMode::Mirrored);
        assert_eq!(a, b);
    }

    #[test]
    fn legacy_matches_older_tool_ranges_on_every_corner() {
        // Older tool: bottom/left corners span [0, r) with pivot r-1, top/right
        // corners span [n-r-1, n) with pivot n-r-1.
        fn legacy_cut(x: i64, y: i64, w: i64, h: i64, r: i64) -> bool {
            let near = (0..r, r - 1);
            let far = |n: i64| (n - r - 1..n, n - r - 1);
            [(near.clone(), near.clone()), (near.clone(), far(h)), (far(w), near), (far(w), far(h))]
                .into_iter()
                .any(|((xs, px), (ys, py))| {
                    xs.contains(&x) && ys.contains(&y) && (px - x).pow(2) + (py - y).pow(2) > r * r
                })
        }

        for (w, h) in [(7u32, 5u32), (16, 16), (20, 13), (13, 31), (40, 33)] {
            for r in 0..=w.max(h) {
                let c = round_corners(Canvas::new(w, h, Color::WHITE), r, 0, PivotMode::Legacy);
                for y in 0..h as i32 {
                    for x in 0..w as i32 {
                        let cut = legacy_cut(x.into(), y.into(), w.into(), h.into(), r.into());
                        let expected = if cut { Color::TRANSPARENT } else { Color::WHITE };
                        assert_eq!(c.get_pixel(x, y), Some(expected), "{w}x{h} r={r} pixel ({x},{y})");
                    }
                }
            }
        }
    }
}
