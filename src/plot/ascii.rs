//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - titration curve: `-` line
//! - equivalence points: `E`
//! - half-equivalence points: `H`
//!
//! The pH axis is fixed to [0, 14] so curves from different records line up.

use crate::domain::{CurveFile, CurvePoint, Landmarks};

const PH_MIN: f64 = 0.0;
const PH_MAX: f64 = 14.0;

/// Render a sampled curve, optionally marking its landmarks.
pub fn render_ascii_plot(
    points: &[CurvePoint],
    landmarks: Option<&Landmarks>,
    width: usize,
    height: usize,
) -> String {
    let (v_min, v_max) = volume_range(points).unwrap_or((0.0, 1.0));
    render_plot(points, landmarks, v_min, v_max, width, height)
}

/// Render a plot from a saved curve JSON file.
pub fn render_ascii_plot_from_curve_file(curve: &CurveFile, width: usize, height: usize) -> String {
    render_ascii_plot(&curve.grid.points(), Some(&curve.landmarks), width, height)
}

fn render_plot(
    points: &[CurvePoint],
    landmarks: Option<&Landmarks>,
    v_min: f64,
    v_max: f64,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let mut grid = vec![vec![' '; width]; height];

    // Draw curve first (so markers can overlay).
    draw_curve(&mut grid, points, v_min, v_max);

    if let Some(landmarks) = landmarks {
        for (marks, ch) in [(&landmarks.half_equivalence, 'H'), (&landmarks.equivalence, 'E')] {
            for m in marks.iter().filter(|m| m.volume_ml >= v_min && m.volume_ml <= v_max) {
                let x = map_x(m.volume_ml, v_min, v_max, width);
                let y = map_y(m.ph, height);
                grid[y][x] = ch;
            }
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: volume=[{v_min:.1}, {v_max:.1}] mL | pH=[{PH_MIN:.2}, {PH_MAX:.2}]\n"
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn volume_range(points: &[CurvePoint]) -> Option<(f64, f64)> {
    let mut min_v = f64::INFINITY;
    let mut max_v = f64::NEG_INFINITY;
    for p in points {
        min_v = min_v.min(p.volume_ml);
        max_v = max_v.max(p.volume_ml);
    }
    if min_v.is_finite() && max_v.is_finite() && max_v > min_v {
        Some((min_v, max_v))
    } else {
        None
    }
}

fn map_x(v: f64, v_min: f64, v_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((v - v_min) / (v_max - v_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(ph: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((ph - PH_MIN) / (PH_MAX - PH_MIN)).clamp(0.0, 1.0);
    // pH 14 is row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], points: &[CurvePoint], v_min: f64, v_max: f64) {
    if points.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for p in points {
        let x = map_x(p.volume_ml, v_min, v_max, width);
        let y = map_y(p.ph, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, y, '-');
        } else {
            grid[y][x] = '-';
        }
        prev = Some((x, y));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
