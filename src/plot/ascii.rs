//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Two charts mirror the dashboard:
//! - sales over time: points `o` joined by `-`
//! - profit by supplier: horizontal bars, `#` for profit and `-` for loss

use chrono::NaiveDate;

/// Render daily sales as a point/line plot. `series` must be chronological.
pub fn render_sales_plot(series: &[(NaiveDate, f64)], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        return "Plot: no data\n".to_string();
    };

    let d_min = first.0;
    let d_max = last.0;
    let points: Vec<(f64, f64)> = series
        .iter()
        .map(|(d, v)| ((*d - d_min).num_days() as f64, *v))
        .collect();
    let x_max = (d_max - d_min).num_days().max(1) as f64;

    let (y_min, y_max) = y_range(&points).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Line first so the points overlay it.
    let mut prev = None;
    for &(x, y) in &points {
        let px = map_x(x, 0.0, x_max, width);
        let py = map_y(y, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(&mut grid, x0, y0, px, py, '-');
        }
        prev = Some((px, py));
    }
    for &(x, y) in &points {
        grid[map_y(y, y_min, y_max, height)][map_x(x, 0.0, x_max, width)] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: date=[{d_min}, {d_max}] | sales=[{y_min:.2}, {y_max:.2}]\n"
    ));
    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }
    out
}

/// Render labelled values as horizontal bars scaled to the largest magnitude.
pub fn render_bar_chart(items: &[(String, f64)], bar_width: usize) -> String {
    let bar_width = bar_width.max(1);
    let label_width = items.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let max_abs = items
        .iter()
        .map(|(_, v)| v.abs())
        .fold(0.0_f64, f64::max);

    let mut out = String::new();
    for (label, value) in items {
        let len = if max_abs > 0.0 && value.is_finite() {
            ((value.abs() / max_abs) * bar_width as f64).round() as usize
        } else {
            0
        };
        let ch = if *value < 0.0 { '-' } else { '#' };
        let bar: String = std::iter::repeat_n(ch, len).collect();
        out.push_str(format!("{label:<label_width$} |{bar}").trim_end());
        out.push('\n');
    }
    out
}

fn y_range(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for &(_, y) in points {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    if !(min_y.is_finite() && max_y.is_finite()) {
        return None;
    }
    if max_y > min_y {
        Some((min_y, max_y))
    } else {
        // Flat series: center it.
        Some((min_y - 1.0, max_y + 1.0))
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
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
