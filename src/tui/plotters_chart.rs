//! Plotters-powered "Sales Over Time" widget for Ratatui.
//!
//! Dates are plotted on a day-number axis (`num_days_from_ce`) and formatted back
//! to `MM-DD` for the tick labels. Output lands in the Ratatui buffer through
//! `plotters-ratatui-backend`.

use chrono::{Datelike, NaiveDate};
use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Render-only line chart over a chronological daily series.
pub struct SalesLineChart<'a> {
    pub series: &'a [(NaiveDate, f64)],
}

impl<'a> SalesLineChart<'a> {
    pub fn new(series: &'a [(NaiveDate, f64)]) -> Self {
        Self { series }
    }

    /// Plot points as (day number, sales).
    fn points(&self) -> Vec<(f64, f64)> {
        self.series
            .iter()
            .map(|(d, v)| (d.num_days_from_ce() as f64, *v))
            .collect()
    }
}

/// Axis bounds with a little headroom; single points and flat lines get a unit span.
pub(crate) fn bounds(points: &[(f64, f64)]) -> Option<([f64; 2], [f64; 2])> {
    let (first, last) = (points.first()?, points.last()?);
    let (mut x0, mut x1) = (first.0, last.0);
    if x1 <= x0 {
        x0 -= 1.0;
        x1 += 1.0;
    }

    let (mut y0, mut y1) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));
    if !(y0.is_finite() && y1.is_finite()) {
        return None;
    }
    if y1 <= y0 {
        y0 -= 1.0;
        y1 += 1.0;
    }
    let pad = (y1 - y0) * 0.05;
    Some(([x0, x1], [y0 - pad, y1 + pad]))
}

fn fmt_day(v: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(v.round() as i32)
        .map(|d| d.format("%m-%d").to_string())
        .unwrap_or_default()
}

fn fmt_sales(v: f64) -> String {
    if v.abs() >= 1000.0 {
        format!("{:.1}k", v / 1000.0)
    } else {
        format!("{v:.0}")
    }
}

impl<'a> Widget for SalesLineChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters cannot lay out a chart in a tiny area; show a hint instead.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let points = self.points();
        let Some(([x0, x1], [y0, y1])) = bounds(&points) else {
            buf.set_string(area.x, area.y, "No sales in range.", Style::default().fg(Color::DarkGray));
            return;
        };

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 2)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| fmt_day(*v))
                .y_label_formatter(&|v| fmt_sales(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            let line_color = RGBColor(0, 255, 255);
            chart.draw_series(LineSeries::new(points.iter().copied(), &line_color))?;

            // `Circle` radii are mis-scaled by the ratatui backend; pixels read as dots.
            chart.draw_series(points.iter().map(|&(x, y)| Pixel::new((x, y), WHITE)))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}
