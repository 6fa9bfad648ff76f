//! Plotters-powered percentile chart widget for Ratatui.
//!
//! Draws the 5th/50th/95th percentile curves of one vessel across the table's
//! week range, with a vertical marker at the week currently looked up.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A lightweight, render-only chart description.
///
/// All series and bounds are computed outside the render call.
pub struct PercentileChart<'a> {
    /// 5th percentile line, `(week, pi)`.
    pub p5: &'a [(f64, f64)],
    /// 50th percentile line.
    pub p50: &'a [(f64, f64)],
    /// 95th percentile line.
    pub p95: &'a [(f64, f64)],
    /// Week to mark with a vertical line.
    pub marker_week: Option<f64>,
    /// X bounds (weeks).
    pub x_bounds: [f64; 2],
    /// Y bounds (pulsatility index).
    pub y_bounds: [f64; 2],
    pub y_label: &'a str,
}

impl<'a> Widget for PercentileChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let x0 = self.x_bounds[0];
        let x1 = self.x_bounds[1];
        let y0 = self.y_bounds[0];
        let y1 = self.y_bounds[1];

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc("week")
                .y_desc(self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| format!("{v:.0}"))
                .y_label_formatter(&|v| format!("{v:.2}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            let outer_color = RGBColor(0, 128, 255); // blue
            let median_color = RGBColor(0, 255, 0); // green
            let upper_color = RGBColor(255, 0, 0); // red
            let marker_color = RGBColor(255, 255, 0); // yellow

            chart.draw_series(LineSeries::new(self.p5.iter().copied(), &outer_color))?;
            chart.draw_series(LineSeries::new(self.p50.iter().copied(), &median_color))?;
            chart.draw_series(LineSeries::new(self.p95.iter().copied(), &upper_color))?;

            if let Some(week) = self.marker_week {
                chart.draw_series(LineSeries::new([(week, y0), (week, y1)], &marker_color))?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}
