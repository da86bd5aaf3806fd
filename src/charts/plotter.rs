//! Chart Plotter Module
//! Interactive visualizations using egui_plot, plus custom-painted pie and
//! heatmap widgets. Purely presentational: everything drawn here is
//! precomputed by the stats module.

use egui::{Color32, RichText};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, Line, LineStyle, Plot, PlotPoints, Points, VLine,
};

use crate::stats::{BoxStats, CorrelationMatrix, HistogramBucket};

/// Chart palette, following the original dashboard's color sequence.
pub const BLUE: Color32 = Color32::from_rgb(99, 110, 250);
pub const RED: Color32 = Color32::from_rgb(239, 85, 59);
pub const GREEN: Color32 = Color32::from_rgb(0, 204, 150);
pub const PURPLE: Color32 = Color32::from_rgb(171, 99, 250);
pub const PINK: Color32 = Color32::from_rgb(255, 102, 146);
pub const ORANGE: Color32 = Color32::from_rgb(255, 161, 90);

pub const PALETTE: [Color32; 6] = [BLUE, RED, GREEN, PURPLE, PINK, ORANGE];

const PLOT_HEIGHT: f32 = 260.0;

/// Draws the dashboard's charts.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Histogram from precomputed buckets, with an optional dashed mean
    /// marker line.
    pub fn draw_histogram(
        ui: &mut egui::Ui,
        id: &str,
        buckets: &[HistogramBucket],
        color: Color32,
        x_label: &str,
        mean_line: Option<f64>,
    ) {
        if buckets.is_empty() {
            ui.label(RichText::new("No data").weak());
            return;
        }

        let bars: Vec<Bar> = buckets
            .iter()
            .map(|b| {
                let width = (b.upper - b.lower).max(f64::EPSILON);
                Bar::new((b.lower + b.upper) / 2.0, b.count as f64)
                    .width(width * 0.95)
                    .fill(color.gamma_multiply(0.8))
            })
            .collect();

        Plot::new(format!("hist_{id}"))
            .height(PLOT_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(x_label)
            .y_axis_label("Frequency")
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(color));
                if let Some(mean) = mean_line {
                    plot_ui.vline(
                        VLine::new(mean)
                            .color(RED)
                            .style(LineStyle::Dashed { length: 8.0 })
                            .name(format!("Avg: {mean:.2}")),
                    );
                }
            });
    }

    /// Single vertical box plot from precomputed five-number stats.
    pub fn draw_box_plot(
        ui: &mut egui::Ui,
        id: &str,
        stats: &BoxStats,
        color: Color32,
        y_label: &str,
    ) {
        let box_elem = BoxElem::new(
            0.0,
            BoxSpread::new(
                stats.whisker_low,
                stats.q1,
                stats.median,
                stats.q3,
                stats.whisker_high,
            ),
        )
        .box_width(0.5)
        .fill(color.gamma_multiply(0.3))
        .stroke(egui::Stroke::new(1.5, color));

        Plot::new(format!("box_{id}"))
            .height(PLOT_HEIGHT)
            .allow_scroll(false)
            .y_axis_label(y_label)
            .include_x(-1.0)
            .include_x(1.0)
            .x_axis_formatter(|_, _| String::new())
            .show(ui, |plot_ui| {
                plot_ui.box_plot(BoxPlot::new(vec![box_elem]));
            });
    }

    /// Scatterplot of precomputed (x, y) pairs.
    pub fn draw_scatter(
        ui: &mut egui::Ui,
        id: &str,
        points: &[[f64; 2]],
        color: Color32,
        x_label: &str,
        y_label: &str,
    ) {
        let plot_points: PlotPoints = points.iter().copied().collect();

        Plot::new(format!("scatter_{id}"))
            .height(PLOT_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(x_label)
            .y_axis_label(y_label)
            .show(ui, |plot_ui| {
                plot_ui.points(
                    Points::new(plot_points)
                        .radius(2.5)
                        .color(color.gamma_multiply(0.7)),
                );
            });
    }

    /// Line chart, used for the cumulative revenue curve.
    pub fn draw_line_chart(
        ui: &mut egui::Ui,
        id: &str,
        points: &[[f64; 2]],
        color: Color32,
        x_label: &str,
        y_label: &str,
    ) {
        let plot_points: PlotPoints = points.iter().copied().collect();

        Plot::new(format!("line_{id}"))
            .height(PLOT_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(x_label)
            .y_axis_label(y_label)
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new(plot_points).color(color).width(2.0));
            });
    }

    /// Vertical bars for labeled categories, one palette color per bar.
    pub fn draw_category_bars(
        ui: &mut egui::Ui,
        id: &str,
        data: &[(String, f64)],
        y_label: &str,
    ) {
        if data.is_empty() {
            ui.label(RichText::new("No data").weak());
            return;
        }

        let labels: Vec<String> = data.iter().map(|(label, _)| label.clone()).collect();
        let bars: Vec<Bar> = data
            .iter()
            .enumerate()
            .map(|(i, (label, value))| {
                Bar::new(i as f64, *value)
                    .width(0.6)
                    .fill(PALETTE[i % PALETTE.len()].gamma_multiply(0.8))
                    .name(label)
            })
            .collect();

        Plot::new(format!("bars_{id}"))
            .height(PLOT_HEIGHT)
            .allow_scroll(false)
            .y_axis_label(y_label)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if (mark.value - idx as f64).abs() < 1e-6 && idx < labels.len() {
                    labels[idx].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                for bar in bars {
                    plot_ui.bar_chart(BarChart::new(vec![bar]));
                }
            });
    }

    /// Custom-painted pie chart with a legend underneath. Zero-valued
    /// slices are skipped.
    pub fn draw_pie(ui: &mut egui::Ui, slices: &[(String, f64)], diameter: f32) {
        let total: f64 = slices.iter().map(|(_, v)| v.max(0.0)).sum();
        if total <= 0.0 {
            ui.label(RichText::new("No data").weak());
            return;
        }

        let (rect, _) =
            ui.allocate_exact_size(egui::vec2(diameter, diameter), egui::Sense::hover());
        let painter = ui.painter_at(rect);
        let center = rect.center();
        let radius = diameter / 2.0 - 4.0;

        // Start at 12 o'clock, sweep clockwise; each step is one small
        // triangle so slices wider than a half turn stay convex.
        let mut angle = -std::f64::consts::FRAC_PI_2;
        for (i, (_, value)) in slices.iter().enumerate() {
            if *value <= 0.0 {
                continue;
            }
            let color = PALETTE[i % PALETTE.len()];
            let sweep = value / total * std::f64::consts::TAU;
            let steps = ((sweep / 0.05).ceil() as usize).max(1);

            let point_at = |a: f64| {
                center + egui::vec2((a.cos() * radius as f64) as f32, (a.sin() * radius as f64) as f32)
            };
            for s in 0..steps {
                let a0 = angle + sweep * s as f64 / steps as f64;
                let a1 = angle + sweep * (s + 1) as f64 / steps as f64;
                painter.add(egui::Shape::convex_polygon(
                    vec![center, point_at(a0), point_at(a1)],
                    color,
                    egui::Stroke::NONE,
                ));
            }
            angle += sweep;
        }

        ui.add_space(6.0);
        ui.horizontal_wrapped(|ui| {
            for (i, (label, value)) in slices.iter().enumerate() {
                if *value <= 0.0 {
                    continue;
                }
                let color = PALETTE[i % PALETTE.len()];
                let (swatch, _) =
                    ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                ui.painter().rect_filled(swatch, 2.0, color);
                ui.label(
                    RichText::new(format!("{label} ({:.1}%)", value / total * 100.0)).size(12.0),
                );
                ui.add_space(8.0);
            }
        });
    }

    /// Correlation heatmap painted as a colored grid; undefined entries
    /// (zero-variance columns) render as a gray dash.
    pub fn draw_heatmap(ui: &mut egui::Ui, matrix: &CorrelationMatrix) {
        if matrix.is_empty() {
            ui.label(RichText::new("No numeric columns").weak());
            return;
        }
        let n = matrix.len();

        const CELL: f32 = 58.0;
        const LABEL_W: f32 = 160.0;
        const LABEL_H: f32 = 22.0;

        let size = egui::vec2(LABEL_W + n as f32 * CELL, LABEL_H + n as f32 * CELL);
        let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
        let painter = ui.painter_at(rect);
        let text_color = ui.visuals().text_color();
        let font = egui::FontId::proportional(11.0);

        for (j, name) in matrix.columns.iter().enumerate() {
            painter.text(
                egui::pos2(
                    rect.min.x + LABEL_W + j as f32 * CELL + CELL / 2.0,
                    rect.min.y + LABEL_H / 2.0,
                ),
                egui::Align2::CENTER_CENTER,
                truncate(name, 9),
                font.clone(),
                text_color,
            );
        }

        for (i, name) in matrix.columns.iter().enumerate() {
            let y = rect.min.y + LABEL_H + i as f32 * CELL;
            painter.text(
                egui::pos2(rect.min.x + LABEL_W - 8.0, y + CELL / 2.0),
                egui::Align2::RIGHT_CENTER,
                truncate(name, 22),
                font.clone(),
                text_color,
            );

            for j in 0..n {
                let cell = egui::Rect::from_min_size(
                    egui::pos2(rect.min.x + LABEL_W + j as f32 * CELL, y),
                    egui::vec2(CELL - 2.0, CELL - 2.0),
                );
                match matrix.get(i, j) {
                    Some(r) => {
                        painter.rect_filled(cell, 3.0, correlation_color(r));
                        let cell_text = if r.abs() > 0.55 {
                            Color32::WHITE
                        } else {
                            Color32::BLACK
                        };
                        painter.text(
                            cell.center(),
                            egui::Align2::CENTER_CENTER,
                            format!("{r:.2}"),
                            font.clone(),
                            cell_text,
                        );
                    }
                    None => {
                        painter.rect_filled(cell, 3.0, Color32::from_gray(70));
                        painter.text(
                            cell.center(),
                            egui::Align2::CENTER_CENTER,
                            "-",
                            font.clone(),
                            Color32::from_gray(160),
                        );
                    }
                }
            }
        }
    }

    /// Numeric correlation table with full column names.
    pub fn draw_correlation_table(ui: &mut egui::Ui, matrix: &CorrelationMatrix) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("correlation_table")
                    .striped(true)
                    .min_col_width(60.0)
                    .spacing([10.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("");
                        for name in &matrix.columns {
                            ui.label(RichText::new(name).strong().size(11.0));
                        }
                        ui.end_row();

                        for (i, name) in matrix.columns.iter().enumerate() {
                            ui.label(RichText::new(name).strong().size(11.0));
                            for j in 0..matrix.len() {
                                match matrix.get(i, j) {
                                    Some(r) => ui.label(RichText::new(format!("{r:.3}")).size(11.0)),
                                    None => ui.label(RichText::new("-").size(11.0)),
                                };
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}

/// Diverging blue-white-red map over [-1, 1].
fn correlation_color(r: f64) -> Color32 {
    let t = r.clamp(-1.0, 1.0);
    let blend = |from: u8, to: u8, f: f64| (from as f64 + (to as f64 - from as f64) * f) as u8;
    if t < 0.0 {
        let f = -t;
        Color32::from_rgb(
            blend(245, 59, f),
            blend(245, 76, f),
            blend(245, 192, f),
        )
    } else {
        Color32::from_rgb(
            blend(245, 180, t),
            blend(245, 4, t),
            blend(245, 38, t),
        )
    }
}

fn truncate(name: &str, max_chars: usize) -> String {
    if name.chars().count() <= max_chars {
        name.to_string()
    } else {
        let mut short: String = name.chars().take(max_chars.saturating_sub(1)).collect();
        short.push('…');
        short
    }
}
