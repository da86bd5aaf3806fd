//! Exploratory Data Analysis Page
//! Toggleable sections: distributions, rating analysis, time analysis,
//! scatterplots and correlations.

use egui::{RichText, ScrollArea};

use crate::charts::{ChartPlotter, BLUE, GREEN, ORANGE, PINK, RED};
use crate::gui::widgets::{page_title, section_header};
use crate::stats::DashboardData;

pub struct EdaPage {
    show_order_value: bool,
    show_rating: bool,
    show_time: bool,
    show_scatter: bool,
    show_correlations: bool,
}

impl Default for EdaPage {
    fn default() -> Self {
        Self {
            show_order_value: true,
            show_rating: false,
            show_time: false,
            show_scatter: false,
            show_correlations: false,
        }
    }
}

impl EdaPage {
    pub fn show(&mut self, ui: &mut egui::Ui, data: &DashboardData) {
        page_title(ui, "📊 Exploratory Data Analysis");

        ui.label("Select the visualizations to explore:");
        ui.horizontal_wrapped(|ui| {
            ui.checkbox(&mut self.show_order_value, "Order Value Distribution");
            ui.checkbox(&mut self.show_rating, "Rating Analysis");
            ui.checkbox(&mut self.show_time, "Time Analysis");
            ui.checkbox(&mut self.show_scatter, "Scatterplots");
            ui.checkbox(&mut self.show_correlations, "Correlations");
        });
        ui.separator();

        let summary = data.summary.as_ref();

        if self.show_order_value {
            section_header(ui, "💰 Order Value Distribution");
            ui.columns(2, |columns| {
                columns[0].label(RichText::new("Order Cost Distribution").strong());
                ChartPlotter::draw_histogram(
                    &mut columns[0],
                    "eda_cost",
                    &data.cost_histogram,
                    BLUE,
                    "Order Cost ($)",
                    summary.map(|s| s.avg_order_value),
                );

                columns[1].label(RichText::new("Order Cost - Box Plot").strong());
                match &data.cost_box {
                    Some(stats) => ChartPlotter::draw_box_plot(
                        &mut columns[1],
                        "eda_cost",
                        stats,
                        RED,
                        "Order Cost ($)",
                    ),
                    None => {
                        columns[1].label(RichText::new("No data").weak());
                    }
                }
            });
            ui.separator();
        }

        if self.show_rating {
            section_header(ui, "⭐ Rating Analysis");
            ui.columns(2, |columns| {
                columns[0].label(RichText::new("Customer Rating Distribution").strong());
                ChartPlotter::draw_histogram(
                    &mut columns[0],
                    "eda_rating",
                    &data.rating_histogram,
                    GREEN,
                    "Rating",
                    summary.and_then(|s| s.avg_rating),
                );

                columns[1].label(RichText::new("Rating Distribution (Pie Chart)").strong());
                let slices: Vec<(String, f64)> = data
                    .rating_counts
                    .iter()
                    .map(|(rating, count)| (format!("{rating:.0}"), *count as f64))
                    .collect();
                ChartPlotter::draw_pie(&mut columns[1], &slices, 220.0);
            });
            ui.separator();
        }

        if self.show_time {
            section_header(ui, "⏱ Time Analysis");
            ui.columns(2, |columns| {
                columns[0].label(RichText::new("Food Preparation Time Distribution").strong());
                ChartPlotter::draw_histogram(
                    &mut columns[0],
                    "eda_prep",
                    &data.prep_histogram,
                    PINK,
                    "Prep Time (minutes)",
                    summary.map(|s| s.avg_prep_time),
                );

                columns[1].label(RichText::new("Delivery Time Distribution").strong());
                ChartPlotter::draw_histogram(
                    &mut columns[1],
                    "eda_delivery",
                    &data.delivery_histogram,
                    ORANGE,
                    "Delivery Time (minutes)",
                    summary.map(|s| s.avg_delivery_time),
                );
            });
            ui.separator();
        }

        if self.show_scatter {
            section_header(ui, "📍 Scatterplot Analysis");
            ui.columns(2, |columns| {
                columns[0].label(RichText::new("Order Cost vs. Customer Rating").strong());
                ChartPlotter::draw_scatter(
                    &mut columns[0],
                    "cost_vs_rating",
                    &data.cost_vs_rating,
                    BLUE,
                    "Order Cost ($)",
                    "Rating",
                );

                columns[1].label(RichText::new("Preparation Time vs. Delivery Time").strong());
                ChartPlotter::draw_scatter(
                    &mut columns[1],
                    "prep_vs_delivery",
                    &data.prep_vs_delivery,
                    RED,
                    "Prep Time (min)",
                    "Delivery Time (min)",
                );
            });
            ui.separator();
        }

        if self.show_correlations {
            section_header(ui, "🔗 Correlation Analysis");
            ScrollArea::horizontal()
                .id_salt("heatmap_scroll")
                .show(ui, |ui| {
                    ChartPlotter::draw_heatmap(ui, &data.correlation);
                });

            ui.add_space(8.0);
            ui.label(RichText::new("Correlation Values").strong());
            ChartPlotter::draw_correlation_table(ui, &data.correlation);
        }
    }
}
