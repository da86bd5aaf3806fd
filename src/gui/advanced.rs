//! Advanced Analytics Page
//! Price-segment and rating-category breakdowns.

use egui::RichText;

use crate::charts::ChartPlotter;
use crate::gui::widgets::{format_opt, group_thousands, page_title, section_header};
use crate::stats::{DashboardData, SegmentStats};

pub struct AdvancedPage;

impl AdvancedPage {
    pub fn show(ui: &mut egui::Ui, data: &DashboardData) {
        page_title(ui, "🔬 Advanced Analytics");

        if data.summary.is_none() {
            ui.label(RichText::new("No data: the order table is empty.").weak());
            return;
        }

        section_header(ui, "Segment Analysis");
        ui.columns(3, |columns| {
            columns[0].label(RichText::new("Order Segments by Price").strong());
            let slices: Vec<(String, f64)> = data
                .price_segment_stats
                .iter()
                .map(|s| (s.segment.clone(), s.order_count as f64))
                .collect();
            ChartPlotter::draw_pie(&mut columns[0], &slices, 200.0);

            columns[1].label(RichText::new("Average Rating by Price Segment").strong());
            let ratings: Vec<(String, f64)> = data
                .price_segment_stats
                .iter()
                .filter_map(|s| Some((s.segment.clone(), s.avg_rating?)))
                .collect();
            ChartPlotter::draw_category_bars(
                &mut columns[1],
                "segment_rating",
                &ratings,
                "Average Rating",
            );

            columns[2].label(RichText::new("Average Order Value by Segment").strong());
            let values: Vec<(String, f64)> = data
                .price_segment_stats
                .iter()
                .filter_map(|s| Some((s.segment.clone(), s.avg_order_value?)))
                .collect();
            ChartPlotter::draw_category_bars(
                &mut columns[2],
                "segment_value",
                &values,
                "Average Order Value ($)",
            );
        });

        ui.add_space(8.0);
        ui.separator();
        section_header(ui, "Performance Metrics by Price Segment");
        Self::segment_table(ui, "price_segment_table", &data.price_segment_stats);

        ui.add_space(8.0);
        ui.separator();
        section_header(ui, "Analysis by Rating Category");
        ui.columns(2, |columns| {
            columns[0].label(RichText::new("Orders by Rating Category").strong());
            let counts: Vec<(String, f64)> = data
                .rating_category_stats
                .iter()
                .map(|s| (s.segment.clone(), s.order_count as f64))
                .collect();
            ChartPlotter::draw_category_bars(
                &mut columns[0],
                "rating_cat_counts",
                &counts,
                "Number of Orders",
            );

            columns[1].label(RichText::new("Average Order Value by Rating Category").strong());
            let values: Vec<(String, f64)> = data
                .rating_category_stats
                .iter()
                .filter_map(|s| Some((s.segment.clone(), s.avg_order_value?)))
                .collect();
            ChartPlotter::draw_category_bars(
                &mut columns[1],
                "rating_cat_value",
                &values,
                "Average Order Value ($)",
            );
        });
    }

    fn segment_table(ui: &mut egui::Ui, id: &str, stats: &[SegmentStats]) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(id)
                    .striped(true)
                    .min_col_width(90.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        for header in [
                            "Segment",
                            "Number of Orders",
                            "Avg Order Value",
                            "Total Revenue",
                            "Avg Rating",
                            "Avg Prep Time (min)",
                            "Avg Delivery Time (min)",
                        ] {
                            ui.label(RichText::new(header).strong().size(11.0));
                        }
                        ui.end_row();

                        for row in stats {
                            ui.label(RichText::new(&row.segment).size(11.0));
                            ui.label(RichText::new(group_thousands(row.order_count)).size(11.0));
                            ui.label(RichText::new(format_opt(row.avg_order_value)).size(11.0));
                            ui.label(RichText::new(format!("{:.2}", row.total_revenue)).size(11.0));
                            ui.label(RichText::new(format_opt(row.avg_rating)).size(11.0));
                            ui.label(RichText::new(format_opt(row.avg_prep_time)).size(11.0));
                            ui.label(RichText::new(format_opt(row.avg_delivery_time)).size(11.0));
                            ui.end_row();
                        }
                    });
            });
    }
}
