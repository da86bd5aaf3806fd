//! Data Overview Page
//! Dataset preview, per-column dtypes and missing counts, describe table.

use egui::{RichText, ScrollArea};

use crate::data::Dataset;
use crate::gui::widgets::{format_opt, group_thousands, page_title, section_header};
use crate::stats::DashboardData;

const PREVIEW_ROWS: usize = 200;

pub struct OverviewPage {
    show_table: bool,
    show_summary: bool,
}

impl Default for OverviewPage {
    fn default() -> Self {
        Self {
            show_table: false,
            show_summary: true,
        }
    }
}

impl OverviewPage {
    pub fn show(&mut self, ui: &mut egui::Ui, dataset: &Dataset, data: &DashboardData) {
        page_title(ui, "🔢 Data Overview");
        ui.label(
            "The food order dataset contains customer details, order values, ratings \
             and delivery performance metrics.",
        );
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.checkbox(&mut self.show_table, "Show dataset preview");
            ui.checkbox(&mut self.show_summary, "Show data summary");
        });
        ui.separator();

        if self.show_table {
            section_header(ui, "Dataset Preview");
            ui.label(
                RichText::new(format!("First {PREVIEW_ROWS} rows"))
                    .size(11.0)
                    .weak(),
            );
            self.preview_table(ui, dataset);
            ui.separator();
        }

        if self.show_summary {
            section_header(ui, "Dataset Shape");
            ui.label(format!(
                "Rows: {} | Columns: {}",
                group_thousands(dataset.row_count()),
                dataset.column_count()
            ));
            ui.add_space(4.0);
            ui.label(
                RichText::new(format!(
                    "Numeric: {}",
                    dataset.numeric_columns().join(", ")
                ))
                .size(11.0),
            );
            ui.label(
                RichText::new(format!(
                    "Categorical: {}",
                    dataset.categorical_columns().join(", ")
                ))
                .size(11.0),
            );

            section_header(ui, "Column Information");
            Self::column_info_table(ui, data);
            ui.separator();
        }

        section_header(ui, "Statistical Summary");
        Self::describe_table(ui, data);
    }

    fn preview_table(&self, ui: &mut egui::Ui, dataset: &Dataset) {
        let columns = dataset.column_names();
        let rows = dataset.preview(PREVIEW_ROWS);

        ScrollArea::both()
            .max_height(320.0)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                egui::Grid::new("preview_table")
                    .striped(true)
                    .min_col_width(70.0)
                    .spacing([12.0, 3.0])
                    .show(ui, |ui| {
                        for name in &columns {
                            ui.label(RichText::new(name).strong().size(11.0));
                        }
                        ui.end_row();

                        for row in &rows {
                            for value in row {
                                ui.label(RichText::new(value).size(11.0));
                            }
                            ui.end_row();
                        }
                    });
            });
    }

    fn column_info_table(ui: &mut egui::Ui, data: &DashboardData) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("column_info_table")
                    .striped(true)
                    .min_col_width(90.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Column").strong().size(11.0));
                        ui.label(RichText::new("Type").strong().size(11.0));
                        ui.label(RichText::new("Non-Null").strong().size(11.0));
                        ui.label(RichText::new("Missing").strong().size(11.0));
                        ui.end_row();

                        for info in &data.column_info {
                            ui.label(RichText::new(&info.name).size(11.0));
                            ui.label(RichText::new(&info.dtype).size(11.0));
                            ui.label(RichText::new(group_thousands(info.non_null)).size(11.0));
                            ui.label(RichText::new(group_thousands(info.missing)).size(11.0));
                            ui.end_row();
                        }
                    });
            });
    }

    fn describe_table(ui: &mut egui::Ui, data: &DashboardData) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("describe_table")
                    .striped(true)
                    .min_col_width(70.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        for header in
                            ["Column", "Count", "Mean", "Std", "Min", "25%", "50%", "75%", "Max"]
                        {
                            ui.label(RichText::new(header).strong().size(11.0));
                        }
                        ui.end_row();

                        for row in &data.describe {
                            ui.label(RichText::new(&row.name).size(11.0));
                            ui.label(RichText::new(group_thousands(row.count)).size(11.0));
                            for value in [
                                row.mean, row.std, row.min, row.p25, row.p50, row.p75, row.max,
                            ] {
                                ui.label(RichText::new(format_opt(value)).size(11.0));
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}
