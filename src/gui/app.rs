//! Deliverboard Main Application
//! Sidebar navigation plus the page views, with background dataset loading.

use anyhow::Context;
use egui::{RichText, ScrollArea, SidePanel};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::thread;

use crate::data::Dataset;
use crate::gui::{AdvancedPage, EdaPage, HomePage, MetricsPage, OverviewPage};
use crate::stats::DashboardData;

/// Dataset picked up automatically when present in the working directory.
pub const DEFAULT_DATA_PATH: &str = "food_order_cleaned.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Home,
    DataOverview,
    BusinessMetrics,
    Eda,
    Advanced,
}

impl Page {
    const ALL: [Page; 5] = [
        Page::Home,
        Page::DataOverview,
        Page::BusinessMetrics,
        Page::Eda,
        Page::Advanced,
    ];

    fn label(self) -> &'static str {
        match self {
            Page::Home => "🏠 Home",
            Page::DataOverview => "🔢 Data Overview",
            Page::BusinessMetrics => "📊 Business Metrics",
            Page::Eda => "📈 Exploratory Data Analysis",
            Page::Advanced => "🔬 Advanced Analytics",
        }
    }
}

/// Result of a background load.
enum LoadResult {
    Progress(String),
    Complete(Box<(Dataset, DashboardData)>),
    Error(String),
}

/// Main application window.
pub struct DeliverboardApp {
    page: Page,
    dataset: Option<Dataset>,
    data: Option<DashboardData>,

    overview: OverviewPage,
    eda: EdaPage,

    status: String,
    is_loading: bool,
    load_rx: Option<Receiver<LoadResult>>,
}

impl DeliverboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self {
            page: Page::Home,
            dataset: None,
            data: None,
            overview: OverviewPage::default(),
            eda: EdaPage::default(),
            status: "No dataset loaded".to_string(),
            is_loading: false,
            load_rx: None,
        };

        if Path::new(DEFAULT_DATA_PATH).exists() {
            app.start_load(PathBuf::from(DEFAULT_DATA_PATH));
        }

        app
    }

    /// Load and precompute in a background thread; the UI polls the channel.
    fn start_load(&mut self, path: PathBuf) {
        if self.is_loading {
            return;
        }

        self.is_loading = true;
        self.status = format!("Loading {}...", path.display());

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress("Reading CSV file...".to_string()));

            let dataset = match Dataset::load(&path) {
                Ok(dataset) => dataset,
                Err(e) => {
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                    return;
                }
            };

            let _ = tx.send(LoadResult::Progress(
                "Computing dashboard metrics...".to_string(),
            ));

            match DashboardData::build(&dataset) {
                Ok(data) => {
                    let _ = tx.send(LoadResult::Complete(Box::new((dataset, data))));
                }
                Err(e) => {
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                }
            }
        });
    }

    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.status = status;
                    }
                    LoadResult::Complete(loaded) => {
                        let (dataset, data) = *loaded;
                        self.status = format!(
                            "Loaded {} rows, {} columns",
                            dataset.row_count(),
                            dataset.column_count()
                        );
                        self.dataset = Some(dataset);
                        self.data = Some(data);
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        log::error!("dataset load failed: {error}");
                        self.status = format!("Error: {error}");
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    fn handle_browse(&mut self) {
        if self.is_loading {
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            // Explicit invalidation: a new handle replaces the old snapshot.
            self.dataset = None;
            self.data = None;
            self.start_load(path);
        }
    }

    fn handle_export_metrics(&mut self) {
        let Some(summary) = self.data.as_ref().and_then(|d| d.summary.as_ref()) else {
            self.status = "No metrics to export".to_string();
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("metrics_summary.json")
            .save_file()
        else {
            return;
        };

        match Self::write_summary_json(summary, &path) {
            Ok(()) => {
                self.status = format!("Metrics exported to {}", path.display());
            }
            Err(e) => {
                log::error!("metrics export failed: {e:#}");
                self.status = format!("Error: {e}");
            }
        }
    }

    fn write_summary_json(
        summary: &crate::stats::MetricsSummary,
        path: &Path,
    ) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(summary).context("serializing metrics summary")?;
        std::fs::write(path, json)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    fn show_sidebar(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🍕 Deliverboard")
                    .size(22.0)
                    .color(egui::Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Food Order Analytics")
                    .size(11.0)
                    .color(egui::Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();

        ui.label(RichText::new("Select a Page").size(13.0).strong());
        ui.add_space(4.0);
        for page in Page::ALL {
            if ui
                .selectable_label(self.page == page, page.label())
                .clicked()
            {
                self.page = page;
            }
        }

        ui.add_space(10.0);
        ui.separator();
        ui.label(RichText::new("📁 Data Source").size(13.0).strong());
        ui.add_space(4.0);

        let file_name = self
            .dataset
            .as_ref()
            .and_then(|ds| ds.path().file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "No file loaded".to_string());
        ui.label(RichText::new(file_name).size(12.0));

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            if ui.button("📂 Browse").clicked() {
                self.handle_browse();
            }
            let export_enabled = !self.is_loading
                && self
                    .data
                    .as_ref()
                    .is_some_and(|d| d.summary.is_some());
            ui.add_enabled_ui(export_enabled, |ui| {
                if ui.button("💾 Export Metrics").clicked() {
                    self.handle_export_metrics();
                }
            });
        });

        ui.add_space(10.0);
        ui.separator();

        if self.is_loading {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new(&self.status).size(11.0));
            });
        } else {
            let status_color = if self.status.starts_with("Error") {
                egui::Color32::from_rgb(220, 53, 69)
            } else {
                egui::Color32::GRAY
            };
            ui.label(RichText::new(&self.status).size(11.0).color(status_color));
        }
    }

    fn show_page(&mut self, ui: &mut egui::Ui) {
        let page = self.page;
        let overview = &mut self.overview;
        let eda = &mut self.eda;

        let (Some(dataset), Some(data)) = (&self.dataset, &self.data) else {
            ui.centered_and_justified(|ui| {
                let hint = if self.is_loading {
                    "Loading dataset..."
                } else {
                    "No dataset loaded. Use Browse to open a food order CSV."
                };
                ui.label(RichText::new(hint).size(18.0).weak());
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| match page {
                Page::Home => HomePage::show(ui, data),
                Page::DataOverview => overview.show(ui, dataset, data),
                Page::BusinessMetrics => MetricsPage::show(ui, data),
                Page::Eda => eda.show(ui, data),
                Page::Advanced => AdvancedPage::show(ui, data),
            });
    }
}

impl eframe::App for DeliverboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        if self.is_loading {
            ctx.request_repaint();
        }

        SidePanel::left("sidebar")
            .min_width(240.0)
            .max_width(280.0)
            .show(ctx, |ui| {
                ScrollArea::vertical().show(ui, |ui| {
                    self.show_sidebar(ui);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_page(ui);
        });
    }
}
