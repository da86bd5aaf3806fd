//! Shared Page Widgets
//! Metric cards, headers and small formatting helpers used across pages.

use egui::{Color32, RichText};

/// Large page heading.
pub fn page_title(ui: &mut egui::Ui, title: &str) {
    ui.add_space(4.0);
    ui.label(RichText::new(title).size(24.0).strong());
    ui.add_space(8.0);
}

/// Section heading within a page.
pub fn section_header(ui: &mut egui::Ui, text: &str) {
    ui.add_space(6.0);
    ui.label(RichText::new(text).size(16.0).strong());
    ui.add_space(4.0);
}

/// One KPI card: caption, big value, unit hint.
pub fn metric_card(ui: &mut egui::Ui, label: &str, value: &str, caption: &str) {
    egui::Frame::none()
        .fill(ui.visuals().widgets.noninteractive.bg_fill)
        .rounding(8.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_min_width(150.0);
            ui.vertical(|ui| {
                ui.label(RichText::new(label).size(12.0).color(Color32::GRAY));
                ui.label(RichText::new(value).size(20.0).strong());
                ui.label(RichText::new(caption).size(11.0).color(Color32::GRAY));
            });
        });
}

/// `1234567` -> `1,234,567`.
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Optional statistic for table cells; missing renders as a dash.
pub fn format_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn optional_formatting() {
        assert_eq!(format_opt(Some(3.456)), "3.46");
        assert_eq!(format_opt(None), "-");
    }
}
