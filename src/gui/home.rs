//! Home Page
//! Welcome blurb plus the quick metrics overview.

use egui::RichText;

use crate::gui::widgets::{group_thousands, metric_card, page_title, section_header};
use crate::stats::DashboardData;

pub struct HomePage;

impl HomePage {
    pub fn show(ui: &mut egui::Ui, data: &DashboardData) {
        page_title(ui, "🍕 Food Order Analytics Dashboard");
        ui.label(RichText::new("Welcome to the Food Order Data Explorer!").size(16.0));
        ui.add_space(6.0);
        ui.label(
            "This dashboard provides insights into food order data: order patterns, \
             customer behavior, delivery performance and more. Use the sidebar to \
             navigate through the different sections.",
        );
        ui.add_space(8.0);
        ui.separator();

        let Some(summary) = &data.summary else {
            ui.add_space(12.0);
            ui.label(RichText::new("No data: the order table is empty.").weak());
            return;
        };

        section_header(ui, "📈 Quick Metrics Overview");
        ui.horizontal_wrapped(|ui| {
            metric_card(
                ui,
                "Total Orders",
                &group_thousands(summary.total_orders),
                "Orders",
            );
            metric_card(
                ui,
                "Total Customers",
                &group_thousands(summary.total_customers),
                "Customers",
            );
            metric_card(
                ui,
                "Avg Order Value",
                &format!("${:.2}", summary.avg_order_value),
                "USD",
            );
            let rating = match summary.avg_rating {
                Some(r) => format!("{r:.2}/5.0"),
                None => "-".to_string(),
            };
            metric_card(ui, "Avg Rating", &rating, "Stars");
        });

        ui.add_space(8.0);
        ui.separator();
        ui.add_space(4.0);

        ui.horizontal_wrapped(|ui| {
            metric_card(
                ui,
                "Total Revenue",
                &format!("${:.2}", summary.total_revenue),
                "USD",
            );
            metric_card(
                ui,
                "Avg Prep Time",
                &format!("{:.0} min", summary.avg_prep_time),
                "Minutes",
            );
            metric_card(
                ui,
                "Avg Delivery Time",
                &format!("{:.0} min", summary.avg_delivery_time),
                "Minutes",
            );
        });
    }
}
