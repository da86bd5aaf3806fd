//! Business Metrics Page
//! KPI cards plus order/customer/revenue distribution charts.

use egui::RichText;

use crate::charts::{ChartPlotter, BLUE, GREEN, PURPLE, RED};
use crate::gui::widgets::{group_thousands, metric_card, page_title, section_header};
use crate::stats::DashboardData;

pub struct MetricsPage;

impl MetricsPage {
    pub fn show(ui: &mut egui::Ui, data: &DashboardData) {
        page_title(ui, "📊 Business Metrics Dashboard");

        let Some(summary) = &data.summary else {
            ui.label(RichText::new("No data: the order table is empty.").weak());
            return;
        };

        section_header(ui, "Key Performance Indicators");
        ui.horizontal_wrapped(|ui| {
            metric_card(
                ui,
                "Total Orders",
                &group_thousands(summary.total_orders),
                "Orders Processed",
            );
            metric_card(
                ui,
                "Total Customers",
                &group_thousands(summary.total_customers),
                "Unique Customers",
            );
            metric_card(
                ui,
                "Avg Order Value",
                &format!("${:.2}", summary.avg_order_value),
                "Per Order",
            );
            let rating = match summary.avg_rating {
                Some(r) => format!("{r:.2}/5.0"),
                None => "-".to_string(),
            };
            metric_card(ui, "Customer Rating", &rating, "Average");
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
                "Preparation",
            );
            metric_card(
                ui,
                "Avg Delivery Time",
                &format!("{:.0} min", summary.avg_delivery_time),
                "Delivery",
            );
        });

        ui.add_space(8.0);
        ui.separator();
        section_header(ui, "Detailed Metrics Analysis");

        ui.columns(2, |columns| {
            columns[0].label(RichText::new("Orders per Customer Distribution").strong());
            ChartPlotter::draw_histogram(
                &mut columns[0],
                "orders_per_customer",
                &data.orders_per_customer_histogram,
                BLUE,
                "Number of Orders",
                None,
            );

            columns[1].label(RichText::new("Orders per Customer - Box Plot").strong());
            match &data.orders_per_customer_box {
                Some(stats) => ChartPlotter::draw_box_plot(
                    &mut columns[1],
                    "orders_per_customer",
                    stats,
                    RED,
                    "Number of Orders",
                ),
                None => {
                    columns[1].label(RichText::new("No data").weak());
                }
            }
        });

        ui.add_space(8.0);
        ui.separator();
        section_header(ui, "Revenue Analysis");

        ui.columns(2, |columns| {
            columns[0].label(RichText::new("Order Value Distribution").strong());
            ChartPlotter::draw_histogram(
                &mut columns[0],
                "metrics_cost",
                &data.cost_histogram,
                GREEN,
                "Order Cost ($)",
                None,
            );

            columns[1].label(RichText::new("Cumulative Revenue").strong());
            ChartPlotter::draw_line_chart(
                &mut columns[1],
                "cumulative_revenue",
                &data.cumulative_revenue,
                PURPLE,
                "Order Number",
                "Cumulative Revenue ($)",
            );
        });
    }
}
