//! GUI module - User interface components

mod advanced;
mod app;
mod eda;
mod home;
mod metrics_page;
mod overview;
mod widgets;

pub use advanced::AdvancedPage;
pub use app::DeliverboardApp;
pub use eda::EdaPage;
pub use home::HomePage;
pub use metrics_page::MetricsPage;
pub use overview::OverviewPage;
