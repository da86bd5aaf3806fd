//! Stats module - metrics, segmentation and descriptive analysis

mod analysis;
mod metrics;
mod report;
mod segments;

pub use analysis::{
    box_stats, column_info, correlation_matrix, cumulative_revenue, describe, distribution,
    histogram, orders_per_customer, rating_counts, scatter_points, BoxStats, ColumnDescribe,
    ColumnInfo, CorrelationMatrix, HistogramBucket,
};
pub use metrics::{compute_summary, MetricsError, MetricsSummary};
pub use report::DashboardData;
pub use segments::{
    assign_price_segments, assign_rating_categories, categorize_rating, price_segment_statistics,
    rating_category_statistics, segment_statistics, PriceSegment, RatingCategory, SegmentStats,
};
