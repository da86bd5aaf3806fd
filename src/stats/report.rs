//! Dashboard Report Module
//! Precomputes every derived view the pages render, once per dataset load.

use rayon::prelude::*;

use crate::data::{Dataset, COST, DELIVERY_TIME, PREP_TIME, RATING};
use crate::stats::analysis::{
    box_stats, column_info, correlation_matrix, cumulative_revenue, describe, distribution,
    histogram, non_missing, orders_per_customer, rating_counts, scatter_points, BoxStats,
    ColumnDescribe, ColumnInfo, CorrelationMatrix, HistogramBucket,
};
use crate::stats::metrics::{compute_summary, MetricsError, MetricsSummary};
use crate::stats::segments::{price_segment_statistics, rating_category_statistics, SegmentStats};

/// Bin counts used by the dashboard's histograms, matching the original
/// page layout (30 bins everywhere except the 20-bin rating histogram).
const COST_BINS: usize = 30;
const RATING_BINS: usize = 20;
const TIME_BINS: usize = 30;
const CUSTOMER_BINS: usize = 30;

/// Everything the pages draw, derived from one immutable snapshot.
///
/// `summary` is `None` for an empty table: the explicit "no data" display
/// state. Building the same snapshot twice yields identical data.
pub struct DashboardData {
    pub summary: Option<MetricsSummary>,

    // Business Metrics page
    pub orders_per_customer: Vec<f64>,
    pub orders_per_customer_histogram: Vec<HistogramBucket>,
    pub orders_per_customer_box: Option<BoxStats>,
    pub cumulative_revenue: Vec<[f64; 2]>,

    // Exploratory Data Analysis page
    pub cost_histogram: Vec<HistogramBucket>,
    pub cost_box: Option<BoxStats>,
    pub rating_histogram: Vec<HistogramBucket>,
    pub rating_counts: Vec<(f64, usize)>,
    pub prep_histogram: Vec<HistogramBucket>,
    pub delivery_histogram: Vec<HistogramBucket>,
    pub cost_vs_rating: Vec<[f64; 2]>,
    pub prep_vs_delivery: Vec<[f64; 2]>,
    pub correlation: CorrelationMatrix,

    // Data Overview page
    pub describe: Vec<ColumnDescribe>,
    pub column_info: Vec<ColumnInfo>,

    // Advanced Analytics page
    pub price_segment_stats: Vec<SegmentStats>,
    pub rating_category_stats: Vec<SegmentStats>,
}

impl DashboardData {
    /// Build the full report. Histograms are computed in parallel.
    pub fn build(dataset: &Dataset) -> Result<Self, MetricsError> {
        let df = dataset.frame();

        let summary = match compute_summary(df) {
            Ok(summary) => Some(summary),
            Err(MetricsError::EmptyTable) => None,
            Err(err) => return Err(err),
        };

        let hist_specs: [(&str, usize); 4] = [
            (COST, COST_BINS),
            (RATING, RATING_BINS),
            (PREP_TIME, TIME_BINS),
            (DELIVERY_TIME, TIME_BINS),
        ];
        let mut histograms: Vec<Vec<HistogramBucket>> = hist_specs
            .par_iter()
            .map(|&(column, bins)| distribution(df, column, bins))
            .collect::<Result<_, _>>()?;
        let delivery_histogram = histograms.pop().unwrap_or_default();
        let prep_histogram = histograms.pop().unwrap_or_default();
        let rating_histogram = histograms.pop().unwrap_or_default();
        let cost_histogram = histograms.pop().unwrap_or_default();

        let orders_per_customer = orders_per_customer(df)?;
        let numeric = dataset.numeric_columns().to_vec();

        let report = Self {
            summary,
            orders_per_customer_histogram: histogram(&orders_per_customer, CUSTOMER_BINS),
            orders_per_customer_box: box_stats(&orders_per_customer),
            orders_per_customer,
            cumulative_revenue: cumulative_revenue(df)?,
            cost_histogram,
            cost_box: box_stats(&non_missing(df, COST)?),
            rating_histogram,
            rating_counts: rating_counts(df, RATING)?,
            prep_histogram,
            delivery_histogram,
            cost_vs_rating: scatter_points(df, COST, RATING)?,
            prep_vs_delivery: scatter_points(df, PREP_TIME, DELIVERY_TIME)?,
            correlation: correlation_matrix(df, &numeric)?,
            describe: describe(df, &numeric)?,
            column_info: column_info(df),
            price_segment_stats: price_segment_statistics(df)?,
            rating_category_stats: rating_category_statistics(df)?,
        };

        log::info!(
            "dashboard report ready: {} orders, {} numeric columns",
            df.height(),
            report.correlation.len()
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn dataset(contents: &str) -> Dataset {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        Dataset::load(file.path()).unwrap()
    }

    #[test]
    fn build_produces_a_consistent_bundle() {
        let ds = dataset(
            "order_id,customer_id,cost_of_the_order,rating,food_preparation_time,delivery_time\n\
             1,100,10.0,5,10,15\n\
             2,100,20.0,4,20,25\n\
             3,101,30.0,Not given,30,35\n\
             4,102,40.0,2,40,45\n",
        );

        let data = DashboardData::build(&ds).unwrap();
        let summary = data.summary.as_ref().unwrap();

        assert_eq!(summary.total_orders, 4);
        assert_eq!(summary.total_revenue, 100.0);
        assert_eq!(
            data.cost_histogram.iter().map(|b| b.count).sum::<usize>(),
            4
        );
        // The unrated order is absent from rating-derived views.
        assert_eq!(
            data.rating_histogram.iter().map(|b| b.count).sum::<usize>(),
            3
        );
        assert_eq!(data.cost_vs_rating.len(), 3);
        assert_eq!(data.orders_per_customer, vec![2.0, 1.0, 1.0]);
        assert_eq!(data.price_segment_stats.len(), 3);
        assert_eq!(data.rating_category_stats.len(), 4);
        assert!(!data.correlation.is_empty());
    }

    #[test]
    fn empty_table_reports_no_data_instead_of_failing() {
        let ds = dataset(
            "order_id,customer_id,cost_of_the_order,rating,food_preparation_time,delivery_time\n",
        );

        let data = DashboardData::build(&ds).unwrap();
        assert!(data.summary.is_none());
        assert!(data.cost_histogram.is_empty());
        assert!(data.cumulative_revenue.is_empty());
    }
}
