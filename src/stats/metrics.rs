//! Business Metrics Module
//! The key-performance summary computed once per dataset snapshot.

use polars::prelude::*;
use serde::Serialize;
use thiserror::Error;

use crate::data::{COST, CUSTOMER_ID, DELIVERY_TIME, ORDER_ID, PREP_TIME, RATING};
use crate::stats::analysis::{mean, non_missing};

#[derive(Error, Debug)]
pub enum MetricsError {
    /// The table has no rows; surfaced as an explicit "no data" state,
    /// never as a silent zero.
    #[error("No data: the order table is empty")]
    EmptyTable,
    #[error("Column error: {0}")]
    Column(#[from] PolarsError),
}

/// Aggregate business metrics over the full order table.
///
/// `avg_rating` is the mean over non-missing ratings only and is `None`
/// when every rating is missing. `total_revenue` is deliberately
/// `avg_order_value * total_orders`, matching the original dashboard's
/// formula rather than a true sum of costs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSummary {
    pub total_orders: usize,
    pub total_customers: usize,
    pub avg_order_value: f64,
    pub avg_rating: Option<f64>,
    pub avg_prep_time: f64,
    pub avg_delivery_time: f64,
    pub total_revenue: f64,
}

/// Compute the metrics summary. Deterministic and side-effect free; the
/// same snapshot always yields the same summary.
pub fn compute_summary(df: &DataFrame) -> Result<MetricsSummary, MetricsError> {
    if df.height() == 0 {
        return Err(MetricsError::EmptyTable);
    }

    // Duplicate rows for the same order count once.
    let total_orders = df.column(ORDER_ID)?.as_materialized_series().n_unique()?;
    let total_customers = df
        .column(CUSTOMER_ID)?
        .as_materialized_series()
        .n_unique()?;

    let avg_order_value = mean(&non_missing(df, COST)?).unwrap_or(f64::NAN);
    let avg_rating = mean(&non_missing(df, RATING)?);
    let avg_prep_time = mean(&non_missing(df, PREP_TIME)?).unwrap_or(f64::NAN);
    let avg_delivery_time = mean(&non_missing(df, DELIVERY_TIME)?).unwrap_or(f64::NAN);

    Ok(MetricsSummary {
        total_orders,
        total_customers,
        avg_order_value,
        avg_rating,
        avg_prep_time,
        avg_delivery_time,
        total_revenue: avg_order_value * total_orders as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orders() -> DataFrame {
        df!(
            "order_id" => [1i64, 2, 3, 4],
            "customer_id" => [100i64, 100, 101, 102],
            "cost_of_the_order" => [10.0, 20.0, 30.0, 40.0],
            "rating" => [Some(5.0), Some(4.0), None, Some(2.0)],
            "food_preparation_time" => [10i64, 20, 30, 40],
            "delivery_time" => [15i64, 25, 35, 45],
        )
        .unwrap()
    }

    #[test]
    fn end_to_end_summary() {
        let summary = compute_summary(&orders()).unwrap();

        assert_eq!(summary.total_orders, 4);
        assert_eq!(summary.total_customers, 3);
        assert_eq!(summary.avg_order_value, 25.0);
        assert!((summary.avg_rating.unwrap() - 11.0 / 3.0).abs() < 1e-9);
        assert_eq!(summary.avg_prep_time, 25.0);
        assert_eq!(summary.avg_delivery_time, 30.0);
        assert_eq!(summary.total_revenue, 100.0);
    }

    #[test]
    fn counts_never_exceed_row_count() {
        let df = orders();
        let summary = compute_summary(&df).unwrap();
        assert!(summary.total_orders <= df.height());
        assert!(summary.total_customers <= df.height());
    }

    #[test]
    fn duplicate_order_ids_count_once() {
        let df = df!(
            "order_id" => [1i64, 1, 2],
            "customer_id" => [100i64, 100, 101],
            "cost_of_the_order" => [10.0, 10.0, 20.0],
            "rating" => [Some(5.0), Some(5.0), Some(4.0)],
            "food_preparation_time" => [10i64, 10, 20],
            "delivery_time" => [15i64, 15, 25],
        )
        .unwrap();

        let summary = compute_summary(&df).unwrap();
        assert_eq!(summary.total_orders, 2);
    }

    #[test]
    fn avg_rating_uses_only_non_missing_rows() {
        let df = df!(
            "order_id" => [1i64, 2, 3, 4, 5],
            "customer_id" => [1i64, 2, 3, 4, 5],
            "cost_of_the_order" => [10.0, 10.0, 10.0, 10.0, 10.0],
            "rating" => [Some(3.0), None, Some(4.0), None, Some(5.0)],
            "food_preparation_time" => [10i64, 10, 10, 10, 10],
            "delivery_time" => [10i64, 10, 10, 10, 10],
        )
        .unwrap();

        let summary = compute_summary(&df).unwrap();
        assert_eq!(summary.avg_rating, Some(4.0));
    }

    #[test]
    fn all_ratings_missing_yields_undefined_average() {
        let df = df!(
            "order_id" => [1i64, 2],
            "customer_id" => [1i64, 2],
            "cost_of_the_order" => [10.0, 20.0],
            "rating" => [None::<f64>, None],
            "food_preparation_time" => [10i64, 20],
            "delivery_time" => [10i64, 20],
        )
        .unwrap();

        let summary = compute_summary(&df).unwrap();
        assert_eq!(summary.avg_rating, None);
    }

    #[test]
    fn empty_table_is_an_explicit_no_data_error() {
        let df = df!(
            "order_id" => Vec::<i64>::new(),
            "customer_id" => Vec::<i64>::new(),
            "cost_of_the_order" => Vec::<f64>::new(),
            "rating" => Vec::<f64>::new(),
            "food_preparation_time" => Vec::<i64>::new(),
            "delivery_time" => Vec::<i64>::new(),
        )
        .unwrap();

        assert!(matches!(compute_summary(&df), Err(MetricsError::EmptyTable)));
    }

    #[test]
    fn summary_is_idempotent_on_the_same_snapshot() {
        let df = orders();
        let first = compute_summary(&df).unwrap();
        let second = compute_summary(&df).unwrap();
        assert_eq!(first, second);
    }
}
