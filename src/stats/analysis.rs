//! Descriptive Analysis Module
//! Histograms, box statistics, correlations and per-column summaries.
//! Every function is a pure, re-entrant read of the table snapshot.

use polars::prelude::*;
use statrs::statistics::Statistics;
use std::collections::BTreeMap;

use crate::data::{COST, CUSTOMER_ID};

/// One equal-width histogram bucket: [lower, upper), last bucket closed.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBucket {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Five-number summary plus mean, for box plots.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub whisker_low: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_high: f64,
    pub mean: f64,
}

/// Pearson correlations over the numeric columns. Symmetric; entries are
/// `None` where the correlation is undefined (zero-variance column).
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get(i).and_then(|row| row.get(j)).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Per-column describe() row: count plus the classic eight-number summary.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescribe {
    pub name: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub p25: Option<f64>,
    pub p50: Option<f64>,
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

/// Per-column dtype and missing-value overview.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub name: String,
    pub dtype: String,
    pub non_null: usize,
    pub missing: usize,
}

/// All values of a column as Float64, nulls preserved.
pub(crate) fn column_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    let col = df.column(name)?.cast(&DataType::Float64)?;
    let ca = col.f64()?;
    Ok(ca.into_iter().collect())
}

/// Non-missing values of a column as Float64.
pub(crate) fn non_missing(df: &DataFrame, name: &str) -> PolarsResult<Vec<f64>> {
    let col = df.column(name)?.cast(&DataType::Float64)?;
    let ca = col.f64()?;
    Ok(ca.into_iter().flatten().collect())
}

/// Mean over the given values; `None` when there are none.
/// Missing values are expected to be excluded by the caller.
pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().mean())
    }
}

/// Percentile with linear interpolation (NumPy compatible).
pub(crate) fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    let n = sorted_values.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted_values[0];
    }

    let rank = (p / 100.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(n - 1);
    let frac = rank - lower as f64;

    if lower == upper {
        sorted_values[lower]
    } else {
        sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
    }
}

/// Equal-width histogram over the observed range of `column`.
///
/// Buckets are left-closed; the maximum value lands in the top bucket.
/// Missing values are excluded. These are the bucket semantics behind every
/// histogram in the app.
pub fn distribution(
    df: &DataFrame,
    column: &str,
    bucket_count: usize,
) -> PolarsResult<Vec<HistogramBucket>> {
    let values = non_missing(df, column)?;
    Ok(histogram(&values, bucket_count))
}

/// Equal-width bucketing of raw values, same semantics as [`distribution`].
pub fn histogram(values: &[f64], bucket_count: usize) -> Vec<HistogramBucket> {
    if values.is_empty() || bucket_count == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    // Degenerate range: everything in a single bucket.
    if !(max > min) {
        return vec![HistogramBucket {
            lower: min,
            upper: max,
            count: values.len(),
        }];
    }

    let width = (max - min) / bucket_count as f64;
    let mut counts = vec![0usize; bucket_count];
    for &v in values {
        let idx = (((v - min) / width).floor() as usize).min(bucket_count - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBucket {
            lower: min + i as f64 * width,
            upper: min + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

/// Box plot statistics with 1.5 IQR whiskers clamped to observed values.
pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let q1 = percentile(&sorted, 25.0);
    let median = percentile(&sorted, 50.0);
    let q3 = percentile(&sorted, 75.0);
    let iqr = q3 - q1;

    let whisker_low = sorted
        .iter()
        .copied()
        .find(|&v| v >= q1 - 1.5 * iqr)
        .unwrap_or(q1);
    let whisker_high = sorted
        .iter()
        .rev()
        .copied()
        .find(|&v| v <= q3 + 1.5 * iqr)
        .unwrap_or(q3);

    Some(BoxStats {
        whisker_low,
        q1,
        median,
        q3,
        whisker_high,
        mean: sorted.iter().mean(),
    })
}

/// Pearson correlation between every pair of the given numeric columns,
/// using pairwise-complete observations. The diagonal is 1.0 wherever the
/// column has nonzero variance and `None` otherwise.
pub fn correlation_matrix(df: &DataFrame, columns: &[String]) -> PolarsResult<CorrelationMatrix> {
    let series: Vec<Vec<Option<f64>>> = columns
        .iter()
        .map(|name| column_values(df, name))
        .collect::<PolarsResult<_>>()?;

    let n = columns.len();
    let mut values = vec![vec![None; n]; n];

    for i in 0..n {
        values[i][i] = if has_variance(&series[i]) {
            Some(1.0)
        } else {
            None
        };
        for j in (i + 1)..n {
            let r = pearson(&series[i], &series[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix {
        columns: columns.to_vec(),
        values,
    })
}

fn has_variance(values: &[Option<f64>]) -> bool {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    match present.first() {
        Some(&first) => present.iter().any(|&v| v != first),
        None => false,
    }
}

fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys.iter())
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        None
    } else {
        Some(cov / (var_x.sqrt() * var_y.sqrt()))
    }
}

/// Describe rows for the given numeric columns, computed over non-missing
/// values only.
pub fn describe(df: &DataFrame, columns: &[String]) -> PolarsResult<Vec<ColumnDescribe>> {
    columns
        .iter()
        .map(|name| {
            let mut values = non_missing(df, name)?;
            values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            let count = values.len();

            let row = if count == 0 {
                ColumnDescribe {
                    name: name.clone(),
                    count,
                    mean: None,
                    std: None,
                    min: None,
                    p25: None,
                    p50: None,
                    p75: None,
                    max: None,
                }
            } else {
                let std = if count > 1 {
                    Some(values.iter().std_dev())
                } else {
                    None
                };
                ColumnDescribe {
                    name: name.clone(),
                    count,
                    mean: Some(values.iter().mean()),
                    std,
                    min: values.first().copied(),
                    p25: Some(percentile(&values, 25.0)),
                    p50: Some(percentile(&values, 50.0)),
                    p75: Some(percentile(&values, 75.0)),
                    max: values.last().copied(),
                }
            };
            Ok(row)
        })
        .collect()
}

/// Dtype and missing-value overview for every column of the table.
pub fn column_info(df: &DataFrame) -> Vec<ColumnInfo> {
    let height = df.height();
    df.get_columns()
        .iter()
        .map(|col| {
            let missing = col.null_count();
            ColumnInfo {
                name: col.name().to_string(),
                dtype: col.dtype().to_string(),
                non_null: height - missing,
                missing,
            }
        })
        .collect()
}

/// Number of orders placed by each customer, in a deterministic
/// (customer-sorted) order.
pub fn orders_per_customer(df: &DataFrame) -> PolarsResult<Vec<f64>> {
    let col = df.column(CUSTOMER_ID)?;
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();

    for i in 0..df.height() {
        let val = col.get(i)?;
        if !val.is_null() {
            let key = val.to_string().trim_matches('"').to_string();
            *counts.entry(key).or_default() += 1;
        }
    }

    Ok(counts.into_values().map(|c| c as f64).collect())
}

/// Frequency of each distinct non-missing rating value, ascending.
pub fn rating_counts(df: &DataFrame, column: &str) -> PolarsResult<Vec<(f64, usize)>> {
    let values = non_missing(df, column)?;
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for v in values {
        // Keyed at 3 decimals so float noise cannot split a rating.
        *counts.entry((v * 1000.0).round() as i64).or_default() += 1;
    }
    Ok(counts
        .into_iter()
        .map(|(k, c)| (k as f64 / 1000.0, c))
        .collect())
}

/// Running revenue total over orders sorted by cost ascending; x is the
/// 1-based order number.
pub fn cumulative_revenue(df: &DataFrame) -> PolarsResult<Vec<[f64; 2]>> {
    let mut costs = non_missing(df, COST)?;
    costs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mut total = 0.0;
    Ok(costs
        .into_iter()
        .enumerate()
        .map(|(i, c)| {
            total += c;
            [(i + 1) as f64, total]
        })
        .collect())
}

/// (x, y) pairs for rows where both columns are non-missing.
pub fn scatter_points(df: &DataFrame, x: &str, y: &str) -> PolarsResult<Vec<[f64; 2]>> {
    let xs = column_values(df, x)?;
    let ys = column_values(df, y)?;
    Ok(xs
        .into_iter()
        .zip(ys)
        .filter_map(|(x, y)| Some([x?, y?]))
        .collect())
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
    fn histogram_buckets_are_equal_width_and_max_lands_in_top_bucket() {
        let buckets = histogram(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 10.0], 5);
        assert_eq!(buckets.len(), 5);

        let width = buckets[0].upper - buckets[0].lower;
        for b in &buckets {
            assert!((b.upper - b.lower - width).abs() < 1e-9);
        }

        // 10.0 == max goes into the last bucket, not out of range.
        assert_eq!(buckets[4].count, 1);
        assert_eq!(buckets.iter().map(|b| b.count).sum::<usize>(), 7);
    }

    #[test]
    fn histogram_degenerate_range_collapses_to_one_bucket() {
        let buckets = histogram(&[3.0, 3.0, 3.0], 10);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].count, 3);
    }

    #[test]
    fn histogram_of_empty_input_is_empty() {
        assert!(histogram(&[], 10).is_empty());
    }

    #[test]
    fn distribution_excludes_missing_values() {
        let df = orders();
        let buckets = distribution(&df, "rating", 3).unwrap();
        assert_eq!(buckets.iter().map(|b| b.count).sum::<usize>(), 3);
    }

    #[test]
    fn correlation_diagonal_is_one_and_matrix_is_symmetric() {
        let df = orders();
        let cols: Vec<String> = ["cost_of_the_order", "food_preparation_time", "delivery_time"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let m = correlation_matrix(&df, &cols).unwrap();

        for i in 0..m.len() {
            assert_eq!(m.get(i, i), Some(1.0));
            for j in 0..m.len() {
                assert_eq!(m.get(i, j), m.get(j, i));
            }
        }

        // prep and delivery move together perfectly in the fixture.
        let r = m.get(1, 2).unwrap();
        assert!((r - 1.0).abs() < 1e-9);
    }

    #[test]
    fn correlation_with_zero_variance_column_is_undefined_not_a_crash() {
        let df = df!(
            "flat" => [7.0, 7.0, 7.0],
            "varying" => [1.0, 2.0, 3.0],
        )
        .unwrap();
        let cols = vec!["flat".to_string(), "varying".to_string()];
        let m = correlation_matrix(&df, &cols).unwrap();

        assert_eq!(m.get(0, 0), None);
        assert_eq!(m.get(0, 1), None);
        assert_eq!(m.get(1, 0), None);
        assert_eq!(m.get(1, 1), Some(1.0));
    }

    #[test]
    fn correlation_skips_missing_pairs() {
        let df = df!(
            "a" => [Some(1.0), Some(2.0), None, Some(4.0)],
            "b" => [Some(2.0), Some(4.0), Some(100.0), Some(8.0)],
        )
        .unwrap();
        let cols = vec!["a".to_string(), "b".to_string()];
        let m = correlation_matrix(&df, &cols).unwrap();

        // Only rows where both sides are present participate; those are
        // perfectly linear.
        assert!((m.get(0, 1).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn describe_reports_quartiles_over_non_missing_values() {
        let df = orders();
        let rows = describe(&df, &["rating".to_string()]).unwrap();
        assert_eq!(rows[0].count, 3);
        assert_eq!(rows[0].min, Some(2.0));
        assert_eq!(rows[0].max, Some(5.0));
        assert_eq!(rows[0].p50, Some(4.0));
    }

    #[test]
    fn orders_per_customer_counts_rows_per_customer() {
        let df = orders();
        let counts = orders_per_customer(&df).unwrap();
        assert_eq!(counts, vec![2.0, 1.0, 1.0]);
    }

    #[test]
    fn scatter_points_drop_rows_with_a_missing_side() {
        let df = orders();
        let points = scatter_points(&df, "cost_of_the_order", "rating").unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0], [10.0, 5.0]);
    }

    #[test]
    fn box_stats_match_quartiles() {
        let stats = box_stats(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.q1, 2.0);
        assert_eq!(stats.q3, 4.0);
        assert_eq!(stats.whisker_low, 1.0);
        assert_eq!(stats.whisker_high, 5.0);
        assert_eq!(stats.mean, 3.0);
    }

    #[test]
    fn cumulative_revenue_is_a_running_sum_over_sorted_costs() {
        let df = orders();
        let line = cumulative_revenue(&df).unwrap();
        assert_eq!(line.len(), 4);
        assert_eq!(line[0], [1.0, 10.0]);
        assert_eq!(line[3], [4.0, 100.0]);
    }
}
