//! Segmentation Module
//! Derives price tiers and rating tiers from the order table and computes
//! per-segment statistics.

use polars::prelude::*;
use serde::Serialize;
use std::fmt;

use crate::data::{COST, DELIVERY_TIME, PREP_TIME, RATING};
use crate::stats::analysis::{column_values, mean};

/// Price tier from equal-width 3-bin cut over the observed cost range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PriceSegment {
    Budget,
    Standard,
    Premium,
}

impl PriceSegment {
    pub const ALL: [PriceSegment; 3] = [
        PriceSegment::Budget,
        PriceSegment::Standard,
        PriceSegment::Premium,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PriceSegment::Budget => "Budget",
            PriceSegment::Standard => "Standard",
            PriceSegment::Premium => "Premium",
        }
    }
}

impl fmt::Display for PriceSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rating tier from fixed bin edges (0,2], (2,3], (3,4], (4,5].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RatingCategory {
    Poor,
    Average,
    Good,
    Excellent,
}

impl RatingCategory {
    pub const ALL: [RatingCategory; 4] = [
        RatingCategory::Poor,
        RatingCategory::Average,
        RatingCategory::Good,
        RatingCategory::Excellent,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RatingCategory::Poor => "Poor",
            RatingCategory::Average => "Average",
            RatingCategory::Good => "Good",
            RatingCategory::Excellent => "Excellent",
        }
    }
}

impl fmt::Display for RatingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display-stable per-segment aggregates, rounded to 2 decimal places.
/// Mean fields are `None` for segments with no contributing rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentStats {
    pub segment: String,
    pub order_count: usize,
    pub avg_order_value: Option<f64>,
    pub total_revenue: f64,
    pub avg_rating: Option<f64>,
    pub avg_prep_time: Option<f64>,
    pub avg_delivery_time: Option<f64>,
}

/// Assign each row to a price tier.
///
/// Bin edges are `min + i*(max-min)/3` over the observed cost range; bins
/// are left-closed and the maximum cost lands in the top bin. Rows with a
/// missing cost get no tier. When every cost is identical the range is
/// degenerate and all rows fall in the middle tier, matching the padded
/// range of the original dashboard's cut.
pub fn assign_price_segments(df: &DataFrame) -> PolarsResult<Vec<Option<PriceSegment>>> {
    let values = column_values(df, COST)?;

    let present: Vec<f64> = values.iter().flatten().copied().collect();
    let Some(&min) = present
        .iter()
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    else {
        return Ok(vec![None; values.len()]);
    };
    let max = present
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);

    Ok(values
        .into_iter()
        .map(|v| {
            let v = v?;
            if !(max > min) {
                return Some(PriceSegment::Standard);
            }
            let idx = (((v - min) / (max - min) * 3.0).floor() as usize).min(2);
            Some(PriceSegment::ALL[idx])
        })
        .collect())
}

/// Map one rating to its tier. Missing, zero and out-of-range ratings get
/// no tier.
pub fn categorize_rating(rating: f64) -> Option<RatingCategory> {
    if rating > 0.0 && rating <= 2.0 {
        Some(RatingCategory::Poor)
    } else if rating > 2.0 && rating <= 3.0 {
        Some(RatingCategory::Average)
    } else if rating > 3.0 && rating <= 4.0 {
        Some(RatingCategory::Good)
    } else if rating > 4.0 && rating <= 5.0 {
        Some(RatingCategory::Excellent)
    } else {
        None
    }
}

/// Assign each row to a rating tier.
pub fn assign_rating_categories(df: &DataFrame) -> PolarsResult<Vec<Option<RatingCategory>>> {
    let values = column_values(df, RATING)?;
    Ok(values
        .into_iter()
        .map(|v| v.and_then(categorize_rating))
        .collect())
}

/// Group rows by segment label and aggregate. `labels` must carry one
/// entry per row; `segments` fixes the output order and includes empty
/// segments with a zero count.
pub fn segment_statistics(
    df: &DataFrame,
    labels: &[Option<&'static str>],
    segments: &[&'static str],
) -> PolarsResult<Vec<SegmentStats>> {
    debug_assert_eq!(labels.len(), df.height());

    let costs = column_values(df, COST)?;
    let ratings = column_values(df, RATING)?;
    let prep_times = column_values(df, PREP_TIME)?;
    let delivery_times = column_values(df, DELIVERY_TIME)?;

    Ok(segments
        .iter()
        .map(|&segment| {
            let rows: Vec<usize> = labels
                .iter()
                .enumerate()
                .filter(|(_, label)| **label == Some(segment))
                .map(|(i, _)| i)
                .collect();

            let pick = |values: &[Option<f64>]| -> Vec<f64> {
                rows.iter().filter_map(|&i| values[i]).collect()
            };

            let seg_costs = pick(&costs);
            SegmentStats {
                segment: segment.to_string(),
                order_count: rows.len(),
                avg_order_value: mean(&seg_costs).map(round2),
                total_revenue: round2(seg_costs.iter().sum()),
                avg_rating: mean(&pick(&ratings)).map(round2),
                avg_prep_time: mean(&pick(&prep_times)).map(round2),
                avg_delivery_time: mean(&pick(&delivery_times)).map(round2),
            }
        })
        .collect())
}

/// Per-price-tier statistics in Budget/Standard/Premium order.
pub fn price_segment_statistics(df: &DataFrame) -> PolarsResult<Vec<SegmentStats>> {
    let labels: Vec<Option<&'static str>> = assign_price_segments(df)?
        .into_iter()
        .map(|s| s.map(PriceSegment::label))
        .collect();
    let segments: Vec<&'static str> = PriceSegment::ALL.iter().map(|s| s.label()).collect();
    segment_statistics(df, &labels, &segments)
}

/// Per-rating-tier statistics in Poor..Excellent order.
pub fn rating_category_statistics(df: &DataFrame) -> PolarsResult<Vec<SegmentStats>> {
    let labels: Vec<Option<&'static str>> = assign_rating_categories(df)?
        .into_iter()
        .map(|c| c.map(RatingCategory::label))
        .collect();
    let segments: Vec<&'static str> = RatingCategory::ALL.iter().map(|c| c.label()).collect();
    segment_statistics(df, &labels, &segments)
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orders() -> DataFrame {
        df!(
            "order_id" => [1i64, 2, 3],
            "customer_id" => [100i64, 101, 102],
            "cost_of_the_order" => [10.0, 20.0, 30.0],
            "rating" => [Some(5.0), Some(3.0), None],
            "food_preparation_time" => [10i64, 20, 30],
            "delivery_time" => [15i64, 25, 35],
        )
        .unwrap()
    }

    #[test]
    fn three_spread_costs_hit_each_tier_once() {
        let segments = assign_price_segments(&orders()).unwrap();
        assert_eq!(
            segments,
            vec![
                Some(PriceSegment::Budget),
                Some(PriceSegment::Standard),
                Some(PriceSegment::Premium),
            ]
        );
    }

    #[test]
    fn identical_costs_all_land_in_the_middle_tier() {
        let df = df!(
            "order_id" => [1i64, 2],
            "customer_id" => [1i64, 2],
            "cost_of_the_order" => [15.0, 15.0],
            "rating" => [Some(4.0), Some(4.0)],
            "food_preparation_time" => [10i64, 10],
            "delivery_time" => [10i64, 10],
        )
        .unwrap();

        let segments = assign_price_segments(&df).unwrap();
        assert!(segments
            .iter()
            .all(|s| *s == Some(PriceSegment::Standard)));
    }

    #[test]
    fn rating_tier_edges_are_right_closed() {
        assert_eq!(categorize_rating(2.0), Some(RatingCategory::Poor));
        assert_eq!(categorize_rating(2.01), Some(RatingCategory::Average));
        assert_eq!(categorize_rating(3.0), Some(RatingCategory::Average));
        assert_eq!(categorize_rating(4.0), Some(RatingCategory::Good));
        assert_eq!(categorize_rating(5.0), Some(RatingCategory::Excellent));
        assert_eq!(categorize_rating(0.0), None);
        assert_eq!(categorize_rating(5.5), None);
    }

    #[test]
    fn missing_ratings_get_no_tier() {
        let categories = assign_rating_categories(&orders()).unwrap();
        assert_eq!(
            categories,
            vec![
                Some(RatingCategory::Excellent),
                Some(RatingCategory::Average),
                None,
            ]
        );
    }

    #[test]
    fn segment_statistics_aggregate_and_round_to_two_decimals() {
        let df = df!(
            "order_id" => [1i64, 2, 3],
            "customer_id" => [1i64, 2, 3],
            "cost_of_the_order" => [10.0, 10.10, 30.0],
            "rating" => [Some(5.0), Some(4.0), None],
            "food_preparation_time" => [10i64, 11, 30],
            "delivery_time" => [15i64, 16, 35],
        )
        .unwrap();

        let stats = price_segment_statistics(&df).unwrap();
        assert_eq!(stats.len(), 3);

        let budget = &stats[0];
        assert_eq!(budget.segment, "Budget");
        assert_eq!(budget.order_count, 2);
        // (10.0 + 10.10) / 2 = 10.05
        assert_eq!(budget.avg_order_value, Some(10.05));
        assert_eq!(budget.total_revenue, 20.10);
        assert_eq!(budget.avg_rating, Some(4.5));
        assert_eq!(budget.avg_prep_time, Some(10.5));
        assert_eq!(budget.avg_delivery_time, Some(15.5));

        // Empty middle tier stays in the output with a zero count.
        let standard = &stats[1];
        assert_eq!(standard.order_count, 0);
        assert_eq!(standard.avg_order_value, None);
        assert_eq!(standard.total_revenue, 0.0);
    }

    #[test]
    fn rating_category_statistics_skip_unrated_rows() {
        let stats = rating_category_statistics(&orders()).unwrap();
        let total: usize = stats.iter().map(|s| s.order_count).sum();
        assert_eq!(total, 2);

        let excellent = stats.iter().find(|s| s.segment == "Excellent").unwrap();
        assert_eq!(excellent.order_count, 1);
        assert_eq!(excellent.avg_order_value, Some(10.0));
    }

    #[test]
    fn assignments_are_idempotent() {
        let df = orders();
        assert_eq!(
            assign_price_segments(&df).unwrap(),
            assign_price_segments(&df).unwrap()
        );
        assert_eq!(
            price_segment_statistics(&df).unwrap(),
            price_segment_statistics(&df).unwrap()
        );
    }
}
