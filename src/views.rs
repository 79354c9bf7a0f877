//! The six dashboard views.
//!
//! Every view is computed independently from the same filtered slice. None
//! of them fails: an empty slice gives empty views.

use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use crate::filter::{filter, Selection};
use crate::table::Table;
use crate::types::{
    BoxSummaryRow, BrandCountRow, BrandMeanRow, DateRegionMeanRow, HistogramBin, StateMeanRow,
};
use crate::util::{average, quantile_sorted, sort_floats};

pub const HISTOGRAM_BINS: usize = 20;

/// Everything the presentation layer needs for one filter state, in chart
/// order.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardViews {
    pub row_count: usize,
    pub state_means: Vec<StateMeanRow>,
    pub date_region_means: Vec<DateRegionMeanRow>,
    pub brand_means: Vec<BrandMeanRow>,
    pub histogram: Vec<HistogramBin>,
    pub brand_boxes: Vec<BoxSummaryRow>,
    pub brand_counts: Vec<BrandCountRow>,
}

/// Filter the canonical table and derive all six views from the result.
pub fn compute_views(table: &Table, selection: &Selection) -> DashboardViews {
    let filtered = filter(table, selection);
    let views = views_for(&filtered);
    log::debug!(
        "recomputed views over {} rows ({} states, {} brands)",
        views.row_count,
        views.state_means.len(),
        views.brand_means.len()
    );
    views
}

/// Derive all six views from an already filtered table.
pub fn views_for(filtered: &Table) -> DashboardViews {
    DashboardViews {
        row_count: filtered.len(),
        state_means: mean_by_state(filtered),
        date_region_means: mean_by_date_and_region(filtered),
        brand_means: mean_by_brand(filtered),
        histogram: price_histogram(filtered, HISTOGRAM_BINS),
        brand_boxes: box_summary_by_brand(filtered),
        brand_counts: brand_counts(filtered),
    }
}

/// Mean price per key, highest first; equal means keep key order.
fn grouped_means<'a>(keys_and_prices: impl Iterator<Item = (&'a str, f64)>) -> Vec<(String, f64)> {
    let mut map: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for (k, p) in keys_and_prices {
        map.entry(k).or_default().push(p);
    }
    let mut rows: Vec<(String, f64)> = map
        .into_iter()
        .map(|(k, prices)| (k.to_string(), average(&prices)))
        .collect();
    rows.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    rows
}

pub fn mean_by_state(data: &Table) -> Vec<StateMeanRow> {
    let pairs = data
        .records()
        .iter()
        .filter(|r| !r.state.is_empty())
        .map(|r| (r.state.as_str(), r.sale_price));
    grouped_means(pairs)
        .into_iter()
        .map(|(state, mean_price)| StateMeanRow { state, mean_price })
        .collect()
}

pub fn mean_by_brand(data: &Table) -> Vec<BrandMeanRow> {
    let pairs = data.records().iter().map(|r| (r.brand.as_str(), r.sale_price));
    grouped_means(pairs)
        .into_iter()
        .map(|(brand, mean_price)| BrandMeanRow { brand, mean_price })
        .collect()
}

/// Mean price per (date, region), ordered by date then region. Rows
/// without a usable date are left out.
pub fn mean_by_date_and_region(data: &Table) -> Vec<DateRegionMeanRow> {
    let mut map: BTreeMap<(NaiveDate, &str), Vec<f64>> = BTreeMap::new();
    for r in data.records() {
        if let Some(d) = r.collection_date {
            map.entry((d, r.region.as_str())).or_default().push(r.sale_price);
        }
    }
    map.into_iter()
        .map(|((date, region), prices)| DateRegionMeanRow {
            date,
            region: region.to_string(),
            mean_price: average(&prices),
        })
        .collect()
}

/// Regroup date/region means into one date-ordered series per region.
pub fn series_by_region(rows: &[DateRegionMeanRow]) -> BTreeMap<String, Vec<(NaiveDate, f64)>> {
    let mut series: BTreeMap<String, Vec<(NaiveDate, f64)>> = BTreeMap::new();
    for row in rows {
        series
            .entry(row.region.clone())
            .or_default()
            .push((row.date, row.mean_price));
    }
    series
}

/// Count prices into `bins` equal-width buckets spanning the observed
/// min/max. The last bucket includes the maximum.
pub fn price_histogram(data: &Table, bins: usize) -> Vec<HistogramBin> {
    let prices: Vec<f64> = data.records().iter().map(|r| r.sale_price).collect();
    if prices.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = (max - min) / bins as f64;

    let edge = |i: usize| min + width * i as f64;

    let mut counts = vec![0usize; bins];
    for &p in &prices {
        let mut idx = if width > 0.0 {
            (((p - min) / width).floor() as usize).min(bins - 1)
        } else {
            0
        };
        // Division rounding can land one bucket off; settle against the
        // same edges the bins report.
        while idx + 1 < bins && p >= edge(idx + 1) {
            idx += 1;
        }
        while idx > 0 && p < edge(idx) {
            idx -= 1;
        }
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            lower: edge(i),
            upper: if i + 1 == bins { max } else { edge(i + 1) },
            count,
        })
        .collect()
}

/// Min, quartiles, median and max of each brand's prices, by brand name.
pub fn box_summary_by_brand(data: &Table) -> Vec<BoxSummaryRow> {
    let mut map: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for r in data.records() {
        map.entry(r.brand.as_str()).or_default().push(r.sale_price);
    }
    map.into_iter()
        .map(|(brand, mut prices)| {
            sort_floats(&mut prices);
            BoxSummaryRow {
                brand: brand.to_string(),
                count: prices.len(),
                min: quantile_sorted(&prices, 0.0),
                q1: quantile_sorted(&prices, 0.25),
                median: quantile_sorted(&prices, 0.5),
                q3: quantile_sorted(&prices, 0.75),
                max: quantile_sorted(&prices, 1.0),
            }
        })
        .collect()
}

/// Records per brand with their share of the total, largest first.
pub fn brand_counts(data: &Table) -> Vec<BrandCountRow> {
    let mut map: HashMap<&str, usize> = HashMap::new();
    for r in data.records() {
        *map.entry(r.brand.as_str()).or_default() += 1;
    }
    let total = data.len();
    let mut rows: Vec<BrandCountRow> = map
        .into_iter()
        .map(|(brand, count)| BrandCountRow {
            brand: brand.to_string(),
            count,
            share_pct: if total == 0 {
                0.0
            } else {
                count as f64 * 100.0 / total as f64
            },
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.brand.cmp(&b.brand)));
    rows
}
