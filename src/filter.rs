use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::table::Table;
use crate::types::Record;

/// Active filter values. An empty set or a missing bound leaves that
/// dimension unrestricted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub regions: BTreeSet<String>,
    pub brands: BTreeSet<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl Selection {
    pub fn with_regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regions = regions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_brands<I, S>(mut self, brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.brands = brands.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// The date range, only when both bounds are set.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.start?, self.end?))
    }

    pub fn is_unrestricted(&self) -> bool {
        self.regions.is_empty() && self.brands.is_empty() && self.date_range().is_none()
    }

    /// Whether a record passes every active predicate.
    pub fn matches(&self, r: &Record) -> bool {
        if let Some((start, end)) = self.date_range() {
            match r.collection_date {
                Some(d) if d >= start && d <= end => {}
                _ => return false,
            }
        }
        if !self.regions.is_empty() && !self.regions.contains(&r.region) {
            return false;
        }
        if !self.brands.is_empty() && !self.brands.contains(&r.brand) {
            return false;
        }
        true
    }
}

/// Rows of `table` that satisfy `selection`, as a new table.
pub fn filter(table: &Table, selection: &Selection) -> Table {
    if selection.is_unrestricted() {
        return table.clone();
    }
    let rows: Vec<Record> = table
        .records()
        .iter()
        .filter(|r| selection.matches(r))
        .cloned()
        .collect();
    log::debug!("filter kept {} of {} rows", rows.len(), table.len());
    Table::new(rows)
}
