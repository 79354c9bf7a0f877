use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::filter::Selection;
use crate::types::Record;

/// An immutable set of cleaned records.
///
/// The loader builds the canonical table once; filtering produces new
/// tables and never touches the one it reads from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest parseable collection date, if any row has one.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.records.iter().filter_map(|r| r.collection_date);
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }
}

/// Choices offered to the user, derived once from the canonical table.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOptions {
    pub regions: Vec<String>,
    pub brands: Vec<String>,
    pub date_bounds: Option<(NaiveDate, NaiveDate)>,
}

impl FilterOptions {
    pub fn from_table(table: &Table) -> Self {
        let regions: BTreeSet<&str> = table.records().iter().map(|r| r.region.as_str()).collect();
        let brands: BTreeSet<&str> = table.records().iter().map(|r| r.brand.as_str()).collect();
        Self {
            regions: regions.into_iter().map(str::to_string).collect(),
            brands: brands.into_iter().map(str::to_string).collect(),
            date_bounds: table.date_bounds(),
        }
    }

    /// The selection a fresh session starts from: every region and brand,
    /// with the date range spanning the observed dates.
    pub fn default_selection(&self) -> Selection {
        let selection = Selection::default();
        match self.date_bounds {
            Some((start, end)) => selection.with_date_range(Some(start), Some(end)),
            None => selection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NOT_INFORMED;

    fn rec(region: &str, brand: &str, date: Option<(i32, u32, u32)>) -> Record {
        Record {
            region: region.into(),
            state: "SP".into(),
            municipality: "SAO PAULO".into(),
            reseller: "POSTO".into(),
            product: "GLP".into(),
            collection_date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            sale_price: 100.0,
            purchase_price: None,
            brand: brand.into(),
        }
    }

    #[test]
    fn options_are_distinct_and_sorted() {
        let table = Table::new(vec![
            rec("SE", "ULTRAGAZ", Some((2025, 1, 3))),
            rec("N", NOT_INFORMED, Some((2025, 1, 1))),
            rec("SE", "COPAGAZ", None),
            rec("CO", "ULTRAGAZ", Some((2025, 1, 9))),
        ]);
        let opts = FilterOptions::from_table(&table);
        assert_eq!(opts.regions, vec!["CO", "N", "SE"]);
        assert_eq!(opts.brands, vec!["COPAGAZ", NOT_INFORMED, "ULTRAGAZ"]);
        assert_eq!(
            opts.date_bounds,
            Some((
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 9).unwrap()
            ))
        );

        let sel = opts.default_selection();
        assert!(sel.regions.is_empty());
        assert!(sel.brands.is_empty());
        assert_eq!(sel.start, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(sel.end, NaiveDate::from_ymd_opt(2025, 1, 9));
    }

    #[test]
    fn no_dates_means_no_bounds() {
        let table = Table::new(vec![rec("S", "X", None)]);
        assert_eq!(table.date_bounds(), None);
        assert!(FilterOptions::from_table(&table)
            .default_selection()
            .is_unrestricted());
        assert_eq!(Table::default().date_bounds(), None);
    }
}
