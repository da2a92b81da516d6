//! Supplier + date-range filtering.

use crate::domain::{FilterCriteria, SalesRecord};

/// Records matching a `FilterCriteria`, borrowed from the dataset in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredView<'a> {
    rows: Vec<&'a SalesRecord>,
}

impl<'a> FilteredView<'a> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a SalesRecord> + '_ {
        self.rows.iter().copied()
    }

    /// Owned copy of the matching rows (for display and export).
    pub fn to_records(&self) -> Vec<SalesRecord> {
        self.rows.iter().map(|r| (*r).clone()).collect()
    }
}

impl<'a> FromIterator<&'a SalesRecord> for FilteredView<'a> {
    fn from_iter<I: IntoIterator<Item = &'a SalesRecord>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

/// Keep records whose supplier is selected and whose date lies in the inclusive range.
///
/// Total: an empty supplier set or an inverted range simply yields an empty view.
pub fn apply<'a>(records: &'a [SalesRecord], criteria: &FilterCriteria) -> FilteredView<'a> {
    if criteria.selected_suppliers.is_empty() || criteria.date_range.is_inverted() {
        return FilteredView::default();
    }

    records
        .iter()
        .filter(|r| criteria.is_selected(&r.supplier) && criteria.date_range.contains(r.date_sold))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DateRange;
    use chrono::{Datelike, NaiveDate};

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn record(supplier: &str, day: u32) -> SalesRecord {
        SalesRecord {
            supplier: supplier.to_string(),
            product: format!("{supplier}-item"),
            expected_margin_pct: 20.0,
            actual_margin_pct: 22.0,
            units_sold: 10,
            cost_per_unit: 5.0,
            date_sold: jan(day),
        }
    }

    fn dataset() -> Vec<SalesRecord> {
        vec![
            record("A", 1),
            record("B", 3),
            record("A", 5),
            record("C", 5),
            record("B", 9),
        ]
    }

    #[test]
    fn empty_supplier_set_yields_empty_view() {
        let records = dataset();
        for range in [
            DateRange::new(jan(1), jan(31)),
            DateRange::new(jan(5), jan(5)),
            DateRange::new(NaiveDate::MIN, NaiveDate::MAX),
        ] {
            let criteria = FilterCriteria::new(Vec::<String>::new(), range);
            assert!(apply(&records, &criteria).is_empty());
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        let records = dataset();
        let criteria = FilterCriteria::new(["A", "B", "C"], DateRange::new(jan(3), jan(5)));
        let view = apply(&records, &criteria);
        let days: Vec<u32> = view.iter().map(|r| r.date_sold.day()).collect();
        assert_eq!(days, vec![3, 5, 5]);
    }

    #[test]
    fn inverted_range_is_empty_not_an_error() {
        let records = dataset();
        let criteria = FilterCriteria::new(["A", "B", "C"], DateRange::new(jan(9), jan(1)));
        assert!(apply(&records, &criteria).is_empty());
    }

    #[test]
    fn supplier_membership_and_source_order() {
        let records = dataset();
        let criteria = FilterCriteria::new(["B", "A"], DateRange::new(jan(1), jan(31)));
        let view = apply(&records, &criteria);
        let suppliers: Vec<&str> = view.iter().map(|r| r.supplier.as_str()).collect();
        assert_eq!(suppliers, vec!["A", "B", "A", "B"]);
    }

    #[test]
    fn unknown_supplier_matches_nothing() {
        let records = dataset();
        let criteria = FilterCriteria::new(["Z"], DateRange::new(jan(1), jan(31)));
        assert_eq!(apply(&records, &criteria).len(), 0);
    }

    #[test]
    fn to_records_clones_rows() {
        let records = dataset();
        let criteria = FilterCriteria::new(["C"], DateRange::new(jan(1), jan(31)));
        let owned = apply(&records, &criteria).to_records();
        assert_eq!(owned, vec![record("C", 5)]);
    }
}
