//! Metrics and grouped sums over a filtered view.
//!
//! Everything is computed in a single fold: scalar totals plus the two key maps
//! (supplier → profit, date → sales). There is no per-group rescan of the view.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::AggregateResult;
use crate::engine::filter::FilteredView;

#[derive(Default)]
struct Accumulator {
    total_sales: f64,
    total_profit: f64,
    margin_sum: f64,
    rows: usize,
    profit_by_supplier: BTreeMap<String, f64>,
    sales_by_date: BTreeMap<NaiveDate, f64>,
}

/// Aggregate a filtered view. Pure: the same view always yields the same result.
pub fn aggregate(view: &FilteredView<'_>) -> AggregateResult {
    let acc = view.iter().fold(Accumulator::default(), |mut acc, r| {
        let sales = r.sales();
        let profit = r.profit();

        acc.total_sales += sales;
        acc.total_profit += profit;
        acc.margin_sum += r.actual_margin_pct;
        acc.rows += 1;

        // Only allocate a key the first time a supplier shows up.
        match acc.profit_by_supplier.get_mut(r.supplier.as_str()) {
            Some(sum) => *sum += profit,
            None => {
                acc.profit_by_supplier.insert(r.supplier.clone(), profit);
            }
        }
        *acc.sales_by_date.entry(r.date_sold).or_insert(0.0) += sales;

        acc
    });

    let avg_margin = (acc.rows > 0).then(|| acc.margin_sum / acc.rows as f64);

    AggregateResult {
        total_sales: acc.total_sales,
        total_profit: acc.total_profit,
        avg_margin,
        row_count: acc.rows,
        profit_by_supplier: acc.profit_by_supplier,
        sales_by_date: acc.sales_by_date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    use crate::domain::{DateRange, FilterCriteria, SalesRecord};
    use crate::engine::filter::apply;

    const EPS: f64 = 1e-9;

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn record(supplier: &str, cost: f64, units: u64, margin: f64, date: NaiveDate) -> SalesRecord {
        SalesRecord {
            supplier: supplier.to_string(),
            product: "Widget".to_string(),
            expected_margin_pct: margin,
            actual_margin_pct: margin,
            units_sold: units,
            cost_per_unit: cost,
            date_sold: date,
        }
    }

    fn scenario() -> Vec<SalesRecord> {
        vec![
            record("A", 10.0, 120, 28.0, jan(5)),
            record("B", 20.0, 90, 22.0, jan(12)),
        ]
    }

    fn wider() -> Vec<SalesRecord> {
        vec![
            record("A", 10.0, 120, 28.0, jan(5)),
            record("B", 20.0, 90, 22.0, jan(12)),
            record("A", 12.5, 40, 30.0, jan(12)),
            record("C", 7.25, 300, -4.0, jan(20)),
            record("B", 19.0, 0, 18.0, jan(5)),
        ]
    }

    #[test]
    fn two_supplier_scenario() {
        let records = scenario();
        let criteria = FilterCriteria::new(["A", "B"], DateRange::new(jan(5), jan(12)));
        let result = aggregate(&apply(&records, &criteria));

        assert!((result.total_sales - 3000.0).abs() < EPS);
        assert!((result.total_profit - 732.0).abs() < EPS);
        assert!((result.avg_margin.unwrap() - 25.0).abs() < EPS);
        assert_eq!(result.row_count, 2);
    }

    #[test]
    fn single_supplier_scenario() {
        let records = scenario();
        let criteria = FilterCriteria::new(["A"], DateRange::new(jan(5), jan(12)));
        let view = apply(&records, &criteria);
        assert_eq!(view.len(), 1);

        let result = aggregate(&view);
        assert_eq!(result.profit_by_supplier.len(), 1);
        assert!((result.profit_by_supplier["A"] - 336.0).abs() < EPS);
        assert_eq!(result.sales_by_date.len(), 1);
        assert!((result.sales_by_date[&jan(5)] - 1200.0).abs() < EPS);
    }

    #[test]
    fn empty_view_has_no_average() {
        let result = aggregate(&FilteredView::default());
        assert_eq!(result.avg_margin, None);
        assert_eq!(result.total_sales, 0.0);
        assert_eq!(result.total_profit, 0.0);
        assert!(result.profit_by_supplier.is_empty());
        assert!(result.sales_by_date.is_empty());
        assert!(result.is_empty());
    }

    #[test]
    fn total_sales_matches_direct_sum() {
        let records = wider();
        let criteria = FilterCriteria::new(["A", "B", "C"], DateRange::new(jan(1), jan(31)));
        let view = apply(&records, &criteria);
        let expected: f64 = view.iter().map(|r| r.cost_per_unit * r.units_sold as f64).sum();
        assert!((aggregate(&view).total_sales - expected).abs() < 1e-6);
    }

    #[test]
    fn grouping_keys_match_view_exactly() {
        let records = wider();
        // C is selected but its only row is outside the range.
        let criteria = FilterCriteria::new(["A", "B", "C"], DateRange::new(jan(1), jan(12)));
        let view = apply(&records, &criteria);
        let result = aggregate(&view);

        let suppliers: BTreeSet<&str> = view.iter().map(|r| r.supplier.as_str()).collect();
        let keys: BTreeSet<&str> = result.profit_by_supplier.keys().map(String::as_str).collect();
        assert_eq!(keys, suppliers);
        assert!(!result.profit_by_supplier.contains_key("C"));

        let dates: BTreeSet<NaiveDate> = view.iter().map(|r| r.date_sold).collect();
        let date_keys: BTreeSet<NaiveDate> = result.sales_by_date.keys().copied().collect();
        assert_eq!(date_keys, dates);
    }

    #[test]
    fn grouped_sums_add_up_to_totals() {
        let records = wider();
        let criteria = FilterCriteria::new(["A", "B", "C"], DateRange::new(jan(1), jan(31)));
        let result = aggregate(&apply(&records, &criteria));

        let profit: f64 = result.profit_by_supplier.values().sum();
        let sales: f64 = result.sales_by_date.values().sum();
        assert!((profit - result.total_profit).abs() < 1e-6);
        assert!((sales - result.total_sales).abs() < 1e-6);
        // Negative margins are used as-is.
        assert!(result.profit_by_supplier["C"] < 0.0);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let records = wider();
        let criteria = FilterCriteria::new(["A", "C"], DateRange::new(jan(1), jan(31)));
        let first = aggregate(&apply(&records, &criteria));
        let second = aggregate(&apply(&records, &criteria));
        assert_eq!(first, second);
        assert_eq!(first.total_sales.to_bits(), second.total_sales.to_bits());
    }

    #[test]
    fn sales_series_is_chronological() {
        let records = wider();
        let criteria = FilterCriteria::new(["A", "B", "C"], DateRange::new(jan(1), jan(31)));
        let series = aggregate(&apply(&records, &criteria)).sales_series();
        let dates: Vec<NaiveDate> = series.iter().map(|(d, _)| *d).collect();
        assert_eq!(dates, vec![jan(5), jan(12), jan(20)]);
    }
}
