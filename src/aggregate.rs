//! Grouping of filtered rows into [`SummaryTable`]s.
//!
//! Groups are keyed by exact string equality and emitted sorted by key, so the
//! same input always produces the same table.

use crate::error::{DashboardError, Result};
use crate::schema::{SummaryRow, SummaryTable};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Sums `measure` per distinct `key`.
///
/// A group whose running total leaves the `Decimal` range is an
/// [`DashboardError::AmountOverflow`] error.
pub fn aggregate<'a, T, K, M>(
    records: impl IntoIterator<Item = &'a T>,
    key: K,
    measure: M,
) -> Result<SummaryTable>
where
    T: 'a,
    K: Fn(&'a T) -> &'a str,
    M: Fn(&'a T) -> Decimal,
{
    let mut totals: BTreeMap<&'a str, Decimal> = BTreeMap::new();

    for record in records {
        let group = key(record);
        let total = totals.entry(group).or_insert(Decimal::ZERO);
        *total = total
            .checked_add(measure(record))
            .ok_or_else(|| DashboardError::AmountOverflow {
                key: group.to_string(),
            })?;
    }

    Ok(into_table(totals))
}

/// Counts rows per distinct `key`; the group size becomes the total.
pub fn count_by<'a, T, K>(records: impl IntoIterator<Item = &'a T>, key: K) -> Result<SummaryTable>
where
    T: 'a,
    K: Fn(&'a T) -> &'a str,
{
    aggregate(records, key, |_| Decimal::ONE)
}

fn into_table(totals: BTreeMap<&str, Decimal>) -> SummaryTable {
    SummaryTable {
        rows: totals
            .into_iter()
            .map(|(key, total)| SummaryRow {
                key: key.to_string(),
                total,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    struct Sale {
        person: &'static str,
        amount: Decimal,
    }

    fn sales() -> Vec<Sale> {
        vec![
            Sale { person: "Sara", amount: dec!(100.25) },
            Sale { person: "Omar", amount: dec!(40) },
            Sale { person: "Sara", amount: dec!(-10.25) },
            Sale { person: "Lina", amount: dec!(5) },
        ]
    }

    #[test]
    fn test_aggregate_sums_per_key_sorted() {
        let rows = sales();
        let table = aggregate(&rows, |s| s.person, |s| s.amount).unwrap();

        let keys: Vec<&str> = table.rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["Lina", "Omar", "Sara"]);
        assert_eq!(table.get("Sara"), Some(dec!(90)));
    }

    #[test]
    fn test_aggregate_conserves_total() {
        let rows = sales();
        let table = aggregate(&rows, |s| s.person, |s| s.amount).unwrap();
        let input_total: Decimal = rows.iter().map(|s| s.amount).sum();
        assert_eq!(table.total().unwrap(), input_total);
    }

    #[test]
    fn test_count_by_uses_group_size() {
        let labels = vec![
            "Sara cash".to_string(),
            "Administrator".to_string(),
            "Sara cash".to_string(),
        ];
        let table = count_by(&labels, |l| l.as_str()).unwrap();
        assert_eq!(table.get("Sara cash"), Some(dec!(2)));
        assert_eq!(table.get("Administrator"), Some(dec!(1)));
        assert_eq!(table.total().unwrap(), dec!(3));
    }

    #[test]
    fn test_empty_input_yields_empty_table() {
        let rows: Vec<Sale> = Vec::new();
        assert!(aggregate(&rows, |s| s.person, |s| s.amount).unwrap().is_empty());
    }

    #[test]
    fn test_keys_are_not_normalized() {
        let rows = vec![
            Sale { person: "sara", amount: dec!(1) },
            Sale { person: "Sara", amount: dec!(1) },
        ];
        assert_eq!(aggregate(&rows, |s| s.person, |s| s.amount).unwrap().len(), 2);
    }

    #[test]
    fn test_group_overflow_is_an_error() {
        let huge = dec!(50000000000000000000000000000);
        let rows = vec![
            Sale { person: "Bank", amount: huge },
            Sale { person: "Bank", amount: huge },
        ];

        match aggregate(&rows, |s| s.person, |s| s.amount) {
            Err(DashboardError::AmountOverflow { key }) => assert_eq!(key, "Bank"),
            other => panic!("expected overflow, got {:?}", other),
        }
    }
}
