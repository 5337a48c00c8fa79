use crate::schema::{MergedSummaryRow, MergedSummaryTable, SummaryTable};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Left-joins `reference` onto `current` by key.
///
/// Every key of `current` appears once, in `current`'s order. Keys missing from
/// `reference` get a zero reference total; keys only in `reference` are dropped.
pub fn merge_left(current: &SummaryTable, reference: &SummaryTable) -> MergedSummaryTable {
    let reference_totals: HashMap<&str, Decimal> = reference
        .rows
        .iter()
        .map(|row| (row.key.as_str(), row.total))
        .collect();

    MergedSummaryTable {
        rows: current
            .rows
            .iter()
            .map(|row| MergedSummaryRow {
                key: row.key.clone(),
                total_current: row.total,
                total_reference: reference_totals
                    .get(row.key.as_str())
                    .copied()
                    .unwrap_or(Decimal::ZERO),
            })
            .collect(),
    }
}
