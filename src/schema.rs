use crate::error::{DashboardError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A posted journal entry of invoice type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Invoice/bill date. `None` when the export carried no usable date.
    pub date: Option<NaiveDate>,
    pub salesperson_name: String,
    pub untaxed_amount_signed: Decimal,
}

/// A payment transaction. Only rows whose status is the configured posted status count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub date: Option<NaiveDate>,
    pub status: String,
    pub journal: String,
    pub amount_signed: Decimal,
}

/// A customer creation event.
///
/// The four representative fields are alternates of decreasing specificity;
/// at most one of them is reliably populated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub created_at: Option<NaiveDate>,
    pub representative_name_1: Option<String>,
    pub representative_name_2: Option<String>,
    pub representative_1: Option<String>,
    pub representative_2: Option<String>,
}

/// One row of the block-structured credit note export.
///
/// A header row has `number` populated and `invoice_partner_display_name` empty;
/// every following row up to the next header is a credit note line of that block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditNoteRow {
    pub number: Option<String>,
    pub invoice_partner_display_name: Option<String>,
    pub invoice_bill_date: Option<NaiveDate>,
    pub untaxed_amount_signed: Decimal,
}

impl CreditNoteRow {
    pub fn is_header(&self) -> bool {
        is_blank(self.invoice_partner_display_name.as_deref())
    }
}

/// A credit note line after its block header has been resolved to a representative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributedCreditNote {
    pub representative_name: String,
    pub invoice_partner_display_name: String,
    pub invoice_bill_date: Option<NaiveDate>,
    pub untaxed_amount_signed: Decimal,
}

/// Row of the credit note detail table handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CreditNoteDetail {
    #[schemars(description = "Representative resolved from the block header, numeric suffix stripped")]
    pub representative_name: String,

    #[schemars(description = "Signed untaxed amount of the credit note line")]
    pub untaxed_amount_signed: Decimal,

    #[schemars(description = "Customer the credit note was issued to")]
    pub invoice_partner_display_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SummaryRow {
    #[schemars(description = "Group label (salesperson, journal or salesrep)")]
    pub key: String,

    #[schemars(description = "Sum of the measure over the group, or the group size for counts")]
    pub total: Decimal,
}

/// Grouped totals keyed by a single label. Rows are sorted by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct SummaryTable {
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, key: &str) -> Option<Decimal> {
        self.rows.iter().find(|row| row.key == key).map(|row| row.total)
    }

    /// Sum of every group total; the headline KPI of a table.
    pub fn total(&self) -> Result<Decimal> {
        self.rows.iter().try_fold(Decimal::ZERO, |acc, row| {
            acc.checked_add(row.total)
                .ok_or_else(|| DashboardError::AmountOverflow {
                    key: row.key.clone(),
                })
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MergedSummaryRow {
    pub key: String,

    #[schemars(description = "Total over the broader (monthly) window")]
    pub total_current: Decimal,

    #[schemars(description = "Total over the narrower (yesterday) window, 0 when absent")]
    pub total_reference: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct MergedSummaryTable {
    pub rows: Vec<MergedSummaryRow>,
}

impl MergedSummaryTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn get(&self, key: &str) -> Option<&MergedSummaryRow> {
        self.rows.iter().find(|row| row.key == key)
    }
}

pub(crate) fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}
