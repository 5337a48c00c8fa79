//! Conversion of tabular exports into the typed record sets the pipeline consumes.
//!
//! Every required column is checked before any row is converted. Blank cells
//! become `None`, and dates that cannot be parsed are kept as `None` so the
//! windowed filters exclude them later.

use crate::error::{DashboardError, Result};
use crate::schema::{CreditNoteRow, CustomerRecord, InvoiceRecord, PaymentRecord};
use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, warn};
use rust_decimal::Decimal;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

pub const INVOICE_DATE: &str = "Invoice/Bill Date";
pub const SALESPERSON_NAMES: &str = "Sales Person Names";
pub const UNTAXED_AMOUNT_SIGNED: &str = "Untaxed Amount Signed";

pub const PAYMENT_DATE: &str = "Date";
pub const PAYMENT_STATUS: &str = "Status";
pub const PAYMENT_JOURNAL: &str = "Journal";
pub const AMOUNT_SIGNED: &str = "Amount Signed";

pub const CREATED_AT: &str = "Created At";
pub const REPRESENTATIVE_NAME_1: &str = "Representative Name__1";
pub const REPRESENTATIVE_NAME_2: &str = "Representative Name__2";
pub const REPRESENTATIVE_1: &str = "Representative__1";
pub const REPRESENTATIVE_2: &str = "Representative__2";

pub const CREDIT_NOTE_NUMBER: &str = "Number";
pub const INVOICE_PARTNER_DISPLAY_NAME: &str = "Invoice Partner Display Name";

pub const INVOICE_COLUMNS: [&str; 3] = [INVOICE_DATE, SALESPERSON_NAMES, UNTAXED_AMOUNT_SIGNED];
pub const PAYMENT_COLUMNS: [&str; 4] = [PAYMENT_DATE, PAYMENT_STATUS, PAYMENT_JOURNAL, AMOUNT_SIGNED];
pub const CUSTOMER_COLUMNS: [&str; 5] = [
    CREATED_AT,
    REPRESENTATIVE_NAME_1,
    REPRESENTATIVE_NAME_2,
    REPRESENTATIVE_1,
    REPRESENTATIVE_2,
];
pub const CREDIT_NOTE_COLUMNS: [&str; 4] = [
    CREDIT_NOTE_NUMBER,
    INVOICE_PARTNER_DISPLAY_NAME,
    INVOICE_DATE,
    UNTAXED_AMOUNT_SIGNED,
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];

/// A named table of string cells, as read from an export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RecordSet {
    pub fn new(name: impl Into<String>, columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    pub fn from_csv_reader<R: Read>(name: impl Into<String>, reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

        let columns = rdr
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        let set = Self::new(name, columns, rows);
        debug!("Read {} rows from {} export", set.rows.len(), set.name);
        Ok(set)
    }

    pub fn from_csv_path(name: impl Into<String>, path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(name, file)
    }

    pub fn column_index(&self, column: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| DashboardError::MissingColumn {
                dataset: self.name.clone(),
                column: column.to_string(),
            })
    }

    pub fn require_columns(&self, columns: &[&str]) -> Result<()> {
        for column in columns {
            self.column_index(column)?;
        }
        Ok(())
    }

    fn indices<const N: usize>(&self, columns: [&str; N]) -> Result<[usize; N]> {
        let mut indices = [0; N];
        for (slot, column) in indices.iter_mut().zip(columns) {
            *slot = self.column_index(column)?;
        }
        Ok(indices)
    }

    fn cell(row: &[String], idx: usize) -> Option<&str> {
        row.get(idx).map(|c| c.trim()).filter(|c| !c.is_empty())
    }

    fn date_cell(&self, row: &[String], idx: usize, row_idx: usize) -> Option<NaiveDate> {
        let raw = Self::cell(row, idx)?;
        let parsed = parse_date(raw);
        if parsed.is_none() {
            warn!(
                "Unparseable date '{}' in {} export at row {}; row will be excluded from date windows",
                raw, self.name, row_idx
            );
        }
        parsed
    }

    fn amount_cell(&self, row: &[String], idx: usize, row_idx: usize) -> Result<Decimal> {
        match Self::cell(row, idx) {
            None => Ok(Decimal::ZERO),
            Some(raw) => parse_amount(raw).ok_or_else(|| DashboardError::InvalidAmount {
                dataset: self.name.clone(),
                row: row_idx,
                value: raw.to_string(),
            }),
        }
    }

    fn text_cell(row: &[String], idx: usize) -> Option<String> {
        Self::cell(row, idx).map(str::to_string)
    }
}

/// Parses the date formats spreadsheet exports commonly produce.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Parses a signed amount, tolerating thousands separators.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}

pub fn invoices_from_record_set(set: &RecordSet) -> Result<Vec<InvoiceRecord>> {
    let [date, salesperson, amount] = set.indices(INVOICE_COLUMNS)?;

    set.rows
        .iter()
        .enumerate()
        .map(|(row_idx, row)| {
            Ok(InvoiceRecord {
                date: set.date_cell(row, date, row_idx),
                salesperson_name: RecordSet::text_cell(row, salesperson).unwrap_or_default(),
                untaxed_amount_signed: set.amount_cell(row, amount, row_idx)?,
            })
        })
        .collect()
}

pub fn payments_from_record_set(set: &RecordSet) -> Result<Vec<PaymentRecord>> {
    let [date, status, journal, amount] = set.indices(PAYMENT_COLUMNS)?;

    set.rows
        .iter()
        .enumerate()
        .map(|(row_idx, row)| {
            Ok(PaymentRecord {
                date: set.date_cell(row, date, row_idx),
                status: RecordSet::text_cell(row, status).unwrap_or_default(),
                journal: RecordSet::text_cell(row, journal).unwrap_or_default(),
                amount_signed: set.amount_cell(row, amount, row_idx)?,
            })
        })
        .collect()
}

pub fn customers_from_record_set(set: &RecordSet) -> Result<Vec<CustomerRecord>> {
    let [created_at, name_1, name_2, rep_1, rep_2] = set.indices(CUSTOMER_COLUMNS)?;

    Ok(set
        .rows
        .iter()
        .enumerate()
        .map(|(row_idx, row)| CustomerRecord {
            created_at: set.date_cell(row, created_at, row_idx),
            representative_name_1: RecordSet::text_cell(row, name_1),
            representative_name_2: RecordSet::text_cell(row, name_2),
            representative_1: RecordSet::text_cell(row, rep_1),
            representative_2: RecordSet::text_cell(row, rep_2),
        })
        .collect())
}

pub fn credit_notes_from_record_set(set: &RecordSet) -> Result<Vec<CreditNoteRow>> {
    let [number, partner, date, amount] = set.indices(CREDIT_NOTE_COLUMNS)?;

    set.rows
        .iter()
        .enumerate()
        .map(|(row_idx, row)| {
            Ok(CreditNoteRow {
                number: RecordSet::text_cell(row, number),
                invoice_partner_display_name: RecordSet::text_cell(row, partner),
                invoice_bill_date: set.date_cell(row, date, row_idx),
                untaxed_amount_signed: set.amount_cell(row, amount, row_idx)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn set(name: &str, csv: &str) -> RecordSet {
        RecordSet::from_csv_reader(name, csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15);
        assert_eq!(parse_date("2024-03-15"), expected);
        assert_eq!(parse_date("2024-03-15 08:12:00"), expected);
        assert_eq!(parse_date("2024-03-15T08:12:00"), expected);
        assert_eq!(parse_date("15/03/2024"), expected);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2024-02-30"), None);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,250.50"), Some(dec!(1250.50)));
        assert_eq!(parse_amount("-40"), Some(dec!(-40)));
        assert_eq!(parse_amount("abc"), None);
    }

    #[test]
    fn test_invoices_from_csv() {
        let invoices = set(
            "invoices",
            "Invoice/Bill Date,Sales Person Names,Untaxed Amount Signed\n\
             2024-03-15,Sara,100.5\n\
             not a date,Omar,\n",
        );

        let records = invoices_from_record_set(&invoices).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].salesperson_name, "Sara");
        assert_eq!(records[0].untaxed_amount_signed, dec!(100.5));
        assert_eq!(records[1].date, None);
        assert_eq!(records[1].untaxed_amount_signed, Decimal::ZERO);
    }

    #[test]
    fn test_missing_column_is_reported() {
        let payments = set("payments", "Date,Status,Amount Signed\n2024-03-15,posted,10\n");
        let err = payments_from_record_set(&payments).unwrap_err();
        match err {
            DashboardError::MissingColumn { dataset, column } => {
                assert_eq!(dataset, "payments");
                assert_eq!(column, "Journal");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_amount_fails_closed() {
        let payments = set(
            "payments",
            "Date,Status,Journal,Amount Signed\n2024-03-15,posted,Bank,ten\n",
        );
        assert!(matches!(
            payments_from_record_set(&payments),
            Err(DashboardError::InvalidAmount { row: 0, .. })
        ));
    }

    #[test]
    fn test_credit_note_blank_cells_become_none() {
        let notes = set(
            "credit notes",
            "Number,Invoice Partner Display Name,Invoice/Bill Date,Untaxed Amount Signed\n\
             Sara (3),,,\n\
             ,Client A,2024-03-02,-12\n",
        );

        let rows = credit_notes_from_record_set(&notes).unwrap();
        assert!(rows[0].is_header());
        assert_eq!(rows[0].number.as_deref(), Some("Sara (3)"));
        assert_eq!(rows[1].number, None);
        assert_eq!(rows[1].invoice_partner_display_name.as_deref(), Some("Client A"));
    }

    #[test]
    fn test_customers_columns_may_be_in_any_order() {
        let customers = set(
            "customers",
            "Representative__1,Representative__2,Representative Name__1,Representative Name__2,Created At\n\
             Sara,,,,2024-03-15\n",
        );

        let records = customers_from_record_set(&customers).unwrap();
        assert_eq!(records[0].representative_1.as_deref(), Some("Sara"));
        assert_eq!(records[0].representative_name_2, None);
        assert_eq!(records[0].created_at, NaiveDate::from_ymd_opt(2024, 3, 15));
    }
}
