//! Attribution of rows to the representative or salesperson they are reported under.
//!
//! Two independent rules live here:
//!
//! - **Block forward-fill** for credit notes: header rows name the representative,
//!   and every following line row belongs to the nearest preceding header.
//! - **Fallback fields** for customers: the first populated representative field,
//!   in a fixed priority order, decides the salesrep label.

use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};
use crate::schema::{AttributedCreditNote, CreditNoteRow, CustomerRecord};
use log::{debug, warn};

pub type FieldAccessor = fn(&CustomerRecord) -> Option<&str>;

/// Representative fields of a customer, most specific first.
pub const SALESREP_FIELD_PRIORITY: [(&str, FieldAccessor); 4] = [
    ("representative_name_2", representative_name_2),
    ("representative_name_1", representative_name_1),
    ("representative_2", representative_2),
    ("representative_1", representative_1),
];

fn representative_name_2(c: &CustomerRecord) -> Option<&str> {
    c.representative_name_2.as_deref()
}

fn representative_name_1(c: &CustomerRecord) -> Option<&str> {
    c.representative_name_1.as_deref()
}

fn representative_2(c: &CustomerRecord) -> Option<&str> {
    c.representative_2.as_deref()
}

fn representative_1(c: &CustomerRecord) -> Option<&str> {
    c.representative_1.as_deref()
}

/// Removes trailing parenthesised counters such as `"Acme (42)"` -> `"Acme"`.
///
/// Already clean names are returned unchanged.
pub fn strip_numeric_suffix(name: &str) -> &str {
    let mut rest = name.trim_end();

    while let Some(open) = rest.strip_suffix(')').and_then(|inner| inner.rfind('(')) {
        let digits = &rest[open + 1..rest.len() - 1];
        if digits.is_empty() || !digits.chars().all(is_decimal_digit) {
            break;
        }
        rest = rest[..open].trim_end();
    }

    rest
}

/// ASCII digits plus the Arabic-Indic and extended Arabic-Indic digit sets.
fn is_decimal_digit(c: char) -> bool {
    c.is_ascii_digit()
        || ('\u{0660}'..='\u{0669}').contains(&c)
        || ('\u{06F0}'..='\u{06F9}').contains(&c)
}

/// Walks the credit note export in order, carrying the current block header,
/// and emits one attributed row per credit note line.
///
/// Header rows produce no output. A line row seen before any header is a
/// [`DashboardError::DataIntegrity`] error.
pub fn assign_credit_note_representatives(
    rows: &[CreditNoteRow],
    config: &DashboardConfig,
) -> Result<Vec<AttributedCreditNote>> {
    let mut current_header: Option<String> = None;
    let mut attributed = Vec::with_capacity(rows.len());

    for (idx, row) in rows.iter().enumerate() {
        if row.is_header() {
            match row.number.as_deref().filter(|n| !n.trim().is_empty()) {
                Some(number) => current_header = Some(resolve_header_name(number, config)),
                None => warn!(
                    "Credit note header at row {} has no number; keeping the previous block",
                    idx
                ),
            }
            continue;
        }

        let representative_name = match &current_header {
            Some(name) if !name.is_empty() => name.clone(),
            Some(_) => {
                return Err(DashboardError::DataIntegrity {
                    row: idx,
                    details: "block header resolves to an empty representative name".to_string(),
                })
            }
            None => {
                return Err(DashboardError::DataIntegrity {
                    row: idx,
                    details: "credit note line appears before any block header".to_string(),
                })
            }
        };

        attributed.push(AttributedCreditNote {
            representative_name,
            invoice_partner_display_name: row
                .invoice_partner_display_name
                .clone()
                .unwrap_or_default(),
            invoice_bill_date: row.invoice_bill_date,
            untaxed_amount_signed: row.untaxed_amount_signed,
        });
    }

    Ok(attributed)
}

fn resolve_header_name(number: &str, config: &DashboardConfig) -> String {
    let name = strip_numeric_suffix(number.trim());
    if name == config.undefined_representative {
        debug!(
            "Substituting '{}' for credit note block header '{}'",
            config.fallback_representative, number
        );
        config.fallback_representative.clone()
    } else {
        name.to_string()
    }
}

/// Resolves the salesrep label a new customer is counted under.
///
/// Named representatives get the configured cash suffix; customers with no
/// representative at all fall back to the unassigned label, unsuffixed.
pub fn resolve_salesrep(customer: &CustomerRecord, config: &DashboardConfig) -> String {
    let found = SALESREP_FIELD_PRIORITY.iter().find_map(|(field_name, field)| {
        field(customer)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| (*field_name, v))
    });

    if let Some((field_name, name)) = found {
        debug!("Salesrep '{}' resolved from {}", name, field_name);
    }

    match found.map(|(_, name)| name) {
        Some(name) if name != config.unassigned_salesrep => {
            format!("{}{}", name, config.cash_suffix)
        }
        _ => config.unassigned_salesrep.clone(),
    }
}
