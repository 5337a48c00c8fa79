//! # Daily Sales Metrics
//!
//! A library for rolling daily accounting extracts (invoices, payments, customers
//! and credit notes) up into the handful of summary tables behind an operational
//! sales dashboard.
//!
//! ## Core Concepts
//!
//! - **Date Window**: "today", "yesterday" and the current month, resolved from an
//!   injected instant rather than the process clock
//! - **Representative Resolution**: credit note lines inherit the representative of
//!   their block header; customers take the first populated representative field
//! - **Windowed Filters**: order-preserving selection by calendar day or month
//! - **Summary Tables**: totals grouped by salesperson, journal or salesrep, plus a
//!   left merge of monthly and yesterday payment totals
//!
//! ## Example
//!
//! ```rust,ignore
//! use daily_sales_metrics::*;
//! use chrono::Utc;
//!
//! let inputs = DashboardInputs {
//!     payments: vec![PaymentRecord {
//!         date: NaiveDate::from_ymd_opt(2024, 3, 15),
//!         status: "posted".to_string(),
//!         journal: "Bank".to_string(),
//!         amount_signed: Decimal::new(40, 0),
//!     }],
//!     ..Default::default()
//! };
//!
//! let report = build_dashboard_report(&inputs, &Utc::now(), &DashboardConfig::default()).unwrap();
//! println!("{}", report.to_json_pretty().unwrap());
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod filter;
pub mod ingestion;
pub mod merge;
pub mod pipeline;
pub mod report;
pub mod representative;
pub mod schema;
pub mod window;

pub use aggregate::{aggregate, count_by};
pub use config::DashboardConfig;
pub use error::{DashboardError, Result};
pub use filter::{filter_by_day, filter_by_month, filter_current_month, filter_yesterday};
pub use ingestion::{
    credit_notes_from_record_set, customers_from_record_set, invoices_from_record_set,
    parse_amount, parse_date, payments_from_record_set, RecordSet,
};
pub use merge::merge_left;
pub use pipeline::{build_dashboard_report, DashboardInputs, ReportingPipeline};
pub use report::{report_json_schema, report_schema_as_json, DashboardKpis, DashboardReport};
pub use representative::{
    assign_credit_note_representatives, resolve_salesrep, strip_numeric_suffix,
};
pub use schema::*;
pub use window::DateWindow;

pub use chrono::NaiveDate;
pub use rust_decimal::Decimal;
