use crate::aggregate::{aggregate, count_by};
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::filter::{filter_current_month, filter_yesterday};
use crate::ingestion::{
    credit_notes_from_record_set, customers_from_record_set, invoices_from_record_set,
    payments_from_record_set, RecordSet, CREDIT_NOTE_COLUMNS, CUSTOMER_COLUMNS, INVOICE_COLUMNS,
    PAYMENT_COLUMNS,
};
use crate::merge::merge_left;
use crate::report::{DashboardKpis, DashboardReport};
use crate::representative::{assign_credit_note_representatives, resolve_salesrep};
use crate::schema::{
    CreditNoteDetail, CreditNoteRow, CustomerRecord, InvoiceRecord, PaymentRecord, SummaryTable,
};
use crate::window::DateWindow;
use chrono::{DateTime, TimeZone};
use log::{debug, info};

/// The four extracts a dashboard run is computed from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardInputs {
    pub invoices: Vec<InvoiceRecord>,
    pub payments: Vec<PaymentRecord>,
    pub customers: Vec<CustomerRecord>,
    pub credit_notes: Vec<CreditNoteRow>,
}

impl DashboardInputs {
    /// Converts raw exports, checking the columns of all four before converting any.
    pub fn from_record_sets(
        invoices: &RecordSet,
        payments: &RecordSet,
        customers: &RecordSet,
        credit_notes: &RecordSet,
    ) -> Result<Self> {
        invoices.require_columns(&INVOICE_COLUMNS)?;
        payments.require_columns(&PAYMENT_COLUMNS)?;
        customers.require_columns(&CUSTOMER_COLUMNS)?;
        credit_notes.require_columns(&CREDIT_NOTE_COLUMNS)?;

        Ok(Self {
            invoices: invoices_from_record_set(invoices)?,
            payments: payments_from_record_set(payments)?,
            customers: customers_from_record_set(customers)?,
            credit_notes: credit_notes_from_record_set(credit_notes)?,
        })
    }
}

/// Stateless orchestrator turning the extracts into a [`DashboardReport`].
#[derive(Debug, Clone, Default)]
pub struct ReportingPipeline {
    config: DashboardConfig,
}

impl ReportingPipeline {
    pub fn new(config: DashboardConfig) -> Self {
        Self { config }
    }

    pub fn run_at<Tz: TimeZone>(
        &self,
        inputs: &DashboardInputs,
        now: &DateTime<Tz>,
    ) -> Result<DashboardReport> {
        self.run(inputs, &DateWindow::resolve(now))
    }

    pub fn run(&self, inputs: &DashboardInputs, window: &DateWindow) -> Result<DashboardReport> {
        self.config.validate()?;

        info!(
            "Building dashboard report for {} (yesterday {})",
            window.today, window.yesterday
        );
        debug!(
            "Inputs: {} invoices, {} payments, {} customers, {} credit note rows",
            inputs.invoices.len(),
            inputs.payments.len(),
            inputs.customers.len(),
            inputs.credit_notes.len()
        );

        let credit_notes = self.credit_notes_detail(&inputs.credit_notes, window)?;
        let new_customers = self.new_customers_summary(&inputs.customers, window)?;
        let (monthly_payments, yesterday_payments) =
            self.payments_summaries(&inputs.payments, window)?;
        let payments_breakdown = merge_left(&monthly_payments, &yesterday_payments);
        let (monthly_invoices, yesterday_invoices) = invoices_summaries(&inputs.invoices, window)?;

        let kpis = DashboardKpis {
            total_invoices_this_month: monthly_invoices.total()?,
            total_payments_this_month: monthly_payments.total()?,
            new_customers_yesterday: new_customers.total()?,
        };

        debug!(
            "Report tables: {} monthly invoice groups, {} yesterday invoice groups, {} journals, {} salesreps, {} credit note lines",
            monthly_invoices.len(),
            yesterday_invoices.len(),
            payments_breakdown.len(),
            new_customers.len(),
            credit_notes.len()
        );

        Ok(DashboardReport {
            window: *window,
            monthly_invoices,
            yesterday_invoices,
            monthly_payments,
            yesterday_payments,
            payments_breakdown,
            new_customers,
            credit_notes,
            kpis,
        })
    }

    fn credit_notes_detail(
        &self,
        rows: &[CreditNoteRow],
        window: &DateWindow,
    ) -> Result<Vec<CreditNoteDetail>> {
        let attributed = assign_credit_note_representatives(rows, &self.config)?;

        Ok(filter_current_month(&attributed, |n| n.invoice_bill_date, window)
            .into_iter()
            .map(|note| CreditNoteDetail {
                representative_name: note.representative_name.clone(),
                untaxed_amount_signed: note.untaxed_amount_signed,
                invoice_partner_display_name: note.invoice_partner_display_name.clone(),
            })
            .collect())
    }

    fn new_customers_summary(
        &self,
        customers: &[CustomerRecord],
        window: &DateWindow,
    ) -> Result<SummaryTable> {
        let labels: Vec<String> = filter_yesterday(customers, |c| c.created_at, window)
            .into_iter()
            .map(|customer| resolve_salesrep(customer, &self.config))
            .collect();

        count_by(&labels, |label| label.as_str())
    }

    /// Monthly posted payments per journal, and the yesterday slice of that same set.
    fn payments_summaries(
        &self,
        payments: &[PaymentRecord],
        window: &DateWindow,
    ) -> Result<(SummaryTable, SummaryTable)> {
        let posted: Vec<&PaymentRecord> = payments
            .iter()
            .filter(|p| p.status == self.config.posted_status)
            .collect();
        let monthly = filter_current_month(posted.iter().copied(), |p| p.date, window);
        let yesterday = filter_yesterday(monthly.iter().copied(), |p| p.date, window);

        Ok((
            aggregate(monthly.iter().copied(), |p| p.journal.as_str(), |p| p.amount_signed)?,
            aggregate(yesterday.iter().copied(), |p| p.journal.as_str(), |p| p.amount_signed)?,
        ))
    }
}

/// Monthly invoices per salesperson, and yesterday's invoices filtered from the
/// full set rather than from the monthly subset.
fn invoices_summaries(
    invoices: &[InvoiceRecord],
    window: &DateWindow,
) -> Result<(SummaryTable, SummaryTable)> {
    let monthly = filter_current_month(invoices, |i| i.date, window);
    let yesterday = filter_yesterday(invoices, |i| i.date, window);

    Ok((
        aggregate(
            monthly.iter().copied(),
            |i| i.salesperson_name.as_str(),
            |i| i.untaxed_amount_signed,
        )?,
        aggregate(
            yesterday.iter().copied(),
            |i| i.salesperson_name.as_str(),
            |i| i.untaxed_amount_signed,
        )?,
    ))
}

pub fn build_dashboard_report<Tz: TimeZone>(
    inputs: &DashboardInputs,
    now: &DateTime<Tz>,
    config: &DashboardConfig,
) -> Result<DashboardReport> {
    ReportingPipeline::new(config.clone()).run_at(inputs, now)
}
