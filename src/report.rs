use crate::schema::{CreditNoteDetail, MergedSummaryTable, SummaryTable};
use crate::window::DateWindow;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DashboardKpis {
    #[schemars(description = "Sum of the monthly invoices summary")]
    pub total_invoices_this_month: Decimal,

    #[schemars(description = "Sum of the monthly posted payments summary")]
    pub total_payments_this_month: Decimal,

    #[schemars(description = "Number of customers created yesterday")]
    pub new_customers_yesterday: Decimal,
}

/// Everything the presentation layer needs to draw the daily sales dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DashboardReport {
    #[schemars(description = "Calendar window the report was computed for")]
    pub window: DateWindow,

    #[schemars(description = "Untaxed invoice totals per salesperson for the current month")]
    pub monthly_invoices: SummaryTable,

    #[schemars(description = "Untaxed invoice totals per salesperson for yesterday")]
    pub yesterday_invoices: SummaryTable,

    #[schemars(description = "Posted payment totals per journal for the current month")]
    pub monthly_payments: SummaryTable,

    #[schemars(description = "Posted payment totals per journal for yesterday")]
    pub yesterday_payments: SummaryTable,

    #[schemars(description = "Monthly payments per journal with yesterday's share alongside")]
    pub payments_breakdown: MergedSummaryTable,

    #[schemars(description = "Customers created yesterday, counted per salesrep label")]
    pub new_customers: SummaryTable,

    #[schemars(description = "Credit note lines of the current month with their representative")]
    pub credit_notes: Vec<CreditNoteDetail>,

    pub kpis: DashboardKpis,
}

impl DashboardReport {
    /// Heading date, e.g. `"Saturday, 16 March 2024"`.
    pub fn report_date_label(&self) -> String {
        self.window.today.format("%A, %d %B %Y").to_string()
    }

    /// Short form of yesterday used in table titles, e.g. `"15 Mar 2024"`.
    pub fn yesterday_label(&self) -> String {
        self.window.yesterday.format("%d %b %Y").to_string()
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

pub fn report_json_schema() -> schemars::schema::RootSchema {
    schemars::schema_for!(DashboardReport)
}

pub fn report_schema_as_json() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&report_json_schema())
}
