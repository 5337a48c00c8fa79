use anyhow::{bail, Context};
use chrono::Local;
use daily_sales_metrics::*;
use std::env;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 4 {
        bail!(
            "usage: daily_dashboard <invoices.csv> <payments.csv> <customers.csv> <credit_notes.csv> [config.json]"
        );
    }

    let config = match args.get(4) {
        Some(path) => DashboardConfig::from_path(path)
            .with_context(|| format!("failed to load config from {}", path))?,
        None => DashboardConfig::default(),
    };

    let invoices = RecordSet::from_csv_path("invoices", &args[0])?;
    let payments = RecordSet::from_csv_path("payments", &args[1])?;
    let customers = RecordSet::from_csv_path("customers", &args[2])?;
    let credit_notes = RecordSet::from_csv_path("credit notes", &args[3])?;

    let inputs = DashboardInputs::from_record_sets(&invoices, &payments, &customers, &credit_notes)?;
    let report = ReportingPipeline::new(config).run_at(&inputs, &Local::now())?;

    println!("📊 Daily Sales Dashboard");
    println!("Date: {}\n", report.report_date_label());
    println!(
        "  🧾 Total Invoices This Month: {}",
        report.kpis.total_invoices_this_month.round_dp(0)
    );
    println!(
        "  💰 Total Payments This Month: {}",
        report.kpis.total_payments_this_month.round_dp(0)
    );
    println!(
        "  🧍 New Customers on {}: {}\n",
        report.yesterday_label(),
        report.kpis.new_customers_yesterday
    );

    println!("💰 Payments Breakdown by Journal");
    for row in &report.payments_breakdown.rows {
        println!(
            "  {:<20} month {:>14}  yesterday {:>14}",
            row.key, row.total_current, row.total_reference
        );
    }

    println!("\n{}", report.to_json_pretty()?);

    Ok(())
}
