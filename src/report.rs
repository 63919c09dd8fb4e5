use crate::analytics::{CustomerStats, DailySales, ProductSales, RegionSales};
use crate::error::Errors;
use crate::record::Transaction;

use rust_decimal::Decimal;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Everything the report layout consumes. The aggregate views are computed
/// by the caller; this module only renders them.
pub struct ReportInputs<'a> {
    pub transactions: &'a [Transaction],
    pub total_revenue: Decimal,
    pub regions: &'a [RegionSales],
    pub products: &'a [ProductSales],
    pub top_products: &'a [ProductSales],
    pub customers: &'a [CustomerStats],
    pub daily: &'a [DailySales],
    pub low_products: &'a [ProductSales],
    pub peak_day: Option<&'a DailySales>,
    pub enriched_titles: &'a [String],
}

const RULE: &str = "--------------------------------------------\n";

/// Renders the report and writes it to `output_file`, creating the parent
/// directory when needed.
pub fn write_sales_report(inputs: &ReportInputs, output_file: &Path) -> Result<(), Errors> {
    if let Some(parent) = output_file.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(output_file, render(inputs))?;
    Ok(())
}

fn render(inputs: &ReportInputs) -> String {
    let mut out = String::new();
    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");

    out.push_str("============================================\n");
    out.push_str("           SALES ANALYTICS REPORT\n");
    let _ = writeln!(out, "         Generated: {}", generated);
    let _ = writeln!(out, "         Records Processed: {}", inputs.transactions.len());
    out.push_str("============================================\n\n");

    overall_summary(&mut out, inputs);
    region_performance(&mut out, inputs);
    top_products(&mut out, inputs);
    top_customers(&mut out, inputs);
    daily_trend(&mut out, inputs);
    product_performance(&mut out, inputs);
    enrichment_summary(&mut out, inputs);

    out
}

fn overall_summary(out: &mut String, inputs: &ReportInputs) {
    let count = inputs.transactions.len();
    let avg_order = if count > 0 {
        inputs.total_revenue / Decimal::from(count as u64)
    } else {
        Decimal::ZERO
    };
    let date_range = match (inputs.daily.first(), inputs.daily.last()) {
        (Some(first), Some(last)) => format!("{} to {}", first.date, last.date),
        _ => "N/A".to_string(),
    };

    out.push_str("OVERALL SUMMARY\n");
    out.push_str(RULE);
    let _ = writeln!(out, "Total Revenue:        ₹{}", money(inputs.total_revenue, 2));
    let _ = writeln!(out, "Total Transactions:   {}", count);
    let _ = writeln!(out, "Average Order Value:  ₹{}", money(avg_order, 2));
    let _ = writeln!(out, "Date Range:           {}\n", date_range);
}

fn region_performance(out: &mut String, inputs: &ReportInputs) {
    out.push_str("REGION-WISE PERFORMANCE\n");
    out.push_str(RULE);
    out.push_str("Region    Sales         % of Total  Transactions\n");
    for r in inputs.regions {
        let _ = writeln!(
            out,
            "{:<8} ₹{:<12} {:>6}%     {}",
            r.region,
            money(r.total_sales, 0),
            format!("{:.2}", r.percentage),
            r.transaction_count
        );
    }
    out.push('\n');
}

fn top_products(out: &mut String, inputs: &ReportInputs) {
    out.push_str("TOP PRODUCTS\n");
    out.push_str(RULE);
    out.push_str("Rank  Product Name        Quantity  Revenue\n");
    for (i, p) in inputs.top_products.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:<5} {:<18} {:<8} ₹{}",
            i + 1,
            p.product_name,
            p.total_quantity,
            money(p.total_revenue, 0)
        );
    }
    out.push('\n');
}

fn top_customers(out: &mut String, inputs: &ReportInputs) {
    out.push_str("TOP CUSTOMERS\n");
    out.push_str(RULE);
    out.push_str("Rank  Customer ID   Total Spent   Orders\n");
    for (i, c) in inputs.customers.iter().take(5).enumerate() {
        let _ = writeln!(
            out,
            "{:<5} {:<12} ₹{:<12} {}",
            i + 1,
            c.customer_id,
            money(c.total_spent, 0),
            c.purchase_count
        );
    }
    out.push('\n');
}

fn daily_trend(out: &mut String, inputs: &ReportInputs) {
    out.push_str("DAILY SALES TREND\n");
    out.push_str(RULE);
    out.push_str("Date        Revenue       Transactions   Unique Customers\n");
    for d in inputs.daily {
        let _ = writeln!(
            out,
            "{:<10} ₹{:<12} {:<14} {}",
            d.date,
            money(d.revenue, 0),
            d.transaction_count,
            d.unique_customers
        );
    }
    out.push('\n');
}

fn product_performance(out: &mut String, inputs: &ReportInputs) {
    out.push_str("PRODUCT PERFORMANCE ANALYSIS\n");
    out.push_str(RULE);
    let best_day = inputs.peak_day.map_or("N/A", |d| d.date.as_str());
    let _ = writeln!(out, "Best Selling Day: {}", best_day);

    if inputs.low_products.is_empty() {
        out.push_str("No low performing products.\n");
    } else {
        out.push_str("Low Performing Products:\n");
        for p in inputs.low_products {
            let _ = writeln!(
                out,
                "  {}: Quantity={}, Revenue=₹{}",
                p.product_name,
                p.total_quantity,
                money(p.total_revenue, 0)
            );
        }
    }

    out.push_str("Average Transaction Value per Region:\n");
    for r in inputs.regions {
        let avg = if r.transaction_count > 0 {
            r.total_sales / Decimal::from(r.transaction_count as u64)
        } else {
            Decimal::ZERO
        };
        let _ = writeln!(out, "  {}: ₹{}", r.region, money(avg, 2));
    }
    out.push('\n');
}

fn enrichment_summary(out: &mut String, inputs: &ReportInputs) {
    out.push_str("API ENRICHMENT SUMMARY\n");
    out.push_str(RULE);
    let _ = writeln!(
        out,
        "Total Products Enriched: {}",
        inputs.enriched_titles.len()
    );

    let success_rate = if inputs.products.is_empty() {
        Decimal::ZERO
    } else {
        (Decimal::from(inputs.enriched_titles.len() as u64) * Decimal::from(100)
            / Decimal::from(inputs.products.len() as u64))
        .round_dp(2)
    };
    let _ = writeln!(out, "Success Rate: {:.2}%", success_rate);

    let missing: Vec<&str> = inputs
        .products
        .iter()
        .map(|p| p.product_name.as_str())
        .filter(|name| !inputs.enriched_titles.iter().any(|t| t == name))
        .collect();
    if missing.is_empty() {
        out.push_str("All products enriched successfully.\n");
    } else {
        out.push_str("Products not enriched:\n");
        for name in missing {
            let _ = writeln!(out, "  {}", name);
        }
    }
}

// ₹ amounts are grouped with thousands separators for display only; the
// views themselves stay unrounded.
fn money(amount: Decimal, dp: usize) -> String {
    let fixed = format!("{:.*}", dp, amount.round_dp(dp as u32));
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}
