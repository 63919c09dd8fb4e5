use anyhow::Result;
use clap::Parser;
use rust_decimal::Decimal;

use std::path::Path;

mod amount;
mod analytics;
mod catalog;
mod error;
mod parser;
mod reader;
mod record;
mod report;
mod validator;

/// Command-line arguments structure.
#[derive(Parser, Debug)]
struct Args {
    /// Path to the pipe-delimited sales data file.
    input_path: String,

    /// Keep only transactions from this region (exact match).
    #[clap(long)]
    region: Option<String>,

    /// Drop transactions whose line amount is below this value.
    #[clap(long)]
    min_amount: Option<Decimal>,

    /// Drop transactions whose line amount is above this value.
    #[clap(long)]
    max_amount: Option<Decimal>,

    /// Number of entries in the top-products ranking.
    #[clap(long, default_value_t = 5)]
    top: usize,

    /// Quantity below which a product counts as low-performing.
    #[clap(long, default_value_t = 10)]
    threshold: i64,

    /// Where the formatted report is written.
    #[clap(long, default_value = "output/sales_report.txt")]
    output: String,

    /// Source enrichment titles from a catalog search instead of a paged
    /// fetch.
    #[clap(long)]
    search: Option<String>,

    /// Skip the product catalog enrichment calls.
    #[clap(long)]
    offline: bool,
}

fn run() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // A missing source file is a diagnostic, not a fatal halt; the run
    // continues over an empty dataset.
    let raw_lines = match reader::read_sales_lines(&args.input_path) {
        Ok(lines) => lines,
        Err(e) => {
            log::error!("{}; continuing with an empty dataset", e);
            Vec::new()
        }
    };

    let transactions = parser::parse_transactions(&raw_lines);
    log::info!(
        "Parsed {} transactions from {}",
        transactions.len(),
        args.input_path
    );

    let options = validator::FilterOptions {
        region: args.region.clone(),
        min_amount: args.min_amount,
        max_amount: args.max_amount,
    };
    let (valid, invalid_count, summary) = validator::validate_and_filter(transactions, &options)?;
    log::info!(
        "Validation rejected {} records; {} remain after filters",
        invalid_count,
        summary.final_count
    );

    let total_revenue = analytics::calculate_total_revenue(&valid);
    let regions = analytics::region_wise_sales(&valid);
    let products = analytics::product_sales(&valid);
    let top_products = analytics::top_selling_products(&valid, args.top);
    let customers = analytics::customer_analysis(&valid);
    let daily = analytics::daily_sales_trend(&valid);
    let low_products = analytics::low_performing_products(&valid, args.threshold);
    let peak_day = analytics::find_peak_sales_day(&valid);

    let enriched_titles = if args.offline {
        Vec::new()
    } else {
        fetch_enrichment(args.search.as_deref())
    };

    let inputs = report::ReportInputs {
        transactions: &valid,
        total_revenue,
        regions: &regions,
        products: &products,
        top_products: &top_products,
        customers: &customers,
        daily: &daily,
        low_products: &low_products,
        peak_day: peak_day.as_ref(),
        enriched_titles: &enriched_titles,
    };
    report::write_sales_report(&inputs, Path::new(&args.output))?;

    println!("Total revenue: {}", total_revenue);
    println!("Analysis complete! Check {}", args.output);

    Ok(())
}

// Enrichment is optional; any catalog failure downgrades to an empty title
// list and the aggregation results stand on their own.
fn fetch_enrichment(search: Option<&str>) -> Vec<String> {
    let fetched = catalog::CatalogClient::new().and_then(|client| {
        let products = match search {
            Some(query) => client.search_products(query)?,
            None => {
                let (products, total) = client.fetch_products(30, 0)?;
                log::info!("Fetched {} of {} catalog products", products.len(), total);
                products
            }
        };
        if let Some(first) = products.first() {
            if let Ok(detail) = client.fetch_product_by_id(first.id) {
                log::debug!("{}: {} - ${}", detail.id, detail.title, detail.price);
            }
        }
        Ok(products)
    });
    match fetched {
        Ok(products) => products.into_iter().map(|p| p.title).collect(),
        Err(e) => {
            log::warn!("Catalog enrichment skipped: {}", e);
            Vec::new()
        }
    }
}

fn main() {
    // Use proper error handling; exit with non-zero code on fatal error.
    if let Err(err) = run() {
        eprintln!("Fatal error: {:?}", err);
        std::process::exit(1);
    }
}
