use crate::record::Transaction;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Sales totals for one region.
///
/// `percentage` is the region's share of the grand total, rounded to two
/// decimal places, or zero when the grand total is zero.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSales {
    pub region: String,
    pub total_sales: Decimal,
    pub transaction_count: usize,
    pub percentage: Decimal,
}

/// Aggregated quantity and revenue for one product name.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSales {
    pub product_name: String,
    pub total_quantity: i64,
    pub total_revenue: Decimal,
}

/// Purchase behavior of one customer.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerStats {
    pub customer_id: String,
    pub total_spent: Decimal,
    pub purchase_count: usize,
    pub avg_order_value: Decimal,
    pub distinct_products: usize,
}

/// One day of the sales trend.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySales {
    pub date: String,
    pub revenue: Decimal,
    pub transaction_count: usize,
    pub unique_customers: usize,
}

/// Sums `quantity * unit_price` over all transactions.
pub fn calculate_total_revenue(transactions: &[Transaction]) -> Decimal {
    transactions.iter().map(Transaction::line_amount).sum()
}

/// Groups sales by region, ordered by `total_sales` descending; ties keep
/// encounter order.
pub fn region_wise_sales(transactions: &[Transaction]) -> Vec<RegionSales> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut stats: Vec<RegionSales> = Vec::new();

    for t in transactions {
        let i = *index.entry(t.region.clone()).or_insert_with(|| {
            stats.push(RegionSales {
                region: t.region.clone(),
                total_sales: Decimal::ZERO,
                transaction_count: 0,
                percentage: Decimal::ZERO,
            });
            stats.len() - 1
        });
        stats[i].total_sales += t.line_amount();
        stats[i].transaction_count += 1;
    }

    let grand_total: Decimal = stats.iter().map(|s| s.total_sales).sum();
    for s in &mut stats {
        if grand_total > Decimal::ZERO {
            s.percentage = (s.total_sales * dec!(100) / grand_total).round_dp(2);
        }
    }

    stats.sort_by(|a, b| b.total_sales.cmp(&a.total_sales));
    stats
}

/// Groups quantity and revenue by product name, in insertion order by each
/// product's first occurrence in the transaction scan.
pub fn product_sales(transactions: &[Transaction]) -> Vec<ProductSales> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut stats: Vec<ProductSales> = Vec::new();

    for t in transactions {
        let i = *index.entry(t.product_name.clone()).or_insert_with(|| {
            stats.push(ProductSales {
                product_name: t.product_name.clone(),
                total_quantity: 0,
                total_revenue: Decimal::ZERO,
            });
            stats.len() - 1
        });
        stats[i].total_quantity += t.quantity;
        stats[i].total_revenue += t.line_amount();
    }

    stats
}

/// The `n` best-selling products by aggregated quantity; ties keep encounter
/// order.
pub fn top_selling_products(transactions: &[Transaction], n: usize) -> Vec<ProductSales> {
    let mut stats = product_sales(transactions);
    stats.sort_by(|a, b| b.total_quantity.cmp(&a.total_quantity));
    stats.truncate(n);
    stats
}

/// Products whose aggregated quantity sold is strictly below `threshold`,
/// in insertion order by first occurrence.
pub fn low_performing_products(transactions: &[Transaction], threshold: i64) -> Vec<ProductSales> {
    product_sales(transactions)
        .into_iter()
        .filter(|p| p.total_quantity < threshold)
        .collect()
}

/// Groups spending by customer, ordered by `total_spent` descending; ties
/// keep encounter order. The average order value is rounded to two decimal
/// places; distinct products are counted over product ids.
pub fn customer_analysis(transactions: &[Transaction]) -> Vec<CustomerStats> {
    struct Acc {
        customer_id: String,
        total_spent: Decimal,
        purchase_count: usize,
        products: HashSet<String>,
    }

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut accs: Vec<Acc> = Vec::new();

    for t in transactions {
        let i = *index.entry(t.customer_id.clone()).or_insert_with(|| {
            accs.push(Acc {
                customer_id: t.customer_id.clone(),
                total_spent: Decimal::ZERO,
                purchase_count: 0,
                products: HashSet::new(),
            });
            accs.len() - 1
        });
        accs[i].total_spent += t.line_amount();
        accs[i].purchase_count += 1;
        accs[i].products.insert(t.product_id.clone());
    }

    let mut stats: Vec<CustomerStats> = accs
        .into_iter()
        .map(|acc| CustomerStats {
            avg_order_value: (acc.total_spent / Decimal::from(acc.purchase_count as u64))
                .round_dp(2),
            customer_id: acc.customer_id,
            total_spent: acc.total_spent,
            purchase_count: acc.purchase_count,
            distinct_products: acc.products.len(),
        })
        .collect();

    stats.sort_by(|a, b| b.total_spent.cmp(&a.total_spent));
    stats
}

/// Groups revenue, transaction counts and unique customers by date,
/// chronologically ordered. Dates are opaque `YYYY-MM-DD` tokens, so the
/// lexicographic string order is the calendar order.
pub fn daily_sales_trend(transactions: &[Transaction]) -> Vec<DailySales> {
    struct Acc {
        revenue: Decimal,
        transaction_count: usize,
        customers: HashSet<String>,
    }

    let mut days: BTreeMap<String, Acc> = BTreeMap::new();
    for t in transactions {
        let acc = days.entry(t.date.clone()).or_insert_with(|| Acc {
            revenue: Decimal::ZERO,
            transaction_count: 0,
            customers: HashSet::new(),
        });
        acc.revenue += t.line_amount();
        acc.transaction_count += 1;
        acc.customers.insert(t.customer_id.clone());
    }

    days.into_iter()
        .map(|(date, acc)| DailySales {
            date,
            revenue: acc.revenue,
            transaction_count: acc.transaction_count,
            unique_customers: acc.customers.len(),
        })
        .collect()
}

/// The day with the highest revenue, or `None` when there is no data. Ties
/// go to the earliest day.
pub fn find_peak_sales_day(transactions: &[Transaction]) -> Option<DailySales> {
    let mut peak: Option<DailySales> = None;
    for day in daily_sales_trend(transactions) {
        match &peak {
            Some(best) if day.revenue <= best.revenue => {}
            _ => peak = Some(day),
        }
    }
    peak
}
