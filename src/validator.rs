use crate::error::Errors;
use crate::record::Transaction;

use rust_decimal::Decimal;
use std::collections::BTreeSet;

/// Optional post-validation filters. Each is independently toggleable; an
/// unset option leaves the corresponding stage inactive.
#[derive(Debug, Default, Clone)]
pub struct FilterOptions {
    pub region: Option<String>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
}

/// Per-stage accounting for one validation run. With both filters active,
/// `total_input == invalid + filtered_by_region + filtered_by_amount +
/// final_count`; an inactive filter contributes 0.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilterSummary {
    pub total_input: usize,
    pub invalid: usize,
    pub filtered_by_region: usize,
    pub filtered_by_amount: usize,
    pub final_count: usize,
}

/// Validates parsed transactions and applies the optional filters.
///
/// A record is wholly valid or wholly rejected; each rejected record
/// increments the invalid count exactly once. The region filter runs before
/// the amount filter, and each stage's removal count is relative to that
/// stage's input.
///
/// The only hard failure is an inverted amount range, which is a caller
/// mistake rather than a data-quality problem.
pub fn validate_and_filter(
    transactions: Vec<Transaction>,
    options: &FilterOptions,
) -> Result<(Vec<Transaction>, usize, FilterSummary), Errors> {
    if let (Some(min), Some(max)) = (options.min_amount, options.max_amount) {
        if min > max {
            return Err(Errors::InvalidAmountRange(min, max));
        }
    }

    let total_input = transactions.len();
    let mut invalid = 0usize;
    let mut valid = Vec::with_capacity(total_input);
    for transaction in transactions {
        if is_structurally_valid(&transaction) {
            valid.push(transaction);
        } else {
            invalid += 1;
        }
    }

    report_observations(&valid);

    let mut filtered_by_region = 0usize;
    if let Some(region) = &options.region {
        let before = valid.len();
        valid.retain(|t| &t.region == region);
        filtered_by_region = before - valid.len();
        log::info!("Records after region filter ({}): {}", region, valid.len());
    }

    let mut filtered_by_amount = 0usize;
    if options.min_amount.is_some() || options.max_amount.is_some() {
        let before = valid.len();
        valid.retain(|t| {
            let amount = t.line_amount();
            options.min_amount.map_or(true, |min| amount >= min)
                && options.max_amount.map_or(true, |max| amount <= max)
        });
        filtered_by_amount = before - valid.len();
        log::info!("Records after amount filter: {}", valid.len());
    }

    let summary = FilterSummary {
        total_input,
        invalid,
        filtered_by_region,
        filtered_by_amount,
        final_count: valid.len(),
    };

    Ok((valid, invalid, summary))
}

// First failing check disqualifies the record; the checks short-circuit so a
// record is never counted twice.
fn is_structurally_valid(t: &Transaction) -> bool {
    t.transaction_id.starts_with('T')
        && t.product_id.starts_with('P')
        && t.customer_id.starts_with('C')
        && !t.region.is_empty()
        && t.quantity > 0
        && t.unit_price.is_positive()
}

// Diagnostics over the structurally valid set, before any optional filter.
fn report_observations(valid: &[Transaction]) {
    let regions: BTreeSet<&str> = valid.iter().map(|t| t.region.as_str()).collect();
    log::info!(
        "Available regions: {}",
        regions.into_iter().collect::<Vec<_>>().join(", ")
    );

    let amounts: Vec<Decimal> = valid.iter().map(Transaction::line_amount).collect();
    if let (Some(min), Some(max)) = (amounts.iter().min(), amounts.iter().max()) {
        log::info!("Transaction amount range: min={}, max={}", min, max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::Amount;
    use rust_decimal_macros::dec;

    fn tx(id: &str, product_id: &str, customer_id: &str, region: &str) -> Transaction {
        Transaction {
            transaction_id: id.into(),
            date: "2024-12-01".into(),
            product_id: product_id.into(),
            product_name: "Laptop".into(),
            quantity: 2,
            unit_price: dec!(100).into(),
            customer_id: customer_id.into(),
            region: region.into(),
        }
    }

    fn priced(quantity: i64, unit_price: Amount, region: &str) -> Transaction {
        Transaction {
            quantity,
            unit_price,
            ..tx("T001", "P101", "C001", region)
        }
    }

    #[test]
    fn test_valid_records_pass_through_unchanged() {
        let input = vec![tx("T001", "P101", "C001", "North")];
        let (valid, invalid, summary) =
            validate_and_filter(input.clone(), &FilterOptions::default()).unwrap();

        assert_eq!(valid, input);
        assert_eq!(invalid, 0);
        assert_eq!(summary.final_count, 1);
    }

    #[test]
    fn test_bad_prefixes_are_rejected() {
        let input = vec![
            tx("X001", "P101", "C001", "North"),
            tx("T002", "Q102", "C002", "North"),
            tx("T003", "P103", "K003", "North"),
        ];
        let (valid, invalid, _) =
            validate_and_filter(input, &FilterOptions::default()).unwrap();

        assert!(valid.is_empty());
        assert_eq!(invalid, 3);
    }

    #[test]
    fn test_non_positive_quantity_and_price_are_rejected() {
        let input = vec![
            priced(0, dec!(100).into(), "North"),
            priced(-3, dec!(100).into(), "North"),
            priced(2, dec!(0).into(), "North"),
            priced(2, dec!(-1).into(), "North"),
        ];
        let (valid, invalid, _) =
            validate_and_filter(input, &FilterOptions::default()).unwrap();

        assert!(valid.is_empty());
        assert_eq!(invalid, 4);
    }

    #[test]
    fn test_empty_region_is_rejected() {
        let input = vec![tx("T001", "P101", "C001", "")];
        let (_, invalid, _) = validate_and_filter(input, &FilterOptions::default()).unwrap();
        assert_eq!(invalid, 1);
    }

    #[test]
    fn test_a_record_failing_several_checks_is_counted_once() {
        let input = vec![priced(0, dec!(-1).into(), "")];
        let (valid, invalid, summary) =
            validate_and_filter(input, &FilterOptions::default()).unwrap();

        assert!(valid.is_empty());
        assert_eq!(invalid, 1);
        assert_eq!(summary.total_input, 1);
    }

    #[test]
    fn test_invalid_plus_valid_equals_input() {
        let input = vec![
            tx("T001", "P101", "C001", "North"),
            priced(0, dec!(100).into(), "South"),
            tx("T003", "P103", "C003", "East"),
        ];
        let total = input.len();
        let (valid, invalid, _) = validate_and_filter(input, &FilterOptions::default()).unwrap();

        assert_eq!(invalid + valid.len(), total);
    }

    #[test]
    fn test_region_filter_is_exact_match() {
        let input = vec![
            tx("T001", "P101", "C001", "North"),
            tx("T002", "P102", "C002", "South"),
            tx("T003", "P103", "C003", "NorthEast"),
        ];
        let options = FilterOptions {
            region: Some("North".into()),
            ..Default::default()
        };
        let (valid, _, summary) = validate_and_filter(input, &options).unwrap();

        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].region, "North");
        assert_eq!(summary.filtered_by_region, 2);
        assert_eq!(summary.filtered_by_amount, 0);
    }

    #[test]
    fn test_amount_filter_bounds_are_independently_optional() {
        // line amounts: 200, 1000, 5000
        let input = vec![
            priced(2, dec!(100).into(), "North"),
            priced(10, dec!(100).into(), "North"),
            priced(50, dec!(100).into(), "North"),
        ];

        let min_only = FilterOptions {
            min_amount: Some(dec!(500)),
            ..Default::default()
        };
        let (valid, _, summary) = validate_and_filter(input.clone(), &min_only).unwrap();
        assert_eq!(valid.len(), 2);
        assert_eq!(summary.filtered_by_amount, 1);

        let max_only = FilterOptions {
            max_amount: Some(dec!(1000)),
            ..Default::default()
        };
        let (valid, _, summary) = validate_and_filter(input.clone(), &max_only).unwrap();
        assert_eq!(valid.len(), 2);
        assert_eq!(summary.filtered_by_amount, 1);

        let both = FilterOptions {
            min_amount: Some(dec!(200)),
            max_amount: Some(dec!(1000)),
            ..Default::default()
        };
        let (valid, _, _) = validate_and_filter(input, &both).unwrap();
        assert_eq!(valid.len(), 2);
    }

    #[test]
    fn test_amount_bounds_are_inclusive() {
        let input = vec![priced(2, dec!(100).into(), "North")];
        let options = FilterOptions {
            min_amount: Some(dec!(200)),
            max_amount: Some(dec!(200)),
            ..Default::default()
        };
        let (valid, _, _) = validate_and_filter(input, &options).unwrap();
        assert_eq!(valid.len(), 1);
    }

    #[test]
    fn test_summary_counts_reconcile_with_both_filters_active() {
        let input = vec![
            tx("T001", "P101", "C001", "North"),            // kept
            priced(0, dec!(100).into(), "North"),           // invalid
            tx("T003", "P103", "C003", "South"),            // region-filtered
            priced(1000, dec!(100).into(), "North"),        // amount-filtered
        ];
        let options = FilterOptions {
            region: Some("North".into()),
            min_amount: Some(dec!(100)),
            max_amount: Some(dec!(1000)),
        };
        let (valid, _, summary) = validate_and_filter(input, &options).unwrap();

        assert_eq!(summary.total_input, 4);
        assert_eq!(summary.invalid, 1);
        assert_eq!(summary.filtered_by_region, 1);
        assert_eq!(summary.filtered_by_amount, 1);
        assert_eq!(summary.final_count, valid.len());
        assert_eq!(
            summary.total_input,
            summary.invalid
                + summary.filtered_by_region
                + summary.filtered_by_amount
                + summary.final_count
        );
    }

    #[test]
    fn test_inverted_amount_range_is_a_hard_error() {
        let options = FilterOptions {
            min_amount: Some(dec!(1000)),
            max_amount: Some(dec!(10)),
            ..Default::default()
        };
        assert!(matches!(
            validate_and_filter(vec![], &options),
            Err(Errors::InvalidAmountRange(_, _))
        ));
    }

    #[test]
    fn test_empty_input_produces_empty_summary() {
        let (valid, invalid, summary) =
            validate_and_filter(vec![], &FilterOptions::default()).unwrap();

        assert!(valid.is_empty());
        assert_eq!(invalid, 0);
        assert_eq!(summary, FilterSummary::default());
    }
}
