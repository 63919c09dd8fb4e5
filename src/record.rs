use crate::amount::Amount;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

/// One sale event, parsed from a pipe-delimited row in field order:
/// TransactionID|Date|ProductID|ProductName|Quantity|UnitPrice|CustomerID|Region
///
/// Built once per input line and immutable afterwards. Numeric fields carry
/// whatever the lenient coercion produced; structural validation decides
/// whether the record is usable.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Transaction {
    pub transaction_id: String,
    pub date: String,
    pub product_id: String,
    #[serde(deserialize_with = "strip_commas")]
    pub product_name: String,
    #[serde(deserialize_with = "lenient_quantity")]
    pub quantity: i64,
    #[serde(deserialize_with = "lenient_amount")]
    pub unit_price: Amount,
    pub customer_id: String,
    pub region: String,
}

impl Transaction {
    /// Line total, always recomputed from quantity and unit price.
    pub fn line_amount(&self) -> Decimal {
        Decimal::from(self.quantity) * *self.unit_price
    }
}

// Commas inside the product name are a formatting artifact of the source
// delimiter scheme, not content.
fn strip_commas<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.replace(',', ""))
}

fn lenient_quantity<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.replace(',', "").trim().parse::<i64>().unwrap_or(0))
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<Amount, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(Amount::lenient(&s))
}
