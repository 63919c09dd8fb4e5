use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use std::ops::Deref;
use std::str::FromStr;

#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Amount(pub Decimal);

// just to ease usage of Amount across other components
impl Deref for Amount {
    type Target = Decimal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Decimal> for Amount {
    fn from(d: Decimal) -> Self {
        Amount(d)
    }
}

impl Amount {
    /// Parses a monetary field from raw input, removing embedded
    /// thousands-separator commas first. Empty or unparsable input coerces
    /// to zero; the positivity check during validation rejects that default.
    pub fn lenient(raw: &str) -> Self {
        let cleaned = raw.replace(',', "");
        Amount(Decimal::from_str(cleaned.trim()).unwrap_or(Decimal::ZERO))
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_lenient_parse_strips_thousands_separators() {
        assert_eq!(Amount::lenient("45,000"), Amount(dec!(45000)));
        assert_eq!(Amount::lenient("1,234.56"), Amount(dec!(1234.56)));
    }

    #[test]
    fn test_lenient_parse_defaults_to_zero() {
        assert_eq!(Amount::lenient(""), Amount(Decimal::ZERO));
        assert_eq!(Amount::lenient("abc"), Amount(Decimal::ZERO));
        assert!(!Amount::lenient("junk").is_positive());
    }

    #[test]
    fn test_is_positive() {
        assert!(Amount::lenient("0.01").is_positive());
        assert!(!Amount::lenient("0").is_positive());
        assert!(!Amount::lenient("-5").is_positive());
    }
}
