// 📦 Product Record
// One catalog row plus the fields derived during transformation

use crate::error::RowError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of columns in an input data row: id, name, price, category
pub const INPUT_COLUMNS: usize = 4;

// ============================================================================
// PRICE RANGE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceRange {
    Low,
    Medium,
    High,
    Premium,
}

impl PriceRange {
    /// Bucket a final price. Upper bounds are inclusive.
    pub fn for_price(price: Decimal) -> Self {
        if price <= Decimal::new(10, 0) {
            PriceRange::Low
        } else if price <= Decimal::new(100, 0) {
            PriceRange::Medium
        } else if price <= Decimal::new(500, 0) {
            PriceRange::High
        } else {
            PriceRange::Premium
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceRange::Low => "Low",
            PriceRange::Medium => "Medium",
            PriceRange::High => "High",
            PriceRange::Premium => "Premium",
        }
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// PRODUCT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier, 32-bit (duplicates allowed)
    pub id: i32,

    pub name: String,

    /// Exact decimal price, as read or after discount
    pub price: Decimal,

    pub category: String,

    /// Derived bucket; None until the transformer has run
    pub price_range: Option<PriceRange>,
}

impl Product {
    pub fn new(id: i32, name: impl Into<String>, price: Decimal, category: impl Into<String>) -> Self {
        Product {
            id,
            name: name.into(),
            price,
            category: category.into(),
            price_range: None,
        }
    }

    /// Parse the four fields of a data row. Fields are trimmed here.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self, RowError> {
        if fields.len() != INPUT_COLUMNS {
            return Err(RowError::FieldCount {
                expected: INPUT_COLUMNS,
                found: fields.len(),
            });
        }

        let id_text = fields[0].as_ref().trim();
        let name = fields[1].as_ref().trim();
        let price_text = fields[2].as_ref().trim();
        let category = fields[3].as_ref().trim();

        let id = id_text
            .parse::<i32>()
            .map_err(|_| RowError::InvalidId(id_text.to_string()))?;
        let price = Decimal::from_str(price_text)
            .map_err(|_| RowError::InvalidPrice(price_text.to_string()))?;

        if name.is_empty() {
            return Err(RowError::EmptyField("name"));
        }
        if category.is_empty() {
            return Err(RowError::EmptyField("category"));
        }

        Ok(Product::new(id, name, price, category))
    }

    /// Price rendered with exactly two fractional digits
    pub fn formatted_price(&self) -> String {
        format!("{:.2}", round2(self.price))
    }

    /// Output fields: id, name, price (2dp), category, price range
    pub fn to_record(&self) -> Option<[String; 5]> {
        let range = self.price_range?;
        Some([
            self.id.to_string(),
            self.name.clone(),
            self.formatted_price(),
            self.category.clone(),
            range.as_str().to_string(),
        ])
    }
}

/// Round to two decimal places, halves away from zero
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_from_fields_trims_and_parses() {
        let product = Product::from_fields(&[" 7 ", "  widget ", " 9.99", "Tools  "]).unwrap();

        assert_eq!(product.id, 7);
        assert_eq!(product.name, "widget");
        assert_eq!(product.price, dec("9.99"));
        assert_eq!(product.category, "Tools");
        assert_eq!(product.price_range, None);
    }

    #[test]
    fn test_from_fields_rejects_bad_values() {
        assert_eq!(
            Product::from_fields(&["abc", "Widget", "9.99", "Tools"]),
            Err(RowError::InvalidId("abc".to_string()))
        );
        assert_eq!(
            Product::from_fields(&["1", "Widget", "cheap", "Tools"]),
            Err(RowError::InvalidPrice("cheap".to_string()))
        );
        assert_eq!(
            Product::from_fields(&["1", "Widget", "9.99"]),
            Err(RowError::FieldCount {
                expected: 4,
                found: 3
            })
        );
        assert_eq!(
            Product::from_fields(&["1", "   ", "9.99", "Tools"]),
            Err(RowError::EmptyField("name"))
        );
    }

    #[test]
    fn test_id_outside_32_bit_range_is_invalid() {
        assert_eq!(
            Product::from_fields(&["3000000000", "Widget", "9.99", "Tools"]),
            Err(RowError::InvalidId("3000000000".to_string()))
        );
        let max = Product::from_fields(&["2147483647", "Widget", "9.99", "Tools"]).unwrap();
        assert_eq!(max.id, i32::MAX);
    }

    #[test]
    fn test_round2_is_half_up() {
        assert_eq!(round2(dec("17.9955")), dec("18.00"));
        assert_eq!(round2(dec("2.345")), dec("2.35"));
        assert_eq!(round2(dec("2.344")), dec("2.34"));
        assert_eq!(round2(dec("-2.345")), dec("-2.35"));
    }

    #[test]
    fn test_price_range_boundaries() {
        assert_eq!(PriceRange::for_price(dec("10.00")), PriceRange::Low);
        assert_eq!(PriceRange::for_price(dec("10.01")), PriceRange::Medium);
        assert_eq!(PriceRange::for_price(dec("100.00")), PriceRange::Medium);
        assert_eq!(PriceRange::for_price(dec("100.01")), PriceRange::High);
        assert_eq!(PriceRange::for_price(dec("500.00")), PriceRange::High);
        assert_eq!(PriceRange::for_price(dec("500.01")), PriceRange::Premium);
    }

    #[test]
    fn test_to_record_requires_price_range() {
        let mut product = Product::new(2, "PHONE", dec("540"), "Premium Electronics");
        assert!(product.to_record().is_none());

        product.price_range = Some(PriceRange::Premium);
        let record = product.to_record().unwrap();
        assert_eq!(
            record,
            ["2", "PHONE", "540.00", "Premium Electronics", "Premium"].map(String::from)
        );
    }
}
