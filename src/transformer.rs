// 🏷️ Transformation Rules - Rules as Data
// Ordered business rules folded over each product

use crate::product::{round2, PriceRange, Product};
use rust_decimal::Decimal;
use tracing::debug;

/// Header of the transformed catalog
pub const OUTPUT_HEADER: [&str; 5] = ["ProductID", "Name", "Price", "Category", "PriceRange"];

pub const ELECTRONICS: &str = "Electronics";
pub const PREMIUM_ELECTRONICS: &str = "Premium Electronics";

// ============================================================================
// RULE DEFINITION
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct TransformRule {
    /// Rule name for logging
    pub name: &'static str,

    /// Pure step: takes the product, returns the updated product
    pub apply: fn(Product) -> Product,
}

fn is_electronics(category: &str) -> bool {
    category.eq_ignore_ascii_case(ELECTRONICS)
}

/// Rule 1: upper-case the product name
pub fn normalize_name(mut product: Product) -> Product {
    product.name = product.name.to_uppercase();
    product
}

/// Rule 2: 10% off Electronics, rounded half-up to cents
pub fn apply_category_discount(mut product: Product) -> Product {
    if is_electronics(&product.category) {
        product.price = round2(product.price * Decimal::new(9, 1));
    }
    product
}

/// Rule 3: discounted Electronics above 500.00 become Premium Electronics
pub fn recategorize_premium(mut product: Product) -> Product {
    if is_electronics(&product.category) && product.price > Decimal::new(500, 0) {
        product.category = PREMIUM_ELECTRONICS.to_string();
    }
    product
}

/// Rule 4: bucket the final price
pub fn assign_price_range(mut product: Product) -> Product {
    product.price_range = Some(PriceRange::for_price(product.price));
    product
}

// ============================================================================
// TRANSFORMER
// ============================================================================

pub struct ProductTransformer {
    rules: Vec<TransformRule>,
}

impl ProductTransformer {
    /// The four catalog rules. Order matters: the discount feeds both the
    /// recategorization and the bucket.
    pub fn standard() -> Self {
        ProductTransformer::from_rules(vec![
            TransformRule {
                name: "normalize_name",
                apply: normalize_name,
            },
            TransformRule {
                name: "category_discount",
                apply: apply_category_discount,
            },
            TransformRule {
                name: "recategorize_premium",
                apply: recategorize_premium,
            },
            TransformRule {
                name: "price_range",
                apply: assign_price_range,
            },
        ])
    }

    /// Rules run in the given order
    pub fn from_rules(rules: Vec<TransformRule>) -> Self {
        ProductTransformer { rules }
    }

    /// Run every rule over one product
    pub fn apply(&self, product: Product) -> Product {
        self.rules.iter().fold(product, |product, rule| {
            let next = (rule.apply)(product);
            debug!(rule = rule.name, id = next.id, "applied rule");
            next
        })
    }

    /// Transform all products, preserving order. Never drops a product.
    pub fn transform_all(&self, products: Vec<Product>) -> Vec<Product> {
        products.into_iter().map(|p| self.apply(p)).collect()
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name).collect()
    }
}

impl Default for ProductTransformer {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn product(id: i32, name: &str, price: &str, category: &str) -> Product {
        Product::new(id, name, Decimal::from_str(price).unwrap(), category)
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_standard_rule_order() {
        let transformer = ProductTransformer::standard();
        assert_eq!(
            transformer.rule_names(),
            vec![
                "normalize_name",
                "category_discount",
                "recategorize_premium",
                "price_range"
            ]
        );
    }

    #[test]
    fn test_name_is_upper_cased() {
        let out = normalize_name(product(1, "MiXeD case Widget", "1", "Tools"));
        assert_eq!(out.name, "MIXED CASE WIDGET");
    }

    #[test]
    fn test_discount_only_for_electronics() {
        let tools = apply_category_discount(product(1, "saw", "100.00", "Tools"));
        assert_eq!(tools.price, dec("100.00"));

        let phone = apply_category_discount(product(2, "phone", "100.00", "electronics"));
        assert_eq!(phone.price, dec("90.00"));
    }

    #[test]
    fn test_discount_rounds_half_up() {
        let out = apply_category_discount(product(1, "cable", "19.995", "Electronics"));
        assert_eq!(out.price, dec("18.00"));
        assert_eq!(out.price.to_string(), "18.00");
    }

    #[test]
    fn test_recategorization_uses_discounted_price() {
        let transformer = ProductTransformer::standard();

        let edge = transformer.apply(product(1, "tv", "555.56", "Electronics"));
        assert_eq!(edge.price, dec("500.00"));
        assert_eq!(edge.category, "Electronics");
        assert_eq!(edge.price_range, Some(PriceRange::High));

        let premium = transformer.apply(product(2, "phone", "600.00", "Electronics"));
        assert_eq!(premium.price, dec("540.00"));
        assert_eq!(premium.category, PREMIUM_ELECTRONICS);
        assert_eq!(premium.price_range, Some(PriceRange::Premium));
    }

    #[test]
    fn test_non_electronics_never_recategorized() {
        let out = recategorize_premium(product(1, "sofa", "900.00", "Furniture"));
        assert_eq!(out.category, "Furniture");
    }

    #[test]
    fn test_bucket_boundaries_for_non_electronics() {
        let transformer = ProductTransformer::standard();
        let cases = [
            ("10.00", PriceRange::Low),
            ("10.01", PriceRange::Medium),
            ("500.00", PriceRange::High),
            ("500.01", PriceRange::Premium),
        ];

        for (price, expected) in cases {
            let out = transformer.apply(product(1, "item", price, "Tools"));
            assert_eq!(out.price_range, Some(expected), "price {}", price);
        }
    }

    #[test]
    fn test_bucket_uses_unrounded_price() {
        // Bucketed above 10.00, rendered as 10.00
        let out = ProductTransformer::standard().apply(product(5, "edge", "10.004", "Tools"));
        assert_eq!(out.price_range, Some(PriceRange::Medium));
        assert_eq!(out.formatted_price(), "10.00");
    }

    #[test]
    fn test_transform_all_keeps_every_product_in_order() {
        let transformer = ProductTransformer::standard();
        let out = transformer.transform_all(vec![
            product(1, "widget", "9.99", "Tools"),
            product(2, "phone", "600.00", "Electronics"),
            product(1, "widget", "9.99", "Tools"),
        ]);

        assert_eq!(out.len(), 3);
        assert_eq!(out[0].name, "WIDGET");
        assert_eq!(out[0].price_range, Some(PriceRange::Low));
        assert_eq!(out[1].name, "PHONE");
        assert_eq!(out[1].category, PREMIUM_ELECTRONICS);
        assert_eq!(out[2].id, 1);
        assert!(out.iter().all(|p| p.price_range.is_some()));
    }

    #[test]
    fn test_custom_rule_chain() {
        // Bucketing before the discount sees the original price
        let transformer = ProductTransformer::from_rules(vec![
            TransformRule {
                name: "price_range",
                apply: assign_price_range,
            },
            TransformRule {
                name: "category_discount",
                apply: apply_category_discount,
            },
        ]);

        let out = transformer.apply(product(1, "tv", "555.56", "Electronics"));
        assert_eq!(out.price, dec("500.00"));
        assert_eq!(out.price_range, Some(PriceRange::Premium));
    }
}
