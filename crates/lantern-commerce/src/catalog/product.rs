//! Product records as they appear in the catalog export.

use crate::ids::ProductCode;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Shown instead of a product name when the cell is empty.
pub const UNNAMED_PRODUCT: &str = "Sản phẩm mới";

/// Shown when an image cannot be resolved at all.
pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/150?text=No+Image";

/// A price cell: a number, or free text such as "Liên hệ".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    /// Numeric price in đồng, kept as the exact JSON number.
    Amount(serde_json::Number),
    /// Anything else the sheet contained.
    Text(String),
}

impl PriceValue {
    /// Numeric price from a whole đồng amount.
    pub fn amount(value: i64) -> Self {
        PriceValue::Amount(value.into())
    }

    /// Free-text price cell.
    pub fn text(value: impl Into<String>) -> Self {
        PriceValue::Text(value.into())
    }

    /// The price as money, if the cell is numeric.
    pub fn money(&self) -> Option<Money> {
        match self {
            PriceValue::Amount(n) => {
                let amount = match n.as_i64() {
                    Some(whole) => Money::vnd(whole),
                    None => Money::from_decimal(n.as_f64()?, Currency::VND),
                };
                Some(amount)
            }
            PriceValue::Text(_) => None,
        }
    }
}

/// One row of the catalog.
///
/// Columns other than the ones the storefront reads are kept in `extra` so
/// that a record written back to storage carries everything it was loaded
/// with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product code. Blank when the cell is missing or empty.
    #[serde(rename = "MÃ SP", default)]
    pub id: ProductCode,
    /// Display name.
    #[serde(rename = "TÊN SẢN PHẨM", default)]
    pub name: String,
    /// List price before discount.
    #[serde(rename = "GIÁ NIÊM YẾT", default, skip_serializing_if = "Option::is_none")]
    pub list_price: Option<PriceValue>,
    /// Selling price after discount.
    #[serde(rename = "Giá sau chiết khấu", default, skip_serializing_if = "Option::is_none")]
    pub discounted_price: Option<PriceValue>,
    /// Image URL or path.
    #[serde(rename = "ảnh", default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    /// Unread columns.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ProductRecord {
    /// Create a record with a name and selling price.
    pub fn new(id: impl Into<ProductCode>, name: impl Into<String>, price: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            list_price: None,
            discounted_price: Some(PriceValue::amount(price)),
            image_ref: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Set the list price.
    pub fn with_list_price(mut self, price: i64) -> Self {
        self.list_price = Some(PriceValue::amount(price));
        self
    }

    /// Set the image reference.
    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }

    /// Selling price, if numeric.
    pub fn price(&self) -> Option<Money> {
        self.discounted_price.as_ref().and_then(PriceValue::money)
    }

    /// List price, if numeric.
    pub fn list_price_money(&self) -> Option<Money> {
        self.list_price.as_ref().and_then(PriceValue::money)
    }

    /// Name for display.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            UNNAMED_PRODUCT
        } else {
            &self.name
        }
    }

    /// Resolve the image to show: the explicit reference, else the
    /// conventional `/products/<code>.jpg`, else the placeholder.
    pub fn image_src(&self) -> String {
        match self.image_ref.as_deref().map(str::trim) {
            Some(src) if !src.is_empty() => src.to_string(),
            _ if !self.id.is_empty() => format!("/products/{}.jpg", self.id),
            _ => PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: &str = r#"{
        "STT": 3,
        "MÃ SP": "JW-03",
        "TÊN SẢN PHẨM": "Hộp quà Tết",
        "GIÁ NIÊM YẾT": 1200000,
        "Giá sau chiết khấu": 990000,
        "ảnh": "/img/jw-03.png"
    }"#;

    #[test]
    fn test_parse_catalog_row() {
        let product: ProductRecord = serde_json::from_str(ROW).unwrap();
        assert_eq!(product.id, "JW-03");
        assert_eq!(product.display_name(), "Hộp quà Tết");
        assert_eq!(product.price(), Some(Money::vnd(990_000)));
        assert_eq!(product.list_price_money(), Some(Money::vnd(1_200_000)));
        assert_eq!(product.extra.get("STT"), Some(&serde_json::json!(3)));
    }

    #[test]
    fn test_roundtrip_keeps_unread_columns() {
        let product: ProductRecord = serde_json::from_str(ROW).unwrap();
        let json = serde_json::to_value(&product).unwrap();
        let original: serde_json::Value = serde_json::from_str(ROW).unwrap();
        assert_eq!(json, original);
    }

    #[test]
    fn test_text_and_missing_prices() {
        let product: ProductRecord =
            serde_json::from_str(r#"{"MÃ SP": 17, "Giá sau chiết khấu": "Liên hệ"}"#).unwrap();
        assert_eq!(product.id, "17");
        assert_eq!(product.price(), None);
        assert_eq!(product.list_price, None);
        assert_eq!(product.display_name(), UNNAMED_PRODUCT);
    }

    #[test]
    fn test_missing_or_null_code() {
        let missing: ProductRecord =
            serde_json::from_str(r#"{"TÊN SẢN PHẨM": "Hộp quà", "Giá sau chiết khấu": 50000}"#)
                .unwrap();
        assert!(missing.id.is_empty());
        assert_eq!(missing.display_name(), "Hộp quà");
        assert_eq!(missing.image_src(), PLACEHOLDER_IMAGE);

        let null: ProductRecord =
            serde_json::from_str(r#"{"MÃ SP": null, "TÊN SẢN PHẨM": "Hộp quà"}"#).unwrap();
        assert!(null.id.is_empty());
    }

    #[test]
    fn test_fractional_price_rounds() {
        let price: PriceValue = serde_json::from_str("149999.6").unwrap();
        assert_eq!(price.money(), Some(Money::vnd(150_000)));
    }

    #[test]
    fn test_image_src_fallbacks() {
        let with_image = ProductRecord::new("A1", "A", 1).with_image("https://cdn/a.jpg");
        assert_eq!(with_image.image_src(), "https://cdn/a.jpg");

        let by_code = ProductRecord::new("A1", "A", 1);
        assert_eq!(by_code.image_src(), "/products/A1.jpg");

        let nothing = ProductRecord::new("", "A", 1);
        assert_eq!(nothing.image_src(), PLACEHOLDER_IMAGE);
    }
}
