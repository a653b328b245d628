//! Catalog module.
//!
//! The catalog is a read-only list of product records loaded once at start.

mod product;

pub use product::{PriceValue, ProductRecord, PLACEHOLDER_IMAGE, UNNAMED_PRODUCT};

use serde::{Deserialize, Deserializer, Serialize};

/// The loaded product list, in file order.
///
/// Rows are decoded one at a time; a row that does not fit
/// [`ProductRecord`] is logged and skipped rather than failing the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<ProductRecord>,
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<serde_json::Value>::deserialize(deserializer)?;
        let mut products = Vec::with_capacity(rows.len());
        for (index, row) in rows.into_iter().enumerate() {
            match ProductRecord::deserialize(row) {
                Ok(product) => products.push(product),
                Err(e) => tracing::warn!(row = index, error = %e, "Skipping catalog row"),
            }
        }
        Ok(Self { products })
    }
}

impl Catalog {
    /// Wrap a product list.
    pub fn new(products: Vec<ProductRecord>) -> Self {
        Self { products }
    }

    /// All products in display order.
    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    /// Look up a product by code.
    pub fn find(&self, id: &str) -> Option<&ProductRecord> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if nothing was loaded.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl From<Vec<ProductRecord>> for Catalog {
    fn from(products: Vec<ProductRecord>) -> Self {
        Self::new(products)
    }
}
