//! CLI configuration.

use anyhow::{Context, Result};
use lantern_commerce::cart::CART_STORAGE_KEY;
use lantern_data::{IntakeConfig, DEFAULT_REGIONS_URL};
use serde::{Deserialize, Serialize};

/// Config file names searched for, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["lantern.toml", ".lantern.toml", "lantern.json"];

/// Storefront configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Catalog configuration.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Cart storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Region directory configuration.
    #[serde(default)]
    pub regions: RegionsConfig,

    /// Order intake configuration.
    #[serde(default)]
    pub intake: IntakeConfig,

    /// Payment reference shown for transfer and QR orders.
    #[serde(default)]
    pub payment: PaymentConfig,
}

impl ShopConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }
}

/// Catalog source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// URL or file path of the catalog JSON array.
    #[serde(default = "default_catalog_source")]
    pub source: String,
}

fn default_catalog_source() -> String {
    "data.json".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: default_catalog_source(),
        }
    }
}

/// Where the cart is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for the file store (default: ~/.local/share/lantern).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,

    /// Key the cart snapshot is stored under.
    #[serde(default = "default_cart_key")]
    pub cart_key: String,
}

fn default_cart_key() -> String {
    CART_STORAGE_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            cart_key: default_cart_key(),
        }
    }
}

/// Region directory endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionsConfig {
    #[serde(default = "default_regions_url")]
    pub base_url: String,
}

fn default_regions_url() -> String {
    DEFAULT_REGIONS_URL.to_string()
}

impl Default for RegionsConfig {
    fn default() -> Self {
        Self {
            base_url: default_regions_url(),
        }
    }
}

/// Payment reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentConfig {
    /// Account details or QR link shown before a transfer/QR order is sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// Generate a default lantern.toml config file.
pub fn generate_default_config(catalog_source: &str) -> String {
    let fields = lantern_data::IntakeFields::default();
    format!(
        r#"# Lantern storefront configuration

[catalog]
source = "{catalog_source}"

[storage]
# data_dir = "~/.local/share/lantern"
cart_key = "{cart_key}"

[regions]
base_url = "{regions}"

[intake]
url = "{intake_url}"

[intake.fields]
name = "{name}"
phone = "{phone}"
address = "{address}"
payment = "{payment}"
products = "{products}"
total = "{total}"
note = "{note}"

[payment]
# reference = "Vietcombank 0123456789 - CONG TY LANTERN"
"#,
        catalog_source = catalog_source,
        cart_key = CART_STORAGE_KEY,
        regions = DEFAULT_REGIONS_URL,
        intake_url = lantern_data::DEFAULT_INTAKE_URL,
        name = fields.name,
        phone = fields.phone,
        address = fields.address,
        payment = fields.payment,
        products = fields.products,
        total = fields.total,
        note = fields.note,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: ShopConfig = toml::from_str(&generate_default_config("data.json")).unwrap();
        assert_eq!(config, ShopConfig::default());
    }

    #[test]
    fn test_partial_config() {
        let config: ShopConfig = toml::from_str(
            r#"
            [catalog]
            source = "https://shop.example/data.json"

            [intake.fields]
            note = "entry.1"
            "#,
        )
        .unwrap();
        assert_eq!(config.catalog.source, "https://shop.example/data.json");
        assert_eq!(config.storage.cart_key, "cartItems");
        assert_eq!(config.intake.fields.note, "entry.1");
        assert_eq!(config.intake.fields.total, "entry.1124475657");
        assert_eq!(config.regions.base_url, DEFAULT_REGIONS_URL);
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lantern.json");
        let path = path.to_str().unwrap();

        let mut config = ShopConfig::default();
        config.payment.reference = Some("ACB 123".into());
        config.storage.data_dir = Some("/var/lib/lantern".into());
        config.save(path).unwrap();

        assert_eq!(ShopConfig::load(path).unwrap(), config);
    }

    #[test]
    fn test_save_and_load_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lantern.toml");
        let path = path.to_str().unwrap();

        let mut config = ShopConfig::default();
        config.catalog.source = "public/data.json".into();
        config.save(path).unwrap();

        assert_eq!(ShopConfig::load(path).unwrap(), config);
    }
}
