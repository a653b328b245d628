//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use lantern_cache::FileStore;
use lantern_commerce::cart::CartStore;
use lantern_data::{CatalogSource, FetchClient, FormIntake, RegionDirectory};

use crate::config::{ShopConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Storefront configuration.
    pub config: ShopConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// File the config was read from, if any.
    pub config_path: Option<PathBuf>,
    client: FetchClient,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (ShopConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((path, config)) => (config, Some(path)),
                None => (ShopConfig::default(), None),
            }
        };

        if let Some(path) = &config_path {
            tracing::debug!(path = %path.display(), "loaded config");
        }

        Ok(Self {
            config,
            output,
            cwd,
            config_path,
            client: FetchClient::new(),
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(PathBuf, ShopConfig)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = ShopConfig::load(config_path.to_str()?) {
                        return Some((config_path, config));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Get the directory the cart is stored in.
    pub fn data_dir(&self) -> PathBuf {
        match &self.config.storage.data_dir {
            Some(dir) => self.resolve_path(&expand_home(dir)),
            None => dirs_path().join("lantern"),
        }
    }

    /// Open the persisted cart.
    pub fn open_cart(&self) -> Result<CartStore<FileStore>> {
        let dir = self.data_dir();
        let store = FileStore::open(dir.clone())
            .with_context(|| format!("Failed to open cart storage: {}", dir.display()))?;
        Ok(CartStore::open_with_key(store, self.config.storage.cart_key.clone()))
    }

    /// Shared HTTP client.
    pub fn client(&self) -> &FetchClient {
        &self.client
    }

    /// Where the catalog is read from. Relative paths resolve against the
    /// working directory.
    pub fn catalog_source(&self) -> CatalogSource {
        match CatalogSource::parse(&self.config.catalog.source) {
            CatalogSource::Path(path) => CatalogSource::Path(self.cwd.join(path)),
            url => url,
        }
    }

    /// Region directory client.
    pub fn region_directory(&self) -> RegionDirectory {
        RegionDirectory::new(&self.client, self.config.regions.base_url.clone())
    }

    /// Order intake client.
    pub fn intake(&self) -> FormIntake {
        FormIntake::new(self.client.clone(), self.config.intake.clone())
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

/// Get the platform-specific data directory.
fn dirs_path() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        PathBuf::from("/tmp")
    }
}

fn expand_home(path: &str) -> String {
    match (path.strip_prefix("~/"), std::env::var_os("HOME")) {
        (Some(rest), Some(home)) => PathBuf::from(home).join(rest).to_string_lossy().into_owned(),
        _ => path.to_string(),
    }
}
