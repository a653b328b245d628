//! Remote data sources for the Lantern storefront.
//!
//! Everything that leaves the process goes through [`FetchClient`]:
//!
//! - the catalog document ([`load_catalog`])
//! - the province/ward directory ([`RegionDirectory`], [`RegionSelector`])
//! - order submission to the hosted form ([`FormIntake`])
//!
//! Lookups that feed the page degrade to empty results and log the cause;
//! only order submission reports failure to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use lantern_data::{load_catalog, CatalogSource, FetchClient, RegionDirectory};
//!
//! let client = FetchClient::new();
//! let catalog = load_catalog(&client, &CatalogSource::parse("data.json")).await;
//!
//! let regions = RegionDirectory::new(&client, lantern_data::DEFAULT_REGIONS_URL);
//! let provinces = regions.provinces().await;
//! ```

mod catalog;
mod client;
mod error;
mod intake;
mod regions;

#[cfg(test)]
mod test_support;

pub use catalog::{load_catalog, try_load_catalog, CatalogSource};
pub use client::FetchClient;
pub use error::FetchError;
pub use intake::{FormIntake, IntakeConfig, IntakeFields, DEFAULT_INTAKE_URL};
pub use regions::{RegionDirectory, RegionSelector, WardTicket, DEFAULT_REGIONS_URL};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        load_catalog, CatalogSource, FetchClient, FetchError, FormIntake, IntakeConfig,
        RegionDirectory, RegionSelector,
    };
}
