//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: Option<CatalogCommand>,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List all products.
    List,
    /// Show one product.
    Show {
        /// Product code.
        id: String,
    },
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart and its totals.
    Show,
    /// Add one unit of a catalog product.
    Add {
        /// Product code.
        id: String,
    },
    /// Remove one or more lines.
    Remove {
        /// Product codes.
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Set a line's quantity. Values below 1 remove the line.
    Update {
        /// Product code.
        id: String,
        /// New quantity.
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Product codes to check out (default: every cart line).
    #[arg(short, long = "item")]
    pub items: Vec<String>,

    /// Receiver's full name.
    #[arg(long)]
    pub name: Option<String>,

    /// Receiver's phone number.
    #[arg(long)]
    pub phone: Option<String>,

    /// House number and street.
    #[arg(long)]
    pub address: Option<String>,

    /// Province code.
    #[arg(long)]
    pub province: Option<u32>,

    /// Ward code.
    #[arg(long)]
    pub ward: Option<u32>,

    /// Note for the courier.
    #[arg(long)]
    pub note: Option<String>,

    /// Payment method: cod, transfer or qr.
    #[arg(short, long)]
    pub payment: Option<String>,

    /// Do not prompt; fail on missing fields and treat payment as made.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
