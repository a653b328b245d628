//! Configuration management commands.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use lantern_cache::validate_key;
use lantern_data::CatalogSource;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, ShopConfig, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Current Configuration");

    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output.kv("source", &ctx.config.catalog.source);

    ctx.output.info("");
    ctx.output.info("[storage]");
    ctx.output.kv("data_dir", &ctx.data_dir().display().to_string());
    ctx.output.kv("cart_key", &ctx.config.storage.cart_key);

    ctx.output.info("");
    ctx.output.info("[regions]");
    ctx.output.kv("base_url", &ctx.config.regions.base_url);

    ctx.output.info("");
    ctx.output.info("[intake]");
    ctx.output.kv("url", &ctx.config.intake.url);

    ctx.output.info("");
    ctx.output.info("[intake.fields]");
    let fields = &ctx.config.intake.fields;
    for (name, entry) in [
        ("name", &fields.name),
        ("phone", &fields.phone),
        ("address", &fields.address),
        ("payment", &fields.payment),
        ("products", &fields.products),
        ("total", &fields.total),
        ("note", &fields.note),
    ] {
        ctx.output.kv(name, entry);
    }

    if let Some(reference) = &ctx.config.payment.reference {
        ctx.output.info("");
        ctx.output.info("[payment]");
        ctx.output.kv("reference", reference);
    }

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value.unwrap_or_else(|| "null".to_string()));
    }

    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let config_path = match &ctx.config_path {
        Some(path) => path.clone(),
        None => find_config_file(&ctx.cwd)?,
    };
    let config_path = config_path.to_string_lossy().to_string();

    let mut config = ShopConfig::load(&config_path)?;
    set_config_value(&mut config, key, value)?;
    config.save(&config_path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    // Point at a catalog next to the config if there is one
    let source = ["data.json", "public/data.json"]
        .into_iter()
        .find(|candidate| ctx.cwd.join(candidate).exists())
        .unwrap_or("data.json");

    fs::write(&config_path, generate_default_config(source))?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check_config(&ctx.config, &ctx.cwd);

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

/// Errors and warnings for a config, in that order.
fn check_config(config: &ShopConfig, cwd: &Path) -> (Vec<String>, Vec<String>) {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if config.catalog.source.trim().is_empty() {
        errors.push("catalog.source is required".to_string());
    } else if let CatalogSource::Path(path) = CatalogSource::parse(&config.catalog.source) {
        if !cwd.join(&path).exists() {
            warnings.push(format!(
                "catalog.source '{}' does not exist; the catalog will be empty",
                path.display()
            ));
        }
    }

    if let Err(e) = validate_key(&config.storage.cart_key) {
        errors.push(format!("storage.cart_key: {}", e));
    }

    for (name, url) in [
        ("regions.base_url", &config.regions.base_url),
        ("intake.url", &config.intake.url),
    ] {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(format!("{} must be an http(s) URL", name));
        }
    }

    for field in config.intake.fields.blank() {
        errors.push(format!("intake.fields entry for {:?} is empty", field));
    }

    if config.payment.reference.is_none() {
        warnings.push(
            "payment.reference is not set; transfer and QR orders will show a generic message"
                .to_string(),
        );
    }

    (errors, warnings)
}

fn get_config_value(config: &ShopConfig, key: &str) -> Result<Option<String>> {
    let parts: Vec<&str> = key.split('.').collect();
    let fields = &config.intake.fields;

    let value = match parts.as_slice() {
        ["catalog", "source"] => Some(config.catalog.source.clone()),
        ["storage", "data_dir"] => config.storage.data_dir.clone(),
        ["storage", "cart_key"] => Some(config.storage.cart_key.clone()),
        ["regions", "base_url"] => Some(config.regions.base_url.clone()),
        ["intake", "url"] => Some(config.intake.url.clone()),
        ["intake", "fields", "name"] => Some(fields.name.clone()),
        ["intake", "fields", "phone"] => Some(fields.phone.clone()),
        ["intake", "fields", "address"] => Some(fields.address.clone()),
        ["intake", "fields", "payment"] => Some(fields.payment.clone()),
        ["intake", "fields", "products"] => Some(fields.products.clone()),
        ["intake", "fields", "total"] => Some(fields.total.clone()),
        ["intake", "fields", "note"] => Some(fields.note.clone()),
        ["payment", "reference"] => config.payment.reference.clone(),
        _ => bail!("Unknown config key: {}", key),
    };

    Ok(value)
}

fn set_config_value(config: &mut ShopConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let fields = &mut config.intake.fields;

    match parts.as_slice() {
        ["catalog", "source"] => config.catalog.source = value.to_string(),
        ["storage", "data_dir"] => config.storage.data_dir = Some(value.to_string()),
        ["storage", "cart_key"] => config.storage.cart_key = value.to_string(),
        ["regions", "base_url"] => config.regions.base_url = value.to_string(),
        ["intake", "url"] => config.intake.url = value.to_string(),
        ["intake", "fields", "name"] => fields.name = value.to_string(),
        ["intake", "fields", "phone"] => fields.phone = value.to_string(),
        ["intake", "fields", "address"] => fields.address = value.to_string(),
        ["intake", "fields", "payment"] => fields.payment = value.to_string(),
        ["intake", "fields", "products"] => fields.products = value.to_string(),
        ["intake", "fields", "total"] => fields.total = value.to_string(),
        ["intake", "fields", "note"] => fields.note = value.to_string(),
        ["payment", "reference"] => config.payment.reference = Some(value.to_string()),
        _ => bail!("Unknown or read-only config key: {}", key),
    }

    Ok(())
}

fn find_config_file(cwd: &Path) -> Result<PathBuf> {
    for name in &CONFIG_FILE_NAMES {
        let path = cwd.join(name);
        if path.exists() {
            return Ok(path);
        }
    }
    bail!("No config file found. Run `lantern config init` to create one.")
}
