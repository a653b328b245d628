//! Catalog browsing.

use anyhow::Result;
use lantern_commerce::cart::{format_currency, has_discount};
use lantern_commerce::catalog::{Catalog, ProductRecord};
use lantern_commerce::CommerceError;
use lantern_data::load_catalog;

use super::{CatalogArgs, CatalogCommand};
use crate::context::Context;
use crate::output::{pad_columns, price_tag};

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    let catalog = fetch(ctx).await;

    match args.command.unwrap_or(CatalogCommand::List) {
        CatalogCommand::List => list_products(&catalog, ctx),
        CatalogCommand::Show { id } => show_product(&catalog, &id, ctx),
    }
}

/// Load the catalog behind a spinner.
pub async fn fetch(ctx: &Context) -> Catalog {
    let source = ctx.catalog_source();
    let spinner = ctx.output.spinner("Đang tải sản phẩm...");
    let catalog = load_catalog(ctx.client(), &source).await;
    spinner.finish_and_clear();
    ctx.output.debug(&format!("{} products from {}", catalog.len(), source));
    catalog
}

fn list_products(catalog: &Catalog, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(catalog);
        return Ok(());
    }

    ctx.output.header("Sản phẩm");
    if catalog.is_empty() {
        ctx.output.warn("Chưa có sản phẩm nào");
        return Ok(());
    }

    let code_width = catalog
        .products()
        .iter()
        .map(|p| console::measure_text_width(p.id.as_str()))
        .max()
        .unwrap_or(0)
        .max(4);
    let name_width = catalog
        .products()
        .iter()
        .map(|p| console::measure_text_width(p.display_name()))
        .max()
        .unwrap_or(0);

    for product in catalog.products() {
        let columns = pad_columns(
            &[product.id.as_str(), product.display_name()],
            &[code_width, name_width],
        );
        println!("  {}  {}", columns, product_price(product));
    }

    Ok(())
}

fn show_product(catalog: &Catalog, id: &str, ctx: &Context) -> Result<()> {
    let product = catalog
        .find(id)
        .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))?;

    if ctx.output.is_json() {
        ctx.output.json(product);
        return Ok(());
    }

    ctx.output.header(product.display_name());
    ctx.output.kv("Mã", product.id.as_str());
    ctx.output.kv("Giá", &product_price(product));
    ctx.output.kv("Ảnh", &product.image_src());
    for (key, value) in &product.extra {
        let value = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        ctx.output.kv(key, &value);
    }

    Ok(())
}

/// Selling price, with the list price struck through when discounted.
pub fn product_price(product: &ProductRecord) -> String {
    let selling = format_currency(product.discounted_price.as_ref());
    let list = has_discount(product).then(|| format_currency(product.list_price.as_ref()));
    price_tag(&selling, list.as_deref())
}
