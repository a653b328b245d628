//! Cart viewing and editing.

use anyhow::{Context as _, Result};
use dialoguer::Confirm;
use lantern_cache::FileStore;
use lantern_commerce::cart::{
    format_currency, line_total, CartLineItem, CartStore, OrderSelection, OrderTotals,
};
use lantern_commerce::CommerceError;
use serde_json::json;

use super::{CartArgs, CartCommand};
use crate::commands::catalog;
use crate::context::Context;
use crate::output::pad_columns;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_cart()?;

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {
            show_cart(store.cart_items(), ctx);
            Ok(())
        }
        CartCommand::Add { id } => add_item(&mut store, &id, ctx).await,
        CartCommand::Remove { ids } => remove_items(&mut store, &ids, ctx),
        CartCommand::Update { id, quantity } => update_item(&mut store, &id, quantity, ctx),
        CartCommand::Clear { yes } => clear_cart(&mut store, yes, ctx),
    }
}

/// Print cart lines and totals.
pub fn show_cart(items: &[CartLineItem], ctx: &Context) {
    let totals = OrderTotals::for_items(items);

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "items": items,
            "subtotal": totals.subtotal,
            "total": totals.total,
            "total_display": totals.total.display(),
        }));
        return;
    }

    ctx.output.header("Giỏ hàng");
    if items.is_empty() {
        ctx.output.info("Giỏ hàng trống");
        return;
    }

    let name_width = items
        .iter()
        .map(|i| console::measure_text_width(i.product.display_name()))
        .max()
        .unwrap_or(0);

    for item in items {
        let line = line_total(item)
            .map(|m| m.display())
            .unwrap_or_else(|| format_currency(item.product.discounted_price.as_ref()));
        let quantity = format!("x{}", item.quantity);
        println!(
            "  {}  {}",
            pad_columns(
                &[item.product.id.as_str(), item.product.display_name(), quantity.as_str()],
                &[6, name_width, 4],
            ),
            line
        );
    }

    println!();
    ctx.output.kv("Tạm tính", &totals.subtotal.display());
    let shipping = if totals.free_shipping() {
        "Miễn phí".to_string()
    } else {
        totals.shipping_fee.display()
    };
    ctx.output.kv("Phí vận chuyển", &shipping);
    ctx.output.kv("Tổng cộng", &totals.total.display());
}

async fn add_item(store: &mut CartStore<FileStore>, id: &str, ctx: &Context) -> Result<()> {
    let catalog = catalog::fetch(ctx).await;
    let product = catalog
        .find(id)
        .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
        .context("Cannot add to cart")?;

    store.add_to_cart(product);
    let quantity = store.cart().get(id).map(|i| i.quantity).unwrap_or(1);
    ctx.output.success(&format!("Đã thêm {} (x{})", product.display_name(), quantity));
    show_cart(store.cart_items(), ctx);
    Ok(())
}

fn remove_items(store: &mut CartStore<FileStore>, ids: &[String], ctx: &Context) -> Result<()> {
    let mut selection = OrderSelection::from_ids(ids.iter().map(String::as_str));
    selection.prune(store.cart());
    if selection.is_empty() {
        ctx.output.warn("Không có sản phẩm nào trong giỏ hàng khớp");
        return Ok(());
    }

    let removed = selection.len();
    selection.remove_from(store);
    ctx.output.success(&format!("Đã xóa {} sản phẩm", removed));
    show_cart(store.cart_items(), ctx);
    Ok(())
}

fn update_item(store: &mut CartStore<FileStore>, id: &str, quantity: i64, ctx: &Context) -> Result<()> {
    if !store.cart().contains(id) {
        ctx.output.warn(&format!("{} is not in the cart", id));
        return Ok(());
    }
    store.update_quantity(id, quantity);
    if quantity < 1 {
        ctx.output.success(&format!("Đã xóa {}", id));
    } else {
        ctx.output.success(&format!("{} x{}", id, quantity));
    }
    show_cart(store.cart_items(), ctx);
    Ok(())
}

fn clear_cart(store: &mut CartStore<FileStore>, yes: bool, ctx: &Context) -> Result<()> {
    if store.cart_items().is_empty() {
        ctx.output.info("Giỏ hàng trống");
        return Ok(());
    }

    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt("Xóa toàn bộ giỏ hàng?")
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Cancelled");
            return Ok(());
        }
    }

    store.clear_cart();
    ctx.output.success("Đã xóa giỏ hàng");
    Ok(())
}
