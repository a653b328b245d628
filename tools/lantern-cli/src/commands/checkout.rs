//! Checkout: shipping form, payment choice, submission and the thank-you screen.

use anyhow::{bail, Result};
use dialoguer::{Confirm, Input, Select};
use lantern_cache::FileStore;
use lantern_commerce::cart::{CartStore, OrderSelection};
use lantern_commerce::checkout::{
    CheckoutOutcome, CheckoutSession, PaymentMethod, Region, ShippingInfo, SubmissionReceipt,
};
use lantern_commerce::error::{EMPTY_SELECTION_MESSAGE, MISSING_SHIPPING_INFO_MESSAGE};
use lantern_commerce::CommerceError;
use lantern_data::{FormIntake, RegionDirectory, RegionSelector};

use super::CheckoutArgs;
use crate::commands::cart::show_cart;
use crate::context::Context;

const DEFAULT_PAYMENT_REFERENCE: &str = "Vui lòng liên hệ cửa hàng để nhận thông tin thanh toán.";

const NAME_PROMPT: &str = "Họ và tên";
const PHONE_PROMPT: &str = "Số điện thoại";
const ADDRESS_PROMPT: &str = "Địa chỉ (số nhà, đường)";

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let interactive = !args.yes && !ctx.output.is_json();
    let mut store = ctx.open_cart()?;

    if store.cart_items().is_empty() {
        bail!("Giỏ hàng trống");
    }
    let selection = select_items(&args, &store);
    if selection.is_empty() {
        bail!("{}", EMPTY_SELECTION_MESSAGE);
    }

    ctx.output.header("Thanh toán");
    ctx.output.step(1, 4, "Đơn hàng");
    show_cart(&selection.apply(store.cart_items()), ctx);

    let mut session = CheckoutSession::new(selection);

    ctx.output.step(2, 4, "Thông tin giao hàng");
    session.shipping = shipping_info(&args, ctx, interactive).await?;

    ctx.output.step(3, 4, "Phương thức thanh toán");
    session.set_payment_method(payment_method(&args, interactive)?)?;

    ctx.output.step(4, 4, "Xác nhận");
    let intake = ctx.intake();
    let mut outcome = confirm(&mut session, &mut store, &intake, ctx, interactive).await?;

    loop {
        match outcome {
            CheckoutOutcome::AwaitingPaymentConfirmation => {
                show_payment_reference(&session, ctx);
                if !payment_made(interactive)? {
                    session.cancel_payment()?;
                    ctx.output.warn("Đã hủy thanh toán. Giỏ hàng vẫn được giữ nguyên.");
                    return Ok(());
                }
                let spinner = ctx.output.spinner("Đang gửi đơn hàng...");
                let result = session.acknowledge_payment(&mut store, &intake).await;
                spinner.finish_and_clear();
                outcome = result?;
            }
            CheckoutOutcome::Submitted(receipt) => {
                thank_you(&receipt, ctx);
                return Ok(());
            }
            CheckoutOutcome::Failed(e) => {
                ctx.output.error(&e.message);
                ctx.output.debug(&e.cause.to_string());
                if !interactive || !retry()? {
                    bail!("{}", e.message);
                }
                outcome = confirm(&mut session, &mut store, &intake, ctx, interactive).await?;
            }
        }
    }
}

/// Validate and continue. Interactively, missing shipping fields are asked
/// for again until the form passes.
async fn confirm(
    session: &mut CheckoutSession,
    store: &mut CartStore<FileStore>,
    intake: &FormIntake,
    ctx: &Context,
    interactive: bool,
) -> Result<CheckoutOutcome> {
    loop {
        let spinner = if session.payment_method().requires_confirmation() {
            ctx.output.spinner("Đang kiểm tra...")
        } else {
            ctx.output.spinner("Đang gửi đơn hàng...")
        };
        let result = session.confirm(store, intake).await;
        spinner.finish_and_clear();

        match result {
            Ok(outcome) => return Ok(outcome),
            Err(CommerceError::MissingShippingInfo(fields)) if interactive => {
                ctx.output.warn(MISSING_SHIPPING_INFO_MESSAGE);
                ctx.output.debug(&format!("missing: {}", fields.join(", ")));
                session.edit()?;
                fill_missing(&mut session.shipping, ctx).await?;
            }
            Err(e) if e.is_validation() => {
                ctx.output.debug(&e.to_string());
                bail!("{}", e.user_message())
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Prompt again for whatever the form still lacks.
async fn fill_missing(info: &mut ShippingInfo, ctx: &Context) -> Result<()> {
    fill_blank_text(info, |prompt| text_field(None, prompt, true))?;

    if info.province.is_none() || info.ward.is_none() {
        let directory = ctx.region_directory();
        let (province, ward) = regions(None, None, &directory, ctx, true).await?;
        // No list to pick from means the region lookup is down.
        if province.is_none() || ward.is_none() {
            bail!("{}", MISSING_SHIPPING_INFO_MESSAGE);
        }
        info.province = province;
        info.ward = ward;
    }
    Ok(())
}

/// Replace each blank text field with `ask(prompt)`, in form order.
fn fill_blank_text(
    info: &mut ShippingInfo,
    mut ask: impl FnMut(&str) -> Result<String>,
) -> Result<()> {
    for (value, prompt) in [
        (&mut info.receiver_name, NAME_PROMPT),
        (&mut info.receiver_phone, PHONE_PROMPT),
        (&mut info.address_line, ADDRESS_PROMPT),
    ] {
        if value.trim().is_empty() {
            *value = ask(prompt)?;
        }
    }
    Ok(())
}

fn select_items(args: &CheckoutArgs, store: &CartStore<FileStore>) -> OrderSelection {
    let mut selection = if args.items.is_empty() {
        OrderSelection::all(store.cart())
    } else {
        OrderSelection::from_ids(args.items.iter().map(String::as_str))
    };
    selection.prune(store.cart());
    selection
}

async fn shipping_info(args: &CheckoutArgs, ctx: &Context, interactive: bool) -> Result<ShippingInfo> {
    let receiver_name = text_field(args.name.as_deref(), NAME_PROMPT, interactive)?;
    let receiver_phone = text_field(args.phone.as_deref(), PHONE_PROMPT, interactive)?;
    let address_line = text_field(args.address.as_deref(), ADDRESS_PROMPT, interactive)?;

    let directory = ctx.region_directory();
    let (province, ward) = regions(args.province, args.ward, &directory, ctx, interactive).await?;

    let note = match &args.note {
        Some(note) => note.clone(),
        None if interactive => Input::<String>::new()
            .with_prompt("Ghi chú")
            .allow_empty(true)
            .interact_text()?,
        None => String::new(),
    };

    let mut info = ShippingInfo::new(receiver_name, receiver_phone, address_line).with_note(note);
    info.province = province;
    info.ward = ward;
    Ok(info)
}

fn text_field(value: Option<&str>, prompt: &str, interactive: bool) -> Result<String> {
    match value {
        Some(value) => Ok(value.to_string()),
        None if interactive => Ok(Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?),
        None => Ok(String::new()),
    }
}

async fn regions(
    province: Option<u32>,
    ward: Option<u32>,
    directory: &RegionDirectory,
    ctx: &Context,
    interactive: bool,
) -> Result<(Option<Region>, Option<Region>)> {
    if province.is_none() && !interactive {
        return Ok((None, None));
    }

    let mut selector = RegionSelector::new();
    let spinner = ctx.output.spinner("Đang tải tỉnh/thành...");
    selector.set_provinces(directory.provinces().await);
    spinner.finish_and_clear();

    let province_code = match province {
        Some(code) => Some(code),
        None => pick_region("Tỉnh/Thành phố", selector.provinces())?,
    };

    let spinner = ctx.output.spinner("Đang tải phường/xã...");
    selector.choose_province(directory, province_code).await;
    spinner.finish_and_clear();

    if province_code.is_some() && selector.province().is_none() {
        ctx.output.warn("Không tìm thấy tỉnh/thành đã chọn");
    }

    let ward_code = match ward {
        Some(code) => Some(code),
        None if interactive => pick_region("Phường/Xã", selector.wards())?,
        None => None,
    };
    selector.select_ward(ward_code);

    Ok((selector.province().cloned(), selector.ward().cloned()))
}

fn pick_region(prompt: &str, regions: &[Region]) -> Result<Option<u32>> {
    if regions.is_empty() {
        return Ok(None);
    }
    let names: Vec<&str> = regions.iter().map(|r| r.name.as_str()).collect();
    let index = Select::new()
        .with_prompt(prompt)
        .items(&names)
        .default(0)
        .interact_opt()?;
    Ok(index.map(|i| regions[i].code))
}

fn payment_method(args: &CheckoutArgs, interactive: bool) -> Result<PaymentMethod> {
    if let Some(code) = &args.payment {
        return Ok(code.parse()?);
    }
    if !interactive {
        return Ok(PaymentMethod::default());
    }

    let labels: Vec<&str> = PaymentMethod::ALL.iter().map(|m| m.label()).collect();
    let index = Select::new()
        .with_prompt("Phương thức thanh toán")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(PaymentMethod::ALL[index])
}

fn show_payment_reference(session: &CheckoutSession, ctx: &Context) {
    let reference = ctx
        .config
        .payment
        .reference
        .as_deref()
        .unwrap_or(DEFAULT_PAYMENT_REFERENCE);
    let total = session
        .draft()
        .map(|d| d.totals().total.display())
        .unwrap_or_default();

    ctx.output.header(session.payment_method().label());
    ctx.output.kv("Số tiền", &total);
    ctx.output.kv("Thông tin", reference);
}

fn payment_made(interactive: bool) -> Result<bool> {
    if !interactive {
        return Ok(true);
    }
    Ok(Confirm::new()
        .with_prompt("Bạn đã thanh toán xong?")
        .default(false)
        .interact()?)
}

fn retry() -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt("Thử lại?")
        .default(true)
        .interact()?)
}

fn thank_you(receipt: &SubmissionReceipt, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(receipt);
        return;
    }

    ctx.output.success(&receipt.message);
    ctx.output.header("Cảm ơn bạn đã đặt hàng!");
    ctx.output.kv("Người nhận", &receipt.form.receiver_name);
    ctx.output.kv("Địa chỉ", &receipt.form.address);
    ctx.output.kv("Sản phẩm", &receipt.form.products);
    ctx.output.kv("Thanh toán", receipt.payment_method.label());
    ctx.output.kv("Tổng cộng", &receipt.total.display());
}
