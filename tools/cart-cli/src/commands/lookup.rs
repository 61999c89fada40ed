//! Read-only line queries.

use anyhow::Result;
use serde_json::json;
use storefront_cart::ProductId;

use super::LookupArgs;
use crate::context::Context;

/// Run the quantity command.
pub fn quantity(args: LookupArgs, ctx: &Context) -> Result<()> {
    let cart = ctx.open_cart()?;
    let quantity = cart.get_item_quantity(
        ProductId::new(args.id),
        args.variant.size(),
        args.variant.color(),
    );

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "id": args.id, "quantity": quantity }));
    } else {
        println!("{}", quantity);
    }
    Ok(())
}

/// Run the contains command.
pub fn contains(args: LookupArgs, ctx: &Context) -> Result<()> {
    let cart = ctx.open_cart()?;
    let present = cart.is_in_cart(
        ProductId::new(args.id),
        args.variant.size(),
        args.variant.color(),
    );

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "id": args.id, "inCart": present }));
    } else {
        println!("{}", present);
    }
    Ok(())
}
