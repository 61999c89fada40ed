//! Show command.

use anyhow::Result;
use serde_json::json;

use crate::context::Context;

/// Run the show command.
pub fn run(ctx: &Context) -> Result<()> {
    let cart = ctx.open_cart()?;
    let totals = cart.totals();

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "key": cart.storage().key(),
            "items": cart.items(),
            "totals": totals,
        }));
        return Ok(());
    }

    ctx.output.header(&format!("Cart ({})", cart.storage().key()));

    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return Ok(());
    }

    let widths = [6, 24, 10, 4, 10];
    ctx.output.table_row(&["ID", "TITLE", "VARIANT", "QTY", "TOTAL"], &widths);
    for line in cart.items() {
        ctx.output.cart_line(line, cart.currency(), &widths);
    }
    ctx.output.totals(totals);
    Ok(())
}
