//! Clear command.

use anyhow::Result;
use dialoguer::Confirm;

use super::ClearArgs;
use crate::context::Context;

/// Run the clear command.
pub fn run(args: ClearArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;

    if cart.is_empty() {
        ctx.output.info("Cart is already empty");
        return Ok(());
    }

    if !args.yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove all {} item(s) from the cart?", cart.item_count()))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Clear cancelled");
            return Ok(());
        }
    }

    cart.clear_cart();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "cleared": true }));
    } else {
        ctx.output.success("Cart cleared");
    }
    Ok(())
}
