//! Commands that change the cart.

use anyhow::Result;
use serde_json::json;
use storefront_cart::{NewLineItem, ProductId};

use super::{AddArgs, RemoveArgs, UpdateArgs};
use crate::context::Context;

/// Run the add command.
pub fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;

    let mut item = NewLineItem::new(ProductId::new(args.id), args.title, args.price)
        .with_image(args.image);
    if let Some(size) = args.variant.size.clone() {
        item = item.with_size(size);
    }
    if let Some(color) = args.variant.color.clone() {
        item = item.with_color(color);
    }
    if let Some(discount) = args.discount {
        item = item.with_discount(discount);
    }

    let quantity = cart.add_item(item, args.quantity);

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "id": args.id,
            "quantity": quantity,
            "totals": cart.totals(),
        }));
        return Ok(());
    }

    if quantity == 0 {
        ctx.output.warn("Quantity must be positive; nothing added");
    } else {
        ctx.output.success(&format!(
            "Product {} now has quantity {}",
            args.id, quantity
        ));
        ctx.output.kv("cart total", &cart.totals().total.display());
    }
    Ok(())
}

/// Run the remove command.
pub fn remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;
    let id = ProductId::new(args.id);

    let removed = if args.all_variants {
        cart.remove_product(id)
    } else {
        usize::from(cart.remove_item(id, args.variant.size(), args.variant.color()))
    };

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "id": args.id, "removed": removed }));
        return Ok(());
    }

    if removed == 0 {
        ctx.output.info(&format!("Product {} was not in the cart", args.id));
    } else {
        ctx.output.success(&format!("Removed {} line(s)", removed));
    }
    Ok(())
}

/// Run the update command.
pub fn update(args: UpdateArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;
    let id = ProductId::new(args.id);

    let matched = cart.update_quantity(id, args.quantity, args.variant.size(), args.variant.color());
    let quantity = cart.get_item_quantity(id, args.variant.size(), args.variant.color());

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "id": args.id,
            "matched": matched,
            "quantity": quantity,
        }));
        return Ok(());
    }

    if !matched {
        ctx.output.warn(&format!("Product {} is not in the cart", args.id));
    } else if quantity == 0 {
        ctx.output.success(&format!("Removed product {}", args.id));
    } else {
        ctx.output.success(&format!("Product {} set to {}", args.id, quantity));
    }
    Ok(())
}
