//! Merchant handlers: catalog browsing and order placement.

use parley_core::error::ParleyError;
use parley_store::ProductFilters;

use crate::{CreateOrderParams, ToolContext, ToolOutput};

pub(crate) fn list_products(ctx: &ToolContext, filters: &ProductFilters) -> ToolOutput {
    let products = ctx.catalog.list(filters);
    if products.is_empty() {
        return ToolOutput::text("No products match those filters.");
    }
    let mut lines = vec![format!("Found {} product(s):", products.len())];
    for p in &products {
        let sizes = if p.sizes.is_empty() {
            String::new()
        } else {
            format!(", sizes {}", p.sizes.join("/"))
        };
        lines.push(format!(
            "- {} — {} ({} {:.0}, {}{})",
            p.id, p.name, p.currency, p.price, p.color, sizes
        ));
    }
    ToolOutput::text(lines.join("\n"))
}

pub(crate) fn create_order(ctx: &ToolContext, params: CreateOrderParams) -> ToolOutput {
    if params.line_items.is_empty() {
        return ToolOutput::text("There's nothing in the order yet — which product would you like?");
    }
    match ctx
        .ledger
        .create_order(&ctx.catalog, &params.line_items, params.metadata)
    {
        Ok(order) => ToolOutput::text(format!(
            "Order placed: {} item(s), total {} {:.0}. Your order id is {}.",
            order.items.len(),
            order.currency,
            order.total,
            order.id
        )),
        Err(ParleyError::UnknownProduct { product_id }) => ToolOutput::error(format!(
            "I couldn't find a product with id '{product_id}', so the order wasn't placed."
        )),
        Err(e) => ToolOutput::error(format!("I couldn't place that order: {e}")),
    }
}

pub(crate) fn get_last_order(ctx: &ToolContext) -> ToolOutput {
    match ctx.ledger.last_order() {
        Some(order) => {
            let items: Vec<String> = order
                .items
                .iter()
                .map(|i| format!("{} x{}", i.name, i.quantity))
                .collect();
            ToolOutput::text(format!(
                "Your last order ({}) was {} — total {} {:.0}.",
                order.id,
                items.join(", "),
                order.currency,
                order.total
            ))
        }
        None => ToolOutput::text("You haven't placed any orders yet."),
    }
}
