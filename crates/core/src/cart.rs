//! Pricing a shopping cart against the catalog.
//!
//! The cart itself lives with the shopper; the server only turns the lines
//! they picked into order line items and a subtotal. A selected variant
//! overrides the product's base price for that line.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::{LineItem, Product};
use crate::types::{Price, PriceError, ProductId, VariantId};

/// A product (optionally a specific variant) and how many units of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    #[serde(default)]
    pub variant_id: Option<VariantId>,
    pub quantity: u32,
}

/// Priced cart, ready to submit as an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartQuote {
    pub items: Vec<LineItem>,
    /// Sum of line totals, two decimal places.
    pub subtotal: Price,
    pub item_count: u64,
}

/// Why a cart could not be priced.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error("cart is empty")]
    Empty,
    #[error("quantity for product {0} must be at least 1")]
    ZeroQuantity(ProductId),
    #[error("product {0} does not exist")]
    UnknownProduct(ProductId),
    #[error("product {product_id} has no variant {variant_id}")]
    UnknownVariant {
        product_id: ProductId,
        variant_id: VariantId,
    },
    #[error("product {0} is out of stock")]
    OutOfStock(ProductId),
    #[error("only {available} units of product {product_id} available (requested {requested})")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },
    #[error("product {product_id} has an invalid price: {source}")]
    InvalidPrice {
        product_id: ProductId,
        source: PriceError,
    },
}

/// Price `lines` using `lookup` to resolve products.
///
/// Stock is checked against the total quantity requested per product, so
/// splitting a product over several lines (or variants) cannot exceed it.
///
/// # Errors
///
/// Returns the first problem found: an empty cart, a zero quantity, an unknown
/// product or variant, insufficient stock, or a catalog price that is not a
/// valid amount or overflows when multiplied out.
pub fn quote<'a, F>(lines: &[CartLine], lookup: F) -> Result<CartQuote, CartError>
where
    F: Fn(ProductId) -> Option<&'a Product>,
{
    if lines.is_empty() {
        return Err(CartError::Empty);
    }

    let mut resolved = Vec::with_capacity(lines.len());
    // Requested units per product, in first-seen order.
    let mut requested: Vec<(&Product, u32)> = Vec::new();

    for line in lines {
        let product = lookup(line.product_id).ok_or(CartError::UnknownProduct(line.product_id))?;
        if line.quantity == 0 {
            return Err(CartError::ZeroQuantity(product.id));
        }
        let price = match line.variant_id.as_ref() {
            Some(variant_id) => product.price_for(Some(variant_id)).ok_or_else(|| {
                CartError::UnknownVariant {
                    product_id: product.id,
                    variant_id: variant_id.clone(),
                }
            })?,
            None => &product.price,
        };
        match requested.iter_mut().find(|(p, _)| p.id == product.id) {
            Some((_, total)) => *total = total.saturating_add(line.quantity),
            None => requested.push((product, line.quantity)),
        }
        resolved.push((line, product, price.clone()));
    }

    for (product, quantity) in &requested {
        check_stock(product, *quantity)?;
    }

    let mut items = Vec::with_capacity(lines.len());
    let mut subtotal = Decimal::ZERO;

    for (line, product, price) in resolved {
        let product_name = match line.variant_id.as_ref().and_then(|id| product.variant(id)) {
            Some(variant) => format!("{} ({})", product.name, variant.name),
            None => product.name.clone(),
        };

        let item = LineItem {
            product_id: product.id,
            product_name,
            quantity: line.quantity,
            price,
        };
        let invalid = |source| CartError::InvalidPrice {
            product_id: product.id,
            source,
        };
        subtotal = subtotal
            .checked_add(item.line_total().map_err(invalid)?)
            .ok_or_else(|| invalid(PriceError::Overflow))?;
        items.push(item);
    }

    let item_count = items.iter().map(|item| u64::from(item.quantity)).sum();

    Ok(CartQuote {
        items,
        subtotal: Price::from_amount(subtotal),
        item_count,
    })
}

fn check_stock(product: &Product, requested: u32) -> Result<(), CartError> {
    if !product.is_in_stock() {
        return Err(CartError::OutOfStock(product.id));
    }
    let available = product.stock.count().unwrap_or(0);
    if requested > available {
        return Err(CartError::InsufficientStock {
            product_id: product.id,
            requested,
            available,
        });
    }
    Ok(())
}
