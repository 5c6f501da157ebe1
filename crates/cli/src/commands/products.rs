//! Catalog commands.

use std::io::Write;

use frosteva_core::Product;

use crate::client::ApiClient;
use crate::error::CliError;

/// List every product with price and stock.
pub async fn list(api: &ApiClient, out: &mut impl Write) -> Result<(), CliError> {
    let products: Vec<Product> = api.get("/api/products").await?;
    write_table(&products, out)?;
    Ok(())
}

fn write_table(products: &[Product], out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "{:<36}  {:<40}  {:>8}  {:>6}", "ID", "NAME", "PRICE", "STOCK")?;
    for product in products {
        let flag = if product.stock.is_low() { " low" } else { "" };
        writeln!(
            out,
            "{:<36}  {:<40}  {:>8}  {:>6}{flag}",
            product.id, product.name, product.price, product.stock
        )?;
        for variant in &product.variants {
            writeln!(out, "{:<36}    - {:<36}  {:>8}", "", variant.name, variant.price)?;
        }
    }
    writeln!(out, "{} products", products.len())
}
