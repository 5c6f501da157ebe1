//! Catalog service.
//!
//! Thin layer over the product repository: validates product payloads and
//! prices carts against the current catalog.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, instrument};

use frosteva_core::{CartLine, CartQuote, Product, ProductId, cart};

use super::ServiceError;
use super::validation::ProductForm;
use crate::db::ProductRepository;

/// Catalog operations exposed to the HTTP boundary.
#[derive(Clone)]
pub struct CatalogService {
    products: Arc<dyn ProductRepository>,
}

impl CatalogService {
    /// Create a catalog service over a product repository.
    #[must_use]
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    /// All products in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn list_products(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.products.list_all().await?)
    }

    /// Look up a product.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    pub async fn get_product(&self, id: ProductId) -> Result<Option<Product>, ServiceError> {
        Ok(self.products.get(id).await?)
    }

    /// Validate and store a new product.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` if required fields are missing or
    /// malformed; the repository is not touched in that case.
    #[instrument(skip(self, form))]
    pub async fn create_product(&self, form: ProductForm) -> Result<Product, ServiceError> {
        let input = form.into_input()?;
        let product = self.products.create(input).await?;
        info!(product_id = %product.id, name = %product.name, "Created product");
        Ok(product)
    }

    /// Validate and merge a partial update.
    ///
    /// Returns `Ok(None)` if the product does not exist.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Validation` if a supplied field is blank or malformed.
    #[instrument(skip(self, form), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: ProductId,
        form: ProductForm,
    ) -> Result<Option<Product>, ServiceError> {
        let patch = form.into_patch()?;
        let product = self.products.update(id, patch).await?;
        if product.is_some() {
            info!("Updated product");
        }
        Ok(product)
    }

    /// Remove a product. Returns whether it existed.
    ///
    /// Orders keep their own snapshot of the product, so deletion is not
    /// checked against existing orders.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Repository` if the store fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: ProductId) -> Result<bool, ServiceError> {
        let deleted = self.products.delete(id).await?;
        if deleted {
            info!("Deleted product");
        }
        Ok(deleted)
    }

    /// Price cart lines against the current catalog.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Cart` for empty carts, unknown products or
    /// variants, zero quantities, and insufficient stock.
    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub async fn quote_cart(&self, lines: &[CartLine]) -> Result<CartQuote, ServiceError> {
        let mut products = HashMap::new();
        for line in lines {
            if products.contains_key(&line.product_id) {
                continue;
            }
            if let Some(product) = self.products.get(line.product_id).await? {
                products.insert(product.id, product);
            }
        }

        Ok(cart::quote(lines, |id| products.get(&id))?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use frosteva_core::{Price, Stock, VariantId};

    use super::*;
    use crate::db::MemoryProductRepository;
    use crate::services::validation::VariantForm;

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(MemoryProductRepository::new()))
    }

    fn form(name: &str, price: &str) -> ProductForm {
        ProductForm {
            name: Some(name.to_string()),
            description: Some(format!("{name} from Frosteva")),
            price: Some(price.to_string()),
            category: Some("Spreads".to_string()),
            image_url: Some("/images/peanut.png".to_string()),
            stock: Some("80".to_string()),
            variants: Some(vec![VariantForm {
                id: Some(format!("{name}-1kg")),
                name: Some("1kg".to_string()),
                price: Some("640".to_string()),
                size: Some("1kg".to_string()),
            }]),
        }
    }

    #[tokio::test]
    async fn test_invalid_payload_never_reaches_repository() {
        let catalog = service();
        let bad = ProductForm {
            price: Some("lots".to_string()),
            ..form("Crunchy", "320")
        };

        let err = catalog.create_product(bad).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref e) if e.contains("price")));
        assert!(catalog.list_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_update_delete() {
        let catalog = service();
        let product = catalog.create_product(form("Smooth", "320")).await.unwrap();
        assert_eq!(product.stock, Stock::new("80"));

        let updated = catalog
            .update_product(
                product.id,
                ProductForm {
                    price: Some("99".to_string()),
                    ..ProductForm::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.price, Price::new("99"));
        assert_eq!(updated.name, "Smooth");

        assert!(catalog.delete_product(product.id).await.unwrap());
        assert!(!catalog.delete_product(product.id).await.unwrap());
        assert!(catalog.get_product(product.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_unknown_product() {
        let catalog = service();
        let result = catalog
            .update_product(ProductId::generate(), ProductForm::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_quote_cart_scenario() {
        let catalog = service();
        let a = catalog.create_product(form("A", "10.00")).await.unwrap();
        let b = catalog.create_product(form("B", "5.50")).await.unwrap();

        let quote = catalog
            .quote_cart(&[
                CartLine {
                    product_id: a.id,
                    variant_id: None,
                    quantity: 2,
                },
                CartLine {
                    product_id: b.id,
                    variant_id: None,
                    quantity: 1,
                },
            ])
            .await
            .unwrap();

        assert_eq!(quote.subtotal, Price::new("25.50"));
    }

    #[tokio::test]
    async fn test_quote_cart_variant_and_unknown() {
        let catalog = service();
        let a = catalog.create_product(form("A", "320")).await.unwrap();

        let quote = catalog
            .quote_cart(&[CartLine {
                product_id: a.id,
                variant_id: Some(VariantId::new("A-1kg")),
                quantity: 1,
            }])
            .await
            .unwrap();
        assert_eq!(quote.subtotal, Price::new("640.00"));

        let err = catalog
            .quote_cart(&[CartLine {
                product_id: ProductId::generate(),
                variant_id: None,
                quantity: 1,
            }])
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Cart(_)));
    }
}
