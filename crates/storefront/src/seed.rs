//! Catalog seeding.
//!
//! A seed catalog is a JSON array of product payloads in the same shape the
//! back office posts to `/api/products`. The storefront binary loads the
//! bundled Frosteva catalog at startup unless `STOREFRONT_SEED_CATALOG=false`.

use serde::Serialize;
use thiserror::Error;
use tracing::{info, instrument};

use crate::services::{CatalogService, ProductForm, ServiceError, ValidationErrors};

/// The catalog shipped with the storefront.
pub const BUNDLED_CATALOG: &str = include_str!("../seed/catalog.json");

/// Errors that can occur while loading a seed catalog.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The file is not a JSON array of product payloads.
    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// One or more entries failed validation; nothing was loaded.
    #[error("{} catalog entries are invalid", .0.len())]
    Invalid(Vec<CatalogIssue>),

    /// Storing a product failed.
    #[error("failed to store product: {0}")]
    Service(#[from] ServiceError),
}

/// A catalog entry that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogIssue {
    /// Zero-based position in the file.
    pub index: usize,
    pub name: Option<String>,
    pub errors: ValidationErrors,
}

/// Parse catalog JSON without validating entries.
///
/// # Errors
///
/// Returns `SeedError::Parse` if `json` is not an array of product objects.
pub fn parse_catalog(json: &str) -> Result<Vec<ProductForm>, SeedError> {
    Ok(serde_json::from_str(json)?)
}

/// Check every entry against the product creation rules.
#[must_use]
pub fn validate_catalog(forms: &[ProductForm]) -> Vec<CatalogIssue> {
    forms
        .iter()
        .enumerate()
        .filter_map(|(index, form)| {
            form.clone().into_input().err().map(|errors| CatalogIssue {
                index,
                name: form.name.clone(),
                errors,
            })
        })
        .collect()
}

/// Validate every entry, then create them in file order.
///
/// Returns how many products were created.
///
/// # Errors
///
/// Returns `SeedError::Invalid` without touching the catalog if any entry is
/// invalid, or `SeedError::Service` if storing fails.
#[instrument(skip(catalog, forms), fields(entries = forms.len()))]
pub async fn load_catalog(
    catalog: &CatalogService,
    forms: Vec<ProductForm>,
) -> Result<usize, SeedError> {
    let issues = validate_catalog(&forms);
    if !issues.is_empty() {
        return Err(SeedError::Invalid(issues));
    }

    let count = forms.len();
    for form in forms {
        catalog.create_product(form).await?;
    }
    info!(count, "Seeded catalog");
    Ok(count)
}

/// Load [`BUNDLED_CATALOG`].
///
/// # Errors
///
/// See [`load_catalog`].
pub async fn load_bundled_catalog(catalog: &CatalogService) -> Result<usize, SeedError> {
    load_catalog(catalog, parse_catalog(BUNDLED_CATALOG)?).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use frosteva_core::{Price, Stock, VariantId};

    use super::*;
    use crate::db::MemoryProductRepository;

    fn catalog() -> CatalogService {
        CatalogService::new(Arc::new(MemoryProductRepository::new()))
    }

    #[test]
    fn test_bundled_catalog_is_valid() {
        let forms = parse_catalog(BUNDLED_CATALOG).unwrap();
        assert_eq!(forms.len(), 7);
        assert!(validate_catalog(&forms).is_empty());
    }

    #[tokio::test]
    async fn test_load_bundled_catalog() {
        let catalog = catalog();
        assert_eq!(load_bundled_catalog(&catalog).await.unwrap(), 7);

        let products = catalog.list_products().await.unwrap();
        let ghee = &products[0];
        assert!(ghee.name.starts_with("Premium Ghee"));
        assert_eq!(ghee.price, Price::new("450"));
        assert_eq!(ghee.stock, Stock::new("50"));
        assert_eq!(
            ghee.variant(&VariantId::new("ghee-1kg")).unwrap().price,
            Price::new("1800")
        );
        assert_eq!(products[6].variants.len(), 3);
    }

    #[tokio::test]
    async fn test_invalid_entry_loads_nothing() {
        let json = r#"[
            {"name": "Ghee", "description": "d", "price": "450", "category": "Dairy", "imageUrl": "/g.png"},
            {"name": "Curd", "description": "d", "price": "-1", "category": "Dairy", "imageUrl": "/c.png"}
        ]"#;
        let catalog = catalog();

        let err = load_catalog(&catalog, parse_catalog(json).unwrap())
            .await
            .unwrap_err();
        let SeedError::Invalid(issues) = err else {
            panic!("expected invalid catalog, got {err:?}");
        };
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].index, 1);
        assert!(issues[0].errors.contains("price"));
        assert!(catalog.list_products().await.unwrap().is_empty());
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            parse_catalog("{\"name\": \"not an array\"}"),
            Err(SeedError::Parse(_))
        ));
    }
}
