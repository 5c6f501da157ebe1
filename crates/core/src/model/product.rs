//! Product records.

use serde::{Deserialize, Serialize};

use crate::embedded;
use crate::types::{Price, ProductId, Stock, VariantId};

/// A purchasable sub-option of a product, such as a pack size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: VariantId,
    /// Display name, e.g. `"800g (2 servings)"`.
    pub name: String,
    pub price: Price,
    pub size: String,
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Assigned by the repository at creation; never changes.
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Base price, used when no variant is selected.
    pub price: Price,
    /// Open vocabulary (`Dairy`, `Oils`, `Spreads`, ...).
    pub category: String,
    /// Reference to an external asset; not checked for reachability.
    pub image_url: String,
    pub stock: Stock,
    #[serde(default, deserialize_with = "embedded::deserialize")]
    pub variants: Vec<Variant>,
}

/// Everything needed to create a [`Product`] except its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub category: String,
    pub image_url: String,
    #[serde(default)]
    pub stock: Stock,
    #[serde(default, deserialize_with = "embedded::deserialize")]
    pub variants: Vec<Variant>,
}

/// Field-wise update for a [`Product`]. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub stock: Option<Stock>,
    #[serde(default, deserialize_with = "embedded::deserialize_option")]
    pub variants: Option<Vec<Variant>>,
}

impl Product {
    /// Build a product record from its input and a freshly assigned id.
    #[must_use]
    pub fn new(id: ProductId, input: ProductInput) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            category: input.category,
            image_url: input.image_url,
            stock: input.stock,
            variants: input.variants,
        }
    }

    /// Merge a patch over this record. The id never changes.
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(variants) = patch.variants {
            self.variants = variants;
        }
    }

    /// The record without its id.
    #[must_use]
    pub fn to_input(&self) -> ProductInput {
        ProductInput {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price.clone(),
            category: self.category.clone(),
            image_url: self.image_url.clone(),
            stock: self.stock.clone(),
            variants: self.variants.clone(),
        }
    }

    /// Look up a variant by id.
    #[must_use]
    pub fn variant(&self, id: &VariantId) -> Option<&Variant> {
        self.variants.iter().find(|v| &v.id == id)
    }

    /// The price a shopper pays: the variant's price when one is selected,
    /// otherwise the base price. `None` if the variant does not exist.
    #[must_use]
    pub fn price_for(&self, variant: Option<&VariantId>) -> Option<&Price> {
        match variant {
            Some(id) => self.variant(id).map(|v| &v.price),
            None => Some(&self.price),
        }
    }

    /// Whether `price` matches the base price or any variant price.
    ///
    /// Prices are compared as amounts, so `"10"` matches `"10.00"`.
    #[must_use]
    pub fn offers_price(&self, price: &Price) -> bool {
        let Ok(wanted) = price.amount() else {
            return false;
        };
        std::iter::once(&self.price)
            .chain(self.variants.iter().map(|v| &v.price))
            .any(|p| p.amount().is_ok_and(|amount| amount == wanted))
    }

    /// Whether at least one unit is available.
    #[must_use]
    pub fn is_in_stock(&self) -> bool {
        self.stock.is_in_stock()
    }
}
