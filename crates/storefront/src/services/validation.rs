//! Boundary payloads and their validation.
//!
//! Forms mirror the JSON the storefront and back office send. Every field is
//! optional at the serde level so that a missing field is reported as a
//! validation error alongside any others, instead of failing deserialization
//! on the first one. Validating a form yields the typed input the repositories
//! accept.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use frosteva_core::{
    LineItem, OrderInput, OrderStatus, Price, ProductId, ProductInput, ProductPatch, Stock,
    Variant, VariantId, embedded,
};

use super::error::ValidationErrors;

/// Product payload for create (`POST`) and update (`PATCH`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub stock: Option<String>,
    #[serde(default, deserialize_with = "embedded::deserialize_option")]
    pub variants: Option<Vec<VariantForm>>,
}

/// One variant inside a [`ProductForm`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantForm {
    pub id: Option<String>,
    pub name: Option<String>,
    pub price: Option<String>,
    pub size: Option<String>,
}

/// Checkout payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderForm {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    #[serde(default, deserialize_with = "embedded::deserialize_option")]
    pub items: Option<Vec<LineItemForm>>,
    pub total: Option<String>,
    pub status: Option<String>,
}

/// One line inside an [`OrderForm`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemForm {
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<String>,
}

/// Status update payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusForm {
    pub status: Option<String>,
}

impl ProductForm {
    /// Validate a complete product for creation.
    ///
    /// `stock` defaults to `100` and `variants` to none when omitted.
    ///
    /// # Errors
    ///
    /// Returns every missing or malformed field.
    pub fn into_input(self) -> Result<ProductInput, ValidationErrors> {
        let mut v = Validator::default();

        let name = v.required_text("name", self.name);
        let description = v.required_text("description", self.description);
        let price = v.required_price("price", self.price);
        let category = v.required_text("category", self.category);
        let image_url = v.required_text("imageUrl", self.image_url);
        let stock = v.optional_stock("stock", self.stock).unwrap_or_default();
        let variants = self
            .variants
            .map(|forms| v.variants(forms))
            .unwrap_or_default();

        v.finish(ProductInput {
            name,
            description,
            price,
            category,
            image_url,
            stock,
            variants,
        })
    }

    /// Validate a partial product for update. Omitted fields stay `None`.
    ///
    /// # Errors
    ///
    /// Returns every supplied field that is blank or malformed.
    pub fn into_patch(self) -> Result<ProductPatch, ValidationErrors> {
        let mut v = Validator::default();

        let name = v.optional_text("name", self.name);
        let description = v.optional_text("description", self.description);
        let price = v.optional_price("price", self.price);
        let category = v.optional_text("category", self.category);
        let image_url = v.optional_text("imageUrl", self.image_url);
        let stock = v.optional_stock("stock", self.stock);
        let variants = self.variants.map(|forms| v.variants(forms));

        v.finish(ProductPatch {
            name,
            description,
            price,
            category,
            image_url,
            stock,
            variants,
        })
    }
}

impl OrderForm {
    /// Validate a checkout submission.
    ///
    /// A supplied `status` must be in the vocabulary, but the resulting input
    /// always carries `pending`.
    ///
    /// # Errors
    ///
    /// Returns every missing or malformed field.
    pub fn into_input(self) -> Result<OrderInput, ValidationErrors> {
        let mut v = Validator::default();

        let customer_name = v.required_text("customerName", self.customer_name);
        let customer_email = v.required_text("customerEmail", self.customer_email);
        let customer_phone = v.required_text("customerPhone", self.customer_phone);
        let customer_address = v.required_text("customerAddress", self.customer_address);

        let items = match self.items {
            None => {
                v.error("items", "is required");
                Vec::new()
            }
            Some(forms) if forms.is_empty() => {
                v.error("items", "must contain at least one item");
                Vec::new()
            }
            Some(forms) => forms
                .into_iter()
                .enumerate()
                .filter_map(|(i, form)| v.line_item(i, form))
                .collect(),
        };

        let total = v.required_price("total", self.total);

        if let Some(status) = self.status {
            v.status("status", Some(status));
        }

        v.finish(OrderInput {
            customer_name,
            customer_email,
            customer_phone,
            customer_address,
            items,
            total,
            status: Some(OrderStatus::Pending),
        })
    }
}

impl StatusForm {
    /// Validate a status update.
    ///
    /// # Errors
    ///
    /// Returns an error if the status is missing or outside the vocabulary.
    pub fn into_status(self) -> Result<OrderStatus, ValidationErrors> {
        let mut v = Validator::default();
        let status = v.status("status", self.status);
        v.finish(status.unwrap_or_default())
    }
}

// =============================================================================
// Validator
// =============================================================================

/// Collects field errors while converting a form.
#[derive(Debug, Default)]
struct Validator {
    errors: ValidationErrors,
}

impl Validator {
    fn error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(field, message);
    }

    fn finish<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(self.errors)
        }
    }

    fn required_text(&mut self, field: &str, value: Option<String>) -> String {
        match value {
            None => {
                self.error(field, "is required");
                String::new()
            }
            Some(text) if text.trim().is_empty() => {
                self.error(field, "cannot be blank");
                String::new()
            }
            Some(text) => text,
        }
    }

    fn optional_text(&mut self, field: &str, value: Option<String>) -> Option<String> {
        value.map(|text| self.required_text(field, Some(text)))
    }

    fn required_price(&mut self, field: &str, value: Option<String>) -> Price {
        let text = self.required_text(field, value);
        if text.is_empty() {
            return Price::new(text);
        }
        let price = Price::new(text);
        if let Err(e) = price.amount() {
            self.error(field, e.to_string());
        }
        price
    }

    fn optional_price(&mut self, field: &str, value: Option<String>) -> Option<Price> {
        value.map(|text| self.required_price(field, Some(text)))
    }

    fn optional_stock(&mut self, field: &str, value: Option<String>) -> Option<Stock> {
        let text = self.optional_text(field, value)?;
        let stock = Stock::new(text);
        if !stock.as_str().is_empty()
            && let Err(e) = stock.count()
        {
            self.error(field, e.to_string());
        }
        Some(stock)
    }

    fn status(&mut self, field: &str, value: Option<String>) -> Option<OrderStatus> {
        let text = self.required_text(field, value);
        if text.is_empty() {
            return None;
        }
        match text.parse::<OrderStatus>() {
            Ok(status) => Some(status),
            Err(e) => {
                self.error(field, e.to_string());
                None
            }
        }
    }

    fn variants(&mut self, forms: Vec<VariantForm>) -> Vec<Variant> {
        let mut seen = HashSet::new();
        forms
            .into_iter()
            .enumerate()
            .map(|(i, form)| {
                let id = self.required_text(&format!("variants[{i}].id"), form.id);
                if !id.is_empty() && !seen.insert(id.clone()) {
                    self.error(format!("variants[{i}].id"), "duplicates another variant");
                }
                Variant {
                    id: VariantId::new(id),
                    name: self.required_text(&format!("variants[{i}].name"), form.name),
                    price: self.required_price(&format!("variants[{i}].price"), form.price),
                    size: self.required_text(&format!("variants[{i}].size"), form.size),
                }
            })
            .collect()
    }

    fn line_item(&mut self, index: usize, form: LineItemForm) -> Option<LineItem> {
        let prefix = format!("items[{index}]");

        let product_id_text = self.required_text(&format!("{prefix}.productId"), form.product_id);
        let product_id = if product_id_text.is_empty() {
            None
        } else if let Ok(id) = product_id_text.parse::<ProductId>() {
            Some(id)
        } else {
            self.error(format!("{prefix}.productId"), "is not a valid product id");
            None
        };

        let product_name = self.required_text(&format!("{prefix}.productName"), form.product_name);

        let quantity = match form.quantity {
            None => {
                self.error(format!("{prefix}.quantity"), "is required");
                None
            }
            Some(n) => match u32::try_from(n) {
                Ok(n) if n >= 1 => Some(n),
                _ => {
                    self.error(format!("{prefix}.quantity"), "must be at least 1");
                    None
                }
            },
        };

        let price = self.required_price(&format!("{prefix}.price"), form.price);

        Some(LineItem {
            product_id: product_id?,
            product_name,
            quantity: quantity?,
            price,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product_form() -> ProductForm {
        ProductForm {
            name: Some("Premium Ghee".to_string()),
            description: Some("Pure, golden ghee".to_string()),
            price: Some("450".to_string()),
            category: Some("Dairy".to_string()),
            image_url: Some("/images/ghee.png".to_string()),
            stock: Some("50".to_string()),
            variants: Some(vec![VariantForm {
                id: Some("ghee-250g".to_string()),
                name: Some("250g".to_string()),
                price: Some("450".to_string()),
                size: Some("250g".to_string()),
            }]),
        }
    }

    fn order_form() -> OrderForm {
        OrderForm {
            customer_name: Some("Asha".to_string()),
            customer_email: Some("asha@example.com".to_string()),
            customer_phone: Some("9800000000".to_string()),
            customer_address: Some("Kathmandu".to_string()),
            items: Some(vec![LineItemForm {
                product_id: Some(ProductId::generate().to_string()),
                product_name: Some("Milk".to_string()),
                quantity: Some(2),
                price: Some("60".to_string()),
            }]),
            total: Some("120.00".to_string()),
            status: None,
        }
    }

    #[test]
    fn test_valid_product_form() {
        let input = product_form().into_input().unwrap();
        assert_eq!(input.price, Price::new("450"));
        assert_eq!(input.variants.len(), 1);
    }

    #[test]
    fn test_product_defaults() {
        let form = ProductForm {
            stock: None,
            variants: None,
            ..product_form()
        };
        let input = form.into_input().unwrap();
        assert_eq!(input.stock, Stock::new("100"));
        assert!(input.variants.is_empty());
    }

    #[test]
    fn test_missing_product_fields_are_all_reported() {
        let errors = ProductForm::default().into_input().unwrap_err();
        for field in ["name", "description", "price", "category", "imageUrl"] {
            assert!(errors.contains(field), "missing error for {field}");
        }
        assert!(!errors.contains("stock"));
    }

    #[test]
    fn test_product_numeric_shapes() {
        let form = ProductForm {
            price: Some("four hundred".to_string()),
            stock: Some("-5".to_string()),
            ..product_form()
        };
        let errors = form.into_input().unwrap_err();
        assert!(errors.contains("price"));
        assert!(errors.contains("stock"));
    }

    #[test]
    fn test_duplicate_variant_ids() {
        let variant = VariantForm {
            id: Some("ghee-250g".to_string()),
            name: Some("250g".to_string()),
            price: Some("450".to_string()),
            size: Some("250g".to_string()),
        };
        let form = ProductForm {
            variants: Some(vec![variant.clone(), variant]),
            ..product_form()
        };
        let errors = form.into_input().unwrap_err();
        assert!(errors.contains("variants[1].id"));
    }

    #[test]
    fn test_patch_only_carries_supplied_fields() {
        let patch = ProductForm {
            price: Some("99".to_string()),
            ..ProductForm::default()
        }
        .into_patch()
        .unwrap();
        assert_eq!(
            patch,
            ProductPatch {
                price: Some(Price::new("99")),
                ..ProductPatch::default()
            }
        );
    }

    #[test]
    fn test_patch_rejects_blank_fields() {
        let errors = ProductForm {
            name: Some("  ".to_string()),
            ..ProductForm::default()
        }
        .into_patch()
        .unwrap_err();
        assert!(errors.contains("name"));
    }

    #[test]
    fn test_valid_order_form_is_pending() {
        let input = OrderForm {
            status: Some("completed".to_string()),
            ..order_form()
        }
        .into_input()
        .unwrap();
        assert_eq!(input.status, Some(OrderStatus::Pending));
        assert_eq!(input.items[0].quantity, 2);
    }

    #[test]
    fn test_order_rejects_unknown_status() {
        let errors = OrderForm {
            status: Some("refunded".to_string()),
            ..order_form()
        }
        .into_input()
        .unwrap_err();
        assert!(errors.contains("status"));
    }

    #[test]
    fn test_order_item_problems() {
        let form = OrderForm {
            items: Some(vec![LineItemForm {
                product_id: Some("nope".to_string()),
                product_name: None,
                quantity: Some(0),
                price: Some("abc".to_string()),
            }]),
            ..order_form()
        };
        let errors = form.into_input().unwrap_err();
        for field in [
            "items[0].productId",
            "items[0].productName",
            "items[0].quantity",
            "items[0].price",
        ] {
            assert!(errors.contains(field), "missing error for {field}");
        }
    }

    #[test]
    fn test_order_requires_items_and_customer() {
        let errors = OrderForm {
            items: Some(Vec::new()),
            customer_email: Some(String::new()),
            ..order_form()
        }
        .into_input()
        .unwrap_err();
        assert!(errors.contains("items"));
        assert!(errors.contains("customerEmail"));
    }

    #[test]
    fn test_order_form_accepts_embedded_items() {
        let id = ProductId::generate();
        let json = format!(
            r#"{{"customerName":"A","customerEmail":"a@b.c","customerPhone":"1","customerAddress":"X",
                "items":"[{{\"productId\":\"{id}\",\"productName\":\"Milk\",\"quantity\":1,\"price\":\"60\"}}]",
                "total":"60.00","status":"pending"}}"#
        );
        let form: OrderForm = serde_json::from_str(&json).unwrap();
        let input = form.into_input().unwrap();
        assert_eq!(input.items[0].product_id, id);
    }

    #[test]
    fn test_status_form() {
        let status = StatusForm {
            status: Some("shipped".to_string()),
        }
        .into_status()
        .unwrap();
        assert_eq!(status, OrderStatus::Shipped);

        assert!(StatusForm { status: None }.into_status().is_err());
        assert!(
            StatusForm {
                status: Some("lost".to_string())
            }
            .into_status()
            .is_err()
        );
    }

    #[test]
    fn test_validation_errors_display() {
        let errors = ProductForm {
            name: Some("Ghee".to_string()),
            ..ProductForm::default()
        }
        .into_input()
        .unwrap_err();
        let message = errors.to_string();
        assert!(message.contains("description: is required"));
        assert!(message.contains("; "));
    }
}
