//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `catalog` - Product management and cart pricing
//! - `orders` - Checkout, status changes, dashboard figures
//!
//! Services validate boundary payloads (see `validation`) before anything
//! reaches a repository, so a rejected request never changes stored data.

pub mod catalog;
pub mod dashboard;
pub mod error;
pub mod orders;
pub mod validation;

pub use catalog::CatalogService;
pub use dashboard::{DailySales, DashboardSummary};
pub use error::{FieldError, ServiceError, ValidationErrors};
pub use orders::{OrderService, TotalPolicy, TransitionPolicy};
pub use validation::{LineItemForm, OrderForm, ProductForm, StatusForm, VariantForm};
