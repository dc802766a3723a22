//! Persistence layer.
//!
//! Handlers never talk to MongoDB directly: they receive an `Arc<dyn Store>`
//! through `web::Data`, so the same routes run against [`MongoDB`] in
//! production and against the in-memory store in tests.

mod mongo;
#[cfg(test)]
pub mod memory;

pub use mongo::MongoDB;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::models::{CartItem, Product};
use crate::utils::AppError;

pub const PRODUCTS_COLLECTION: &str = "products";
pub const CART_ITEMS_COLLECTION: &str = "cart_items";

#[async_trait]
pub trait Store: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, AppError>;

    async fn find_product(&self, id: &ObjectId) -> Result<Option<Product>, AppError>;

    /// Bulk lookup used to populate cart lines. Unknown ids are skipped.
    async fn find_products(&self, ids: &[ObjectId]) -> Result<Vec<Product>, AppError>;

    async fn insert_product(&self, product: Product) -> Result<Product, AppError>;

    async fn cart_items_for_user(&self, user_id: &str) -> Result<Vec<CartItem>, AppError>;

    async fn find_cart_item(&self, id: &ObjectId) -> Result<Option<CartItem>, AppError>;

    /// Adds `quantity` units of `product` to the user's line item, creating it
    /// when absent, as one atomic operation.
    ///
    /// Returns `Ok(None)` without touching storage when the resulting quantity
    /// would exceed `product.stock_qty`.
    async fn add_to_cart(
        &self,
        user_id: &str,
        product: &Product,
        quantity: i64,
    ) -> Result<Option<CartItem>, AppError>;

    /// Sets the quantity of a line item owned by `user_id`.
    /// `Ok(None)` when no such item exists for that owner.
    async fn set_cart_quantity(
        &self,
        id: &ObjectId,
        user_id: &str,
        quantity: i64,
    ) -> Result<Option<CartItem>, AppError>;

    /// Deletes a line item owned by `user_id`; `false` when nothing matched.
    async fn delete_cart_item(&self, id: &ObjectId, user_id: &str) -> Result<bool, AppError>;
}
