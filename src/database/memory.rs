//! In-memory [`Store`] used by the handler and service tests.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::Store;
use crate::models::{CartItem, Product};
use crate::utils::AppError;

#[derive(Default)]
struct Collections {
    products: Vec<Product>,
    cart_items: Vec<CartItem>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn cart_item_count(&self) -> usize {
        self.inner.read().await.cart_items.len()
    }

    pub async fn product_count(&self) -> usize {
        self.inner.read().await.products.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        Ok(self.inner.read().await.products.clone())
    }

    async fn find_product(&self, id: &ObjectId) -> Result<Option<Product>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.products.iter().find(|p| &p.id == id).cloned())
    }

    async fn find_products(&self, ids: &[ObjectId]) -> Result<Vec<Product>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .products
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn insert_product(&self, product: Product) -> Result<Product, AppError> {
        self.inner.write().await.products.push(product.clone());
        Ok(product)
    }

    async fn cart_items_for_user(&self, user_id: &str) -> Result<Vec<CartItem>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .cart_items
            .iter()
            .filter(|item| item.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_cart_item(&self, id: &ObjectId) -> Result<Option<CartItem>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner.cart_items.iter().find(|item| &item.id == id).cloned())
    }

    async fn add_to_cart(
        &self,
        user_id: &str,
        product: &Product,
        quantity: i64,
    ) -> Result<Option<CartItem>, AppError> {
        // Single write lock: lookup and increment cannot interleave
        let mut inner = self.inner.write().await;
        let now = chrono::Utc::now().timestamp();

        let existing = inner
            .cart_items
            .iter_mut()
            .find(|item| item.user_id == user_id && item.product_id == product.id);

        match existing {
            Some(item) => {
                let total = match item.quantity.checked_add(quantity) {
                    Some(total) if total <= product.stock_qty => total,
                    _ => return Ok(None),
                };
                item.quantity = total;
                item.updated_at = now;
                Ok(Some(item.clone()))
            }
            None => {
                if quantity > product.stock_qty {
                    return Ok(None);
                }
                let item = CartItem {
                    id: ObjectId::new(),
                    user_id: user_id.to_string(),
                    product_id: product.id,
                    quantity,
                    created_at: now,
                    updated_at: now,
                };
                inner.cart_items.push(item.clone());
                Ok(Some(item))
            }
        }
    }

    async fn set_cart_quantity(
        &self,
        id: &ObjectId,
        user_id: &str,
        quantity: i64,
    ) -> Result<Option<CartItem>, AppError> {
        let mut inner = self.inner.write().await;

        Ok(inner
            .cart_items
            .iter_mut()
            .find(|item| &item.id == id && item.user_id == user_id)
            .map(|item| {
                item.quantity = quantity;
                item.updated_at = chrono::Utc::now().timestamp();
                item.clone()
            }))
    }

    async fn delete_cart_item(&self, id: &ObjectId, user_id: &str) -> Result<bool, AppError> {
        let mut inner = self.inner.write().await;
        let before = inner.cart_items.len();
        inner
            .cart_items
            .retain(|item| !(&item.id == id && item.user_id == user_id));
        Ok(inner.cart_items.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stock_qty: i64) -> Product {
        Product {
            id: ObjectId::new(),
            name: "Crate".into(),
            price: 1.0,
            description: "Bulk crate".into(),
            stock_qty,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[tokio::test]
    async fn test_add_to_cart_at_i64_max_is_refused_not_overflowed() {
        let store = MemoryStore::new();
        let crate_ = store.insert_product(product(i64::MAX)).await.unwrap();

        let item = store.add_to_cart("alice", &crate_, i64::MAX).await.unwrap().unwrap();
        assert_eq!(item.quantity, i64::MAX);

        assert!(store.add_to_cart("alice", &crate_, 1).await.unwrap().is_none());
        assert!(store.add_to_cart("alice", &crate_, i64::MAX).await.unwrap().is_none());

        let lines = store.cart_items_for_user("alice").await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, i64::MAX);
    }

    #[tokio::test]
    async fn test_add_to_cart_fills_exactly_to_stock() {
        let store = MemoryStore::new();
        let pen = store.insert_product(product(5)).await.unwrap();

        assert_eq!(store.add_to_cart("bob", &pen, 3).await.unwrap().unwrap().quantity, 3);
        assert!(store.add_to_cart("bob", &pen, 3).await.unwrap().is_none());
        assert_eq!(store.add_to_cart("bob", &pen, 2).await.unwrap().unwrap().quantity, 5);
        assert_eq!(store.cart_item_count().await, 1);
    }
}
