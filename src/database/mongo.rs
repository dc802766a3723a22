use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions, ReturnDocument};
use mongodb::{Client, Collection, Database, IndexModel};
use std::time::Duration;

use super::{Store, CART_ITEMS_COLLECTION, PRODUCTS_COLLECTION};
use crate::models::{CartItem, Product};
use crate::utils::AppError;

const DEFAULT_DB_NAME: &str = "shoppyglobe";
const DUPLICATE_KEY: i32 = 11000;

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, AppError> {
        let mut client_options = ClientOptions::parse(uri).await?;

        client_options.app_name = Some("shoppyglobe-api".to_string());
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(Duration::from_secs(300));
        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        // Database name comes from the URI path, e.g. mongodb://host:27017/shop
        let db_name = client_options
            .default_database
            .clone()
            .unwrap_or_else(|| DEFAULT_DB_NAME.to_string());

        let client = Client::with_options(client_options)?;
        let db = client.database(&db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates the indexes the cart operations rely on
    async fn ensure_indexes(&self) -> Result<(), AppError> {
        log::info!("🔧 Creating database indexes...");

        let cart_items = self.collection::<Document>(CART_ITEMS_COLLECTION);

        // One line item per (user, product); the atomic add depends on it
        let unique_line = IndexModel::builder()
            .keys(doc! { "user_id": 1, "product_id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        cart_items.create_index(unique_line).await?;
        log::info!("   ✅ Index created: cart_items(user_id, product_id) unique");

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    fn products(&self) -> Collection<Product> {
        self.collection(PRODUCTS_COLLECTION)
    }

    fn cart_items(&self) -> Collection<CartItem> {
        self.collection(CART_ITEMS_COLLECTION)
    }

    /// `$inc` on the (user, product) line, matching only while the new
    /// total stays within stock
    async fn increment_cart_line(
        &self,
        user_id: &str,
        product: &Product,
        quantity: i64,
        upsert: bool,
    ) -> mongodb::error::Result<Option<CartItem>> {
        let now = chrono::Utc::now().timestamp();

        let filter = doc! {
            "user_id": user_id,
            "product_id": product.id,
            "quantity": { "$lte": product.stock_qty - quantity },
        };
        let update = doc! {
            "$inc": { "quantity": quantity },
            "$set": { "updated_at": now },
            "$setOnInsert": { "created_at": now },
        };

        self.cart_items()
            .find_one_and_update(filter, update)
            .upsert(upsert)
            .return_document(ReturnDocument::After)
            .await
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY,
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY,
        _ => false,
    }
}

#[async_trait]
impl Store for MongoDB {
    async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        let cursor = self.products().find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_product(&self, id: &ObjectId) -> Result<Option<Product>, AppError> {
        Ok(self.products().find_one(doc! { "_id": *id }).await?)
    }

    async fn find_products(&self, ids: &[ObjectId]) -> Result<Vec<Product>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let cursor = self.products().find(doc! { "_id": { "$in": ids.to_vec() } }).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert_product(&self, product: Product) -> Result<Product, AppError> {
        self.products().insert_one(&product).await?;
        Ok(product)
    }

    async fn cart_items_for_user(&self, user_id: &str) -> Result<Vec<CartItem>, AppError> {
        let cursor = self
            .cart_items()
            .find(doc! { "user_id": user_id })
            .sort(doc! { "created_at": 1 })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_cart_item(&self, id: &ObjectId) -> Result<Option<CartItem>, AppError> {
        Ok(self.cart_items().find_one(doc! { "_id": *id }).await?)
    }

    async fn add_to_cart(
        &self,
        user_id: &str,
        product: &Product,
        quantity: i64,
    ) -> Result<Option<CartItem>, AppError> {
        // Only an item that still has room for `quantity` matches. When an
        // item exists but is too full, the upsert collides with the unique
        // (user_id, product_id) index instead of inserting a duplicate.
        match self.increment_cart_line(user_id, product, quantity, true).await {
            Ok(Some(item)) => Ok(Some(item)),
            Ok(None) => Err(AppError::DatabaseError(
                "upsert returned no cart item".to_string(),
            )),
            Err(e) if is_duplicate_key(&e) => {
                // Either the line is too full, or a concurrent first add
                // inserted it between our filter miss and our insert. The
                // line exists now, so a plain conditional update decides.
                Ok(self.increment_cart_line(user_id, product, quantity, false).await?)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn set_cart_quantity(
        &self,
        id: &ObjectId,
        user_id: &str,
        quantity: i64,
    ) -> Result<Option<CartItem>, AppError> {
        let update = doc! {
            "$set": { "quantity": quantity, "updated_at": chrono::Utc::now().timestamp() },
        };

        Ok(self
            .cart_items()
            .find_one_and_update(doc! { "_id": *id, "user_id": user_id }, update)
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn delete_cart_item(&self, id: &ObjectId, user_id: &str) -> Result<bool, AppError> {
        let result = self
            .cart_items()
            .delete_one(doc! { "_id": *id, "user_id": user_id })
            .await?;
        Ok(result.deleted_count > 0)
    }
}
