use mongodb::bson::oid::ObjectId;

use crate::database::Store;
use crate::models::{CreateProductRequest, Product, ProductResponse};
use crate::utils::AppError;

/// Parses a path/body id, treating anything that is not an ObjectId as an
/// id that simply does not resolve.
pub fn parse_object_id(raw: &str, not_found: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw.trim()).map_err(|_| AppError::NotFound(not_found.to_string()))
}

pub async fn list_products(store: &dyn Store) -> Result<Vec<ProductResponse>, AppError> {
    let products = store.list_products().await?;
    Ok(products.into_iter().map(ProductResponse::from).collect())
}

pub async fn get_product(store: &dyn Store, id: &str) -> Result<ProductResponse, AppError> {
    let object_id = parse_object_id(id, "Product not found")?;

    store
        .find_product(&object_id)
        .await?
        .map(ProductResponse::from)
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
}

pub async fn create_product(
    store: &dyn Store,
    request: CreateProductRequest,
) -> Result<ProductResponse, AppError> {
    let product = validate_new_product(request)?;

    let created = store.insert_product(product).await?;
    log::info!("✅ Product created: {} ({})", created.name, created.id.to_hex());

    Ok(ProductResponse::from(created))
}

fn validate_new_product(request: CreateProductRequest) -> Result<Product, AppError> {
    let missing = || AppError::Validation("Please provide all required fields".to_string());

    let name = non_blank(request.name).ok_or_else(missing)?;
    let description = non_blank(request.description).ok_or_else(missing)?;
    let price = request.price.ok_or_else(missing)?;
    // stockQty is checked for presence only: zero is a valid stock
    let stock_qty = request.stock_qty.ok_or_else(missing)?;

    if !price.is_finite() || price < 0.0 {
        return Err(AppError::Validation("Price must be a non-negative number".to_string()));
    }
    if stock_qty < 0 {
        return Err(AppError::Validation("Stock quantity must not be negative".to_string()));
    }

    let now = chrono::Utc::now().timestamp();
    Ok(Product {
        id: ObjectId::new(),
        name,
        price,
        description,
        stock_qty,
        created_at: now,
        updated_at: now,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;

    fn pen_request() -> CreateProductRequest {
        CreateProductRequest {
            name: Some("Pen".into()),
            price: Some(2.0),
            description: Some("Blue pen".into()),
            stock_qty: Some(5),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_product() {
        let store = MemoryStore::new();

        let created = create_product(&store, pen_request()).await.unwrap();
        assert_eq!(created.name, "Pen");
        assert_eq!(created.stock_qty, 5);

        let fetched = get_product(&store, &created.id).await.unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.description, "Blue pen");
    }

    #[tokio::test]
    async fn test_zero_stock_is_accepted() {
        let store = MemoryStore::new();
        let request = CreateProductRequest {
            stock_qty: Some(0),
            ..pen_request()
        };

        let created = create_product(&store, request).await.unwrap();
        assert_eq!(created.stock_qty, 0);
    }

    #[tokio::test]
    async fn test_missing_fields_persist_nothing() {
        let store = MemoryStore::new();
        let incomplete = vec![
            CreateProductRequest { name: None, ..pen_request() },
            CreateProductRequest { name: Some("   ".into()), ..pen_request() },
            CreateProductRequest { price: None, ..pen_request() },
            CreateProductRequest { description: None, ..pen_request() },
            CreateProductRequest { stock_qty: None, ..pen_request() },
        ];

        for request in incomplete {
            let result = create_product(&store, request).await;
            assert!(matches!(result, Err(AppError::Validation(_))));
        }
        assert_eq!(store.product_count().await, 0);
    }

    #[tokio::test]
    async fn test_negative_values_are_rejected() {
        let store = MemoryStore::new();

        let negative_price = CreateProductRequest { price: Some(-1.0), ..pen_request() };
        assert!(matches!(create_product(&store, negative_price).await, Err(AppError::Validation(_))));

        let negative_stock = CreateProductRequest { stock_qty: Some(-3), ..pen_request() };
        assert!(matches!(create_product(&store, negative_stock).await, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_unknown_and_malformed_ids_are_not_found() {
        let store = MemoryStore::new();

        let unknown = get_product(&store, &ObjectId::new().to_hex()).await;
        assert!(matches!(unknown, Err(AppError::NotFound(_))));

        let malformed = get_product(&store, "not-an-id").await;
        assert!(matches!(malformed, Err(AppError::NotFound(_))));
    }
}
