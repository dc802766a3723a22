use std::collections::HashMap;

use crate::database::Store;
use crate::models::{
    AddToCartRequest, CartItemResponse, CartLineResponse, CartResponse, ProductResponse,
    UpdateCartItemRequest,
};
use crate::services::product_service::parse_object_id;
use crate::utils::AppError;

const EXCEEDS_STOCK: &str = "Quantity exceeds stock quantity";

/// Returns the user's cart with every line populated with its product
pub async fn get_cart(store: &dyn Store, user_id: &str) -> Result<CartResponse, AppError> {
    let items = store.cart_items_for_user(user_id).await?;

    let product_ids: Vec<_> = items.iter().map(|item| item.product_id).collect();
    let products: HashMap<_, _> = store
        .find_products(&product_ids)
        .await?
        .into_iter()
        .map(|product| (product.id, product))
        .collect();

    let mut lines = Vec::with_capacity(items.len());
    for item in items {
        match products.get(&item.product_id) {
            Some(product) => {
                let product = ProductResponse::from(product.clone());
                lines.push(CartLineResponse::populated(item, product));
            }
            None => log::warn!(
                "⚠️  Cart item {} references missing product {}",
                item.id.to_hex(),
                item.product_id.to_hex()
            ),
        }
    }

    Ok(CartResponse::new(user_id.to_string(), lines))
}

pub async fn add_item(
    store: &dyn Store,
    user_id: &str,
    request: AddToCartRequest,
) -> Result<CartItemResponse, AppError> {
    let invalid = || AppError::Validation("Product ID and quantity (>=1) required".to_string());

    let product_id = request
        .product_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(invalid)?;
    let quantity = request.quantity.filter(|q| *q >= 1).ok_or_else(invalid)?;

    let product_id = parse_object_id(&product_id, "Product not found")?;
    let product = store
        .find_product(&product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    if quantity > product.stock_qty {
        return Err(AppError::Validation(EXCEEDS_STOCK.to_string()));
    }

    // Increment-or-create and the stock re-check happen in one store call
    let item = store
        .add_to_cart(user_id, &product, quantity)
        .await?
        .ok_or_else(|| AppError::Validation(EXCEEDS_STOCK.to_string()))?;

    log::info!(
        "🛒 User {} now has {} x {} in cart",
        user_id,
        item.quantity,
        product.name
    );

    Ok(CartItemResponse::from(item))
}

pub async fn update_item(
    store: &dyn Store,
    user_id: &str,
    item_id: &str,
    request: UpdateCartItemRequest,
) -> Result<CartLineResponse, AppError> {
    let quantity = request
        .quantity
        .filter(|q| *q >= 1)
        .ok_or_else(|| AppError::Validation("Quantity (>=1) is required".to_string()))?;

    let item_id = parse_object_id(item_id, "Cart item not found")?;
    let item = store
        .find_cart_item(&item_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Cart item not found".to_string()))?;

    if item.user_id != user_id {
        log::warn!("🚫 User {} tried to update cart item {}", user_id, item_id.to_hex());
        return Err(AppError::Forbidden("Not authorized".to_string()));
    }

    let product = store
        .find_product(&item.product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    if quantity > product.stock_qty {
        return Err(AppError::Validation(EXCEEDS_STOCK.to_string()));
    }

    // The write filters on the owner too, so a vanished item reads as 404
    let updated = store
        .set_cart_quantity(&item_id, user_id, quantity)
        .await?
        .ok_or_else(|| AppError::NotFound("Cart item not found".to_string()))?;

    log::info!("✏️  Cart item {} set to {}", item_id.to_hex(), quantity);

    Ok(CartLineResponse::populated(updated, ProductResponse::from(product)))
}

pub async fn remove_item(store: &dyn Store, user_id: &str, item_id: &str) -> Result<(), AppError> {
    let item_id = parse_object_id(item_id, "Cart item not found")?;
    let item = store
        .find_cart_item(&item_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Cart item not found".to_string()))?;

    if item.user_id != user_id {
        log::warn!("🚫 User {} tried to remove cart item {}", user_id, item_id.to_hex());
        return Err(AppError::Forbidden("Not authorized".to_string()));
    }

    if !store.delete_cart_item(&item_id, user_id).await? {
        return Err(AppError::NotFound("Cart item not found".to_string()));
    }

    log::info!("🗑️  Cart item {} removed", item_id.to_hex());
    Ok(())
}
