use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::ProductResponse;

/// Linha do carrinho: um usuário, um produto, uma quantidade
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    /// Subject of the JWT that owns this line item
    pub user_id: String,

    pub product_id: ObjectId,

    #[serde(default = "default_quantity")]
    pub quantity: i64,

    #[serde(default)]
    pub created_at: i64,

    #[serde(default)]
    pub updated_at: i64,
}

fn default_quantity() -> i64 {
    1
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: Option<String>,
    pub quantity: Option<i64>,
}

#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateCartItemRequest {
    pub quantity: Option<i64>,
}

/// Line item with the bare product reference
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItemResponse {
    pub id: String,
    pub user: String,
    pub product_id: String,
    pub quantity: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        CartItemResponse {
            id: item.id.to_hex(),
            user: item.user_id,
            product_id: item.product_id.to_hex(),
            quantity: item.quantity,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

/// Line item with the product populated in place of its id
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartLineResponse {
    pub id: String,
    pub user: String,
    pub product: ProductResponse,
    pub quantity: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl CartLineResponse {
    pub fn populated(item: CartItem, product: ProductResponse) -> Self {
        CartLineResponse {
            id: item.id.to_hex(),
            user: item.user_id,
            product,
            quantity: item.quantity,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

/// Carrinho: agregação de leitura das linhas do usuário (não é armazenado)
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub user: String,
    pub items: Vec<CartLineResponse>,
    pub total_quantity: i64,
    pub subtotal: f64,
}

impl CartResponse {
    pub fn new(user: String, items: Vec<CartLineResponse>) -> Self {
        let total_quantity = items.iter().map(|line| line.quantity).sum();
        let subtotal = items
            .iter()
            .map(|line| line.product.price * line.quantity as f64)
            .sum();

        CartResponse {
            user,
            items,
            total_quantity,
            subtotal,
        }
    }
}
