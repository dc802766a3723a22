use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Produto do catálogo (armazenado no MongoDB)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub name: String,

    pub price: f64,

    pub description: String,

    /// Upper bound for any cart quantity of this product
    pub stock_qty: i64,

    /// Timestamp de criação (Unix timestamp)
    pub created_at: i64,

    pub updated_at: i64,
}

/// Request para criar produto
///
/// Every field is optional at the wire level so that a missing field is
/// reported as a validation error instead of a deserialization failure.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub stock_qty: Option<i64>,
}

/// Response de produto
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub stock_qty: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        ProductResponse {
            id: p.id.to_hex(),
            name: p.name,
            price: p.price,
            description: p.description,
            stock_qty: p.stock_qty,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}
