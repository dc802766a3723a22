use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::database::Store;
use crate::middleware::auth::Claims;
use crate::models::{AddToCartRequest, CartItemResponse, CartLineResponse, CartResponse, UpdateCartItemRequest};
use crate::services::cart_service;
use crate::utils::AppError;

/// GET /api/cart - Carrinho do usuário com produtos populados
#[utoipa::path(
    get,
    path = "/api/cart",
    tag = "Cart",
    responses(
        (status = 200, description = "Current user's cart", body = CartResponse),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
#[get("")]
pub async fn get_cart(user: web::ReqData<Claims>, db: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    let cart = cart_service::get_cart(db.get_ref(), &user.sub).await?;
    Ok(HttpResponse::Ok().json(cart))
}

/// POST /api/cart - Adiciona produto ao carrinho
#[utoipa::path(
    post,
    path = "/api/cart",
    tag = "Cart",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Resulting line item", body = CartItemResponse),
        (status = 400, description = "Invalid quantity or not enough stock"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = []))
)]
#[post("")]
pub async fn add_to_cart(
    user: web::ReqData<Claims>,
    body: web::Json<AddToCartRequest>,
    db: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    let item = cart_service::add_item(db.get_ref(), &user.sub, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(item))
}

/// PUT /api/cart/{id} - Atualiza a quantidade de uma linha
#[utoipa::path(
    put,
    path = "/api/cart/{id}",
    tag = "Cart",
    params(("id" = String, Path, description = "Cart item ObjectId (hex)")),
    request_body = UpdateCartItemRequest,
    responses(
        (status = 200, description = "Updated line item", body = CartLineResponse),
        (status = 400, description = "Invalid quantity or not enough stock"),
        (status = 403, description = "Line item belongs to another user"),
        (status = 404, description = "Cart item not found")
    ),
    security(("bearer_auth" = []))
)]
#[put("/{id}")]
pub async fn update_cart_item(
    user: web::ReqData<Claims>,
    path: web::Path<String>,
    body: web::Json<UpdateCartItemRequest>,
    db: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    let line =
        cart_service::update_item(db.get_ref(), &user.sub, &path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(line))
}

/// DELETE /api/cart/{id} - Remove uma linha do carrinho
#[utoipa::path(
    delete,
    path = "/api/cart/{id}",
    tag = "Cart",
    params(("id" = String, Path, description = "Cart item ObjectId (hex)")),
    responses(
        (status = 200, description = "Line item removed"),
        (status = 403, description = "Line item belongs to another user"),
        (status = 404, description = "Cart item not found")
    ),
    security(("bearer_auth" = []))
)]
#[delete("/{id}")]
pub async fn remove_cart_item(
    user: web::ReqData<Claims>,
    path: web::Path<String>,
    db: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    cart_service::remove_item(db.get_ref(), &user.sub, &path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Cart item removed"
    })))
}
