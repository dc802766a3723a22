use actix_web::{get, post, web, HttpResponse};

use crate::database::Store;
use crate::models::{CreateProductRequest, ProductResponse};
use crate::services::product_service;
use crate::utils::AppError;

/// GET /api/products - Lista todos os produtos
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    responses(
        (status = 200, description = "All products", body = [ProductResponse]),
        (status = 500, description = "Persistence failure")
    )
)]
#[get("")]
pub async fn list_products(db: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    let products = product_service::list_products(db.get_ref()).await?;
    Ok(HttpResponse::Ok().json(products))
}

/// GET /api/products/{id} - Busca produto específico
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Product ObjectId (hex)")),
    responses(
        (status = 200, description = "The product", body = ProductResponse),
        (status = 404, description = "Unknown or malformed id")
    )
)]
#[get("/{id}")]
pub async fn get_product(
    path: web::Path<String>,
    db: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    let product = product_service::get_product(db.get_ref(), &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(product))
}

/// POST /api/products - Cria novo produto
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Missing or invalid field")
    )
)]
#[post("")]
pub async fn create_product(
    body: web::Json<CreateProductRequest>,
    db: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    let product = product_service::create_product(db.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(product))
}
