pub mod cart;
pub mod health;
pub mod products;
pub mod swagger;

use actix_web::web;

use crate::middleware::AuthMiddleware;
use crate::services::auth_service::TokenVerifier;
use crate::utils::AppError;

/// Registers the `/api` routes. Cart routes sit behind the JWT middleware.
pub fn configure(cfg: &mut web::ServiceConfig, verifier: TokenVerifier) {
    cfg.app_data(
        // Malformed bodies get the same error envelope as every other 400
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::Validation(format!("Invalid JSON body: {}", err)).into()),
    )
    .service(
        web::scope("/api/products")
            .service(products::list_products)
            .service(products::get_product)
            .service(products::create_product),
    )
    .service(
        web::scope("/api/cart")
            .wrap(AuthMiddleware::new(verifier))
            .service(cart::get_cart)
            .service(cart::add_to_cart)
            .service(cart::update_cart_item)
            .service(cart::remove_cart_item),
    );
}
