use utoipa::OpenApi;
use utoipa::openapi::security::{SecurityScheme, HttpAuthScheme, HttpBuilder};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ShoppyGlobe API",
        version = "1.0.0",
        description = "Product catalog and per-user shopping cart.\n\n**Authentication:** cart endpoints require a JWT Bearer token whose `sub` claim identifies the user.",
    ),
    paths(
        // Health
        crate::api::health::health_check,

        // Products
        crate::api::products::list_products,
        crate::api::products::get_product,
        crate::api::products::create_product,

        // Cart
        crate::api::cart::get_cart,
        crate::api::cart::add_to_cart,
        crate::api::cart::update_cart_item,
        crate::api::cart::remove_cart_item,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::models::CreateProductRequest,
            crate::models::ProductResponse,
            crate::models::AddToCartRequest,
            crate::models::UpdateCartItemRequest,
            crate::models::CartItemResponse,
            crate::models::CartLineResponse,
            crate::models::CartResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint for monitoring service status."),
        (name = "Products", description = "Product catalog: list, fetch and create products."),
        (name = "Cart", description = "Current user's cart. Quantities are capped by product stock."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Enter your JWT token"))
                        .build()
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in ["/health", "/api/products", "/api/products/{id}", "/api/cart", "/api/cart/{id}"] {
            assert!(paths.iter().any(|p| p.as_str() == expected), "missing path {}", expected);
        }
        assert!(doc.components.unwrap().security_schemes.contains_key("bearer_auth"));
    }
}
