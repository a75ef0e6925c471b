//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, laptops};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Laptop Catalog API",
        version = "1.0.0",
        description = "Laptop registry with streaming search"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Laptops
        laptops::create_laptop,
        laptops::get_laptop,
        laptops::search_laptops,
    ),
    components(
        schemas(
            // Laptops
            crate::models::laptop::Laptop,
            crate::models::laptop::Cpu,
            crate::models::laptop::Gpu,
            crate::models::laptop::Memory,
            crate::models::laptop::MemoryUnit,
            crate::models::laptop::Storage,
            crate::models::laptop::StorageDriver,
            crate::models::laptop::Screen,
            crate::models::laptop::Resolution,
            crate::models::laptop::Panel,
            crate::models::laptop::Keyboard,
            crate::models::laptop::KeyboardLayout,
            crate::models::laptop::Weight,
            crate::models::laptop::Filter,
            crate::models::laptop::CreateLaptopRequest,
            crate::models::laptop::CreateLaptopResponse,
            crate::models::laptop::SearchLaptopRequest,
            crate::models::laptop::SearchLaptopResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "laptops", description = "Laptop registration and search")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
