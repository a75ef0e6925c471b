//! Laptop endpoints

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tokio_stream::StreamExt;

use crate::{
    context::RequestContext,
    error::{AppError, AppResult},
    models::laptop::{
        CreateLaptopRequest, CreateLaptopResponse, Laptop, SearchLaptopRequest,
        SearchLaptopResponse,
    },
};

/// Content type of the search stream: one JSON document per line
pub const NDJSON: &str = "application/x-ndjson";

/// Create a laptop
#[utoipa::path(
    post,
    path = "/laptops",
    tag = "laptops",
    request_body = CreateLaptopRequest,
    params(("x-request-timeout-ms" = Option<u64>, Header, description = "Request deadline in milliseconds")),
    responses(
        (status = 201, description = "Laptop created", body = CreateLaptopResponse),
        (status = 400, description = "Invalid laptop ID or body", body = crate::error::ErrorResponse),
        (status = 409, description = "Laptop ID already exists", body = crate::error::ErrorResponse),
        (status = 504, description = "Deadline exceeded", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_laptop(
    State(state): State<crate::AppState>,
    ctx: RequestContext,
    Json(request): Json<CreateLaptopRequest>,
) -> AppResult<(StatusCode, Json<CreateLaptopResponse>)> {
    let id = state.services.laptops.create(&ctx, request.laptop).await?;
    Ok((StatusCode::CREATED, Json(CreateLaptopResponse { id })))
}

/// Get a laptop by ID
#[utoipa::path(
    get,
    path = "/laptops/{id}",
    tag = "laptops",
    params(("id" = String, Path, description = "Laptop UUID")),
    responses(
        (status = 200, description = "Laptop details", body = Laptop),
        (status = 404, description = "Laptop not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_laptop(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Laptop>> {
    let laptop = state.services.laptops.get_by_id(&id).await?;
    Ok(Json(laptop))
}

/// Search laptops
///
/// Streams matches as newline-delimited `SearchLaptopResponse` documents.
/// Closing the connection stops the search; a search that fails midway
/// aborts the body instead of ending it cleanly.
#[utoipa::path(
    post,
    path = "/laptops/search",
    tag = "laptops",
    request_body = SearchLaptopRequest,
    params(("x-request-timeout-ms" = Option<u64>, Header, description = "Request deadline in milliseconds")),
    responses(
        (status = 200, description = "Matching laptops, one JSON document per line", body = SearchLaptopResponse, content_type = "application/x-ndjson"),
        (status = 499, description = "Request canceled", body = crate::error::ErrorResponse),
        (status = 504, description = "Deadline exceeded", body = crate::error::ErrorResponse)
    )
)]
pub async fn search_laptops(
    State(state): State<crate::AppState>,
    ctx: RequestContext,
    Json(request): Json<SearchLaptopRequest>,
) -> AppResult<Response> {
    // Once the head is sent, a failure can only abort the body
    ctx.check()?;

    let lines = state
        .services
        .laptops
        .search_stream(ctx, request.filter)
        .map(|found| {
            let laptop = found?;
            let mut line = serde_json::to_vec(&SearchLaptopResponse { laptop })
                .map_err(|e| AppError::Internal(format!("cannot encode laptop: {}", e)))?;
            line.push(b'\n');
            Ok::<_, AppError>(line)
        });

    Ok(([(header::CONTENT_TYPE, NDJSON)], Body::from_stream(lines)).into_response())
}
