//! oilfinder HTTP API
//!
//! JSON endpoints over a shared, read-only [`LookupContext`]: make/model/year
//! listings, record details, suggestions, search and product links.

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{Path as AxumPath, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use oilfinder::{DetailRecord, FluidKind, LookupContext, Recommendation};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use utoipa::{IntoParams, OpenApi, ToSchema};
use utoipa_scalar::{Scalar, Servable};

// =============================================================================
// App State
// =============================================================================

pub struct AppState {
    pub ctx: LookupContext,
}

// =============================================================================
// Errors
// =============================================================================

/// Request failure rendered as `{"error": "..."}`
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    NotLoaded,
    BadRequest(String),
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::NotLoaded | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::NotFound(msg) | ApiError::BadRequest(msg) | ApiError::Internal(msg) => {
                msg.clone()
            }
            ApiError::NotLoaded => "Car data not loaded".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.message();
        if status.is_server_error() {
            tracing::error!(%status, %error, "request failed");
        } else {
            tracing::debug!(%status, %error, "request rejected");
        }
        (status, Json(ErrorResponse { error })).into_response()
    }
}

// =============================================================================
// OpenAPI Schema
// =============================================================================

#[derive(OpenApi)]
#[openapi(
    info(
        title = "oilfinder API",
        description = "Vehicle lubricant recommendations and product links",
        version = "0.3.0",
        license(name = "BSD-2-Clause"),
    ),
    paths(
        health,
        list_makes,
        list_models,
        list_years,
        get_details,
        search_details,
        suggest,
        recommendations,
        product_link,
        catalog_data,
    ),
    components(schemas(
        HealthResponse,
        ErrorResponse,
        QueryRequest,
        SuggestResponse,
        RecommendationHit,
        ProductResponse,
        DetailRecord,
        Recommendation,
        FluidKind,
    ))
)]
pub struct ApiDoc;

// =============================================================================
// Types
// =============================================================================

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub records: usize,
    pub fallback: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QueryRequest {
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuggestResponse {
    pub makes: Vec<String>,
    pub models: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RecommendationHit {
    pub make: String,
    pub model: String,
    pub year_range: String,
    pub title: String,
    pub record: DetailRecord,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ProductQuery {
    /// Fluid label, e.g. `XL20W50`
    pub fluid: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub fluid: String,
    pub url: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is healthy", body = HealthResponse)),
    tag = "System"
)]
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        records: state.ctx.index().len(),
        fallback: state.ctx.is_fallback(),
    })
}

#[utoipa::path(
    get,
    path = "/api/makes",
    responses((status = 200, description = "Sorted make names", body = Vec<String>)),
    tag = "Catalog"
)]
async fn list_makes(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.ctx.makes())
}

#[utoipa::path(
    get,
    path = "/api/models/{make}",
    params(("make" = String, Path, description = "Make name")),
    responses((status = 200, description = "Sorted model names, empty for unknown makes", body = Vec<String>)),
    tag = "Catalog"
)]
async fn list_models(
    State(state): State<Arc<AppState>>,
    AxumPath(make): AxumPath<String>,
) -> Json<Vec<String>> {
    Json(state.ctx.models(&make))
}

#[utoipa::path(
    get,
    path = "/api/years/{make}/{model}",
    params(
        ("make" = String, Path, description = "Make name"),
        ("model" = String, Path, description = "Model name, percent-encoded"),
    ),
    responses((status = 200, description = "Sorted year ranges, empty when unknown", body = Vec<String>)),
    tag = "Catalog"
)]
async fn list_years(
    State(state): State<Arc<AppState>>,
    AxumPath((make, model)): AxumPath<(String, String)>,
) -> Json<Vec<String>> {
    Json(state.ctx.years(&make, &model))
}

#[utoipa::path(
    get,
    path = "/api/details/{make}/{model}/{year}",
    params(
        ("make" = String, Path, description = "Make name"),
        ("model" = String, Path, description = "Model name, percent-encoded"),
        ("year" = String, Path, description = "Year range key"),
    ),
    responses(
        (status = 200, description = "Record with links normalized", body = DetailRecord),
        (status = 404, description = "No such record", body = ErrorResponse),
        (status = 500, description = "No catalog loaded", body = ErrorResponse)
    ),
    tag = "Catalog"
)]
async fn get_details(
    State(state): State<Arc<AppState>>,
    AxumPath((make, model, year)): AxumPath<(String, String, String)>,
) -> Result<Json<DetailRecord>, ApiError> {
    if state.ctx.is_fallback() {
        return Err(ApiError::NotLoaded);
    }

    let record = state.ctx.record(&make, &model, &year).ok_or_else(|| {
        tracing::warn!(%make, %model, %year, "details not found");
        ApiError::NotFound("Details not found or invalid format".to_string())
    })?;

    Ok(Json(record.with_normalized_links()))
}

#[utoipa::path(
    post,
    path = "/api/details",
    request_body = QueryRequest,
    responses((status = 200, description = "Matching records in catalog order, links normalized", body = Vec<DetailRecord>)),
    tag = "Search"
)]
async fn search_details(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QueryRequest>,
) -> Json<Vec<DetailRecord>> {
    let records = state
        .ctx
        .search(&req.query)
        .into_iter()
        .map(|entry| entry.record.with_normalized_links())
        .collect();
    Json(records)
}

#[utoipa::path(
    get,
    path = "/api/suggest/{query}",
    params(("query" = String, Path, description = "Partial make or model")),
    responses((status = 200, description = "Suggestion labels", body = SuggestResponse)),
    tag = "Search"
)]
async fn suggest(
    State(state): State<Arc<AppState>>,
    AxumPath(query): AxumPath<String>,
) -> Json<SuggestResponse> {
    let suggestions = state.ctx.suggest(&query);
    Json(SuggestResponse {
        makes: suggestions.make_labels(),
        models: suggestions.model_labels(),
    })
}

#[utoipa::path(
    post,
    path = "/api/recommendations",
    request_body = QueryRequest,
    responses((status = 200, description = "Matching records with product links", body = Vec<RecommendationHit>)),
    tag = "Search"
)]
async fn recommendations(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QueryRequest>,
) -> Json<Vec<RecommendationHit>> {
    let slugs = state.ctx.slugs();
    let hits = state
        .ctx
        .search(&req.query)
        .into_iter()
        .map(|entry| RecommendationHit {
            make: entry.make.to_string(),
            model: entry.model.to_string(),
            year_range: entry.year_range.to_string(),
            title: entry.record.title().to_string(),
            record: entry.record.with_normalized_links(),
            recommendations: entry.record.recommendations(slugs),
        })
        .collect();
    Json(hits)
}

#[utoipa::path(
    get,
    path = "/api/product",
    params(ProductQuery),
    responses(
        (status = 200, description = "Product or search link; null for consult labels", body = ProductResponse),
        (status = 400, description = "Missing fluid", body = ErrorResponse)
    ),
    tag = "Products"
)]
async fn product_link(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<ProductResponse>, ApiError> {
    let fluid = query
        .fluid
        .filter(|f| !f.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing fluid".to_string()))?;

    let url = state.ctx.product_url(&fluid);
    Ok(Json(ProductResponse { fluid, url }))
}

#[utoipa::path(
    get,
    path = "/data/data.json",
    responses(
        (status = 200, description = "Loaded catalog in the nested layout"),
        (status = 500, description = "No catalog loaded", body = ErrorResponse)
    ),
    tag = "Catalog"
)]
async fn catalog_data(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let catalog = state.ctx.catalog().ok_or(ApiError::NotLoaded)?;
    let body = serde_json::to_vec(catalog).map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

// =============================================================================
// Router
// =============================================================================

/// Build the application router.
///
/// When `static_dir` is given, unmatched paths are served from it.
pub fn router(state: Arc<AppState>, static_dir: Option<&Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/makes", get(list_makes))
        .route("/models/{make}", get(list_models))
        .route("/years/{make}/{model}", get(list_years))
        .route("/details", post(search_details))
        .route("/details/{make}/{model}/{year}", get(get_details))
        .route("/suggest/{query}", get(suggest))
        .route("/recommendations", post(recommendations))
        .route("/product", get(product_link));

    let app = Router::new()
        .route("/health", get(health))
        .route("/data/data.json", get(catalog_data))
        .nest("/api", api_routes)
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .with_state(state);

    let app = match static_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app,
    };

    app.layer(cors).layer(TraceLayer::new_for_http())
}
