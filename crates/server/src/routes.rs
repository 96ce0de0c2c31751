use axum::{
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

pub mod auth;
pub mod posts;
pub mod profile;

use crate::openapi::ApiDoc;
use auth::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: public reads and session routes, then everything
/// behind the access guard.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/users", post(auth::register))
        .route("/auth", post(auth::login))
        .route("/profile", get(profile::list))
        .route("/profile/user/:user_id", get(profile::by_user));

    let protected = Router::new()
        .route("/auth", get(auth::current_user))
        .route("/posts", post(posts::create).get(posts::list))
        .route("/posts/:id", get(posts::get).delete(posts::delete))
        .route("/posts/like/:id", put(posts::like))
        .route("/posts/unlike/:id", put(posts::unlike))
        .route("/posts/comment/:id", post(posts::add_comment))
        .route("/posts/comment/:id/:comment_id", delete(posts::remove_comment))
        .route("/profile/me", get(profile::me))
        .route("/profile", post(profile::upsert).delete(profile::delete))
        .route("/profile/experience", put(profile::add_experience))
        .route("/profile/experience/:id", delete(profile::remove_experience))
        .route("/profile/education", put(profile::add_education))
        .route("/profile/education/:id", delete(profile::remove_education))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_subject));

    public
        .merge(protected)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
