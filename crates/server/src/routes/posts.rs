use axum::{
    extract::{Path, State},
    Extension, Json,
};
use common::types::Ack;
use uuid::Uuid;

use service::errors::ServiceError;
use service::posts::domain::{Comment, CommentInput, Like, Post, PostInput};

use super::auth::{ServerState, Subject};
use crate::errors::JsonApiError;
use crate::extract::JsonBody;

/// Ids that do not parse can never match a row, so they are reported as missing.
pub(crate) fn parse_id(raw: &str, entity: &str) -> Result<Uuid, JsonApiError> {
    Uuid::parse_str(raw).map_err(|_| ServiceError::not_found(entity).into())
}

#[utoipa::path(post, path = "/posts", tag = "posts", request_body = crate::openapi::TextRequest,
    responses((status = 200, description = "Created post", body = crate::openapi::PostDoc), (status = 400, description = "Text is required")))]
pub async fn create(
    State(state): State<ServerState>,
    Extension(Subject(subject)): Extension<Subject>,
    JsonBody(input): JsonBody<PostInput>,
) -> Result<Json<Post>, JsonApiError> {
    Ok(Json(state.posts.create(subject, input).await?))
}

#[utoipa::path(get, path = "/posts", tag = "posts", responses((status = 200, description = "Posts, newest first", body = [crate::openapi::PostDoc])))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Post>>, JsonApiError> {
    Ok(Json(state.posts.list().await?))
}

#[utoipa::path(get, path = "/posts/{id}", tag = "posts", params(("id" = String, Path, description = "Post id")),
    responses((status = 200, description = "Post", body = crate::openapi::PostDoc), (status = 404, description = "Post not found")))]
pub async fn get(State(state): State<ServerState>, Path(id): Path<String>) -> Result<Json<Post>, JsonApiError> {
    let id = parse_id(&id, "Post")?;
    Ok(Json(state.posts.get(id).await?))
}

#[utoipa::path(delete, path = "/posts/{id}", tag = "posts", params(("id" = String, Path, description = "Post id")),
    responses((status = 200, description = "Post removed"), (status = 401, description = "User not authorized"), (status = 404, description = "Post not found")))]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(Subject(subject)): Extension<Subject>,
    Path(id): Path<String>,
) -> Result<Json<Ack>, JsonApiError> {
    let id = parse_id(&id, "Post")?;
    state.posts.delete(id, subject).await?;
    Ok(Json(Ack::new("Post removed")))
}

#[utoipa::path(put, path = "/posts/like/{id}", tag = "posts", params(("id" = String, Path, description = "Post id")),
    responses((status = 200, description = "Like set", body = [crate::openapi::LikeDoc]), (status = 400, description = "Post already liked"), (status = 404, description = "Post not found")))]
pub async fn like(
    State(state): State<ServerState>,
    Extension(Subject(subject)): Extension<Subject>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Like>>, JsonApiError> {
    let id = parse_id(&id, "Post")?;
    Ok(Json(state.posts.like(id, subject).await?))
}

#[utoipa::path(put, path = "/posts/unlike/{id}", tag = "posts", params(("id" = String, Path, description = "Post id")),
    responses((status = 200, description = "Like set", body = [crate::openapi::LikeDoc]), (status = 400, description = "Post has not yet been liked"), (status = 404, description = "Post not found")))]
pub async fn unlike(
    State(state): State<ServerState>,
    Extension(Subject(subject)): Extension<Subject>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Like>>, JsonApiError> {
    let id = parse_id(&id, "Post")?;
    Ok(Json(state.posts.unlike(id, subject).await?))
}

#[utoipa::path(post, path = "/posts/comment/{id}", tag = "posts", params(("id" = String, Path, description = "Post id")), request_body = crate::openapi::TextRequest,
    responses((status = 200, description = "Comment list", body = [crate::openapi::CommentDoc]), (status = 400, description = "Text is required"), (status = 404, description = "Post not found")))]
pub async fn add_comment(
    State(state): State<ServerState>,
    Extension(Subject(subject)): Extension<Subject>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<CommentInput>,
) -> Result<Json<Vec<Comment>>, JsonApiError> {
    let id = parse_id(&id, "Post")?;
    Ok(Json(state.posts.add_comment(id, subject, input).await?))
}

#[utoipa::path(delete, path = "/posts/comment/{id}/{comment_id}", tag = "posts",
    params(("id" = String, Path, description = "Post id"), ("comment_id" = String, Path, description = "Comment id")),
    responses((status = 200, description = "Comment list", body = [crate::openapi::CommentDoc]), (status = 401, description = "User not authorized"), (status = 404, description = "Comment does not exist")))]
pub async fn remove_comment(
    State(state): State<ServerState>,
    Extension(Subject(subject)): Extension<Subject>,
    Path((id, comment_id)): Path<(String, String)>,
) -> Result<Json<Vec<Comment>>, JsonApiError> {
    let id = parse_id(&id, "Post")?;
    let comment_id = Uuid::parse_str(&comment_id)
        .map_err(|_| JsonApiError::from(ServiceError::NotFound("Comment does not exist".into())))?;
    Ok(Json(state.posts.remove_comment(id, comment_id, subject).await?))
}
