use axum::{
    extract::{Path, State},
    Extension, Json,
};
use common::types::Ack;

use service::profiles::domain::{EducationInput, ExperienceInput, Profile, ProfileFields};

use super::auth::{ServerState, Subject};
use super::posts::parse_id;
use crate::errors::JsonApiError;
use crate::extract::JsonBody;

#[utoipa::path(get, path = "/profile/me", tag = "profile",
    responses((status = 200, description = "Own profile", body = crate::openapi::ProfileDoc), (status = 404, description = "There is no profile for this user")))]
pub async fn me(
    State(state): State<ServerState>,
    Extension(Subject(subject)): Extension<Subject>,
) -> Result<Json<Profile>, JsonApiError> {
    Ok(Json(state.profiles.me(subject).await?))
}

#[utoipa::path(post, path = "/profile", tag = "profile", request_body = crate::openapi::ProfileRequest,
    responses((status = 200, description = "Saved profile", body = crate::openapi::ProfileDoc), (status = 400, description = "Status or skills missing")))]
pub async fn upsert(
    State(state): State<ServerState>,
    Extension(Subject(subject)): Extension<Subject>,
    JsonBody(fields): JsonBody<ProfileFields>,
) -> Result<Json<Profile>, JsonApiError> {
    Ok(Json(state.profiles.upsert(subject, fields).await?))
}

#[utoipa::path(get, path = "/profile", tag = "profile", responses((status = 200, description = "All profiles", body = [crate::openapi::ProfileDoc])))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<Profile>>, JsonApiError> {
    Ok(Json(state.profiles.list_all().await?))
}

#[utoipa::path(get, path = "/profile/user/{user_id}", tag = "profile", params(("user_id" = String, Path, description = "User id")),
    responses((status = 200, description = "Profile", body = crate::openapi::ProfileDoc), (status = 404, description = "Profile not found")))]
pub async fn by_user(State(state): State<ServerState>, Path(user_id): Path<String>) -> Result<Json<Profile>, JsonApiError> {
    let user_id = parse_id(&user_id, "Profile")?;
    Ok(Json(state.profiles.get_by_user_id(user_id).await?))
}

#[utoipa::path(delete, path = "/profile", tag = "profile", responses((status = 200, description = "User deleted")))]
pub async fn delete(
    State(state): State<ServerState>,
    Extension(Subject(subject)): Extension<Subject>,
) -> Result<Json<Ack>, JsonApiError> {
    state.profiles.delete(subject).await?;
    Ok(Json(Ack::new("User deleted")))
}

#[utoipa::path(put, path = "/profile/experience", tag = "profile", request_body = crate::openapi::ExperienceRequest,
    responses((status = 200, description = "Updated profile", body = crate::openapi::ProfileDoc), (status = 400, description = "Title, company and from date are required")))]
pub async fn add_experience(
    State(state): State<ServerState>,
    Extension(Subject(subject)): Extension<Subject>,
    JsonBody(input): JsonBody<ExperienceInput>,
) -> Result<Json<Profile>, JsonApiError> {
    Ok(Json(state.profiles.add_experience(subject, input).await?))
}

#[utoipa::path(delete, path = "/profile/experience/{id}", tag = "profile", params(("id" = String, Path, description = "Experience entry id")),
    responses((status = 200, description = "Updated profile", body = crate::openapi::ProfileDoc), (status = 404, description = "Experience not found")))]
pub async fn remove_experience(
    State(state): State<ServerState>,
    Extension(Subject(subject)): Extension<Subject>,
    Path(id): Path<String>,
) -> Result<Json<Profile>, JsonApiError> {
    let id = parse_id(&id, "Experience")?;
    Ok(Json(state.profiles.remove_experience(subject, id).await?))
}

#[utoipa::path(put, path = "/profile/education", tag = "profile", request_body = crate::openapi::EducationRequest,
    responses((status = 200, description = "Updated profile", body = crate::openapi::ProfileDoc), (status = 400, description = "School, degree, field of study and from date are required")))]
pub async fn add_education(
    State(state): State<ServerState>,
    Extension(Subject(subject)): Extension<Subject>,
    JsonBody(input): JsonBody<EducationInput>,
) -> Result<Json<Profile>, JsonApiError> {
    Ok(Json(state.profiles.add_education(subject, input).await?))
}

#[utoipa::path(delete, path = "/profile/education/{id}", tag = "profile", params(("id" = String, Path, description = "Education entry id")),
    responses((status = 200, description = "Updated profile", body = crate::openapi::ProfileDoc), (status = 404, description = "Education not found")))]
pub async fn remove_education(
    State(state): State<ServerState>,
    Extension(Subject(subject)): Extension<Subject>,
    Path(id): Path<String>,
) -> Result<Json<Profile>, JsonApiError> {
    let id = parse_id(&id, "Education")?;
    Ok(Json(state.profiles.remove_education(subject, id).await?))
}
