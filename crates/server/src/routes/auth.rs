use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
    Extension, Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::{info, warn};
use uuid::Uuid;

use service::auth::domain::{AuthToken, LoginInput, RegisterInput, User};
use service::auth::{AccessGuard, UserRegistry};
use service::posts::PostService;
use service::profiles::ProfileService;

use crate::errors::JsonApiError;
use crate::extract::JsonBody;

pub const TOKEN_HEADER: &str = "x-auth-token";
pub const TOKEN_COOKIE: &str = "auth_token";

#[derive(Clone)]
pub struct ServerState {
    pub users: UserRegistry,
    pub posts: PostService,
    pub profiles: ProfileService,
    pub guard: AccessGuard,
}

/// Authenticated caller, placed in request extensions by [`require_subject`].
#[derive(Debug, Clone, Copy)]
pub struct Subject(pub Uuid);

/// Token lookup order: `Authorization: Bearer`, `x-auth-token`, `auth_token` cookie.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(t) = bearer {
        return Some(t.to_string());
    }
    let custom = headers
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(t) = custom {
        return Some(t.to_string());
    }
    CookieJar::from_headers(headers)
        .get(TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
}

/// 鉴权中间件：解析 token，失败返回 401；成功后把 Subject 注入 request 扩展
pub async fn require_subject(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let token = extract_token(req.headers());
    let subject = state.guard.authenticate(token.as_deref()).inspect_err(|_| {
        warn!(path = %req.uri().path(), "request rejected by access guard");
    })?;
    req.extensions_mut().insert(Subject(subject));
    Ok(next.run(req).await)
}

#[utoipa::path(post, path = "/users", tag = "auth", request_body = crate::openapi::RegisterRequest,
    responses((status = 200, description = "Registered user", body = crate::openapi::UserDoc), (status = 400, description = "Validation failed or user exists")))]
pub async fn register(State(state): State<ServerState>, JsonBody(input): JsonBody<RegisterInput>) -> Result<Json<User>, JsonApiError> {
    let user = state.users.register(input).await?;
    Ok(Json(user))
}

#[utoipa::path(post, path = "/auth", tag = "auth", request_body = crate::openapi::LoginRequest,
    responses((status = 200, description = "Token issued", body = crate::openapi::TokenDoc), (status = 400, description = "Invalid credentials")))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    JsonBody(input): JsonBody<LoginInput>,
) -> Result<(CookieJar, Json<AuthToken>), JsonApiError> {
    let token = state.users.login(input).await?;
    let mut cookie = Cookie::new(TOKEN_COOKIE, token.token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    Ok((jar.add(cookie), Json(token)))
}

#[utoipa::path(get, path = "/auth", tag = "auth",
    responses((status = 200, description = "Current user", body = crate::openapi::UserDoc), (status = 401, description = "Unauthorized")))]
pub async fn current_user(
    State(state): State<ServerState>,
    Extension(Subject(subject)): Extension<Subject>,
) -> Result<Json<User>, JsonApiError> {
    let user = state.users.get(subject).await?;
    info!(user_id = %user.id, "current user resolved");
    Ok(Json(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_wins_over_header_and_cookie() {
        let mut h = HeaderMap::new();
        h.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer aaa"));
        h.insert(TOKEN_HEADER, HeaderValue::from_static("bbb"));
        h.insert(header::COOKIE, HeaderValue::from_static("auth_token=ccc"));
        assert_eq!(extract_token(&h).as_deref(), Some("aaa"));
    }

    #[test]
    fn falls_back_to_header_then_cookie() {
        let mut h = HeaderMap::new();
        h.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic Zm9v"));
        h.insert(header::COOKIE, HeaderValue::from_static("theme=dark; auth_token=ccc"));
        assert_eq!(extract_token(&h).as_deref(), Some("ccc"));

        h.insert(TOKEN_HEADER, HeaderValue::from_static("bbb"));
        assert_eq!(extract_token(&h).as_deref(), Some("bbb"));
    }

    #[test]
    fn nothing_supplied() {
        assert!(extract_token(&HeaderMap::new()).is_none());
    }
}
