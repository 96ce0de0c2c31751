//! OpenAPI document. The schema types mirror the JSON shapes of the service domain.

use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct RegisterRequest { pub name: String, pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct TokenDoc { pub token: String }

#[derive(ToSchema)]
pub struct UserDoc { pub id: Uuid, pub name: String, pub email: String, pub avatar: String, pub created_at: String }

#[derive(ToSchema)]
pub struct TextRequest { pub text: String }

#[derive(ToSchema)]
pub struct LikeDoc { pub user_id: Uuid }

#[derive(ToSchema)]
pub struct CommentDoc {
    pub id: Uuid,
    pub text: String,
    pub user_id: Uuid,
    pub name: String,
    pub avatar: String,
    pub created_at: String,
}

#[derive(ToSchema)]
pub struct PostDoc {
    pub id: Uuid,
    pub text: String,
    pub user_id: Uuid,
    pub name: String,
    pub avatar: String,
    pub created_at: String,
    pub likes: Vec<LikeDoc>,
    pub comments: Vec<CommentDoc>,
}

#[derive(ToSchema)]
pub struct ProfileRequest {
    pub status: Option<String>,
    /// Comma-joined
    pub skills: Option<String>,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub github_username: Option<String>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

#[derive(ToSchema)]
pub struct ExperienceRequest {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    /// YYYY-MM-DD
    pub from: String,
    pub to: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

#[derive(ToSchema)]
pub struct EducationRequest {
    pub school: String,
    pub degree: String,
    pub field_of_study: String,
    pub from: String,
    pub to: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

#[derive(ToSchema)]
pub struct ExperienceDoc {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub from: String,
    pub to: Option<String>,
    pub current: bool,
    pub description: Option<String>,
}

#[derive(ToSchema)]
pub struct EducationDoc {
    pub id: Uuid,
    pub school: String,
    pub degree: String,
    pub field_of_study: String,
    pub from: String,
    pub to: Option<String>,
    pub current: bool,
    pub description: Option<String>,
}

#[derive(ToSchema)]
pub struct ProfileOwnerDoc { pub id: Uuid, pub name: String, pub avatar: String }

#[derive(ToSchema)]
pub struct ProfileDoc {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user: Option<ProfileOwnerDoc>,
    pub status: String,
    pub skills: Vec<String>,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub github_username: Option<String>,
    pub social: std::collections::BTreeMap<String, String>,
    pub experience: Vec<ExperienceDoc>,
    pub education: Vec<EducationDoc>,
    pub created_at: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::current_user,
        crate::routes::posts::create,
        crate::routes::posts::list,
        crate::routes::posts::get,
        crate::routes::posts::delete,
        crate::routes::posts::like,
        crate::routes::posts::unlike,
        crate::routes::posts::add_comment,
        crate::routes::posts::remove_comment,
        crate::routes::profile::me,
        crate::routes::profile::upsert,
        crate::routes::profile::list,
        crate::routes::profile::by_user,
        crate::routes::profile::delete,
        crate::routes::profile::add_experience,
        crate::routes::profile::remove_experience,
        crate::routes::profile::add_education,
        crate::routes::profile::remove_education,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            TokenDoc,
            UserDoc,
            TextRequest,
            LikeDoc,
            CommentDoc,
            PostDoc,
            ProfileRequest,
            ExperienceRequest,
            EducationRequest,
            ExperienceDoc,
            EducationDoc,
            ProfileOwnerDoc,
            ProfileDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "posts"),
        (name = "profile")
    )
)]
pub struct ApiDoc;
