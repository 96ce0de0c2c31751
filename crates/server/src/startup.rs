use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use service::auth::{
    avatar::Gravatar, credentials::JwtCredentials, repo::seaorm::SeaOrmUserRepository, repository::UserRepository,
    AccessGuard, UserRegistry,
};
use service::posts::{repo::seaorm::SeaOrmPostRepository, PostService};
use service::profiles::{repo::seaorm::SeaOrmProfileRepository, ProfileService};

use crate::errors::StartupError;
use crate::routes::{self, auth::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Config file first, then environment-only fallback.
pub fn load_config() -> Result<AppConfig, StartupError> {
    match AppConfig::load_and_validate() {
        Ok(cfg) => Ok(cfg),
        Err(file_err) => {
            warn!(error = %file_err, "config file unusable, falling back to environment");
            AppConfig::from_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))
        }
    }
}

/// Wire the SeaORM repositories and the credential/avatar services into router state.
pub fn build_state(db: DatabaseConnection, cfg: &AppConfig) -> ServerState {
    let users: Arc<dyn UserRepository> = Arc::new(SeaOrmUserRepository { db: db.clone() });
    let credentials = Arc::new(JwtCredentials::new(&cfg.auth.jwt_secret, cfg.auth.token_ttl_hours));
    let avatars = Arc::new(Gravatar::new(cfg.avatar.size, &cfg.avatar.rating, &cfg.avatar.default_image));
    ServerState {
        users: UserRegistry::new(users.clone(), credentials.clone(), avatars),
        posts: PostService::new(Arc::new(SeaOrmPostRepository { db: db.clone() }), users.clone()),
        profiles: ProfileService::new(Arc::new(SeaOrmProfileRepository { db }), users),
        guard: AccessGuard::new(credentials),
    }
}

pub fn build_app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

/// Public entry: connect, migrate, build the app and serve until Ctrl+C
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await.map_err(anyhow::Error::from)?;
    info!("migrations applied");

    let app = build_app(build_state(db, &cfg));

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))?;
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(anyhow::Error::from)?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await
        .map_err(anyhow::Error::from)?;
    Ok(())
}
