use std::net::SocketAddr;

use migration::MigratorTrait;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

const SECRET: &str = "test-secret";

struct TestApp {
    base_url: String,
}

/// Postgres-backed server on an ephemeral port; `None` when no database is configured.
async fn start_server() -> anyhow::Result<Option<TestApp>> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL missing or SKIP_DB_TESTS set; skip e2e tests");
        return Ok(None);
    }
    std::env::set_var("CONFIG_PATH", "/nonexistent-config-for-tests.toml");
    std::env::set_var("JWT_SECRET", SECRET);
    let cfg = configs::AppConfig::from_env()?;

    let db = models::db::connect_with_config(&cfg.database).await?;
    if let Err(e) = migration::Migrator::up(&db, None).await { eprintln!("migrations notice: {}", e); }

    let app = server::startup::build_app(server::startup::build_state(db, &cfg));
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });
    Ok(Some(TestApp { base_url: format!("http://{}:{}", addr.ip(), addr.port()) }))
}

async fn sign_up(c: &reqwest::Client, app: &TestApp) -> anyhow::Result<(String, String)> {
    let email = format!("user_{}@example.com", Uuid::new_v4());
    let res = c.post(format!("{}/users", app.base_url))
        .json(&json!({"name": "Tester", "email": email, "password": "S3curePass!"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let user: Value = res.json().await?;
    let res = c.post(format!("{}/auth", app.base_url))
        .json(&json!({"email": email, "password": "S3curePass!"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let tok: Value = res.json().await?;
    Ok((user["id"].as_str().unwrap_or_default().to_string(), tok["token"].as_str().unwrap_or_default().to_string()))
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let Some(app) = start_server().await? else { return Ok(()) };
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_expired_token_unauthorized() -> anyhow::Result<()> {
    let Some(app) = start_server().await? else { return Ok(()) };
    use jsonwebtoken::{encode, EncodingKey, Header};
    #[derive(serde::Serialize)]
    struct Claims { sub: String, exp: usize, iat: usize }
    let now = std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH)?.as_secs() as usize;
    let claims = Claims { sub: Uuid::new_v4().to_string(), exp: now.saturating_sub(3600), iat: now.saturating_sub(7200) };
    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes()))?;

    let res = reqwest::Client::new()
        .get(format!("{}/posts", app.base_url))
        .header("Authorization", format!("Bearer {}", token))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn e2e_post_like_and_profile_flow() -> anyhow::Result<()> {
    let Some(app) = start_server().await? else { return Ok(()) };
    let c = reqwest::Client::new();
    let (_, a) = sign_up(&c, &app).await?;
    let (b_id, b) = sign_up(&c, &app).await?;

    let res = c.post(format!("{}/profile", app.base_url)).bearer_auth(&a)
        .json(&json!({"status": "Developer", "skills": "go, rust", "twitter": "https://twitter.com/t"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let profile: Value = res.json().await?;
    assert_eq!(profile["skills"], json!(["go", "rust"]));
    let res = c.post(format!("{}/profile", app.base_url)).bearer_auth(&a)
        .json(&json!({"bio": "hello"}))
        .send().await?;
    let profile: Value = res.json().await?;
    assert_eq!(profile["bio"], "hello");
    assert_eq!(profile["social"]["twitter"], "https://twitter.com/t");

    let post: Value = c.post(format!("{}/posts", app.base_url)).bearer_auth(&a)
        .json(&json!({"text": "hello"}))
        .send().await?.json().await?;
    let post_id = post["id"].as_str().unwrap_or_default().to_string();

    let res = c.put(format!("{}/posts/like/{}", app.base_url, post_id)).bearer_auth(&b).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let likes: Value = res.json().await?;
    assert_eq!(likes, json!([{"user_id": b_id}]));
    let res = c.put(format!("{}/posts/like/{}", app.base_url, post_id)).bearer_auth(&b).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = c.delete(format!("{}/posts/{}", app.base_url, post_id)).bearer_auth(&a).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let res = c.get(format!("{}/posts/{}", app.base_url, post_id)).bearer_auth(&a).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let res = c.delete(format!("{}/profile", app.base_url)).bearer_auth(&a).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    Ok(())
}
