use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use common::captcha::CaptchaVerifier;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use serde_json::json;
use server::routes;
use server::state::AppState;
use service::rate_limit::RateLimiter;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

const ADMIN_KEY: &str = "test-admin-key";

struct TestApp {
    base_url: String,
    #[allow(dead_code)]
    db: DatabaseConnection,
}

async fn start_server(contact_limit: u32) -> anyhow::Result<TestApp> {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL missing; skip contact tests");
        return Err(anyhow::anyhow!("missing DATABASE_URL"));
    }
    let db = models::db::connect().await?;
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("migrations notice: {}", e);
    }

    let state = AppState {
        db: db.clone(),
        // No secret: captcha verification is a permissive no-op in tests
        captcha: CaptchaVerifier::new(None, Duration::from_secs(1))?,
        contact_limiter: RateLimiter::new(contact_limit, Duration::from_secs(3600), true),
        admin_api_key: Some(ADMIN_KEY.into()),
        media: configs::MediaConfig::default(),
    };
    let app: Router = routes::build_router(state, CorsLayer::very_permissive());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) =
            axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await
        {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url, db })
}

fn valid_payload(tag: &str) -> serde_json::Value {
    json!({
        "nombre": format!("Prueba {tag}"),
        "email": format!("prueba-{tag}@example.com"),
        "fechaNacimiento": "1990-05-20",
        "celular": "+57 300 123 4567",
        "telefono": "601 555 1234",
        "password": "Abcdefg1!",
        "confirmPassword": "Abcdefg1!",
        "terminos": true,
        "captcha": "token"
    })
}

#[tokio::test]
async fn submit_persists_and_admin_lists_without_hash() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let app = match start_server(10).await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let c = reqwest::Client::new();
    let tag_a = Uuid::new_v4().simple().to_string();
    let tag_b = Uuid::new_v4().simple().to_string();

    let res = c
        .post(format!("{}/contacto/", app.base_url))
        .header("user-agent", "contact-tests/1.0")
        .json(&valid_payload(&tag_a))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["ok"], true);
    assert!(body["message"].is_string());

    let res = c
        .post(format!("{}/contacto/", app.base_url))
        .json(&valid_payload(&tag_b))
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);

    // Listing requires the admin key
    let res = c.get(format!("{}/contacto/list/", app.base_url)).send().await?;
    assert_eq!(res.status(), reqwest::StatusCode::UNAUTHORIZED);
    let res = c
        .get(format!("{}/contacto/list/", app.base_url))
        .header("x-api-key", "wrong")
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::UNAUTHORIZED);

    let res = c
        .get(format!("{}/contacto/list/", app.base_url))
        .header("x-api-key", ADMIN_KEY)
        .send()
        .await?;
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let raw = res.text().await?;
    // The hash (and of course the plaintext) never leaves the server
    assert!(!raw.contains("password_hash"));
    assert!(!raw.contains("Abcdefg1!"));

    let rows: Vec<serde_json::Value> = serde_json::from_str(&raw)?;
    let idx_a = rows
        .iter()
        .position(|r| r["nombre"] == format!("Prueba {tag_a}"))
        .expect("first submission listed");
    let idx_b = rows
        .iter()
        .position(|r| r["nombre"] == format!("Prueba {tag_b}"))
        .expect("second submission listed");
    // newest first
    assert!(idx_b < idx_a);
    assert_eq!(rows[idx_a]["user_agent"], "contact-tests/1.0");
    assert_eq!(rows[idx_a]["consent_terminos"], true);

    Ok(())
}

#[tokio::test]
async fn invalid_fields_reported_per_field() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let app = match start_server(10).await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let c = reqwest::Client::new();

    let mut payload = valid_payload(&Uuid::new_v4().simple().to_string());
    payload["celular"] = json!("2001234567");
    payload["fechaNacimiento"] = json!("2020-01-01");
    payload["email"] = json!("no-es-correo");

    let res = c.post(format!("{}/contacto/", app.base_url)).json(&payload).send().await?;
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
    let errors: serde_json::Value = res.json().await?;
    for field in ["celular", "fechaNacimiento", "email"] {
        assert!(errors[field].is_array(), "expected error for {field}: {errors}");
    }

    Ok(())
}

#[tokio::test]
async fn honeypot_gets_generic_rejection() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let app = match start_server(10).await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let c = reqwest::Client::new();

    let mut payload = valid_payload(&Uuid::new_v4().simple().to_string());
    payload["website"] = json!("http://spam.example");

    let res = c.post(format!("{}/contacto/", app.base_url)).json(&payload).send().await?;
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
    let errors: serde_json::Value = res.json().await?;
    assert!(errors["non_field_errors"].is_array());
    assert_eq!(errors.as_object().map(|o| o.len()), Some(1), "no detail beyond the generic message");

    Ok(())
}

#[tokio::test]
async fn eleventh_submission_in_window_is_throttled() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let app = match start_server(10).await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let c = reqwest::Client::new();

    // Throttling happens before validation, so even empty payloads count
    for _ in 0..10 {
        let res = c.post(format!("{}/contacto/", app.base_url)).json(&json!({})).send().await?;
        assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
    }
    let res = c.post(format!("{}/contacto/", app.base_url)).json(&json!({})).send().await?;
    assert_eq!(res.status(), reqwest::StatusCode::TOO_MANY_REQUESTS);

    Ok(())
}
