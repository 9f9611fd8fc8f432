use std::sync::Arc;

use altolink_api::{router, AppContext};
use altolink_core::AgencyRepository;
use altolink_domain::{Agency, AltoConfig, AltoEnvironment, Config, DatabaseConfig, ServerConfig};
use altolink_infra::SqliteAgencyRepository;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use tempfile::TempDir;
use tower::ServiceExt;
use wiremock::MockServer;

/// Router plus the state a test needs to seed and inspect.
pub struct TestApp {
    pub ctx: Arc<AppContext>,
    pub server: MockServer,
    _temp_dir: TempDir,
}

impl TestApp {
    /// Fresh database and a mock partner server for `environment`.
    pub async fn new(environment: AltoEnvironment) -> Self {
        let temp_dir = TempDir::new().expect("failed to create temporary database directory");
        let server = MockServer::start().await;

        let mut alto = AltoConfig::new(environment, "client-id", "client-secret");
        alto.sandbox_auth_url = format!("{}/oauth/token", server.uri());
        alto.production_auth_url = format!("{}/oauth/token", server.uri());
        alto.sandbox_api_base = format!("{}/sandbox/v1", server.uri());
        alto.production_api_base = format!("{}/v1", server.uri());

        let config = Config {
            database: DatabaseConfig {
                path: temp_dir.path().join("data").join("altolink.db").to_string_lossy().into_owned(),
                pool_size: 2,
            },
            alto,
            server: ServerConfig::default(),
        };

        let ctx = Arc::new(AppContext::new(config).expect("context should initialise"));
        Self { ctx, server, _temp_dir: temp_dir }
    }

    pub fn router(&self) -> Router {
        router(Arc::clone(&self.ctx))
    }

    pub async fn seed(&self, agency: Agency) {
        SqliteAgencyRepository::new(Arc::clone(&self.ctx.db))
            .insert(agency)
            .await
            .expect("agency should insert");
    }

    pub async fn send(&self, request: Request<Body>) -> (Response<Body>, serde_json::Value) {
        let response = self.router().oneshot(request).await.expect("router is infallible");
        let (parts, body) = response.into_parts();
        let bytes = axum::body::to_bytes(body, usize::MAX).await.expect("body should read");
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };
        (Response::from_parts(parts, Body::empty()), json)
    }
}

/// Agency with the given Alto settings.
pub fn agency(id: &str, agency_ref: Option<&str>, enabled: bool) -> Agency {
    Agency {
        agency_ref: agency_ref.map(str::to_string),
        alto_production_enabled: enabled,
        ..Agency::new(id, format!("Agency {id}"), id)
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request should build")
}

pub fn patch_settings(id: &str, actor: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("PATCH")
        .uri(format!("/admin/alto-agencies/{id}/settings"))
        .header("content-type", "application/json");
    if let Some(actor) = actor {
        builder = builder.header("x-admin-actor", actor);
    }
    builder.body(Body::from(body.to_string())).expect("request should build")
}
