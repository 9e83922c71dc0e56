// --- File: crates/services/webinarsync_backend/src/app_state.rs ---
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Router};
use webinarsync_config::AppConfig;
use webinarsync_db::{DbClient, SqlParticipantRepository};
use webinarsync_zoom::ZoomClient;

/// State shared by the service's own routes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DbClient,
}

async fn welcome() -> &'static str {
    "Welcome to the webinarsync API!"
}

async fn health(State(state): State<AppState>) -> (StatusCode, &'static str) {
    if state.db.is_healthy().await {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "database unavailable")
    }
}

/// Everything served under `/api`.
pub fn api_router(state: AppState, zoom_client: Arc<ZoomClient>) -> Router {
    let repository = Arc::new(SqlParticipantRepository::new(state.db.clone()));
    let attendance_router =
        webinarsync_attendance::routes(state.config.clone(), repository, zoom_client);

    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health))
        .with_state(state)
        .merge(attendance_router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use std::collections::HashMap;
    use std::time::Duration;
    use tower::ServiceExt;
    use webinarsync_config::{ServerConfig, ZoomAccountConfig, ZoomConfig};

    async fn state(use_zoom: bool) -> (AppState, std::path::PathBuf) {
        let path = std::env::temp_dir().join(format!("webinarsync-backend-{}.db", uuid::Uuid::new_v4()));
        let db = DbClient::from_url(&format!("sqlite://{}", path.display()))
            .await
            .unwrap();
        SqlParticipantRepository::new(db.clone())
            .init_schema()
            .await
            .unwrap();

        let mut accounts = HashMap::new();
        accounts.insert(
            "main".to_string(),
            ZoomAccountConfig {
                api_key: "key".into(),
                secret_key: "secret".into(),
                base_url: "http://127.0.0.1:1".into(),
            },
        );
        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 0,
            },
            use_zoom,
            database: None,
            zoom: Some(ZoomConfig {
                verification_token: Some("xyz".into()),
                webinar_custom_field: Some("custom_12".into()),
                accounts,
                default_account: Some("main".into()),
                ..Default::default()
            }),
            logging: Default::default(),
        };
        (
            AppState {
                config: Arc::new(config),
                db,
            },
            path,
        )
    }

    fn zoom_client() -> Arc<ZoomClient> {
        Arc::new(ZoomClient::without_retry(Duration::from_secs(1)).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (state, path) = state(false).await;
        let response = api_router(state, zoom_client())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_webhook_is_mounted_on_sql_store() {
        let (state, path) = state(true).await;
        // No event is linked to webinar 42 in the empty database.
        let request = Request::post("/zoom/webinar-attendance?verification_token=xyz&event_id=1")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"event":"webinar.ended","payload":{"object":{"id":42}}}"#))
            .unwrap();

        let response = api_router(state, zoom_client()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        std::fs::remove_file(path).ok();
    }
}
