// File: crates/services/webinarsync_backend/src/main.rs
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use webinarsync_common::{config_error, internal_error, logging, WebinarSyncError};
use webinarsync_config::{load_config, ZoomConfig};
use webinarsync_db::{DbClient, SqlParticipantRepository};
use webinarsync_zoom::ZoomClient;

mod app_state;

use app_state::{api_router, AppState};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        logging::log_error(&err, "webinarsync-backend stopped");
        eprintln!("webinarsync-backend: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), WebinarSyncError> {
    let config = Arc::new(load_config().map_err(config_error)?);
    // Held until shutdown so the file writer flushes.
    let _log_guard = logging::init_from_config(&config.logging);

    let db = DbClient::new(&config).await?;
    if config.database.as_ref().is_some_and(|d| d.init_schema) {
        SqlParticipantRepository::new(db.clone()).init_schema().await?;
    }

    let default_zoom = ZoomConfig::default();
    let zoom_client = Arc::new(ZoomClient::from_config(
        config.zoom.as_ref().unwrap_or(&default_zoom),
    )?);

    let state = AppState {
        config: config.clone(),
        db,
    };

    #[allow(unused_mut)] // mutated with the openapi feature
    let mut app = Router::new().nest("/api", api_router(state, zoom_client));

    #[cfg(feature = "openapi")]
    {
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;
        use webinarsync_attendance::doc::AttendanceApiDoc;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "webinarsync API",
                version = "0.1.0",
                description = "Zoom webinar attendance reconciliation"
            ),
            servers((url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(AttendanceApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");
        app = app.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc));
    }

    let app = app.layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| internal_error(format!("failed to bind {addr}: {e}")))?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| internal_error(format!("server error: {e}")))
}
