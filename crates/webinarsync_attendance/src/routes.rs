// --- File: crates/webinarsync_attendance/src/routes.rs ---

use std::sync::Arc;

use axum::{routing::post, Router};
use tracing::info;
use webinarsync_config::AppConfig;
use webinarsync_db::RegistrationStore;
use webinarsync_zoom::AbsenteeSource;

use crate::handlers::handle_webinar_attendance;
use crate::logic::AttendanceReconciler;

pub const WEBINAR_ATTENDANCE_PATH: &str = "/zoom/webinar-attendance";

/// Router with the Zoom webhook, or an empty one when `use_zoom` is off or
/// the `zoom` section is missing.
pub fn routes<S, A>(config: Arc<AppConfig>, store: Arc<S>, source: Arc<A>) -> Router
where
    S: RegistrationStore + Send + Sync + 'static,
    A: AbsenteeSource + Send + Sync + 'static,
{
    let zoom = match config.zoom.as_ref() {
        Some(zoom) if config.use_zoom => zoom.clone(),
        _ => {
            info!("Zoom webhook disabled (use_zoom=false or no zoom section)");
            return Router::new();
        }
    };

    info!("Adding {} route", WEBINAR_ATTENDANCE_PATH);
    let reconciler = Arc::new(AttendanceReconciler::new(store, source, zoom));

    Router::new()
        .route(
            WEBINAR_ATTENDANCE_PATH,
            post(handle_webinar_attendance::<S, A>),
        )
        .with_state(reconciler)
}
