//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    response::IntoResponse,
    routing::{get, patch, post, put},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::auth_middleware;
use crate::startup::AppState;

/// Headroom for the multipart framing around a banner image
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes(state.clone()))
        // Health check endpoint
        .route("/health", get(handlers::health::health_check))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        // Count every matched request by its route template
        .route_layer(middleware::from_fn(metrics::track_http_metrics))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// API v1 routes
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(public_routes(state.clone()))
        .merge(auth_routes(state.clone()))
        .merge(etour_routes(state.clone()))
        .merge(smos_routes(state.clone()))
        .merge(admin_routes(state))
}

/// Login and tourist self-registration need no token. Searching tourists
/// shares the registration path but is protected.
fn public_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route(
            "/tourists",
            get(handlers::tourists::search)
                .route_layer(middleware::from_fn_with_state(state, auth_middleware))
                .post(handlers::tourists::register),
        )
}

/// Session routes (protected)
fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/logout", post(handlers::auth::logout))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// eTour routes (protected)
fn etour_routes(state: AppState) -> Router<AppState> {
    let banner_limit = state.settings.banners.max_image_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route(
            "/news",
            get(handlers::news::list_news).post(handlers::news::create_news),
        )
        .route(
            "/news/{news_id}",
            get(handlers::news::get_news)
                .put(handlers::news::update_news)
                .delete(handlers::news::delete_news),
        )
        .route("/refreshment-points", get(handlers::banners::list_points))
        .route("/refreshment-points/search", get(handlers::points::search))
        .route(
            "/refreshment-points/{point_id}",
            get(handlers::points::view).put(handlers::points::modify),
        )
        .route(
            "/refreshment-points/{point_id}/banners",
            get(handlers::banners::list_banners).post(handlers::banners::insert_banner),
        )
        .route(
            "/banners/{banner_id}",
            put(handlers::banners::change_image).delete(handlers::banners::delete_banner),
        )
        .route(
            "/refreshment-points/{point_id}/menus",
            get(handlers::menus::list_menus),
        )
        .route(
            "/refreshment-points/{point_id}/menus/{day}",
            get(handlers::menus::view_menu)
                .put(handlers::menus::modify_menu)
                .delete(handlers::menus::delete_menu),
        )
        .route(
            "/tags",
            get(handlers::tags::search)
                .post(handlers::tags::insert)
                .delete(handlers::tags::delete_selected),
        )
        .route(
            "/cultural-heritage",
            get(handlers::heritage::search).post(handlers::heritage::insert),
        )
        .route(
            "/cultural-heritage/{site_id}",
            get(handlers::heritage::view)
                .put(handlers::heritage::modify)
                .delete(handlers::heritage::delete),
        )
        .route(
            "/cultural-heritage/{site_id}/feedback",
            get(handlers::feedback::site_summary).post(handlers::feedback::leave_feedback),
        )
        .route(
            "/feedback/{feedback_id}",
            patch(handlers::feedback::modify_comment),
        )
        .route(
            "/tourists/{tourist_id}",
            get(handlers::tourists::view)
                .put(handlers::tourists::modify)
                .delete(handlers::tourists::delete),
        )
        .route(
            "/tourists/{tourist_id}/password",
            put(handlers::tourists::change_password),
        )
        .layer(DefaultBodyLimit::max(banner_limit))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// SMOS routes (protected)
fn smos_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/addresses",
            get(handlers::addresses::list_addresses).post(handlers::addresses::insert_address),
        )
        .route(
            "/addresses/{address_id}",
            get(handlers::addresses::view_address).delete(handlers::addresses::delete_address),
        )
        .route(
            "/addresses/{address_id}/classes",
            get(handlers::classes::list_classes).post(handlers::classes::insert_class),
        )
        .route(
            "/addresses/{address_id}/teachings",
            get(handlers::classes::teachings_of).put(handlers::classes::update_teachings),
        )
        .route("/teachings/{teaching_id}", get(handlers::classes::view_teaching))
        .route("/enrollments", get(handlers::enrollments::pending_requests))
        .route(
            "/enrollments/{request_id}/accept",
            post(handlers::enrollments::accept),
        )
        .route(
            "/enrollments/{request_id}/reject",
            post(handlers::enrollments::reject),
        )
        .route(
            "/late-entries",
            get(handlers::late_entries::list_by_date).post(handlers::late_entries::insert),
        )
        .route(
            "/late-entries/{entry_id}",
            put(handlers::late_entries::edit).delete(handlers::late_entries::delete),
        )
        .route(
            "/students/{student_id}/absences",
            get(handlers::justifications::absences_of),
        )
        .route(
            "/absences/{absence_id}/justification",
            post(handlers::justifications::justify)
                .put(handlers::justifications::edit)
                .delete(handlers::justifications::delete),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Account roles and server simulation (protected)
fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/accounts/{username}/roles",
            get(handlers::roles::list_roles).post(handlers::roles::assign_role),
        )
        .route(
            "/accounts/{username}/roles/{role}",
            axum::routing::delete(handlers::roles::remove_role),
        )
        .route(
            "/simulation/servers/{server}",
            get(handlers::simulation::server_status).put(handlers::simulation::set_connection),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
