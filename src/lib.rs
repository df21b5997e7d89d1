// Library crate for the timetable planner
// Exports modules for use by the server binary and tests

pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod middlewares;
pub mod migration;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{
    add_timetable_course, create_timetable, delete_timetable, get_course, get_timetable,
    import_courses, list_timetables, login, me, register, remove_timetable_course,
    search_courses, update_timetable,
};
use crate::middlewares::auth_middleware;
use crate::state::AppState;

/// Build the application router with the given state
pub fn build_router(state: AppState) -> Router {
    // Protected routes (require authentication)
    let protected_routes = Router::new()
        .route("/api/auth/me", get(me))
        // Catalog import
        .route("/api/import/courses", post(import_courses))
        // Timetable routes
        .route(
            "/api/timetables",
            get(list_timetables).post(create_timetable),
        )
        .route(
            "/api/timetables/{id}",
            get(get_timetable)
                .patch(update_timetable)
                .delete(delete_timetable),
        )
        .route("/api/timetables/{id}/courses", post(add_timetable_course))
        .route(
            "/api/timetables/{id}/courses/{course_id}",
            delete(remove_timetable_course),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/", get(|| async { "Hello, timetable planner!" }))
        // Public auth routes
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        // Public catalog routes
        .route("/api/courses", get(search_courses))
        .route("/api/courses/{id}", get(get_course))
        // Protected routes
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
