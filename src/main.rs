use anyhow::Context;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use timetable_planner::config::Config;
use timetable_planner::entity::sea_orm_active_enums::{Term, Weekday};
use timetable_planner::handlers::{
    AddCourseRequest, AuthResponse, CoursePageResponse, CourseResponse, CreateTimetableRequest,
    ImportCoursesResponse, LoginRequest, RegisterRequest, TimeSlotResponse,
    TimetableDetailResponse, TimetableResponse, UpdateTimetableRequest,
};
use timetable_planner::models::UserResponse;
use timetable_planner::state::AppState;
use timetable_planner::{build_router, handlers};

/// Security scheme for Bearer token
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::me,
        handlers::course::search_courses,
        handlers::course::get_course,
        handlers::import::import_courses,
        handlers::timetable::create_timetable,
        handlers::timetable::list_timetables,
        handlers::timetable::get_timetable,
        handlers::timetable::update_timetable,
        handlers::timetable::delete_timetable,
        handlers::timetable::add_timetable_course,
        handlers::timetable::remove_timetable_course,
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        AuthResponse,
        UserResponse,
        Term,
        Weekday,
        TimeSlotResponse,
        CourseResponse,
        CoursePageResponse,
        ImportCoursesResponse,
        CreateTimetableRequest,
        UpdateTimetableRequest,
        AddCourseRequest,
        TimetableResponse,
        TimetableDetailResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Courses", description = "Course catalog search"),
        (name = "Import", description = "Course catalog import from the registration site"),
        (name = "Timetables", description = "Personal timetables with overlap checking")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    let addr = config.server_addr();

    tracing::info!("Connecting to database...");
    let state = AppState::new(config)
        .await
        .context("Failed to initialize application state")?;
    tracing::info!("Database ready");

    let app = build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Server started on http://{}", addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
