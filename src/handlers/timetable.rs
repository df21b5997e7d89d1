use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::sea_orm_active_enums::Term;
use crate::error::AppResult;
use crate::handlers::CourseResponse;
use crate::middlewares::AuthUser;
use crate::models::{CreateTimetable, Timetable, TimetableDetail};
use crate::services::TimetableService;
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTimetableRequest {
    pub name: String,
    pub year: i32,
    pub semester: Term,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTimetableRequest {
    pub name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddCourseRequest {
    pub course_id: Uuid,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TimetableResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub year: i32,
    pub semester: Term,
    #[schema(value_type = String)]
    pub created_at: time::OffsetDateTime,
    #[schema(value_type = String)]
    pub updated_at: time::OffsetDateTime,
}

impl From<Timetable> for TimetableResponse {
    fn from(t: Timetable) -> Self {
        Self {
            id: t.id,
            user_id: t.user_id,
            name: t.name,
            year: t.year,
            semester: t.semester,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TimetableDetailResponse {
    pub timetable: TimetableResponse,
    pub total_credits: i32,
    pub courses: Vec<CourseResponse>,
}

impl From<TimetableDetail> for TimetableDetailResponse {
    fn from(d: TimetableDetail) -> Self {
        Self {
            timetable: d.timetable.into(),
            total_credits: d.total_credits,
            courses: d.courses.into_iter().map(Into::into).collect(),
        }
    }
}

// ============ Handlers ============

/// Create a new timetable
#[utoipa::path(
    post,
    path = "/api/timetables",
    request_body = CreateTimetableRequest,
    responses(
        (status = 200, description = "Timetable created successfully", body = TimetableResponse),
        (status = 400, description = "Blank name"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Name already used for this year and semester")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Timetables"
)]
pub async fn create_timetable(
    user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateTimetableRequest>,
) -> AppResult<Json<TimetableResponse>> {
    let input = CreateTimetable {
        name: payload.name,
        year: payload.year,
        semester: payload.semester,
    };

    let timetable = TimetableService::create(&state.db, user.id, input).await?;
    Ok(Json(timetable.into()))
}

/// List the current user's timetables
#[utoipa::path(
    get,
    path = "/api/timetables",
    responses(
        (status = 200, description = "List of timetables", body = Vec<TimetableResponse>),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Timetables"
)]
pub async fn list_timetables(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<TimetableResponse>>> {
    let timetables = TimetableService::list(&state.db, user.id).await?;
    Ok(Json(timetables.into_iter().map(Into::into).collect()))
}

/// Get a timetable with its courses and credit total
#[utoipa::path(
    get,
    path = "/api/timetables/{id}",
    params(
        ("id" = Uuid, Path, description = "Timetable ID")
    ),
    responses(
        (status = 200, description = "Timetable details", body = TimetableDetailResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Timetable belongs to another user"),
        (status = 404, description = "Timetable not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Timetables"
)]
pub async fn get_timetable(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<TimetableDetailResponse>> {
    let detail = TimetableService::detail(&state.db, id, user.id).await?;
    Ok(Json(detail.into()))
}

/// Rename a timetable
#[utoipa::path(
    patch,
    path = "/api/timetables/{id}",
    params(
        ("id" = Uuid, Path, description = "Timetable ID")
    ),
    request_body = UpdateTimetableRequest,
    responses(
        (status = 200, description = "Timetable renamed", body = TimetableResponse),
        (status = 400, description = "Blank name"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Timetable belongs to another user"),
        (status = 404, description = "Timetable not found"),
        (status = 409, description = "Name already used for this year and semester")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Timetables"
)]
pub async fn update_timetable(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTimetableRequest>,
) -> AppResult<Json<TimetableResponse>> {
    let timetable = TimetableService::update(&state.db, id, &payload.name, user.id).await?;
    Ok(Json(timetable.into()))
}

/// Delete a timetable and its course links
#[utoipa::path(
    delete,
    path = "/api/timetables/{id}",
    params(
        ("id" = Uuid, Path, description = "Timetable ID")
    ),
    responses(
        (status = 204, description = "Timetable deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Timetable belongs to another user"),
        (status = 404, description = "Timetable not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Timetables"
)]
pub async fn delete_timetable(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    TimetableService::delete(&state.db, id, user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Add a catalog course to a timetable
#[utoipa::path(
    post,
    path = "/api/timetables/{id}/courses",
    params(
        ("id" = Uuid, Path, description = "Timetable ID")
    ),
    request_body = AddCourseRequest,
    responses(
        (status = 200, description = "Course added", body = TimetableDetailResponse),
        (status = 400, description = "Course belongs to a different year or semester"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Timetable belongs to another user"),
        (status = 404, description = "Timetable or course not found"),
        (status = 409, description = "Course already added or overlaps another course")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Timetables"
)]
pub async fn add_timetable_course(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddCourseRequest>,
) -> AppResult<Json<TimetableDetailResponse>> {
    let detail = TimetableService::add_course(&state.db, id, payload.course_id, user.id).await?;
    Ok(Json(detail.into()))
}

/// Remove a course from a timetable
#[utoipa::path(
    delete,
    path = "/api/timetables/{id}/courses/{course_id}",
    params(
        ("id" = Uuid, Path, description = "Timetable ID"),
        ("course_id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course removed", body = TimetableDetailResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Timetable belongs to another user"),
        (status = 404, description = "Timetable not found or course not in it")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Timetables"
)]
pub async fn remove_timetable_course(
    user: AuthUser,
    State(state): State<AppState>,
    Path((id, course_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<TimetableDetailResponse>> {
    let detail = TimetableService::remove_course(&state.db, id, course_id, user.id).await?;
    Ok(Json(detail.into()))
}
