use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::entity::sea_orm_active_enums::{Term, Weekday};
use crate::error::AppResult;
use crate::handlers::common::total_pages;
use crate::handlers::PaginationParams;
use crate::models::{CourseSearch, CourseTimeSlot, CourseWithSlots};
use crate::services::CourseService;
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, IntoParams)]
pub struct CourseSearchParams {
    pub year: i32,
    pub semester: Term,
    /// Substring of the title or professor name
    pub query: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TimeSlotResponse {
    pub day: Weekday,
    /// Minutes since midnight, inclusive
    pub start_min: i32,
    /// Minutes since midnight, exclusive
    pub end_min: i32,
    pub place: Option<String>,
}

impl From<CourseTimeSlot> for TimeSlotResponse {
    fn from(s: CourseTimeSlot) -> Self {
        Self {
            day: s.day,
            start_min: s.start_min,
            end_min: s.end_min,
            place: s.place,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseResponse {
    pub id: Uuid,
    pub year: i32,
    pub term: Term,
    pub category: Option<String>,
    pub college: Option<String>,
    pub department: Option<String>,
    pub program: Option<String>,
    pub grade: Option<i32>,
    pub course_code: String,
    pub class_code: String,
    pub title: String,
    pub credit: i32,
    pub professor: Option<String>,
    pub room: Option<String>,
    pub raw_time: Option<String>,
    pub slots: Vec<TimeSlotResponse>,
}

impl From<CourseWithSlots> for CourseResponse {
    fn from(c: CourseWithSlots) -> Self {
        let CourseWithSlots { course, slots } = c;
        Self {
            id: course.id,
            year: course.year,
            term: course.term,
            category: course.category,
            college: course.college,
            department: course.department,
            program: course.program,
            grade: course.grade,
            course_code: course.course_code,
            class_code: course.class_code,
            title: course.title,
            credit: course.credit,
            professor: course.professor,
            room: course.room,
            raw_time: course.raw_time,
            slots: slots.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CoursePageResponse {
    pub content: Vec<CourseResponse>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
}

// ============ Handlers ============

/// Search the course catalog of one term
#[utoipa::path(
    get,
    path = "/api/courses",
    params(CourseSearchParams, PaginationParams),
    responses(
        (status = 200, description = "One page of matching courses", body = CoursePageResponse),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "Courses"
)]
pub async fn search_courses(
    State(state): State<AppState>,
    Query(params): Query<CourseSearchParams>,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<Json<CoursePageResponse>> {
    let page = pagination.page();
    let size = pagination.size();
    let filter = CourseSearch {
        year: params.year,
        term: params.semester,
        query: params.query,
    };

    let (courses, total) = CourseService::search(&state.db, &filter, page, size).await?;

    Ok(Json(CoursePageResponse {
        content: courses.into_iter().map(Into::into).collect(),
        page,
        size,
        total_elements: total,
        total_pages: total_pages(total, size),
    }))
}

/// Get a catalog course by ID
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course details", body = CourseResponse),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses"
)]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<CourseResponse>> {
    let course = CourseService::get(&state.db, id).await?;
    Ok(Json(course.into()))
}
