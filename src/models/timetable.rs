use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entity::sea_orm_active_enums::Term;
use crate::models::CourseWithSlots;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timetable {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub year: i32,
    pub semester: Term,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct CreateTimetable {
    pub name: String,
    pub year: i32,
    pub semester: Term,
}

#[derive(Debug, Clone)]
pub struct TimetableCourse {
    pub id: Uuid,
    pub timetable_id: Uuid,
    pub course_id: Uuid,
    pub created_at: OffsetDateTime,
}

/// Timetable with its member courses and the credit sum over them
#[derive(Debug, Clone)]
pub struct TimetableDetail {
    pub timetable: Timetable,
    pub total_credits: i32,
    pub courses: Vec<CourseWithSlots>,
}
