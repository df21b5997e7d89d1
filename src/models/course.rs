use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entity::sea_orm_active_enums::{Term, Weekday};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
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
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// One weekly occurrence of a course, `[start_min, end_min)` in minutes since midnight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseTimeSlot {
    pub id: Uuid,
    pub course_id: Uuid,
    pub day: Weekday,
    pub start_min: i32,
    pub end_min: i32,
    pub place: Option<String>,
}

/// A slot as produced by the schedule parser, before it is owned by a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub day: Weekday,
    pub start_min: i32,
    pub end_min: i32,
    pub place: Option<String>,
}

impl TimeSlot {
    /// Half-open interval intersection on the same day; touching boundaries do not overlap
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.day == other.day && self.start_min < other.end_min && other.start_min < self.end_min
    }
}

impl From<&CourseTimeSlot> for TimeSlot {
    fn from(s: &CourseTimeSlot) -> Self {
        Self {
            day: s.day,
            start_min: s.start_min,
            end_min: s.end_min,
            place: s.place.clone(),
        }
    }
}

/// Course natural key: unique per (year, term, course_code, class_code)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CourseKey {
    pub year: i32,
    pub term: Term,
    pub course_code: String,
    pub class_code: String,
}

/// Mutable course fields written by the import pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertCourse {
    pub category: Option<String>,
    pub college: Option<String>,
    pub department: Option<String>,
    pub program: Option<String>,
    pub grade: Option<i32>,
    pub title: String,
    pub credit: i32,
    pub professor: Option<String>,
    pub room: Option<String>,
    pub raw_time: Option<String>,
}

/// Catalog search filter
#[derive(Debug, Clone)]
pub struct CourseSearch {
    pub year: i32,
    pub term: Term,
    pub query: Option<String>,
}

/// A course together with its weekly slots
#[derive(Debug, Clone)]
pub struct CourseWithSlots {
    pub course: Course,
    pub slots: Vec<CourseTimeSlot>,
}
