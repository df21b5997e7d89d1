pub mod course;
pub mod course_time_slot;
pub mod timetable;
pub mod timetable_course;
pub mod user;

pub use course::CourseRepository;
pub use course_time_slot::CourseTimeSlotRepository;
pub use timetable::TimetableRepository;
pub use timetable_course::TimetableCourseRepository;
pub use user::UserRepository;

use async_trait::async_trait;
use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::error::AppResult;

/// Base repository trait for lookups by primary key.
///
/// Every method takes any `ConnectionTrait`, so the same call works on the
/// pooled connection and inside an open transaction.
#[async_trait]
pub trait Repository<T>
where
    T: Send + Sync,
{
    /// Find entity by ID, failing with `NotFound` when absent
    async fn find_by_id<C>(db: &C, id: Uuid) -> AppResult<T>
    where
        C: ConnectionTrait;

    /// Find entity by ID if it exists
    async fn find_optional<C>(db: &C, id: Uuid) -> AppResult<Option<T>>
    where
        C: ConnectionTrait;
}
