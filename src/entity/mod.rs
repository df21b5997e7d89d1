pub mod course;
pub mod course_time_slot;
pub mod sea_orm_active_enums;
pub mod timetable;
pub mod timetable_course;
pub mod user;

pub mod prelude;

pub use prelude::*;
