pub use super::course::Entity as Course;
pub use super::course_time_slot::Entity as CourseTimeSlot;
pub use super::timetable::Entity as Timetable;
pub use super::timetable_course::Entity as TimetableCourse;
pub use super::user::Entity as User;
