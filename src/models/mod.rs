pub mod course;
pub mod timetable;
pub mod user;

pub use course::*;
pub use timetable::*;
pub use user::*;
