pub mod auth;
pub mod common;
pub mod course;
pub mod import;
pub mod timetable;

pub use auth::{login, me, register, AuthResponse, LoginRequest, RegisterRequest};
pub use common::PaginationParams;
pub use course::{
    get_course, search_courses, CoursePageResponse, CourseResponse, CourseSearchParams,
    TimeSlotResponse,
};
pub use import::{import_courses, ImportCoursesParams, ImportCoursesResponse};
pub use timetable::{
    add_timetable_course, create_timetable, delete_timetable, get_timetable, list_timetables,
    remove_timetable_course, update_timetable, AddCourseRequest, CreateTimetableRequest,
    TimetableDetailResponse, TimetableResponse, UpdateTimetableRequest,
};
