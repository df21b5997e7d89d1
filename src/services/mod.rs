pub mod auth;
pub mod course;
pub mod course_import;
pub mod schedule;
pub mod spreadsheet;
pub mod sugang;
pub mod timetable;

pub use auth::{AuthService, Claims};
pub use course::CourseService;
pub use course_import::{CourseImportService, ImportResult, LanguageVariant};
pub use schedule::ScheduleParser;
pub use spreadsheet::{Container, HeaderMap, Sheet};
pub use sugang::{ExportFetcher, ExportLanguage, ExportRequest, ForwardedHeaders, SugangClient};
pub use timetable::TimetableService;
