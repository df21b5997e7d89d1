use std::str::FromStr;

use futures::future::try_join;
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::Serialize;
use utoipa::ToSchema;

use crate::entity::sea_orm_active_enums::Term;
use crate::error::{AppError, AppResult};
use crate::models::{CourseKey, TimeSlot, UpsertCourse};
use crate::repositories::course::UpsertOutcome;
use crate::repositories::{CourseRepository, CourseTimeSlotRepository};
use crate::services::schedule::ScheduleParser;
use crate::services::spreadsheet::{ensure_not_html, HeaderMap, Sheet};
use crate::services::sugang::{ExportFetcher, ExportLanguage, ExportRequest, ForwardedHeaders};

/// The export carries two title rows above the header
pub const HEADER_ROW: usize = 2;

// Header aliases: Korean export name first, English export name second
const COURSE_CODE: &[&str] = &["교과목번호", "Course Number"];
const CLASS_CODE: &[&str] = &["강좌번호", "Lecture Number"];
const TITLE: &[&str] = &["교과목명", "Course Title"];
const SUBTITLE: &[&str] = &["부제명", "Subtitle"];
const PROFESSOR: &[&str] = &["주담당교수", "Professor"];
const CREDIT: &[&str] = &["학점", "Credit"];
const CATEGORY: &[&str] = &["교과구분", "Classification"];
const COLLEGE: &[&str] = &["개설대학", "College"];
const DEPARTMENT: &[&str] = &["개설학과", "Department"];
const PROGRAM: &[&str] = &["이수과정", "Degree Program"];
const GRADE: &[&str] = &["학년", "Year"];
const TIME_KO: &[&str] = &["수업교시"];
const TIME_EN: &[&str] = &["Class Time"];
const ROOM: &[&str] = &["강의실(동-호)(#연건, *평창)", "Classroom(Bldg-Room)"];

/// Which export variants an import downloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LanguageVariant {
    Korean,
    English,
    /// Korean and English exports merged column-wise
    #[default]
    Bilingual,
}

impl FromStr for LanguageVariant {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ko" => Ok(LanguageVariant::Korean),
            "en" => Ok(LanguageVariant::English),
            "all" | "both" | "ko,en" => Ok(LanguageVariant::Bilingual),
            other => Err(AppError::Validation(format!(
                "Unsupported language variant: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct ImportResult {
    pub inserted_count: u64,
    pub updated_count: u64,
}

/// One data row reduced to the catalog fields it carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRow {
    pub course_code: String,
    pub class_code: String,
    pub fields: UpsertCourse,
    pub slots: Vec<TimeSlot>,
}

/// Imports the registration site's course export into the catalog
pub struct CourseImportService;

impl CourseImportService {
    /// Download, decode and upsert one (year, term) export
    pub async fn import(
        db: &DatabaseConnection,
        fetcher: &dyn ExportFetcher,
        year: i32,
        term: Term,
        variant: LanguageVariant,
        headers: ForwardedHeaders,
    ) -> AppResult<ImportResult> {
        tracing::info!(year, %term, ?variant, "Starting course import");

        let sheet = Self::fetch_sheet(fetcher, year, term, variant, headers).await?;
        let result = Self::import_sheet(db, year, term, &sheet).await?;

        tracing::info!(
            year,
            %term,
            inserted = result.inserted_count,
            updated = result.updated_count,
            "Course import finished"
        );
        Ok(result)
    }

    async fn fetch_sheet(
        fetcher: &dyn ExportFetcher,
        year: i32,
        term: Term,
        variant: LanguageVariant,
        headers: ForwardedHeaders,
    ) -> AppResult<Sheet> {
        let request = |language| ExportRequest {
            year,
            term,
            language,
            headers: headers.clone(),
        };

        match variant {
            LanguageVariant::Korean => {
                let payload = fetcher.fetch(&request(ExportLanguage::Korean)).await?;
                Self::decode_payload(payload)
            }
            LanguageVariant::English => {
                let payload = fetcher.fetch(&request(ExportLanguage::English)).await?;
                Self::decode_payload(payload)
            }
            LanguageVariant::Bilingual => {
                let ko_request = request(ExportLanguage::Korean);
                let en_request = request(ExportLanguage::English);
                let (ko, en) =
                    try_join(fetcher.fetch(&ko_request), fetcher.fetch(&en_request)).await?;

                let ko = Self::decode_payload(ko)?;
                let en = Self::decode_payload(en)?;
                Ok(ko.merge_columns(en))
            }
        }
    }

    /// Guard against HTML pages, then decode. The payload buffer is consumed
    /// here and released on every path out.
    fn decode_payload(payload: Vec<u8>) -> AppResult<Sheet> {
        ensure_not_html(&payload)?;
        Sheet::decode(&payload)
    }

    /// Upsert every valid data row of a decoded sheet in one transaction
    pub async fn import_sheet(
        db: &DatabaseConnection,
        year: i32,
        term: Term,
        sheet: &Sheet,
    ) -> AppResult<ImportResult> {
        let header = sheet
            .row(HEADER_ROW)
            .ok_or_else(|| AppError::Parse("Course export has no header row".to_string()))?;
        let columns = HeaderMap::from_row(header);

        for (label, aliases) in [("course code", COURSE_CODE), ("class code", CLASS_CODE)] {
            if !columns.contains_any(aliases) {
                return Err(AppError::Parse(format!(
                    "Course export is missing the {} column ({})",
                    label,
                    aliases.join(" / ")
                )));
            }
        }

        let mut result = ImportResult::default();
        let txn = db.begin().await?;

        for (idx, row) in sheet.rows.iter().enumerate().skip(HEADER_ROW + 1) {
            let Some(parsed) = Self::parse_row(&columns, row) else {
                tracing::debug!(row = idx, "Skipping row without course/class code");
                continue;
            };

            let key = CourseKey {
                year,
                term,
                course_code: parsed.course_code,
                class_code: parsed.class_code,
            };
            let (course, outcome) = CourseRepository::upsert(&txn, &key, &parsed.fields).await?;
            match outcome {
                UpsertOutcome::Inserted => result.inserted_count += 1,
                UpsertOutcome::Updated => result.updated_count += 1,
            }

            CourseTimeSlotRepository::replace_for_course(&txn, course.id, &parsed.slots).await?;
        }

        txn.commit().await?;
        Ok(result)
    }

    /// Extract catalog fields from one data row; `None` when the natural key is incomplete
    pub fn parse_row(columns: &HeaderMap, row: &[String]) -> Option<CourseRow> {
        let course_code = columns.text(row, COURSE_CODE);
        let class_code = columns.text(row, CLASS_CODE);
        if course_code.is_empty() || class_code.is_empty() {
            return None;
        }

        let title = build_title(columns.text(row, TITLE), columns.text(row, SUBTITLE));
        let professor = strip_annotation(columns.text(row, PROFESSOR));
        let credit = columns
            .text(row, CREDIT)
            .parse::<i32>()
            .ok()
            .filter(|c| *c >= 0)
            .unwrap_or(0);
        let college = non_blank(columns.text(row, COLLEGE));
        let department = non_blank(columns.text(row, DEPARTMENT)).or_else(|| college.clone());
        let grade = columns.text(row, GRADE).parse::<i32>().ok();

        let time_ko = columns.text(row, TIME_KO);
        let time_en = columns.text(row, TIME_EN);
        let room = non_blank(columns.text(row, ROOM));
        let slots = ScheduleParser::parse_bilingual(time_ko, time_en, room.as_deref());
        let raw_time = non_blank(time_ko).or_else(|| non_blank(time_en));

        Some(CourseRow {
            course_code: course_code.to_string(),
            class_code: class_code.to_string(),
            fields: UpsertCourse {
                category: non_blank(columns.text(row, CATEGORY)),
                college,
                department,
                program: non_blank(columns.text(row, PROGRAM)),
                grade,
                title,
                credit,
                professor,
                room,
                raw_time,
            },
            slots,
        })
    }
}

fn build_title(title: &str, subtitle: &str) -> String {
    if subtitle.is_empty() {
        title.to_string()
    } else {
        format!("{} ({})", title, subtitle)
    }
}

/// `홍길동 (공과대학)` -> `홍길동`
fn strip_annotation(professor: &str) -> Option<String> {
    let name = match professor.rfind(" (") {
        Some(pos) => &professor[..pos],
        None => professor,
    };
    non_blank(name)
}

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
