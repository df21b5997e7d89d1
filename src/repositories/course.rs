use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, Unchanged,
};
use uuid::Uuid;

use crate::entity::course::{self, ActiveModel, Column, Entity as CourseEntity};
use crate::error::{AppError, AppResult};
use crate::models::{Course, CourseKey, CourseSearch, UpsertCourse};
use crate::repositories::Repository;

/// Course catalog repository
pub struct CourseRepository;

/// Whether an upsert created a new row or rewrote an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

#[async_trait]
impl Repository<Course> for CourseRepository {
    async fn find_by_id<C>(db: &C, id: Uuid) -> AppResult<Course>
    where
        C: ConnectionTrait,
    {
        Self::find_optional(db, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Course".to_string()))
    }

    async fn find_optional<C>(db: &C, id: Uuid) -> AppResult<Option<Course>>
    where
        C: ConnectionTrait,
    {
        let model = CourseEntity::find_by_id(id).one(db).await?;
        Ok(model.map(Into::into))
    }
}

impl CourseRepository {
    /// Find a course by its natural key
    pub async fn find_by_key<C>(db: &C, key: &CourseKey) -> AppResult<Option<Course>>
    where
        C: ConnectionTrait,
    {
        let model = CourseEntity::find()
            .filter(Column::Year.eq(key.year))
            .filter(Column::Term.eq(key.term))
            .filter(Column::CourseCode.eq(key.course_code.as_str()))
            .filter(Column::ClassCode.eq(key.class_code.as_str()))
            .one(db)
            .await?;

        Ok(model.map(Into::into))
    }

    /// Insert a course, or rewrite the mutable fields of the row with the same
    /// natural key. The id of an existing row is preserved.
    pub async fn upsert<C>(
        db: &C,
        key: &CourseKey,
        input: &UpsertCourse,
    ) -> AppResult<(Course, UpsertOutcome)>
    where
        C: ConnectionTrait,
    {
        let now = time::OffsetDateTime::now_utc();

        match Self::find_by_key(db, key).await? {
            None => {
                let model = ActiveModel {
                    id: Set(Uuid::new_v4()),
                    year: Set(key.year),
                    term: Set(key.term),
                    course_code: Set(key.course_code.clone()),
                    class_code: Set(key.class_code.clone()),
                    created_at: Set(now),
                    ..Self::mutable_fields(input, now)
                };

                let result = model.insert(db).await?;
                Ok((result.into(), UpsertOutcome::Inserted))
            }
            Some(existing) => {
                // Key columns and created_at stay NotSet, so only catalog fields are rewritten
                let model = ActiveModel {
                    id: Unchanged(existing.id),
                    ..Self::mutable_fields(input, now)
                };

                let result = model.update(db).await?;
                Ok((result.into(), UpsertOutcome::Updated))
            }
        }
    }

    fn mutable_fields(input: &UpsertCourse, now: time::OffsetDateTime) -> ActiveModel {
        ActiveModel {
            category: Set(input.category.clone()),
            college: Set(input.college.clone()),
            department: Set(input.department.clone()),
            program: Set(input.program.clone()),
            grade: Set(input.grade),
            title: Set(input.title.clone()),
            credit: Set(input.credit),
            professor: Set(input.professor.clone()),
            room: Set(input.room.clone()),
            raw_time: Set(input.raw_time.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
    }

    /// Batch lookup by ids; order is unspecified
    pub async fn find_by_ids<C>(db: &C, ids: &[Uuid]) -> AppResult<Vec<Course>>
    where
        C: ConnectionTrait,
    {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = CourseEntity::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    /// Search the catalog for one (year, term), matching title or professor.
    /// Returns one page plus the total number of matches.
    pub async fn search<C>(
        db: &C,
        filter: &CourseSearch,
        page: u64,
        size: u64,
    ) -> AppResult<(Vec<Course>, u64)>
    where
        C: ConnectionTrait,
    {
        let mut query = CourseEntity::find()
            .filter(Column::Year.eq(filter.year))
            .filter(Column::Term.eq(filter.term));

        if let Some(q) = filter.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(Column::Title.contains(q))
                    .add(Column::Professor.contains(q)),
            );
        }

        let paginator = query
            .order_by_asc(Column::CourseCode)
            .order_by_asc(Column::ClassCode)
            .paginate(db, size);

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page).await?;

        Ok((models.into_iter().map(|m| m.into()).collect(), total))
    }
}

// Conversion from SeaORM model to our domain model
impl From<course::Model> for Course {
    fn from(m: course::Model) -> Self {
        Self {
            id: m.id,
            year: m.year,
            term: m.term,
            category: m.category,
            college: m.college,
            department: m.department,
            program: m.program,
            grade: m.grade,
            course_code: m.course_code,
            class_code: m.class_code,
            title: m.title,
            credit: m.credit,
            professor: m.professor,
            room: m.room,
            raw_time: m.raw_time,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
