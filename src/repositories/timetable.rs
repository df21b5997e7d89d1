use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entity::sea_orm_active_enums::Term;
use crate::entity::timetable::{self, ActiveModel, Column, Entity as TimetableEntity};
use crate::error::{AppError, AppResult};
use crate::models::{CreateTimetable, Timetable};
use crate::repositories::Repository;

/// Timetable repository for database operations
pub struct TimetableRepository;

#[async_trait]
impl Repository<Timetable> for TimetableRepository {
    async fn find_by_id<C>(db: &C, id: Uuid) -> AppResult<Timetable>
    where
        C: ConnectionTrait,
    {
        Self::find_optional(db, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Timetable".to_string()))
    }

    async fn find_optional<C>(db: &C, id: Uuid) -> AppResult<Option<Timetable>>
    where
        C: ConnectionTrait,
    {
        let model = TimetableEntity::find_by_id(id).one(db).await?;
        Ok(model.map(Into::into))
    }
}

impl TimetableRepository {
    /// Create a new timetable
    pub async fn create<C>(db: &C, user_id: Uuid, input: &CreateTimetable) -> AppResult<Timetable>
    where
        C: ConnectionTrait,
    {
        let now = time::OffsetDateTime::now_utc();
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            name: Set(input.name.clone()),
            year: Set(input.year),
            semester: Set(input.semester),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(db).await?;
        Ok(result.into())
    }

    /// Find a timetable and hold an exclusive row lock on it until the
    /// surrounding transaction ends (no-op on SQLite)
    pub async fn find_for_update<C>(db: &C, id: Uuid) -> AppResult<Timetable>
    where
        C: ConnectionTrait,
    {
        let model = TimetableEntity::find_by_id(id)
            .lock_exclusive()
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Timetable".to_string()))?;

        Ok(model.into())
    }

    /// List timetables for a specific user
    pub async fn list_by_user<C>(db: &C, user_id: Uuid) -> AppResult<Vec<Timetable>>
    where
        C: ConnectionTrait,
    {
        let models = TimetableEntity::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_asc(Column::CreatedAt)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    /// Whether the user already has a timetable with this name for (year, semester),
    /// ignoring `exclude_id`
    pub async fn name_taken<C>(
        db: &C,
        user_id: Uuid,
        name: &str,
        year: i32,
        semester: Term,
        exclude_id: Option<Uuid>,
    ) -> AppResult<bool>
    where
        C: ConnectionTrait,
    {
        let mut query = TimetableEntity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::Name.eq(name))
            .filter(Column::Year.eq(year))
            .filter(Column::Semester.eq(semester));

        if let Some(id) = exclude_id {
            query = query.filter(Column::Id.ne(id));
        }

        Ok(query.count(db).await? > 0)
    }

    /// Rename a timetable
    pub async fn rename<C>(db: &C, id: Uuid, name: &str) -> AppResult<Timetable>
    where
        C: ConnectionTrait,
    {
        let model = TimetableEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Timetable".to_string()))?;

        let mut active: ActiveModel = model.into();
        active.name = Set(name.to_string());
        active.updated_at = Set(time::OffsetDateTime::now_utc());

        let result = active.update(db).await?;
        Ok(result.into())
    }

    pub async fn delete<C>(db: &C, id: Uuid) -> AppResult<()>
    where
        C: ConnectionTrait,
    {
        let result = TimetableEntity::delete_by_id(id).exec(db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Timetable".to_string()));
        }

        Ok(())
    }
}

// Conversion from SeaORM model to our domain model
impl From<timetable::Model> for Timetable {
    fn from(m: timetable::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            name: m.name,
            year: m.year,
            semester: m.semester,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
