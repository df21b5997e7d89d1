use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::entity::timetable_course::{self, ActiveModel, Column, Entity as LinkEntity};
use crate::error::AppResult;
use crate::models::TimetableCourse;

/// Membership links between timetables and catalog courses
pub struct TimetableCourseRepository;

impl TimetableCourseRepository {
    pub async fn create<C>(db: &C, timetable_id: Uuid, course_id: Uuid) -> AppResult<TimetableCourse>
    where
        C: ConnectionTrait,
    {
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            timetable_id: Set(timetable_id),
            course_id: Set(course_id),
            created_at: Set(time::OffsetDateTime::now_utc()),
        };

        let result = model.insert(db).await?;
        Ok(result.into())
    }

    /// Links of a timetable in insertion order
    pub async fn find_by_timetable_id<C>(db: &C, timetable_id: Uuid) -> AppResult<Vec<TimetableCourse>>
    where
        C: ConnectionTrait,
    {
        let models = LinkEntity::find()
            .filter(Column::TimetableId.eq(timetable_id))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    pub async fn find<C>(db: &C, timetable_id: Uuid, course_id: Uuid) -> AppResult<Option<TimetableCourse>>
    where
        C: ConnectionTrait,
    {
        let model = LinkEntity::find()
            .filter(Column::TimetableId.eq(timetable_id))
            .filter(Column::CourseId.eq(course_id))
            .one(db)
            .await?;

        Ok(model.map(Into::into))
    }

    pub async fn delete_by_id<C>(db: &C, id: Uuid) -> AppResult<()>
    where
        C: ConnectionTrait,
    {
        LinkEntity::delete_by_id(id).exec(db).await?;
        Ok(())
    }

    pub async fn delete_by_timetable_id<C>(db: &C, timetable_id: Uuid) -> AppResult<u64>
    where
        C: ConnectionTrait,
    {
        let result = LinkEntity::delete_many()
            .filter(Column::TimetableId.eq(timetable_id))
            .exec(db)
            .await?;

        Ok(result.rows_affected)
    }
}

// Conversion from SeaORM model to our domain model
impl From<timetable_course::Model> for TimetableCourse {
    fn from(m: timetable_course::Model) -> Self {
        Self {
            id: m.id,
            timetable_id: m.timetable_id,
            course_id: m.course_id,
            created_at: m.created_at,
        }
    }
}
