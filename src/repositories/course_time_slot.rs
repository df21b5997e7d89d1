use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::entity::course_time_slot::{self, ActiveModel, Column, Entity as SlotEntity};
use crate::error::AppResult;
use crate::models::{CourseTimeSlot, TimeSlot};

/// Repository for the weekly slots owned by catalog courses
pub struct CourseTimeSlotRepository;

impl CourseTimeSlotRepository {
    /// Replace every slot of a course with the given set
    pub async fn replace_for_course<C>(
        db: &C,
        course_id: Uuid,
        slots: &[TimeSlot],
    ) -> AppResult<()>
    where
        C: ConnectionTrait,
    {
        Self::delete_by_course_id(db, course_id).await?;
        Self::insert_many(db, course_id, slots).await
    }

    pub async fn delete_by_course_id<C>(db: &C, course_id: Uuid) -> AppResult<u64>
    where
        C: ConnectionTrait,
    {
        let result = SlotEntity::delete_many()
            .filter(Column::CourseId.eq(course_id))
            .exec(db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn insert_many<C>(db: &C, course_id: Uuid, slots: &[TimeSlot]) -> AppResult<()>
    where
        C: ConnectionTrait,
    {
        if slots.is_empty() {
            return Ok(());
        }

        let models = slots.iter().map(|s| ActiveModel {
            id: Set(Uuid::new_v4()),
            course_id: Set(course_id),
            day: Set(s.day),
            start_min: Set(s.start_min),
            end_min: Set(s.end_min),
            place: Set(s.place.clone()),
        });

        SlotEntity::insert_many(models)
            .exec_without_returning(db)
            .await?;
        Ok(())
    }

    pub async fn find_by_course_id<C>(db: &C, course_id: Uuid) -> AppResult<Vec<CourseTimeSlot>>
    where
        C: ConnectionTrait,
    {
        Self::find_by_course_ids(db, &[course_id]).await
    }

    /// Batch slot lookup across many courses
    pub async fn find_by_course_ids<C>(
        db: &C,
        course_ids: &[Uuid],
    ) -> AppResult<Vec<CourseTimeSlot>>
    where
        C: ConnectionTrait,
    {
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = SlotEntity::find()
            .filter(Column::CourseId.is_in(course_ids.iter().copied()))
            .order_by_asc(Column::CourseId)
            .order_by_asc(Column::StartMin)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }
}

// Conversion from SeaORM model to our domain model
impl From<course_time_slot::Model> for CourseTimeSlot {
    fn from(m: course_time_slot::Model) -> Self {
        Self {
            id: m.id,
            course_id: m.course_id,
            day: m.day,
            start_min: m.start_min,
            end_min: m.end_min,
            place: m.place,
        }
    }
}
