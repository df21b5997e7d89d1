use std::collections::HashMap;

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{CourseTimeSlot, CourseWithSlots, CreateTimetable, TimeSlot, Timetable, TimetableDetail};
use crate::repositories::{
    CourseRepository, CourseTimeSlotRepository, Repository, TimetableCourseRepository,
    TimetableRepository,
};
use crate::services::course::group_by_course;

/// Timetable orchestration: ownership, naming and the no-overlap invariant
pub struct TimetableService;

impl TimetableService {
    pub async fn create(
        db: &DatabaseConnection,
        owner_id: Uuid,
        input: CreateTimetable,
    ) -> AppResult<Timetable> {
        let name = normalize_name(&input.name)?;

        if TimetableRepository::name_taken(db, owner_id, &name, input.year, input.semester, None)
            .await?
        {
            tracing::debug!(%owner_id, name = %name, "Timetable name already in use");
            return Err(duplicate_name(&name));
        }

        let input = CreateTimetable { name, ..input };
        TimetableRepository::create(db, owner_id, &input)
            .await
            .map_err(|e| match e {
                // Lost a race against a concurrent create with the same name
                AppError::Conflict(_) => duplicate_name(&input.name),
                other => other,
            })
    }

    pub async fn list(db: &DatabaseConnection, owner_id: Uuid) -> AppResult<Vec<Timetable>> {
        TimetableRepository::list_by_user(db, owner_id).await
    }

    pub async fn detail(
        db: &DatabaseConnection,
        id: Uuid,
        owner_id: Uuid,
    ) -> AppResult<TimetableDetail> {
        let timetable = TimetableRepository::find_by_id(db, id).await?;
        ensure_owner(&timetable, owner_id)?;
        Self::load_detail(db, timetable).await
    }

    /// Rename a timetable; the new name must be free among the owner's
    /// timetables for the same (year, semester)
    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        name: &str,
        owner_id: Uuid,
    ) -> AppResult<Timetable> {
        let txn = db.begin().await?;

        let timetable = TimetableRepository::find_for_update(&txn, id).await?;
        ensure_owner(&timetable, owner_id)?;
        let name = normalize_name(name)?;

        if TimetableRepository::name_taken(
            &txn,
            owner_id,
            &name,
            timetable.year,
            timetable.semester,
            Some(id),
        )
        .await?
        {
            tracing::debug!(%owner_id, timetable_id = %id, name = %name, "Timetable name already in use");
            return Err(duplicate_name(&name));
        }

        let updated = TimetableRepository::rename(&txn, id, &name).await?;
        txn.commit().await?;
        Ok(updated)
    }

    pub async fn delete(db: &DatabaseConnection, id: Uuid, owner_id: Uuid) -> AppResult<()> {
        let txn = db.begin().await?;

        let timetable = TimetableRepository::find_for_update(&txn, id).await?;
        ensure_owner(&timetable, owner_id)?;

        let removed = TimetableCourseRepository::delete_by_timetable_id(&txn, id).await?;
        TimetableRepository::delete(&txn, id).await?;
        txn.commit().await?;

        tracing::debug!(timetable_id = %id, links = removed, "Timetable deleted");
        Ok(())
    }

    /// Add a catalog course to a timetable.
    ///
    /// Runs under a row lock on the timetable, so the overlap check and the
    /// insert of the membership link are atomic with respect to other
    /// add/remove calls on the same timetable.
    pub async fn add_course(
        db: &DatabaseConnection,
        id: Uuid,
        course_id: Uuid,
        owner_id: Uuid,
    ) -> AppResult<TimetableDetail> {
        let txn = db.begin().await?;

        let timetable = TimetableRepository::find_for_update(&txn, id).await?;
        ensure_owner(&timetable, owner_id)?;
        let course = CourseRepository::find_by_id(&txn, course_id).await?;

        if TimetableCourseRepository::find(&txn, id, course_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "Course is already in this timetable".to_string(),
            ));
        }

        if course.year != timetable.year || course.term != timetable.semester {
            return Err(AppError::Validation(format!(
                "Course is offered in {} {}, but the timetable is for {} {}",
                course.year, course.term, timetable.year, timetable.semester
            )));
        }

        let member_ids: Vec<Uuid> = TimetableCourseRepository::find_by_timetable_id(&txn, id)
            .await?
            .into_iter()
            .map(|link| link.course_id)
            .collect();
        let existing = CourseTimeSlotRepository::find_by_course_ids(&txn, &member_ids).await?;
        let candidate = CourseTimeSlotRepository::find_by_course_id(&txn, course_id).await?;

        if let Some(clash) = first_overlap(&existing, &candidate) {
            tracing::debug!(
                timetable_id = %id,
                %course_id,
                conflicting_course_id = %clash.course_id,
                "Rejected course with overlapping time slot"
            );
            return Err(AppError::Conflict(format!(
                "Course time overlaps with course {}",
                clash.course_id
            )));
        }

        TimetableCourseRepository::create(&txn, id, course_id).await?;
        let detail = Self::load_detail(&txn, timetable).await?;
        txn.commit().await?;
        Ok(detail)
    }

    pub async fn remove_course(
        db: &DatabaseConnection,
        id: Uuid,
        course_id: Uuid,
        owner_id: Uuid,
    ) -> AppResult<TimetableDetail> {
        let txn = db.begin().await?;

        let timetable = TimetableRepository::find_for_update(&txn, id).await?;
        ensure_owner(&timetable, owner_id)?;

        let link = TimetableCourseRepository::find(&txn, id, course_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Timetable course".to_string()))?;
        TimetableCourseRepository::delete_by_id(&txn, link.id).await?;

        let detail = Self::load_detail(&txn, timetable).await?;
        txn.commit().await?;
        Ok(detail)
    }

    /// Member courses in the order they were added, and their credit sum
    async fn load_detail<C>(db: &C, timetable: Timetable) -> AppResult<TimetableDetail>
    where
        C: ConnectionTrait,
    {
        let links = TimetableCourseRepository::find_by_timetable_id(db, timetable.id).await?;
        let ids: Vec<Uuid> = links.iter().map(|link| link.course_id).collect();

        let mut courses: HashMap<Uuid, _> = CourseRepository::find_by_ids(db, &ids)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
        let mut slots = group_by_course(CourseTimeSlotRepository::find_by_course_ids(db, &ids).await?);

        let courses: Vec<CourseWithSlots> = ids
            .iter()
            .filter_map(|id| {
                courses.remove(id).map(|course| CourseWithSlots {
                    slots: slots.remove(id).unwrap_or_default(),
                    course,
                })
            })
            .collect();
        let total_credits: i32 = courses.iter().map(|c| c.course.credit).sum();

        Ok(TimetableDetail {
            timetable,
            total_credits,
            courses,
        })
    }
}

/// First existing slot that intersects any candidate slot
pub fn first_overlap<'a>(
    existing: &'a [CourseTimeSlot],
    candidate: &[CourseTimeSlot],
) -> Option<&'a CourseTimeSlot> {
    let candidate: Vec<TimeSlot> = candidate.iter().map(TimeSlot::from).collect();
    existing.iter().find(|slot| {
        let slot = TimeSlot::from(*slot);
        candidate.iter().any(|c| slot.overlaps(c))
    })
}

fn ensure_owner(timetable: &Timetable, owner_id: Uuid) -> AppResult<()> {
    if timetable.user_id != owner_id {
        return Err(AppError::Forbidden(
            "Timetable belongs to another user".to_string(),
        ));
    }
    Ok(())
}

fn normalize_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation(
            "Timetable name must not be blank".to_string(),
        ));
    }
    Ok(name.to_string())
}

fn duplicate_name(name: &str) -> AppError {
    AppError::Conflict(format!("Timetable '{}' already exists", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::sea_orm_active_enums::Weekday;

    fn slot(course_id: Uuid, day: Weekday, start: i32, end: i32) -> CourseTimeSlot {
        CourseTimeSlot {
            id: Uuid::new_v4(),
            course_id,
            day,
            start_min: start,
            end_min: end,
            place: None,
        }
    }

    #[test]
    fn test_first_overlap_reports_conflicting_course() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let existing = vec![
            slot(a, Weekday::Monday, 540, 615),
            slot(b, Weekday::Wednesday, 600, 690),
        ];
        let candidate = vec![
            slot(Uuid::new_v4(), Weekday::Tuesday, 540, 615),
            slot(Uuid::new_v4(), Weekday::Wednesday, 660, 720),
        ];

        let clash = first_overlap(&existing, &candidate).unwrap();
        assert_eq!(clash.course_id, b);
    }

    #[test]
    fn test_first_overlap_allows_touching_and_empty() {
        let a = Uuid::new_v4();
        let existing = vec![slot(a, Weekday::Monday, 540, 615)];
        let touching = vec![slot(Uuid::new_v4(), Weekday::Monday, 615, 690)];

        assert!(first_overlap(&existing, &touching).is_none());
        assert!(first_overlap(&existing, &[]).is_none());
        assert!(first_overlap(&[], &touching).is_none());
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Fall25 ").unwrap(), "Fall25");
        assert!(matches!(normalize_name("   "), Err(AppError::Validation(_))));
        assert!(matches!(normalize_name(""), Err(AppError::Validation(_))));
    }
}
