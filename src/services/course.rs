use std::collections::HashMap;

use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Course, CourseSearch, CourseTimeSlot, CourseWithSlots};
use crate::repositories::{CourseRepository, CourseTimeSlotRepository, Repository};

/// Read side of the course catalog
pub struct CourseService;

impl CourseService {
    /// One page of matching courses with their slots, plus the total match count
    pub async fn search<C>(
        db: &C,
        filter: &CourseSearch,
        page: u64,
        size: u64,
    ) -> AppResult<(Vec<CourseWithSlots>, u64)>
    where
        C: ConnectionTrait,
    {
        let (courses, total) = CourseRepository::search(db, filter, page, size).await?;
        let courses = Self::attach_slots(db, courses).await?;
        Ok((courses, total))
    }

    pub async fn get<C>(db: &C, id: Uuid) -> AppResult<CourseWithSlots>
    where
        C: ConnectionTrait,
    {
        let course = CourseRepository::find_by_id(db, id).await?;
        let slots = CourseTimeSlotRepository::find_by_course_id(db, id).await?;
        Ok(CourseWithSlots { course, slots })
    }

    /// Load slots for many courses in one query; input order is kept
    pub async fn attach_slots<C>(db: &C, courses: Vec<Course>) -> AppResult<Vec<CourseWithSlots>>
    where
        C: ConnectionTrait,
    {
        let ids: Vec<Uuid> = courses.iter().map(|c| c.id).collect();
        let mut by_course = group_by_course(CourseTimeSlotRepository::find_by_course_ids(db, &ids).await?);

        Ok(courses
            .into_iter()
            .map(|course| {
                let slots = by_course.remove(&course.id).unwrap_or_default();
                CourseWithSlots { course, slots }
            })
            .collect())
    }
}

pub(crate) fn group_by_course(slots: Vec<CourseTimeSlot>) -> HashMap<Uuid, Vec<CourseTimeSlot>> {
    let mut grouped: HashMap<Uuid, Vec<CourseTimeSlot>> = HashMap::new();
    for slot in slots {
        grouped.entry(slot.course_id).or_default().push(slot);
    }
    grouped
}
