use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::Term;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub year: i32,
    pub term: Term,
    pub category: Option<String>,
    pub college: Option<String>,
    pub department: Option<String>,
    pub program: Option<String>,
    pub grade: Option<i32>,
    pub course_code: String,
    pub class_code: String,
    pub title: String,
    pub credit: i32,
    pub professor: Option<String>,
    pub room: Option<String>,
    pub raw_time: Option<String>,
    pub created_at: TimeDateTimeWithTimeZone,
    pub updated_at: TimeDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::course_time_slot::Entity")]
    TimeSlots,
    #[sea_orm(has_many = "super::timetable_course::Entity")]
    TimetableCourses,
}

impl Related<super::course_time_slot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TimeSlots.def()
    }
}

impl Related<super::timetable_course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TimetableCourses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
