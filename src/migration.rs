//! Schema bootstrap derived from the SeaORM entity definitions.
//!
//! Runs against whichever backend `DATABASE_URL` points at (PostgreSQL in
//! production, SQLite in tests) and is safe to re-run on every startup.

use sea_orm::sea_query::{Index, IndexCreateStatement};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, Schema};

use crate::entity::{course, course_time_slot, timetable, timetable_course, user};

/// Create all tables and indexes that do not exist yet
pub async fn run(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Parents before children so foreign keys resolve
    create_table(db, user::Entity).await?;
    create_table(db, course::Entity).await?;
    create_table(db, course_time_slot::Entity).await?;
    create_table(db, timetable::Entity).await?;
    create_table(db, timetable_course::Entity).await?;

    for index in indexes() {
        db.execute(db.get_database_backend().build(&index)).await?;
    }

    tracing::debug!("Schema is up to date");
    Ok(())
}

async fn create_table<E>(db: &DatabaseConnection, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    let mut stmt = Schema::new(backend).create_table_from_entity(entity);
    stmt.if_not_exists();
    db.execute(backend.build(&stmt)).await?;
    Ok(())
}

fn indexes() -> Vec<IndexCreateStatement> {
    vec![
        // Natural key used by the import upsert
        Index::create()
            .name("uq_courses_natural_key")
            .table(course::Entity)
            .col(course::Column::Year)
            .col(course::Column::Term)
            .col(course::Column::CourseCode)
            .col(course::Column::ClassCode)
            .unique()
            .if_not_exists()
            .to_owned(),
        Index::create()
            .name("idx_course_time_slots_course_id")
            .table(course_time_slot::Entity)
            .col(course_time_slot::Column::CourseId)
            .if_not_exists()
            .to_owned(),
        Index::create()
            .name("uq_timetables_owner_name")
            .table(timetable::Entity)
            .col(timetable::Column::UserId)
            .col(timetable::Column::Name)
            .col(timetable::Column::Year)
            .col(timetable::Column::Semester)
            .unique()
            .if_not_exists()
            .to_owned(),
        Index::create()
            .name("uq_timetable_courses_membership")
            .table(timetable_course::Entity)
            .col(timetable_course::Column::TimetableId)
            .col(timetable_course::Column::CourseId)
            .unique()
            .if_not_exists()
            .to_owned(),
    ]
}
