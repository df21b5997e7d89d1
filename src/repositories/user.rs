use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entity::user::{self, ActiveModel, Column, Entity as UserEntity};
use crate::error::{AppError, AppResult};
use crate::models::{NewUser, User};
use crate::repositories::Repository;

/// User repository for database operations
pub struct UserRepository;

#[async_trait]
impl Repository<User> for UserRepository {
    async fn find_by_id<C>(db: &C, id: Uuid) -> AppResult<User>
    where
        C: ConnectionTrait,
    {
        Self::find_optional(db, id)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))
    }

    async fn find_optional<C>(db: &C, id: Uuid) -> AppResult<Option<User>>
    where
        C: ConnectionTrait,
    {
        let model = UserEntity::find_by_id(id).one(db).await?;
        Ok(model.map(Into::into))
    }
}

impl UserRepository {
    /// Insert a registered account; a taken email is a conflict
    pub async fn create<C>(db: &C, input: &NewUser) -> AppResult<User>
    where
        C: ConnectionTrait,
    {
        let now = time::OffsetDateTime::now_utc();
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(input.email.clone()),
            password_hash: Set(input.password_hash.clone()),
            name: Set(input.name.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(db).await.map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => AppError::Conflict("Email already exists".to_string()),
            other => other,
        })?;

        Ok(result.into())
    }

    /// Lookup by an already normalized email
    pub async fn find_by_email<C>(db: &C, email: &str) -> AppResult<Option<User>>
    where
        C: ConnectionTrait,
    {
        let model = UserEntity::find()
            .filter(Column::Email.eq(email))
            .one(db)
            .await?;

        Ok(model.map(Into::into))
    }
}

impl From<user::Model> for User {
    fn from(m: user::Model) -> Self {
        Self {
            id: m.id,
            email: m.email,
            name: m.name,
            password_hash: m.password_hash,
        }
    }
}
