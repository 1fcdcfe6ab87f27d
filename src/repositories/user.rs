use sea_orm::{ColumnTrait, Condition};

use crate::entity::user::{self, Column, Entity as UserEntity};
use crate::error::AppResult;
use crate::repositories::Repository;
use crate::schemas::{CreateUser, UpdateUser};

/// User repository for database operations
pub type UserRepository<'s> = Repository<'s, UserEntity, CreateUser, UpdateUser>;

// User-specific methods (not part of the generic repository)
impl UserRepository<'_> {
    /// Find user by email (for login)
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<user::Model>> {
        self.get_first_by_filter(Condition::all().add(Column::Email.eq(email)))
            .await
    }

    /// Check if email exists
    pub async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let count = self
            .count(Some(Condition::all().add(Column::Email.eq(email))))
            .await?;

        Ok(count > 0)
    }
}
