use sea_orm::{ColumnTrait, Condition, Set, Value};

use super::{validate_length, validate_optional, Changes, CreateSchema, UpdateSchema, Validate};
use crate::entity::user::{ActiveModel, Column, Entity as UserEntity};
use crate::error::{AppError, AppResult};

pub const NAME_MAX_LEN: usize = 50;
pub const EMAIL_MAX_LEN: usize = 255;

/// User creation schema; the password is already hashed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUser {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub surname: Option<String>,
}

impl Validate for CreateUser {
    fn validate(&self) -> AppResult<()> {
        validate_length(&self.email, "Email", EMAIL_MAX_LEN)?;
        if !self.email.contains('@') {
            return Err(AppError::Validation("Email is invalid".to_string()));
        }
        validate_optional(&self.name, "Name", NAME_MAX_LEN)?;
        validate_optional(&self.surname, "Surname", NAME_MAX_LEN)?;
        if self.password_hash.is_empty() {
            return Err(AppError::Validation("Password is required".to_string()));
        }
        Ok(())
    }
}

impl CreateSchema<UserEntity> for CreateUser {
    fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            name: Set(self.name),
            surname: Set(self.surname),
            email: Set(self.email),
            password_hash: Set(self.password_hash),
            ..Default::default()
        }
    }

    fn match_condition(&self) -> Condition {
        let optional = |column: Column, value: &Option<String>| match value {
            Some(value) => column.eq(value.as_str()),
            None => column.is_null(),
        };

        Condition::all()
            .add(Column::Email.eq(self.email.as_str()))
            .add(Column::PasswordHash.eq(self.password_hash.as_str()))
            .add(optional(Column::Name, &self.name))
            .add(optional(Column::Surname, &self.surname))
    }
}

impl Validate for UpdateUser {
    fn validate(&self) -> AppResult<()> {
        validate_optional(&self.name, "Name", NAME_MAX_LEN)?;
        validate_optional(&self.surname, "Surname", NAME_MAX_LEN)?;
        Ok(())
    }
}

impl UpdateSchema<UserEntity> for UpdateUser {
    fn changes(&self, partial: bool) -> AppResult<Vec<(Column, Value)>> {
        Ok(Changes::new(partial)
            .nullable(Column::Name, self.name.clone())
            .nullable(Column::Surname, self.surname.clone())
            .into_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_validation() {
        let user = CreateUser {
            name: Some("Ada".to_string()),
            surname: None,
            email: "ada@example.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
        };
        assert!(user.validate().is_ok());

        let invalid = CreateUser {
            email: "not-an-email".to_string(),
            ..user.clone()
        };
        assert!(invalid.validate().is_err());

        let long_name = CreateUser {
            name: Some("n".repeat(NAME_MAX_LEN + 1)),
            ..user
        };
        assert!(long_name.validate().is_err());
    }

    #[test]
    fn test_full_update_resets_surname() {
        let update = UpdateUser {
            name: Some("Grace".to_string()),
            surname: None,
        };
        let changes = update.changes(false).unwrap();
        assert_eq!(changes.len(), 2);
        assert!(matches!(changes[1].0, Column::Surname));
        assert_eq!(changes[1].1, Value::String(None));

        let changes = update.changes(true).unwrap();
        assert_eq!(changes.len(), 1);
    }
}
