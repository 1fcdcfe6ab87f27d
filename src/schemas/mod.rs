//! Create/update value objects and the traits binding them to an entity.

pub mod note;
pub mod user;

pub use note::{CreateNote, UpdateNote};
pub use user::{CreateUser, UpdateUser};

use sea_orm::{Condition, EntityTrait, Value};

use crate::error::{AppError, AppResult};

/// Input checks that run before anything reaches the database
pub trait Validate {
    fn validate(&self) -> AppResult<()>;
}

/// Fields accepted to construct a new `E`.
///
/// Server-owned fields (id, timestamps) are never part of a create schema;
/// they are left unset on the active model so the database fills them in.
pub trait CreateSchema<E: EntityTrait>: Validate + Send + Sync {
    fn into_active_model(self) -> E::ActiveModel;

    /// Condition matching a row whose fields all equal this input
    fn match_condition(&self) -> Condition;
}

/// Optional fields that modify an existing `E`
pub trait UpdateSchema<E: EntityTrait>: Validate + Send + Sync {
    /// Column assignments for this update.
    ///
    /// With `partial` only the supplied fields are returned; otherwise every
    /// declared field is, absent ones reset to their default.
    fn changes(&self, partial: bool) -> AppResult<Vec<(E::Column, Value)>>;
}

/// Builder for the assignments of an [`UpdateSchema`]
pub struct Changes<C> {
    partial: bool,
    columns: Vec<(C, Value)>,
}

impl<C> Changes<C> {
    pub fn new(partial: bool) -> Self {
        Self {
            partial,
            columns: Vec::new(),
        }
    }

    /// A NOT NULL column: a full update cannot reset it, so it must be supplied
    pub fn required<V>(mut self, column: C, field: &str, value: Option<V>) -> AppResult<Self>
    where
        V: Into<Value>,
    {
        match value {
            Some(value) => self.columns.push((column, value.into())),
            None if !self.partial => {
                return Err(AppError::Validation(format!(
                    "{} is required for a full update",
                    field
                )))
            }
            None => {}
        }
        Ok(self)
    }

    /// A nullable column: a full update resets it to NULL when absent
    pub fn nullable<V>(mut self, column: C, value: Option<V>) -> Self
    where
        Option<V>: Into<Value>,
    {
        if value.is_some() || !self.partial {
            self.columns.push((column, value.into()));
        }
        self
    }

    pub fn into_vec(self) -> Vec<(C, Value)> {
        self.columns
    }
}

/// Validate an optional string field
pub fn validate_optional(value: &Option<String>, field: &str, max_len: usize) -> AppResult<()> {
    match value {
        Some(value) => validate_length(value, field, max_len),
        None => Ok(()),
    }
}

/// Validate a string field against its column width; empty strings are allowed
pub fn validate_length(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    if value.chars().count() > max_len {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, max_len
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_length() {
        assert!(validate_length("hello", "Title", 100).is_ok());
        assert!(validate_length("", "Title", 100).is_ok());
        assert!(matches!(
            validate_length(&"x".repeat(101), "Title", 100),
            Err(AppError::Validation(_))
        ));
        assert!(validate_length(&"é".repeat(100), "Title", 100).is_ok());
    }

    #[test]
    fn test_validate_optional() {
        assert!(validate_optional(&None, "Name", 5).is_ok());
        assert!(validate_optional(&Some("short".to_string()), "Name", 5).is_ok());
        assert!(validate_optional(&Some("too long".to_string()), "Name", 5).is_err());
    }

    #[test]
    fn test_changes_partial_skips_missing() {
        let changes = Changes::<&str>::new(true)
            .required("title", "Title", None::<String>)
            .unwrap()
            .nullable("name", None::<String>)
            .into_vec();
        assert!(changes.is_empty());
    }

    #[test]
    fn test_changes_full_resets_nullable() {
        let changes = Changes::<&str>::new(false)
            .nullable("name", None::<String>)
            .into_vec();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].1, Value::String(None));
    }

    #[test]
    fn test_changes_full_requires_not_null() {
        let result = Changes::<&str>::new(false).required("title", "Title", None::<String>);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
