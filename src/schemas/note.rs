use sea_orm::{ColumnTrait, Condition, Set, Value};
use uuid::Uuid;

use super::{validate_length, validate_optional, Changes, CreateSchema, UpdateSchema, Validate};
use crate::entity::note::{ActiveModel, Column, Entity as NoteEntity};
use crate::error::AppResult;

pub const TITLE_MAX_LEN: usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateNote {
    pub title: String,
    pub description: String,
    /// Owner, filled in by the server from the authenticated user
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateNote {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl Validate for CreateNote {
    fn validate(&self) -> AppResult<()> {
        validate_length(&self.title, "Title", TITLE_MAX_LEN)?;
        validate_length(&self.description, "Description", DESCRIPTION_MAX_LEN)?;
        Ok(())
    }
}

impl CreateSchema<NoteEntity> for CreateNote {
    fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            title: Set(self.title),
            description: Set(self.description),
            user_id: Set(self.user_id),
            ..Default::default()
        }
    }

    fn match_condition(&self) -> Condition {
        let owner = match self.user_id {
            Some(user_id) => Column::UserId.eq(user_id),
            None => Column::UserId.is_null(),
        };

        Condition::all()
            .add(Column::Title.eq(self.title.as_str()))
            .add(Column::Description.eq(self.description.as_str()))
            .add(owner)
    }
}

impl Validate for UpdateNote {
    fn validate(&self) -> AppResult<()> {
        validate_optional(&self.title, "Title", TITLE_MAX_LEN)?;
        validate_optional(&self.description, "Description", DESCRIPTION_MAX_LEN)?;
        Ok(())
    }
}

impl UpdateSchema<NoteEntity> for UpdateNote {
    fn changes(&self, partial: bool) -> AppResult<Vec<(Column, Value)>> {
        Ok(Changes::new(partial)
            .required(Column::Title, "Title", self.title.clone())?
            .required(Column::Description, "Description", self.description.clone())?
            .into_vec())
    }
}
