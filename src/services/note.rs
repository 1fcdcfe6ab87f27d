use uuid::Uuid;

use crate::entity::note::{self, Entity as NoteEntity};
use crate::error::{AppError, AppResult};
use crate::schemas::{CreateNote, UpdateNote};
use crate::services::{BaseService, CrudService};

pub type NoteService<'s> = BaseService<'s, NoteEntity, CreateNote, UpdateNote>;

impl NoteService<'_> {
    /// Fetch a live note owned by `user_id`.
    ///
    /// Notes belonging to someone else, or soft-deleted ones, are reported as
    /// missing.
    pub async fn get_owned(&self, id: Uuid, user_id: Uuid) -> AppResult<note::Model> {
        let note = self.get_by_uuid(id).await?;

        if note.user_id != Some(user_id) || note.is_deleted {
            return Err(AppError::object_not_found("Note"));
        }

        Ok(note)
    }
}
