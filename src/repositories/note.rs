use sea_orm::{ColumnTrait, Condition};
use uuid::Uuid;

use crate::entity::note::{Column, Entity as NoteEntity};
use crate::repositories::Repository;
use crate::schemas::{CreateNote, UpdateNote};

/// Note repository for database operations
pub type NoteRepository<'s> = Repository<'s, NoteEntity, CreateNote, UpdateNote>;

/// Notes owned by `user_id` that have not been soft-deleted
pub fn active_notes_of(user_id: Uuid) -> Condition {
    Condition::all()
        .add(Column::UserId.eq(user_id))
        .add(Column::IsDeleted.eq(false))
}
