pub mod base;
pub mod note;
pub mod user;

pub use base::{AffectedRows, Repository, SoftDeletable, SoftDeleteInfo};
pub use note::{active_notes_of, NoteRepository};
pub use user::UserRepository;
