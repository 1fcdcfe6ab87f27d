pub mod note;
pub mod user;

pub mod prelude;

pub use prelude::*;

use sea_orm::EntityTrait;
use uuid::Uuid;

/// Describes the identity and timestamp columns every persisted entity carries.
///
/// The generic repository only talks to an entity through this trait, so any
/// SeaORM entity with a UUID key and `created_at` / `updated_at` columns can be
/// plugged into it.
pub trait Record: EntityTrait {
    /// Name used in error details, e.g. "Note not found"
    const NAME: &'static str;

    fn id_column() -> Self::Column;

    fn created_at_column() -> Self::Column;

    fn updated_at_column() -> Self::Column;

    fn id_of(model: &Self::Model) -> Uuid;
}

/// Columns backing soft deletion for entities that support it
pub trait SoftDeleteColumns: Record {
    fn is_deleted_column() -> Self::Column;

    fn deleted_at_column() -> Self::Column;

    fn deleted_by_column() -> Self::Column;
}
