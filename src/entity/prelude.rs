pub use super::note::Entity as Note;
pub use super::user::Entity as User;
