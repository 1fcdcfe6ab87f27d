pub mod auth;
pub mod crud;
pub mod note;
pub mod user;

pub use auth::{AuthService, Claims, Registration};
pub use crud::{BaseService, CrudService};
pub use note::NoteService;
pub use user::UserService;
