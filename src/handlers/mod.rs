pub mod auth;
pub mod common;
pub mod health;
pub mod note;

pub use auth::{
    login, me, register, update_me, AuthResponse, LoginRequest, RegisterRequest,
    UpdateUserRequest, UserResponse,
};
pub use common::{require, PaginationParams};
pub use health::{health_check, HealthResponse};
pub use note::{
    create_note, delete_note, get_note, list_notes, patch_note, soft_delete_note, update_note,
    CreateNoteRequest, NoteListResponse, NoteResponse, UpdateNoteRequest,
};
