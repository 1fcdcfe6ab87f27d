use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sea_orm::{ColumnTrait, Condition};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::note::{self, Column};
use crate::error::{AppError, AppResult};
use crate::handlers::{require, PaginationParams};
use crate::middlewares::AuthUser;
use crate::repositories::{active_notes_of, AffectedRows};
use crate::schemas::{CreateNote, UpdateNote};
use crate::services::{CrudService, NoteService};
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Body of both PUT (every field required) and PATCH (any subset)
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl From<UpdateNoteRequest> for UpdateNote {
    fn from(req: UpdateNoteRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NoteResponse {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub is_deleted: bool,
    #[schema(value_type = Option<String>)]
    #[serde(with = "time::serde::rfc3339::option")]
    pub deleted_at: Option<time::OffsetDateTime>,
    pub deleted_by: Option<Uuid>,
    #[schema(value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
    #[schema(value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: time::OffsetDateTime,
}

impl From<note::Model> for NoteResponse {
    fn from(n: note::Model) -> Self {
        Self {
            id: n.id,
            user_id: n.user_id,
            title: n.title,
            description: n.description,
            is_deleted: n.is_deleted,
            deleted_at: n.deleted_at,
            deleted_by: n.deleted_by,
            created_at: n.created_at,
            updated_at: n.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NoteListResponse {
    pub data: Vec<NoteResponse>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

// ============ Handlers ============

/// Create a new note owned by the caller
#[utoipa::path(
    post,
    path = "/api/v1/notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created successfully", body = NoteResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Notes"
)]
pub async fn create_note(
    user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateNoteRequest>,
) -> AppResult<(StatusCode, Json<NoteResponse>)> {
    let input = CreateNote {
        title: require(payload.title, "Title")?,
        description: require(payload.description, "Description")?,
        user_id: Some(user.id),
    };

    let note = state
        .sessions
        .with_session(move |txn| Box::pin(async move { NoteService::new(txn).create(input).await }))
        .await?;

    tracing::debug!(note_id = %note.id, user_id = %user.id, "Note created");
    Ok((StatusCode::CREATED, Json(note.into())))
}

/// List the caller's notes
#[utoipa::path(
    get,
    path = "/api/v1/notes",
    params(PaginationParams),
    responses(
        (status = 200, description = "List of notes", body = NoteListResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Notes"
)]
pub async fn list_notes(
    user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<NoteListResponse>> {
    let limit = params.limit();
    let offset = params.offset();
    let order_by = params.order_by;

    let (notes, total) = state
        .sessions
        .with_session(move |txn| {
            Box::pin(async move {
                let service = NoteService::new(txn);
                let notes = service
                    .get_paginated(
                        limit,
                        offset,
                        order_by.as_deref(),
                        Some(active_notes_of(user.id)),
                    )
                    .await?;
                let total = service.count(Some(active_notes_of(user.id))).await?;
                Ok::<_, AppError>((notes, total))
            })
        })
        .await?;

    Ok(Json(NoteListResponse {
        data: notes.into_iter().map(NoteResponse::from).collect(),
        total,
        limit,
        offset,
    }))
}

/// Get a note by ID
#[utoipa::path(
    get,
    path = "/api/v1/notes/{id}",
    params(
        ("id" = Uuid, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note found", body = NoteResponse),
        (status = 404, description = "Note not found"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Notes"
)]
pub async fn get_note(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<NoteResponse>> {
    let note = state
        .sessions
        .with_session(move |txn| {
            Box::pin(async move { NoteService::new(txn).get_owned(id, user.id).await })
        })
        .await?;

    Ok(Json(note.into()))
}

/// Replace a note's fields
#[utoipa::path(
    put,
    path = "/api/v1/notes/{id}",
    params(
        ("id" = Uuid, Path, description = "Note ID")
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated successfully", body = NoteResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Note not found"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Notes"
)]
pub async fn update_note(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateNoteRequest>,
) -> AppResult<Json<NoteResponse>> {
    let note = state
        .sessions
        .with_session(move |txn| {
            Box::pin(async move {
                let service = NoteService::new(txn);
                service.get_owned(id, user.id).await?;
                service.update(id, payload.into()).await
            })
        })
        .await?;

    Ok(Json(note.into()))
}

/// Update only the supplied fields of a note
#[utoipa::path(
    patch,
    path = "/api/v1/notes/{id}",
    params(
        ("id" = Uuid, Path, description = "Note ID")
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated successfully", body = NoteResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Note not found"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Notes"
)]
pub async fn patch_note(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateNoteRequest>,
) -> AppResult<Json<NoteResponse>> {
    let note = state
        .sessions
        .with_session(move |txn| {
            Box::pin(async move {
                let service = NoteService::new(txn);
                service.get_owned(id, user.id).await?;
                service.partial_update(id, payload.into()).await
            })
        })
        .await?;

    Ok(Json(note.into()))
}

/// Permanently delete a note
#[utoipa::path(
    delete,
    path = "/api/v1/notes/{id}",
    params(
        ("id" = Uuid, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Number of deleted rows", body = AffectedRows),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Notes"
)]
pub async fn delete_note(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<AffectedRows>> {
    let result = state
        .sessions
        .with_session(move |txn| {
            Box::pin(async move {
                let service = NoteService::new(txn);
                let owned = service
                    .repository()
                    .get_first_by_filter(
                        Condition::all()
                            .add(Column::Id.eq(id))
                            .add(Column::UserId.eq(user.id)),
                    )
                    .await?;

                // Someone else's note is as absent as a missing one
                match owned {
                    Some(_) => service.delete_by_uuid(id).await,
                    None => Ok(AffectedRows { affected_rows: 0 }),
                }
            })
        })
        .await?;

    Ok(Json(result))
}

/// Flag a note as deleted, keeping the row
#[utoipa::path(
    post,
    path = "/api/v1/notes/{id}/soft-delete",
    params(
        ("id" = Uuid, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note flagged as deleted", body = NoteResponse),
        (status = 404, description = "Note not found"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Notes"
)]
pub async fn soft_delete_note(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<NoteResponse>> {
    let user_id = user.id;
    let note = state
        .sessions
        .with_session(move |txn| {
            Box::pin(async move {
                let service = NoteService::new(txn);
                service.get_owned(id, user_id).await?;
                service.soft_delete(id, user_id).await
            })
        })
        .await?;

    tracing::info!(note_id = %id, %user_id, "Note soft-deleted");
    Ok(Json(note.into()))
}
