use std::collections::HashSet;
use std::marker::PhantomData;
use std::str::FromStr;

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseTransaction, IdenStatic, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, UpdateMany, Value,
};
use serde::Serialize;
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{Record, SoftDeleteColumns};
use crate::error::{AppError, AppResult, ErrorCode};
use crate::schemas::{CreateSchema, UpdateSchema};

/// Number of rows a delete statement removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct AffectedRows {
    pub affected_rows: u64,
}

/// Entity-agnostic CRUD over one unit of work.
///
/// The type parameters bind the repository to entity `E`, its create schema
/// `C` and its update schema `U`; the binding is fixed for the value's
/// lifetime. Every statement runs on the borrowed transaction, so reads always
/// observe writes made earlier in the same session.
pub struct Repository<'s, E, C, U> {
    session: &'s DatabaseTransaction,
    _binding: PhantomData<fn() -> (E, C, U)>,
}

impl<'s, E, C, U> Repository<'s, E, C, U>
where
    E: Record,
    E::Model: IntoActiveModel<E::ActiveModel> + Send + Sync + 'static,
    E::ActiveModel: Send + 'static,
    E::Column: FromStr,
    C: CreateSchema<E>,
    U: UpdateSchema<E>,
{
    pub fn new(session: &'s DatabaseTransaction) -> Self {
        Self {
            session,
            _binding: PhantomData,
        }
    }

    pub fn session(&self) -> &'s DatabaseTransaction {
        self.session
    }

    /// Insert one row and return it with its server-generated fields
    pub async fn create(&self, input: C) -> AppResult<E::Model> {
        input.validate()?;

        let model = input.into_active_model().insert(self.session).await?;
        Ok(model)
    }

    /// Insert many rows in one statement; results follow input order
    pub async fn bulk_create(&self, inputs: Vec<C>) -> AppResult<Vec<E::Model>> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }
        for input in &inputs {
            input.validate()?;
        }

        let models = E::insert_many(inputs.into_iter().map(|input| input.into_active_model()))
            .exec_with_returning_many(self.session)
            .await?;

        Ok(models)
    }

    pub async fn retrieve(&self, id: Uuid) -> AppResult<E::Model> {
        E::find()
            .filter(E::id_column().eq(id))
            .one(self.session)
            .await?
            .ok_or_else(|| AppError::object_not_found(E::NAME))
    }

    /// Fetch every requested row, failing if any one of them is missing
    pub async fn bulk_retrieve(&self, ids: &[Uuid]) -> AppResult<Vec<E::Model>> {
        let models = E::find()
            .filter(E::id_column().is_in(ids.iter().copied()))
            .all(self.session)
            .await?;

        let found: HashSet<Uuid> = models.iter().map(E::id_of).collect();
        if let Some(missing) = ids.iter().find(|id| !found.contains(*id)) {
            return Err(AppError::NotFound {
                code: ErrorCode::ObjectNotFound,
                detail: format!("{} {} not found", E::NAME, missing),
            });
        }

        Ok(models)
    }

    /// All matching rows, oldest first
    pub async fn list(&self, filters: Option<Condition>) -> AppResult<Vec<E::Model>> {
        let models = Self::select(filters)
            .order_by_asc(E::created_at_column())
            .all(self.session)
            .await?;

        Ok(models)
    }

    /// A window of matching rows ordered by `order_by_field` (default `created_at`)
    pub async fn get_paginated(
        &self,
        limit: u64,
        offset: u64,
        order_by_field: Option<&str>,
        filters: Option<Condition>,
    ) -> AppResult<Vec<E::Model>> {
        let models = Self::select(filters)
            .order_by_asc(Self::order_column(order_by_field))
            .order_by_asc(E::id_column())
            .limit(limit)
            .offset(offset)
            .all(self.session)
            .await?;

        Ok(models)
    }

    pub async fn count(&self, filters: Option<Condition>) -> AppResult<u64> {
        let count = Self::select(filters).count(self.session).await?;
        Ok(count)
    }

    /// Apply `input` to one row and return its new state.
    ///
    /// An input with nothing to change skips the UPDATE and returns the row
    /// as it is.
    pub async fn update(&self, id: Uuid, input: U, partial: bool) -> AppResult<E::Model> {
        input.validate()?;

        let changes = input.changes(partial)?;
        if changes.is_empty() {
            tracing::debug!(entity = E::NAME, %id, "Nothing to update");
            return self.retrieve(id).await;
        }

        let result = Self::assignments(changes)
            .col_expr(E::updated_at_column(), current_timestamp())
            .filter(E::id_column().eq(id))
            .exec(self.session)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::object_not_found(E::NAME));
        }

        self.retrieve(id).await
    }

    /// Apply `input` to every row in `ids`.
    ///
    /// Returns the rows as they were before the update.
    pub async fn bulk_update(
        &self,
        ids: &[Uuid],
        input: U,
        partial: bool,
    ) -> AppResult<Vec<E::Model>> {
        input.validate()?;

        let changes = input.changes(partial)?;
        let snapshot = self.bulk_retrieve(ids).await?;
        if changes.is_empty() {
            return Ok(snapshot);
        }

        Self::assignments(changes)
            .col_expr(E::updated_at_column(), current_timestamp())
            .filter(E::id_column().is_in(ids.iter().copied()))
            .exec(self.session)
            .await?;

        Ok(snapshot)
    }

    /// Remove one row; deleting a missing row is not an error
    pub async fn delete(&self, id: Uuid) -> AppResult<AffectedRows> {
        let result = E::delete_many()
            .filter(E::id_column().eq(id))
            .exec(self.session)
            .await?;

        Ok(AffectedRows {
            affected_rows: result.rows_affected,
        })
    }

    pub async fn delete_all(&self) -> AppResult<AffectedRows> {
        let result = E::delete_many().exec(self.session).await?;

        Ok(AffectedRows {
            affected_rows: result.rows_affected,
        })
    }

    /// Oldest row matching `filters`
    pub async fn get_first_by_filter(&self, filters: Condition) -> AppResult<Option<E::Model>> {
        let model = E::find()
            .filter(filters)
            .order_by_asc(E::created_at_column())
            .order_by_asc(E::id_column())
            .one(self.session)
            .await?;

        Ok(model)
    }

    /// Most recently created row matching `filters`
    pub async fn get_last_by_filter(&self, filters: Condition) -> AppResult<Option<E::Model>> {
        let model = E::find()
            .filter(filters)
            .order_by_desc(E::created_at_column())
            .order_by_desc(E::id_column())
            .one(self.session)
            .await?;

        Ok(model)
    }

    /// Return the row whose fields all equal `input`, creating it if absent
    pub async fn get_or_create(&self, input: C) -> AppResult<E::Model> {
        if let Some(existing) = self.get_first_by_filter(input.match_condition()).await? {
            return Ok(existing);
        }

        self.create(input).await
    }

    /// Write raw column values without schema validation.
    ///
    /// Low-level escape hatch: `updated_at` is left alone unless it is part of
    /// `fields`, and the row is returned as it was before the update. The
    /// identifier and `created_at` cannot be written.
    pub async fn update_with_raw_values<I, K>(&self, id: Uuid, fields: I) -> AppResult<E::Model>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: AsRef<str>,
    {
        let changes = fields
            .into_iter()
            .map(|(field, value)| {
                let field = field.as_ref();
                let column = field
                    .parse::<E::Column>()
                    .map_err(|_| AppError::field_not_found(E::NAME, field))?;
                if Self::is_server_owned(&column) {
                    return Err(AppError::Validation(format!(
                        "{} is read-only on {}",
                        field,
                        E::NAME
                    )));
                }
                Ok((column, value))
            })
            .collect::<AppResult<Vec<_>>>()?;

        let snapshot = self.retrieve(id).await?;
        if changes.is_empty() {
            return Ok(snapshot);
        }

        Self::assignments(changes)
            .filter(E::id_column().eq(id))
            .exec(self.session)
            .await?;

        Ok(snapshot)
    }

    fn is_server_owned(column: &E::Column) -> bool {
        let name = column.as_str();
        name == E::id_column().as_str() || name == E::created_at_column().as_str()
    }

    fn select(filters: Option<Condition>) -> Select<E> {
        match filters {
            Some(filters) => E::find().filter(filters),
            None => E::find(),
        }
    }

    fn assignments(changes: Vec<(E::Column, Value)>) -> UpdateMany<E> {
        changes
            .into_iter()
            .fold(E::update_many(), |stmt, (column, value)| {
                stmt.col_expr(column, Expr::value(value))
            })
    }

    fn order_column(field: Option<&str>) -> E::Column {
        match field {
            Some(field) => field.parse::<E::Column>().unwrap_or_else(|_| {
                tracing::warn!(entity = E::NAME, field, "Unknown order field, using created_at");
                E::created_at_column()
            }),
            None => E::created_at_column(),
        }
    }
}

fn current_timestamp() -> SimpleExpr {
    Expr::cust("CURRENT_TIMESTAMP")
}

/// Who removed a row, and when
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftDeleteInfo {
    pub deleted_by: Uuid,
    pub deleted_at: OffsetDateTime,
}

impl SoftDeleteInfo {
    pub fn now(deleted_by: Uuid) -> Self {
        Self {
            deleted_by,
            deleted_at: OffsetDateTime::now_utc(),
        }
    }
}

/// Repositories able to flag rows as deleted instead of removing them
#[async_trait]
pub trait SoftDeletable: Send + Sync {
    type Model;

    async fn soft_delete(&self, id: Uuid, info: SoftDeleteInfo) -> AppResult<Self::Model>;
}

#[async_trait]
impl<'s, E, C, U> SoftDeletable for Repository<'s, E, C, U>
where
    E: SoftDeleteColumns,
    E::Model: IntoActiveModel<E::ActiveModel> + Send + Sync + 'static,
    E::ActiveModel: Send + 'static,
    E::Column: FromStr,
    C: CreateSchema<E>,
    U: UpdateSchema<E>,
{
    type Model = E::Model;

    async fn soft_delete(&self, id: Uuid, info: SoftDeleteInfo) -> AppResult<E::Model> {
        let result = E::update_many()
            .col_expr(E::is_deleted_column(), Expr::value(true))
            .col_expr(E::deleted_at_column(), Expr::value(info.deleted_at))
            .col_expr(E::deleted_by_column(), Expr::value(info.deleted_by))
            .col_expr(E::updated_at_column(), current_timestamp())
            .filter(E::id_column().eq(id))
            .exec(self.session)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::object_not_found(E::NAME));
        }

        self.retrieve(id).await
    }
}
