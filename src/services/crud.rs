use std::str::FromStr;

use async_trait::async_trait;
use sea_orm::{Condition, DatabaseTransaction, IntoActiveModel};
use uuid::Uuid;

use crate::entity::Record;
use crate::error::AppResult;
use crate::repositories::{AffectedRows, Repository, SoftDeletable, SoftDeleteInfo};
use crate::schemas::{CreateSchema, UpdateSchema};

/// Transport-agnostic operations every entity service exposes
#[async_trait]
pub trait CrudService: Send + Sync {
    type Model: Send;
    type Create: Send;
    type Update: Send;

    async fn get_by_uuid(&self, id: Uuid) -> AppResult<Self::Model>;

    async fn create(&self, input: Self::Create) -> AppResult<Self::Model>;

    /// Full replace of every declared field
    async fn update(&self, id: Uuid, input: Self::Update) -> AppResult<Self::Model>;

    /// Only the supplied fields are written
    async fn partial_update(&self, id: Uuid, input: Self::Update) -> AppResult<Self::Model>;

    async fn delete_by_uuid(&self, id: Uuid) -> AppResult<AffectedRows>;
}

/// Generic service over a [`Repository`] bound to the same entity and schemas
pub struct BaseService<'s, E, C, U> {
    repository: Repository<'s, E, C, U>,
}

impl<'s, E, C, U> BaseService<'s, E, C, U>
where
    E: Record,
    E::Model: IntoActiveModel<E::ActiveModel> + Send + Sync + 'static,
    E::ActiveModel: Send + 'static,
    E::Column: FromStr,
    C: CreateSchema<E>,
    U: UpdateSchema<E>,
{
    pub fn new(session: &'s DatabaseTransaction) -> Self {
        Self::from_repository(Repository::new(session))
    }

    pub fn from_repository(repository: Repository<'s, E, C, U>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &Repository<'s, E, C, U> {
        &self.repository
    }

    pub async fn get_all(&self) -> AppResult<Vec<E::Model>> {
        self.repository.list(None).await
    }

    pub async fn get_paginated(
        &self,
        limit: u64,
        offset: u64,
        order_by: Option<&str>,
        filters: Option<Condition>,
    ) -> AppResult<Vec<E::Model>> {
        self.repository
            .get_paginated(limit, offset, order_by, filters)
            .await
    }

    pub async fn count(&self, filters: Option<Condition>) -> AppResult<u64> {
        self.repository.count(filters).await
    }
}

impl<'s, E, C, U> BaseService<'s, E, C, U>
where
    E: Record,
    Repository<'s, E, C, U>: SoftDeletable,
{
    /// Flag the row as deleted by `deleted_by` instead of removing it
    pub async fn soft_delete(
        &self,
        id: Uuid,
        deleted_by: Uuid,
    ) -> AppResult<<Repository<'s, E, C, U> as SoftDeletable>::Model> {
        self.repository
            .soft_delete(id, SoftDeleteInfo::now(deleted_by))
            .await
    }
}

#[async_trait]
impl<'s, E, C, U> CrudService for BaseService<'s, E, C, U>
where
    E: Record,
    E::Model: IntoActiveModel<E::ActiveModel> + Send + Sync + 'static,
    E::ActiveModel: Send + 'static,
    E::Column: FromStr,
    C: CreateSchema<E>,
    U: UpdateSchema<E>,
{
    type Model = E::Model;
    type Create = C;
    type Update = U;

    async fn get_by_uuid(&self, id: Uuid) -> AppResult<E::Model> {
        self.repository.retrieve(id).await
    }

    async fn create(&self, input: C) -> AppResult<E::Model> {
        self.repository.create(input).await
    }

    async fn update(&self, id: Uuid, input: U) -> AppResult<E::Model> {
        self.repository.update(id, input, false).await
    }

    async fn partial_update(&self, id: Uuid, input: U) -> AppResult<E::Model> {
        self.repository.update(id, input, true).await
    }

    async fn delete_by_uuid(&self, id: Uuid) -> AppResult<AffectedRows> {
        self.repository.delete(id).await
    }
}
