use async_trait::async_trait;
use ride_journal_sdk::{Like, LikeFilter, PageRequest};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::domain::error::DomainError;
use crate::domain::pagination::LimitCfg;
use crate::domain::repos::{LikeRecord, LikesRepository};
use crate::infra::storage::db::db_err;
use crate::infra::storage::entity::like::{ActiveModel as LikeAM, Column, Entity as LikeEntity};

/// ORM-based implementation of the `LikesRepository` trait.
#[derive(Clone)]
pub struct OrmLikesRepository {
    limit_cfg: LimitCfg,
}

impl OrmLikesRepository {
    #[must_use]
    pub fn new(limit_cfg: LimitCfg) -> Self {
        Self { limit_cfg }
    }
}

#[async_trait]
impl LikesRepository for OrmLikesRepository {
    async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<Like>, DomainError> {
        let found = LikeEntity::find_by_id(id).one(conn).await.map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn find_pair<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: i32,
        event_id: i32,
    ) -> Result<Option<Like>, DomainError> {
        let found = LikeEntity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::EventId.eq(event_id))
            .one(conn)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn list<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        filter: LikeFilter,
        page: &PageRequest,
    ) -> Result<Vec<Like>, DomainError> {
        let window = self.limit_cfg.window(page);
        let mut query = LikeEntity::find();
        query = match filter {
            LikeFilter::All => query,
            LikeFilter::ByEvent(event_id) => query.filter(Column::EventId.eq(event_id)),
            LikeFilter::ByUser(user_id) => query.filter(Column::UserId.eq(user_id)),
        };
        let rows = query
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(window.limit)
            .offset(window.offset)
            .all(conn)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_by_event<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        event_id: i32,
    ) -> Result<Vec<Like>, DomainError> {
        let rows = LikeEntity::find()
            .filter(Column::EventId.eq(event_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(conn)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        record: LikeRecord,
    ) -> Result<Like, DomainError> {
        let m = LikeAM {
            id: NotSet,
            user_id: Set(record.user_id),
            event_id: Set(record.event_id),
            created_at: Set(record.created_at),
            updated_at: Set(record.created_at),
        };
        let inserted = m.insert(conn).await.map_err(db_err)?;
        Ok(inserted.into())
    }

    async fn delete_owned<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
        owner_id: i32,
    ) -> Result<u64, DomainError> {
        let res = LikeEntity::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(owner_id))
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(res.rows_affected)
    }

    async fn delete_for<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        event_ids: &[i32],
        user_id: Option<i32>,
    ) -> Result<u64, DomainError> {
        let mut cond = Condition::any();
        if !event_ids.is_empty() {
            cond = cond.add(Column::EventId.is_in(event_ids.iter().copied()));
        }
        if let Some(user_id) = user_id {
            cond = cond.add(Column::UserId.eq(user_id));
        }
        if cond.is_empty() {
            return Ok(0);
        }
        let res = LikeEntity::delete_many()
            .filter(cond)
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(res.rows_affected)
    }
}
