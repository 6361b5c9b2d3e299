use async_trait::async_trait;
use ride_journal_sdk::{Comment, CommentFilter, PageRequest};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::domain::error::DomainError;
use crate::domain::pagination::LimitCfg;
use crate::domain::repos::{CommentChanges, CommentRecord, CommentsRepository};
use crate::infra::storage::db::db_err;
use crate::infra::storage::entity::comment::{
    ActiveModel as CommentAM, Column, Entity as CommentEntity,
};

/// ORM-based implementation of the `CommentsRepository` trait.
#[derive(Clone)]
pub struct OrmCommentsRepository {
    limit_cfg: LimitCfg,
}

impl OrmCommentsRepository {
    #[must_use]
    pub fn new(limit_cfg: LimitCfg) -> Self {
        Self { limit_cfg }
    }
}

#[async_trait]
impl CommentsRepository for OrmCommentsRepository {
    async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<Comment>, DomainError> {
        let found = CommentEntity::find_by_id(id)
            .one(conn)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn list<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        filter: CommentFilter,
        page: &PageRequest,
    ) -> Result<Vec<Comment>, DomainError> {
        let window = self.limit_cfg.window(page);
        let mut query = CommentEntity::find();
        query = match filter {
            CommentFilter::All => query,
            CommentFilter::ByEvent(event_id) => query.filter(Column::EventId.eq(event_id)),
            CommentFilter::ByUser(user_id) => query.filter(Column::UserId.eq(user_id)),
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
    ) -> Result<Vec<Comment>, DomainError> {
        let rows = CommentEntity::find()
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
        record: CommentRecord,
    ) -> Result<Comment, DomainError> {
        let m = CommentAM {
            id: NotSet,
            event_id: Set(record.event_id),
            user_id: Set(record.user_id),
            content: Set(record.content),
            created_at: Set(record.created_at),
            updated_at: Set(record.created_at),
        };
        let inserted = m.insert(conn).await.map_err(db_err)?;
        Ok(inserted.into())
    }

    async fn update_owned<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
        owner_id: i32,
        changes: CommentChanges,
    ) -> Result<u64, DomainError> {
        let mut update = CommentEntity::update_many()
            .col_expr(Column::UpdatedAt, Expr::value(changes.updated_at))
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(owner_id));
        if let Some(content) = changes.content {
            update = update.col_expr(Column::Content, Expr::value(content));
        }
        let res = update.exec(conn).await.map_err(db_err)?;
        Ok(res.rows_affected)
    }

    async fn delete_owned<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
        owner_id: i32,
    ) -> Result<u64, DomainError> {
        let res = CommentEntity::delete_many()
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
        let res = CommentEntity::delete_many()
            .filter(cond)
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(res.rows_affected)
    }
}
