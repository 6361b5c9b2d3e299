use async_trait::async_trait;
use ride_journal_sdk::{Image, ImageFilter, PageRequest};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, QueryTrait, Set,
};

use crate::domain::error::DomainError;
use crate::domain::pagination::LimitCfg;
use crate::domain::repos::{ImageRecord, ImagesRepository};
use crate::infra::storage::db::db_err;
use crate::infra::storage::entity::event;
use crate::infra::storage::entity::image::{ActiveModel as ImageAM, Column, Entity as ImageEntity};

/// ORM-based implementation of the `ImagesRepository` trait.
#[derive(Clone)]
pub struct OrmImagesRepository {
    limit_cfg: LimitCfg,
}

impl OrmImagesRepository {
    #[must_use]
    pub fn new(limit_cfg: LimitCfg) -> Self {
        Self { limit_cfg }
    }
}

#[async_trait]
impl ImagesRepository for OrmImagesRepository {
    async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<Image>, DomainError> {
        let found = ImageEntity::find_by_id(id).one(conn).await.map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn list<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        filter: ImageFilter,
        page: &PageRequest,
    ) -> Result<Vec<Image>, DomainError> {
        let window = self.limit_cfg.window(page);
        let mut query = ImageEntity::find();
        if let ImageFilter::ByEvent(event_id) = filter {
            query = query.filter(Column::EventId.eq(event_id));
        }
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
    ) -> Result<Vec<Image>, DomainError> {
        let rows = ImageEntity::find()
            .filter(Column::EventId.eq(event_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(conn)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn references_for<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        event_ids: &[i32],
    ) -> Result<Vec<String>, DomainError> {
        if event_ids.is_empty() {
            return Ok(Vec::new());
        }
        ImageEntity::find()
            .select_only()
            .column(Column::Reference)
            .filter(Column::EventId.is_in(event_ids.iter().copied()))
            .into_tuple::<String>()
            .all(conn)
            .await
            .map_err(db_err)
    }

    async fn insert<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        record: ImageRecord,
    ) -> Result<Image, DomainError> {
        let m = ImageAM {
            id: NotSet,
            event_id: Set(record.event_id),
            reference: Set(record.reference),
            content_type: Set(record.content_type),
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
        let owned_events = event::Entity::find()
            .select_only()
            .column(event::Column::Id)
            .filter(event::Column::UserId.eq(owner_id))
            .into_query();
        let res = ImageEntity::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::EventId.in_subquery(owned_events))
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(res.rows_affected)
    }

    async fn delete_for<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        event_ids: &[i32],
    ) -> Result<u64, DomainError> {
        if event_ids.is_empty() {
            return Ok(0);
        }
        let res = ImageEntity::delete_many()
            .filter(Column::EventId.is_in(event_ids.iter().copied()))
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(res.rows_affected)
    }
}
