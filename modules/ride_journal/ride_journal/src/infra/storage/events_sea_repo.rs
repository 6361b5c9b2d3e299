use async_trait::async_trait;
use ride_journal_sdk::{Event, EventFilter, PageRequest};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::domain::error::DomainError;
use crate::domain::pagination::LimitCfg;
use crate::domain::repos::{EventChanges, EventRecord, EventsRepository};
use crate::infra::storage::db::db_err;
use crate::infra::storage::entity::event::{ActiveModel as EventAM, Column, Entity as EventEntity};
use crate::infra::storage::mapper::try_collect;

/// ORM-based implementation of the `EventsRepository` trait.
#[derive(Clone)]
pub struct OrmEventsRepository {
    limit_cfg: LimitCfg,
}

impl OrmEventsRepository {
    #[must_use]
    pub fn new(limit_cfg: LimitCfg) -> Self {
        Self { limit_cfg }
    }
}

#[async_trait]
impl EventsRepository for OrmEventsRepository {
    async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<Event>, DomainError> {
        EventEntity::find_by_id(id)
            .one(conn)
            .await
            .map_err(db_err)?
            .map(Event::try_from)
            .transpose()
    }

    async fn list<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        filter: EventFilter,
        page: &PageRequest,
    ) -> Result<Vec<Event>, DomainError> {
        let window = self.limit_cfg.window(page);
        let mut query = EventEntity::find();
        query = match filter {
            EventFilter::All => query,
            EventFilter::ByVehicle(vehicle_id) => query.filter(Column::VehicleId.eq(vehicle_id)),
            EventFilter::ByUser(user_id) => query.filter(Column::UserId.eq(user_id)),
            EventFilter::ByType(t) => query.filter(Column::EventType.eq(t.as_str())),
        };
        let rows = query
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(window.limit)
            .offset(window.offset)
            .all(conn)
            .await
            .map_err(db_err)?;
        try_collect(rows)
    }

    async fn list_by_vehicle<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        vehicle_id: i32,
    ) -> Result<Vec<Event>, DomainError> {
        let rows = EventEntity::find()
            .filter(Column::VehicleId.eq(vehicle_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(conn)
            .await
            .map_err(db_err)?;
        try_collect(rows)
    }

    async fn exists<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<bool, DomainError> {
        let count = EventEntity::find()
            .filter(Column::Id.eq(id))
            .count(conn)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn ids_for<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        vehicle_ids: &[i32],
        user_id: Option<i32>,
    ) -> Result<Vec<i32>, DomainError> {
        let mut cond = Condition::any();
        if !vehicle_ids.is_empty() {
            cond = cond.add(Column::VehicleId.is_in(vehicle_ids.iter().copied()));
        }
        if let Some(user_id) = user_id {
            cond = cond.add(Column::UserId.eq(user_id));
        }
        if cond.is_empty() {
            return Ok(Vec::new());
        }
        EventEntity::find()
            .select_only()
            .column(Column::Id)
            .filter(cond)
            .into_tuple::<i32>()
            .all(conn)
            .await
            .map_err(db_err)
    }

    async fn insert<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        record: EventRecord,
    ) -> Result<Event, DomainError> {
        let m = EventAM {
            id: NotSet,
            vehicle_id: Set(record.vehicle_id),
            user_id: Set(record.user_id),
            title: Set(record.title),
            detail: Set(record.detail),
            event_type: Set(record.event_type.as_str().to_owned()),
            date: Set(record.date),
            odometer: Set(record.odometer),
            published: Set(record.published),
            created_at: Set(record.created_at),
            updated_at: Set(record.created_at),
        };
        let inserted = m.insert(conn).await.map_err(db_err)?;
        Event::try_from(inserted)
    }

    async fn update_owned<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
        owner_id: i32,
        changes: EventChanges,
    ) -> Result<u64, DomainError> {
        let mut update = EventEntity::update_many()
            .col_expr(Column::UpdatedAt, Expr::value(changes.updated_at))
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(owner_id));
        if let Some(title) = changes.title {
            update = update.col_expr(Column::Title, Expr::value(title));
        }
        if let Some(detail) = changes.detail {
            update = update.col_expr(Column::Detail, Expr::value(detail));
        }
        if let Some(t) = changes.event_type {
            update = update.col_expr(Column::EventType, Expr::value(t.as_str()));
        }
        if let Some(date) = changes.date {
            update = update.col_expr(Column::Date, Expr::value(date));
        }
        if let Some(odometer) = changes.odometer {
            update = update.col_expr(Column::Odometer, Expr::value(odometer));
        }
        if let Some(published) = changes.published {
            update = update.col_expr(Column::Published, Expr::value(published));
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
        let res = EventEntity::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(owner_id))
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(res.rows_affected)
    }

    async fn delete_by_ids<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        ids: &[i32],
    ) -> Result<u64, DomainError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let res = EventEntity::delete_many()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(res.rows_affected)
    }
}
