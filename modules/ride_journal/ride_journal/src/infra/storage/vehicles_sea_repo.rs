use async_trait::async_trait;
use ride_journal_sdk::{PageRequest, Vehicle, VehicleFilter};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::domain::error::DomainError;
use crate::domain::pagination::LimitCfg;
use crate::domain::repos::{VehicleChanges, VehicleRecord, VehiclesRepository};
use crate::infra::storage::db::db_err;
use crate::infra::storage::entity::vehicle::{
    ActiveModel as VehicleAM, Column, Entity as VehicleEntity,
};
use crate::infra::storage::mapper::try_collect;

/// ORM-based implementation of the `VehiclesRepository` trait.
#[derive(Clone)]
pub struct OrmVehiclesRepository {
    limit_cfg: LimitCfg,
}

impl OrmVehiclesRepository {
    #[must_use]
    pub fn new(limit_cfg: LimitCfg) -> Self {
        Self { limit_cfg }
    }
}

#[async_trait]
impl VehiclesRepository for OrmVehiclesRepository {
    async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<Vehicle>, DomainError> {
        VehicleEntity::find_by_id(id)
            .one(conn)
            .await
            .map_err(db_err)?
            .map(Vehicle::try_from)
            .transpose()
    }

    async fn list<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        filter: VehicleFilter,
        page: &PageRequest,
    ) -> Result<Vec<Vehicle>, DomainError> {
        let window = self.limit_cfg.window(page);
        let mut query = VehicleEntity::find();
        query = match filter {
            VehicleFilter::All => query,
            VehicleFilter::ByUser(user_id) => query.filter(Column::UserId.eq(user_id)),
            VehicleFilter::ByType(t) => query.filter(Column::VehicleType.eq(t.as_str())),
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

    async fn list_by_user<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: i32,
    ) -> Result<Vec<Vehicle>, DomainError> {
        let rows = VehicleEntity::find()
            .filter(Column::UserId.eq(user_id))
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
        let count = VehicleEntity::find()
            .filter(Column::Id.eq(id))
            .count(conn)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn insert<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        record: VehicleRecord,
    ) -> Result<Vehicle, DomainError> {
        let m = VehicleAM {
            id: NotSet,
            user_id: Set(record.user_id),
            name: Set(record.name),
            make: Set(record.make),
            model_name: Set(record.model),
            year: Set(record.year),
            vehicle_type: Set(record.vehicle_type.as_str().to_owned()),
            image: Set(record.image),
            created_at: Set(record.created_at),
            updated_at: Set(record.created_at),
        };
        let inserted = m.insert(conn).await.map_err(db_err)?;
        Vehicle::try_from(inserted)
    }

    async fn update_owned<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
        owner_id: i32,
        changes: VehicleChanges,
    ) -> Result<u64, DomainError> {
        let mut update = VehicleEntity::update_many()
            .col_expr(Column::UpdatedAt, Expr::value(changes.updated_at))
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(owner_id));
        if let Some(name) = changes.name {
            update = update.col_expr(Column::Name, Expr::value(name));
        }
        if let Some(make) = changes.make {
            update = update.col_expr(Column::Make, Expr::value(make));
        }
        if let Some(model) = changes.model {
            update = update.col_expr(Column::ModelName, Expr::value(model));
        }
        if let Some(year) = changes.year {
            update = update.col_expr(Column::Year, Expr::value(year));
        }
        if let Some(t) = changes.vehicle_type {
            update = update.col_expr(Column::VehicleType, Expr::value(t.as_str()));
        }
        if let Some(image) = changes.image {
            update = update.col_expr(Column::Image, Expr::value(image));
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
        let res = VehicleEntity::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::UserId.eq(owner_id))
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(res.rows_affected)
    }

    async fn delete_by_user<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: i32,
    ) -> Result<u64, DomainError> {
        let res = VehicleEntity::delete_many()
            .filter(Column::UserId.eq(user_id))
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(res.rows_affected)
    }
}
