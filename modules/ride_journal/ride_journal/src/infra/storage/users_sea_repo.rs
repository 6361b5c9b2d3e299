use async_trait::async_trait;
use ride_journal_sdk::{PageRequest, User, UserProfile};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::domain::error::DomainError;
use crate::domain::pagination::LimitCfg;
use crate::domain::repos::{UserChanges, UserRecord, UsersRepository};
use crate::infra::storage::db::db_err;
use crate::infra::storage::entity::user::{ActiveModel as UserAM, Column, Entity as UserEntity};

/// ORM-based implementation of the `UsersRepository` trait.
#[derive(Clone)]
pub struct OrmUsersRepository {
    limit_cfg: LimitCfg,
}

impl OrmUsersRepository {
    #[must_use]
    pub fn new(limit_cfg: LimitCfg) -> Self {
        Self { limit_cfg }
    }
}

#[async_trait]
impl UsersRepository for OrmUsersRepository {
    async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<User>, DomainError> {
        let found = UserEntity::find_by_id(id).one(conn).await.map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn get_profile<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<Option<UserProfile>, DomainError> {
        let found = UserEntity::find_by_id(id).one(conn).await.map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn find_credentials<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        username: &str,
    ) -> Result<Option<(User, String)>, DomainError> {
        let found = UserEntity::find()
            .filter(Column::Username.eq(username))
            .one(conn)
            .await
            .map_err(db_err)?;
        Ok(found.map(|m| {
            let hash = m.password_hash.clone();
            (m.into(), hash)
        }))
    }

    async fn list<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        page: &PageRequest,
    ) -> Result<Vec<UserProfile>, DomainError> {
        let window = self.limit_cfg.window(page);
        let rows = UserEntity::find()
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .limit(window.limit)
            .offset(window.offset)
            .all(conn)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn exists<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
    ) -> Result<bool, DomainError> {
        let count = UserEntity::find()
            .filter(Column::Id.eq(id))
            .count(conn)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn username_taken<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        username: &str,
    ) -> Result<bool, DomainError> {
        let count = UserEntity::find()
            .filter(Column::Username.eq(username))
            .count(conn)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn email_taken<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        email: &str,
    ) -> Result<bool, DomainError> {
        let count = UserEntity::find()
            .filter(Column::Email.eq(email))
            .count(conn)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }

    async fn insert<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        record: UserRecord,
    ) -> Result<User, DomainError> {
        let m = UserAM {
            id: NotSet,
            username: Set(record.username),
            email: Set(record.email),
            password_hash: Set(record.password_hash),
            display_name: Set(record.display_name),
            bio: Set(record.bio),
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
        caller_id: i32,
        changes: UserChanges,
    ) -> Result<u64, DomainError> {
        let mut update = UserEntity::update_many()
            .col_expr(Column::UpdatedAt, Expr::value(changes.updated_at))
            .filter(Column::Id.eq(id))
            .filter(Column::Id.eq(caller_id));
        if let Some(email) = changes.email {
            update = update.col_expr(Column::Email, Expr::value(email));
        }
        if let Some(hash) = changes.password_hash {
            update = update.col_expr(Column::PasswordHash, Expr::value(hash));
        }
        if let Some(display_name) = changes.display_name {
            update = update.col_expr(Column::DisplayName, Expr::value(display_name));
        }
        if let Some(bio) = changes.bio {
            update = update.col_expr(Column::Bio, Expr::value(bio));
        }
        let res = update.exec(conn).await.map_err(db_err)?;
        Ok(res.rows_affected)
    }

    async fn delete_owned<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        id: i32,
        caller_id: i32,
    ) -> Result<u64, DomainError> {
        let res = UserEntity::delete_many()
            .filter(Column::Id.eq(id))
            .filter(Column::Id.eq(caller_id))
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(res.rows_affected)
    }
}
