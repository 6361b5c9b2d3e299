use std::sync::Arc;

use ride_journal_sdk::{
    NewUser, PageRequest, SecurityContext, User, UserPatch, UserProfile, UserWithVehicles,
};
use tracing::instrument;

use super::cascade::{discard_blobs, purge_events};
use super::{commit, now, ServiceDeps};
use crate::domain::error::DomainError;
use crate::domain::guard::{self, Owned};
use crate::domain::repos::{
    CommentsRepository, EventsRepository, LikesRepository, RepoSet, UserChanges, UserRecord,
    UsersRepository, VehiclesRepository,
};
use crate::infra::auth::password;

const ENTITY: &str = User::ENTITY;

/// User accounts. An account is owned by itself.
pub struct UsersService<R: RepoSet> {
    deps: Arc<ServiceDeps<R>>,
}

impl<R: RepoSet> UsersService<R> {
    pub(crate) fn new(deps: Arc<ServiceDeps<R>>) -> Self {
        Self { deps }
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<User>, DomainError> {
        tracing::debug!("Getting user by id");
        self.deps.repos.users.get(&self.deps.db, id).await
    }

    #[instrument(skip(self))]
    pub async fn get_profile(&self, id: i32) -> Result<Option<UserProfile>, DomainError> {
        self.deps.repos.users.get_profile(&self.deps.db, id).await
    }

    #[instrument(skip(self))]
    pub async fn list(&self, page: PageRequest) -> Result<Vec<UserProfile>, DomainError> {
        let users = self.deps.repos.users.list(&self.deps.db, &page).await?;
        tracing::debug!("Listed {} users", users.len());
        Ok(users)
    }

    /// A user's public profile together with the vehicles they own.
    #[instrument(skip(self))]
    pub async fn get_with_vehicles(
        &self,
        id: i32,
    ) -> Result<Option<UserWithVehicles>, DomainError> {
        let conn = &self.deps.db;
        let Some(profile) = self.deps.repos.users.get_profile(conn, id).await? else {
            return Ok(None);
        };
        let vehicles = self.deps.repos.vehicles.list_by_user(conn, id).await?;
        Ok(Some(UserWithVehicles { profile, vehicles }))
    }

    /// Sign up a new user.
    #[instrument(skip(self, new_user), fields(username = %new_user.username))]
    pub async fn register(&self, new_user: NewUser) -> Result<User, DomainError> {
        tracing::info!("Registering user");

        let NewUser {
            username,
            email,
            password,
            display_name,
            bio,
        } = new_user;

        validate_username(&username)?;
        validate_email(&email)?;
        validate_password(&password)?;

        let repos = &self.deps.repos;
        let conn = &self.deps.db;
        if repos.users.username_taken(conn, &username).await? {
            return Err(DomainError::conflict(format!(
                "username '{username}' is already taken"
            )));
        }
        if repos.users.email_taken(conn, &email).await? {
            return Err(DomainError::conflict(format!(
                "email '{email}' is already registered"
            )));
        }

        let record = UserRecord {
            username,
            email,
            password_hash: password::hash_password(&password)?,
            display_name,
            bio,
            created_at: now(),
        };
        // A concurrent sign-up with the same name surfaces as Conflict via the unique index.
        let user = repos.users.insert(conn, record).await?;

        tracing::info!("Successfully registered user with id={}", user.id);
        Ok(user)
    }

    /// Check a username/password pair. `None` means the pair does not match.
    #[instrument(skip(self, password))]
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let found = self
            .deps
            .repos
            .users
            .find_credentials(&self.deps.db, username)
            .await?;
        let Some((user, hash)) = found else {
            tracing::debug!("unknown username");
            return Ok(None);
        };
        if password::verify_password(password, &hash)? {
            Ok(Some(user))
        } else {
            tracing::debug!("password mismatch");
            Ok(None)
        }
    }

    #[instrument(skip(self, ctx, patch), fields(caller = ctx.subject_id()))]
    pub async fn update(
        &self,
        ctx: &SecurityContext,
        id: i32,
        patch: UserPatch,
    ) -> Result<User, DomainError> {
        tracing::info!("Updating user");

        let repos = &self.deps.repos;
        let current = repos
            .users
            .get(&self.deps.db, id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))?;
        guard::ensure_owner(&current, ctx)?;

        let UserPatch {
            email,
            password,
            display_name,
            bio,
        } = patch;

        if let Some(email) = &email {
            validate_email(email)?;
            if *email != current.email && repos.users.email_taken(&self.deps.db, email).await? {
                return Err(DomainError::conflict(format!(
                    "email '{email}' is already registered"
                )));
            }
        }
        let password_hash = match password {
            Some(p) => {
                validate_password(&p)?;
                Some(password::hash_password(&p)?)
            }
            None => None,
        };

        let changes = UserChanges {
            email,
            password_hash,
            display_name,
            bio,
            updated_at: now(),
        };

        let txn = self.deps.begin().await?;
        let rows = repos
            .users
            .update_owned(&txn, id, ctx.subject_id(), changes)
            .await?;
        if rows == 0 {
            let current = repos.users.get(&txn, id).await?;
            return Err(guard::resolve_missed_write(ENTITY, id, current));
        }
        let updated = repos
            .users
            .get(&txn, id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))?;
        commit(txn).await?;

        tracing::info!("Successfully updated user");
        Ok(updated)
    }

    /// Delete the caller's own account and everything it owns: vehicles
    /// (with all their events), its events elsewhere, its comments and likes.
    #[instrument(skip(self, ctx), fields(caller = ctx.subject_id()))]
    pub async fn delete(&self, ctx: &SecurityContext, id: i32) -> Result<u64, DomainError> {
        tracing::info!("Deleting user");

        let repos = &self.deps.repos;
        let txn = self.deps.begin().await?;

        let current = repos
            .users
            .get(&txn, id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))?;
        guard::ensure_owner(&current, ctx)?;

        let vehicles = repos.vehicles.list_by_user(&txn, id).await?;
        let vehicle_ids: Vec<i32> = vehicles.iter().map(|v| v.id).collect();
        let event_ids = repos.events.ids_for(&txn, &vehicle_ids, Some(id)).await?;

        let mut orphaned = purge_events(repos, &txn, &event_ids).await?;
        repos.comments.delete_for(&txn, &[], Some(id)).await?;
        repos.likes.delete_for(&txn, &[], Some(id)).await?;
        repos.vehicles.delete_by_user(&txn, id).await?;

        let rows = repos
            .users
            .delete_owned(&txn, id, ctx.subject_id())
            .await?;
        if rows == 0 {
            let current = repos.users.get(&txn, id).await?;
            return Err(guard::resolve_missed_write(ENTITY, id, current));
        }
        commit(txn).await?;

        orphaned.extend(vehicles.into_iter().map(|v| v.image));
        discard_blobs(
            self.deps.blobs.as_ref(),
            orphaned,
            &self.deps.config.default_vehicle_image,
        )
        .await;

        tracing::info!(
            vehicles = vehicle_ids.len(),
            events = event_ids.len(),
            "Successfully deleted user"
        );
        Ok(rows)
    }
}

fn validate_username(username: &str) -> Result<(), DomainError> {
    let len = username.chars().count();
    if !(3..=64).contains(&len) {
        return Err(DomainError::validation(
            "username",
            "must be between 3 and 64 characters",
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
    {
        return Err(DomainError::validation(
            "username",
            "may only contain letters, digits, '.', '_' and '-'",
        ));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), DomainError> {
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if valid {
        Ok(())
    } else {
        Err(DomainError::validation("email", "is not an email address"))
    }
}

fn validate_password(password: &str) -> Result<(), DomainError> {
    if password.chars().count() < 8 {
        return Err(DomainError::validation(
            "password",
            "must be at least 8 characters",
        ));
    }
    Ok(())
}
