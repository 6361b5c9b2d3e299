use std::sync::Arc;

use ride_journal_sdk::{
    NewVehicle, PageRequest, SecurityContext, Vehicle, VehicleFilter, VehiclePatch,
    VehicleWithRelations,
};
use tracing::instrument;

use super::cascade::{discard_blobs, purge_events};
use super::{commit, now, ServiceDeps};
use crate::domain::error::DomainError;
use crate::domain::guard::{self, Owned};
use crate::domain::repos::{
    EventsRepository, RepoSet, UsersRepository, VehicleChanges, VehicleRecord, VehiclesRepository,
};

const ENTITY: &str = Vehicle::ENTITY;

/// Vehicles and their image reference.
pub struct VehiclesService<R: RepoSet> {
    deps: Arc<ServiceDeps<R>>,
}

impl<R: RepoSet> VehiclesService<R> {
    pub(crate) fn new(deps: Arc<ServiceDeps<R>>) -> Self {
        Self { deps }
    }

    fn default_image(&self) -> &str {
        &self.deps.config.default_vehicle_image
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<Vehicle>, DomainError> {
        tracing::debug!("Getting vehicle by id");
        self.deps.repos.vehicles.get(&self.deps.db, id).await
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: VehicleFilter,
        page: PageRequest,
    ) -> Result<Vec<Vehicle>, DomainError> {
        let vehicles = self
            .deps
            .repos
            .vehicles
            .list(&self.deps.db, filter, &page)
            .await?;
        tracing::debug!("Listed {} vehicles", vehicles.len());
        Ok(vehicles)
    }

    /// The vehicle, its owner's public profile and all its events.
    #[instrument(skip(self))]
    pub async fn get_with_relations(
        &self,
        id: i32,
    ) -> Result<Option<VehicleWithRelations>, DomainError> {
        let conn = &self.deps.db;
        let repos = &self.deps.repos;

        let Some(vehicle) = repos.vehicles.get(conn, id).await? else {
            return Ok(None);
        };
        let owner = repos
            .users
            .get_profile(conn, vehicle.user_id)
            .await?
            .ok_or_else(|| {
                DomainError::referential_integrity(format!(
                    "vehicle {id} refers to missing user {}",
                    vehicle.user_id
                ))
            })?;
        let events = repos.events.list_by_vehicle(conn, id).await?;

        Ok(Some(VehicleWithRelations {
            vehicle,
            owner,
            events,
        }))
    }

    #[instrument(skip(self, ctx, new_vehicle), fields(caller = ctx.subject_id()))]
    pub async fn create(
        &self,
        ctx: &SecurityContext,
        new_vehicle: NewVehicle,
    ) -> Result<Vehicle, DomainError> {
        tracing::info!("Creating vehicle");

        guard::ensure_claimed_owner(ENTITY, new_vehicle.user_id, ctx)?;

        let NewVehicle {
            user_id,
            name,
            make,
            model,
            year,
            vehicle_type,
            image,
        } = new_vehicle;

        if !self.deps.repos.users.exists(&self.deps.db, user_id).await? {
            return Err(DomainError::referential_integrity(format!(
                "user {user_id} does not exist"
            )));
        }

        let image = match image {
            Some(upload) => self.deps.blobs.put(&upload).await?,
            None => self.default_image().to_owned(),
        };

        let record = VehicleRecord {
            user_id,
            name,
            make,
            model,
            year,
            vehicle_type,
            image: image.clone(),
            created_at: now(),
        };

        match self.deps.repos.vehicles.insert(&self.deps.db, record).await {
            Ok(vehicle) => {
                tracing::info!("Successfully created vehicle with id={}", vehicle.id);
                Ok(vehicle)
            }
            Err(e) => {
                discard_blobs(self.deps.blobs.as_ref(), [image], self.default_image()).await;
                Err(e)
            }
        }
    }

    #[instrument(skip(self, ctx, patch), fields(caller = ctx.subject_id()))]
    pub async fn update(
        &self,
        ctx: &SecurityContext,
        id: i32,
        patch: VehiclePatch,
    ) -> Result<Vehicle, DomainError> {
        tracing::info!("Updating vehicle");

        // Reject early so a stranger never gets to write a blob.
        let current = self
            .deps
            .repos
            .vehicles
            .get(&self.deps.db, id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))?;
        guard::ensure_owner(&current, ctx)?;

        let VehiclePatch {
            name,
            make,
            model,
            year,
            vehicle_type,
            image,
        } = patch;

        let new_image = match image {
            Some(upload) => Some(self.deps.blobs.put(&upload).await?),
            None => None,
        };

        let changes = VehicleChanges {
            name,
            make,
            model,
            year,
            vehicle_type,
            image: new_image.clone(),
            updated_at: now(),
        };

        match self.write_update(ctx, id, changes).await {
            Ok((updated, previous_image)) => {
                if new_image.is_some() {
                    discard_blobs(
                        self.deps.blobs.as_ref(),
                        [previous_image],
                        self.default_image(),
                    )
                    .await;
                }
                tracing::info!("Successfully updated vehicle");
                Ok(updated)
            }
            Err(e) => {
                discard_blobs(self.deps.blobs.as_ref(), new_image, self.default_image()).await;
                Err(e)
            }
        }
    }

    /// Conditional write; returns the updated row and the image it replaced.
    async fn write_update(
        &self,
        ctx: &SecurityContext,
        id: i32,
        changes: VehicleChanges,
    ) -> Result<(Vehicle, String), DomainError> {
        let repos = &self.deps.repos;
        let txn = self.deps.begin().await?;

        // Read inside the transaction so the replaced image is the one overwritten.
        let previous_image = repos
            .vehicles
            .get(&txn, id)
            .await?
            .map(|v| v.image)
            .unwrap_or_default();

        let rows = repos
            .vehicles
            .update_owned(&txn, id, ctx.subject_id(), changes)
            .await?;
        if rows == 0 {
            let current = repos.vehicles.get(&txn, id).await?;
            return Err(guard::resolve_missed_write(ENTITY, id, current));
        }

        let updated = repos
            .vehicles
            .get(&txn, id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))?;
        commit(txn).await?;
        Ok((updated, previous_image))
    }

    /// Delete a vehicle together with its events and their children.
    #[instrument(skip(self, ctx), fields(caller = ctx.subject_id()))]
    pub async fn delete(&self, ctx: &SecurityContext, id: i32) -> Result<u64, DomainError> {
        tracing::info!("Deleting vehicle");

        let repos = &self.deps.repos;
        let txn = self.deps.begin().await?;

        let current = repos
            .vehicles
            .get(&txn, id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))?;
        guard::ensure_owner(&current, ctx)?;

        let event_ids = repos.events.ids_for(&txn, &[id], None).await?;
        let mut orphaned = purge_events(repos, &txn, &event_ids).await?;

        let rows = repos
            .vehicles
            .delete_owned(&txn, id, ctx.subject_id())
            .await?;
        if rows == 0 {
            let current = repos.vehicles.get(&txn, id).await?;
            return Err(guard::resolve_missed_write(ENTITY, id, current));
        }
        commit(txn).await?;

        orphaned.push(current.image);
        discard_blobs(self.deps.blobs.as_ref(), orphaned, self.default_image()).await;

        tracing::info!(events = event_ids.len(), "Successfully deleted vehicle");
        Ok(rows)
    }
}
