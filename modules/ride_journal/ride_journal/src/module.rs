use std::sync::Arc;

use ride_journal_sdk::RideJournalClientV1;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::api::rest::ApiState;
use crate::config::RideJournalConfig;
use crate::domain::ports::{BlobStore, IdentityResolver};
use crate::domain::repos::Repos;
use crate::domain::service::{AppServices, ServiceConfig};
use crate::infra::auth::JwtIdentityResolver;
use crate::infra::blob::FsBlobStore;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::SeaOrmRepos;
use crate::local_client::RideJournalLocalClient;

/// Type alias for the concrete `AppServices` type used with ORM repositories.
/// This lives in the composition root (module.rs) to avoid infra dependencies in domain.
pub type ConcreteAppServices = AppServices<SeaOrmRepos>;

impl From<&RideJournalConfig> for ServiceConfig {
    fn from(cfg: &RideJournalConfig) -> Self {
        Self {
            default_page_size: cfg.pagination.default_page_size,
            max_page_size: cfg.pagination.max_page_size,
            default_vehicle_image: cfg.blobs.default_vehicle_image.clone(),
        }
    }
}

/// Composition root: owns the connection, the adapters and the services.
#[derive(Clone)]
pub struct RideJournal {
    db: DatabaseConnection,
    services: Arc<ConcreteAppServices>,
    identity: Arc<dyn IdentityResolver>,
}

impl RideJournal {
    /// Connect, migrate and wire every adapter from configuration.
    ///
    /// # Errors
    /// Fails when the database is unreachable, a migration fails, the blob
    /// directory cannot be created or the auth settings are invalid.
    pub async fn init(cfg: &RideJournalConfig) -> anyhow::Result<Self> {
        info!("Initializing ride_journal module");
        debug!(
            "Loaded ride_journal config: default_page_size={}, max_page_size={}",
            cfg.pagination.default_page_size, cfg.pagination.max_page_size
        );

        let db = Database::connect(&cfg.database.url).await?;
        migrate(&db).await?;

        let blobs: Arc<dyn BlobStore> = Arc::new(FsBlobStore::open(&cfg.blobs.root_dir).await?);
        let identity: Arc<dyn IdentityResolver> = Arc::new(JwtIdentityResolver::new(&cfg.auth)?);

        let module = Self::from_parts(db, blobs, identity, ServiceConfig::from(cfg));
        info!("ride_journal module initialized");
        Ok(module)
    }

    /// Wire the services over an already migrated connection.
    #[must_use]
    pub fn from_parts(
        db: DatabaseConnection,
        blobs: Arc<dyn BlobStore>,
        identity: Arc<dyn IdentityResolver>,
        config: ServiceConfig,
    ) -> Self {
        let repos = Repos::<SeaOrmRepos>::sea_orm(config.limit_cfg());
        let services = Arc::new(AppServices::new(db.clone(), repos, blobs, config));
        Self {
            db,
            services,
            identity,
        }
    }

    #[must_use]
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    #[must_use]
    pub fn services(&self) -> Arc<ConcreteAppServices> {
        Arc::clone(&self.services)
    }

    /// In-process client for other modules.
    #[must_use]
    pub fn client(&self) -> Arc<dyn RideJournalClientV1> {
        Arc::new(RideJournalLocalClient::new(self.services()))
    }

    /// State consumed by the REST handler functions.
    #[must_use]
    pub fn api_state(&self) -> ApiState {
        ApiState::new(self.client(), Arc::clone(&self.identity))
    }
}

/// Apply all pending schema migrations.
///
/// # Errors
/// Propagates the first failing migration.
pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
    info!("Running ride_journal database migrations");
    Migrator::up(db, None).await?;
    info!("ride_journal database migrations completed successfully");
    Ok(())
}

