//! Application context - dependency injection container

use std::fs;
use std::path::Path;
use std::sync::Arc;

use altolink_core::{
    AgencyAdminService, AgencyRepository, AltoApi, AltoPropertyService, TokenProvider,
};
use altolink_domain::{AltoEnvironment, AltoLinkError, Config, Result};
use altolink_infra::{AltoApiClient, AltoTokenProvider, DbManager, SqliteAgencyRepository};
use tracing::{info, warn};

use crate::utils::health::{ComponentHealth, HealthStatus};

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub db: Arc<DbManager>,
    pub agencies: Arc<AgencyAdminService>,
    pub properties: Arc<AltoPropertyService>,
}

impl AppContext {
    /// Open the database, apply the schema and wire the Alto client for the
    /// configured environment.
    pub fn new(config: Config) -> Result<Self> {
        let db = open_database(&config)?;

        let tokens: Arc<dyn TokenProvider> = Arc::new(AltoTokenProvider::new(config.alto.clone())?);
        let api: Arc<dyn AltoApi> = Arc::new(AltoApiClient::new(&config.alto, tokens)?);

        Ok(Self::with_api(config, db, api))
    }

    /// Build the context around an existing database and Alto client.
    pub fn with_api(config: Config, db: Arc<DbManager>, api: Arc<dyn AltoApi>) -> Self {
        let environment = api.environment();
        if environment != config.alto.environment {
            warn!(
                configured = %config.alto.environment,
                client = %environment,
                "alto client environment differs from configuration; using the client's"
            );
        }

        let repository: Arc<dyn AgencyRepository> =
            Arc::new(SqliteAgencyRepository::new(Arc::clone(&db)));
        let agencies = Arc::new(AgencyAdminService::new(Arc::clone(&repository), environment));
        let properties = Arc::new(AltoPropertyService::new(repository, api));

        info!(
            environment = %environment,
            db_path = %db.path().display(),
            "application context initialised"
        );

        Self { config, db, agencies, properties }
    }

    pub fn environment(&self) -> AltoEnvironment {
        self.agencies.environment()
    }

    /// Check the database and the Alto credentials.
    pub async fn health_check(&self) -> HealthStatus {
        let db = Arc::clone(&self.db);
        let database = match tokio::task::spawn_blocking(move || db.health_check()).await {
            Ok(Ok(())) => ComponentHealth::healthy("database"),
            Ok(Err(err)) => ComponentHealth::unhealthy("database", err.to_string()),
            Err(err) => ComponentHealth::unhealthy("database", format!("health check panicked: {err}")),
        };

        let credentials = if self.config.alto.has_credentials() {
            ComponentHealth::healthy("alto_credentials")
        } else {
            ComponentHealth::unhealthy("alto_credentials", "client id or secret is missing")
        };

        let mut status = HealthStatus::new().add_component(database).add_component(credentials);
        status.calculate_score();
        status
    }
}

fn open_database(config: &Config) -> Result<Arc<DbManager>> {
    let path = Path::new(&config.database.path);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            AltoLinkError::Config(format!(
                "cannot create database directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    let db = DbManager::new(path, config.database.pool_size)?;
    db.run_migrations()?;
    Ok(Arc::new(db))
}
