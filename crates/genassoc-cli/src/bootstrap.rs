//! CLI bootstrap - the composition root.
//!
//! This is the only place where the ClickHouse and Elasticsearch adapters
//! are instantiated and injected into the core [`Backend`].

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use genassoc_core::{Backend, BackendConfig, SearchPort, WarehousePort};
use genassoc_search::{DefaultSearchClient, SearchClientConfig};
use genassoc_warehouse::{DefaultWarehouseClient, WarehouseClientConfig};
use tracing::debug;

use crate::error::CliError;
use crate::parser::Cli;

/// Everything needed to build a [`CliContext`].
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub backend: BackendConfig,
    pub warehouse: WarehouseClientConfig,
    pub search: SearchClientConfig,
}

impl CliConfig {
    /// Resolve configuration from parsed arguments (which already carry
    /// the `GENASSOC_*` environment fallbacks).
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let backend = match &cli.config {
            Some(path) => load_backend_config(path)?,
            None => BackendConfig::with_defaults(),
        };
        backend.validate()?;

        let mut warehouse = WarehouseClientConfig::new().with_optional_credentials(
            cli.warehouse_user.clone(),
            cli.warehouse_password.clone(),
        );
        if let Some(url) = &cli.warehouse_url {
            warehouse = warehouse.with_base_url(url);
        }
        if let Some(database) = &cli.warehouse_database {
            warehouse = warehouse.with_database(database);
        }

        let mut search = SearchClientConfig::new();
        if let Some(url) = &cli.search_url {
            search = search.with_base_url(url);
        }

        if let Some(secs) = cli.timeout_secs {
            if secs == 0 {
                return Err(CliError::Config("timeout must be at least 1 second".to_string()));
            }
            warehouse = warehouse.with_timeout(Duration::from_secs(secs));
            search = search.with_timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            backend,
            warehouse,
            search,
        })
    }
}

/// Read a JSON backend configuration file. Missing keys take defaults.
pub fn load_backend_config(path: &Path) -> Result<BackendConfig, CliError> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))
}

/// Fully composed context for command handlers.
pub struct CliContext {
    pub backend: Backend,
}

impl CliContext {
    /// Access the backend facade.
    pub const fn backend(&self) -> &Backend {
        &self.backend
    }
}

/// Build both adapters and the backend facade.
pub fn bootstrap(config: CliConfig) -> Result<CliContext, CliError> {
    let warehouse: Arc<dyn WarehousePort> = Arc::new(DefaultWarehouseClient::new(&config.warehouse)?);
    let search: Arc<dyn SearchPort> = Arc::new(DefaultSearchClient::new(&config.search)?);
    debug!(tables = ?config.backend.tables, "Backend assembled");

    Ok(CliContext {
        backend: Backend::new(config.backend, warehouse, search),
    })
}
