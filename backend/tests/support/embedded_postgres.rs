//! Per-test PostgreSQL databases for the Diesel suites.
//!
//! By default every test receives a fresh database cloned from a migrated
//! template on the shared embedded cluster. Setting
//! `RECIPES_TEST_DATABASE_URL` points the suites at an externally managed
//! database instead; migrations are applied to it and tests isolate their
//! rows with unique usernames.

use std::path::PathBuf;
use std::sync::{Mutex, Once, OnceLock};

use pg_embedded_setup_unpriv::test_support::{hash_directory, shared_cluster_handle};
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use recipe_backend::outbound::persistence::run_pending_migrations;
use tokio::runtime::Runtime;
use uuid::Uuid;

pub const DATABASE_URL_ENV: &str = "RECIPES_TEST_DATABASE_URL";

const TEMPLATE_NAME_PREFIX: &str = "recipes_template";
const EMBEDDED_PASSWORD: &str = "recipes_embedded_test";

static MIGRATION_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
static STABLE_PASSWORD: Once = Once::new();

/// A database URL plus, for embedded runs, the guard that drops the
/// database when the test finishes.
pub struct ProvisionedDatabase {
    url: String,
    _database: Option<TemporaryDatabase>,
}

impl ProvisionedDatabase {
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Provisions a migrated database for one test.
///
/// Must be called outside the runtime; migrations are driven with
/// `runtime.block_on`.
pub fn provision_database(runtime: &Runtime) -> Result<ProvisionedDatabase, String> {
    if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
        let _lock = migration_lock();
        runtime
            .block_on(run_pending_migrations(&url))
            .map_err(|err| format!("migrate {DATABASE_URL_ENV}: {err}"))?;
        return Ok(ProvisionedDatabase {
            url,
            _database: None,
        });
    }

    ensure_stable_password();
    let cluster = shared_cluster_handle().map_err(|err| format!("start cluster: {err:?}"))?;
    let template = ensure_template_database(cluster, runtime)?;
    let name = format!("test_{}", Uuid::new_v4().simple());
    let database = cluster
        .temporary_database_from_template(name.as_str(), template.as_str())
        .map_err(|err| format!("create database from template: {err:?}"))?;
    Ok(ProvisionedDatabase {
        url: database.url().to_string(),
        _database: Some(database),
    })
}

fn migration_lock() -> std::sync::MutexGuard<'static, ()> {
    MIGRATION_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner())
}

/// Creates the migrated template once per schema revision.
///
/// The name carries a hash of the migrations directory, so editing a
/// migration yields a new template rather than reusing a stale one.
fn ensure_template_database(cluster: &ClusterHandle, runtime: &Runtime) -> Result<String, String> {
    let migrations = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations");
    let hash = hash_directory(migrations).map_err(|err| format!("hash migrations: {err}"))?;
    let short_hash = hash.get(..8).unwrap_or(&hash);
    let template = format!("{TEMPLATE_NAME_PREFIX}_{short_hash}");

    let _lock = migration_lock();
    let exists = cluster
        .database_exists(template.as_str())
        .map_err(|err| format!("template check: {err:?}"))?;
    if !exists {
        cluster
            .create_database(template.as_str())
            .map_err(|err| format!("create template: {err:?}"))?;
        let url = cluster.connection().database_url(&template);
        runtime
            .block_on(run_pending_migrations(&url))
            .map_err(|err| format!("migrate template: {err}"))?;
    }
    Ok(template)
}

/// Pins `PG_PASSWORD` so a reused data directory keeps accepting the
/// password it was initialised with.
fn ensure_stable_password() {
    STABLE_PASSWORD.call_once(|| {
        if std::env::var_os("PG_PASSWORD").is_none() {
            // SAFETY: runs once per process, before the embedded cluster
            // spawns its helpers, and no test reads `PG_PASSWORD` itself.
            unsafe {
                std::env::set_var("PG_PASSWORD", EMBEDDED_PASSWORD);
            }
        }
    });
}
