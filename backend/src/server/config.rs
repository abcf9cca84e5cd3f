//! Server settings and the configuration object handed to [`super::create_server`].

use std::net::{AddrParseError, SocketAddr};
use std::ops::RangeInclusive;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use recipe_backend::inbound::http::session_config::SessionSettings;
use recipe_backend::outbound::persistence::DbPool;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const BCRYPT_COST_RANGE: RangeInclusive<u32> = 4..=31;

/// Errors raised while interpreting [`ServerSettings`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address: {0}")]
    BindAddr(#[from] AddrParseError),
    #[error("bcrypt cost {cost} is outside the supported range 4..=31")]
    BcryptCost { cost: u32 },
}

/// Process settings loaded from `RECIPES_*` environment variables, CLI flags
/// and configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RECIPES")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string; the in-memory store is used when unset.
    pub database_url: Option<String>,
    /// bcrypt work factor for new password digests.
    #[ortho_config(default = 12)]
    pub bcrypt_cost: u32,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub db_max_connections: u32,
}

impl ServerSettings {
    /// Parsed listen address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        Ok(self
            .bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()?)
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    /// Configured bcrypt cost, rejected when bcrypt would refuse it.
    pub fn bcrypt_cost(&self) -> Result<u32, SettingsError> {
        if BCRYPT_COST_RANGE.contains(&self.bcrypt_cost) {
            Ok(self.bcrypt_cost)
        } else {
            Err(SettingsError::BcryptCost {
                cost: self.bcrypt_cost,
            })
        }
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) bcrypt_cost: u32,
}

impl ServerConfig {
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        Self {
            session,
            bind_addr,
            db_pool: None,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Back the repositories with PostgreSQL instead of memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }
}
