//! Daemon configuration.
//!
//! Read from an optional `clinikit.toml`, then overridden by `CLINIKIT_*`
//! environment variables (and `RUST_LOG` for the log filter).

use std::path::{Path, PathBuf};

use serde::Deserialize;

use clinikit_domain::id::RoleId;

/// File looked up in the working directory.
pub const CONFIG_FILE: &str = "clinikit.toml";

/// Manifest loaded when none is configured.
pub const DEFAULT_MANIFEST: &str = "plugins/templatemodule/properties.json";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub modules: ModulesConfig,
    pub roles: RolesConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// sqlx `SQLite` URL, e.g. `sqlite:clinikit.db?mode=rwc`.
    pub url: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive.
    pub filter: String,
}

/// Installed modules, one `properties.json` per module.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ModulesConfig {
    pub manifests: Vec<PathBuf>,
}

/// Role store seeding.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RolesConfig {
    /// Id of an `"admin"` role created at startup when missing. Without one,
    /// roles can only be managed by an admin that already exists.
    pub bootstrap_admin: Option<String>,
}

impl Config {
    /// Read [`CONFIG_FILE`] if it exists and apply the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the file cannot be read or parsed, or
    /// when the merged result is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::read(Path::new(CONFIG_FILE))?;
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Override values with whatever `lookup` returns for the `CLINIKIT_*`
    /// keys. Later keys win: `CLINIKIT_BIND` over `CLINIKIT_HOST`/`PORT`,
    /// `RUST_LOG` over `CLINIKIT_LOG`.
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup("CLINIKIT_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("CLINIKIT_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some((host, port)) = lookup("CLINIKIT_BIND").as_deref().and_then(split_bind) {
            self.server.host = host;
            if let Some(port) = port {
                self.server.port = port;
            }
        }
        if let Some(url) = lookup("CLINIKIT_DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(filter) = lookup("RUST_LOG").or_else(|| lookup("CLINIKIT_LOG")) {
            self.logging.filter = filter;
        }
        if let Some(list) = lookup("CLINIKIT_MODULES") {
            self.modules.manifests = parse_manifest_list(&list);
        }
        if let Some(id) = lookup("CLINIKIT_BOOTSTRAP_ADMIN") {
            self.roles.bootstrap_admin = Some(id);
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be non-zero"));
        }
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Invalid("server.host must not be empty"));
        }
        if let Some(id) = &self.roles.bootstrap_admin {
            RoleId::new(id.as_str())
                .map_err(|_| ConfigError::Invalid("roles.bootstrap_admin must not be blank"))?;
        }
        Ok(())
    }

    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// The validated bootstrap admin id, if one is configured.
    #[must_use]
    pub fn bootstrap_admin(&self) -> Option<RoleId> {
        self.roles
            .bootstrap_admin
            .as_deref()
            .and_then(|id| RoleId::new(id).ok())
    }
}

/// `host:port` or `host:` (keep the configured port).
fn split_bind(val: &str) -> Option<(String, Option<u16>)> {
    let (host, port) = val.rsplit_once(':')?;
    Some((host.to_string(), port.parse().ok()))
}

fn parse_manifest_list(raw: &str) -> Vec<PathBuf> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(PathBuf::from)
        .collect()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:clinikit.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "clinikitd=info,clinikit=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for ModulesConfig {
    fn default() -> Self {
        Self {
            manifests: vec![PathBuf::from(DEFAULT_MANIFEST)],
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}
