use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub kgserve: KgserveConfig,
    #[serde(default)]
    pub nebula: NebulaConfig,
    #[serde(default)]
    pub explore: ExploreConfig,
    #[serde(default)]
    pub http_server: HttpServerConfig,
}

/// Which graph-store adapter backs the engine.
///
/// Selected explicitly in config.toml, never by probing which client
/// library happens to be importable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Live NebulaGraph store via its HTTP gateway
    Nebula,
    /// Deterministic in-memory store (demo / no-database environments)
    Mock,
}

/// Service-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct KgserveConfig {
    pub backend: Backend,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// NebulaGraph connection descriptor (live backend only)
#[derive(Debug, Clone, Deserialize)]
pub struct NebulaConfig {
    /// Base URL of the nebula-http-gateway, e.g. "http://127.0.0.1:8090"
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,
    /// graphd host the gateway should dial
    #[serde(default = "default_graphd_host")]
    pub host: String,
    #[serde(default = "default_graphd_port")]
    pub port: u16,
    #[serde(default = "default_nebula_user")]
    pub user: String,
    /// Name of the environment variable holding the password
    #[serde(default = "default_password_env")]
    pub password_env: String,
    /// Graph space holding the entity/relationship schema
    #[serde(default = "default_space")]
    pub space: String,
}

impl Default for NebulaConfig {
    fn default() -> Self {
        Self {
            gateway_url: default_gateway_url(),
            host: default_graphd_host(),
            port: default_graphd_port(),
            user: default_nebula_user(),
            password_env: default_password_env(),
            space: default_space(),
        }
    }
}

/// Traversal tuning knobs
#[derive(Debug, Clone, Deserialize)]
pub struct ExploreConfig {
    #[serde(default = "default_depth")]
    pub default_depth: usize,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Max relationships fetched per node per direction per hop
    #[serde(default = "default_limit_per_hop")]
    pub limit_per_hop: usize,
    /// Concurrent frontier-node expansions within one BFS level
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
    /// Whole-call deadline; 0 disables the timeout
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ExploreConfig {
    fn default() -> Self {
        Self {
            default_depth: default_depth(),
            max_depth: default_max_depth(),
            limit_per_hop: default_limit_per_hop(),
            parallelism: default_parallelism(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "default_http_port")]
    pub port: u16,
    /// Empty list allows any origin (local development)
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            port: default_http_port(),
            allowed_origins: vec![],
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_gateway_url() -> String {
    "http://127.0.0.1:8090".to_string()
}

fn default_graphd_host() -> String {
    "127.0.0.1".to_string()
}

fn default_graphd_port() -> u16 {
    9669
}

fn default_nebula_user() -> String {
    "root".to_string()
}

fn default_password_env() -> String {
    "NEBULA_PASSWORD".to_string()
}

fn default_space() -> String {
    "knowledge_graph".to_string()
}

fn default_depth() -> usize {
    2
}

fn default_max_depth() -> usize {
    10
}

fn default_limit_per_hop() -> usize {
    50
}

fn default_parallelism() -> usize {
    8
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_http_port() -> u16 {
    8080
}

impl Config {
    /// Load configuration from file
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in KGSERVE_CONFIG environment variable
    /// 2. ./config.toml in current directory
    pub fn load() -> Result<Self> {
        // Load .env file if it exists (ignore errors - file is optional)
        let _ = dotenv::dotenv();

        let config_path = std::env::var("KGSERVE_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config.toml"));

        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = toml::from_str(&config_str)
            .context("Failed to parse config.toml")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.explore.max_depth == 0 || self.explore.max_depth > 10 {
            anyhow::bail!("explore.max_depth must be between 1 and 10");
        }

        if self.explore.default_depth == 0 || self.explore.default_depth > self.explore.max_depth {
            anyhow::bail!(
                "explore.default_depth must be between 1 and max_depth ({})",
                self.explore.max_depth
            );
        }

        if self.explore.limit_per_hop == 0 {
            anyhow::bail!("explore.limit_per_hop must be greater than 0");
        }

        if self.explore.parallelism == 0 {
            anyhow::bail!("explore.parallelism must be greater than 0");
        }

        // The live backend needs credentials; the mock runs without any
        if self.kgserve.backend == Backend::Nebula {
            std::env::var(&self.nebula.password_env).with_context(|| {
                format!(
                    "Environment variable {} not set. Set it in your .env file or as an environment variable with the NebulaGraph password.",
                    self.nebula.password_env
                )
            })?;

            if self.nebula.space.is_empty() {
                anyhow::bail!("nebula.space must not be empty");
            }
        }

        Ok(())
    }

    /// Password for the live store, resolved from the configured env var.
    pub fn nebula_password(&self) -> Result<String> {
        std::env::var(&self.nebula.password_env)
            .with_context(|| format!("Environment variable {} not set", self.nebula.password_env))
    }
}
