use serde::Deserialize;

use medrec_core::config::Config;

/// Records service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct RecordsConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server. Env var: `RECORDS_PORT`.
    #[serde(default = "default_port")]
    pub records_port: u16,
}

impl Config for RecordsConfig {}

fn default_port() -> u16 {
    3113
}
