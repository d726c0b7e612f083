use std::{path::PathBuf, time::Duration};

use clap::Parser;
use log::LevelFilter;
use thiserror::Error;

use crate::{
    fs::config::{Geometry, MAX_BLOCKS, MAX_FILES},
    server::ServerOptions,
};

pub const DEFAULT_PORT: u16 = 12345;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

#[derive(Parser, Debug, Clone)]
#[command(name = "minifs-server", version, about = "Block-addressed file store over a line protocol")]
pub struct ServerConfig {
    /// TCP port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub bind: String,

    /// Backing file holding the raw blocks
    #[arg(long, default_value = "virtual_disk.bin")]
    pub disk: PathBuf,

    /// Requested backing file size in bytes (never less than the block pool)
    #[arg(long, default_value_t = 4096)]
    pub total_size: u64,

    /// Inode table capacity
    #[arg(long, default_value_t = MAX_FILES)]
    pub max_files: usize,

    /// Number of data blocks
    #[arg(long, default_value_t = MAX_BLOCKS)]
    pub max_blocks: u32,

    /// Worker threads serving sessions
    #[arg(long, default_value_t = 16)]
    pub max_sessions: usize,

    /// Connections allowed to wait silently for a worker; beyond this new ones get the busy reply
    #[arg(long, default_value_t = 0)]
    pub max_pending: usize,

    /// Close sessions idle for this many seconds
    #[arg(long)]
    pub idle_timeout: Option<u64>,

    #[arg(long, default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_files == 0 {
            return Err(ConfigError::Zero("max-files"));
        }
        if self.max_blocks == 0 {
            return Err(ConfigError::Zero("max-blocks"));
        }
        if self.max_sessions == 0 {
            return Err(ConfigError::Zero("max-sessions"));
        }
        if self.idle_timeout == Some(0) {
            return Err(ConfigError::Zero("idle-timeout"));
        }
        Ok(())
    }

    pub fn geometry(&self) -> Geometry {
        Geometry {
            max_files: self.max_files,
            max_blocks: self.max_blocks,
        }
    }

    pub fn server_options(&self) -> ServerOptions {
        ServerOptions {
            max_sessions: self.max_sessions,
            max_pending: self.max_pending,
            idle_timeout: self.idle_timeout.map(Duration::from_secs),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "minifs-client", version, about = "Interactive client for minifs-server")]
pub struct ClientConfig {
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Do not ask before DELETE
    #[arg(long)]
    pub no_confirm: bool,
}

impl ClientConfig {
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_historical_server() {
        let config = ServerConfig::parse_from(["minifs-server"]);
        assert_eq!(config.port, 12345);
        assert_eq!(config.disk, PathBuf::from("virtual_disk.bin"));
        assert_eq!(config.total_size, 4096);
        assert_eq!(config.geometry(), Geometry::default());
        assert_eq!(config.server_options().idle_timeout, None);
        assert_eq!(config.server_options(), ServerOptions::default());
        assert_eq!(config.log_level, LevelFilter::Info);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_overrides() {
        let config = ServerConfig::parse_from([
            "minifs-server",
            "-p",
            "4000",
            "--max-files",
            "8",
            "--max-blocks",
            "32",
            "--idle-timeout",
            "30",
            "--log-level",
            "debug",
        ]);
        assert_eq!(config.listen_addr(), "127.0.0.1:4000");
        assert_eq!(
            config.geometry(),
            Geometry {
                max_files: 8,
                max_blocks: 32
            }
        );
        assert_eq!(
            config.server_options().idle_timeout,
            Some(Duration::from_secs(30))
        );
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn rejects_zero_capacities() {
        let config = ServerConfig::parse_from(["minifs-server", "--max-blocks", "0"]);
        assert_eq!(config.validate(), Err(ConfigError::Zero("max-blocks")));

        let config = ServerConfig::parse_from(["minifs-server", "--max-sessions", "0"]);
        assert_eq!(config.validate(), Err(ConfigError::Zero("max-sessions")));
    }

    #[test]
    fn client_defaults() {
        let config = ClientConfig::parse_from(["minifs-client"]);
        assert_eq!(config.server_addr(), "127.0.0.1:12345");
        assert!(!config.no_confirm);
    }
}
