use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const LISTEN_ADDR_ENV: &str = "WARREN_GATEWAY_LISTEN_ADDR";
pub const PUBLIC_BASE_URL_ENV: &str = "WARREN_GATEWAY_PUBLIC_BASE_URL";
pub const STORAGE_BACKEND_ENV: &str = "WARREN_GATEWAY_STORAGE_BACKEND";
pub const DATA_DIR_ENV: &str = "WARREN_GATEWAY_DATA_DIR";
pub const REDIS_URL_ENV: &str = "WARREN_GATEWAY_REDIS_URL";
pub const CODE_LENGTH_ENV: &str = "WARREN_GATEWAY_CODE_LENGTH";
pub const MAX_ATTEMPTS_ENV: &str = "WARREN_GATEWAY_MAX_ATTEMPTS";
pub const STORE_TIMEOUT_MS_ENV: &str = "WARREN_GATEWAY_STORE_TIMEOUT_MS";
pub const LOG_FORMAT_ENV: &str = "WARREN_GATEWAY_LOG_FORMAT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 2_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "filesystem")]
    Filesystem,
    #[value(name = "redis")]
    Redis,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Filesystem => write!(f, "filesystem"),
            StorageBackendArg::Redis => write!(f, "redis"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "warren-gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Base URL prepended to codes in responses.
    #[arg(long, env = PUBLIC_BASE_URL_ENV, default_value = DEFAULT_PUBLIC_BASE_URL)]
    pub public_base_url: String,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = DATA_DIR_ENV, required_if_eq("storage", "filesystem"))]
    pub data_dir: Option<PathBuf>,

    #[arg(long, env = REDIS_URL_ENV, required_if_eq("storage", "redis"))]
    pub redis_url: Option<String>,

    #[arg(
        long,
        env = CODE_LENGTH_ENV,
        default_value_t = warren_generator::random::DEFAULT_CODE_LENGTH
    )]
    pub code_length: usize,

    #[arg(
        long,
        env = MAX_ATTEMPTS_ENV,
        default_value_t = warren_shortener::DEFAULT_MAX_ATTEMPTS
    )]
    pub max_attempts: u32,

    #[arg(long, env = STORE_TIMEOUT_MS_ENV, default_value_t = DEFAULT_STORE_TIMEOUT_MS)]
    pub store_timeout_ms: u64,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value_t = LogFormatArg::Text)]
    pub log_format: LogFormatArg,
}
