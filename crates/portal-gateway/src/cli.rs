use clap::{Parser, ValueEnum};
use portal_shortener::ExpirationPolicy;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::time::Duration;

pub const LISTEN_ADDR_ENV: &str = "PORTAL_GATEWAY_LISTEN_ADDR";
pub const BASE_URL_ENV: &str = "PORTAL_GATEWAY_PUBLIC_BASE_URL";
pub const STORAGE_BACKEND_ENV: &str = "PORTAL_GATEWAY_STORAGE_BACKEND";
pub const MYSQL_DSN_ENV: &str = "PORTAL_GATEWAY_MYSQL_DSN";
pub const CODE_LENGTH_ENV: &str = "PORTAL_GATEWAY_CODE_LENGTH";
pub const DEFAULT_TTL_DAYS_ENV: &str = "PORTAL_GATEWAY_DEFAULT_TTL_DAYS";
pub const GENERATION_ATTEMPTS_ENV: &str = "PORTAL_GATEWAY_GENERATION_ATTEMPTS";
pub const STATS_TOKEN_ENV: &str = "PORTAL_GATEWAY_STATS_TOKEN";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_TTL_DAYS: u32 = 365;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "mysql")]
    Mysql,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Mysql => write!(f, "mysql"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "portal-gateway")]
pub struct Cli {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Public base URL short links are advertised under.
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub public_base_url: String,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = MYSQL_DSN_ENV, required_if_eq("storage", "mysql"))]
    pub mysql_dsn: Option<String>,

    /// Length of generated short codes.
    #[arg(
        long,
        env = CODE_LENGTH_ENV,
        default_value_t = 8,
        value_parser = clap::value_parser!(u8).range(6..=32)
    )]
    pub code_length: u8,

    /// Default link lifetime in days; `0` means links never expire.
    #[arg(long, env = DEFAULT_TTL_DAYS_ENV, default_value_t = DEFAULT_TTL_DAYS)]
    pub default_ttl_days: u32,

    /// How many candidate codes to draw before giving up on a shorten call.
    #[arg(
        long,
        env = GENERATION_ATTEMPTS_ENV,
        default_value_t = 5,
        value_parser = clap::value_parser!(u8).range(1..=32)
    )]
    pub generation_attempts: u8,

    /// Bearer token required by the stats endpoint. Unset rejects all
    /// stats callers.
    #[arg(long, env = STATS_TOKEN_ENV)]
    pub stats_token: Option<String>,
}

impl Cli {
    /// The expiration policy applied when a shorten request carries no TTL.
    pub fn default_expiration(&self) -> ExpirationPolicy {
        if self.default_ttl_days == 0 {
            ExpirationPolicy::Never
        } else {
            ExpirationPolicy::AfterDuration(Duration::from_secs(
                u64::from(self.default_ttl_days) * SECONDS_PER_DAY,
            ))
        }
    }
}
