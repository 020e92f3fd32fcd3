//! Gateway configuration
//!
//! Every flag falls back to an environment variable so the service can be
//! configured entirely from a container environment.

use chrono::Duration;
use clap::Parser;
use territory_lock::{LockConfig, DEFAULT_HOLD_HOURS, DEFAULT_TOTAL_CAPACITY};

pub const DEFAULT_ALLOWED_ORIGINS: [&str; 4] = [
    "https://www.establishedshot.com",
    "https://dental-map.vercel.app",
    "https://map.establishedshot.com",
    "http://localhost:3000",
];

pub const MAX_HOLD_HOURS: i64 = 8760;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "territory-gateway",
    about = "Territory lock and demographics API for the dental sales map",
    version
)]
pub struct GatewayConfig {
    /// Address to bind
    #[arg(long, env = "TERRITORY_GATEWAY_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 18700)]
    pub port: u16,

    /// NATS server for lock confirmations; log-only when unset
    #[arg(long, env = "NATS_URL")]
    pub nats_url: Option<String>,

    /// Origins allowed by CORS
    #[arg(
        long,
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_values = DEFAULT_ALLOWED_ORIGINS
    )]
    pub allowed_origins: Vec<String>,

    /// How long a hold reserves a territory, at most a year
    #[arg(
        long,
        env = "TERRITORY_HOLD_HOURS",
        default_value_t = DEFAULT_HOLD_HOURS,
        value_parser = clap::value_parser!(i64).range(1..=MAX_HOLD_HOURS)
    )]
    pub hold_hours: i64,

    /// Total territories offered; drives availableCount
    #[arg(long, env = "TERRITORY_CAPACITY", default_value_t = DEFAULT_TOTAL_CAPACITY)]
    pub territory_capacity: usize,

    #[arg(long, env = "CENSUS_BASE_URL", default_value = demographics::DEFAULT_CENSUS_URL)]
    pub census_base_url: String,

    #[arg(long, env = "CENSUS_API_KEY")]
    pub census_api_key: Option<String>,

    /// ZipCodeAPI key; metro approximation is used without it
    #[arg(long, env = "ZIPCODE_API_KEY")]
    pub zipcode_api_key: Option<String>,

    /// Browser key handed to the map front end
    #[arg(long, env = "GOOGLE_MAPS_API_KEY")]
    pub google_maps_api_key: Option<String>,
}

impl GatewayConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn lock_config(&self) -> LockConfig {
        LockConfig {
            hold_duration: Duration::try_hours(self.hold_hours.clamp(1, MAX_HOLD_HOURS))
                .unwrap_or_else(|| Duration::hours(DEFAULT_HOLD_HOURS)),
            total_capacity: self.territory_capacity,
        }
    }

    pub fn origins(&self) -> Vec<String> {
        self.allowed_origins
            .iter()
            .map(|o| o.trim().trim_end_matches('/').to_string())
            .filter(|o| !o.is_empty())
            .collect()
    }
}
