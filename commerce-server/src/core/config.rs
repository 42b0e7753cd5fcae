//! Server configuration
//!
//! All settings come from environment variables with sensible defaults:
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | HTTP_PORT | 3001 | HTTP listen port |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | EVENT_BUS_CAPACITY | 1024 | broadcast channel capacity |

/// Service host configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port
    pub http_port: u16,
    /// Running environment: development | staging | production
    pub environment: String,
    /// Event bus broadcast capacity
    pub event_capacity: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3001),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            event_capacity: std::env::var("EVENT_BUS_CAPACITY")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(1024),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 3001,
            environment: "development".into(),
            event_capacity: 1024,
        }
    }
}
