//! Gateway configuration
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | HTTP_PORT | 3000 | HTTP listen port |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | CLIENTS_SERVICE_URL | http://localhost:3001 | clients service base URL |
//! | PRODUCTS_SERVICE_URL | http://localhost:3001 | products service base URL |
//! | ORDERS_SERVICE_URL | http://localhost:3001 | orders service base URL |
//! | PAYMENTS_SERVICE_URL | http://localhost:3001 | payments service base URL |
//! | INVOICES_SERVICE_URL | http://localhost:3001 | invoices service base URL |
//! | JWT_SECRET | (dev key) | token signing secret |

use crate::auth::JwtConfig;
use crate::downstream::ServiceUrls;

/// Gateway configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP listen port
    pub http_port: u16,
    /// Running environment: development | staging | production
    pub environment: String,
    /// Downstream service base URLs
    pub services: ServiceUrls,
    /// JWT settings
    pub jwt: JwtConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            services: ServiceUrls::from_env(),
            jwt: JwtConfig::default(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 3000,
            environment: "development".into(),
            services: ServiceUrls::single("http://localhost:3001"),
            jwt: JwtConfig {
                secret: "gateway-development-secret-key-32bytes!".into(),
                expiration_minutes: 1440,
                issuer: "gateway".into(),
                audience: "commerce-clients".into(),
            },
        }
    }
}
