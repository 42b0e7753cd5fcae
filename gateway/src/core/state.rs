//! Gateway state

use std::sync::Arc;

use crate::auth::JwtService;
use crate::core::Config;
use crate::downstream::ServiceClient;

/// Shared gateway state, cloned into every handler
#[derive(Clone)]
pub struct GatewayState {
    /// Gateway configuration
    pub config: Config,
    /// Claims verifier / token issuer
    pub jwt: Arc<JwtService>,
    /// Downstream service client (one reqwest client, reused)
    pub services: Arc<ServiceClient>,
}

impl GatewayState {
    pub fn initialize(config: &Config) -> Self {
        Self {
            config: config.clone(),
            jwt: Arc::new(JwtService::with_config(config.jwt.clone())),
            services: Arc::new(ServiceClient::new(config.services.clone())),
        }
    }
}
