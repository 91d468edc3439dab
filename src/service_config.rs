//! The load-balancing directive published to the host framework.
//!
//! The directive is a fixed declarative payload instructing the host's
//! call-dispatch layer to distribute calls round-robin across the published
//! address set. It is constant for every resolver instance and never derived
//! from the target; the balancing mechanics themselves are the host
//! framework's responsibility.

use serde::{Deserialize, Serialize};
use snafu::ResultExt;

use crate::error::{Result, ServiceConfigSnafu};

/// The fixed round-robin directive in the host framework's JSON schema.
///
/// This exact shape is the integration contract with the host's
/// call-dispatch layer.
pub const ROUND_ROBIN_SERVICE_CONFIG: &str = r#"{"loadBalancingConfig":[{"round_robin":{}}]}"#;

/// Service configuration block understood by the host framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ServiceConfig {
    /// Load-balancing policies in preference order.
    load_balancing_config: Vec<LoadBalancingPolicy>,
}

/// A single load-balancing policy entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadBalancingPolicy {
    /// Distribute calls round-robin across all resolved addresses.
    #[serde(rename = "round_robin")]
    RoundRobin {},
}

impl ServiceConfig {
    /// Parses a service config from its JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::ServiceConfig`](crate::ResolveError::ServiceConfig)
    /// when the payload does not match the schema; the parse error is
    /// surfaced verbatim.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context(ServiceConfigSnafu)
    }

    /// Returns the fixed round-robin configuration.
    #[must_use]
    pub fn round_robin() -> Self {
        Self { load_balancing_config: vec![LoadBalancingPolicy::RoundRobin {}] }
    }

    /// Returns the configured policies in preference order.
    #[must_use]
    pub fn policies(&self) -> &[LoadBalancingPolicy] {
        &self.load_balancing_config
    }
}
