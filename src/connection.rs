//! The host-framework connection seam.
//!
//! The owning connection is modeled as an injected capability so the
//! resolution logic stays unit-testable without a real RPC runtime. A
//! production host adapts its connection type to [`ConnectionHandle`]; the
//! in-crate stand-in for tests is [`mock::MockConnection`](crate::mock::MockConnection).

use crate::address::ResolvedAddress;
use crate::error::Result;
use crate::service_config::ServiceConfig;

/// Resolved state published to the owning connection as one atomic update.
///
/// Either the full state is published or nothing is; a resolver never
/// publishes partially.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverState {
    /// Shuffled address set, one entry per endpoint token.
    pub addresses: Vec<ResolvedAddress>,
    /// Validated load-balancing directive.
    pub service_config: ServiceConfig,
}

/// Handle to the connection consuming resolved state.
///
/// Covers the two capabilities the host framework lends a resolver: parsing
/// a service-config payload against its schema, and accepting a state
/// update. The host owns the connection and its lifetime; the resolver only
/// holds a reference.
pub trait ConnectionHandle: Send + Sync {
    /// Parses and validates a service config in the host's JSON schema.
    ///
    /// # Errors
    ///
    /// Returns an error when the payload fails host-side validation; the
    /// resolver surfaces it verbatim and aborts the build.
    fn parse_service_config(&self, raw: &str) -> Result<ServiceConfig>;

    /// Accepts the resolved state.
    ///
    /// # Errors
    ///
    /// Returns an error when the connection refuses the update; the resolver
    /// propagates it as-is to the caller.
    fn update_state(&self, state: ResolverState) -> Result<()>;
}
