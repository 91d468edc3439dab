//! Round-robin endpoint-list resolver.
//!
//! The resolver family registered here turns a comma-separated endpoint
//! list into a resolved, randomized address set and hands it to the owning
//! connection together with the round-robin directive. Resolution is one
//! shot: the full parse-normalize-shuffle-publish sequence runs inside the
//! build call, synchronously, and the published state stands for the life
//! of the connection.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use peerlist_resolver::{
//!     InMemoryRegistry, Registry, ResolverBuilder, Target, mock::MockConnection,
//!     register_round_robin,
//! };
//!
//! # fn main() -> peerlist_resolver::Result<()> {
//! let registry = InMemoryRegistry::new();
//! let scheme = register_round_robin(&registry, 50000);
//! assert_eq!(scheme, "peerlist-50000");
//!
//! let target = Target::parse(&format!("{scheme}://10.0.0.1,10.0.0.2:9000"))?;
//! let conn = Arc::new(MockConnection::new());
//!
//! let builder = registry.lookup(target.scheme()).expect("scheme registered");
//! let _resolver = builder.build(&target, conn.clone())?;
//!
//! assert_eq!(conn.published_state().expect("state published").addresses.len(), 2);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use rand::seq::SliceRandom;
use snafu::ensure;

use crate::address::{self, ResolvedAddress};
use crate::connection::{ConnectionHandle, ResolverState};
use crate::error::{EmptyTargetSnafu, Result};
use crate::registry::Registry;
use crate::service_config::ROUND_ROBIN_SERVICE_CONFIG;
use crate::target::Target;

/// Scheme family prefix; the bound port completes the scheme.
const SCHEME_FAMILY: &str = "peerlist";

/// Registers a round-robin resolver for `port` and returns the scheme to
/// use in dial targets.
///
/// The scheme is `peerlist-<port>`, unique per distinct port, so resolvers
/// bound to different default ports coexist in one registry. Registering
/// the same port twice is a caller configuration error: re-registration
/// under an identical key is undefined behavior in most host registries and
/// must not be relied upon.
pub fn register_round_robin(registry: &dyn Registry, port: u16) -> String {
    let scheme = format!("{SCHEME_FAMILY}-{port}");

    registry.register(Arc::new(RoundRobinBuilder::new(port, scheme.clone())));

    scheme
}

/// Builds resolver instances for one registered scheme.
///
/// Installed once per listening port; the host framework looks the builder
/// up by scheme on each connection attempt.
pub trait ResolverBuilder: Send + Sync {
    /// Returns the scheme this builder serves.
    fn scheme(&self) -> &str;

    /// Builds a resolver bound to `target`, resolving immediately.
    ///
    /// # Errors
    ///
    /// Returns an error when resolution fails. No usable instance exists in
    /// that case and no state has been published — the dial attempt fails at
    /// connection-setup time, before any network I/O occurs.
    fn build(
        &self,
        target: &Target,
        conn: Arc<dyn ConnectionHandle>,
    ) -> Result<Box<dyn Resolver>>;
}

/// A live resolver owned by one connection.
pub trait Resolver: Send + Sync + std::fmt::Debug {
    /// Requests a re-resolution.
    fn resolve_now(&self);

    /// Tears the resolver down.
    fn close(&self);
}

/// Factory for [`RoundRobinResolver`] instances, bound to a default port.
#[derive(Debug, Clone)]
pub struct RoundRobinBuilder {
    port: u16,
    scheme: String,
}

impl RoundRobinBuilder {
    /// Creates a builder bound to `port`, registered under `scheme`.
    #[must_use]
    pub fn new(port: u16, scheme: impl Into<String>) -> Self {
        Self { port, scheme: scheme.into() }
    }
}

impl ResolverBuilder for RoundRobinBuilder {
    fn scheme(&self) -> &str {
        &self.scheme
    }

    fn build(
        &self,
        target: &Target,
        conn: Arc<dyn ConnectionHandle>,
    ) -> Result<Box<dyn Resolver>> {
        let resolver = RoundRobinResolver { target: target.clone(), conn, port: self.port };

        resolver.resolve()?;

        Ok(Box::new(resolver))
    }
}

/// One-shot resolver over a static endpoint list.
///
/// Constructed and run by [`ResolverBuilder::build`]. The endpoint list is
/// assumed static for the life of the connection: topology changes require a
/// fresh dial, so [`resolve_now`](Resolver::resolve_now) and
/// [`close`](Resolver::close) are no-ops.
pub struct RoundRobinResolver {
    target: Target,
    conn: Arc<dyn ConnectionHandle>,
    port: u16,
}

impl std::fmt::Debug for RoundRobinResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundRobinResolver")
            .field("target", &self.target)
            .field("port", &self.port)
            .finish_non_exhaustive()
    }
}

impl RoundRobinResolver {
    fn resolve(&self) -> Result<()> {
        ensure!(!self.target.endpoint().is_empty(), EmptyTargetSnafu);

        let mut addresses = Vec::new();

        for token in self.target.tokens() {
            let addr = address::format_address(token);

            let (addr, server_name) = if address::address_contains_port(&addr) {
                let (host, _) = address::split_host_port(&addr)?;
                (addr, host)
            } else {
                let dial = address::join_host_port(&addr, self.port);
                (dial, addr)
            };

            addresses.push(ResolvedAddress::new(addr, server_name));
        }

        // shuffle the list in case the client makes just one request
        addresses.shuffle(&mut rand::rng());

        let address_count = addresses.len();

        let service_config = self.conn.parse_service_config(ROUND_ROBIN_SERVICE_CONFIG)?;

        self.conn.update_state(ResolverState { addresses, service_config })?;

        tracing::debug!(
            scheme = %self.target.scheme(),
            address_count,
            "published resolver state"
        );

        Ok(())
    }
}

impl Resolver for RoundRobinResolver {
    fn resolve_now(&self) {
        // the endpoint list is static for the life of the connection;
        // the originally published state stands
    }

    fn close(&self) {
        // no resources held beyond the connection reference, which the
        // host owns
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::error::ResolveError;
    use crate::mock::MockConnection;
    use crate::service_config::ServiceConfig;

    fn resolve_target(endpoint: &str, port: u16) -> (Arc<MockConnection>, Result<Box<dyn Resolver>>) {
        let builder = RoundRobinBuilder::new(port, format!("{SCHEME_FAMILY}-{port}"));
        let target = Target::new(builder.scheme(), endpoint);
        let conn = Arc::new(MockConnection::new());
        let result = builder.build(&target, conn.clone());
        (conn, result)
    }

    #[test]
    fn test_default_port_applied() {
        let (conn, result) = resolve_target("10.0.0.1", 50000);
        result.unwrap();

        let state = conn.published_state().unwrap();
        assert_eq!(state.addresses.len(), 1);
        assert_eq!(state.addresses[0].addr, "10.0.0.1:50000");
        assert_eq!(state.addresses[0].server_name, "10.0.0.1");
    }

    #[test]
    fn test_explicit_port_wins() {
        let (conn, result) = resolve_target("10.0.0.1:9000", 50000);
        result.unwrap();

        let state = conn.published_state().unwrap();
        assert_eq!(state.addresses[0].addr, "10.0.0.1:9000");
        assert_eq!(state.addresses[0].server_name, "10.0.0.1");
    }

    #[test]
    fn test_bracketed_ipv6_with_port() {
        let (conn, result) = resolve_target("[::1]:9000", 50000);
        result.unwrap();

        let state = conn.published_state().unwrap();
        assert_eq!(state.addresses[0].addr, "[::1]:9000");
        assert_eq!(state.addresses[0].server_name, "::1");
    }

    #[test]
    fn test_bare_ipv6_gets_default_port() {
        let (conn, result) = resolve_target("::1", 50000);
        result.unwrap();

        let state = conn.published_state().unwrap();
        assert_eq!(state.addresses[0].addr, "[::1]:50000");
        assert_eq!(state.addresses[0].server_name, "[::1]");
    }

    #[test]
    fn test_one_address_per_token() {
        let (conn, result) = resolve_target("a,b:9000,c,10.0.0.4", 50000);
        result.unwrap();

        let state = conn.published_state().unwrap();
        assert_eq!(state.addresses.len(), 4);
    }

    #[test]
    fn test_server_names_port_free_dial_addresses_port_bearing() {
        let (conn, result) = resolve_target("a,b:9000,10.0.0.3,[2001:db8::2]:443", 50000);
        result.unwrap();

        for resolved in conn.published_state().unwrap().addresses {
            assert!(
                !address::address_contains_port(&resolved.server_name),
                "server name {} carries a port",
                resolved.server_name
            );
            assert!(
                address::address_contains_port(&resolved.addr),
                "dial address {} carries no port",
                resolved.addr
            );
        }
    }

    #[test]
    fn test_malformed_token_aborts_without_publishing() {
        let (conn, result) = resolve_target("a:bad:port", 50000);

        let err = result.unwrap_err();
        assert_eq!(err.address(), Some("a:bad:port"));
        assert!(conn.published_state().is_none());
        assert_eq!(conn.update_count(), 0);
    }

    #[test]
    fn test_malformed_token_aborts_whole_list() {
        let (conn, result) = resolve_target("10.0.0.1,host:http,10.0.0.3", 50000);

        let err = result.unwrap_err();
        assert_eq!(err.address(), Some("host:http"));
        assert!(conn.published_state().is_none());
    }

    #[test]
    fn test_empty_target_rejected() {
        let (conn, result) = resolve_target("", 50000);

        assert!(matches!(result.unwrap_err(), ResolveError::EmptyTarget));
        assert!(conn.published_state().is_none());
    }

    #[test]
    fn test_empty_interior_token_preserved() {
        let (conn, result) = resolve_target("a,,b", 50000);
        result.unwrap();

        let state = conn.published_state().unwrap();
        assert_eq!(state.addresses.len(), 3);

        let empty: Vec<_> =
            state.addresses.iter().filter(|a| a.server_name.is_empty()).collect();
        assert_eq!(empty.len(), 1);
        assert_eq!(empty[0].addr, ":50000");
    }

    #[test]
    fn test_directive_is_always_round_robin() {
        let (conn, result) = resolve_target("a,b,c", 50000);
        result.unwrap();

        let state = conn.published_state().unwrap();
        assert_eq!(state.service_config, ServiceConfig::round_robin());
    }

    #[test]
    fn test_config_rejection_aborts_without_publishing() {
        let builder = RoundRobinBuilder::new(50000, "peerlist-50000");
        let target = Target::new("peerlist-50000", "10.0.0.1");
        let conn = Arc::new(MockConnection::new());
        conn.inject_config_rejection();

        let err = builder.build(&target, conn.clone()).unwrap_err();
        assert!(matches!(err, ResolveError::ServiceConfig { .. }));
        assert!(conn.published_state().is_none());
    }

    #[test]
    fn test_update_rejection_propagates() {
        let builder = RoundRobinBuilder::new(50000, "peerlist-50000");
        let target = Target::new("peerlist-50000", "10.0.0.1");
        let conn = Arc::new(MockConnection::new());
        conn.inject_update_rejection();

        let err = builder.build(&target, conn.clone()).unwrap_err();
        assert!(matches!(err, ResolveError::StateRejected { .. }));
        assert!(conn.published_state().is_none());
    }

    #[test]
    fn test_resolution_publishes_exactly_once() {
        let (conn, result) = resolve_target("a,b", 50000);
        let resolver = result.unwrap();

        assert_eq!(conn.update_count(), 1);

        // both hooks are no-ops; the original state stands
        resolver.resolve_now();
        resolver.close();
        assert_eq!(conn.update_count(), 1);
    }

    #[test]
    fn test_repeated_resolution_set_equal() {
        let (first, result) = resolve_target("a,b:9000,c,d,e", 50000);
        result.unwrap();
        let (second, result) = resolve_target("a,b:9000,c,d,e", 50000);
        result.unwrap();

        let first: HashSet<_> = first.published_state().unwrap().addresses.into_iter().collect();
        let second: HashSet<_> =
            second.published_state().unwrap().addresses.into_iter().collect();
        assert_eq!(first, second);
    }
}
