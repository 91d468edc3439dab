//! Mock connection handle for resolver testing.
//!
//! Provides a controllable [`ConnectionHandle`] implementation for testing
//! resolution without a real RPC runtime.
//!
//! # Features
//!
//! - **State capture**: Records the published [`ResolverState`] for assertions
//! - **Failure injection**: Reject service-config parsing or state updates
//! - **Update counting**: Verify the one-shot publication contract
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use peerlist_resolver::{ResolverBuilder, RoundRobinBuilder, Target, mock::MockConnection};
//!
//! let builder = RoundRobinBuilder::new(50000, "peerlist-50000");
//! let target = Target::new("peerlist-50000", "10.0.0.1,10.0.0.2");
//! let conn = Arc::new(MockConnection::new());
//!
//! builder.build(&target, conn.clone()).unwrap();
//!
//! assert_eq!(conn.update_count(), 1);
//! assert_eq!(conn.published_state().unwrap().addresses.len(), 2);
//! ```

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::RwLock;
use snafu::ensure;

use crate::connection::{ConnectionHandle, ResolverState};
use crate::error::{Result, StateRejectedSnafu};
use crate::service_config::ServiceConfig;

/// Controllable [`ConnectionHandle`] for tests.
///
/// Accepts every update by default; rejection of config parsing or state
/// updates can be injected per instance.
#[derive(Debug, Default)]
pub struct MockConnection {
    /// Last accepted state, if any.
    published: RwLock<Option<ResolverState>>,

    /// Number of accepted state updates.
    update_count: AtomicUsize,

    /// When set, service-config parsing fails.
    reject_config: AtomicBool,

    /// When set, state updates are refused.
    reject_update: AtomicBool,
}

impl MockConnection {
    /// Creates a mock connection that accepts all updates.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last published state, if any.
    #[must_use]
    pub fn published_state(&self) -> Option<ResolverState> {
        self.published.read().clone()
    }

    /// Returns how many state updates were accepted.
    #[must_use]
    pub fn update_count(&self) -> usize {
        self.update_count.load(Ordering::SeqCst)
    }

    /// Makes subsequent service-config parses fail.
    pub fn inject_config_rejection(&self) {
        self.reject_config.store(true, Ordering::SeqCst);
    }

    /// Makes subsequent state updates fail.
    pub fn inject_update_rejection(&self) {
        self.reject_update.store(true, Ordering::SeqCst);
    }
}

impl ConnectionHandle for MockConnection {
    fn parse_service_config(&self, raw: &str) -> Result<ServiceConfig> {
        if self.reject_config.load(Ordering::SeqCst) {
            // an empty payload stands in for a host whose schema rejects ours
            return ServiceConfig::from_json("");
        }

        ServiceConfig::from_json(raw)
    }

    fn update_state(&self, state: ResolverState) -> Result<()> {
        ensure!(
            !self.reject_update.load(Ordering::SeqCst),
            StateRejectedSnafu { message: "update rejected by test connection" }
        );

        *self.published.write() = Some(state);
        self.update_count.fetch_add(1, Ordering::SeqCst);

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::address::ResolvedAddress;
    use crate::service_config::ROUND_ROBIN_SERVICE_CONFIG;

    fn sample_state() -> ResolverState {
        ResolverState {
            addresses: vec![ResolvedAddress::new("10.0.0.1:50000", "10.0.0.1")],
            service_config: ServiceConfig::round_robin(),
        }
    }

    #[test]
    fn test_records_published_state() {
        let conn = MockConnection::new();
        assert!(conn.published_state().is_none());
        assert_eq!(conn.update_count(), 0);

        conn.update_state(sample_state()).unwrap();

        assert_eq!(conn.published_state().unwrap(), sample_state());
        assert_eq!(conn.update_count(), 1);
    }

    #[test]
    fn test_parses_fixed_directive() {
        let conn = MockConnection::new();
        let config = conn.parse_service_config(ROUND_ROBIN_SERVICE_CONFIG).unwrap();
        assert_eq!(config, ServiceConfig::round_robin());
    }

    #[test]
    fn test_config_rejection() {
        let conn = MockConnection::new();
        conn.inject_config_rejection();
        assert!(conn.parse_service_config(ROUND_ROBIN_SERVICE_CONFIG).is_err());
    }

    #[test]
    fn test_update_rejection() {
        let conn = MockConnection::new();
        conn.inject_update_rejection();

        assert!(conn.update_state(sample_state()).is_err());
        assert!(conn.published_state().is_none());
        assert_eq!(conn.update_count(), 0);
    }
}
