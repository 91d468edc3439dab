//! Static endpoint-list resolution with round-robin load balancing for RPC
//! clients.
//!
//! This crate is an address-resolution plugin: given a comma-separated list
//! of target endpoints, it produces a resolved, randomized address set and
//! instructs the owning connection to distribute calls round-robin across
//! it. Endpoints are used verbatim — only host/port splitting is performed,
//! never DNS lookups — and state is published once at build time; topology
//! changes require a fresh dial.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Registry (host-owned)                    │
//! │   scheme "peerlist-<port>" → RoundRobinBuilder              │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    RoundRobinBuilder                        │
//! │   One per registered port │ Builds per connection attempt   │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    RoundRobinResolver                       │
//! │   Parse │ Normalize │ Shuffle │ Publish (one shot)          │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    ConnectionHandle                         │
//! │   Validates directive │ Receives ResolverState              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
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
//! // Register once per listening port; embed the scheme in dial targets.
//! let registry = InMemoryRegistry::new();
//! let scheme = register_round_robin(&registry, 50000);
//!
//! // The host framework looks the builder up by scheme and builds a
//! // resolver per connection attempt.
//! let target = Target::parse(&format!("{scheme}://10.0.0.1,10.0.0.2:9000,[::1]:7000"))?;
//! let conn = Arc::new(MockConnection::new());
//! let builder = registry.lookup(target.scheme()).expect("scheme registered");
//! let _resolver = builder.build(&target, conn.clone())?;
//!
//! // Resolution is synchronous: the shuffled address set and round-robin
//! // directive are already published.
//! let state = conn.published_state().expect("state published");
//! assert_eq!(state.addresses.len(), 3);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod address;
mod connection;
mod error;
pub mod mock;
mod registry;
mod resolver;
mod service_config;
mod target;

// Public API exports
pub use address::{
    ResolvedAddress, address_contains_port, format_address, join_host_port, split_host_port,
};
pub use connection::{ConnectionHandle, ResolverState};
pub use error::{ResolveError, Result};
pub use registry::{InMemoryRegistry, Registry};
pub use resolver::{
    Resolver, ResolverBuilder, RoundRobinBuilder, RoundRobinResolver, register_round_robin,
};
pub use service_config::{LoadBalancingPolicy, ROUND_ROBIN_SERVICE_CONFIG, ServiceConfig};
pub use target::Target;
