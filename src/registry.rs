//! Scheme registry capability.
//!
//! The host framework owns a process-wide resolver registry keyed by
//! scheme. This crate models it as an injected capability rather than
//! reimplementing global state, so the resolution logic stays unit-testable
//! without a real host registry. [`InMemoryRegistry`] is a reference
//! implementation suitable for tests and embedded hosts.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::resolver::ResolverBuilder;

/// Scheme-keyed registry of resolver builders.
///
/// Written at most once per scheme for the life of the process and read-only
/// thereafter; implementations supply whatever locking their host needs
/// beyond that.
pub trait Registry: Send + Sync {
    /// Installs `builder` under its scheme.
    fn register(&self, builder: Arc<dyn ResolverBuilder>);

    /// Looks up the builder registered for `scheme`.
    fn lookup(&self, scheme: &str) -> Option<Arc<dyn ResolverBuilder>>;
}

/// In-memory [`Registry`] backed by a scheme-keyed map.
#[derive(Default)]
pub struct InMemoryRegistry {
    builders: RwLock<HashMap<String, Arc<dyn ResolverBuilder>>>,
}

impl InMemoryRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of registered schemes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.builders.read().len()
    }

    /// Returns whether no schemes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.builders.read().is_empty()
    }
}

impl Registry for InMemoryRegistry {
    fn register(&self, builder: Arc<dyn ResolverBuilder>) {
        let scheme = builder.scheme().to_owned();
        self.builders.write().insert(scheme, builder);
    }

    fn lookup(&self, scheme: &str) -> Option<Arc<dyn ResolverBuilder>> {
        self.builders.read().get(scheme).cloned()
    }
}
