//! Dial targets.

use snafu::{OptionExt, ensure};

use crate::error::{InvalidTargetSnafu, Result};

/// A dial target: the scheme selecting a resolver family plus an opaque
/// endpoint string.
///
/// The endpoint string is syntactically a comma-separated list of endpoint
/// tokens. Splitting is verbatim — no trimming, no validation — so malformed
/// input can produce empty interior tokens, and those are preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    scheme: String,
    endpoint: String,
}

impl Target {
    /// Creates a target from its parts.
    pub fn new(scheme: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self { scheme: scheme.into(), endpoint: endpoint.into() }
    }

    /// Parses a `<scheme>://<ep1>,<ep2>,...,<epN>` dial string.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidTarget`](crate::ResolveError::InvalidTarget)
    /// when the `://` separator is absent or the scheme is empty.
    pub fn parse(s: &str) -> Result<Self> {
        let (scheme, endpoint) = s
            .split_once("://")
            .context(InvalidTargetSnafu { target: s, message: "missing '://' separator" })?;
        ensure!(!scheme.is_empty(), InvalidTargetSnafu { target: s, message: "empty scheme" });

        Ok(Self::new(scheme, endpoint))
    }

    /// Returns the scheme.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns the raw endpoint string.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Iterates the raw endpoint tokens in input order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.endpoint.split(',')
    }
}
