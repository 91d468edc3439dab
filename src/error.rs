//! Resolver error types.
//!
//! Every failure surfaces synchronously from the build call: nothing is
//! retried internally and nothing is swallowed. The caller decides whether
//! to retry the dial with a fresh build. There is no partial-success state —
//! either the full address set and directive are published, or nothing is.

use snafu::{Location, Snafu};

/// Result type alias for resolver operations.
pub type Result<T> = std::result::Result<T, ResolveError>;

/// Errors produced while resolving a target into an address set.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ResolveError {
    /// Target carried a zero-length endpoint list.
    #[snafu(display("target contains no endpoints"))]
    EmptyTarget,

    /// Dial string was not in `scheme://endpoints` form.
    #[snafu(display("invalid target '{target}': {message}"))]
    InvalidTarget {
        /// The rejected dial string.
        target: String,
        /// Parse failure description.
        message: String,
    },

    /// An endpoint claimed a port suffix that could not be split.
    #[snafu(display("failed to derive server name from address {address}: {reason}"))]
    AddressSplit {
        /// The offending address.
        address: String,
        /// Split failure description.
        reason: String,
    },

    /// The load-balancing directive failed host-side validation.
    #[snafu(display("service config rejected at {location}: {source}"))]
    ServiceConfig {
        /// Underlying parse error.
        source: serde_json::Error,
        /// Source location.
        #[snafu(implicit)]
        location: Location,
    },

    /// The connection handle refused the published state.
    #[snafu(display("connection rejected resolver state: {message}"))]
    StateRejected {
        /// Rejection reason reported by the connection.
        message: String,
    },
}

impl ResolveError {
    /// Returns the endpoint address the error refers to, if any.
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        match self {
            Self::AddressSplit { address, .. } => Some(address),
            _ => None,
        }
    }
}
