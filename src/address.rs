//! Canonical address formatting and host/port splitting.
//!
//! Pure string functions with no side effects: no DNS lookups, no I/O.
//! Addresses are used verbatim — the only interpretation performed here is
//! the bracket convention for IPv6 literals and the presence of a trailing
//! `:port` suffix.

use std::net::Ipv6Addr;

use snafu::{OptionExt, ensure};

use crate::error::{AddressSplitSnafu, Result};

/// A dial address paired with the server name used for identity checks.
///
/// The dial address always carries a port (either the one present in the
/// endpoint token or the resolver's bound default); the server name never
/// does. The transport layer verifies peer identity against the server name
/// independently of which port is actually dialed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedAddress {
    /// Port-bearing address to dial.
    pub addr: String,
    /// Port-free name used for identity verification.
    pub server_name: String,
}

impl ResolvedAddress {
    /// Creates a new resolved address.
    #[must_use]
    pub fn new(addr: impl Into<String>, server_name: impl Into<String>) -> Self {
        Self { addr: addr.into(), server_name: server_name.into() }
    }
}

/// Rewrites a bare IPv6 literal into bracketed form.
///
/// Everything else — hostnames, IPv4 literals, already-bracketed literals,
/// addresses carrying a port — passes through unchanged.
#[must_use]
pub fn format_address(addr: &str) -> String {
    if addr.contains(']') {
        // already bracketed
        return addr.to_owned();
    }

    if addr.parse::<Ipv6Addr>().is_ok() {
        return format!("[{addr}]");
    }

    addr.to_owned()
}

/// Returns whether `addr` claims a trailing `:port` suffix.
///
/// An IPv6 literal's internal colons do not count: a bracketed literal
/// carries a port only when a colon follows the closing bracket, and an
/// unbracketed string that parses as an IPv6 address carries none. Anything
/// else containing a colon claims a port — whether the claim can actually be
/// split is decided by [`split_host_port`].
#[must_use]
pub fn address_contains_port(addr: &str) -> bool {
    if !addr.contains(':') {
        return false;
    }

    if let Some(end) = addr.rfind(']') {
        return addr[end + 1..].starts_with(':');
    }

    addr.parse::<Ipv6Addr>().is_err()
}

/// Splits `host:port` or `[host]:port` into host and numeric port.
///
/// # Errors
///
/// Returns [`ResolveError::AddressSplit`](crate::ResolveError::AddressSplit)
/// when the bracket form is unterminated, the host part still contains a
/// colon, or the port is missing or not a valid decimal `u16`.
pub fn split_host_port(addr: &str) -> Result<(String, u16)> {
    let (host, port) = if let Some(rest) = addr.strip_prefix('[') {
        let (host, after) = rest
            .split_once(']')
            .context(AddressSplitSnafu { address: addr, reason: "unterminated bracket" })?;
        let port = after
            .strip_prefix(':')
            .context(AddressSplitSnafu { address: addr, reason: "missing port after bracket" })?;
        (host, port)
    } else {
        let (host, port) = addr
            .rsplit_once(':')
            .context(AddressSplitSnafu { address: addr, reason: "missing port separator" })?;
        ensure!(
            !host.contains(':'),
            AddressSplitSnafu { address: addr, reason: "too many colons" }
        );
        (host, port)
    };

    let port = port
        .parse::<u16>()
        .ok()
        .context(AddressSplitSnafu { address: addr, reason: "invalid port number" })?;

    Ok((host.to_owned(), port))
}

/// Joins a host with a port, bracketing unbracketed IPv6 hosts.
#[must_use]
pub fn join_host_port(host: &str, port: u16) -> String {
    if host.contains(':') && !host.starts_with('[') {
        return format!("[{host}]:{port}");
    }

    format!("{host}:{port}")
}
