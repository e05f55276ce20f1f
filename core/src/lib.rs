//! Core utilities and shared types for the liveprobe engine.

use std::fmt;

pub mod budget;
pub mod error;

pub use budget::{BudgetPermit, ConcurrencyBudget};
pub use error::{AttemptError, BudgetError, TargetError};

pub const fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Ports probed when the caller supplies none.
pub const DEFAULT_PORTS: &[u16] = &[80, 443, 8000, 8080, 8081, 8443, 8843, 9443];

/// Default size of the shared concurrency budget.
pub const DEFAULT_CONCURRENCY: usize = 100;

/// Default per-attempt timeout, covering the whole request including redirects.
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Protocols in the order they are attempted for every target.
pub const SCHEME_ORDER: [Scheme; 2] = [Scheme::Http, Scheme::Https];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A host and port pair to probe.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    pub host: String,
    pub port: u16,
}

impl Target {
    /// Build a target, trimming surrounding whitespace from the host.
    pub fn new(host: &str, port: u16) -> Result<Self, TargetError> {
        let host = host.trim();
        if host.is_empty() {
            return Err(TargetError::EmptyHost);
        }
        if port == 0 {
            return Err(TargetError::InvalidPort(port));
        }
        Ok(Target { host: host.to_string(), port })
    }

    /// Base URL for this target under the given scheme, e.g. `https://example.com:8443`.
    pub fn url(&self, scheme: Scheme) -> String {
        format!("{}://{}:{}", scheme, self.host, self.port)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
