use std::time::{Duration, Instant};

use slcat_rs_protocol::StationRecord;

use crate::error::{ClientError, Result};

/// Port used when a target spec omits one.
pub const DEFAULT_PORT: u16 = 18000;

/// One remote server to query.
///
/// Immutable once constructed; `id` is the original trimmed spec string and
/// doubles as the cache key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    /// Hostname or address.
    pub host: String,
    /// TCP port (default [`DEFAULT_PORT`]).
    pub port: u16,
    /// The original `host[:port]` spec string, used as cache key.
    pub id: String,
}

impl Target {
    /// Parse a `host[:port]` spec.
    ///
    /// A missing port falls back to [`DEFAULT_PORT`]; an empty host or a
    /// non-numeric/out-of-range port is rejected.
    pub fn parse(spec: &str) -> Result<Self> {
        let spec = spec.trim();
        let (host, port) = match spec.split_once(':') {
            Some((host, port)) => {
                let port: u16 = port
                    .parse()
                    .map_err(|_| ClientError::InvalidTarget(spec.to_owned()))?;
                (host, port)
            }
            None => (spec, DEFAULT_PORT),
        };
        if host.is_empty() {
            return Err(ClientError::InvalidTarget(spec.to_owned()));
        }
        Ok(Self {
            host: host.to_owned(),
            port,
            id: spec.to_owned(),
        })
    }

    /// The `host:port` address to connect to.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Why a query failed. Both kinds are recoverable at target granularity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryError {
    /// Connect failure, or a timeout/EOF/IO error at any handshake stage.
    ConnectionRefused,
    /// The peer understands HELLO but rejects CAT.
    CatNotImplemented,
}

impl QueryError {
    /// The wire-style error code reported to callers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConnectionRefused => "ECONNREFUSED",
            Self::CatNotImplemented => "CATNOTIMPLEMENTED",
        }
    }
}

/// The outcome of one handshake attempt against one target.
///
/// Exactly one is produced per attempt, immutable once returned; this is the
/// unit stored in [`ResultCache`](crate::ResultCache).
#[derive(Clone, Debug)]
pub struct QueryResult {
    /// The target's original spec string.
    pub target_id: String,
    /// Discovered stations, in listing order. Empty on failure.
    pub stations: Vec<StationRecord>,
    /// Failure kind, or `None` on success.
    pub error: Option<QueryError>,
    /// Greeting version banner, once received.
    pub protocol_version: Option<String>,
    /// Greeting server identifier, once received.
    pub server_identifier: Option<String>,
    /// Whether the peer ever responded — true from the first byte received,
    /// independent of whether the handshake ultimately succeeds.
    pub connected: bool,
    /// When the handshake reached its terminal state.
    pub fetched_at: Instant,
}

impl QueryResult {
    pub(crate) fn new(target_id: String) -> Self {
        Self {
            target_id,
            stations: Vec::new(),
            error: None,
            protocol_version: None,
            server_identifier: None,
            connected: false,
            fetched_at: Instant::now(),
        }
    }

    /// Whether the query resolved a listing.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Configuration for [`CatalogClient`](crate::CatalogClient) connections.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Timeout for the initial TCP connection. Default: 10 seconds.
    pub connect_timeout: Duration,
    /// Timeout for individual read operations. Default: 10 seconds.
    pub read_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(10),
        }
    }
}
