use std::time::Instant;

use slcat_rs_protocol::{Command, Handshake, Step};
use tracing::{debug, info, warn};

use crate::connection::Connection;
use crate::state::{ClientConfig, QueryError, QueryResult, Target};

/// Read buffer size for handshake chunks. Listings are small; one station
/// line is well under 100 bytes.
const CHUNK_LEN: usize = 4096;

/// One-shot catalog query client.
///
/// Owns one TCP connection and one accumulation buffer for the duration of a
/// single HELLO/CAT handshake, and reports exactly one terminal
/// [`QueryResult`] per attempt — success or error, never a panic or an `Err`
/// past this boundary.
pub struct CatalogClient {
    config: ClientConfig,
}

impl CatalogClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration used for connections.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Run one full handshake against `target`.
    ///
    /// Every failure — connect refusal, timeout at any stage, EOF, protocol
    /// violation, CAT rejection — is folded into the returned result's
    /// `error` field. The socket is released unconditionally once the
    /// handshake reaches a terminal state.
    pub async fn query(&self, target: &Target) -> QueryResult {
        let mut result = QueryResult::new(target.id.clone());
        debug!(target = %target.id, "querying");

        let mut conn = match Connection::connect(
            &target.addr(),
            self.config.connect_timeout,
            self.config.read_timeout,
        )
        .await
        {
            Ok(conn) => conn,
            Err(e) => {
                warn!(target = %target.id, %e, "connect failed");
                return finalize(result, Some(QueryError::ConnectionRefused));
            }
        };

        let error = self.drive(&mut conn, &mut result).await;
        conn.shutdown().await.ok();

        if error.is_none() {
            info!(
                target = %target.id,
                stations = result.stations.len(),
                "catalog resolved"
            );
        }
        finalize(result, error)
    }

    /// Drive the handshake to a terminal step, filling `result` as the
    /// exchange progresses. Returns the error kind on failure.
    async fn drive(
        &self,
        conn: &mut Connection,
        result: &mut QueryResult,
    ) -> Option<QueryError> {
        if let Err(e) = conn.send_command(&Command::Hello).await {
            warn!(target = %result.target_id, %e, "HELLO failed");
            return Some(QueryError::ConnectionRefused);
        }

        let mut handshake = Handshake::new();
        let mut chunk = [0u8; CHUNK_LEN];
        loop {
            let n = match conn.read_chunk(&mut chunk).await {
                Ok(n) => n,
                Err(e) => {
                    warn!(target = %result.target_id, %e, "read failed");
                    return Some(QueryError::ConnectionRefused);
                }
            };
            result.connected = true;

            match handshake.advance(&chunk[..n]) {
                Ok(Step::Continue) => {}
                Ok(Step::SendCat(greeting)) => {
                    debug!(
                        target = %result.target_id,
                        version = %greeting.version,
                        identifier = %greeting.identifier,
                        "greeting received"
                    );
                    result.protocol_version = Some(greeting.version);
                    result.server_identifier = Some(greeting.identifier);
                    if let Err(e) = conn.send_command(&Command::Cat).await {
                        warn!(target = %result.target_id, %e, "CAT failed");
                        return Some(QueryError::ConnectionRefused);
                    }
                }
                Ok(Step::Complete(stations)) => {
                    result.stations = stations;
                    return None;
                }
                Ok(Step::Unsupported) => {
                    debug!(target = %result.target_id, "peer does not implement CAT");
                    return Some(QueryError::CatNotImplemented);
                }
                Err(e) => {
                    warn!(target = %result.target_id, %e, "protocol violation");
                    return Some(QueryError::ConnectionRefused);
                }
            }
        }
    }
}

fn finalize(mut result: QueryResult, error: Option<QueryError>) -> QueryResult {
    result.error = error;
    result.fetched_at = Instant::now();
    result
}
