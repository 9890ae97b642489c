//! Data transfer objects for the JSON responses.
//!
//! The client crate hands back plain structs; serialization concerns live
//! entirely here.

use serde::Serialize;
use slcat_rs_client::QueryResult;

/// Response body of `GET /stations`.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    /// One entry per requested target.
    pub servers: Vec<ServerStatus>,
}

/// Per-target outcome.
#[derive(Debug, Serialize)]
pub struct ServerStatus {
    /// The target as given in the query (`host[:port]`).
    pub server: String,

    /// Whether the peer ever responded on the socket.
    pub connected: bool,

    /// Error code (`ECONNREFUSED`, `CATNOTIMPLEMENTED`), absent on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,

    /// Greeting version banner, if the handshake got that far.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Greeting server identifier, if the handshake got that far.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    /// Discovered stations, in listing order.
    pub stations: Vec<StationEntry>,
}

/// One discovered station.
#[derive(Debug, Serialize)]
pub struct StationEntry {
    pub network: String,
    pub station: String,
    pub site: String,
}

/// Body of a 400 response for malformed input.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<QueryResult> for ServerStatus {
    fn from(result: QueryResult) -> Self {
        Self {
            server: result.target_id,
            connected: result.connected,
            error: result.error.map(|e| e.code()),
            version: result.protocol_version,
            identifier: result.server_identifier,
            stations: result
                .stations
                .into_iter()
                .map(|s| StationEntry {
                    network: s.network,
                    station: s.station,
                    site: s.site,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slcat_rs_client::QueryError;

    fn result(target_id: &str) -> QueryResult {
        QueryResult {
            target_id: target_id.to_owned(),
            stations: Vec::new(),
            error: None,
            protocol_version: None,
            server_identifier: None,
            connected: false,
            fetched_at: std::time::Instant::now(),
        }
    }

    #[test]
    fn error_result_serializes_with_code() {
        let mut failed = result("dead.example.org:18000");
        failed.error = Some(QueryError::CatNotImplemented);
        failed.connected = true;

        let json = serde_json::to_value(ServerStatus::from(failed)).unwrap();
        assert_eq!(json["server"], "dead.example.org:18000");
        assert_eq!(json["error"], "CATNOTIMPLEMENTED");
        assert_eq!(json["connected"], true);
        assert!(json.get("version").is_none());
        assert_eq!(json["stations"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn success_result_omits_error() {
        let mut ok = result("geofon.gfz-potsdam.de");
        ok.connected = true;
        ok.protocol_version = Some("SeedLink v3.1".to_owned());
        ok.server_identifier = Some("GEOFON".to_owned());
        ok.stations = vec![slcat_rs_client::StationRecord {
            network: "NL".to_owned(),
            station: "HGN".to_owned(),
            site: "Heerlen-Mechelen".to_owned(),
        }];

        let json = serde_json::to_value(ServerStatus::from(ok)).unwrap();
        assert!(json.get("error").is_none());
        assert_eq!(json["version"], "SeedLink v3.1");
        assert_eq!(json["stations"].as_array().unwrap().len(), 1);
    }
}
