//! Mock catalog server for tests.
//!
//! Binds a real listener on `127.0.0.1:0` and speaks the HELLO/CAT exchange
//! with configurable misbehavior: rejected CAT, writes split across chunks,
//! stalling after the greeting, or staying mute entirely.

use std::net::SocketAddr;
use std::time::Duration;

use slcat_rs_protocol::handshake::UNSUPPORTED_REPLY;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

pub struct MockConfig {
    /// First greeting line (version banner).
    pub hello_line1: String,
    /// Second greeting line (server identifier).
    pub hello_line2: String,
    /// Raw override sent verbatim in reply to HELLO instead of the two lines.
    pub hello_reply: Option<String>,
    /// Listing lines, one station per line, without line endings.
    pub stations: Vec<String>,
    /// Reply to CAT with the listing; otherwise with the rejection line.
    pub cat_supported: bool,
    /// Dribble the listing out in two separate writes.
    pub split_writes: bool,
    /// Answer HELLO but never reply to CAT.
    pub stall_cat: bool,
    /// Accept the connection but never write anything.
    pub mute: bool,
}

impl MockConfig {
    /// A well-behaved server exposing the given listing lines.
    pub fn catalog(stations: Vec<String>) -> Self {
        Self {
            hello_line1: "SeedLink v3.1 (2020.075)".to_owned(),
            hello_line2: "Mock Catalog Server".to_owned(),
            hello_reply: None,
            stations,
            cat_supported: true,
            split_writes: false,
            stall_cat: false,
            mute: false,
        }
    }

    /// A server that greets but rejects CAT.
    pub fn unsupported() -> Self {
        Self {
            cat_supported: false,
            ..Self::catalog(Vec::new())
        }
    }
}

pub struct MockServer {
    addr: SocketAddr,
}

impl MockServer {
    pub async fn start(config: MockConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            Self::handle_connection(listener, config).await;
        });

        Self { addr }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    async fn handle_connection(listener: TcpListener, config: MockConfig) {
        let Ok((stream, _)) = listener.accept().await else {
            return;
        };

        let (read_half, mut write_half) = stream.into_split();
        let mut reader = BufReader::new(read_half);
        let mut line = String::new();

        loop {
            line.clear();
            let n = match reader.read_line(&mut line).await {
                Ok(n) => n,
                Err(_) => break,
            };
            if n == 0 {
                break;
            }
            if config.mute {
                continue;
            }

            let trimmed = line.trim().to_uppercase();

            if trimmed == "HELLO" {
                let reply = config.hello_reply.clone().unwrap_or_else(|| {
                    format!("{}\r\n{}\r\n", config.hello_line1, config.hello_line2)
                });
                if write_half.write_all(reply.as_bytes()).await.is_err() {
                    break;
                }
                let _ = write_half.flush().await;
            } else if trimmed == "CAT" {
                if config.stall_cat {
                    continue;
                }
                if !config.cat_supported {
                    if write_half
                        .write_all(UNSUPPORTED_REPLY.as_bytes())
                        .await
                        .is_err()
                    {
                        break;
                    }
                    let _ = write_half.flush().await;
                    continue;
                }

                // Listing lines joined by CRLF, terminated by a bare END line
                // with no trailing newline.
                let listing = if config.stations.is_empty() {
                    "END".to_owned()
                } else {
                    format!("{}\r\nEND", config.stations.join("\r\n"))
                };
                let bytes = listing.as_bytes();

                if config.split_writes {
                    let mid = bytes.len() / 2;
                    if write_half.write_all(&bytes[..mid]).await.is_err() {
                        break;
                    }
                    let _ = write_half.flush().await;
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    if write_half.write_all(&bytes[mid..]).await.is_err() {
                        break;
                    }
                } else if write_half.write_all(bytes).await.is_err() {
                    break;
                }
                let _ = write_half.flush().await;
            }
        }
    }
}
