use crate::error::{ProtocolError, Result};

/// Client → server commands of the catalog exchange.
///
/// The discovery handshake uses exactly two commands: `HELLO` to elicit the
/// two-line greeting, and `CAT` to request the station listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Hello,
    Cat,
}

impl Command {
    /// Parse a command from a text line.
    ///
    /// The line may include the trailing `\r\n`. Keyword matching is
    /// case-insensitive; arguments are rejected.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim_end_matches('\n').trim_end_matches('\r');
        let mut parts = line.split_whitespace();
        let keyword = parts
            .next()
            .ok_or_else(|| ProtocolError::InvalidCommand("empty command".into()))?;

        let cmd = match keyword.to_uppercase().as_str() {
            "HELLO" => Self::Hello,
            "CAT" => Self::Cat,
            _ => {
                return Err(ProtocolError::InvalidCommand(format!(
                    "unknown command: {keyword:?}"
                )));
            }
        };

        if parts.next().is_some() {
            return Err(ProtocolError::InvalidCommand(format!(
                "{} takes no arguments",
                cmd.as_str()
            )));
        }
        Ok(cmd)
    }

    /// Serialize to wire bytes (CRLF-terminated line).
    pub fn to_bytes(&self) -> Vec<u8> {
        format!("{}\r\n", self.as_str()).into_bytes()
    }

    /// Returns the command keyword as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hello => "HELLO",
            Self::Cat => "CAT",
        }
    }
}
