//! Fixed-column station listing parsing.
//!
//! A CAT listing is a block of text lines, one station per line, terminated
//! by a literal `END` line. Column positions are a contract of the wire
//! format, not inferred:
//!
//! ```text
//! NL  HGN    Heerlen-Mechelen
//! ^^  ^^^^^  ^
//! 0-1 3-7    9..
//! ```

/// Byte range of the network code within a listing line.
const NETWORK: std::ops::Range<usize> = 0..2;
/// Byte range of the station code within a listing line.
const STATION: std::ops::Range<usize> = 3..8;
/// Byte offset where the site description starts.
const SITE_START: usize = 9;

/// The listing terminator: a literal `END` on its own line.
pub const TERMINATOR: &str = "\nEND";

/// One discovered station, derived from a single listing line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StationRecord {
    /// FDSN network code (e.g., `"NL"`), trimmed.
    pub network: String,
    /// Station code (e.g., `"HGN"`), trimmed.
    pub station: String,
    /// Free-text site description, trimmed.
    pub site: String,
}

/// Recognize and strip the listing terminator.
///
/// Returns the listing body iff the buffer ends with the terminator, which
/// is stripped exactly once (consuming the final line boundary). A buffer of
/// exactly `END` is a zero-station listing. Returns `None` while the
/// terminator has not arrived yet.
pub fn strip_terminator(buf: &str) -> Option<&str> {
    if buf == "END" {
        return Some("");
    }
    buf.strip_suffix(TERMINATOR)
}

/// Parse a terminator-stripped listing body into station records.
///
/// One record per non-blank line, in line order. Fields are extracted from
/// fixed byte columns and trimmed; lines shorter than a column yield empty
/// fields. Record content is not validated — an empty network code passes
/// through as an empty string.
pub fn parse_listing(body: &str) -> Vec<StationRecord> {
    body.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| StationRecord {
            network: column(line, NETWORK.start, Some(NETWORK.end)),
            station: column(line, STATION.start, Some(STATION.end)),
            site: column(line, SITE_START, None),
        })
        .collect()
}

fn column(line: &str, start: usize, end: Option<usize>) -> String {
    let bytes = line.as_bytes();
    if start >= bytes.len() {
        return String::new();
    }
    let end = end.map_or(bytes.len(), |e| e.min(bytes.len()));
    String::from_utf8_lossy(&bytes[start..end]).trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_single_line() {
        let records = parse_listing("NL  HGN    Heerlen-Mechelen");
        assert_eq!(
            records,
            vec![StationRecord {
                network: "NL".into(),
                station: "HGN".into(),
                site: "Heerlen-Mechelen".into(),
            }]
        );
    }

    #[test]
    fn parse_preserves_line_order() {
        let body = "IU  ANMO   Albuquerque, New Mexico\r\nGE  WLF    Walferdange, Luxembourg\r";
        let records = parse_listing(body);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].station, "ANMO");
        assert_eq!(records[1].network, "GE");
        assert_eq!(records[1].site, "Walferdange, Luxembourg");
    }

    #[test]
    fn parse_short_line_yields_empty_fields() {
        let records = parse_listing("NL");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].network, "NL");
        assert_eq!(records[0].station, "");
        assert_eq!(records[0].site, "");
    }

    #[test]
    fn parse_empty_network_passes_through() {
        let records = parse_listing("    HGN    Heerlen");
        assert_eq!(records[0].network, "");
        assert_eq!(records[0].station, "HGN");
    }

    #[test]
    fn parse_skips_empty_lines() {
        let records = parse_listing("NL  HGN    Heerlen\r\n\r\nGE  WLF    Walferdange");
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn parse_empty_body() {
        assert!(parse_listing("").is_empty());
    }

    #[test]
    fn strip_terminator_at_end() {
        let body = strip_terminator("NL  HGN    Heerlen\r\nEND").unwrap();
        assert_eq!(body, "NL  HGN    Heerlen\r");
        // The stripped body parses without a phantom record.
        assert_eq!(parse_listing(body).len(), 1);
    }

    #[test]
    fn strip_terminator_zero_stations() {
        assert_eq!(strip_terminator("END"), Some(""));
    }

    #[test]
    fn strip_terminator_incomplete() {
        assert_eq!(strip_terminator("NL  HGN    Heerlen\r\nEN"), None);
        assert_eq!(strip_terminator("NL  HGN    Heerlen\r\n"), None);
        assert_eq!(strip_terminator(""), None);
    }

    #[test]
    fn strip_terminator_only_once() {
        // A site that happens to mention END mid-line must not terminate.
        assert_eq!(strip_terminator("NL  HGN    END of road\r\n"), None);
        let body = strip_terminator("NL  HGN    END of road\r\nEND").unwrap();
        assert_eq!(parse_listing(body)[0].site, "END of road");
    }
}
