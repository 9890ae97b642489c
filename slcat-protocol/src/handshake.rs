//! Sans-io handshake state machine for the HELLO/CAT exchange.
//!
//! The I/O driver feeds every received chunk into [`Handshake::advance`] and
//! acts on the returned [`Step`]. Response boundaries are re-evaluated on
//! each chunk — TCP gives no line framing, so a greeting or terminator may
//! arrive split across reads.

use crate::catalog::{self, StationRecord};
use crate::error::{ProtocolError, Result};

/// The literal reply of a server that understands HELLO but rejects CAT.
pub const UNSUPPORTED_REPLY: &str = "CAT command not implemented\r\n";

/// The two-line greeting sent in reply to HELLO.
///
/// Both lines are kept verbatim (minus line endings) — version banners are
/// free-form and variable length, e.g. `"SeedLink v3.1 (2020.075)"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Greeting {
    /// Protocol/version banner (first line).
    pub version: String,
    /// Server identifier (second line).
    pub identifier: String,
}

/// Handshake phase. The accumulation buffer lives on [`Handshake`] and is
/// cleared on every phase change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// HELLO sent; accumulating the two-line greeting.
    AwaitingGreeting,
    /// CAT sent; accumulating the listing until its terminator.
    AwaitingListing,
    /// Terminal — a result or error was emitted.
    Done,
}

/// Driver instruction returned by [`Handshake::advance`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Boundary not reached yet; keep reading.
    Continue,
    /// Greeting complete; send `CAT` and await the listing.
    SendCat(Greeting),
    /// Listing complete and parsed. Terminal.
    Complete(Vec<StationRecord>),
    /// Peer rejected CAT. Terminal.
    Unsupported,
}

/// Accumulates received bytes and detects response boundaries.
#[derive(Debug)]
pub struct Handshake {
    phase: Phase,
    buf: String,
}

impl Default for Handshake {
    fn default() -> Self {
        Self::new()
    }
}

impl Handshake {
    /// A fresh handshake, expecting the greeting first.
    pub fn new() -> Self {
        Self {
            phase: Phase::AwaitingGreeting,
            buf: String::new(),
        }
    }

    /// Returns the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Feed one chunk of received bytes and re-evaluate the boundary for the
    /// current phase.
    ///
    /// Returns [`ProtocolError::HandshakeDone`] if called after a terminal
    /// step was emitted, and [`ProtocolError::MalformedGreeting`] if the peer
    /// pushes bytes past its greeting before CAT was sent.
    pub fn advance(&mut self, chunk: &[u8]) -> Result<Step> {
        if self.phase == Phase::Done {
            return Err(ProtocolError::HandshakeDone);
        }
        self.buf.push_str(&String::from_utf8_lossy(chunk));

        match self.phase {
            Phase::AwaitingGreeting => self.check_greeting(),
            Phase::AwaitingListing => Ok(self.check_listing()),
            Phase::Done => unreachable!(),
        }
    }

    /// The greeting is recognized by segment count, not byte length: the
    /// buffer split on `\r\n` must yield exactly three segments — version
    /// line, identifier line, trailing empty segment.
    fn check_greeting(&mut self) -> Result<Step> {
        let segment_count = self.buf.split("\r\n").count();
        if segment_count < 3 {
            return Ok(Step::Continue);
        }
        // Bytes past the greeting before CAT was sent: the peer is not
        // speaking this protocol. Fail fast rather than wait for the read
        // timeout.
        if segment_count > 3 || !self.buf.ends_with("\r\n") {
            self.phase = Phase::Done;
            return Err(ProtocolError::MalformedGreeting(std::mem::take(
                &mut self.buf,
            )));
        }

        let mut lines = self.buf.split("\r\n");
        let greeting = Greeting {
            version: lines.next().unwrap_or_default().to_owned(),
            identifier: lines.next().unwrap_or_default().to_owned(),
        };
        self.buf.clear();
        self.phase = Phase::AwaitingListing;
        Ok(Step::SendCat(greeting))
    }

    fn check_listing(&mut self) -> Step {
        if self.buf == UNSUPPORTED_REPLY {
            self.phase = Phase::Done;
            self.buf.clear();
            return Step::Unsupported;
        }
        match catalog::strip_terminator(&self.buf) {
            Some(body) => {
                let stations = catalog::parse_listing(body);
                self.phase = Phase::Done;
                self.buf.clear();
                Step::Complete(stations)
            }
            None => Step::Continue,
        }
    }
}
