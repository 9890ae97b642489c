//! SeedLink catalog protocol types and parsing.
//!
//! This crate provides the pure protocol layer for the HELLO/CAT station
//! discovery exchange: command serialization, the handshake state machine,
//! and the fixed-column catalog listing parser. No I/O happens here — the
//! client crate feeds received bytes into [`Handshake`] and acts on the
//! returned [`Step`].

pub mod catalog;
pub mod command;
pub mod error;
pub mod handshake;

pub use catalog::StationRecord;
pub use command::Command;
pub use error::{ProtocolError, Result};
pub use handshake::{Greeting, Handshake, Phase, Step};
