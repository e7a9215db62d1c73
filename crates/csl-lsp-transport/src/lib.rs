//! LSP transport layer for the CSL language server.
//!
//! Implements Content-Length framing per the LSP Base Protocol over any
//! blocking byte channel (stdio, TCP, unix socket). The header line
//! ending style (CRLF per spec, bare LF from lenient clients) is detected
//! on the first message read and reused for every outgoing frame.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod framing;

pub use framing::{InboundMessage, Transport};
