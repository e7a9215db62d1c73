//! CSL Language Server runtime.
//!
//! This crate ties the language pipeline (`csl-lexer`, `csl-parser`,
//! `csl-printer`, `csl-htmldoc`) to the Language Server Protocol. It
//! handles framing, server lifecycle, the per-document cache, and LSP
//! feature dispatching.
//!
//! # Architecture
//!
//! - [`server`] - dispatch loop, lifecycle state machine, document cache
//! - [`state`] - lifecycle enum and per-document analysis snapshots
//! - [`features`] - one module per LSP feature, each a pure function over
//!   a document snapshot
//! - [`cli`] - the `--test`/`--htmldoc`/`--langsvr` command-line surface
//!
//! The server is single-threaded and cooperative: one loop reads a frame,
//! dispatches it, writes the responses, and blocks on the next read.
//! Document analysis is recomputed synchronously inside `didOpen` and
//! `didChange`, so there is no race between recomputation and queries.
//!
//! # Usage
//!
//! ```no_run
//! # fn main() -> std::io::Result<()> {
//! let code = csl_lsp::run_stdio()?;
//! std::process::exit(code);
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod features;
pub mod server;
pub mod state;

pub use server::LspServer;
pub use state::{DocumentState, LifecycleState};

use std::io;

/// Runs the language server over stdin/stdout and returns the exit code.
pub fn run_stdio() -> io::Result<i32> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut server = LspServer::new(stdin.lock(), stdout.lock());
    server.run()
}
