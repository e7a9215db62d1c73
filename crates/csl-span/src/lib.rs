//! Source positions, regions, and diagnostics for the CSL toolchain.
//!
//! Every token and syntax node in the CSL pipeline carries a [`Region`],
//! a half-open `(line, column)` interval in the source document. Lexer and
//! parser problems are reported as [`Diagnostic`] values that accumulate
//! instead of aborting the pipeline.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod diagnostic;
mod position;
mod wire;

pub use diagnostic::{Diagnostic, Severity};
pub use position::{Position, Region};
pub use wire::{WireLocation, WirePosition, WireRange};
