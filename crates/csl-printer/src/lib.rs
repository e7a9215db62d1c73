//! Canonical CSL printing and formatting edits.
//!
//! [`print_document`] renders a parsed document back to canonical source:
//! two-space indentation, explicit keys sorted by name, the wildcard key
//! after them, the constraints block last. [`line_edits`] diffs the
//! current document text against the canonical rendering and produces
//! line-granular LSP text edits.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod diff;
mod printer;

pub use diff::{line_edits, TextEdit};
pub use printer::{print_constraint, print_document, print_expr, print_schema, type_label};
