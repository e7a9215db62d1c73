//! CSL Token Definitions
//!
//! This crate provides the shared token definitions used by the CSL lexer,
//! parser, and language server.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod descriptor;
mod stream;
mod token;

pub use descriptor::{DateTimeForm, SpecialNumber, StringForm, TypeDescriptor};
pub use stream::TokenStream;
pub use token::{Token, TokenKind};
