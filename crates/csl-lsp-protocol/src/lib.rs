//! Protocol definitions for the CSL language server.
//!
//! JSON-RPC 2.0 message types, standard error codes, LSP method name
//! constants, and the server capability advertisement.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod capabilities;
mod jsonrpc;
pub mod methods;

pub use capabilities::{server_capabilities, SEMANTIC_TOKEN_TYPES};
pub use jsonrpc::{error_codes, JsonRpcError, JsonRpcRequest, JsonRpcResponse};
