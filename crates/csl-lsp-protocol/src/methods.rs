//! LSP method name constants for request/notification routing.
//!
//! Centralizes the method identifiers used by dispatch, capability
//! registration, and error reporting, following LSP 3.17 naming.

// ============================================================================
// Lifecycle Methods
// ============================================================================

/// Initialize request - first request from client to server
pub const INITIALIZE: &str = "initialize";

/// Initialized notification - sent after initialize response
pub const INITIALIZED: &str = "initialized";

/// Shutdown request - graceful server shutdown
pub const SHUTDOWN: &str = "shutdown";

/// Exit notification - terminate server process
pub const EXIT: &str = "exit";

// ============================================================================
// Text Document Synchronization
// ============================================================================

/// Document opened notification
pub const TEXT_DOCUMENT_DID_OPEN: &str = "textDocument/didOpen";

/// Document changed notification
pub const TEXT_DOCUMENT_DID_CHANGE: &str = "textDocument/didChange";

/// Document closed notification
pub const TEXT_DOCUMENT_DID_CLOSE: &str = "textDocument/didClose";

/// Diagnostics published by the server
pub const TEXT_DOCUMENT_PUBLISH_DIAGNOSTICS: &str = "textDocument/publishDiagnostics";

// ============================================================================
// Language Features
// ============================================================================

/// Pull diagnostics request
pub const TEXT_DOCUMENT_DIAGNOSTIC: &str = "textDocument/diagnostic";

/// Semantic tokens for the whole document
pub const TEXT_DOCUMENT_SEMANTIC_TOKENS_FULL: &str = "textDocument/semanticTokens/full";

/// Whole-document formatting
pub const TEXT_DOCUMENT_FORMATTING: &str = "textDocument/formatting";

/// Go to definition
pub const TEXT_DOCUMENT_DEFINITION: &str = "textDocument/definition";

/// Completion request
pub const TEXT_DOCUMENT_COMPLETION: &str = "textDocument/completion";

/// Hover request
pub const TEXT_DOCUMENT_HOVER: &str = "textDocument/hover";

/// Find references
pub const TEXT_DOCUMENT_REFERENCES: &str = "textDocument/references";

/// Rename symbol
pub const TEXT_DOCUMENT_RENAME: &str = "textDocument/rename";

/// Folding ranges
pub const TEXT_DOCUMENT_FOLDING_RANGE: &str = "textDocument/foldingRange";

// ============================================================================
// Special Methods
// ============================================================================

/// Request cancellation (accepted and ignored)
pub const CANCEL_REQUEST: &str = "$/cancelRequest";

/// Custom request: generate the HTML documentation site for a document
pub const CSL_GENERATE_HTML_DOC: &str = "csl/generateHtmlDoc";
