//! The language server: lifecycle, document cache, and request routing.
//!
//! Single-threaded cooperative loop: read one framed message, dispatch,
//! write any responses, block on the next read. Cache recomputation
//! happens synchronously inside `didOpen`/`didChange`, so every response
//! on a document reflects its latest text.

use crate::features;
use crate::state::{DocumentState, LifecycleState};
use csl_lsp_protocol::{
    error_codes, methods, server_capabilities, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
};
use csl_lsp_transport::{InboundMessage, Transport};
use csl_uri::normalize_uri;
use rustc_hash::FxHashMap;
use serde_json::{json, Value};
use std::io::{self, BufRead, Write};

/// Callback invoked when the client answers one of our outbound requests.
pub type ResponseCallback = Box<dyn FnOnce(Option<Value>, Option<Value>)>;

/// The CSL language server over a framed byte channel.
pub struct LspServer<R, W> {
    transport: Transport<R, W>,
    lifecycle: LifecycleState,
    /// Normalized URI → cached analysis.
    documents: FxHashMap<String, DocumentState>,
    /// Auto-incrementing id for server-to-client requests.
    next_request_id: i64,
    /// Pending outbound requests awaiting a client response.
    pending: FxHashMap<i64, ResponseCallback>,
    /// Client advertised `multilineTokenSupport`.
    multiline_tokens: bool,
    exit_code: Option<i32>,
}

impl<R: BufRead, W: Write> LspServer<R, W> {
    /// Creates a server over the given byte channel.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            transport: Transport::new(reader, writer),
            lifecycle: LifecycleState::Start,
            documents: FxHashMap::default(),
            next_request_id: 0,
            pending: FxHashMap::default(),
            multiline_tokens: false,
            exit_code: None,
        }
    }

    /// Runs the read loop until `exit` or EOF. Returns the exit code.
    pub fn run(&mut self) -> io::Result<i32> {
        loop {
            let Some(message) = self.transport.read_message()? else {
                tracing::debug!("input channel closed");
                return Ok(self.exit_code.unwrap_or(1));
            };
            match message {
                InboundMessage::Request(request) => self.dispatch(request)?,
                InboundMessage::Response { id, result, error } => {
                    self.dispatch_response(id, result, error);
                }
                InboundMessage::Malformed(reason) => {
                    tracing::warn!(%reason, "malformed frame");
                    let response = JsonRpcResponse::error(
                        None,
                        JsonRpcError::new(error_codes::PARSE_ERROR, reason),
                    );
                    self.transport.write_response(&response)?;
                }
            }
            if let Some(code) = self.exit_code {
                return Ok(code);
            }
        }
    }

    /// Sends a server-to-client request, registering `callback` for the
    /// response.
    pub fn send_request(
        &mut self,
        method: &str,
        params: Value,
        callback: ResponseCallback,
    ) -> io::Result<()> {
        self.next_request_id += 1;
        let id = self.next_request_id;
        self.pending.insert(id, callback);
        self.transport.write_request(id, method, params)
    }

    fn dispatch_response(&mut self, id: Value, result: Option<Value>, error: Option<Value>) {
        let Some(id) = id.as_i64() else { return };
        if let Some(callback) = self.pending.remove(&id) {
            callback(result, error);
        } else {
            tracing::warn!(id, "response without a pending request");
        }
    }

    fn dispatch(&mut self, request: JsonRpcRequest) -> io::Result<()> {
        tracing::debug!(method = %request.method, notification = request.is_notification(), "dispatch");
        if request.is_notification() {
            self.handle_notification(&request)
        } else {
            let result = self.handle_request(&request);
            let response = match result {
                Ok(value) => JsonRpcResponse::success(request.id.clone(), value),
                Err(error) => JsonRpcResponse::error(request.id.clone(), error),
            };
            self.transport.write_response(&response)
        }
    }

    fn handle_notification(&mut self, request: &JsonRpcRequest) -> io::Result<()> {
        match request.method.as_str() {
            methods::EXIT => {
                // Exit after shutdown is a clean 0; anything earlier is 1.
                self.exit_code =
                    Some(if self.lifecycle == LifecycleState::ShuttingDown { 0 } else { 1 });
                Ok(())
            }
            methods::INITIALIZED => {
                if self.lifecycle == LifecycleState::ServerInitialized {
                    self.lifecycle = LifecycleState::ClientInitialized;
                } else {
                    tracing::warn!("unexpected 'initialized' notification");
                }
                Ok(())
            }
            methods::TEXT_DOCUMENT_DID_OPEN | methods::TEXT_DOCUMENT_DID_CHANGE => {
                self.handle_document_sync(request)
            }
            methods::TEXT_DOCUMENT_DID_CLOSE => {
                if let Some(uri) = document_uri(request.params.as_ref()) {
                    self.documents.remove(&normalize_uri(&uri));
                    let params = features::diagnostics::publish_params(&uri, None);
                    self.transport
                        .write_notification(methods::TEXT_DOCUMENT_PUBLISH_DIAGNOSTICS, params)?;
                }
                Ok(())
            }
            methods::CANCEL_REQUEST => Ok(()),
            other => {
                tracing::debug!(method = %other, "ignored notification");
                Ok(())
            }
        }
    }

    /// Full-sync recomputation: lex twice, parse, publish diagnostics.
    fn handle_document_sync(&mut self, request: &JsonRpcRequest) -> io::Result<()> {
        let Some(params) = request.params.as_ref() else { return Ok(()) };
        let Some(uri) = document_uri(Some(params)) else { return Ok(()) };

        let text = match request.method.as_str() {
            methods::TEXT_DOCUMENT_DID_OPEN => params
                .get("textDocument")
                .and_then(|d| d.get("text"))
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => params
                .get("contentChanges")
                .and_then(Value::as_array)
                .and_then(|changes| changes.last())
                .and_then(|change| change.get("text"))
                .and_then(Value::as_str)
                .map(str::to_string),
        };
        let Some(text) = text else { return Ok(()) };

        let state = DocumentState::analyze(text);
        let publish = features::diagnostics::publish_params(&uri, Some(&state));
        self.documents.insert(normalize_uri(&uri), state);
        self.transport.write_notification(methods::TEXT_DOCUMENT_PUBLISH_DIAGNOSTICS, publish)
    }

    fn handle_request(&mut self, request: &JsonRpcRequest) -> Result<Value, JsonRpcError> {
        // Lifecycle gating first.
        match self.lifecycle {
            LifecycleState::Start => {
                if request.method == methods::INITIALIZE {
                    return self.handle_initialize(request);
                }
                return Err(JsonRpcError::new(
                    error_codes::SERVER_NOT_INITIALIZED,
                    "Server not initialized",
                ));
            }
            LifecycleState::ShuttingDown => {
                return Err(JsonRpcError::new(
                    error_codes::INVALID_REQUEST,
                    "Server already shutdown",
                ));
            }
            LifecycleState::ServerInitialized | LifecycleState::ClientInitialized => {}
        }

        match request.method.as_str() {
            methods::INITIALIZE => Err(JsonRpcError::new(
                error_codes::INVALID_REQUEST,
                "Server already initialized",
            )),
            methods::SHUTDOWN => {
                self.lifecycle = LifecycleState::ShuttingDown;
                Ok(Value::Null)
            }
            methods::TEXT_DOCUMENT_DIAGNOSTIC => {
                self.with_document(request, |state, _| features::diagnostics::pull(state))
            }
            methods::TEXT_DOCUMENT_SEMANTIC_TOKENS_FULL => {
                let multiline = self.multiline_tokens;
                self.with_document(request, |state, _| {
                    features::semantic_tokens::full(state, multiline)
                })
            }
            methods::TEXT_DOCUMENT_FORMATTING => {
                self.with_document(request, |state, _| features::formatting::format(state))
            }
            methods::TEXT_DOCUMENT_DEFINITION => self.with_document(request, |state, params| {
                let uri = document_uri(Some(params)).unwrap_or_default();
                features::navigation::definition(state, params, &uri)
            }),
            methods::TEXT_DOCUMENT_REFERENCES => self.with_document(request, |state, params| {
                let uri = document_uri(Some(params)).unwrap_or_default();
                features::navigation::references(state, params, &uri)
            }),
            methods::TEXT_DOCUMENT_RENAME => self.with_document(request, |state, params| {
                let uri = document_uri(Some(params)).unwrap_or_default();
                features::navigation::rename(state, params, &uri)
            }),
            methods::TEXT_DOCUMENT_COMPLETION => {
                self.with_document(request, |state, params| {
                    features::completion::complete(state, params)
                })
            }
            methods::TEXT_DOCUMENT_HOVER => {
                self.with_document(request, |state, params| features::hover::hover(state, params))
            }
            methods::TEXT_DOCUMENT_FOLDING_RANGE => {
                self.with_document(request, |state, _| features::folding::folding_ranges(state))
            }
            methods::CSL_GENERATE_HTML_DOC => self.handle_generate_html_doc(request),
            other => Err(JsonRpcError::method_not_found(other)),
        }
    }

    fn handle_initialize(&mut self, request: &JsonRpcRequest) -> Result<Value, JsonRpcError> {
        self.multiline_tokens = request
            .params
            .as_ref()
            .and_then(|p| p.get("capabilities"))
            .and_then(|c| c.get("textDocument"))
            .and_then(|t| t.get("semanticTokens"))
            .and_then(|s| s.get("multilineTokenSupport"))
            .and_then(Value::as_bool)
            .unwrap_or(false);
        self.lifecycle = LifecycleState::ServerInitialized;
        Ok(json!({
            "capabilities": server_capabilities(),
            "serverInfo": {
                "name": "csl-lsp",
                "version": env!("CARGO_PKG_VERSION"),
            },
        }))
    }

    fn handle_generate_html_doc(
        &mut self,
        request: &JsonRpcRequest,
    ) -> Result<Value, JsonRpcError> {
        let params = request.params.as_ref();
        let uri = params.and_then(|p| document_uri(Some(p)));
        let text = params
            .and_then(|p| p.get("textDocument"))
            .and_then(|d| d.get("text"))
            .and_then(Value::as_str);
        let reuse = params
            .and_then(|p| p.get("reuseExisting"))
            .and_then(Value::as_bool)
            .unwrap_or(false);
        let cached = uri.as_deref().and_then(|u| self.documents.get(&normalize_uri(u)));
        Ok(features::htmldoc::generate(cached, text, reuse))
    }

    /// Runs a handler against the cached state of the request's document.
    fn with_document(
        &mut self,
        request: &JsonRpcRequest,
        handler: impl FnOnce(&DocumentState, &Value) -> Value,
    ) -> Result<Value, JsonRpcError> {
        let params = request.params.clone().unwrap_or(Value::Null);
        let Some(uri) = document_uri(Some(&params)) else {
            return Err(JsonRpcError::new(
                error_codes::INVALID_PARAMS,
                "missing textDocument.uri",
            ));
        };
        match self.documents.get(&normalize_uri(&uri)) {
            Some(state) => Ok(handler(state, &params)),
            None => Err(JsonRpcError::new(
                error_codes::INVALID_PARAMS,
                format!("document not open: {uri}"),
            )),
        }
    }
}

/// Extracts `params.textDocument.uri`.
fn document_uri(params: Option<&Value>) -> Option<String> {
    params?
        .get("textDocument")?
        .get("uri")?
        .as_str()
        .map(str::to_string)
}
