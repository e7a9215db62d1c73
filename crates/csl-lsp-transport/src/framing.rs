//! Message framing for the LSP Base Protocol.

use csl_lsp_protocol::{JsonRpcRequest, JsonRpcResponse};
use serde_json::Value;
use std::io::{self, BufRead, Read, Write};

/// One classified inbound frame.
#[derive(Debug)]
pub enum InboundMessage {
    /// A request or notification (has a `method`).
    Request(JsonRpcRequest),
    /// A response to one of the server's own outbound requests.
    Response {
        /// Id of the outbound request this answers.
        id: Value,
        /// Success payload.
        result: Option<Value>,
        /// Error payload.
        error: Option<Value>,
    },
    /// A frame whose content was not valid JSON-RPC.
    Malformed(String),
}

/// Framed duplex channel carrying JSON-RPC messages.
///
/// The header line-ending style is detected from the first inbound frame
/// and reused for every outbound frame.
pub struct Transport<R, W> {
    reader: R,
    writer: W,
    crlf: bool,
}

impl<R: BufRead, W: Write> Transport<R, W> {
    /// Wraps a reader/writer pair. Outbound frames use CRLF headers until
    /// the first inbound frame reveals the client's style.
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer, crlf: true }
    }

    /// Reads one framed message.
    ///
    /// Returns `Ok(None)` on a clean EOF. I/O failures are returned as
    /// errors; content-level problems come back as
    /// [`InboundMessage::Malformed`] so the caller can answer with a
    /// JSON-RPC parse error instead of dying.
    pub fn read_message(&mut self) -> io::Result<Option<InboundMessage>> {
        let mut content_length: Option<usize> = None;

        loop {
            let mut line = Vec::new();
            let read = self.reader.read_until(b'\n', &mut line)?;
            if read == 0 {
                return Ok(None); // EOF between messages
            }

            // Detect the client's header line ending style.
            if line.ends_with(b"\r\n") {
                self.crlf = true;
                line.truncate(line.len() - 2);
            } else if line.ends_with(b"\n") {
                self.crlf = false;
                line.truncate(line.len() - 1);
            }

            if line.is_empty() {
                break; // end of headers
            }

            let header = String::from_utf8_lossy(&line);
            if let Some((name, value)) = header.split_once(':') {
                if name.trim().eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().ok();
                }
            }
        }

        let Some(length) = content_length else {
            return Ok(Some(InboundMessage::Malformed(
                "missing Content-Length header".to_string(),
            )));
        };

        let mut content = vec![0u8; length];
        self.reader.read_exact(&mut content)?;
        tracing::trace!(bytes = length, "frame read");

        let value: Value = match serde_json::from_slice(&content) {
            Ok(value) => value,
            Err(e) => return Ok(Some(InboundMessage::Malformed(e.to_string()))),
        };

        if value.get("method").is_some() {
            match serde_json::from_value::<JsonRpcRequest>(value) {
                Ok(request) => Ok(Some(InboundMessage::Request(request))),
                Err(e) => Ok(Some(InboundMessage::Malformed(e.to_string()))),
            }
        } else if let Some(id) = value.get("id") {
            Ok(Some(InboundMessage::Response {
                id: id.clone(),
                result: value.get("result").cloned(),
                error: value.get("error").cloned(),
            }))
        } else {
            Ok(Some(InboundMessage::Malformed(
                "message has neither method nor id".to_string(),
            )))
        }
    }

    /// Writes a response frame.
    pub fn write_response(&mut self, response: &JsonRpcResponse) -> io::Result<()> {
        let content = serde_json::to_string(response)?;
        self.write_frame(&content)
    }

    /// Writes a notification frame.
    pub fn write_notification(&mut self, method: &str, params: Value) -> io::Result<()> {
        let notification = serde_json::json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
        });
        let content = serde_json::to_string(&notification)?;
        self.write_frame(&content)
    }

    /// Writes a server-to-client request frame.
    pub fn write_request(&mut self, id: i64, method: &str, params: Value) -> io::Result<()> {
        let request = serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        let content = serde_json::to_string(&request)?;
        self.write_frame(&content)
    }

    fn write_frame(&mut self, content: &str) -> io::Result<()> {
        let separator = if self.crlf { "\r\n\r\n" } else { "\n\n" };
        write!(self.writer, "Content-Length: {}{}{}", content.len(), separator, content)?;
        self.writer.flush()?;
        tracing::trace!(bytes = content.len(), crlf = self.crlf, "frame written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::BufReader;

    fn frame(content: &str, crlf: bool) -> Vec<u8> {
        let sep = if crlf { "\r\n\r\n" } else { "\n\n" };
        format!("Content-Length: {}{}{}", content.len(), sep, content).into_bytes()
    }

    #[test]
    fn test_read_request_crlf() {
        let input = frame(r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#, true);
        let mut transport = Transport::new(BufReader::new(&input[..]), Vec::new());
        let message = transport.read_message().unwrap().unwrap();
        match message {
            InboundMessage::Request(request) => {
                assert_eq!(request.method, "initialize");
                assert_eq!(request.id, Some(serde_json::json!(1)));
            }
            other => panic!("expected request, got {other:?}"),
        }
        assert!(transport.crlf);
    }

    #[test]
    fn test_lf_style_detected_and_reused() {
        let input = frame(r#"{"jsonrpc":"2.0","method":"initialized"}"#, false);
        let mut transport = Transport::new(BufReader::new(&input[..]), Vec::new());
        transport.read_message().unwrap().unwrap();
        assert!(!transport.crlf);

        transport.write_notification("test", serde_json::json!({})).unwrap();
        let written = String::from_utf8(transport.writer.clone()).unwrap();
        assert!(written.contains("Content-Length: "));
        assert!(!written.contains("\r\n"));
    }

    #[test]
    fn test_eof_returns_none() {
        let mut transport = Transport::new(BufReader::new(&b""[..]), Vec::new());
        assert!(transport.read_message().unwrap().is_none());
    }

    #[test]
    fn test_malformed_json_is_recoverable() {
        let input = frame("{not json", true);
        let mut transport = Transport::new(BufReader::new(&input[..]), Vec::new());
        let message = transport.read_message().unwrap().unwrap();
        assert!(matches!(message, InboundMessage::Malformed(_)));
    }

    #[test]
    fn test_response_classified_by_missing_method() {
        let input = frame(r#"{"jsonrpc":"2.0","id":7,"result":null}"#, true);
        let mut transport = Transport::new(BufReader::new(&input[..]), Vec::new());
        let message = transport.read_message().unwrap().unwrap();
        match message {
            InboundMessage::Response { id, result, error } => {
                assert_eq!(id, serde_json::json!(7));
                assert_eq!(result, Some(Value::Null));
                assert!(error.is_none());
            }
            other => panic!("expected response, got {other:?}"),
        }
    }

    #[test]
    fn test_two_messages_back_to_back() {
        let mut input = frame(r#"{"jsonrpc":"2.0","method":"a"}"#, true);
        input.extend(frame(r#"{"jsonrpc":"2.0","method":"b"}"#, true));
        let mut transport = Transport::new(BufReader::new(&input[..]), Vec::new());
        let first = transport.read_message().unwrap().unwrap();
        let second = transport.read_message().unwrap().unwrap();
        let names: Vec<String> = [first, second]
            .into_iter()
            .map(|m| match m {
                InboundMessage::Request(r) => r.method,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(names, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_write_response_frames_correctly() {
        let mut transport = Transport::new(BufReader::new(&b""[..]), Vec::new());
        let response = JsonRpcResponse::null(Some(serde_json::json!(1)));
        transport.write_response(&response).unwrap();
        let written = String::from_utf8(transport.writer.clone()).unwrap();
        let (header, body) = written.split_once("\r\n\r\n").unwrap();
        let length: usize = header.strip_prefix("Content-Length: ").unwrap().parse().unwrap();
        assert_eq!(length, body.len());
    }
}
