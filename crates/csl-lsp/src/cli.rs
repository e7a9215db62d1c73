//! Command-line surface: diagnostics printing, HTML generation, and the
//! language-server transports.

use crate::LspServer;
use csl_parser::analyze;
use std::io::{self, BufReader, Write};
use std::path::Path;

/// CLI failure: usage errors exit 2, I/O failures exit 1.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Bad or missing arguments.
    #[error("{0}")]
    Usage(String),
    /// Underlying I/O failure.
    #[error("{0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => 2,
            CliError::Io(_) => 1,
        }
    }
}

/// `--test <file>`: lex and parse, print diagnostics.
///
/// Exits 0 when the file is clean and 1 when any diagnostic was emitted.
pub fn run_test_mode(path: &str, out: &mut impl Write) -> Result<i32, CliError> {
    let text = std::fs::read_to_string(path)?;
    let analysis = analyze(&text);
    for diagnostic in analysis.errors.iter().chain(&analysis.warnings) {
        writeln!(out, "{diagnostic}")?;
    }
    Ok(if analysis.errors.is_empty() && analysis.warnings.is_empty() { 0 } else { 1 })
}

/// `--htmldoc <file> <outdir>`: generate the documentation site on disk.
pub fn run_htmldoc(path: &str, outdir: &str, out: &mut impl Write) -> Result<i32, CliError> {
    let text = std::fs::read_to_string(path)?;
    let analysis = analyze(&text);
    let files = csl_htmldoc::generate(&analysis.document);

    std::fs::create_dir_all(outdir)?;
    for (name, content) in &files {
        std::fs::write(Path::new(outdir).join(name), content)?;
    }
    writeln!(out, "wrote {} files to {outdir}", files.len())?;

    for diagnostic in analysis.errors.iter().chain(&analysis.warnings) {
        writeln!(out, "{diagnostic}")?;
    }
    Ok(if analysis.errors.is_empty() { 0 } else { 1 })
}

/// The transport chosen by the `--langsvr` flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerTransport {
    /// LSP over stdin/stdout.
    Stdio,
    /// Client-mode TCP connect to a port on localhost.
    Socket(u16),
    /// Connect to a unix domain socket path.
    Pipe(String),
}

/// Parses the `--langsvr` flag set.
pub fn parse_transport(args: &[String]) -> Result<ServerTransport, CliError> {
    let mut transport = None;
    for arg in args {
        let next = if arg == "--stdio" {
            ServerTransport::Stdio
        } else if let Some(port) = arg.strip_prefix("--socket=").or_else(|| arg.strip_prefix("--port=")) {
            let port = port
                .parse()
                .map_err(|_| CliError::Usage(format!("invalid port: {port}")))?;
            ServerTransport::Socket(port)
        } else if let Some(name) = arg.strip_prefix("--pipe=") {
            ServerTransport::Pipe(name.to_string())
        } else {
            return Err(CliError::Usage(format!("unknown option: {arg}")));
        };
        if transport.is_some() {
            return Err(CliError::Usage("multiple transports given".to_string()));
        }
        transport = Some(next);
    }
    transport.ok_or_else(|| CliError::Usage("--langsvr requires a transport".to_string()))
}

/// Runs the language server over the selected transport and returns its
/// exit code.
pub fn run_language_server(transport: ServerTransport) -> Result<i32, CliError> {
    match transport {
        ServerTransport::Stdio => Ok(crate::run_stdio()?),
        ServerTransport::Socket(port) => {
            // Client-mode connect: the editor listens and the server dials.
            let stream = std::net::TcpStream::connect(("127.0.0.1", port))?;
            let reader = BufReader::new(stream.try_clone()?);
            let mut server = LspServer::new(reader, stream);
            Ok(server.run()?)
        }
        #[cfg(unix)]
        ServerTransport::Pipe(name) => {
            let stream = std::os::unix::net::UnixStream::connect(&name)?;
            let reader = BufReader::new(stream.try_clone()?);
            let mut server = LspServer::new(reader, stream);
            Ok(server.run()?)
        }
        #[cfg(not(unix))]
        ServerTransport::Pipe(_) => {
            Err(CliError::Usage("--pipe is only supported on unix platforms".to_string()))
        }
    }
}

/// The `--help` text.
pub fn help_text() -> String {
    [
        "CSL toolchain",
        "",
        "Usage: csl-lsp <mode> [options]",
        "",
        "Modes:",
        "  --test <file>              Lex and parse a schema file, print diagnostics",
        "  --htmldoc <file> <outdir>  Generate HTML documentation",
        "  --langsvr --stdio          Language server over stdin/stdout",
        "  --langsvr --socket=<port>  Language server, TCP connect to localhost:<port>",
        "  --langsvr --port=<port>    Alias for --socket",
        "  --langsvr --pipe=<name>    Language server over a unix socket path",
        "  --version                  Print the version",
        "  --help, -h                 Show this help",
        "",
        "Exit codes: 0 success, 1 diagnostics or runtime failure, 2 bad arguments.",
    ]
    .join("\n")
}
