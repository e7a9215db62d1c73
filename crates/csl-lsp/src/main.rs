//! CSL toolchain binary.
//!
//! Dispatches between the diagnostics printer (`--test`), the HTML
//! documentation generator (`--htmldoc`), and the language server
//! (`--langsvr` with a transport flag).

use anyhow::Result;
use csl_lsp::cli;
use std::env;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("CSL_LSP_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    let args: Vec<String> = env::args().skip(1).collect();
    let code = match args.first().map(String::as_str) {
        Some("--help") | Some("-h") => {
            println!("{}", cli::help_text());
            0
        }
        Some("--version") => {
            println!("csl-lsp {}", env!("CARGO_PKG_VERSION"));
            0
        }
        Some("--test") => match args.get(1) {
            Some(path) => unwrap_cli(cli::run_test_mode(path, &mut std::io::stdout())),
            None => usage("--test requires a file argument"),
        },
        Some("--htmldoc") => match (args.get(1), args.get(2)) {
            (Some(path), Some(outdir)) => {
                unwrap_cli(cli::run_htmldoc(path, outdir, &mut std::io::stdout()))
            }
            _ => usage("--htmldoc requires a file and an output directory"),
        },
        Some("--langsvr") => match cli::parse_transport(&args[1..]) {
            Ok(transport) => unwrap_cli(cli::run_language_server(transport)),
            Err(error) => usage(&error.to_string()),
        },
        Some(other) => usage(&format!("unknown option: {other}")),
        None => usage("no mode given"),
    };
    Ok(ExitCode::from(code as u8))
}

fn unwrap_cli(result: Result<i32, cli::CliError>) -> i32 {
    match result {
        Ok(code) => code,
        Err(error) => {
            eprintln!("csl-lsp: {error}");
            error.exit_code()
        }
    }
}

fn usage(message: &str) -> i32 {
    eprintln!("csl-lsp: {message}");
    eprintln!();
    eprintln!("{}", cli::help_text());
    2
}
