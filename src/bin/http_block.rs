//! Command line entry point.
//!
//! Sends the request block found at a line of a document and prints the
//! rendered response to stdout. Logging goes to stderr and is controlled by
//! `RUST_LOG`.

use clap::Parser;
use http_block::commands::send_request;
use http_block::config::{get_config, load_from_env, update_config};
use http_block::host::{DocumentSource, PresentOptions, Presenter};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "http-block",
    about = "Send the HTTP request block at a line of a document",
    version
)]
struct Cli {
    /// Document containing request blocks
    file: PathBuf,

    /// 1-based line inside the block to send
    #[arg(short, long, default_value = "1")]
    line: usize,

    /// Accept invalid TLS certificates
    #[arg(long)]
    insecure: bool,

    /// JSON settings file with an "http-block" section
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Escape non-ASCII characters in pretty-printed JSON
    #[arg(long)]
    escape_unicode: bool,
}

/// Writes rendered output to stdout and errors to stderr.
struct StdoutPresenter;

impl Presenter for StdoutPresenter {
    fn present(&mut self, lines: &[String], display_mode: &str, _options: &PresentOptions) {
        log::info!("Display mode: {}", display_mode);

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for line in lines {
            if writeln!(out, "{}", line).is_err() {
                return;
            }
        }
    }

    fn report_error(&mut self, message: &str) {
        eprintln!("[http-block] {}", message);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let exit_code = match run() {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            eprintln!("[http-block] {}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

/// Returns whether the request was sent and presented.
fn run() -> Result<bool, String> {
    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("Cannot read settings {}: {}", path.display(), e))?;
            let value = serde_json::from_str(&text)
                .map_err(|e| format!("Invalid settings {}: {}", path.display(), e))?;
            Some(value)
        }
        None => None,
    };

    load_from_env(settings)?;
    update_config(|config| {
        if cli.insecure {
            config.verify_ssl = false;
        }
        if cli.escape_unicode {
            config.json_escape_unicode = true;
        }
    });

    let document = std::fs::read_to_string(&cli.file)
        .map_err(|e| format!("Cannot read {}: {}", cli.file.display(), e))?;
    let source = DocumentSource::from_text(&document, cli.line.saturating_sub(1));

    // Failures have already been reported through the presenter.
    Ok(send_request(&source, &mut StdoutPresenter, &get_config()).is_ok())
}
