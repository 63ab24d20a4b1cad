//! Command handlers.
//!
//! [`send_request`] is the single entry point an embedding host calls: it
//! reads the block under the cursor, resolves variables, parses and sends
//! the request, renders the response and hands the result to the presenter.

use crate::config::HttpBlockConfig;
use crate::executor::{execute_request, ExecutionConfig, RequestError};
use crate::formatter::{render, RenderOptions, RenderedResponse};
use crate::host::{BlockSource, PresentOptions, Presenter};
use crate::models::HttpRequest;
use crate::parser::error::ParseError;
use crate::parser::parse_block;
use crate::variables::resolve;

/// Error types for command execution.
#[derive(Debug)]
pub enum CommandError {
    /// The block could not be turned into a request. Nothing was sent.
    Parse(ParseError),

    /// The request was built but sending it failed.
    Request(RequestError),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::Parse(err) => write!(f, "{}", err),
            CommandError::Request(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommandError::Parse(err) => Some(err),
            CommandError::Request(err) => Some(err),
        }
    }
}

impl From<ParseError> for CommandError {
    fn from(err: ParseError) -> Self {
        CommandError::Parse(err)
    }
}

impl From<RequestError> for CommandError {
    fn from(err: RequestError) -> Self {
        CommandError::Request(err)
    }
}

/// Builds the request for the block a source points at.
///
/// Global variables are collected from the whole document, local ones from
/// the block itself.
///
/// # Errors
///
/// Any [`ParseError`] from the block parser.
pub fn prepare_request<S: BlockSource + ?Sized>(source: &S) -> Result<HttpRequest, ParseError> {
    let document = source.document_lines();
    let block = source.block_lines();
    let variables = resolve(&document, &block);

    parse_block(&block, &variables)
}

/// Sends the request under the cursor and presents the response.
///
/// Parse errors are detected before anything is sent. On failure the error
/// is reported to the presenter as a single line and also returned.
///
/// # Arguments
///
/// * `source` - Supplies the document and the block to send
/// * `presenter` - Receives the rendered response or the error
/// * `config` - Configuration for this invocation
///
/// # Returns
///
/// `Ok(RenderedResponse)` with what was presented, or `Err(CommandError)`.
///
/// # Examples
///
/// ```no_run
/// use http_block::commands::send_request;
/// use http_block::config::get_config;
/// use http_block::host::{BufferPresenter, DocumentSource};
///
/// let source = DocumentSource::from_text("GET https://httpbin.org/get\n", 0);
/// let mut presenter = BufferPresenter::new();
///
/// if send_request(&source, &mut presenter, &get_config()).is_ok() {
///     println!("{}", presenter.lines().join("\n"));
/// }
/// ```
pub fn send_request<S, P>(
    source: &S,
    presenter: &mut P,
    config: &HttpBlockConfig,
) -> Result<RenderedResponse, CommandError>
where
    S: BlockSource + ?Sized,
    P: Presenter + ?Sized,
{
    presenter.request_started();
    let outcome = run(source, config);
    presenter.request_finished();

    match outcome {
        Ok(rendered) => {
            let display_mode = config.display_mode_for(&rendered.content_type);
            presenter.present(
                &rendered.lines,
                display_mode,
                &PresentOptions::from_config(config),
            );
            Ok(rendered)
        }
        Err(err) => {
            presenter.report_error(&err.to_string());
            Err(err)
        }
    }
}

fn run<S: BlockSource + ?Sized>(
    source: &S,
    config: &HttpBlockConfig,
) -> Result<RenderedResponse, CommandError> {
    let request = prepare_request(source)?;
    let response = execute_request(&request, &ExecutionConfig::from_config(config))?;

    let options = RenderOptions {
        escape_unicode: config.json_escape_unicode,
    };
    Ok(render(&response, &options))
}
