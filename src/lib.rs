//! Plain-text HTTP request blocks
//!
//! This crate sends HTTP requests written as plain-text blocks inside any
//! document and renders the responses back as annotated text.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - **variables**: Collects `$global` and `:local` declarations and substitutes them
//! - **parser**: Parses a block into a structured request and classifies its payload
//! - **executor**: Executes one request using reqwest
//! - **formatter**: Renders responses, pretty-printing JSON, with a metadata trailer
//! - **host**: The `BlockSource` / `Presenter` pair an embedding host implements
//! - **commands**: `send_request`, which drives all of the above
//! - **config**: Options read from a settings document and the environment
//!
//! # Block Format
//!
//! Blocks are separated by blank lines. Lines starting with `#` are comments;
//! those of the form `# $name = value` declare a global variable usable in any
//! block of the document, and `# :name = value` a variable local to its block.
//!
//! ```text
//! # $host = api.example.com
//!
//! # :id = 42
//! GET https://$host/users/:id
//! Accept: application/json
//!
//! POST https://$host/upload
//! description=monthly report
//! report=!file(/tmp/report \(final\).pdf)
//! note=!content(inline bytes)
//! ```
//!
//! The first significant line is `METHOD url`, followed by a contiguous run
//! of `Name: value` header lines. The remaining lines are the body: a form if
//! every line has a `=`, raw text otherwise. Form values written as
//! `!file(path)` or `!content(text)` are sent as multipart attachments.
//!
//! # Usage
//!
//! ```no_run
//! use http_block::commands::send_request;
//! use http_block::config::load_from_env;
//! use http_block::host::{BufferPresenter, DocumentSource};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_from_env(None)?;
//! let document = std::fs::read_to_string("requests.http")?;
//! let source = DocumentSource::from_text(&document, 3);
//!
//! let mut presenter = BufferPresenter::new();
//! send_request(&source, &mut presenter, &config)?;
//!
//! for line in presenter.lines() {
//!     println!("{}", line);
//! }
//! # Ok(())
//! # }
//! ```

pub mod commands;
pub mod config;
pub mod executor;
pub mod formatter;
pub mod host;
pub mod models;
pub mod parser;
pub mod variables;

pub use commands::{send_request, CommandError};
