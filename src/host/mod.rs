//! Host integration.
//!
//! The interpreter talks to whatever embeds it through two traits:
//!
//! - [`BlockSource`] supplies the document and the block under the cursor;
//! - [`Presenter`] receives the rendered response or a one-line error.
//!
//! [`DocumentSource`] and [`BufferPresenter`] are in-memory implementations,
//! used by the command line binary and by tests.

pub mod block;
pub mod buffer;

pub use block::{find_block, DocumentSource};
pub use buffer::BufferPresenter;

use crate::config::{HttpBlockConfig, SplitOrientation};
use serde::{Deserialize, Serialize};

/// Supplies the text a request is interpreted from.
pub trait BlockSource {
    /// All lines of the document, used to collect global variables.
    fn document_lines(&self) -> Vec<String>;

    /// Lines of the block to send.
    fn block_lines(&self) -> Vec<String>;
}

/// How the presenter should show output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentOptions {
    /// Prepend the new output above previous output instead of replacing it.
    pub preserve_responses: bool,

    /// Leave focus on the output after presenting.
    pub focus_output: bool,

    /// Orientation of a newly opened output panel.
    pub orientation: SplitOrientation,
}

impl PresentOptions {
    /// Extracts the presentation settings from a configuration.
    pub fn from_config(config: &HttpBlockConfig) -> Self {
        Self {
            preserve_responses: config.preserve_responses,
            focus_output: config.focus_output_window,
            orientation: config.split_orientation(),
        }
    }
}

impl Default for PresentOptions {
    fn default() -> Self {
        Self::from_config(&HttpBlockConfig::default())
    }
}

/// Receives the outcome of a request.
pub trait Presenter {
    /// Shows rendered output lines.
    ///
    /// `display_mode` is the syntax mode picked from the content type, e.g.
    /// `javascript` for JSON.
    fn present(&mut self, lines: &[String], display_mode: &str, options: &PresentOptions);

    /// Shows a single-line error message.
    fn report_error(&mut self, message: &str);

    /// Called once before a block is interpreted.
    fn request_started(&mut self) {}

    /// Called once after the request finished or failed, before the outcome
    /// is presented or reported.
    fn request_finished(&mut self) {}
}
