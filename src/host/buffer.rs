//! In-memory output buffer presenter.

use super::{PresentOptions, Presenter};
use crate::config::SplitOrientation;

/// A presenter that keeps output in a scratch buffer.
///
/// Mirrors what an editor does with its output window: the first
/// presentation opens the panel with the configured orientation, later ones
/// reuse it. Errors are collected separately and never touch the buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferPresenter {
    buffer: Vec<String>,
    display_mode: Option<String>,
    orientation: Option<SplitOrientation>,
    focused: bool,
    in_progress: bool,
    errors: Vec<String>,
}

impl BufferPresenter {
    /// Creates a presenter with an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current buffer contents.
    pub fn lines(&self) -> &[String] {
        &self.buffer
    }

    /// Display mode of the last presentation.
    pub fn display_mode(&self) -> Option<&str> {
        self.display_mode.as_deref()
    }

    /// Orientation the panel was opened with, if it has been opened.
    pub fn orientation(&self) -> Option<SplitOrientation> {
        self.orientation
    }

    /// Whether focus was left on the output.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Whether a request has started and not yet finished.
    pub fn is_request_in_progress(&self) -> bool {
        self.in_progress
    }

    /// Errors reported so far, oldest first.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Writes output into the buffer.
    ///
    /// With `preserve` set, the new output goes on top, separated from the
    /// previous contents by a blank line. Otherwise the buffer is replaced.
    fn write_buffer(&mut self, contents: &[String], preserve: bool) {
        if preserve {
            let mut updated = Vec::with_capacity(contents.len() + 1 + self.buffer.len());
            updated.extend_from_slice(contents);
            if !self.buffer.is_empty() {
                updated.push(String::new());
            }
            updated.append(&mut self.buffer);
            self.buffer = updated;
        } else {
            self.buffer = contents.to_vec();
        }
    }
}

impl Presenter for BufferPresenter {
    fn present(&mut self, lines: &[String], display_mode: &str, options: &PresentOptions) {
        if self.orientation.is_none() {
            self.orientation = Some(options.orientation);
        }
        self.display_mode = Some(display_mode.to_string());
        self.write_buffer(lines, options.preserve_responses);
        self.focused = options.focus_output;
    }

    fn report_error(&mut self, message: &str) {
        log::error!("{}", message);
        self.errors.push(message.to_string());
    }

    fn request_started(&mut self) {
        self.in_progress = true;
    }

    fn request_finished(&mut self) {
        self.in_progress = false;
    }
}
