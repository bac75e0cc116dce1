//! Component state for the image processor.

use gloo_file::ObjectUrl;
use yew::prelude::*;

/// Where the current processing attempt stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No attempt started (or state was reset).
    Idle,
    /// The upload/submit/poll/view pipeline is running.
    Processing,
    /// The processed image is available in `result_url`.
    Done,
    /// The attempt aborted; the message is in `error`.
    Failed,
}

/// Main state container for the `ImageProcessorComponent`.
///
/// Fields are `pub` because they are accessed by the `view` and `update`
/// modules.
pub struct ImageProcessorComponent {
    pub phase: Phase,

    /// Error message of the last failed attempt.
    pub error: Option<String>,

    /// Display URL of the processed image once an attempt completes.
    pub result_url: Option<String>,

    /// Object URL of the selected file, previewed while the attempt runs.
    /// Kept alive here because dropping an `ObjectUrl` revokes it.
    pub preview: Option<ObjectUrl>,

    /// Reference to the hidden file input used for image selection.
    pub file_input_ref: NodeRef,
}

impl ImageProcessorComponent {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            error: None,
            result_url: None,
            preview: None,
            file_input_ref: NodeRef::default(),
        }
    }

    pub fn is_processing(&self) -> bool {
        self.phase == Phase::Processing
    }
}
