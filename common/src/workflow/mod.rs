//! The fixed remote job graph and the poll-step decision logic.
//!
//! The hosted service runs one predefined workflow. Submitting a job only
//! requires overriding the image-loader node's input with the uploaded
//! filename; the processed image comes back under the output node's entry
//! in the status `results` mapping. Both node ids are fixed properties of
//! the remote graph.

use serde_json::{Value, json};

use crate::model::response::StatusResponse;
use crate::model::status::WorkflowStatus;

/// Node of the remote graph that loads the input image.
pub const IMAGE_INPUT_NODE: &str = "3";

/// Node of the remote graph whose output is the processed image.
pub const RESULT_NODE: &str = "195";

/// Build the job-graph inputs for one submission, with the uploaded
/// filename wired into the image-loader node.
pub fn prompt_inputs(filename: &str) -> Value {
    json!({
        (IMAGE_INPUT_NODE): {
            "inputs": {
                "image": filename,
            }
        }
    })
}

/// What the orchestrator should do after one status poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollStep {
    /// Job not in a terminal state yet; sleep and poll again.
    NotFinished,
    /// Job finished; the contained filename can be resolved via `view`.
    Finished(String),
    /// Job failed, or finished without a usable result.
    Failed(String),
}

/// Classify one status response.
///
/// Only `done` and `failed` end the loop. An absent status (job not yet
/// started) and any label outside the known vocabulary both mean the poll
/// continues. A `done` status without a non-empty entry for [`RESULT_NODE`]
/// counts as a failure.
pub fn evaluate_status(status: &StatusResponse) -> PollStep {
    match status.status.as_deref().and_then(WorkflowStatus::parse) {
        Some(WorkflowStatus::Failed) => PollStep::Failed(
            status
                .error
                .clone()
                .unwrap_or_else(|| "Processing failed".to_string()),
        ),
        Some(WorkflowStatus::Done) => match result_filename(status) {
            Some(filename) => PollStep::Finished(filename.to_string()),
            None => PollStep::Failed("No result image found".to_string()),
        },
        _ => PollStep::NotFinished,
    }
}

/// The first filename produced by the result node, if any.
pub fn result_filename(status: &StatusResponse) -> Option<&str> {
    status
        .results
        .as_ref()?
        .get(RESULT_NODE)?
        .first()
        .map(String::as_str)
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn status(label: Option<&str>, results: Option<HashMap<String, Vec<String>>>) -> StatusResponse {
        StatusResponse {
            status: label.map(str::to_string),
            results,
            error: None,
        }
    }

    fn results_with(node: &str, files: &[&str]) -> HashMap<String, Vec<String>> {
        let mut map = HashMap::new();
        map.insert(node.to_string(), files.iter().map(|f| f.to_string()).collect());
        map
    }

    #[test]
    fn prompt_inputs_embeds_filename_at_image_loader_node() {
        let inputs = prompt_inputs("input-001.jpg");
        assert_eq!(inputs["3"]["inputs"]["image"], "input-001.jpg");
    }

    #[test]
    fn prompt_inputs_contains_only_the_override() {
        let inputs = prompt_inputs("a.png");
        let top = inputs.as_object().unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[IMAGE_INPUT_NODE]["inputs"].as_object().unwrap().len(), 1);
    }

    #[test]
    fn done_with_result_finishes_with_the_filename() {
        let status = status(Some("done"), Some(results_with("195", &["out.png"])));
        assert_eq!(
            evaluate_status(&status),
            PollStep::Finished("out.png".to_string())
        );
    }

    #[test]
    fn done_without_results_mapping_fails() {
        let status = status(Some("done"), None);
        assert_eq!(
            evaluate_status(&status),
            PollStep::Failed("No result image found".to_string())
        );
    }

    #[test]
    fn done_with_empty_result_entry_fails() {
        let status = status(Some("done"), Some(results_with("195", &[])));
        assert!(matches!(evaluate_status(&status), PollStep::Failed(_)));
    }

    #[test]
    fn done_with_results_under_other_node_fails() {
        let status = status(Some("done"), Some(results_with("12", &["out.png"])));
        assert!(matches!(evaluate_status(&status), PollStep::Failed(_)));
    }

    #[test]
    fn failed_surfaces_the_service_error() {
        let status = StatusResponse {
            status: Some("failed".to_string()),
            results: None,
            error: Some("node 3 crashed".to_string()),
        };
        assert_eq!(
            evaluate_status(&status),
            PollStep::Failed("node 3 crashed".to_string())
        );
    }

    #[test]
    fn failed_without_message_uses_fallback() {
        let status = status(Some("failed"), None);
        assert_eq!(
            evaluate_status(&status),
            PollStep::Failed("Processing failed".to_string())
        );
    }

    #[test]
    fn queueing_and_processing_keep_polling() {
        assert_eq!(evaluate_status(&status(Some("queueing"), None)), PollStep::NotFinished);
        assert_eq!(evaluate_status(&status(Some("processing"), None)), PollStep::NotFinished);
    }

    #[test]
    fn absent_status_keeps_polling() {
        assert_eq!(evaluate_status(&status(None, None)), PollStep::NotFinished);
    }

    #[test]
    fn unknown_label_keeps_polling() {
        assert_eq!(evaluate_status(&status(Some("warming-up"), None)), PollStep::NotFinished);
    }

    #[test]
    fn empty_result_filename_is_not_a_result() {
        let status = status(Some("done"), Some(results_with("195", &[""])));
        assert!(matches!(evaluate_status(&status), PollStep::Failed(_)));
    }
}
