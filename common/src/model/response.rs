//! Response envelopes of the hosted workflow service, as relayed to the
//! browser.
//!
//! The relay passes upstream JSON bodies through verbatim, so every field
//! here is optional: a body either carries the payload field for its call
//! (`filename`, `promptID`, `status`/`results`, `target`) or an `error`
//! message. The orchestrator decides how to proceed by inspecting which
//! fields are present.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Body returned by the `upload` action. A successful upload carries the
/// service-side filename of the stored image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub filename: Option<String>,
    pub error: Option<String>,
}

/// Body returned by the `prompt` action. A successful submission carries
/// the service-assigned prompt identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptResponse {
    #[serde(rename = "promptID")]
    pub prompt_id: Option<String>,
    pub error: Option<String>,
}

/// Body returned by the `status` action.
///
/// `status` is the service's status label (see
/// [`WorkflowStatus`](super::status::WorkflowStatus)); it is absent while
/// the job has not started. On completion `results` maps output node ids
/// to the filenames that node produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: Option<String>,
    pub results: Option<HashMap<String, Vec<String>>>,
    pub error: Option<String>,
}

/// Body returned by the `view` action: the displayable URL for a named
/// result file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewResponse {
    pub target: Option<String>,
    pub error: Option<String>,
}

/// Error body produced by the relay itself (bad action, missing field,
/// upstream failure). Matches the `error` key the upstream service uses,
/// so the browser handles both uniformly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_response_with_filename() {
        let body: UploadResponse =
            serde_json::from_str(r#"{"filename":"input-001.jpg"}"#).unwrap();
        assert_eq!(body.filename.as_deref(), Some("input-001.jpg"));
        assert!(body.error.is_none());
    }

    #[test]
    fn upload_response_without_filename() {
        let body: UploadResponse = serde_json::from_str(r#"{"error":"quota exceeded"}"#).unwrap();
        assert!(body.filename.is_none());
        assert_eq!(body.error.as_deref(), Some("quota exceeded"));
    }

    #[test]
    fn prompt_response_uses_service_field_name() {
        let body: PromptResponse = serde_json::from_str(r#"{"promptID":"abc-123"}"#).unwrap();
        assert_eq!(body.prompt_id.as_deref(), Some("abc-123"));
    }

    #[test]
    fn status_response_with_results() {
        let body: StatusResponse = serde_json::from_str(
            r#"{"status":"done","results":{"195":["out.png"],"12":[]}}"#,
        )
        .unwrap();
        assert_eq!(body.status.as_deref(), Some("done"));
        let results = body.results.unwrap();
        assert_eq!(results["195"], vec!["out.png"]);
        assert!(results["12"].is_empty());
    }

    #[test]
    fn status_response_before_job_starts() {
        let body: StatusResponse = serde_json::from_str("{}").unwrap();
        assert!(body.status.is_none());
        assert!(body.results.is_none());
    }

    #[test]
    fn view_response_carries_target_url() {
        let body: ViewResponse =
            serde_json::from_str(r#"{"target":"https://cdn.example/out.png"}"#).unwrap();
        assert_eq!(body.target.as_deref(), Some("https://cdn.example/out.png"));
    }

    #[test]
    fn error_response_round_trip() {
        let body = ErrorResponse {
            error: "Invalid action: bogus".to_string(),
        };
        let json = serde_json::to_string(&body).unwrap();
        let parsed: ErrorResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.error, "Invalid action: bogus");
    }
}
