//! Relay handler: parses the multipart request and forwards one action.

use actix_multipart::{Field, Multipart};
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, Responder};
use futures_util::StreamExt;
use serde_json::Value;
use std::str::FromStr;

use common::model::response::ErrorResponse;

use super::client::{WorkflowApiError, WorkflowServiceApi};

/// The four actions the relay understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Upload,
    Prompt,
    Status,
    View,
}

impl FromStr for Action {
    type Err = RelayError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "upload" => Ok(Self::Upload),
            "prompt" => Ok(Self::Prompt),
            "status" => Ok(Self::Status),
            "view" => Ok(Self::View),
            other => Err(RelayError::InvalidAction(other.to_string())),
        }
    }
}

/// Everything that can go wrong while relaying one request.
///
/// Client-side problems (bad action, missing or malformed fields) map to
/// 400; upstream failures map to 500. Either way the body is a JSON
/// `{"error": ...}` object.
#[derive(Debug, thiserror::Error)]
enum RelayError {
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Missing form field: {0}")]
    MissingField(&'static str),

    #[error("Malformed multipart payload: {0}")]
    Multipart(String),

    #[error("Malformed inputs JSON: {0}")]
    BadInputs(#[from] serde_json::Error),

    #[error(transparent)]
    Upstream(#[from] WorkflowApiError),
}

impl RelayError {
    fn status_code(&self) -> StatusCode {
        match self {
            RelayError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

/// HTTP handler wrapper that converts the internal result into an
/// `HttpResponse`: the upstream JSON body on success, a JSON error body
/// with the mapped status otherwise.
pub(super) async fn process(
    payload: Multipart,
    api: web::Data<WorkflowServiceApi>,
) -> impl Responder {
    match relay(payload, api.get_ref()).await {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(err) => {
            log::warn!("relay request failed: {}", err);
            HttpResponse::build(err.status_code()).json(ErrorResponse {
                error: err.to_string(),
            })
        }
    }
}

/// Collected fields of one relay request. Only the fields relevant to the
/// chosen action are read by the dispatch.
#[derive(Default)]
struct RelayForm {
    action: Option<String>,
    /// Browser filename and raw bytes of the `image` part.
    image: Option<(String, Vec<u8>)>,
    inputs: Option<String>,
    prompt_id: Option<String>,
    filename: Option<String>,
}

async fn relay(payload: Multipart, api: &WorkflowServiceApi) -> Result<Value, RelayError> {
    let form = collect_form(payload).await?;
    let action: Action = form
        .action
        .as_deref()
        .ok_or(RelayError::MissingField("action"))?
        .parse()?;
    log::debug!("relaying {:?} request", action);

    match action {
        Action::Upload => {
            let (filename, bytes) = form.image.ok_or(RelayError::MissingField("image"))?;
            Ok(api.upload_image(filename, bytes).await?)
        }
        Action::Prompt => {
            let raw = form.inputs.ok_or(RelayError::MissingField("inputs"))?;
            let inputs: Value = serde_json::from_str(&raw)?;
            Ok(api.submit_prompt(&inputs).await?)
        }
        Action::Status => {
            let prompt_id = form.prompt_id.ok_or(RelayError::MissingField("promptId"))?;
            Ok(api.fetch_status(&prompt_id).await?)
        }
        Action::View => {
            let filename = form.filename.ok_or(RelayError::MissingField("filename"))?;
            Ok(api.fetch_view(&filename).await?)
        }
    }
}

/// Drain the multipart stream into a [`RelayForm`]. Unknown fields are
/// consumed and ignored.
async fn collect_form(mut payload: Multipart) -> Result<RelayForm, RelayError> {
    let mut form = RelayForm::default();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|err| RelayError::Multipart(err.to_string()))?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        match name.as_deref() {
            Some("action") => form.action = Some(read_text(&mut field).await?),
            Some("image") => {
                let filename = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
                    .unwrap_or_else(|| "upload.bin".to_string());
                form.image = Some((filename, read_bytes(&mut field).await?));
            }
            Some("inputs") => form.inputs = Some(read_text(&mut field).await?),
            Some("promptId") => form.prompt_id = Some(read_text(&mut field).await?),
            Some("filename") => form.filename = Some(read_text(&mut field).await?),
            _ => {
                read_bytes(&mut field).await?;
            }
        }
    }

    Ok(form)
}

async fn read_bytes(field: &mut Field) -> Result<Vec<u8>, RelayError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|err| RelayError::Multipart(err.to_string()))?;
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

async fn read_text(field: &mut Field) -> Result<String, RelayError> {
    String::from_utf8(read_bytes(field).await?)
        .map_err(|_| RelayError::Multipart("text field is not valid UTF-8".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_actions_parse() {
        assert_eq!("upload".parse::<Action>().unwrap(), Action::Upload);
        assert_eq!("prompt".parse::<Action>().unwrap(), Action::Prompt);
        assert_eq!("status".parse::<Action>().unwrap(), Action::Status);
        assert_eq!("view".parse::<Action>().unwrap(), Action::View);
    }

    #[test]
    fn unknown_action_is_rejected() {
        let err = "bogus".parse::<Action>().unwrap_err();
        assert!(matches!(err, RelayError::InvalidAction(ref name) if name == "bogus"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn client_side_errors_map_to_400() {
        assert_eq!(
            RelayError::MissingField("promptId").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RelayError::Multipart("truncated".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        let bad_json = serde_json::from_str::<Value>("{").unwrap_err();
        assert_eq!(
            RelayError::BadInputs(bad_json).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn upstream_errors_map_to_500() {
        let err = RelayError::Upstream(WorkflowApiError::Service {
            status: 502,
            body: "bad gateway".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("502"));
    }
}
