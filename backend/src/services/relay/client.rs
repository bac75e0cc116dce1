//! REST client for the hosted workflow service.
//!
//! Wraps the four service endpoints (image upload, prompt submission,
//! status lookup, result view) using [`reqwest`]. Bodies are returned as
//! raw [`serde_json::Value`] so the relay can pass them through to the
//! browser untouched.

use serde_json::Value;

/// HTTP client for one hosted workflow.
pub struct WorkflowServiceApi {
    client: reqwest::Client,
    base_url: String,
    workflow_id: String,
    access_token: String,
}

/// Errors from the workflow service REST layer.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("workflow service error ({status}): {body}")]
    Service {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl WorkflowServiceApi {
    /// Create a new API client.
    ///
    /// * `base_url` - Service base URL, e.g. `https://comfyai.run`.
    /// * `workflow_id` - Identifier of the predefined workflow graph.
    /// * `access_token` - Bearer credential sent on every call.
    pub fn new(base_url: String, workflow_id: String, access_token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            workflow_id,
            access_token,
        }
    }

    pub fn from_config(config: &crate::config::RelayConfig) -> Self {
        Self::new(
            config.service_url.clone(),
            config.workflow_id.clone(),
            config.access_token.clone(),
        )
    }

    /// Forward an uploaded image.
    ///
    /// Sends a `POST /api/service/upload/{workflow}` multipart request with
    /// the image bytes under the `image` field, preserving the browser
    /// filename. The response carries the service-side filename.
    pub async fn upload_image(
        &self,
        filename: String,
        bytes: Vec<u8>,
    ) -> Result<Value, WorkflowApiError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename);
        let form = reqwest::multipart::Form::new().part("image", part);

        let response = self
            .client
            .post(self.endpoint("upload", &self.workflow_id))
            .bearer_auth(&self.access_token)
            .multipart(form)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Submit one job.
    ///
    /// Sends a `POST /api/service/prompt/{workflow}` request with the
    /// job-graph inputs as JSON. The response carries the server-assigned
    /// `promptID`.
    pub async fn submit_prompt(&self, inputs: &Value) -> Result<Value, WorkflowApiError> {
        let response = self
            .client
            .post(self.endpoint("prompt", &self.workflow_id))
            .bearer_auth(&self.access_token)
            .json(inputs)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Look up the status of a submitted job.
    ///
    /// Sends a `GET /api/service/status/{prompt_id}` request. On completion
    /// the body includes the results mapping of output node ids to
    /// filenames.
    pub async fn fetch_status(&self, prompt_id: &str) -> Result<Value, WorkflowApiError> {
        let response = self
            .client
            .get(self.endpoint("status", prompt_id))
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Resolve a result filename to a displayable URL.
    ///
    /// Sends a `GET /api/service/view/{workflow}?filename=...` request.
    pub async fn fetch_view(&self, filename: &str) -> Result<Value, WorkflowApiError> {
        let response = self
            .client
            .get(self.endpoint("view", &self.workflow_id))
            .query(&[("filename", filename)])
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    fn endpoint(&self, action: &str, tail: &str) -> String {
        format!("{}/api/service/{}/{}", self.base_url, action, tail)
    }

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or a [`WorkflowApiError::Service`] with the
    /// status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, WorkflowApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(WorkflowApiError::Service {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful response body as JSON, verbatim.
    async fn parse_response(response: reqwest::Response) -> Result<Value, WorkflowApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<Value>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> WorkflowServiceApi {
        WorkflowServiceApi::new(
            "https://svc.example".to_string(),
            "wf-42".to_string(),
            "token".to_string(),
        )
    }

    #[test]
    fn upload_and_prompt_endpoints_are_scoped_to_the_workflow() {
        let api = api();
        assert_eq!(
            api.endpoint("upload", &api.workflow_id),
            "https://svc.example/api/service/upload/wf-42"
        );
        assert_eq!(
            api.endpoint("prompt", &api.workflow_id),
            "https://svc.example/api/service/prompt/wf-42"
        );
    }

    #[test]
    fn status_endpoint_is_scoped_to_the_prompt() {
        let api = api();
        assert_eq!(
            api.endpoint("status", "abc-123"),
            "https://svc.example/api/service/status/abc-123"
        );
    }

    #[test]
    fn view_endpoint_is_scoped_to_the_workflow() {
        let api = api();
        assert_eq!(
            api.endpoint("view", &api.workflow_id),
            "https://svc.example/api/service/view/wf-42"
        );
    }
}
