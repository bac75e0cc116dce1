//! Relay API calls and the sequential processing pipeline.
//!
//! One attempt is a linear chain against the same-origin relay: upload the
//! image, submit the job graph with the uploaded filename, poll the status
//! once per second until the job reaches a terminal state, then resolve the
//! result filename to a display URL. The first error aborts the chain.

use common::model::response::{
    ErrorResponse, PromptResponse, StatusResponse, UploadResponse, ViewResponse,
};
use common::workflow::{evaluate_status, prompt_inputs, PollStep};
use gloo_console::log;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

const RELAY_URL: &str = "/api/comfyui";
const POLL_INTERVAL_MS: u32 = 1_000;

/// Run one full processing attempt. Returns the display URL of the
/// processed image, or a user-facing error message.
pub async fn process_image(file: File) -> Result<String, String> {
    let upload = upload_image(&file).await?;
    let filename = upload
        .filename
        .filter(|name| !name.is_empty())
        .ok_or_else(|| "Upload failed".to_string())?;
    log!(format!("uploaded image as {filename}"));

    let prompt = submit_prompt(&filename).await?;
    let prompt_id = prompt
        .prompt_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| "Failed to start workflow".to_string())?;
    log!(format!("workflow queued as prompt {prompt_id}"));

    loop {
        let status = fetch_status(&prompt_id).await?;
        match evaluate_status(&status) {
            PollStep::Failed(message) => return Err(message),
            PollStep::Finished(result) => {
                let view = fetch_view(&result).await?;
                return view
                    .target
                    .filter(|target| !target.is_empty())
                    .ok_or_else(|| "Failed to get result image URL".to_string());
            }
            PollStep::NotFinished => TimeoutFuture::new(POLL_INTERVAL_MS).await,
        }
    }
}

async fn upload_image(file: &File) -> Result<UploadResponse, String> {
    let form = relay_form("upload")?;
    form.append_with_blob_and_filename("image", file, &file.name())
        .map_err(js_error)?;
    send(form).await
}

async fn submit_prompt(filename: &str) -> Result<PromptResponse, String> {
    let form = relay_form("prompt")?;
    form.append_with_str("inputs", &prompt_inputs(filename).to_string())
        .map_err(js_error)?;
    send(form).await
}

async fn fetch_status(prompt_id: &str) -> Result<StatusResponse, String> {
    let form = relay_form("status")?;
    form.append_with_str("promptId", prompt_id).map_err(js_error)?;
    send(form).await
}

async fn fetch_view(filename: &str) -> Result<ViewResponse, String> {
    let form = relay_form("view")?;
    form.append_with_str("filename", filename).map_err(js_error)?;
    send(form).await
}

fn relay_form(action: &str) -> Result<FormData, String> {
    let form = FormData::new().map_err(js_error)?;
    form.append_with_str("action", action).map_err(js_error)?;
    Ok(form)
}

/// POST a form to the relay and decode the JSON body. Relay error bodies
/// (400/500) carry their message in the `error` field.
async fn send<T: serde::de::DeserializeOwned>(form: FormData) -> Result<T, String> {
    let response = Request::post(RELAY_URL)
        .body(JsValue::from(form))
        .map_err(|err| err.to_string())?
        .send()
        .await
        .map_err(|err| err.to_string())?;

    if response.status() != 200 {
        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => format!("Relay error ({})", response.status()),
        };
        return Err(message);
    }

    response.json::<T>().await.map_err(|err| err.to_string())
}

fn js_error(value: JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| "browser API call failed".to_string())
}
