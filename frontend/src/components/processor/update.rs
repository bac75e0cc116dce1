//! Update function for the image processor component.
//!
//! Follows an Elm-style shape: it receives the current component state, the
//! `Context`, and a `Msg`, mutates the state accordingly, and returns a
//! `bool` indicating whether the view should re-render.
//!
//! `FileSelected` is the entry point of an attempt: it resets the terminal
//! fields, keeps a preview object URL of the selection, and spawns the
//! sequential pipeline from `api::process_image`. The pipeline reports back
//! through `Completed` / `Failed` messages. Selecting another file while a
//! run is in flight starts a second pipeline without aborting the first;
//! whichever terminal message arrives last wins.

use gloo_console::error;
use gloo_file::ObjectUrl;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::api;
use super::messages::Msg;
use super::state::{ImageProcessorComponent, Phase};

pub fn update(
    component: &mut ImageProcessorComponent,
    ctx: &Context<ImageProcessorComponent>,
    msg: Msg,
) -> bool {
    match msg {
        Msg::OpenFileDialog => {
            if let Some(input) = component.file_input_ref.cast::<HtmlInputElement>() {
                input.click();
            }
            false
        }
        Msg::FileSelected(file) => {
            component.phase = Phase::Processing;
            component.error = None;
            component.result_url = None;
            component.preview = Some(ObjectUrl::from(gloo_file::File::from(file.clone())));

            let link = ctx.link().clone();
            spawn_local(async move {
                match api::process_image(file).await {
                    Ok(url) => link.send_message(Msg::Completed(url)),
                    Err(message) => link.send_message(Msg::Failed(message)),
                }
            });
            true
        }
        Msg::Completed(url) => {
            component.phase = Phase::Done;
            component.result_url = Some(url);
            component.preview = None;
            true
        }
        Msg::Failed(message) => {
            error!(format!("image processing failed: {message}"));
            component.phase = Phase::Failed;
            component.error = Some(message);
            component.preview = None;
            true
        }
        Msg::Reset => {
            component.phase = Phase::Idle;
            component.error = None;
            component.result_url = None;
            component.preview = None;
            true
        }
    }
}
