//! View rendering for the image processor component.
//!
//! One pane cycles through the attempt states: an upload button (idle), the
//! selection preview with a processing note, a failure message, or the
//! processed result image.

use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::{ImageProcessorComponent, Phase};

pub fn view(component: &ImageProcessorComponent, ctx: &Context<ImageProcessorComponent>) -> Html {
    let link = ctx.link();

    html! {
        <div class="processor-root">
            { build_actions(component, link) }
            { build_preview(component) }
            { build_outcome(component, link) }
        </div>
    }
}

fn build_actions(component: &ImageProcessorComponent, link: &Scope<ImageProcessorComponent>) -> Html {
    let on_file_change = link.batch_callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        input
            .files()
            .and_then(|files| files.get(0))
            .map(Msg::FileSelected)
    });

    html! {
        <div class="processor-actions">
            <button
                onclick={link.callback(|_| Msg::OpenFileDialog)}
                disabled={component.is_processing()}
            >
                { "Upload Image" }
            </button>
            <input
                ref={component.file_input_ref.clone()}
                type="file"
                accept="image/*"
                style="display:none"
                onchange={on_file_change}
            />
        </div>
    }
}

fn build_preview(component: &ImageProcessorComponent) -> Html {
    match &component.preview {
        Some(url) if component.is_processing() => html! {
            <div class="processor-preview">
                <img src={url.to_string()} alt="Selected image" />
                <p class="processor-spinner">{ "Processing..." }</p>
            </div>
        },
        _ => html! {},
    }
}

fn build_outcome(component: &ImageProcessorComponent, link: &Scope<ImageProcessorComponent>) -> Html {
    match component.phase {
        Phase::Idle => html! {
            <p class="processor-hint">{ "Select an image to process." }</p>
        },
        Phase::Processing => html! {},
        Phase::Failed => html! {
            <div class="processor-error">
                <p>{ component.error.clone().unwrap_or_else(|| "Failed to process image".to_string()) }</p>
                <button onclick={link.callback(|_| Msg::Reset)}>{ "Try again" }</button>
            </div>
        },
        Phase::Done => match &component.result_url {
            Some(url) => html! {
                <div class="processor-result">
                    <img src={url.clone()} alt="Processed result" />
                    <button onclick={link.callback(|_| Msg::Reset)}>{ "Process another" }</button>
                </div>
            },
            None => html! {},
        },
    }
}
