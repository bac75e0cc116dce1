//! Image processor component: root module wiring the Yew `Component`
//! implementation with submodules for state, update logic, view rendering,
//! and the relay API calls.
//!
//! Responsibilities
//! - Re-export the component type and its message enum.
//! - Provide the `Component` implementation that delegates to
//!   `update::update` and `view::view`.

mod api;
mod messages;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use state::ImageProcessorComponent;

use yew::prelude::*;

impl Component for ImageProcessorComponent {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        ImageProcessorComponent::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
