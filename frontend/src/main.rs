mod api;
mod chat_state;
mod components;
mod decoder;
mod models;
mod session;
mod state;
mod stream;
mod uploads;

use leptos::mount::mount_to_body;
use leptos::prelude::*;

use components::chat::ChatArea;
use components::header::Header;
use components::upload::UploadPanel;
use state::{AppState, View};

/// Root application component.
#[component]
fn App() -> impl IntoView {
    let state = AppState::provide();

    view! {
        <div class="app-container">
            <Header />
            <div class="content">
                {move || match state.view.get() {
                    View::Upload => view! { <UploadPanel /> }.into_any(),
                    View::Chat => view! { <ChatArea /> }.into_any(),
                }}
            </div>
        </div>
    }
}

fn main() {
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
    }
    mount_to_body(App);
}
