use leptos::prelude::*;

use crate::state::{AppState, View};

/// Top bar with the app name, the view switch and, once documents are
/// uploaded, a way to start over with new ones.
#[component]
pub fn Header() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <header class="header">
            <h1 class="hero-gradient">"LogBotAI"</h1>
            <nav class="header-nav">
                <button
                    class="nav-btn"
                    class:active=move || state.view.get() == View::Upload
                    on:click=move |_| state.show(View::Upload)
                >
                    "Ladda upp"
                </button>
                <button
                    class="nav-btn"
                    class:active=move || state.view.get() == View::Chat
                    on:click=move |_| state.show(View::Chat)
                >
                    "Chatt"
                </button>
                <Show when=move || state.session.get().is_some()>
                    <button
                        class="nav-btn"
                        disabled=move || state.chat.with(|chat| chat.is_busy())
                        on:click=move |_| state.start_over()
                    >
                        "Nya dokument"
                    </button>
                </Show>
            </nav>
        </header>
    }
}
