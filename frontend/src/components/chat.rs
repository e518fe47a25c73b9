use leptos::ev;
use leptos::prelude::*;

use crate::models::Sender;
use crate::state::{AppState, View};

/// Chat view: message history, loading indicator and input. Blocked until
/// documents have been uploaded.
#[component]
pub fn ChatArea() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <main class="chat-area">
            {move || {
                if state.session.get().is_none() {
                    view! { <NoDocuments /> }.into_any()
                } else {
                    view! {
                        <div class="messages-container">
                            <For
                                each=move || state.chat.with(|chat| chat.messages().to_vec())
                                key=|m| (m.id, m.text.clone())
                                let:msg
                            >
                                <MessageBubble sender=msg.sender text=msg.text />
                            </For>
                            // Shown until the first chunk arrives
                            <Show when=move || state.chat.with(|chat| chat.is_loading())>
                                <div class="message ai">
                                    <div class="typing-dots">
                                        <span class="dot" />
                                        <span class="dot" />
                                        <span class="dot" />
                                    </div>
                                </div>
                            </Show>
                        </div>
                        <ChatInput />
                    }.into_any()
                }
            }}
        </main>
    }
}

/// Blocking notice shown when no session identifier exists.
#[component]
fn NoDocuments() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <div class="empty-state">
            <p>"Inga dokument uppladdade. Ladda upp dina mötesanteckningar först."</p>
            <button class="send-btn" on:click=move |_| state.show(View::Upload)>
                "Ladda upp dokument"
            </button>
        </div>
    }
}

/// A single chat message bubble.
#[component]
fn MessageBubble(sender: Sender, text: String) -> impl IntoView {
    let css_class = format!("message {}", sender.as_str());

    view! {
        <div class=css_class>
            <div>{text}</div>
        </div>
    }
}

/// Chat input form with text field and send button.
#[component]
fn ChatInput() -> impl IntoView {
    let state = expect_context::<AppState>();
    let (input, set_input) = signal(String::new());

    let is_busy = move || state.chat.with(|chat| chat.is_busy());

    let send = move || {
        let text = input.get_untracked();
        if text.trim().is_empty() || is_busy() {
            return;
        }
        set_input.set(String::new());
        state.send_message(text);
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        send();
    };

    view! {
        <div class="input-area">
            <form class="input-row" on:submit=on_submit>
                <input
                    type="text"
                    placeholder="Ställ en fråga om dina mötesanteckningar..."
                    prop:value=input
                    on:input=move |ev| {
                        set_input.set(event_target_value(&ev));
                    }
                    disabled=is_busy
                />
                <button
                    type="submit"
                    class="send-btn"
                    disabled=move || is_busy() || input.get().trim().is_empty()
                >
                    "Skicka"
                </button>
            </form>
        </div>
    }
}
