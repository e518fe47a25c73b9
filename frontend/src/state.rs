use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::File;

use crate::api;
use crate::chat_state::{ChatAction, ChatState, PACING_DELAY_MS};
use crate::models::ChatRequest;
use crate::session;
use crate::stream::pump_answer;
use crate::uploads::{UploadState, UPLOAD_FAILED_TEXT};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Upload,
    Chat,
}

/// Shared application state, provided via Leptos context.
#[derive(Clone, Copy)]
pub struct AppState {
    // --- Read signals (for components to subscribe to) ---
    pub view: ReadSignal<View>,
    pub session: ReadSignal<Option<String>>,
    pub chat: ReadSignal<ChatState>,

    // --- Write signals (for mutating state) ---
    pub set_view: WriteSignal<View>,
    pub set_session: WriteSignal<Option<String>>,
    pub set_chat: WriteSignal<ChatState>,

    /// Holds browser file handles, which are not `Send`.
    pub uploads: RwSignal<UploadState<File>, LocalStorage>,
}

impl AppState {
    /// Create a new `AppState` and provide it in the current Leptos context.
    pub fn provide() -> Self {
        let stored_session = session::load();
        let initial_view = if stored_session.is_some() { View::Chat } else { View::Upload };

        let (view, set_view) = signal(initial_view);
        let (session, set_session) = signal(stored_session);
        let (chat, set_chat) = signal(ChatState::new());
        let uploads = RwSignal::new_local(UploadState::new());

        let state = Self {
            view,
            session,
            chat,
            set_view,
            set_session,
            set_chat,
            uploads,
        };

        provide_context(state);
        state
    }

    pub fn show(&self, view: View) {
        self.set_view.set(view);
    }

    /// Submit the chat input; ignored unless the reducer accepts it.
    pub fn send_message(&self, input: String) {
        let session_id = self.session.get_untracked();
        let mut accepted = None;
        self.set_chat
            .update(|chat| accepted = chat.reduce(ChatAction::Submit { input, session_id }));
        let Some(cycle) = accepted else {
            return;
        };

        log::debug!("Chat cycle started, reply id {}", cycle.assistant_id);
        let set_chat = self.set_chat;
        spawn_local(async move {
            if let Err(e) = stream_answer(cycle.request, set_chat).await {
                log::error!("Chat request failed: {e}");
                set_chat.update(|chat| {
                    chat.reduce(ChatAction::Error);
                });
            }
        });
    }

    pub fn add_dropped_files(&self, files: Vec<File>) {
        self.uploads.update(|u| {
            let added = u.add_dropped(files);
            log::debug!("{added} dropped file(s) accepted");
        });
    }

    pub fn add_selected_files(&self, files: Vec<File>) {
        self.uploads.update(|u| {
            u.add_selected(files);
        });
    }

    pub fn remove_file(&self, id: u64) {
        self.uploads.update(|u| {
            u.remove(id);
        });
    }

    pub fn dismiss_upload_error(&self) {
        self.uploads.update(|u| u.dismiss_error());
    }

    /// Forget the current documents: drop the stored session, reset the
    /// chat and go back to the upload view.
    pub fn start_over(&self) {
        if self.chat.with_untracked(|chat| chat.is_busy()) {
            return;
        }
        session::clear();
        self.set_session.set(None);
        self.set_chat.set(ChatState::new());
        self.set_view.set(View::Upload);
    }

    /// Upload the pending files; on success store the session and open the chat.
    pub fn upload(&self) {
        let mut batch = None;
        self.uploads.update(|u| batch = u.begin_upload());
        let Some(files) = batch else {
            return;
        };

        let state = *self;
        spawn_local(async move {
            match api::upload_files(&files).await {
                Ok(resp) => {
                    log::info!("Uploaded {} file(s)", files.len());
                    session::store(&resp.session_id);
                    state.uploads.update(|u| u.upload_succeeded());
                    state.set_session.set(Some(resp.session_id));
                    state.set_chat.set(ChatState::new());
                    state.set_view.set(View::Chat);
                }
                Err(e) => {
                    log::error!("Upload failed: {e}");
                    state.uploads.update(|u| u.upload_failed(UPLOAD_FAILED_TEXT));
                }
            }
        });
    }
}

/// Reads the answer stream, pushing the cumulative text into the reducer
/// after every chunk.
async fn stream_answer(request: ChatRequest, set_chat: WriteSignal<ChatState>) -> Result<(), String> {
    let stream = api::open_chat_stream(&request).await?;
    pump_answer(
        stream,
        |action| {
            set_chat.update(|chat| {
                chat.reduce(action);
            })
        },
        || TimeoutFuture::new(PACING_DELAY_MS),
    )
    .await
}
