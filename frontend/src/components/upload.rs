use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use web_sys::{File, FileList, HtmlInputElement};

use crate::state::AppState;
use crate::uploads::{ACCEPTED_SUFFIX, UploadStatus};

fn collect_files(list: Option<FileList>) -> Vec<File> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

/// Upload view: drop zone, file picker, pending list and upload button.
#[component]
pub fn UploadPanel() -> impl IntoView {
    let state = expect_context::<AppState>();
    let (dragging, set_dragging) = signal(false);
    let picker = NodeRef::<html::Input>::new();

    let is_uploading = move || state.uploads.with(|u| u.is_uploading());
    let pending = move || {
        state
            .uploads
            .with(|u| u.files().iter().map(|f| (f.id, f.file.name())).collect::<Vec<_>>())
    };

    let on_drop = move |ev: ev::DragEvent| {
        ev.prevent_default();
        set_dragging.set(false);
        let files = collect_files(ev.data_transfer().and_then(|dt| dt.files()));
        state.add_dropped_files(files);
    };

    let on_select = move |ev: ev::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        state.add_selected_files(collect_files(input.files()));
        // Reset so picking the same file again fires `change`.
        input.set_value("");
    };

    let open_picker = move |_| {
        if let Some(input) = picker.get() {
            input.click();
        }
    };

    view! {
        <section class="upload-panel">
            <div class="hero">
                <div class="hero-badge">"Mötesanteckningar på dina villkor"</div>
                <h2>"Personlig analys med en " <span class="hero-gradient">"AI assistent"</span></h2>
            </div>

            <div
                class="drop-zone"
                class:dragging=move || dragging.get()
                class:disabled=is_uploading
                on:dragover=move |ev: ev::DragEvent| {
                    ev.prevent_default();
                    set_dragging.set(true);
                }
                on:dragleave=move |ev: ev::DragEvent| {
                    ev.prevent_default();
                    set_dragging.set(false);
                }
                on:drop=on_drop
            >
                <input
                    node_ref=picker
                    type="file"
                    accept=ACCEPTED_SUFFIX
                    multiple=true
                    class="hidden"
                    on:change=on_select
                />
                <p>{format!("Dra och släpp dina {ACCEPTED_SUFFIX} filer här eller")}</p>
                <button class="outline-btn" disabled=is_uploading on:click=open_picker>
                    "Välj filer"
                </button>
            </div>

            <Show when=move || !pending().is_empty()>
                <ul class="file-list">
                    <For each=pending key=|(id, _)| *id let:entry>
                        {
                            let (id, name) = entry;
                            view! {
                                <li class="file-item">
                                    <span class="file-name">{name}</span>
                                    <button
                                        class="remove-btn"
                                        disabled=is_uploading
                                        on:click=move |_| state.remove_file(id)
                                    >
                                        "×"
                                    </button>
                                </li>
                            }
                        }
                    </For>
                </ul>
                <button
                    class="send-btn upload-btn"
                    disabled=move || is_uploading() || pending().is_empty()
                    on:click=move |_| state.upload()
                >
                    "Ladda upp"
                </button>
            </Show>

            <Show when=is_uploading>
                <div class="overlay">
                    <div class="overlay-card">"Laddar upp och bearbetar dokument..."</div>
                </div>
            </Show>

            {move || {
                state.uploads.with(|u| match u.status() {
                    UploadStatus::Failed(message) => Some(message.clone()),
                    _ => None,
                })
                .map(|message| {
                    view! {
                        <div class="overlay">
                            <div class="overlay-card error">
                                <p>{message}</p>
                                <button class="outline-btn" on:click=move |_| state.dismiss_upload_error()>
                                    "Stäng"
                                </button>
                            </div>
                        </div>
                    }
                })
            }}
        </section>
    }
}
