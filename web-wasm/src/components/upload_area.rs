//! アップロードエリアコンポーネント

use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::{DragEvent, File, FileList, HtmlInputElement};

use crate::app::{now_ms, use_studio, StudioSignal};

#[component]
pub fn UploadArea() -> impl IntoView {
    let studio = use_studio();
    let (is_dragover, set_is_dragover) = signal(false);
    let input_ref = NodeRef::<Input>::new();

    // 最初の1枚だけ取り込む
    let handle_files = move |files: FileList| {
        if let Some(file) = files.get(0) {
            read_file(studio, file);
        }
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(false);

        if let Some(files) = ev.data_transfer().and_then(|dt| dt.files()) {
            handle_files(files);
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_change = move |ev: web_sys::Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(files) = input.files() {
            handle_files(files);
        }
        // 同じファイルを続けて選んでも change が発火するように
        input.set_value("");
    };

    view! {
        <div
            class="upload-area"
            class:dragover=move || is_dragover.get()
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=move |_: DragEvent| set_is_dragover.set(false)
            on:click=move |_| {
                if let Some(input) = input_ref.get() {
                    input.click();
                }
            }
        >
            <div class="upload-icon">"📷"</div>
            <p>"Upload Local"</p>
            <p class="text-muted">"Drop an image here or click to browse"</p>
        </div>
        <input
            type="file"
            accept="image/*"
            class="hidden"
            node_ref=input_ref
            on:change=on_change
        />
    }
}

fn read_file(studio: StudioSignal, file: File) {
    let file = gloo::file::File::from(file);
    spawn_local(async move {
        match gloo::file::futures::read_as_data_url(&file).await {
            Ok(data_url) => studio.update(|s| s.import_local(&file.name(), data_url, now_ms())),
            Err(e) => gloo::console::error!(format!("failed to read {}: {e}", file.name())),
        }
    });
}
