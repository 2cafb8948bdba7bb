//! 合成中の表示

use leptos::prelude::*;

#[component]
pub fn BusyOverlay(message: &'static str) -> impl IntoView {
    view! {
        <div class="busy-overlay">
            <div class="spinner" />
            <p class="busy-text">{message}</p>
        </div>
    }
}
