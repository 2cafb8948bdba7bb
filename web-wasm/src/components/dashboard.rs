//! ダッシュボード（取込み・最近の編集）

use leptos::prelude::*;
use photoclean_common::View;

use super::upload_area::UploadArea;
use crate::app::{now_ms, use_studio};

#[component]
pub fn Dashboard() -> impl IntoView {
    let studio = use_studio();
    let recent = move || studio.with(|s| s.recent().to_vec());

    view! {
        <div class="dashboard">
            <header class="page-header">
                <h1>"STUDIO"</h1>
                <UrlImport />
                <UploadArea />
            </header>

            <section class="recent">
                <div class="section-header">
                    <h2>"Recently Refined"</h2>
                    <button on:click=move |_| studio.update(|s| s.navigate(View::Gallery))>
                        "View All"
                    </button>
                </div>
                <Show
                    when=move || studio.with(|s| !s.history().is_empty())
                    fallback=|| view! { <p class="text-muted">"No history yet."</p> }
                >
                    <div class="recent-grid">
                        <For
                            each=recent
                            key=|record| record.id.clone()
                            children=move |record| {
                                let id = record.id.clone();
                                view! {
                                    <div class="recent-card" on:click=move |_| studio.update(|s| s.select_record(&id))>
                                        <img src=record.url.clone() alt=record.name.clone() />
                                        <span class="badge">
                                            {record.resolution.map(|r| r.as_str()).unwrap_or("1K")}
                                        </span>
                                        <h3>{record.name.clone()}</h3>
                                    </div>
                                }
                            }
                        />
                    </div>
                </Show>
            </section>
        </div>
    }
}

/// URLからの取込みフォーム
#[component]
fn UrlImport() -> impl IntoView {
    let studio = use_studio();
    let (url_input, set_url_input) = signal(String::new());
    let error = move || {
        studio.with(|s| {
            (s.view() == View::Dashboard)
                .then(|| s.error().map(str::to_string))
                .flatten()
        })
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let input = url_input.get_untracked();
        let imported = studio
            .try_update(|s| s.import_remote(&input, now_ms()))
            .is_some_and(|result| result.is_ok());
        if imported {
            set_url_input.set(String::new());
        }
    };

    view! {
        <form class="url-import" on:submit=on_submit>
            <input
                type="text"
                placeholder="Import remote image URL..."
                prop:value=move || url_input.get()
                on:input=move |ev| set_url_input.set(event_target_value(&ev))
            />
            <button type="submit">"Fetch"</button>
            {move || error().map(|message| view! { <p class="error">{message}</p> })}
        </form>
    }
}
