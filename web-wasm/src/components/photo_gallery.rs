//! ギャラリー（検索・解像度フィルタ・詳細）

use leptos::ev::MouseEvent;
use leptos::prelude::*;
use photoclean_common::{ImageRecord, ResolutionFilter};
use wasm_bindgen::JsValue;

use crate::app::use_studio;

fn resolution_label(record: &ImageRecord) -> &'static str {
    record.resolution.map(|r| r.as_str()).unwrap_or("1K")
}

fn download_name(record: &ImageRecord) -> String {
    format!("{}.png", record.name)
}

fn format_date(created_at: i64, with_time: bool) -> String {
    let date = js_sys::Date::new(&JsValue::from_f64(created_at as f64));
    if with_time {
        date.to_locale_string("en-US", &JsValue::UNDEFINED).into()
    } else {
        date.to_locale_date_string("en-US", &JsValue::UNDEFINED).into()
    }
}

#[component]
pub fn Gallery() -> impl IntoView {
    let studio = use_studio();
    let query = move || studio.with(|s| s.search_query().to_string());
    let filter = move || studio.with(|s| s.gallery_filter());
    let records = Memo::new(move |_| {
        studio.with(|s| s.filtered_history().into_iter().cloned().collect::<Vec<_>>())
    });

    view! {
        <div class="gallery">
            <header class="page-header">
                <h1>"GALLERY"</h1>
                <p class="text-muted">"Your Creative Evolution."</p>
                <input
                    type="text"
                    placeholder="Search projects..."
                    prop:value=query
                    on:input=move |ev| studio.update(|s| s.set_search_query(event_target_value(&ev)))
                />
                <div class="filter-buttons">
                    {ResolutionFilter::CHOICES
                        .into_iter()
                        .map(|choice| view! {
                            <button
                                class:selected=move || filter() == choice
                                on:click=move |_| studio.update(|s| s.set_gallery_filter(choice))
                            >
                                {choice.to_string()}
                            </button>
                        })
                        .collect_view()}
                </div>
            </header>

            <Show
                when=move || !records.get().is_empty()
                fallback=move || view! {
                    <div class="empty">
                        <p>
                            {move || if query().is_empty() {
                                "Your archive is currently empty."
                            } else {
                                "No results found."
                            }}
                        </p>
                        <Show when=move || !query().is_empty()>
                            <button on:click=move |_| studio.update(|s| s.set_search_query(""))>
                                "Clear Search"
                            </button>
                        </Show>
                    </div>
                }
            >
                <div class="photo-gallery">
                    <For
                        each=move || records.get()
                        key=|record| record.id.clone()
                        children=move |record| view! { <RecordCard record=record /> }
                    />
                </div>
            </Show>
        </div>
    }
}

#[component]
fn RecordCard(record: ImageRecord) -> impl IntoView {
    let studio = use_studio();
    let select_id = record.id.clone();
    let reopen_id = record.id.clone();

    view! {
        <div class="photo-card">
            <div class="photo-frame" on:click=move |_| studio.update(|s| s.select_record(&select_id))>
                <img src=record.url.clone() alt=record.name.clone() />
                <span class="badge">{resolution_label(&record)}</span>
                <button on:click=move |ev: MouseEvent| {
                    ev.stop_propagation();
                    studio.update(|s| {
                        s.reopen_record(&reopen_id);
                    });
                }>
                    "Re-Open Studio"
                </button>
            </div>
            <div class="photo-info">
                <div>
                    <h4>{record.name.clone()}</h4>
                    <p class="text-muted">{format_date(record.created_at, false)}</p>
                </div>
                <a
                    class="download"
                    title="Direct Export"
                    href=record.url.clone()
                    download=download_name(&record)
                >
                    "⬇"
                </a>
            </div>
        </div>
    }
}

/// 選択中レコードの詳細（ダッシュボード・ギャラリー共通）
#[component]
pub fn ProjectModal() -> impl IntoView {
    let studio = use_studio();
    let selected = Memo::new(move |_| studio.with(|s| s.selected_record().cloned()));

    move || {
        selected.get().map(|record| {
            let reopen_id = record.id.clone();
            let delete_id = record.id.clone();
            view! {
                <div class="modal-backdrop" on:click=move |_| studio.update(|s| s.close_record())>
                    <div class="modal" on:click=|ev: MouseEvent| ev.stop_propagation()>
                        <img src=record.url.clone() alt=record.name.clone() />
                        <div class="modal-body">
                            <h2>{record.name.clone()}</h2>
                            <p class="text-muted">{format_date(record.created_at, true)}</p>

                            <label>"Refinement Instruction"</label>
                            <p class="prompt">
                                {record.prompt.clone().unwrap_or_else(|| "No prompt recorded.".to_string())}
                            </p>

                            <label>"Export Scale"</label>
                            <span>{resolution_label(&record)}</span>

                            <div class="modal-actions">
                                <a class="btn-primary" href=record.url.clone() download=download_name(&record)>
                                    "Download Full-Res"
                                </a>
                                <button class="btn-secondary" on:click=move |_| studio.update(|s| {
                                    s.reopen_record(&reopen_id);
                                })>
                                    "Load in Studio"
                                </button>
                                <button class="btn-danger" on:click=move |_| studio.update(|s| {
                                    s.delete_record(&delete_id);
                                })>
                                    "Delete Project"
                                </button>
                            </div>
                        </div>
                    </div>
                </div>
            }
        })
    }
}
