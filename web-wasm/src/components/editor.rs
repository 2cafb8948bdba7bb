//! エディタ（除去指示・解像度・実行・結果）

use leptos::prelude::*;
use leptos::task::spawn_local;
use photoclean_common::gemini::{model_for, FAST_MODEL};
use photoclean_common::{synthesize_with_gate, EditOutcome, KeyGate, Resolution};

use super::busy_overlay::BusyOverlay;
use crate::api::gemini::GeminiEditor;
use crate::api::proxy::ProxyFetcher;
use crate::app::{now_ms, use_studio, StudioSignal};
use crate::host::HostKeyGate;

/// 編集を実行する
///
/// 待ち時間中はシグナルを借用しないよう、ガード確認と反映だけを同期で更新する。
fn run_edit(studio: StudioSignal) {
    let Some(Ok(ticket)) = studio.try_update(|s| s.request_edit()) else {
        return;
    };

    spawn_local(async move {
        let gate = HostKeyGate;
        let outcome = synthesize_with_gate(
            &ticket,
            &gate,
            &ProxyFetcher::default(),
            &GeminiEditor::default(),
        )
        .await;
        if let EditOutcome::Synthesized(Err(e)) = &outcome {
            gloo::console::error!(format!("synthesis failed: {e:?}"));
        }
        let completion = studio.try_update(|s| s.complete_edit(ticket, outcome, now_ms()));
        if completion.is_some_and(|c| c.reopen_key_picker) {
            gate.open_select_key().await;
        }
    });
}

#[component]
pub fn Editor() -> impl IntoView {
    let studio = use_studio();
    let is_busy = move || studio.with(|s| s.is_busy());
    let resolution = move || studio.with(|s| s.resolution());
    let shown = move || {
        studio.with(|s| {
            s.edited_image()
                .or(s.current_image())
                .map(|record| record.url.clone())
        })
    };
    // 編集結果があるときだけ元画像を並べる
    let before = move || {
        studio.with(|s| {
            s.edited_image()
                .and(s.current_image())
                .map(|record| record.url.clone())
        })
    };
    let engine = move || if model_for(resolution()) == FAST_MODEL { "FLASH" } else { "PRO" };
    let can_execute = move || studio.with(|s| s.can_execute_edit() && s.can_afford_selected());

    view! {
        <div class="editor">
            <div class="canvas">
                <div class="canvas-toolbar">
                    <button on:click=move |_| studio.update(|s| s.back_to_dashboard())>"← EXIT"</button>
                    <div>"ENGINE: " <span>{engine}</span></div>
                </div>
                <div class="canvas-stage">
                    {move || shown().map(|url| view! {
                        <img src=url class:processing=is_busy alt="Studio canvas" />
                    })}
                    {move || before().map(|url| view! {
                        <figure class="before">
                            <img src=url alt="Before" />
                            <figcaption>"BEFORE"</figcaption>
                        </figure>
                    })}
                    <Show when=is_busy>
                        <BusyOverlay message="Synthesizing Texture..." />
                    </Show>
                </div>
            </div>

            <div class="refinement">
                <h2>"REFINEMENT"</h2>
                <p class="text-muted">"Describe what you want gone."</p>

                <label>"Instruction"</label>
                <textarea
                    rows="6"
                    placeholder="e.g. 'the tree on the right'..."
                    prop:value=move || studio.with(|s| s.prompt().to_string())
                    on:input=move |ev| studio.update(|s| s.set_prompt(event_target_value(&ev)))
                />

                <label>"Resolution"</label>
                <div class="resolution-picker">
                    {Resolution::ALL
                        .into_iter()
                        .map(|res| view! {
                            <button
                                class:selected=move || resolution() == res
                                on:click=move |_| studio.update(|s| s.set_resolution(res))
                            >
                                {format!("{} ({}c)", res, res.cost())}
                            </button>
                        })
                        .collect_view()}
                </div>

                <button
                    class="btn-primary"
                    disabled=move || !can_execute()
                    on:click=move |_| run_edit(studio)
                >
                    {move || if is_busy() { "PROCESSING..." } else { "EXECUTE CLEANSE" }}
                </button>

                {move || studio.with(|s| s.error().map(str::to_string)).map(|message| view! {
                    <p class="error" on:click=move |_| studio.update(|s| s.dismiss_error())>{message}</p>
                })}

                {move || studio.with(|s| s.edited_image().map(|r| r.url.clone())).map(|url| view! {
                    <div class="result-actions">
                        <a class="btn-secondary" href=url download="photoclean.png">"Save"</a>
                        <button class="btn-secondary" on:click=move |_| studio.update(|s| s.refine_again())>
                            "Refine Again"
                        </button>
                    </div>
                })}
            </div>
        </div>
    }
}
