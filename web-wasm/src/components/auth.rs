//! サインイン（モック）・オンボーディング・クレジット受取

use gloo::timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use photoclean_common::credits::STARTER_CREDITS;
use photoclean_common::types::{EXPERTISE_LEVELS, USE_CASES};
use photoclean_common::{Preferences, View, MOCK_SIGN_IN_DELAY_MS};

use crate::app::use_studio;

#[component]
pub fn Auth() -> impl IntoView {
    let studio = use_studio();
    let is_busy = move || studio.with(|s| s.is_busy());

    // 実際の認証は行わず、一定時間待つだけ
    let sign_in = move |_| {
        if is_busy() {
            return;
        }
        studio.update(|s| s.begin_sign_in());
        spawn_local(async move {
            TimeoutFuture::new(MOCK_SIGN_IN_DELAY_MS).await;
            studio.update(|s| s.finish_sign_in());
        });
    };

    view! {
        <div class="auth">
            <h2>"Studio Access"</h2>
            <button class="btn-google" disabled=is_busy on:click=sign_in>
                {move || if is_busy() { "Connecting..." } else { "Continue with Google" }}
            </button>
            <button
                class="btn-link"
                disabled=is_busy
                on:click=move |_| studio.update(|s| s.navigate(View::Landing))
            >
                "Return"
            </button>
        </div>
    }
}

#[component]
pub fn Onboarding() -> impl IntoView {
    let studio = use_studio();
    let (use_case, set_use_case) = signal(None::<&'static str>);

    let finish = move |expertise: &'static str| {
        let preferences = use_case.get_untracked().map(|use_case| Preferences {
            use_case: use_case.to_string(),
            expertise: expertise.to_string(),
        });
        studio.update(|s| s.complete_onboarding(preferences));
    };

    view! {
        <div class="onboarding">
            <Show
                when=move || use_case.get().is_some()
                fallback=move || view! {
                    <h1>"Your primary focus?"</h1>
                    {USE_CASES
                        .into_iter()
                        .map(|option| view! {
                            <button class="option" on:click=move |_| set_use_case.set(Some(option))>
                                {option}
                            </button>
                        })
                        .collect_view()}
                }
            >
                <h1>"Your editing experience?"</h1>
                {EXPERTISE_LEVELS
                    .into_iter()
                    .map(|level| view! {
                        <button class="option" on:click=move |_| finish(level)>{level}</button>
                    })
                    .collect_view()}
            </Show>
        </div>
    }
}

#[component]
pub fn ClaimCredits() -> impl IntoView {
    let studio = use_studio();

    view! {
        <div class="claim-credits">
            <div class="credit-badge">
                <div class="credit-amount">{STARTER_CREDITS}</div>
                <div>"Starter Credits"</div>
            </div>
            <button class="btn-primary" on:click=move |_| studio.update(|s| s.claim_credits())>
                "Initialize Studio"
            </button>
        </div>
    }
}
