//! サイドバー（遷移・残高・ユーザー）

use leptos::prelude::*;
use photoclean_common::View;

use crate::app::use_studio;

#[component]
pub fn Sidebar(current: Memo<View>) -> impl IntoView {
    let studio = use_studio();
    let credits = Memo::new(move |_| studio.with(|s| s.credits()));
    let user_name = move || {
        studio.with(|s| {
            s.user()
                .map(|u| u.name.clone())
                .unwrap_or_else(|| "STUDIO USER".to_string())
        })
    };
    let avatar = move || {
        let seed = studio.with(|s| s.user().map(|u| u.email.clone()));
        format!(
            "https://api.dicebear.com/7.x/pixel-art/svg?seed={}",
            seed.as_deref().unwrap_or("studio")
        )
    };

    view! {
        <aside class="sidebar">
            <div class="brand" on:click=move |_| studio.update(|s| s.navigate(View::Dashboard))>
                <span>"PHOTOCLEAN"</span>
            </div>

            <nav class="sidebar-nav">
                {View::NAVIGATION
                    .into_iter()
                    .map(|(target, label)| {
                        view! {
                            <button
                                class="sidebar-item"
                                class:active=move || current.get() == target
                                on:click=move |_| studio.update(|s| s.navigate(target))
                            >
                                {label}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>

            <div class="credit-panel">
                <div class="credit-label">
                    <span>"Refinement Power"</span>
                    <span>{move || format!("{}/{}", credits.get().remaining(), credits.get().total())}</span>
                </div>
                <div class="progress-bar">
                    <div
                        class="progress-fill"
                        style=move || {
                            let c = credits.get();
                            let ratio = if c.total() == 0 { 0.0 } else { c.remaining() as f32 / c.total() as f32 };
                            format!("width: {}%", ratio * 100.0)
                        }
                    />
                </div>
                <button on:click=move |_| studio.update(|s| s.navigate(View::Subscription))>
                    "Recharge Studio"
                </button>
            </div>

            <div class="user-panel">
                <img src=avatar alt="PFP" />
                <div>
                    <p>{user_name}</p>
                    <button on:click=move |_| studio.update(|s| s.logout())>"Sign Out"</button>
                </div>
            </div>
        </aside>
    }
}
