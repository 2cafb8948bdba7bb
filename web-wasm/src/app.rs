//! メインアプリケーションコンポーネント
//!
//! スタジオの状態は `RwSignal<Studio<BrowserStore>>` としてコンテキストで共有し、
//! 現在の `View` で画面を切り替える。

use leptos::prelude::*;
use photoclean_common::{Studio, View};

use crate::components::{
    auth::{Auth, ClaimCredits, Onboarding},
    dashboard::Dashboard,
    editor::Editor,
    landing::Landing,
    photo_gallery::{Gallery, ProjectModal},
    sidebar::Sidebar,
    subscription::Subscription,
};
use crate::storage::BrowserStore;

pub type StudioSignal = RwSignal<Studio<BrowserStore>>;

/// コンテキストのスタジオ状態
pub fn use_studio() -> StudioSignal {
    expect_context::<StudioSignal>()
}

/// 現在時刻（ミリ秒）
pub fn now_ms() -> i64 {
    js_sys::Date::now() as i64
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    match Studio::restore(BrowserStore) {
        Ok(studio) => {
            provide_context(RwSignal::new(studio));
            view! { <Router /> }.into_any()
        }
        // 保存データが壊れている場合は復旧しない
        Err(e) => {
            gloo::console::error!(format!("failed to restore session: {e}"));
            view! { <StartupFailure message=e.to_string() /> }.into_any()
        }
    }
}

#[component]
fn Router() -> impl IntoView {
    let studio = use_studio();
    let current = Memo::new(move |_| studio.with(|s| s.view()));
    let in_workspace = Memo::new(move |_| current.get().is_workspace());

    move || {
        if in_workspace.get() {
            return view! { <Workspace current=current /> }.into_any();
        }
        match current.get() {
            View::Auth => view! { <Auth /> }.into_any(),
            View::Onboarding => view! { <Onboarding /> }.into_any(),
            View::ClaimCredits => view! { <ClaimCredits /> }.into_any(),
            _ => view! { <Landing /> }.into_any(),
        }
    }
}

/// サイドバー付きのシェル
#[component]
fn Workspace(current: Memo<View>) -> impl IntoView {
    view! {
        <div class="workspace">
            <Sidebar current=current />
            <main class="workspace-main">
                {move || match current.get() {
                    View::Editor => view! { <Editor /> }.into_any(),
                    View::Gallery => view! { <Gallery /> }.into_any(),
                    View::Subscription => view! { <Subscription /> }.into_any(),
                    _ => view! { <Dashboard /> }.into_any(),
                }}
                <ProjectModal />
            </main>
        </div>
    }
}

#[component]
fn StartupFailure(message: String) -> impl IntoView {
    view! {
        <div class="startup-failure">
            <h1>"Studio unavailable"</h1>
            <p>"Saved studio data could not be read."</p>
            <pre>{message}</pre>
        </div>
    }
}
