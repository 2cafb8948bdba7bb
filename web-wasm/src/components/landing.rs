//! ランディング画面

use leptos::prelude::*;

use crate::app::use_studio;

#[component]
pub fn Landing() -> impl IntoView {
    let studio = use_studio();
    let open_auth = move |_| studio.update(|s| s.open_auth());

    view! {
        <div class="landing">
            <nav class="landing-nav">
                <span class="brand">"PHOTOCLEAN."</span>
                <div>
                    <button on:click=open_auth>"Sign In"</button>
                    <button class="btn-primary" on:click=open_auth>"Start Creating"</button>
                </div>
            </nav>
            <section class="hero">
                <h1>"ERASE THE" <br /> "IMPERFECT."</h1>
                <p>"Professional-grade AI object removal. Transform your captures instantly."</p>
                <button class="btn-primary" on:click=open_auth>"Open Studio"</button>
            </section>
        </div>
    }
}
