//! プラン表示（固定）

use leptos::prelude::*;

const BILLING_URL: &str = "https://ai.google.dev/gemini-api/docs/billing";

struct Plan {
    name: &'static str,
    price: &'static str,
    features: &'static [&'static str],
    active: bool,
}

static PLANS: [Plan; 3] = [
    Plan {
        name: "Free",
        price: "$0",
        features: &["1K Refinement", "10 Initial Credits", "Standard Queue"],
        active: true,
    },
    Plan {
        name: "Pro Studio",
        price: "$19",
        features: &["2K/4K Support", "100 Monthly Credits", "Priority Processing", "Batch Cleanup"],
        active: false,
    },
    Plan {
        name: "Enterprise",
        price: "$99",
        features: &["Unlimited Credits", "API Access", "Custom Model Tuning", "Dedicated Support"],
        active: false,
    },
];

#[component]
pub fn Subscription() -> impl IntoView {
    view! {
        <div class="subscription">
            <header class="page-header">
                <h1>"SUBSCRIPTION"</h1>
                <p class="text-muted">"Choose your refinement capacity."</p>
            </header>
            <div class="plans">
                {PLANS
                    .iter()
                    .map(|plan| view! {
                        <div class="plan" class:featured=plan.name == "Pro Studio">
                            <h3>{plan.name}</h3>
                            <div class="price">{plan.price}<span>"/mo"</span></div>
                            <ul>
                                {plan.features.iter().map(|f| view! { <li>{*f}</li> }).collect_view()}
                            </ul>
                            <a href=BILLING_URL target="_blank" rel="noopener">
                                {if plan.active { "Current Plan" } else { "Select Plan" }}
                            </a>
                        </div>
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
