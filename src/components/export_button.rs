//! Export trigger.

use leptos::prelude::*;

use crate::state::app::AppState;

/// Button that starts an export. Disabled, with the busy label, while one
/// is in flight.
#[component]
pub fn ExportButton() -> impl IntoView {
    let state = expect_context::<AppState>();

    let on_click = move |_| {
        #[cfg(feature = "csr")]
        {
            crate::export::web::spawn_export(state);
        }
    };

    view! {
        <button
            id="generate-btn"
            class="btn btn--primary"
            disabled=move || !state.trigger.with(|t| t.enabled)
            on:click=on_click
        >
            {move || state.trigger.with(|t| t.label.clone())}
        </button>
    }
}
