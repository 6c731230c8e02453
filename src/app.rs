//! Root application component.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};

use crate::config::AppConfig;
use crate::pages::editor::EditorPage;
use crate::state::app::AppState;
use crate::util::storage::LocalStore;

/// Root application component.
///
/// Loads the configuration, builds the single [`AppState`] for the page, and
/// provides it to every component through context.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = AppConfig::load();
    let state = AppState::init(config, &LocalStore);
    provide_context(state);

    view! {
        <Title text="Reservation Story"/>
        <EditorPage/>
    }
}
