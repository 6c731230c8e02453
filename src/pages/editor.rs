//! Editor page: control panel beside the live story preview.

use leptos::prelude::*;

use crate::components::control_panel::ControlPanel;
use crate::components::story_preview::StoryPreview;

#[component]
pub fn EditorPage() -> impl IntoView {
    view! {
        <main class="editor">
            <ControlPanel/>
            <StoryPreview/>
        </main>
    }
}
