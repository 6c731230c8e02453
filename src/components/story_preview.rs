//! Story preview: the styled composition that gets exported.

use leptos::prelude::*;
use schedule::Period;
use schedule::calendar::preview_date_label;

use crate::components::preview_slots::PreviewSlots;
use crate::state::app::AppState;

/// Element id of the preview root; the export pipeline clones this node.
pub const PREVIEW_ELEMENT_ID: &str = "story-preview";

#[component]
pub fn StoryPreview() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <section class="preview-pane">
            <div class="story-frame">
                <div
                    id=PREVIEW_ELEMENT_ID
                    class="story-preview"
                    data-theme=move || state.theme.get().slug()
                >
                    <header class="story-header">
                        <p class="story-title">"RESERVATION"</p>
                        <p id="preview-date" class="story-date">
                            {move || preview_date_label(state.date.get())}
                        </p>
                    </header>
                    {Period::ALL
                        .into_iter()
                        .map(|period| {
                            view! {
                                <div class="story-section">
                                    <h2 class="story-section__title">{period.heading()}</h2>
                                    <PreviewSlots period=period/>
                                </div>
                            }
                        })
                        .collect_view()}
                    <p id="preview-comment" class="story-comment">{move || state.comment.get()}</p>
                    <span class="brand-tag">{move || state.brand.get()}</span>
                </div>
            </div>
        </section>
    }
}
