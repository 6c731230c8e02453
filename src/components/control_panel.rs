//! Editable form: theme, date, store name, comment, slot selectors, export.

use leptos::prelude::*;
use schedule::{Period, Theme};

use crate::components::export_button::ExportButton;
use crate::components::slot_controls::ControlSlots;
use crate::state::app::AppState;
use crate::util::storage::LocalStore;

#[component]
pub fn ControlPanel() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <section class="control-panel">
            <div class="field">
                <label class="field__label" for="theme-select">"テーマ"</label>
                <select
                    id="theme-select"
                    class="field__input"
                    prop:value=move || state.theme.get().slug()
                    on:change=move |ev| state.select_theme(&event_target_value(&ev))
                >
                    {Theme::ALL
                        .into_iter()
                        .map(|theme| view! { <option value=theme.slug()>{theme.label()}</option> })
                        .collect_view()}
                </select>
            </div>

            <div class="field">
                <label class="field__label" for="date-input">"日付"</label>
                <input
                    id="date-input"
                    class="field__input"
                    type="date"
                    prop:value=move || state.date_input.get()
                    on:change=move |ev| state.change_date(&event_target_value(&ev))
                />
                <Show when=move || state.date_error.with(Option::is_some)>
                    <p class="field__error">{move || state.date_error.get().unwrap_or_default()}</p>
                </Show>
            </div>

            <div class="field">
                <label class="field__label" for="store-name-input">"店舗名"</label>
                <input
                    id="store-name-input"
                    class="field__input"
                    type="text"
                    placeholder=move || state.config.with_value(|c| c.placeholder.clone())
                    prop:value=move || state.store_name.get()
                    on:input=move |ev| state.edit_store_name(&LocalStore, event_target_value(&ev))
                />
            </div>

            <div class="field">
                <label class="field__label" for="comment-input">"コメント"</label>
                <textarea
                    id="comment-input"
                    class="field__input field__input--multiline"
                    rows="3"
                    prop:value=move || state.comment.get()
                    on:input=move |ev| state.edit_comment(event_target_value(&ev))
                ></textarea>
            </div>

            <ControlSlots period=Period::Morning/>
            <ControlSlots period=Period::Afternoon/>

            <ExportButton/>
        </section>
    }
}
