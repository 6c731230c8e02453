//! Preview slot rows: time label plus status glyph.

use leptos::prelude::*;
use schedule::{Period, SlotRow};

use crate::state::app::AppState;

/// Read-only rows for one period, in the same order and with the same slot
/// ids as the control panel.
#[component]
pub fn PreviewSlots(period: Period) -> impl IntoView {
    let state = expect_context::<AppState>();
    let rows = move || state.board.with(|board| board.rows(period).to_vec());

    view! {
        <ul class="time-list" id=format!("preview-{}-list", period.tag())>
            <For
                each=rows
                key=|row: &SlotRow| row.id
                children=move |row| view! { <PreviewSlotRow row=row/> }
            />
        </ul>
    }
}

#[component]
fn PreviewSlotRow(row: SlotRow) -> impl IntoView {
    let state = expect_context::<AppState>();
    let SlotRow { id, time, status: initial, .. } = row;

    // Subscribes to this row's signal only; edits to other rows never reach it.
    let status = state.slot_status(id).unwrap_or_else(|| ArcRwSignal::new(initial));
    let glyph = status.clone();

    view! {
        <li class="time-item" id=row.preview_dom_id()>
            <span class="time">{time.to_string()}</span>
            <span class=move || format!("status {}", status.get().style_tag())>
                {move || glyph.get().glyph()}
            </span>
        </li>
    }
}
