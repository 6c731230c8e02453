//! Control-panel slot rows: time label plus status selector.

use leptos::prelude::*;
use schedule::{Period, SlotRow, StatusCode};

use crate::state::app::AppState;

#[cfg(test)]
#[path = "slot_controls_test.rs"]
mod slot_controls_test;

/// One `<option>` of a row's status selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Options of a row selector in vocabulary order, with `status` selected.
pub fn selector_options(status: StatusCode) -> Vec<SelectorOption> {
    StatusCode::ALL
        .into_iter()
        .map(|option| SelectorOption {
            value: option.code(),
            label: option.glyph(),
            selected: option == status,
        })
        .collect()
}

/// Selector rows for one period.
///
/// Re-rendering the period (a date change) replaces every row id, so the
/// keyed list rebuilds all rows with fresh selectors at the default status.
#[component]
pub fn ControlSlots(period: Period) -> impl IntoView {
    let state = expect_context::<AppState>();
    let rows = move || state.board.with(|board| board.rows(period).to_vec());

    view! {
        <div class="slot-group">
            <h3 class="slot-group__title">{period.heading()}</h3>
            <div class="slot-list" id=format!("{}-slots", period.tag())>
                <For
                    each=rows
                    key=|row: &SlotRow| row.id
                    children=move |row| view! { <SlotControlRow row=row/> }
                />
            </div>
        </div>
    }
}

#[component]
fn SlotControlRow(row: SlotRow) -> impl IntoView {
    let state = expect_context::<AppState>();
    let SlotRow { id, period, time, status } = row;

    view! {
        <div class="slot-item">
            <span class="slot-time">{time.to_string()}</span>
            <select
                class="slot-select"
                id=row.control_dom_id()
                on:change=move |ev| state.change_slot_status(period, id, &event_target_value(&ev))
            >
                {selector_options(status)
                    .into_iter()
                    .map(|option| {
                        view! {
                            <option value=option.value selected=option.selected>
                                {option.label}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}
