use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::export::pipeline::export_file_name;
use crate::util::storage::StorageError;

#[derive(Default)]
struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

fn with_state(store: &MemoryStore, f: impl FnOnce(AppState)) {
    let owner = Owner::new();
    owner.with(|| f(AppState::init(AppConfig::default(), store)));
}

fn first_id(state: AppState, period: Period) -> SlotId {
    state.board.with_untracked(|board| board.rows(period)[0].id)
}

fn status_of(state: AppState, period: Period, id: SlotId) -> Option<StatusCode> {
    state.board.with_untracked(|board| board.row(period, id).map(|row| row.status))
}

#[test]
fn init_restores_saved_store_name() {
    let store = MemoryStore::default();
    store.set("storeName", "Salon Foo").unwrap();

    with_state(&store, |state| {
        assert_eq!(state.store_name.get_untracked(), "Salon Foo");
        assert_eq!(state.brand.get_untracked(), "Salon Foo");
        assert!(state.trigger.get_untracked().enabled);
        assert_eq!(state.board.with_untracked(|b| b.rows(Period::Morning).len()), 6);
    });
}

#[test]
fn valid_date_rerenders_both_periods_at_default() {
    let store = MemoryStore::default();
    with_state(&store, |state| {
        state.change_date("2024-06-03");
        let id = first_id(state, Period::Morning);
        state.change_slot_status(Period::Morning, id, "x");

        state.change_date("2024-06-01");

        assert_eq!(state.date.get_untracked(), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(state.date_error.get_untracked(), None);
        assert_eq!(status_of(state, Period::Morning, id), None);
        state.board.with_untracked(|board| {
            assert_eq!(board.rows(Period::Afternoon).len(), 6);
            assert!(board.rows(Period::Morning).iter().all(|row| row.status == StatusCode::Open));
        });
    });
}

#[test]
fn invalid_date_keeps_schedule_and_reports() {
    let store = MemoryStore::default();
    with_state(&store, |state| {
        state.change_date("2024-06-03");
        let before = state.board.get_untracked();

        state.change_date("2024-13-40");

        assert_eq!(state.date_input.get_untracked(), "2024-13-40");
        assert_eq!(state.date.get_untracked(), NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        assert!(state.date_error.get_untracked().is_some());
        assert_eq!(state.board.get_untracked(), before);

        state.change_date("2024-06-04");
        assert_eq!(state.date_error.get_untracked(), None);
    });
}

#[test]
fn slot_change_touches_only_that_row() {
    let store = MemoryStore::default();
    with_state(&store, |state| {
        let id = first_id(state, Period::Afternoon);
        let other = state.board.with_untracked(|board| board.rows(Period::Afternoon)[1].id);

        state.change_slot_status(Period::Afternoon, id, "triangle");

        assert_eq!(status_of(state, Period::Afternoon, id), Some(StatusCode::Maybe));
        assert_eq!(status_of(state, Period::Afternoon, other), Some(StatusCode::Open));
    });
}

#[test]
fn unknown_code_and_wrong_period_are_ignored() {
    let store = MemoryStore::default();
    with_state(&store, |state| {
        let id = first_id(state, Period::Morning);
        let before = state.board.get_untracked();

        state.change_slot_status(Period::Morning, id, "maybe");
        state.change_slot_status(Period::Afternoon, id, "x");

        assert_eq!(state.board.get_untracked(), before);
    });
}

#[test]
fn store_name_edit_persists_and_falls_back_to_placeholder() {
    let store = MemoryStore::default();
    with_state(&store, |state| {
        state.edit_store_name(&store, "Bar".to_owned());
        assert_eq!(state.brand.get_untracked(), "Bar");
        assert_eq!(store.get("storeName").as_deref(), Some("Bar"));

        state.edit_store_name(&store, String::new());
        assert_eq!(state.brand.get_untracked(), "@YourStoreName");
        assert_eq!(store.get("storeName").as_deref(), Some(""));
    });
}

#[test]
fn unknown_theme_keeps_current() {
    let store = MemoryStore::default();
    with_state(&store, |state| {
        state.select_theme("night");
        state.select_theme("neon");
        assert_eq!(state.theme.get_untracked(), Theme::Night);
    });
}

#[test]
fn preview_document_reflects_edits() {
    let store = MemoryStore::default();
    with_state(&store, |state| {
        state.change_date("2024-06-02");
        state.edit_comment("本日は混雑".to_owned());
        let id = first_id(state, Period::Morning);
        state.change_slot_status(Period::Morning, id, "x");

        let doc = state.preview_document();

        assert_eq!(doc.date_label, "6.2 Sun");
        assert_eq!(doc.comment, "本日は混雑");
        assert_eq!(doc.brand, "@YourStoreName");
        assert_eq!(doc.sections[0].rows[0].glyph, "×");
    });
}

#[test]
fn slot_edit_reevaluates_only_the_edited_row() {
    let store = MemoryStore::default();
    with_state(&store, |state| {
        state.change_date("2024-06-05");
        let ids: Vec<SlotId> = state.board.with_untracked(|board| {
            Period::ALL.into_iter().flat_map(|p| board.rows(p)).map(|row| row.id).collect()
        });

        let row_runs = Arc::new(AtomicUsize::new(0));
        let rows: Vec<Memo<StatusCode>> = ids
            .iter()
            .map(|&id| {
                let signal = state.slot_status(id).unwrap();
                let runs = Arc::clone(&row_runs);
                Memo::new(move |_| {
                    runs.fetch_add(1, Ordering::Relaxed);
                    signal.get()
                })
            })
            .collect();
        let list_runs = Arc::new(AtomicUsize::new(0));
        let list = {
            let runs = Arc::clone(&list_runs);
            Memo::new(move |_| {
                runs.fetch_add(1, Ordering::Relaxed);
                state.board.with(|board| board.rows(Period::Morning).len())
            })
        };
        for memo in &rows {
            assert_eq!(memo.get(), StatusCode::Open);
        }
        assert_eq!(list.get(), 6);
        assert_eq!(row_runs.load(Ordering::Relaxed), 16);

        state.change_slot_status(Period::Morning, ids[2], "x");
        let statuses: Vec<StatusCode> = rows.iter().map(|memo| memo.get()).collect();
        assert_eq!(list.get(), 6);

        assert_eq!(row_runs.load(Ordering::Relaxed), 17);
        assert_eq!(list_runs.load(Ordering::Relaxed), 1);
        assert_eq!(statuses[2], StatusCode::Closed);
        assert_eq!(statuses.iter().filter(|s| **s == StatusCode::Open).count(), 15);
        assert_eq!(status_of(state, Period::Morning, ids[2]), Some(StatusCode::Closed));
    });
}

#[test]
fn date_change_replaces_status_signals() {
    let store = MemoryStore::default();
    with_state(&store, |state| {
        state.change_date("2024-06-05");
        let stale = first_id(state, Period::Morning);

        state.change_date("2024-06-02");

        assert!(state.slot_status(stale).is_none());
        let fresh = first_id(state, Period::Morning);
        assert_eq!(state.slot_status(fresh).map(|s| s.get_untracked()), Some(StatusCode::Open));
        assert_eq!(state.statuses.with_value(SlotStatuses::len), 12);
    });
}

#[test]
fn export_name_uses_last_accepted_date() {
    let store = MemoryStore::default();
    with_state(&store, |state| {
        state.change_date("2024-06-03");
        state.change_date("");

        assert!(state.date_error.get_untracked().is_some());
        assert_eq!(export_file_name("reservation_", &state.export_date()), "reservation_2024-06-03.png");

        state.change_date("2024-06-04");
        assert_eq!(export_file_name("reservation_", &state.export_date()), "reservation_2024-06-04.png");
    });
}
