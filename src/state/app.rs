//! Application state owned by the editor page.
//!
//! DESIGN
//! ======
//! `AppState` is built once in [`crate::app::App`] and provided through
//! context. It is `Copy` (every field is an arena handle), so event handlers
//! capture it by value. Mutations go through the methods here; components
//! only read signals.

use chrono::NaiveDate;
use leptos::prelude::*;
use schedule::calendar::{format_date_input, parse_date_input};
use schedule::preview::PreviewDocument;
use schedule::{Period, SlotBoard, SlotId, StatusCode, Theme};

use crate::config::AppConfig;
use crate::export::pipeline::TriggerState;
use crate::state::profile::StoreProfile;
use crate::state::statuses::SlotStatuses;
use crate::state::sync::{SyncOutcome, update_slot_preview};
use crate::util::storage::KeyValueStore;

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

#[derive(Clone, Copy)]
pub struct AppState {
    pub theme: RwSignal<Theme>,
    /// Raw value of the date field, valid or not.
    pub date_input: RwSignal<String>,
    /// Last accepted date; drives the slot lists and the date label.
    pub date: RwSignal<NaiveDate>,
    /// Rejection message for the current `date_input`, if any.
    pub date_error: RwSignal<Option<String>>,
    /// Raw value of the store-name field.
    pub store_name: RwSignal<String>,
    /// Brand tag text: the store name or the placeholder.
    pub brand: RwSignal<String>,
    pub comment: RwSignal<String>,
    /// Rows of both periods. Notifies only when a period is re-rendered;
    /// status edits are published through `statuses`.
    pub board: RwSignal<SlotBoard>,
    pub statuses: StoredValue<SlotStatuses>,
    pub trigger: RwSignal<TriggerState>,
    pub config: StoredValue<AppConfig>,
}

impl AppState {
    /// Startup state: today's date, both periods rendered, the saved store
    /// name restored from `store`.
    pub fn init(config: AppConfig, store: &impl KeyValueStore) -> Self {
        let today = chrono::Local::now().date_naive();
        let profile = StoreProfile::restore(store, &config.storage_key, &config.placeholder);
        let board = SlotBoard::for_date(today);

        Self {
            theme: RwSignal::new(config.default_theme),
            date_input: RwSignal::new(format_date_input(today)),
            date: RwSignal::new(today),
            date_error: RwSignal::new(None),
            store_name: RwSignal::new(profile.input),
            brand: RwSignal::new(profile.brand),
            comment: RwSignal::new(String::new()),
            statuses: StoredValue::new(SlotStatuses::from_board(&board)),
            board: RwSignal::new(board),
            trigger: RwSignal::new(TriggerState::idle(&config.export.idle_label)),
            config: StoredValue::new(config),
        }
    }

    pub fn select_theme(&self, slug: &str) {
        match Theme::from_slug(slug) {
            Ok(theme) => self.theme.set(theme),
            Err(e) => log::warn!("theme change ignored: {e}"),
        }
    }

    /// Accept a new date field value.
    ///
    /// A valid date re-renders both periods, resetting every assignment. An
    /// invalid one is kept in the field and reported; the schedule stays on
    /// the last accepted date.
    pub fn change_date(&self, raw: &str) {
        self.date_input.set(raw.to_owned());
        match parse_date_input(raw) {
            Ok(date) => {
                self.date_error.set(None);
                self.date.set(date);
                let board = SlotBoard::for_date(date);
                // Rows mounted by the board notification look up their
                // status signal, so the signals go in first.
                self.statuses.set_value(SlotStatuses::from_board(&board));
                self.board.set(board);
            }
            Err(e) => {
                log::warn!("{e}");
                self.date_error.set(Some(e.to_string()));
            }
        }
    }

    /// Persist and mirror one store-name input event.
    pub fn edit_store_name(&self, store: &impl KeyValueStore, value: String) {
        let profile = self.config.with_value(|config| {
            StoreProfile::edit(store, &config.storage_key, &config.placeholder, value)
        });
        self.store_name.set(profile.input);
        self.brand.set(profile.brand);
    }

    pub fn edit_comment(&self, value: String) {
        self.comment.set(value);
    }

    /// Route a selector change through the sync bridge.
    ///
    /// The board is written untracked; only the edited row's status signal
    /// notifies, so list closures and other rows do not re-run.
    pub fn change_slot_status(&self, period: Period, id: SlotId, code: &str) {
        let result = self
            .board
            .try_update_untracked(|board| update_slot_preview(board, period, id, code));

        match result {
            Some(Ok(SyncOutcome::Updated { previous, current })) => {
                if !self.statuses.with_value(|statuses| statuses.publish(id, current)) {
                    log::warn!("{}-{id}: no status signal for live row", period.tag());
                }
                log::debug!("{}-{id}: {} -> {}", period.tag(), previous.code(), current.code());
            }
            Some(Ok(SyncOutcome::MissingRow)) => {
                log::warn!("{}-{id}: no such row; change ignored", period.tag());
            }
            Some(Err(e)) => log::error!("{}-{id}: {e}", period.tag()),
            None => log::warn!("slot board disposed; change ignored"),
        }
    }

    /// Live status signal of row `id`, if the row is still rendered.
    pub fn slot_status(&self, id: SlotId) -> Option<ArcRwSignal<StatusCode>> {
        self.statuses.with_value(|statuses| statuses.signal(id))
    }

    /// Date stamp for the export file name: the last accepted date, never the
    /// raw field value.
    pub fn export_date(&self) -> String {
        format_date_input(self.date.get_untracked())
    }

    /// Freeze the current composition.
    pub fn preview_document(&self) -> PreviewDocument {
        let placeholder = self.config.with_value(|config| config.placeholder.clone());
        self.board.with_untracked(|board| {
            PreviewDocument::compose(
                self.theme.get_untracked(),
                self.date.get_untracked(),
                board,
                &self.comment.get_untracked(),
                &self.store_name.get_untracked(),
                &placeholder,
            )
        })
    }
}
