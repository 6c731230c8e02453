//! Per-row status signals.
//!
//! The board signal notifies only when a period is re-rendered. A status
//! edit writes the board untracked and then sets the one signal here that
//! belongs to the edited row, so only that row's preview re-runs.

use std::collections::HashMap;

use leptos::prelude::*;
use schedule::{Period, SlotBoard, SlotId, StatusCode};

#[cfg(test)]
#[path = "statuses_test.rs"]
mod statuses_test;

/// One status signal per live row, rebuilt on every re-render.
#[derive(Clone, Default)]
pub struct SlotStatuses {
    signals: HashMap<SlotId, ArcRwSignal<StatusCode>>,
}

impl SlotStatuses {
    pub fn from_board(board: &SlotBoard) -> Self {
        let signals = Period::ALL
            .into_iter()
            .flat_map(|period| board.rows(period))
            .map(|row| (row.id, ArcRwSignal::new(row.status)))
            .collect();
        Self { signals }
    }

    /// Signal for row `id`, or `None` once the row has been re-rendered away.
    pub fn signal(&self, id: SlotId) -> Option<ArcRwSignal<StatusCode>> {
        self.signals.get(&id).cloned()
    }

    /// Push `status` to the row's subscribers. Returns `false` for a dead id.
    pub fn publish(&self, id: SlotId, status: StatusCode) -> bool {
        match self.signals.get(&id) {
            Some(signal) => {
                signal.set(status);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}
