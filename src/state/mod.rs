//! Client-side state.
//!
//! DESIGN
//! ======
//! [`app::AppState`] is the one owner of page state, built at startup and
//! handed to components through context. The logic it runs on each edit
//! (the sync bridge and the store-profile persistence) lives in plain
//! functions beside it so it can be tested without signals.

pub mod app;
pub mod profile;
pub mod statuses;
pub mod sync;
