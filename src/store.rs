//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Commands never
//! write here directly; their `Outcome` is applied by `store_apply`.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::dispatch::{DebugRecord, Notice, Outcome};
use crate::level::AccessLevel;
use crate::models::{ListQuery, Task};

/// How long a notice stays on screen
const NOTICE_TTL_MS: u32 = 3_000;

/// Mode of the single create/edit form
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FormMode {
    #[default]
    Create,
    /// Editing a copy of the selected task
    Edit(Task),
}

impl FormMode {
    pub fn is_edit(&self) -> bool {
        matches!(self, FormMode::Edit(_))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NoticeEntry {
    pub id: u32,
    pub notice: Notice,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Selected access level (None = selection screen)
    pub level: Option<AccessLevel>,
    /// Whether base URL and anon key are usable
    pub configured: bool,
    /// Cached task list from the last successful read
    pub tasks: Vec<Task>,
    /// Current filter/sort
    pub query: ListQuery,
    pub form: FormMode,
    /// Number of listing requests in flight
    pub loading: u32,
    pub notices: Vec<NoticeEntry>,
    pub next_notice_id: u32,
    /// Last admin debug record
    pub debug: Option<DebugRecord>,
}

impl AppState {
    pub fn new(level: Option<AccessLevel>, configured: bool) -> Self {
        Self {
            level,
            configured,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

// ========================
// Store Helper Functions
// ========================

/// Plain copy of the fields a dispatch reads
pub fn store_snapshot(store: &AppStore) -> AppState {
    AppState {
        level: store.level().get_untracked(),
        configured: store.configured().get_untracked(),
        tasks: store.tasks().get_untracked(),
        query: store.query().get_untracked(),
        form: store.form().get_untracked(),
        ..Default::default()
    }
}

/// Allocate the next notice id
pub fn store_next_notice_id(store: &AppStore) -> u32 {
    let field = store.next_notice_id();
    let mut next = field.write();
    *next += 1;
    *next
}

/// Push a notice and schedule its removal
pub fn store_push_notice(store: &AppStore, notice: Notice) {
    let id = store_next_notice_id(store);
    store.notices().write().push(NoticeEntry { id, notice });

    let store = *store;
    spawn_local(async move {
        TimeoutFuture::new(NOTICE_TTL_MS).await;
        store.notices().write().retain(|entry| entry.id != id);
    });
}

pub fn store_begin_loading(store: &AppStore) {
    *store.loading().write() += 1;
}

/// The list stays hidden until every overlapping fetch has finished
pub fn store_end_loading(store: &AppStore) {
    let field = store.loading();
    let mut count = field.write();
    *count = count.saturating_sub(1);
}

pub fn store_is_loading(store: &AppStore) -> bool {
    store.loading().get() > 0
}

/// Apply a command outcome; `None` fields leave the state as it was
pub fn store_apply(store: &AppStore, outcome: Outcome) {
    if let Some(tasks) = outcome.tasks {
        *store.tasks().write() = tasks;
    }
    if let Some(query) = outcome.query {
        *store.query().write() = query;
    }
    if let Some(form) = outcome.form {
        *store.form().write() = form;
    }
    if let Some(level) = outcome.level {
        *store.level().write() = Some(level);
    }
    if let Some(record) = outcome.debug {
        *store.debug().write() = Some(record);
    }
    for notice in outcome.notices {
        store_push_notice(store, notice);
    }
    if outcome.reload {
        reload_page();
    }
}

/// Full reload so every in-memory value starts over
fn reload_page() {
    match web_sys::window() {
        Some(window) => {
            if let Err(err) = window.location().reload() {
                tracing::error!(error = ?err, "page reload failed");
            }
        }
        None => tracing::error!("no window to reload"),
    }
}
