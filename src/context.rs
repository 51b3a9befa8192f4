//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::FetchTransport;
use crate::dispatch::{Command, Dispatcher};
use crate::level::{level_allows, Action};
use crate::storage::BrowserStorage;
use crate::store::{
    store_apply, store_begin_loading, store_end_loading, store_push_notice, store_snapshot, AppStateStoreFields,
    AppStore,
};

pub type AppDispatcher = Dispatcher<FetchTransport, BrowserStorage>;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub store: AppStore,
    /// Lives on the UI thread only
    dispatcher: StoredValue<AppDispatcher, LocalStorage>,
}

impl AppContext {
    pub fn new(store: AppStore, dispatcher: AppDispatcher) -> Self {
        Self {
            store,
            dispatcher: StoredValue::new_local(dispatcher),
        }
    }

    /// Reactive permission check for control enablement
    pub fn can(&self, action: Action) -> bool {
        level_allows(self.store.level().get(), action)
    }

    /// Dispatch a command and apply its outcome once it resolves
    pub fn run(&self, command: Command) {
        let store = self.store;
        let dispatcher = self.dispatcher.get_value();
        let shows_loading = command.shows_loading();
        if shows_loading {
            store_begin_loading(&store);
        }
        let snapshot = store_snapshot(&store);
        if let Some(notice) = dispatcher.progress(&command, &snapshot) {
            store_push_notice(&store, notice);
        }
        spawn_local(async move {
            let outcome = dispatcher.dispatch(command, &snapshot).await;
            if shows_loading {
                store_end_loading(&store);
            }
            store_apply(&store, outcome);
        });
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
