//! Taskboard App
//!
//! Root component: builds the config, gate and dispatcher once, then shows
//! either the level selection screen or the main task screen.

use std::rc::Rc;

use leptos::prelude::*;
use reactive_stores::Store;

use crate::api::{FetchTransport, TaskRepository};
use crate::components::{ConfigBanner, DebugPanel, LevelSelect, NoticeArea, TaskForm, TaskList, Toolbar};
use crate::config::AccessConfig;
use crate::context::{use_app_context, AppContext};
use crate::dispatch::{Command, Dispatcher, Notice, NoticeKind};
use crate::level::LevelGate;
use crate::storage::BrowserStorage;
use crate::store::{store_push_notice, AppState, AppStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let config = Rc::new(AccessConfig::from_window());
    let gate = LevelGate::new(BrowserStorage);
    let store = Store::new(AppState::new(gate.get_level(), config.is_configured()));
    let dispatcher = Dispatcher::new(TaskRepository::new(config, FetchTransport), gate);

    let ctx = AppContext::new(store, dispatcher);
    provide_context(ctx);

    // A level restored from storage goes straight to the task list
    if store.level().get_untracked().is_some() && store.configured().get_untracked() {
        store_push_notice(&store, Notice::new(NoticeKind::Info, "Connecting to the task database..."));
        ctx.run(Command::Refresh);
    }

    view! {
        <ConfigBanner />
        <NoticeArea />
        <Show
            when=move || store.level().get().is_some()
            fallback=|| view! { <LevelSelect /> }
        >
            <MainScreen />
        </Show>
    }
}

/// Main screen, scoped by the selected level's permissions
#[component]
fn MainScreen() -> impl IntoView {
    let ctx = use_app_context();
    let tasks = ctx.store.tasks();

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"Taskboard"</h1>
                <Toolbar />
            </header>

            <main class="main-content">
                <TaskForm />
                <TaskList />
                <p class="item-count">{move || format!("{} tasks", tasks.read().len())}</p>
            </main>

            <DebugPanel />
        </div>
    }
}
