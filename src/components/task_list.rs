//! Task List Component
//!
//! Renders the cached tasks as cards. The list is hidden while a fetch is in
//! flight; a failed fetch shows the previous cache again.

use leptos::prelude::*;

use crate::components::TaskCard;
use crate::context::use_app_context;
use crate::store::{store_is_loading, AppStateStoreFields};

#[component]
pub fn TaskList() -> impl IntoView {
    let ctx = use_app_context();
    let tasks = ctx.store.tasks();
    let store = ctx.store;
    let loading = move || store_is_loading(&store);

    view! {
        <Show when=loading>
            <div class="loading">"Loading tasks..."</div>
        </Show>
        <Show when=move || !loading()>
            <Show
                when=move || !tasks.read().is_empty()
                fallback=|| view! { <p class="empty-list">"No tasks to show"</p> }
            >
                <div class="tasks-list">
                    <For
                        each=move || tasks.get()
                        key=|task| {
                            // Every displayed field, so edits re-render the card
                            (
                                task.id,
                                task.title.clone(),
                                task.description.clone(),
                                task.status,
                                task.priority,
                            )
                        }
                        children=move |task| view! { <TaskCard task=task /> }
                    />
                </div>
            </Show>
        </Show>
    }
}
