//! Toolbar Component
//!
//! Status filter, sort field, refresh, and the current access level.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::dispatch::Command;
use crate::models::{ListQuery, SortField, TaskStatus};
use crate::store::AppStateStoreFields;

#[component]
pub fn Toolbar() -> impl IntoView {
    let ctx = use_app_context();
    let query = ctx.store.query();
    let level = ctx.store.level();

    let on_filter = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        ctx.run(Command::SetQuery(ListQuery {
            status: TaskStatus::parse(&value),
            ..query.get_untracked()
        }));
    };

    let on_sort = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        let sort = SortField::parse(&value).unwrap_or_default();
        ctx.run(Command::SetQuery(ListQuery {
            sort,
            ..query.get_untracked()
        }));
    };

    view! {
        <div class="toolbar">
            <label class="toolbar-field">
                "Status"
                <select
                    prop:value=move || query.get().status.map(|s| s.as_str()).unwrap_or("")
                    on:change=on_filter
                >
                    <option value="">"All"</option>
                    {TaskStatus::ALL.iter().map(|s| view! {
                        <option value=s.as_str()>{s.label()}</option>
                    }).collect_view()}
                </select>
            </label>

            <label class="toolbar-field">
                "Sort by"
                <select prop:value=move || query.get().sort.column() on:change=on_sort>
                    {SortField::ALL.iter().map(|f| view! {
                        <option value=f.column()>{f.label()}</option>
                    }).collect_view()}
                </select>
            </label>

            <button class="refresh-btn" on:click=move |_| ctx.run(Command::Refresh)>
                "⟳ Refresh"
            </button>

            <div class="level-indicator">
                <span class=move || format!("level-badge level-{}", level.get().map(|l| l.as_str()).unwrap_or("none"))>
                    {move || level.get().map(|l| l.label()).unwrap_or("None")}
                </span>
                <button class="change-level-btn" on:click=move |_| ctx.run(Command::ChangeLevel)>
                    "Change level"
                </button>
            </div>
        </div>
    }
}
