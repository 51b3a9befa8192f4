//! Level Selection Screen
//!
//! Shown while no access level is stored. Nothing else is reachable from here.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::dispatch::Command;
use crate::level::AccessLevel;

fn describe(level: AccessLevel) -> String {
    let actions: Vec<&str> = level.permissions().iter().map(|a| a.as_str()).collect();
    actions.join(", ")
}

#[component]
pub fn LevelSelect() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <section class="level-select">
            <h1>"Taskboard"</h1>
            <p class="level-select-hint">"Choose an access level to continue"</p>
            <div class="level-buttons">
                {AccessLevel::ALL.iter().map(|level| {
                    let level = *level;
                    view! {
                        <button
                            class=format!("level-btn level-{}", level.as_str())
                            on:click=move |_| ctx.run(Command::SelectLevel(level.as_str().to_string()))
                        >
                            <span class="level-name">{level.label()}</span>
                            <span class="level-perms">{describe(level)}</span>
                        </button>
                    }
                }).collect_view()}
            </div>
        </section>
    }
}
