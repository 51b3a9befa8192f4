//! Task Form Component
//!
//! Single reusable form: create mode by default, edit mode when a task is
//! selected from the list.

use leptos::prelude::*;

use crate::components::PrioritySelector;
use crate::context::use_app_context;
use crate::dispatch::{Command, FormInput};
use crate::level::Action;
use crate::models::TaskStatus;
use crate::store::{AppStateStoreFields, FormMode};

/// DOM id used to scroll the form into view when editing starts
pub const TASK_FORM_ID: &str = "task-form";

#[component]
pub fn TaskForm() -> impl IntoView {
    let ctx = use_app_context();
    let form = ctx.store.form();

    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (status, set_status) = signal(TaskStatus::Pending.as_str().to_string());
    let (priority, set_priority) = signal(String::from("1"));

    // Fill or reset the fields whenever the mode changes
    Effect::new(move |_| {
        let input = match form.get() {
            FormMode::Edit(task) => FormInput::from_task(&task),
            FormMode::Create => FormInput {
                status: TaskStatus::Pending.as_str().to_string(),
                priority: "1".to_string(),
                ..Default::default()
            },
        };
        set_title.set(input.title);
        set_description.set(input.description);
        set_status.set(input.status);
        set_priority.set(input.priority);
    });

    let is_edit = move || form.with(FormMode::is_edit);
    // Guests never see the create form; edit mode is unreachable without `update`
    let visible = move || is_edit() || ctx.can(Action::Create);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        ctx.run(Command::Submit(FormInput {
            title: title.get_untracked(),
            description: description.get_untracked(),
            status: status.get_untracked(),
            priority: priority.get_untracked(),
        }));
    };

    view! {
        <Show when=visible>
            <form id=TASK_FORM_ID class=move || if is_edit() { "task-form editing" } else { "task-form" } on:submit=submit>
                <h2>{move || if is_edit() { "Edit task" } else { "New task" }}</h2>

                <input
                    type="text"
                    class="task-title-input"
                    placeholder="Title"
                    required=true
                    prop:value=move || title.get()
                    on:input=move |ev| set_title.set(event_target_value(&ev))
                />

                <textarea
                    class="task-description-input"
                    placeholder="Description (optional)"
                    prop:value=move || description.get()
                    on:input=move |ev| set_description.set(event_target_value(&ev))
                ></textarea>

                <div class="task-form-row">
                    <select
                        class="task-status-select"
                        prop:value=move || status.get()
                        on:change=move |ev| set_status.set(event_target_value(&ev))
                    >
                        {TaskStatus::ALL.iter().map(|s| view! {
                            <option value=s.as_str()>{s.label()}</option>
                        }).collect_view()}
                    </select>

                    <PrioritySelector current=priority on_change=move |p| set_priority.set(p) />
                </div>

                <div class="task-form-actions">
                    <button type="submit" class="submit-btn">
                        {move || if is_edit() { "Update task" } else { "Create task" }}
                    </button>
                    <Show when=is_edit>
                        <button type="button" class="cancel-btn" on:click=move |_| ctx.run(Command::CancelEdit)>
                            "Cancel"
                        </button>
                    </Show>
                </div>
            </form>
        </Show>
    }
}
