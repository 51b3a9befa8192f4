//! Task Card Component
//!
//! One task: title, optional description, badges, creation time, controls.

use leptos::prelude::*;

use crate::components::task_form::TASK_FORM_ID;
use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::dispatch::Command;
use crate::level::Action;
use crate::models::Task;

fn scroll_to_form() {
    if let Some(form) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(TASK_FORM_ID))
    {
        form.scroll_into_view();
    }
}

#[component]
pub fn TaskCard(task: Task) -> impl IntoView {
    let ctx = use_app_context();
    let id = task.id;
    let created = task.created_label();
    let status_class = format!("task-status status-{}", task.status.as_str());
    let priority_class = format!("task-priority priority-{}", task.priority);

    let can_update = move || ctx.can(Action::Update);
    let cannot_delete = Signal::derive(move || !ctx.can(Action::Delete));

    let start_edit = move |_| {
        ctx.run(Command::StartEdit(id));
        scroll_to_form();
    };

    view! {
        <div class="task-item">
            <div class="task-header">
                <h3 class="task-title">{task.title}</h3>
                <span class=priority_class>{format!("Priority {}", task.priority)}</span>
            </div>

            {task.description.map(|d| view! { <p class="task-description">{d}</p> })}

            <div class="task-meta">
                <span class=status_class>{task.status.label()}</span>
                <span class="task-created">{format!("Created: {}", created)}</span>
            </div>

            <div class="task-actions">
                <button
                    class="edit-btn"
                    disabled=move || !can_update()
                    title=move || if can_update() { "Edit" } else { "Your access level cannot edit tasks" }
                    on:click=start_edit
                >
                    "✏ Edit"
                </button>
                <DeleteConfirmButton
                    button_class="delete-btn"
                    disabled=cannot_delete
                    on_confirm=move |_| ctx.run(Command::Delete { id, confirmed: true })
                />
            </div>
        </div>
    }
}
