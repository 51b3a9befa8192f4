//! Priority Selector Component
//!
//! Button row for picking a task priority.

use leptos::prelude::*;

/// Priority options (value, label)
pub const PRIORITIES: &[(&str, &str)] = &[
    ("1", "Low"),
    ("2", "Medium"),
    ("3", "High"),
];

/// Priority buttons for the task form
#[component]
pub fn PrioritySelector(
    current: ReadSignal<String>,
    on_change: impl Fn(String) + Copy + 'static,
) -> impl IntoView {
    view! {
        <div class="priority-selector">
            {PRIORITIES.iter().map(|(value, label)| {
                let val = value.to_string();
                let val_clone = val.clone();
                let is_selected = move || current.get() == val;
                view! {
                    <button
                        type="button"
                        class=move || if is_selected() { format!("priority-btn priority-{} active", value) } else { format!("priority-btn priority-{}", value) }
                        on:click=move |_| on_change(val_clone.clone())
                    >
                        {*label}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}
