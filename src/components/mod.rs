//! UI Components
//!
//! Leptos components for the level screen and the main task screen.

mod delete_confirm_button;
mod level_select;
mod priority_selector;
mod status_panels;
mod task_card;
mod task_form;
mod task_list;
mod toolbar;

pub use delete_confirm_button::DeleteConfirmButton;
pub use level_select::LevelSelect;
pub use priority_selector::PrioritySelector;
pub use status_panels::{ConfigBanner, DebugPanel, NoticeArea};
pub use task_card::TaskCard;
pub use task_form::TaskForm;
pub use task_list::TaskList;
pub use toolbar::Toolbar;
