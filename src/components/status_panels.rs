//! Status Panels
//!
//! Configuration banner, transient notices, and the admin debug panel.

use leptos::prelude::*;

use crate::config::CONFIG_GLOBAL;
use crate::context::use_app_context;
use crate::dispatch::NoticeKind;
use crate::level::Action;
use crate::store::AppStateStoreFields;

/// Persistent banner while the deployment lacks a base URL or anon key
#[component]
pub fn ConfigBanner() -> impl IntoView {
    let ctx = use_app_context();
    let configured = ctx.store.configured();

    view! {
        <Show when=move || !configured.get()>
            <div class="config-banner" role="alert">
                <strong>"Not configured. "</strong>
                {format!("Define window.{} with url and anonKey before loading the app.", CONFIG_GLOBAL)}
            </div>
        </Show>
    }
}

fn notice_class(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Info => "message info",
        NoticeKind::Success => "message success",
        NoticeKind::Warning => "message warning",
        NoticeKind::Error => "message error",
    }
}

#[component]
pub fn NoticeArea() -> impl IntoView {
    let ctx = use_app_context();
    let notices = ctx.store.notices();

    view! {
        <div class="message-area">
            <For
                each=move || notices.get()
                key=|entry| entry.id
                children=move |entry| view! {
                    <div class=notice_class(entry.notice.kind)>{entry.notice.text}</div>
                }
            />
        </div>
    }
}

#[component]
pub fn DebugPanel() -> impl IntoView {
    let ctx = use_app_context();
    let debug = ctx.store.debug();

    view! {
        <Show when=move || ctx.can(Action::Debug)>
            <aside class="debug-panel">
                <h3>"Debug"</h3>
                <pre class="debug-info">
                    {move || debug.get().map(|r| r.to_pretty_json()).unwrap_or_else(|| "No operations yet".to_string())}
                </pre>
            </aside>
        </Show>
    }
}
