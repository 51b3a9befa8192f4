//! Test Transports
//!
//! A scripted transport that records requests, and an in-memory table that
//! answers the PostgREST subset the repository speaks.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use super::{HttpRequest, HttpResponse, Method, Transport};
use crate::config::AccessConfig;
use crate::models::{Task, TaskId, TaskStatus};

pub fn configured() -> Rc<AccessConfig> {
    Rc::new(
        AccessConfig::new("https://db.example.com", "tasks", "anon-key")
            .with_user_key("user-key")
            .with_admin_key("admin-key"),
    )
}

fn ok_json(status: u16, value: &impl serde::Serialize) -> HttpResponse {
    HttpResponse {
        status,
        body: serde_json::to_string(value).unwrap(),
    }
}

// ========================
// Scripted
// ========================

/// Replays queued responses in order; an empty queue answers `200 []`
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    replies: Rc<RefCell<VecDeque<Result<HttpResponse, String>>>>,
    log: Rc<RefCell<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    pub fn push_response(&self, status: u16, body: &str) {
        self.replies.borrow_mut().push_back(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
    }

    pub fn push_network_error(&self, message: &str) {
        self.replies.borrow_mut().push_back(Err(message.to_string()));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.log.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.log.borrow().len()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        self.log.borrow_mut().push(request);
        self.replies.borrow_mut().pop_front().unwrap_or_else(|| {
            Ok(HttpResponse {
                status: 200,
                body: "[]".into(),
            })
        })
    }
}

// ========================
// In-memory PostgREST
// ========================

#[derive(Default)]
struct Table {
    rows: Vec<Task>,
    next_id: TaskId,
}

/// In-memory `tasks` table; clones share the same rows
#[derive(Clone, Default)]
pub struct FakePostgrest {
    table: Rc<RefCell<Table>>,
    sent: Rc<RefCell<usize>>,
}

struct Params {
    status: Option<String>,
    id: Option<TaskId>,
    order: Option<String>,
}

fn parse_params(url: &str) -> Params {
    let mut params = Params {
        status: None,
        id: None,
        order: None,
    };
    let query = url.split_once('?').map(|(_, q)| q).unwrap_or("");
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let Some((key, value)) = pair.split_once('=') else { continue };
        match key {
            "status" => params.status = value.strip_prefix("eq.").map(str::to_string),
            "id" => params.id = value.strip_prefix("eq.").and_then(|v| v.parse().ok()),
            "order" => params.order = value.strip_suffix(".desc").map(str::to_string),
            _ => {}
        }
    }
    params
}

fn apply_patch(task: &mut Task, patch: &Value) {
    if let Some(title) = patch.get("title").and_then(Value::as_str) {
        task.title = title.to_string();
    }
    if let Some(description) = patch.get("description") {
        task.description = description.as_str().map(str::to_string);
    }
    if let Some(status) = patch.get("status").and_then(Value::as_str).and_then(TaskStatus::parse) {
        task.status = status;
    }
    if let Some(priority) = patch.get("priority").and_then(Value::as_i64) {
        task.priority = priority as i32;
    }
}

impl FakePostgrest {
    pub fn request_count(&self) -> usize {
        *self.sent.borrow()
    }

    pub fn rows(&self) -> Vec<Task> {
        self.table.borrow().rows.clone()
    }
}

#[async_trait(?Send)]
impl Transport for FakePostgrest {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        *self.sent.borrow_mut() += 1;
        let params = parse_params(&request.url);
        let mut table = self.table.borrow_mut();
        let matches = |task: &Task| {
            params.id.map_or(true, |id| task.id == id)
                && params.status.as_deref().map_or(true, |s| task.status.as_str() == s)
        };

        let body: Value = request
            .body
            .as_deref()
            .map(|b| serde_json::from_str(b).unwrap())
            .unwrap_or(Value::Null);

        match request.method {
            Method::Get => {
                let mut rows: Vec<Task> = table.rows.iter().filter(|t| matches(t)).cloned().collect();
                match params.order.as_deref() {
                    Some("priority") => rows.sort_by(|a, b| b.priority.cmp(&a.priority)),
                    Some("title") => rows.sort_by(|a, b| b.title.cmp(&a.title)),
                    _ => rows.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
                }
                Ok(ok_json(200, &rows))
            }
            Method::Post => {
                table.next_id += 1;
                let id = table.next_id;
                let created_at = Utc
                    .timestamp_opt(1_700_000_000 + id, 0)
                    .single()
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_default();
                let mut task = Task {
                    id,
                    title: String::new(),
                    description: None,
                    status: TaskStatus::Pending,
                    priority: 1,
                    created_at,
                };
                apply_patch(&mut task, &body);
                table.rows.push(task.clone());
                Ok(ok_json(201, &vec![task]))
            }
            Method::Patch => {
                let mut updated = Vec::new();
                for task in table.rows.iter_mut().filter(|t| matches(t)) {
                    apply_patch(task, &body);
                    updated.push(task.clone());
                }
                Ok(ok_json(200, &updated))
            }
            Method::Delete => {
                let (removed, kept): (Vec<Task>, Vec<Task>) = table.rows.drain(..).partition(|t| matches(t));
                table.rows = kept;
                Ok(ok_json(200, &removed))
            }
        }
    }
}
