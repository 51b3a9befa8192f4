//! Command Dispatch
//!
//! Maps every UI action to level-gate and repository calls. A dispatch reads
//! a snapshot of the app state and returns the `Outcome` to apply; it never
//! touches the view directly.

use std::rc::Rc;

use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};

use crate::api::{list_query_string, TaskRepository, Transport};
use crate::error::{AppError, Operation};
use crate::level::{AccessLevel, Action, LevelGate};
use crate::models::{ListQuery, Task, TaskDraft, TaskId, TaskPatch, TaskStatus};
use crate::storage::LevelStorage;
use crate::store::{AppState, FormMode};

// ========================
// Commands and Outcomes
// ========================

/// Raw form fields as typed by the user
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormInput {
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
}

impl FormInput {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            status: task.status.as_str().to_string(),
            priority: task.priority.to_string(),
        }
    }

    /// Trimmed draft; a blank description becomes `null`
    pub fn to_draft(&self) -> Result<TaskDraft, AppError> {
        let status = TaskStatus::parse(self.status.trim())
            .ok_or_else(|| AppError::Validation(format!("unknown status `{}`", self.status)))?;
        let priority = self
            .priority
            .trim()
            .parse::<i32>()
            .map_err(|_| AppError::Validation(format!("priority `{}` is not a number", self.priority)))?;
        let description = Some(self.description.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string);
        Ok(TaskDraft::new(self.title.trim(), description, status, priority))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Re-fetch with the current filter/sort
    Refresh,
    /// Change filter/sort and re-fetch
    SetQuery(ListQuery),
    /// Create or update, depending on the form mode
    Submit(FormInput),
    StartEdit(TaskId),
    CancelEdit,
    /// Destructive; ignored unless the user confirmed
    Delete { id: TaskId, confirmed: bool },
    SelectLevel(String),
    ChangeLevel,
}

impl Command {
    /// Commands that end in a list fetch hide the list while in flight
    pub fn shows_loading(&self) -> bool {
        match self {
            Command::Refresh | Command::SetQuery(_) | Command::Submit(_) | Command::SelectLevel(_) => true,
            Command::Delete { confirmed, .. } => *confirmed,
            Command::StartEdit(_) | Command::CancelEdit | Command::ChangeLevel => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

/// Transient user-facing message
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self { kind, text: text.into() }
    }
}

/// Structured record shown in the admin debug panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugRecord {
    pub operation: String,
    pub timestamp: String,
    pub level: Option<AccessLevel>,
    pub payload: Value,
}

impl DebugRecord {
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| e.to_string())
    }
}

/// State delta produced by one command; `None` fields leave state untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Outcome {
    pub tasks: Option<Vec<Task>>,
    pub query: Option<ListQuery>,
    pub form: Option<FormMode>,
    pub level: Option<AccessLevel>,
    pub notices: Vec<Notice>,
    pub debug: Option<DebugRecord>,
    /// Full page reload requested (level cleared)
    pub reload: bool,
}

impl Outcome {
    fn notify(&mut self, kind: NoticeKind, text: impl Into<String>) {
        self.notices.push(Notice::new(kind, text));
    }
}

fn notice_kind(err: &AppError) -> NoticeKind {
    if matches!(err, AppError::Permission { .. } | AppError::Validation(_)) {
        NoticeKind::Warning
    } else {
        NoticeKind::Error
    }
}

fn error_payload(err: &AppError) -> Value {
    match err {
        AppError::Api { status, message, .. } => json!({ "status": status, "message": message }),
        other => json!({ "message": other.to_string() }),
    }
}

// ========================
// Dispatcher
// ========================

pub struct Dispatcher<T: Transport, S: LevelStorage> {
    repo: TaskRepository<T>,
    gate: Rc<LevelGate<S>>,
}

impl<T: Transport + Clone, S: LevelStorage> Clone for Dispatcher<T, S> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            gate: Rc::clone(&self.gate),
        }
    }
}

impl<T: Transport, S: LevelStorage> Dispatcher<T, S> {
    pub fn new(repo: TaskRepository<T>, gate: LevelGate<S>) -> Self {
        Self {
            repo,
            gate: Rc::new(gate),
        }
    }

    pub fn gate(&self) -> &LevelGate<S> {
        &self.gate
    }

    pub fn is_configured(&self) -> bool {
        self.repo.config().is_configured()
    }

    fn debug_record(&self, operation: &str, payload: Value) -> Option<DebugRecord> {
        self.gate.can_perform(Action::Debug).then(|| DebugRecord {
            operation: operation.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            level: self.gate.get_level(),
            payload,
        })
    }

    fn fail(&self, outcome: &mut Outcome, operation: Operation, err: AppError) {
        if err.is_local() {
            tracing::debug!(%operation, error = %err, "command refused before sending");
        } else {
            tracing::warn!(%operation, error = %err, "command failed");
        }
        outcome.notify(notice_kind(&err), format!("Error: {}", err));
        outcome.debug = self.debug_record(operation.error_tag(), error_payload(&err));
    }

    /// Notice to show right away for a write that will actually be sent
    pub fn progress(&self, command: &Command, state: &AppState) -> Option<Notice> {
        let operation = match command {
            Command::Submit(_) if state.form.is_edit() => Operation::Update,
            Command::Submit(_) => Operation::Create,
            Command::Delete { confirmed: true, .. } => Operation::Delete,
            _ => return None,
        };
        self.repo
            .authorize(self.gate.get_level(), operation)
            .ok()
            .map(|()| Notice::new(NoticeKind::Info, operation.progress_message()))
    }

    pub async fn dispatch(&self, command: Command, state: &AppState) -> Outcome {
        tracing::debug!(?command, "dispatch");
        let mut outcome = Outcome::default();
        match command {
            Command::Refresh => self.refresh(&state.query, &mut outcome).await,
            Command::SetQuery(query) => {
                outcome.query = Some(query);
                self.refresh(&query, &mut outcome).await;
            }
            Command::Submit(input) => self.submit(input, state, &mut outcome).await,
            Command::StartEdit(id) => self.start_edit(id, state, &mut outcome),
            Command::CancelEdit => outcome.form = Some(FormMode::Create),
            Command::Delete { id, confirmed } => {
                if confirmed {
                    self.delete(id, state, &mut outcome).await;
                } else {
                    tracing::debug!(id, "delete not confirmed, nothing sent");
                }
            }
            Command::SelectLevel(value) => self.select_level(&value, state, &mut outcome).await,
            Command::ChangeLevel => {
                self.gate.clear_level();
                outcome.reload = true;
            }
        }
        outcome
    }

    async fn refresh(&self, query: &ListQuery, outcome: &mut Outcome) {
        match self.repo.list(self.gate.get_level(), query).await {
            Ok(tasks) => {
                let payload = json!({ "total": tasks.len(), "filters": list_query_string(query) });
                outcome.debug = self.debug_record(Operation::Read.tag(), payload);
                outcome.tasks = Some(tasks);
            }
            Err(err) => self.fail(outcome, Operation::Read, err),
        }
    }

    async fn submit(&self, input: FormInput, state: &AppState, outcome: &mut Outcome) {
        let level = self.gate.get_level();
        let operation = match &state.form {
            FormMode::Create => Operation::Create,
            FormMode::Edit(_) => Operation::Update,
        };
        // Refusals come before any complaint about the input
        let draft = match self
            .repo
            .authorize(level, operation)
            .and_then(|()| input.to_draft())
        {
            Ok(draft) => draft,
            Err(err) => return self.fail(outcome, operation, err),
        };

        let result = match &state.form {
            FormMode::Create => self.repo.create(level, &draft).await,
            FormMode::Edit(task) => self.repo.update(level, task.id, &TaskPatch::from(draft)).await,
        };

        match result {
            Ok(row) => {
                let text = match operation {
                    Operation::Create => "Task created",
                    _ => "Task updated",
                };
                tracing::info!(%operation, id = row.id, "task saved");
                outcome.notify(NoticeKind::Success, text);
                outcome.form = Some(FormMode::Create);
                self.refresh(&state.query, outcome).await;
                // The write record wins over the follow-up read
                if let Ok(payload) = serde_json::to_value(&row) {
                    if let Some(record) = self.debug_record(operation.tag(), payload) {
                        outcome.debug = Some(record);
                    }
                }
            }
            Err(err) => self.fail(outcome, operation, err),
        }
    }

    fn start_edit(&self, id: TaskId, state: &AppState, outcome: &mut Outcome) {
        if !self.gate.can_perform(Action::Update) {
            let err = AppError::Permission {
                level: self.gate.get_level().unwrap_or(AccessLevel::Guest),
                action: Action::Update,
            };
            outcome.notify(notice_kind(&err), format!("Error: {}", err));
            return;
        }
        match state.tasks.iter().find(|t| t.id == id) {
            Some(task) => outcome.form = Some(FormMode::Edit(task.clone())),
            None => outcome.notify(NoticeKind::Warning, format!("Task {} is no longer listed", id)),
        }
    }

    async fn delete(&self, id: TaskId, state: &AppState, outcome: &mut Outcome) {
        let level = self.gate.get_level();
        if let Err(err) = self.repo.authorize(level, Operation::Delete) {
            return self.fail(outcome, Operation::Delete, err);
        }
        match self.repo.delete(level, id).await {
            Ok(()) => {
                tracing::info!(id, "task deleted");
                outcome.notify(NoticeKind::Success, "Task deleted");
                if matches!(&state.form, FormMode::Edit(task) if task.id == id) {
                    outcome.form = Some(FormMode::Create);
                }
                self.refresh(&state.query, outcome).await;
                if let Some(record) = self.debug_record(Operation::Delete.tag(), json!({ "id": id })) {
                    outcome.debug = Some(record);
                }
            }
            Err(err) => self.fail(outcome, Operation::Delete, err),
        }
    }

    async fn select_level(&self, value: &str, state: &AppState, outcome: &mut Outcome) {
        if !self.gate.set_level(value) {
            outcome.notify(NoticeKind::Warning, format!("Unknown access level `{}`", value));
            return;
        }
        outcome.level = self.gate.get_level();
        if let Some(level) = outcome.level {
            outcome.notify(NoticeKind::Info, format!("Access level: {}", level.label()));
        }
        if !self.is_configured() {
            // The banner already explains why nothing loads
            return;
        }
        self.refresh(&state.query, outcome).await;
    }
}
