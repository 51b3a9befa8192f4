//! Task Repository
//!
//! The four REST operations against the remote table. Every call is gated
//! on configuration and permission before anything is sent.

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::query::{id_filter, list_query_string};
use super::{HttpRequest, HttpResponse, Method, Transport};
use crate::config::AccessConfig;
use crate::error::{AppError, AppResult, Operation};
use crate::level::{AccessLevel, level_allows};
use crate::models::{ListQuery, Task, TaskDraft, TaskId, TaskPatch, PRIORITY_RANGE};

/// PostgREST error body; only `message` is surfaced
#[derive(Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}

fn decode<R: DeserializeOwned>(body: &str) -> AppResult<R> {
    serde_json::from_str(body).map_err(|e| AppError::Decode(e.to_string()))
}

fn validate_title(title: &str) -> AppResult<()> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("title is required".into()));
    }
    Ok(())
}

fn validate_priority(priority: i32) -> AppResult<()> {
    if !PRIORITY_RANGE.contains(&priority) {
        return Err(AppError::Validation(format!(
            "priority must be between {} and {}",
            PRIORITY_RANGE.start(),
            PRIORITY_RANGE.end()
        )));
    }
    Ok(())
}

#[derive(Clone)]
pub struct TaskRepository<T: Transport> {
    config: Rc<AccessConfig>,
    transport: T,
}

impl<T: Transport> TaskRepository<T> {
    pub fn new(config: Rc<AccessConfig>, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &AccessConfig {
        &self.config
    }

    /// Configuration first, then the level's permission set
    pub fn authorize(&self, level: Option<AccessLevel>, operation: Operation) -> AppResult<()> {
        if !self.config.is_configured() {
            return Err(AppError::Configuration(
                "set url and anonKey in window.TASKBOARD_CONFIG".into(),
            ));
        }
        let action = operation.action();
        if !level_allows(level, action) {
            return Err(AppError::Permission {
                level: level.unwrap_or(AccessLevel::Guest),
                action,
            });
        }
        Ok(())
    }

    async fn execute(
        &self,
        operation: Operation,
        level: Option<AccessLevel>,
        method: Method,
        query: &str,
        body: Option<String>,
    ) -> AppResult<HttpResponse> {
        let request = HttpRequest {
            method,
            url: self.config.build_url(query),
            headers: self.config.build_headers(level),
            body,
        };
        tracing::debug!(method = method.as_str(), url = %request.url, "sending request");

        let response = self.transport.send(request).await.map_err(|err| {
            tracing::error!(%operation, error = %err, "request failed");
            AppError::Network(err)
        })?;

        if !response.is_success() {
            let message = server_message(&response.body)
                .unwrap_or_else(|| operation.fallback_message().to_string());
            tracing::warn!(%operation, status = response.status, %message, "server rejected request");
            return Err(AppError::Api {
                operation,
                status: response.status,
                message,
            });
        }
        Ok(response)
    }

    /// Rows written by POST/PATCH come back as an array
    fn single_row(operation: Operation, response: &HttpResponse) -> AppResult<Option<Task>> {
        let rows: Vec<Task> = decode(&response.body)?;
        if rows.len() > 1 {
            tracing::warn!(%operation, rows = rows.len(), "more rows echoed than expected");
        }
        Ok(rows.into_iter().next())
    }

    pub async fn list(&self, level: Option<AccessLevel>, query: &ListQuery) -> AppResult<Vec<Task>> {
        self.authorize(level, Operation::Read)?;
        let response = self
            .execute(Operation::Read, level, Method::Get, &list_query_string(query), None)
            .await?;
        let tasks: Vec<Task> = decode(&response.body)?;
        tracing::debug!(count = tasks.len(), "tasks loaded");
        Ok(tasks)
    }

    pub async fn create(&self, level: Option<AccessLevel>, draft: &TaskDraft) -> AppResult<Task> {
        self.authorize(level, Operation::Create)?;
        validate_title(&draft.title)?;
        validate_priority(draft.priority)?;

        let body = serde_json::to_string(draft).map_err(|e| AppError::Decode(e.to_string()))?;
        let response = self
            .execute(Operation::Create, level, Method::Post, "", Some(body))
            .await?;
        Self::single_row(Operation::Create, &response)?
            .ok_or_else(|| AppError::Decode("created row was not returned".into()))
    }

    pub async fn update(&self, level: Option<AccessLevel>, id: TaskId, patch: &TaskPatch) -> AppResult<Task> {
        self.authorize(level, Operation::Update)?;
        if patch.is_empty() {
            return Err(AppError::Validation("nothing to update".into()));
        }
        if let Some(title) = &patch.title {
            validate_title(title)?;
        }
        if let Some(priority) = patch.priority {
            validate_priority(priority)?;
        }

        let body = serde_json::to_string(patch).map_err(|e| AppError::Decode(e.to_string()))?;
        let response = self
            .execute(Operation::Update, level, Method::Patch, &id_filter(id), Some(body))
            .await?;
        Self::single_row(Operation::Update, &response)?.ok_or_else(|| AppError::Api {
            operation: Operation::Update,
            status: 404,
            message: format!("task {} not found", id),
        })
    }

    /// Callers must have obtained the user's confirmation first
    pub async fn delete(&self, level: Option<AccessLevel>, id: TaskId) -> AppResult<()> {
        self.authorize(level, Operation::Delete)?;
        self.execute(Operation::Delete, level, Method::Delete, &id_filter(id), None)
            .await?;
        Ok(())
    }
}
