use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use sqlx::FromRow;

use crate::dates::parse_search_date;
use crate::error::CoreError;
use crate::recurrence::advance_task_date;

/// A stored task. `date` is kept in `YYYYMMDD` form, `repeat` as the raw rule string.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Task {
    #[serde_as(as = "DisplayFromStr")]
    pub id: i64,
    pub date: String,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}

/// A task as submitted by a client, before validation.
///
/// Every field is optional on the wire; `id` is only meaningful for updates and
/// travels as a string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskInput {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub repeat: String,
}

/// Validated data ready to be written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTaskData {
    pub date: String,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}

impl TaskInput {
    /// Validates the title and rolls the date forward relative to `today`.
    pub fn normalize(self, today: NaiveDate) -> Result<NewTaskData, CoreError> {
        if self.title.trim().is_empty() {
            return Err(CoreError::InvalidInput("title is required".to_string()));
        }
        let date = advance_task_date(today, Some(self.date.as_str()), &self.repeat)?;
        Ok(NewTaskData {
            date,
            title: self.title,
            comment: self.comment,
            repeat: self.repeat,
        })
    }

    /// Like [`TaskInput::normalize`], but also requires a numeric id.
    pub fn normalize_existing(self, today: NaiveDate) -> Result<Task, CoreError> {
        let id = parse_task_id(self.id.as_deref().unwrap_or_default())?;
        let data = self.normalize(today)?;
        Ok(Task {
            id,
            date: data.date,
            title: data.title,
            comment: data.comment,
            repeat: data.repeat,
        })
    }
}

/// Parses a task identifier as it arrives in query strings and JSON bodies.
pub fn parse_task_id(value: &str) -> Result<i64, CoreError> {
    if value.is_empty() {
        return Err(CoreError::InvalidInput("task id is required".to_string()));
    }
    value
        .parse()
        .map_err(|_| CoreError::InvalidInput(format!("'{}' is not a valid task id", value)))
}

/// Represents a filter for listing tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskFilter {
    All,
    /// Exact task date, from a `DD.MM.YYYY` search term.
    Date(NaiveDate),
    /// Substring of the title or comment.
    Text(String),
}

impl TaskFilter {
    pub fn from_search(search: Option<&str>) -> Self {
        match search.map(str::trim) {
            None | Some("") => TaskFilter::All,
            Some(term) => match parse_search_date(term) {
                Some(date) => TaskFilter::Date(date),
                None => TaskFilter::Text(term.to_string()),
            },
        }
    }
}

#[derive(Debug)]
pub enum CompletionResult {
    /// A one-off task was finished and removed.
    Deleted(Task),
    /// A repeating task moved on to its next date.
    Rescheduled(Task),
}
