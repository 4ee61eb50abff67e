use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use url::Url;

pub const TASKS_ENDPOINT: &str = "https://api.todoist.com/rest/v2/tasks";
pub const TOP_TASKS: usize = 12;
pub const UNTITLED_TASK: &str = "(Untitled)";
pub const NO_TASKS_TEXT: &str = "No tasks";
pub const UNAVAILABLE_TEXT: &str = "Tasks unavailable";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Due {
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub due: Option<Due>,
}

impl Task {
    pub fn display_content(&self) -> &str {
        if self.content.is_empty() {
            UNTITLED_TASK
        } else {
            &self.content
        }
    }

    pub fn due_at(&self) -> Option<NaiveDateTime> {
        self.due.as_ref().and_then(|due| parse_due(&due.date))
    }
}

/// Accepts a plain date or a date-time, with or without an offset.
pub fn parse_due(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").ok()
}

/// Earliest due first; undated tasks keep their order at the end.
pub fn sort_by_due(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| match (a.due_at(), b.due_at()) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

pub fn top_tasks(tasks: &[Task]) -> &[Task] {
    &tasks[..tasks.len().min(TOP_TASKS)]
}

pub fn due_label(due: Option<NaiveDate>, today: NaiveDate) -> String {
    let Some(due) = due else {
        return "No date".to_string();
    };
    match (due - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        days if days < 0 => "Overdue".to_string(),
        _ => due.format("%a, %b %-d").to_string(),
    }
}

pub fn count_label(remaining: usize) -> String {
    if remaining == 1 {
        "1 task".to_string()
    } else {
        format!("{remaining} tasks")
    }
}

pub fn close_task_url(task_id: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(TASKS_ENDPOINT)?;
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.push(task_id).push("close");
    }
    Ok(url)
}
