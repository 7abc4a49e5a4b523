use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::config::AppConfig;
use crate::task::{Priority, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineStatus {
    Passed,
    Active,
}

impl DeadlineStatus {
    /// Date-only comparison: a task due today is still active.
    pub fn classify(due: NaiveDate, today: NaiveDate) -> Self {
        if due < today {
            DeadlineStatus::Passed
        } else {
            DeadlineStatus::Active
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DeadlineStatus::Passed => "Deadline passed",
            DeadlineStatus::Active => "Deadline active",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            DeadlineStatus::Passed => "deadline-status passed",
            DeadlineStatus::Active => "deadline-status active",
        }
    }
}

/// Display-ready projection of one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub index: usize,
    pub title: String,
    pub priority: Priority,
    pub category: Option<String>,
    pub due_label: Option<String>,
    pub deadline: Option<DeadlineStatus>,
    pub completed: bool,
}

impl TaskRow {
    /// The row's visible text as the list shows it, fields run together the
    /// way the DOM `textContent` of a row reads. Search matches against this.
    pub fn full_text(&self) -> String {
        let mut out = self.title.clone();
        if let Some(category) = &self.category {
            out.push_str(category);
        }
        if let Some(label) = &self.due_label {
            out.push_str(label);
        }
        if let Some(deadline) = self.deadline {
            out.push_str(" (");
            out.push_str(deadline.label());
            out.push(')');
        }
        out
    }

    pub fn css_class(&self) -> String {
        let mut class = format!("task-item {}-priority", self.priority);
        if self.completed {
            class.push_str(" checked");
        }
        class
    }
}

#[derive(Debug, Clone)]
pub struct Renderer {
    date_format: String,
}

impl Renderer {
    pub fn new(cfg: &AppConfig) -> Self {
        Self {
            date_format: cfg.date_display_format.clone(),
        }
    }

    /// Projects the whole list. Loaded and freshly added tasks go through the
    /// same path, so their rows always agree.
    #[tracing::instrument(skip(self, tasks), fields(count = tasks.len()))]
    pub fn render(&self, tasks: &[Task], today: NaiveDate) -> Vec<TaskRow> {
        tasks
            .iter()
            .enumerate()
            .map(|(index, task)| self.render_row(index, task, today))
            .collect()
    }

    pub fn render_row(&self, index: usize, task: &Task, today: NaiveDate) -> TaskRow {
        TaskRow {
            index,
            title: task.text.clone(),
            priority: task.priority,
            category: task.category.clone(),
            due_label: task.due_date.map(|due| self.format_date(due)),
            deadline: task
                .due_date
                .map(|due| DeadlineStatus::classify(due, today)),
            completed: task.completed,
        }
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        let mut out = String::new();
        if write!(out, "{}", date.format(&self.date_format)).is_err() {
            return date.format("%Y-%m-%d").to_string();
        }
        out
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}
