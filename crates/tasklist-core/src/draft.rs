use chrono::NaiveDate;
use tracing::debug;

use crate::error::TaskError;
use crate::slot::KeyValueSlot;
use crate::store::TaskStore;
use crate::task::Priority;

/// `<input type="date">` value format.
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Field values of the entry form, held between keystrokes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub text: String,
    pub priority: Priority,
    pub due: String,
    pub category: String,
}

impl EntryDraft {
    /// A fresh form: medium priority, due date prefilled with today.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            text: String::new(),
            priority: Priority::default(),
            due: today.format(DATE_INPUT_FORMAT).to_string(),
            category: String::new(),
        }
    }

    /// Blank or unparseable input means no due date.
    pub fn due_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.due.trim(), DATE_INPUT_FORMAT).ok()
    }

    /// Adds the drafted task and resets the form. On error nothing is
    /// cleared, so the user can fix the input.
    pub fn submit<S: KeyValueSlot>(
        &mut self,
        store: &mut TaskStore<S>,
    ) -> Result<usize, TaskError> {
        store.add_task(
            &self.text,
            self.priority,
            self.due_date(),
            Some(self.category.as_str()),
        )?;
        self.reset();
        debug!(count = store.len(), "draft submitted");
        Ok(store.len() - 1)
    }

    /// Post-add state. The due date is left empty, not set back to today.
    pub fn reset(&mut self) {
        self.text.clear();
        self.category.clear();
        self.due.clear();
        self.priority = Priority::Medium;
    }
}
