use anyhow::Context;
use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::error::TaskError;
use crate::slot::KeyValueSlot;
use crate::task::{Priority, Task};

/// A task taken out of the list together with the index it occupied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedTask {
    pub task: Task,
    pub original_index: usize,
}

/// Ordered task list with write-through persistence. Every mutation writes
/// a full snapshot to the slot.
#[derive(Debug)]
pub struct TaskStore<S> {
    tasks: Vec<Task>,
    slot: S,
}

impl<S: KeyValueSlot> TaskStore<S> {
    /// Loads whatever the slot holds. Missing or unreadable data yields an
    /// empty list.
    #[tracing::instrument(skip(slot))]
    pub fn load(slot: S) -> Self {
        let tasks = match slot.read() {
            Ok(Some(blob)) => deserialize(&blob),
            Ok(None) => {
                debug!("no saved tasks");
                Vec::new()
            }
            Err(error) => {
                warn!(%error, "failed reading saved tasks; starting empty");
                Vec::new()
            }
        };
        info!(count = tasks.len(), "loaded task store");
        Self { tasks, slot }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    #[tracing::instrument(skip(self, text, category))]
    pub fn add_task(
        &mut self,
        text: &str,
        priority: Priority,
        due_date: Option<NaiveDate>,
        category: Option<&str>,
    ) -> Result<&Task, TaskError> {
        let task = Task::from_input(text, priority, due_date, category)
            .ok_or(TaskError::EmptyTaskText)?;
        self.tasks.push(task);
        self.persist();

        let index = self.tasks.len() - 1;
        debug!(index, "added task");
        Ok(&self.tasks[index])
    }

    #[tracing::instrument(skip(self))]
    pub fn toggle_completion(&mut self, index: usize) -> Result<bool, TaskError> {
        let task = self
            .tasks
            .get_mut(index)
            .ok_or(TaskError::TaskNotFound(index))?;
        let completed = task.toggle();
        self.persist();
        debug!(completed, "toggled task");
        Ok(completed)
    }

    #[tracing::instrument(skip(self))]
    pub fn remove_task(&mut self, index: usize) -> Result<RemovedTask, TaskError> {
        if index >= self.tasks.len() {
            return Err(TaskError::TaskNotFound(index));
        }
        let task = self.tasks.remove(index);
        self.persist();
        debug!(remaining = self.tasks.len(), "removed task");
        Ok(RemovedTask {
            task,
            original_index: index,
        })
    }

    /// Reinserts at the original index, or at the end when the list has
    /// since shrunk below it. Returns the index used.
    #[tracing::instrument(skip(self, removed), fields(original_index = removed.original_index))]
    pub fn restore_task(&mut self, removed: RemovedTask) -> usize {
        let index = removed.original_index.min(self.tasks.len());
        self.tasks.insert(index, removed.task);
        self.persist();
        debug!(index, "restored task");
        index
    }

    fn persist(&mut self) {
        let written = serialize(&self.tasks).and_then(|blob| self.slot.write(&blob));
        if let Err(error) = written {
            warn!(
                error = %format!("{error:#}"),
                count = self.tasks.len(),
                "failed to persist tasks"
            );
        }
    }
}

pub fn serialize(tasks: &[Task]) -> anyhow::Result<String> {
    serde_json::to_string(tasks).context("failed to serialize tasks")
}

/// Parses a saved blob. Anything malformed is treated as "no saved tasks".
pub fn deserialize(blob: &str) -> Vec<Task> {
    if blob.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Vec<Task>>(blob) {
        Ok(tasks) => tasks,
        Err(error) => {
            warn!(%error, "saved tasks were malformed; starting empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{TaskStore, deserialize, serialize};
    use crate::error::TaskError;
    use crate::slot::MemorySlot;
    use crate::task::{Priority, Task};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn store_with(texts: &[&str]) -> TaskStore<MemorySlot> {
        let mut store = TaskStore::load(MemorySlot::new());
        for text in texts {
            store
                .add_task(text, Priority::Medium, None, None)
                .expect("add task");
        }
        store
    }

    fn texts(store: &TaskStore<MemorySlot>) -> Vec<&str> {
        store.tasks().iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn add_appends_and_persists() {
        let mut store = TaskStore::load(MemorySlot::new());
        store
            .add_task("Buy milk", Priority::Low, None, Some("home"))
            .expect("add");
        store
            .add_task("Walk dog", Priority::High, Some(date(2026, 10, 20)), None)
            .expect("add");

        assert_eq!(texts(&store), vec!["Buy milk", "Walk dog"]);
        let saved = deserialize(&store.slot().contents().expect("written"));
        assert_eq!(saved, store.tasks());
    }

    #[test]
    fn blank_text_is_rejected_without_touching_slot() {
        let slot = MemorySlot::new();
        let mut store = TaskStore::load(slot.clone());
        assert_eq!(
            store.add_task("", Priority::Medium, None, None).map(|_| ()),
            Err(TaskError::EmptyTaskText)
        );
        assert_eq!(
            store.add_task("   ", Priority::Medium, None, None).map(|_| ()),
            Err(TaskError::EmptyTaskText)
        );
        assert!(store.is_empty());
        assert_eq!(slot.contents(), None);
    }

    #[test]
    fn toggle_twice_is_noop() {
        let mut store = store_with(&["a"]);
        assert_eq!(store.toggle_completion(0), Ok(true));
        assert_eq!(store.toggle_completion(0), Ok(false));
        assert!(!store.tasks()[0].completed);
        assert_eq!(store.toggle_completion(5), Err(TaskError::TaskNotFound(5)));
    }

    #[test]
    fn restore_returns_task_to_original_index() {
        let mut store = store_with(&["a", "b", "c"]);
        let removed = store.remove_task(1).expect("remove");
        assert_eq!(removed.original_index, 1);
        assert_eq!(texts(&store), vec!["a", "c"]);

        assert_eq!(store.restore_task(removed), 1);
        assert_eq!(texts(&store), vec!["a", "b", "c"]);
    }

    #[test]
    fn restore_past_end_appends() {
        let mut store = store_with(&["a", "b", "c"]);
        let removed = store.remove_task(2).expect("remove");
        store.remove_task(0).expect("remove");
        store.remove_task(0).expect("remove");

        assert_eq!(store.restore_task(removed), 0);
        assert_eq!(texts(&store), vec!["c"]);
    }

    #[test]
    fn remove_out_of_range_fails() {
        let mut store = store_with(&["a"]);
        assert_eq!(store.remove_task(1), Err(TaskError::TaskNotFound(1)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn serialize_round_trips_every_field() {
        let tasks = vec![
            Task {
                text: "Pay rent".to_string(),
                priority: Priority::High,
                due_date: Some(date(2026, 11, 1)),
                category: Some("bills".to_string()),
                completed: true,
            },
            Task {
                text: "Call mom".to_string(),
                priority: Priority::Low,
                due_date: None,
                category: None,
                completed: false,
            },
        ];
        assert_eq!(deserialize(&serialize(&tasks).expect("serialize")), tasks);
    }

    #[test]
    fn persisted_layout_uses_camel_case_keys() {
        let tasks = vec![Task {
            text: "Pay rent".to_string(),
            priority: Priority::High,
            due_date: Some(date(2026, 11, 1)),
            category: None,
            completed: false,
        }];
        let blob = serialize(&tasks).expect("serialize");
        assert!(blob.contains(r#""dueDate":"2026-11-01""#));
        assert!(blob.contains(r#""priority":"high""#));
    }

    #[test]
    fn corrupt_or_missing_blob_loads_empty() {
        assert!(deserialize("").is_empty());
        assert!(deserialize("<li class=\"task-item\">").is_empty());
        assert!(deserialize(r#"{"text":"not a list"}"#).is_empty());

        let store = TaskStore::load(MemorySlot::with_blob("{{{"));
        assert!(store.is_empty());
    }
}
