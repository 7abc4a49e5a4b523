use tracing::{debug, info};

use crate::error::TaskError;
use crate::slot::KeyValueSlot;
use crate::store::{RemovedTask, TaskStore};
use crate::task::Task;

/// Handed to the expiry timer scheduled by a deletion. Only the ticket of
/// the current pending deletion can expire it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryTicket(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoState {
    Idle,
    PendingUndo {
        removed: RemovedTask,
        ticket: ExpiryTicket,
    },
}

/// Single-level undo for deletions. One per session, starts `Idle`.
#[derive(Debug)]
pub struct UndoController {
    state: UndoState,
    generation: u64,
}

impl Default for UndoController {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoController {
    pub fn new() -> Self {
        Self {
            state: UndoState::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> &UndoState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, UndoState::PendingUndo { .. })
    }

    pub fn pending_task(&self) -> Option<&Task> {
        match &self.state {
            UndoState::PendingUndo { removed, .. } => Some(&removed.task),
            UndoState::Idle => None,
        }
    }

    /// Removes the task and holds it for undo. A deletion that was already
    /// pending is dropped for good.
    #[tracing::instrument(skip(self, store))]
    pub fn delete<S: KeyValueSlot>(
        &mut self,
        store: &mut TaskStore<S>,
        index: usize,
    ) -> Result<ExpiryTicket, TaskError> {
        let removed = store.remove_task(index)?;
        self.generation = self.generation.wrapping_add(1);
        let ticket = ExpiryTicket(self.generation);

        if let UndoState::PendingUndo { removed: dropped, .. } = &self.state {
            info!(text = %dropped.task.text, "superseded pending deletion");
        }
        self.state = UndoState::PendingUndo { removed, ticket };
        Ok(ticket)
    }

    /// Restores the pending deletion. Returns the index it went back to, or
    /// `None` when there was nothing to undo.
    #[tracing::instrument(skip(self, store))]
    pub fn undo<S: KeyValueSlot>(&mut self, store: &mut TaskStore<S>) -> Option<usize> {
        match std::mem::replace(&mut self.state, UndoState::Idle) {
            UndoState::PendingUndo { removed, .. } => Some(store.restore_task(removed)),
            UndoState::Idle => {
                debug!("undo requested with nothing pending");
                None
            }
        }
    }

    /// Called when the undo window closes. Stale tickets are ignored.
    #[tracing::instrument(skip(self))]
    pub fn expire(&mut self, ticket: ExpiryTicket) -> bool {
        let current = matches!(
            &self.state,
            UndoState::PendingUndo { ticket: pending, .. } if *pending == ticket
        );
        if !current {
            return false;
        }
        if let UndoState::PendingUndo { removed, .. } =
            std::mem::replace(&mut self.state, UndoState::Idle)
        {
            debug!(text = %removed.task.text, "undo window closed");
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{UndoController, UndoState};
    use crate::slot::MemorySlot;
    use crate::stats::compute_stats;
    use crate::store::TaskStore;
    use crate::task::Priority;

    fn store_with(texts: &[&str]) -> TaskStore<MemorySlot> {
        let mut store = TaskStore::load(MemorySlot::new());
        for text in texts {
            store
                .add_task(text, Priority::Medium, None, None)
                .expect("add task");
        }
        store
    }

    fn texts(store: &TaskStore<MemorySlot>) -> Vec<String> {
        store.tasks().iter().map(|t| t.text.clone()).collect()
    }

    #[test]
    fn undo_within_window_restores_position_and_stats() {
        let mut store = store_with(&["a", "b", "c"]);
        store.toggle_completion(1).expect("toggle");
        let before = compute_stats(store.tasks());

        let mut undo = UndoController::new();
        undo.delete(&mut store, 1).expect("delete");
        assert!(undo.is_pending());
        assert_eq!(texts(&store), vec!["a", "c"]);

        assert_eq!(undo.undo(&mut store), Some(1));
        assert!(!undo.is_pending());
        assert_eq!(texts(&store), vec!["a", "b", "c"]);
        assert_eq!(compute_stats(store.tasks()), before);
    }

    #[test]
    fn expired_deletion_cannot_be_undone() {
        let mut store = store_with(&["a", "b"]);
        let mut undo = UndoController::new();
        let ticket = undo.delete(&mut store, 0).expect("delete");
        assert!(matches!(
            undo.state(),
            UndoState::PendingUndo { removed, ticket: held }
                if *held == ticket && removed.original_index == 0
        ));

        assert!(undo.expire(ticket));
        assert!(matches!(undo.state(), UndoState::Idle));
        assert_eq!(undo.undo(&mut store), None);
        assert_eq!(texts(&store), vec!["b"]);
    }

    #[test]
    fn second_delete_supersedes_first() {
        let mut store = store_with(&["a", "b", "c"]);
        let mut undo = UndoController::new();
        let first = undo.delete(&mut store, 0).expect("delete");
        let second = undo.delete(&mut store, 0).expect("delete");

        assert_eq!(undo.pending_task().map(|t| t.text.as_str()), Some("b"));
        // The first timer firing late must not clear the newer deletion.
        assert!(!undo.expire(first));
        assert!(undo.is_pending());

        assert_eq!(undo.undo(&mut store), Some(0));
        assert_eq!(texts(&store), vec!["b", "c"]);
        assert!(!undo.expire(second));
    }

    #[test]
    fn timer_after_undo_is_ignored() {
        let mut store = store_with(&["a"]);
        let mut undo = UndoController::new();
        let ticket = undo.delete(&mut store, 0).expect("delete");
        undo.undo(&mut store);
        assert!(!undo.expire(ticket));
        assert_eq!(texts(&store), vec!["a"]);
    }

    #[test]
    fn delete_of_missing_index_keeps_state() {
        let mut store = store_with(&["a"]);
        let mut undo = UndoController::new();
        assert!(undo.delete(&mut store, 4).is_err());
        assert!(!undo.is_pending());
    }
}
