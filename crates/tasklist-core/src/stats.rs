use crate::task::Task;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

/// Always derived from the current list; there are no stored counters.
pub fn compute_stats(tasks: &[Task]) -> Stats {
    let total = tasks.len();
    let completed = tasks.iter().filter(|task| task.completed).count();
    Stats {
        total,
        completed,
        pending: total - completed,
    }
}

#[cfg(test)]
mod tests {
    use super::{Stats, compute_stats};
    use crate::task::{Priority, Task};

    #[test]
    fn counts_completed_and_pending() {
        let mut tasks: Vec<Task> = ["a", "b", "c"]
            .iter()
            .filter_map(|text| Task::from_input(text, Priority::Medium, None, None))
            .collect();
        assert_eq!(compute_stats(&[]), Stats::default());

        tasks[1].completed = true;
        assert_eq!(
            compute_stats(&tasks),
            Stats {
                total: 3,
                completed: 1,
                pending: 2
            }
        );
    }
}
