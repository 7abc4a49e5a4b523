use crate::render::TaskRow;

/// Case-insensitive substring match against the row's visible text. An
/// empty query matches everything.
pub fn is_visible(query: &str, row: &TaskRow) -> bool {
    if query.is_empty() {
        return true;
    }
    row.full_text()
        .to_lowercase()
        .contains(&query.to_lowercase())
}

pub fn visibility_mask(query: &str, rows: &[TaskRow]) -> Vec<bool> {
    rows.iter().map(|row| is_visible(query, row)).collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::visibility_mask;
    use crate::render::{Renderer, TaskRow};
    use crate::task::{Priority, Task};

    fn rows(texts: &[(&str, Option<&str>)]) -> Vec<TaskRow> {
        let tasks: Vec<Task> = texts
            .iter()
            .filter_map(|(text, category)| {
                Task::from_input(text, Priority::Medium, None, *category)
            })
            .collect();
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date");
        Renderer::default().render(&tasks, today)
    }

    #[test]
    fn substring_match_ignores_case() {
        let rows = rows(&[("Buy milk", None), ("Walk dog", None)]);
        assert_eq!(visibility_mask("a", &rows), vec![false, true]);
        assert_eq!(visibility_mask("MILK", &rows), vec![true, false]);
        assert_eq!(visibility_mask("zzz", &rows), vec![false, false]);
    }

    #[test]
    fn empty_query_shows_everything() {
        let rows = rows(&[("Buy milk", None), ("Walk dog", None)]);
        assert_eq!(visibility_mask("", &rows), vec![true, true]);
    }

    #[test]
    fn category_text_is_searchable() {
        let rows = rows(&[("Buy milk", Some("Groceries")), ("Walk dog", None)]);
        assert_eq!(visibility_mask("grocer", &rows), vec![true, false]);
    }

    #[test]
    fn query_may_span_adjacent_fields() {
        let rows = rows(&[("Buy milk", Some("Errands")), ("Walk dog", None)]);
        assert_eq!(visibility_mask("milkerr", &rows), vec![true, false]);
        assert_eq!(visibility_mask("milk err", &rows), vec![false, false]);
    }
}
