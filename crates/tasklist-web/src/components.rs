mod error_notice;
mod search_bar;
mod stats_bar;
mod task_entry_form;
mod task_list;
mod task_list_row;

pub use error_notice::ErrorNotice;
pub use search_bar::SearchBar;
pub use stats_bar::StatsBar;
pub use task_entry_form::TaskEntryForm;
pub use task_list::TaskList;
pub use task_list_row::TaskListRow;
