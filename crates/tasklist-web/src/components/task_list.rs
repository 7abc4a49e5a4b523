use tasklist_core::TaskRow;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::TaskListRow;

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub rows:      Vec<TaskRow>,
  pub visible:   Vec<bool>,
  pub on_toggle: Callback<usize>,
  pub on_delete: Callback<usize>
}

#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  html! {
      <ul id="task-list" class="task-list">
          {
              for props.rows.iter().cloned().map(|row| {
                  let visible = props.visible.get(row.index).copied().unwrap_or(true);
                  html! {
                      <TaskListRow
                          row={row}
                          visible={visible}
                          on_toggle={props.on_toggle.clone()}
                          on_delete={props.on_delete.clone()}
                      />
                  }
              })
          }
      </ul>
  }
}
