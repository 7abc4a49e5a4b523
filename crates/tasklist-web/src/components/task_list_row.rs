use tasklist_core::TaskRow;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskListRowProps {
  pub row:       TaskRow,
  pub visible:   bool,
  pub on_toggle: Callback<usize>,
  pub on_delete: Callback<usize>
}

#[function_component(TaskListRow)]
pub fn task_list_row(
  props: &TaskListRowProps
) -> Html {
  let index = props.row.index;
  let on_toggle =
    props.on_toggle.clone();
  let on_delete =
    props.on_delete.clone();
  let style = if props.visible {
    "display:flex;"
  } else {
    "display:none;"
  };

  html! {
      <li class={props.row.css_class()} style={style} onclick={move |_| on_toggle.emit(index)}>
          <div class="task-content">
              <span class="task-title">{ &props.row.title }</span>
              <div class="task-meta">
                  {
                      if let Some(category) = &props.row.category {
                          html! { <span class="task-category">{ category }</span> }
                      } else {
                          html! {}
                      }
                  }
                  {
                      if let Some(label) = &props.row.due_label {
                          html! { <span class="task-date">{ label }</span> }
                      } else {
                          html! {}
                      }
                  }
                  {
                      if let Some(deadline) = props.row.deadline {
                          html! {
                              <span class={deadline.css_class()}>{ format!(" ({})", deadline.label()) }</span>
                          }
                      } else {
                          html! {}
                      }
                  }
              </div>
          </div>
          <button
              class="delete-btn"
              title="Delete task"
              onclick={move |e: yew::MouseEvent| {
                  e.stop_propagation();
                  on_delete.emit(index);
              }}
          >
              { "×" }
          </button>
      </li>
  }
}
