use tasklist_core::Priority;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  SubmitEvent,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskEntryFormProps {
  pub text:               String,
  pub priority:           Priority,
  pub due:                String,
  pub min_due:            String,
  pub category:           String,
  pub on_text_input:
    Callback<web_sys::InputEvent>,
  pub on_priority_change:
    Callback<web_sys::Event>,
  pub on_due_input:
    Callback<web_sys::InputEvent>,
  pub on_category_input:
    Callback<web_sys::InputEvent>,
  pub on_submit:          Callback<SubmitEvent>,
  pub voice_enabled:      bool,
  pub listening:          bool,
  pub on_voice:           Callback<MouseEvent>
}

#[function_component(TaskEntryForm)]
pub fn task_entry_form(
  props: &TaskEntryFormProps
) -> Html {
  html! {
      <form class="task-input-section" onsubmit={props.on_submit.clone()}>
          <div class="field">
              <input
                  id="task-input"
                  type="text"
                  placeholder="Add a new task..."
                  value={props.text.clone()}
                  oninput={props.on_text_input.clone()}
              />
              {
                  if props.voice_enabled {
                      html! {
                          <button
                              id="speech-input-btn"
                              type="button"
                              class={if props.listening { "speech-btn listening" } else { "speech-btn" }}
                              title="Dictate task"
                              onclick={props.on_voice.clone()}
                          >
                              { "🎤" }
                          </button>
                      }
                  } else {
                      html! {}
                  }
              }
          </div>
          <div class="field">
              <select id="priority-select" onchange={props.on_priority_change.clone()}>
                  {
                      for Priority::ALL.iter().map(|priority| html! {
                          <option
                              value={priority.as_str()}
                              selected={*priority == props.priority}
                          >
                              { format!("{} Priority", priority.label()) }
                          </option>
                      })
                  }
              </select>
              <input
                  id="due-date"
                  type="date"
                  min={props.min_due.clone()}
                  value={props.due.clone()}
                  oninput={props.on_due_input.clone()}
              />
              <input
                  id="category-input"
                  type="text"
                  placeholder="Category (optional)"
                  value={props.category.clone()}
                  oninput={props.on_category_input.clone()}
              />
          </div>
          <button id="add-task-btn" type="submit" class="btn">{ "Add Task" }</button>
      </form>
  }
}
