use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct SearchBarProps {
  pub value:         String,
  pub on_input:
    Callback<web_sys::InputEvent>,
  pub voice_enabled: bool,
  pub listening:     bool,
  pub on_voice:      Callback<MouseEvent>
}

#[function_component(SearchBar)]
pub fn search_bar(
  props: &SearchBarProps
) -> Html {
  html! {
      <div class="search-section">
          <input
              id="search-input"
              type="search"
              placeholder="Search tasks..."
              value={props.value.clone()}
              oninput={props.on_input.clone()}
          />
          {
              if props.voice_enabled {
                  html! {
                      <button
                          id="speech-search-btn"
                          type="button"
                          class={if props.listening { "speech-btn listening" } else { "speech-btn" }}
                          title="Search by voice"
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
  }
}
