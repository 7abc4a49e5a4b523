use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct ErrorNoticeProps {
  pub message: Option<String>,
  #[prop_or_default]
  pub fading:  bool
}

#[function_component(ErrorNotice)]
pub fn error_notice(
  props: &ErrorNoticeProps
) -> Html {
  let Some(message) = &props.message
  else {
    return html! {};
  };
  let class = if props.fading {
    "error-message fading"
  } else {
    "error-message"
  };

  html! {
      <div class={class} role="alert">
          <span>{ message }</span>
      </div>
  }
}
