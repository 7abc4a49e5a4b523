mod app;
mod components;
mod storage;
mod voice;

fn main() {
  console_error_panic_hook::set_once();
  wasm_tracing::set_as_global_default();

  let Some(document) = web_sys::window()
    .and_then(|window| {
      window.document()
    })
  else {
    tracing::error!(
      "no document; tasklist not mounted"
    );
    return;
  };

  match document.get_element_by_id("app")
  {
    | Some(root) => {
      tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "mounting tasklist on #app"
      );
      yew::Renderer::<app::App>::with_root(
        root
      )
      .render();
    }
    | None => {
      tracing::warn!(
        "#app missing, mounting tasklist on body"
      );
      yew::Renderer::<app::App>::new()
        .render();
    }
  }
}
