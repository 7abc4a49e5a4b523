use js_sys::{
  Array,
  Function,
  Reflect
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{
  JsCast,
  JsValue
};
use yew::Callback;

const RECOGNIZER_CONSTRUCTORS: [&str; 2] = [
  "SpeechRecognition",
  "webkitSpeechRecognition"
];

/// Browser speech recognition, single shot with no interim results. The
/// closures stay alive as long as this value does.
pub struct SpeechRecognizer {
  recognition: JsValue,
  _on_result:  Closure<dyn FnMut(JsValue)>,
  _on_error:   Closure<dyn FnMut(JsValue)>,
  _on_end:     Closure<dyn FnMut(JsValue)>
}

impl SpeechRecognizer {
  /// Returns `None` when the browser has no recognizer.
  pub fn new(
    locale: &str,
    on_result: Callback<String>,
    on_error: Callback<String>,
    on_end: Callback<()>
  ) -> Option<Self> {
    let constructor =
      recognizer_constructor()?;
    let recognition =
      Reflect::construct(
        &constructor,
        &Array::new()
      )
      .map_err(|error| {
        tracing::warn!(
          ?error,
          "failed constructing speech \
           recognizer"
        );
      })
      .ok()?;

    set_property(
      &recognition,
      "continuous",
      &JsValue::FALSE
    );
    set_property(
      &recognition,
      "interimResults",
      &JsValue::FALSE
    );
    set_property(
      &recognition,
      "lang",
      &JsValue::from_str(locale)
    );

    let on_result = Closure::<
      dyn FnMut(JsValue)
    >::new(
      move |event: JsValue| {
        match transcript_from_event(
          &event
        ) {
          | Some(transcript) => {
            on_result.emit(transcript)
          }
          | None => {
            tracing::warn!(
              "speech result had no \
               transcript"
            )
          }
        }
      }
    );
    let on_error = Closure::<
      dyn FnMut(JsValue)
    >::new(
      move |event: JsValue| {
        let reason = Reflect::get(
          &event,
          &JsValue::from_str("error")
        )
        .ok()
        .and_then(|value| {
          value.as_string()
        })
        .unwrap_or_else(|| {
          "unknown".to_string()
        });
        on_error.emit(reason);
      }
    );
    let on_end = Closure::<
      dyn FnMut(JsValue)
    >::new(
      move |_event: JsValue| {
        on_end.emit(());
      }
    );

    set_property(
      &recognition,
      "onresult",
      on_result.as_ref()
    );
    set_property(
      &recognition,
      "onerror",
      on_error.as_ref()
    );
    set_property(
      &recognition,
      "onend",
      on_end.as_ref()
    );

    Some(Self {
      recognition,
      _on_result: on_result,
      _on_error: on_error,
      _on_end: on_end
    })
  }

  pub fn start(
    &self
  ) -> Result<(), String> {
    let start = Reflect::get(
      &self.recognition,
      &JsValue::from_str("start")
    )
    .ok()
    .and_then(|value| {
      value.dyn_into::<Function>().ok()
    })
    .ok_or_else(|| {
      "recognizer has no start method"
        .to_string()
    })?;

    start
      .call0(&self.recognition)
      .map(|_| ())
      .map_err(|error| js_error_message(&error))
  }
}

pub fn speech_supported() -> bool {
  recognizer_constructor().is_some()
}

fn recognizer_constructor()
-> Option<Function> {
  let window = web_sys::window()?;
  RECOGNIZER_CONSTRUCTORS
    .iter()
    .find_map(|name| {
      Reflect::get(
        &window,
        &JsValue::from_str(name)
      )
      .ok()
      .and_then(|value| {
        value
          .dyn_into::<Function>()
          .ok()
      })
    })
}

// event.results[0][0].transcript
fn transcript_from_event(
  event: &JsValue
) -> Option<String> {
  let results = Reflect::get(
    event,
    &JsValue::from_str("results")
  )
  .ok()?;
  let first =
    Reflect::get_u32(&results, 0).ok()?;
  let alternative =
    Reflect::get_u32(&first, 0).ok()?;
  Reflect::get(
    &alternative,
    &JsValue::from_str("transcript")
  )
  .ok()?
  .as_string()
}

fn set_property(
  target: &JsValue,
  key: &str,
  value: &JsValue
) {
  if let Err(error) = Reflect::set(
    target,
    &JsValue::from_str(key),
    value
  ) {
    tracing::warn!(
      key,
      ?error,
      "failed setting recognizer \
       property"
    );
  }
}

fn js_error_message(
  error: &JsValue
) -> String {
  Reflect::get(
    error,
    &JsValue::from_str("message")
  )
  .ok()
  .and_then(|value| value.as_string())
  .or_else(|| error.as_string())
  .unwrap_or_else(|| {
    format!("{error:?}")
  })
}
