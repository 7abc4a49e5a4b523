use std::cell::RefCell;
use std::rc::Rc;

use chrono::{
  Local,
  NaiveDate
};
use gloo::console::log;
use gloo::timers::future::TimeoutFuture;
use tasklist_core::{
  AppConfig,
  DATE_INPUT_FORMAT,
  EntryDraft,
  ErrorBanner,
  Priority,
  Renderer,
  TaskError,
  TaskStore,
  UndoController,
  VoiceCapture,
  VoiceTarget,
  VoiceTranscript,
  compute_stats,
  visibility_mask
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  SubmitEvent,
  TargetCast,
  UseStateHandle,
  function_component,
  html,
  use_effect_with,
  use_mut_ref,
  use_state
};

use crate::components::{
  ErrorNotice,
  SearchBar,
  StatsBar,
  TaskEntryForm,
  TaskList
};
use crate::storage::LocalStorageSlot;
use crate::voice::{
  SpeechRecognizer,
  speech_supported
};

const CONFIG_TOML: &str =
  include_str!("../assets/tasklist.toml");
type SharedStore =
  Rc<RefCell<TaskStore<LocalStorageSlot>>>;
type SharedDraft = Rc<RefCell<EntryDraft>>;

#[function_component(App)]
pub fn app() -> Html {
  let config = use_state(load_config);
  let store: SharedStore = {
    let key = config.storage_key.clone();
    use_mut_ref(move || {
      TaskStore::load(
        LocalStorageSlot::new(key)
      )
    })
  };
  let undo =
    use_mut_ref(UndoController::new);
  let banner =
    use_mut_ref(ErrorBanner::new);
  let voice = use_mut_ref(|| {
    VoiceCapture::new(speech_supported())
  });
  let recognizer = use_mut_ref(|| {
    None::<SpeechRecognizer>
  });
  let refresh_tick =
    use_state(|| 0_u64);

  let draft: SharedDraft =
    use_mut_ref(|| EntryDraft::new(today()));
  let search = use_state(String::new);

  {
    let config = (*config).clone();
    let voice = voice.clone();
    let recognizer = recognizer.clone();
    let banner = banner.clone();
    let refresh_tick =
      refresh_tick.clone();
    let draft = draft.clone();
    let search = search.clone();
    use_effect_with((), move |_| {
      ui_debug(
        "app.mounted",
        "frontend mounted and hooks \
         initialized"
      );

      let created =
        if voice.borrow().is_available() {
          SpeechRecognizer::new(
            &config.voice_locale,
            voice_result_callback(
              voice.clone(),
              refresh_tick.clone(),
              draft,
              search
            ),
            voice_error_callback(
              voice.clone(),
              banner.clone(),
              refresh_tick.clone(),
              config.clone()
            ),
            voice_end_callback(
              voice.clone(),
              refresh_tick.clone()
            )
          )
        } else {
          None
        };

      match created {
        | Some(created) => {
          *recognizer.borrow_mut() =
            Some(created);
        }
        | None => {
          voice.borrow_mut().mark_unavailable();
          show_error(
            &banner,
            &refresh_tick,
            &config,
            &TaskError::VoiceCaptureUnavailable
          );
        }
      }
      || ()
    });
  }

  let on_text_input = {
    let draft = draft.clone();
    let refresh_tick =
      refresh_tick.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        draft.borrow_mut().text =
          input.value();
        bump(&refresh_tick);
      }
    )
  };

  let on_priority_change = {
    let draft = draft.clone();
    let refresh_tick =
      refresh_tick.clone();
    Callback::from(
      move |e: web_sys::Event| {
        if let Some(input) =
          e.target_dyn_into::<
            web_sys::HtmlSelectElement
          >()
        {
          match input
            .value()
            .parse::<Priority>()
          {
            | Ok(priority) => {
              draft.borrow_mut().priority =
                priority;
              bump(&refresh_tick);
            }
            | Err(error) => {
              tracing::warn!(
                %error,
                "ignoring priority change"
              )
            }
          }
        } else {
          tracing::warn!(
            "priority change event had \
             non-select target"
          );
        }
      }
    )
  };

  let on_due_input = {
    let draft = draft.clone();
    let refresh_tick =
      refresh_tick.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        draft.borrow_mut().due =
          input.value();
        bump(&refresh_tick);
      }
    )
  };

  let on_category_input = {
    let draft = draft.clone();
    let refresh_tick =
      refresh_tick.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        draft.borrow_mut().category =
          input.value();
        bump(&refresh_tick);
      }
    )
  };

  let on_submit = {
    let store = store.clone();
    let draft = draft.clone();
    let banner = banner.clone();
    let refresh_tick =
      refresh_tick.clone();
    let config = config.clone();
    Callback::from(
      move |e: SubmitEvent| {
        e.prevent_default();

        let submitted = draft
          .borrow_mut()
          .submit(&mut store.borrow_mut());
        match submitted {
          | Ok(index) => {
            banner.borrow_mut().clear();
            bump(&refresh_tick);
            ui_debug(
              "action.task.add",
              &format!("index={index}")
            );
          }
          | Err(error) => {
            show_error(
              &banner,
              &refresh_tick,
              &config,
              &error
            );
          }
        }
      }
    )
  };

  let on_toggle = {
    let store = store.clone();
    let refresh_tick =
      refresh_tick.clone();
    Callback::from(move |index: usize| {
      let toggled = store
        .borrow_mut()
        .toggle_completion(index);
      match toggled {
        | Ok(completed) => {
          ui_debug(
            "action.task.toggle",
            &format!(
              "index={index}, \
               completed={completed}"
            )
          );
          bump(&refresh_tick);
        }
        | Err(error) => {
          tracing::warn!(
            %error,
            "toggle ignored"
          );
        }
      }
    })
  };

  let on_delete = {
    let store = store.clone();
    let undo = undo.clone();
    let refresh_tick =
      refresh_tick.clone();
    let undo_window_ms =
      config.undo_window_ms;
    Callback::from(move |index: usize| {
      let deleted = {
        let mut store = store.borrow_mut();
        undo
          .borrow_mut()
          .delete(&mut *store, index)
      };
      let ticket = match deleted {
        | Ok(ticket) => ticket,
        | Err(error) => {
          tracing::warn!(
            %error,
            "delete ignored"
          );
          return;
        }
      };
      ui_debug(
        "action.task.delete",
        &format!("index={index}")
      );
      bump(&refresh_tick);

      let undo = undo.clone();
      let refresh_tick =
        refresh_tick.clone();
      wasm_bindgen_futures::spawn_local(
        async move {
          TimeoutFuture::new(
            undo_window_ms
          )
          .await;
          if undo
            .borrow_mut()
            .expire(ticket)
          {
            ui_debug(
              "action.task.undo_expired",
              "undo window closed"
            );
            bump(&refresh_tick);
          }
        }
      );
    })
  };

  let on_undo = {
    let store = store.clone();
    let undo = undo.clone();
    let refresh_tick =
      refresh_tick.clone();
    Callback::from(move |_: MouseEvent| {
      let restored = {
        let mut store = store.borrow_mut();
        undo.borrow_mut().undo(&mut *store)
      };
      if let Some(index) = restored {
        ui_debug(
          "action.task.undo",
          &format!("index={index}")
        );
        bump(&refresh_tick);
      }
    })
  };

  let on_search_input = {
    let search = search.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        search.set(input.value());
      }
    )
  };

  let start_voice = {
    let voice = voice.clone();
    let recognizer = recognizer.clone();
    let banner = banner.clone();
    let refresh_tick =
      refresh_tick.clone();
    let config = config.clone();
    Callback::from(
      move |target: VoiceTarget| {
        let previous =
          voice.borrow().listening();
        let started =
          voice.borrow_mut().start(target);
        if let Err(error) = started {
          show_error(
            &banner,
            &refresh_tick,
            &config,
            &error
          );
          return;
        }

        let launched = recognizer
          .borrow()
          .as_ref()
          .map(|recognizer| {
            recognizer.start()
          });
        match launched {
          | Some(Ok(())) => {
            ui_debug(
              "action.voice.start",
              &format!("{target:?}")
            );
          }
          | Some(Err(reason)) => {
            let error = voice
              .borrow_mut()
              .on_start_failed(
                previous, &reason
              );
            show_error(
              &banner,
              &refresh_tick,
              &config,
              &error
            );
          }
          | None => {
            voice
              .borrow_mut()
              .mark_unavailable();
            show_error(
              &banner,
              &refresh_tick,
              &config,
              &TaskError::VoiceCaptureUnavailable
            );
          }
        }
        bump(&refresh_tick);
      }
    )
  };

  let on_voice_task = {
    let start_voice = start_voice.clone();
    Callback::from(move |e: MouseEvent| {
      e.prevent_default();
      e.stop_propagation();
      start_voice
        .emit(VoiceTarget::TaskEntry);
    })
  };

  let on_voice_search = {
    let start_voice = start_voice.clone();
    Callback::from(move |e: MouseEvent| {
      e.prevent_default();
      e.stop_propagation();
      start_voice.emit(VoiceTarget::Search);
    })
  };

  let today = today();
  let renderer = Renderer::new(&config);
  let (rows, stats) = {
    let store = store.borrow();
    (
      renderer.render(store.tasks(), today),
      compute_stats(store.tasks())
    )
  };
  let visible =
    visibility_mask(&search, &rows);
  let undo_pending =
    undo.borrow().is_pending();
  let (notice, notice_fading) = banner
    .borrow()
    .current()
    .map(|message| {
      (Some(message.text.clone()), message.fading)
    })
    .unwrap_or((None, false));
  let form = draft.borrow().clone();
  let (voice_enabled, listening) = {
    let voice = voice.borrow();
    (voice.is_available(), voice.listening())
  };

  html! {
      <div class="container">
          <h1>{ "Task Manager" }</h1>
          <TaskEntryForm
              text={form.text}
              priority={form.priority}
              due={form.due}
              min_due={today.format(DATE_INPUT_FORMAT).to_string()}
              category={form.category}
              on_text_input={on_text_input}
              on_priority_change={on_priority_change}
              on_due_input={on_due_input}
              on_category_input={on_category_input}
              on_submit={on_submit}
              voice_enabled={voice_enabled}
              listening={listening == Some(VoiceTarget::TaskEntry)}
              on_voice={on_voice_task}
          />
          <SearchBar
              value={(*search).clone()}
              on_input={on_search_input}
              voice_enabled={voice_enabled}
              listening={listening == Some(VoiceTarget::Search)}
              on_voice={on_voice_search}
          />
          <StatsBar stats={stats} />
          <div class="undo-section">
              <button
                  id="undo-btn"
                  class="btn undo-btn"
                  disabled={!undo_pending}
                  onclick={on_undo}
              >
                  { "Undo Delete" }
              </button>
          </div>
          <TaskList
              rows={rows}
              visible={visible}
              on_toggle={on_toggle}
              on_delete={on_delete}
          />
          <ErrorNotice message={notice} fading={notice_fading} />
      </div>
  }
}

fn voice_result_callback(
  voice: Rc<RefCell<VoiceCapture>>,
  refresh_tick: UseStateHandle<u64>,
  draft: SharedDraft,
  search: UseStateHandle<String>
) -> Callback<String> {
  Callback::from(move |raw: String| {
    let transcript =
      voice.borrow_mut().on_result(&raw);
    match transcript {
      | Some(VoiceTranscript {
        target: VoiceTarget::TaskEntry,
        text
      }) => draft.borrow_mut().text = text,
      | Some(VoiceTranscript {
        target: VoiceTarget::Search,
        text
      }) => search.set(text),
      | None => {
        tracing::debug!(
          "speech result with no \
           active capture"
        )
      }
    }
    bump(&refresh_tick);
  })
}

fn voice_error_callback(
  voice: Rc<RefCell<VoiceCapture>>,
  banner: Rc<RefCell<ErrorBanner>>,
  refresh_tick: UseStateHandle<u64>,
  config: AppConfig
) -> Callback<String> {
  Callback::from(move |reason: String| {
    let error =
      voice.borrow_mut().on_error(&reason);
    show_error(
      &banner,
      &refresh_tick,
      &config,
      &error
    );
  })
}

fn voice_end_callback(
  voice: Rc<RefCell<VoiceCapture>>,
  refresh_tick: UseStateHandle<u64>
) -> Callback<()> {
  Callback::from(move |()| {
    voice.borrow_mut().on_end();
    bump(&refresh_tick);
  })
}

/// Shows `error` in the banner and schedules its fade and removal. Timers
/// left over from an earlier message do nothing once it has been replaced.
fn show_error(
  banner: &Rc<RefCell<ErrorBanner>>,
  refresh_tick: &UseStateHandle<u64>,
  config: &AppConfig,
  error: &TaskError
) {
  let ticket =
    banner.borrow_mut().show(error.to_string());
  bump(refresh_tick);
  ui_debug(
    "banner.show",
    &error.to_string()
  );

  let banner = banner.clone();
  let refresh_tick = refresh_tick.clone();
  let display_ms = config.error_display_ms;
  let fade_ms = config.error_fade_ms;
  wasm_bindgen_futures::spawn_local(
    async move {
      TimeoutFuture::new(display_ms).await;
      if !banner.borrow_mut().begin_fade(ticket)
      {
        return;
      }
      bump(&refresh_tick);

      TimeoutFuture::new(fade_ms).await;
      if banner.borrow_mut().dismiss(ticket) {
        bump(&refresh_tick);
      }
    }
  );
}

fn bump(
  refresh_tick: &UseStateHandle<u64>
) {
  refresh_tick
    .set((**refresh_tick).wrapping_add(1));
}

fn load_config() -> AppConfig {
  AppConfig::load_or_default(
    CONFIG_TOML
  )
}

fn today() -> NaiveDate {
  Local::now().date_naive()
}

fn ui_debug(
  event: &str,
  detail: &str
) {
  tracing::debug!(
    event, detail, "ui-debug"
  );
  log!(format!(
    "[ui-debug] {event}: {detail}"
  ));
}
