use anyhow::Context;
use chrono::format::{
  Item,
  StrftimeItems
};
use serde::{
  Deserialize,
  Serialize
};
use tracing::{
  debug,
  info,
  warn
};

pub const DEFAULT_STORAGE_KEY: &str =
  "tasks";
pub const DEFAULT_UNDO_WINDOW_MS: u32 =
  7_000;
pub const DEFAULT_ERROR_DISPLAY_MS: u32 =
  3_000;
pub const DEFAULT_ERROR_FADE_MS: u32 =
  300;
pub const DEFAULT_VOICE_LOCALE: &str =
  "en-US";
pub const DEFAULT_DATE_DISPLAY_FORMAT:
  &str = "%-m/%-d/%Y";

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(default)]
pub struct AppConfig {
  pub storage_key:         String,
  pub undo_window_ms:      u32,
  pub error_display_ms:    u32,
  pub error_fade_ms:       u32,
  pub voice_locale:        String,
  pub date_display_format: String
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      storage_key:         DEFAULT_STORAGE_KEY
        .to_string(),
      undo_window_ms:
        DEFAULT_UNDO_WINDOW_MS,
      error_display_ms:
        DEFAULT_ERROR_DISPLAY_MS,
      error_fade_ms:
        DEFAULT_ERROR_FADE_MS,
      voice_locale:        DEFAULT_VOICE_LOCALE
        .to_string(),
      date_display_format:
        DEFAULT_DATE_DISPLAY_FORMAT
          .to_string()
    }
  }
}

impl AppConfig {
  pub fn parse(
    raw: &str
  ) -> anyhow::Result<Self> {
    let mut cfg =
      toml::from_str::<AppConfig>(raw)
        .context(
          "failed parsing tasklist \
           config"
        )?;
    cfg.sanitize();
    Ok(cfg)
  }

  /// Parses embedded config text, falling back to defaults on any error.
  #[tracing::instrument(skip(raw))]
  pub fn load_or_default(
    raw: &str
  ) -> Self {
    match Self::parse(raw) {
      | Ok(cfg) => {
        info!(
          storage_key = %cfg.storage_key,
          undo_window_ms = cfg.undo_window_ms,
          error_display_ms = cfg.error_display_ms,
          "loaded tasklist config"
        );
        cfg
      }
      | Err(error) => {
        warn!(
          error = %format!("{error:#}"),
          "invalid tasklist config; \
           using defaults"
        );
        Self::default()
      }
    }
  }

  fn sanitize(&mut self) {
    let defaults = Self::default();

    if self.storage_key.trim().is_empty()
    {
      warn!(
        "empty storage_key; using \
         default"
      );
      self.storage_key =
        defaults.storage_key;
    }
    if self.undo_window_ms == 0 {
      self.undo_window_ms =
        defaults.undo_window_ms;
    }
    if self.error_display_ms == 0 {
      self.error_display_ms =
        defaults.error_display_ms;
    }
    if self.voice_locale.trim().is_empty()
    {
      self.voice_locale =
        defaults.voice_locale;
    }
    if !is_valid_date_format(
      &self.date_display_format
    ) {
      warn!(
        format = %self.date_display_format,
        "invalid date_display_format; \
         using default"
      );
      self.date_display_format =
        defaults.date_display_format;
    }

    debug!(config = ?self, "sanitized config");
  }
}

fn is_valid_date_format(
  format: &str
) -> bool {
  !format.is_empty()
    && StrftimeItems::new(format)
      .all(|item| {
        !matches!(item, Item::Error)
      })
}
