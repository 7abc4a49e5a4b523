pub mod banner;
pub mod config;
pub mod draft;
pub mod error;
pub mod render;
pub mod search;
pub mod slot;
pub mod stats;
pub mod store;
pub mod task;
pub mod undo;
pub mod voice;

pub use banner::{
  BannerMessage,
  BannerTicket,
  ErrorBanner
};
pub use config::AppConfig;
pub use draft::{
  DATE_INPUT_FORMAT,
  EntryDraft
};
pub use error::TaskError;
pub use render::{
  DeadlineStatus,
  Renderer,
  TaskRow
};
pub use search::{
  is_visible,
  visibility_mask
};
pub use slot::{
  KeyValueSlot,
  MemorySlot
};
#[cfg(not(target_arch = "wasm32"))]
pub use slot::FileSlot;
pub use stats::{
  Stats,
  compute_stats
};
pub use store::{
  RemovedTask,
  TaskStore
};
pub use task::{
  Priority,
  Task
};
pub use undo::{
  ExpiryTicket,
  UndoController,
  UndoState
};
pub use voice::{
  VoiceCapture,
  VoiceTarget,
  VoiceTranscript,
  normalize_transcript
};
