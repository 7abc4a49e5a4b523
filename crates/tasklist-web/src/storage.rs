use anyhow::{
  Context,
  anyhow
};
use tasklist_core::KeyValueSlot;

/// One `localStorage` entry used as the task list's persistent slot.
#[derive(Debug, Clone)]
pub struct LocalStorageSlot {
  key: String
}

impl LocalStorageSlot {
  pub fn new(
    key: impl Into<String>
  ) -> Self {
    Self {
      key: key.into()
    }
  }
}

impl KeyValueSlot for LocalStorageSlot {
  fn read(
    &self
  ) -> anyhow::Result<Option<String>> {
    local_storage()?
      .get_item(&self.key)
      .map_err(|error| {
        anyhow!(
          "localStorage read of {} \
           failed: {error:?}",
          self.key
        )
      })
  }

  fn write(
    &mut self,
    blob: &str
  ) -> anyhow::Result<()> {
    local_storage()?
      .set_item(&self.key, blob)
      .map_err(|error| {
        anyhow!(
          "localStorage write of {} \
           failed: {error:?}",
          self.key
        )
      })
  }
}

fn local_storage()
-> anyhow::Result<web_sys::Storage> {
  web_sys::window()
    .context("no browser window")?
    .local_storage()
    .map_err(|error| {
      anyhow!(
        "localStorage access denied: \
         {error:?}"
      )
    })?
    .context(
      "localStorage unavailable"
    )
}
