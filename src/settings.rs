use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub const SETTINGS_FILE: &str = "settings.json";

pub const KEY_CURRENT_USER: &str = "currentUser";
pub const KEY_PAGE_SIZE: &str = "pageSize";
pub const KEY_SORT_BY: &str = "sortBy";

#[derive(Debug, Error)]
pub enum SettingsError {
  #[error("settings io error: {0}")]
  Io(#[from] std::io::Error),
  #[error("settings file is not valid json: {0}")]
  Json(#[from] serde_json::Error),
}

fn defaults() -> Map<String, Value> {
  let mut map = Map::new();
  map.insert(KEY_PAGE_SIZE.to_string(), json!(12));
  map.insert(KEY_SORT_BY.to_string(), json!("isim"));
  map
}

/// Preferences and the persisted user record, kept in one JSON file.
#[derive(Clone, Debug)]
pub struct SettingsStore {
  path: Option<PathBuf>,
  values: Arc<Mutex<Map<String, Value>>>,
}

impl SettingsStore {
  pub fn open(dir: &Path) -> Result<Self, SettingsError> {
    let path = dir.join(SETTINGS_FILE);
    let mut values = defaults();
    if path.exists() {
      let data = std::fs::read_to_string(&path)?;
      if !data.trim().is_empty() {
        let stored: Map<String, Value> = serde_json::from_str(&data)?;
        values.extend(stored);
      }
    }
    Ok(Self {
      path: Some(path),
      values: Arc::new(Mutex::new(values)),
    })
  }

  pub fn in_memory() -> Self {
    Self {
      path: None,
      values: Arc::new(Mutex::new(defaults())),
    }
  }

  fn with_values<T>(&self, f: impl FnOnce(&mut Map<String, Value>) -> T) -> T {
    let mut guard = match self.values.lock() {
      Ok(guard) => guard,
      Err(poisoned) => poisoned.into_inner(),
    };
    f(&mut guard)
  }

  fn get(&self, key: &str) -> Option<Value> {
    self.with_values(|values| values.get(key).cloned())
  }

  pub fn get_u64(&self, key: &str, fallback: u64) -> u64 {
    self.get(key).and_then(|v| v.as_u64()).unwrap_or(fallback)
  }

  pub fn get_string(&self, key: &str) -> Option<String> {
    let v = self.get(key)?;
    let s = v.as_str()?.trim();
    if s.is_empty() {
      None
    } else {
      Some(s.to_string())
    }
  }

  pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
    let v = self.get(key)?;
    if v.is_null() {
      return None;
    }
    serde_json::from_value(v).ok()
  }

  pub fn set(&self, key: &str, value: impl Into<Value>) -> Result<(), SettingsError> {
    let value = value.into();
    self.with_values(|values| {
      values.insert(key.to_string(), value);
    });
    self.save()
  }

  pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), SettingsError> {
    let value = serde_json::to_value(value)?;
    self.set(key, value)
  }

  pub fn remove(&self, key: &str) -> Result<(), SettingsError> {
    self.with_values(|values| {
      values.remove(key);
    });
    self.save()
  }

  fn save(&self) -> Result<(), SettingsError> {
    let Some(path) = &self.path else {
      return Ok(());
    };
    let data = self.with_values(|values| serde_json::to_string_pretty(&*values))?;
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    let tmp = temp_path(path);
    if let Err(e) = std::fs::write(&tmp, data).and_then(|()| std::fs::rename(&tmp, path)) {
      let _ = std::fs::remove_file(&tmp);
      return Err(e.into());
    }
    Ok(())
  }
}

/// Unique per process and write, so concurrent runs never share a temp file.
fn temp_path(path: &Path) -> PathBuf {
  static WRITES: AtomicU64 = AtomicU64::new(0);
  let seq = WRITES.fetch_add(1, Ordering::Relaxed);
  let nanos = time::OffsetDateTime::now_utc().unix_timestamp_nanos();
  path.with_extension(format!("json.{}-{nanos}-{seq}.tmp", std::process::id()))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn scratch_dir(name: &str) -> PathBuf {
    let nanos = time::OffsetDateTime::now_utc().unix_timestamp_nanos();
    std::env::temp_dir().join(format!("rehber-{name}-{}-{nanos}", std::process::id()))
  }

  #[test]
  fn defaults_are_served_before_anything_is_saved() {
    let store = SettingsStore::in_memory();
    assert_eq!(store.get_u64(KEY_PAGE_SIZE, 0), 12);
    assert_eq!(store.get_string(KEY_SORT_BY).as_deref(), Some("isim"));
    assert_eq!(store.get_string(KEY_CURRENT_USER), None);
  }

  #[test]
  fn values_survive_reopening_the_file() {
    let dir = scratch_dir("settings");
    let store = SettingsStore::open(&dir).unwrap();
    store.set(KEY_PAGE_SIZE, 24).unwrap();
    store.set(KEY_SORT_BY, "eposta").unwrap();

    let reopened = SettingsStore::open(&dir).unwrap();
    assert_eq!(reopened.get_u64(KEY_PAGE_SIZE, 0), 24);
    assert_eq!(reopened.get_string(KEY_SORT_BY).as_deref(), Some("eposta"));

    reopened.remove(KEY_SORT_BY).unwrap();
    let reopened = SettingsStore::open(&dir).unwrap();
    assert_eq!(reopened.get_string(KEY_SORT_BY).as_deref(), Some("isim"));

    let _ = std::fs::remove_dir_all(&dir);
  }

  #[test]
  fn concurrent_writers_leave_valid_json_and_no_temp_files() {
    let dir = scratch_dir("settings-race");
    let writers: Vec<_> = (0..4u64)
      .map(|n| {
        let store = SettingsStore::open(&dir).unwrap();
        std::thread::spawn(move || {
          for i in 0..25 {
            store.set(KEY_PAGE_SIZE, n * 100 + i).unwrap();
          }
        })
      })
      .collect();
    for writer in writers {
      writer.join().unwrap();
    }

    let reopened = SettingsStore::open(&dir).unwrap();
    assert!(reopened.get_u64(KEY_PAGE_SIZE, 0) >= 24);
    let leftovers: Vec<_> = std::fs::read_dir(&dir)
      .unwrap()
      .filter_map(Result::ok)
      .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
      .collect();
    assert!(leftovers.is_empty());

    let _ = std::fs::remove_dir_all(&dir);
  }

  #[test]
  fn temp_names_differ_between_writes() {
    let path = Path::new("/tmp/settings.json");
    assert_ne!(temp_path(path), temp_path(path));
  }

  #[test]
  fn blank_strings_read_as_missing() {
    let store = SettingsStore::in_memory();
    store.set(KEY_SORT_BY, "   ").unwrap();
    assert_eq!(store.get_string(KEY_SORT_BY), None);
  }
}
