use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::PathBuf,
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex, PoisonError, RwLock,
    },
};

const ENABLE_LOGS: bool = true;
use crate::log_warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }

    fn from_system(prefers_dark: bool) -> Self {
        if prefers_dark {
            ThemePreference::Dark
        } else {
            ThemePreference::Light
        }
    }
}

fn default_auto_crop() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserSettings {
    #[serde(default)]
    theme: Option<ThemePreference>,
    #[serde(default = "default_auto_crop")]
    auto_crop: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            theme: None,
            auto_crop: default_auto_crop(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type ThemeListener = Box<dyn Fn(ThemePreference) + Send + Sync>;

/// Process-wide user preferences persisted to a JSON file.
///
/// The theme is resolved once at construction: the stored preference, else
/// the system preference, else light. The resolved value is written back so
/// later launches see it as stored.
pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
    listeners: Mutex<Vec<(ListenerId, ThemeListener)>>,
    next_listener: AtomicU64,
}

impl SettingsStore {
    pub fn new(path: PathBuf, system_prefers_dark: Option<bool>) -> Result<Self> {
        let mut data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log_warn!("Ignoring unreadable settings file {}: {err}", path.display());
                UserSettings::default()
            })
        } else {
            UserSettings::default()
        };

        let needs_persist = data.theme.is_none();
        if needs_persist {
            data.theme = Some(
                system_prefers_dark
                    .map(ThemePreference::from_system)
                    .unwrap_or_default(),
            );
        }

        let store = Self {
            path,
            data: RwLock::new(data),
            listeners: Mutex::new(Vec::new()),
            next_listener: AtomicU64::new(1),
        };
        if needs_persist {
            store.persist(&store.read())?;
        }
        Ok(store)
    }

    pub fn theme(&self) -> ThemePreference {
        self.read().theme.unwrap_or_default()
    }

    /// Stores `theme` and notifies listeners when it differs from the
    /// current value. Memory is only updated once the file write succeeds.
    pub fn set_theme(&self, theme: ThemePreference) -> Result<()> {
        let changed = {
            let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
            if guard.theme == Some(theme) {
                false
            } else {
                let mut updated = guard.clone();
                updated.theme = Some(theme);
                self.persist(&updated)?;
                *guard = updated;
                true
            }
        };

        if changed {
            self.notify(theme);
        }
        Ok(())
    }

    pub fn toggle_theme(&self) -> Result<ThemePreference> {
        let next = self.theme().toggled();
        self.set_theme(next)?;
        Ok(next)
    }

    pub fn on_change<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(ThemePreference) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_listener.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Box::new(listener)));
        id
    }

    /// Returns `false` when `id` was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn auto_crop(&self) -> bool {
        self.read().auto_crop
    }

    pub fn set_auto_crop(&self, enabled: bool) -> Result<()> {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        let mut updated = guard.clone();
        updated.auto_crop = enabled;
        self.persist(&updated)?;
        *guard = updated;
        Ok(())
    }

    /// Re-reads the file, notifying listeners if the theme changed on disk.
    pub fn reload(&self) -> Result<()> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {}", self.path.display()))?;
        let mut data: UserSettings = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings in {}", self.path.display()))?;

        let previous = self.theme();
        let theme = *data.theme.get_or_insert(previous);
        *self.data.write().unwrap_or_else(PoisonError::into_inner) = data;

        if theme != previous {
            self.notify(theme);
        }
        Ok(())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, UserSettings> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, theme: ThemePreference) {
        let listeners = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        for (_, listener) in listeners.iter() {
            listener(theme);
        }
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{atomic::AtomicUsize, Arc};

    use super::*;

    fn settings_path() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        (dir, path)
    }

    #[test]
    fn first_run_uses_system_preference_and_persists_it() {
        let (_dir, path) = settings_path();
        let store = SettingsStore::new(path.clone(), Some(true)).unwrap();
        assert_eq!(store.theme(), ThemePreference::Dark);
        assert!(store.auto_crop());

        let stored = fs::read_to_string(&path).unwrap();
        assert!(stored.contains("\"dark\""));
    }

    #[test]
    fn defaults_to_light_without_system_preference() {
        let (_dir, path) = settings_path();
        let store = SettingsStore::new(path, None).unwrap();
        assert_eq!(store.theme(), ThemePreference::Light);
    }

    #[test]
    fn stored_preference_wins_over_system() {
        let (_dir, path) = settings_path();
        fs::write(&path, r#"{"theme":"light","auto_crop":false}"#).unwrap();

        let store = SettingsStore::new(path, Some(true)).unwrap();
        assert_eq!(store.theme(), ThemePreference::Light);
        assert!(!store.auto_crop());
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let (_dir, path) = settings_path();
        fs::write(&path, "not json").unwrap();

        let store = SettingsStore::new(path, Some(false)).unwrap();
        assert_eq!(store.theme(), ThemePreference::Light);
        assert!(store.auto_crop());
    }

    #[test]
    fn toggle_persists_and_notifies() {
        let (_dir, path) = settings_path();
        let store = SettingsStore::new(path.clone(), None).unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        store.on_change(move |theme| sink.lock().unwrap().push(theme));

        assert_eq!(store.toggle_theme().unwrap(), ThemePreference::Dark);
        assert_eq!(store.toggle_theme().unwrap(), ThemePreference::Light);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![ThemePreference::Dark, ThemePreference::Light]
        );

        let reopened = SettingsStore::new(path, Some(true)).unwrap();
        assert_eq!(reopened.theme(), ThemePreference::Light);
    }

    #[test]
    fn setting_the_same_theme_is_silent() {
        let (_dir, path) = settings_path();
        let store = SettingsStore::new(path, None).unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        store.on_change(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.set_theme(ThemePreference::Light).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn removed_listeners_stop_receiving() {
        let (_dir, path) = settings_path();
        let store = SettingsStore::new(path, None).unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let id = store.on_change(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.toggle_theme().unwrap();
        assert!(store.remove_listener(id));
        assert!(!store.remove_listener(id));
        store.toggle_theme().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn auto_crop_round_trips_through_the_file() {
        let (_dir, path) = settings_path();
        let store = SettingsStore::new(path.clone(), None).unwrap();
        store.set_auto_crop(false).unwrap();

        let reopened = SettingsStore::new(path, None).unwrap();
        assert!(!reopened.auto_crop());
    }

    #[test]
    fn reload_picks_up_external_edits() {
        let (_dir, path) = settings_path();
        let store = SettingsStore::new(path.clone(), None).unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        store.on_change(move |theme| sink.lock().unwrap().push(theme));

        fs::write(&path, r#"{"theme":"dark","auto_crop":true}"#).unwrap();
        store.reload().unwrap();

        assert_eq!(store.theme(), ThemePreference::Dark);
        assert_eq!(*seen.lock().unwrap(), vec![ThemePreference::Dark]);
    }

    #[test]
    fn failed_write_leaves_settings_unchanged() {
        let (_dir, path) = settings_path();
        let store = SettingsStore::new(path.clone(), None).unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        store.on_change(move |theme| sink.lock().unwrap().push(theme));

        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(store.set_theme(ThemePreference::Dark).is_err());
        assert_eq!(store.theme(), ThemePreference::Light);
        assert!(store.set_auto_crop(false).is_err());
        assert!(store.auto_crop());
        assert!(seen.lock().unwrap().is_empty());

        fs::remove_dir(&path).unwrap();
        store.set_theme(ThemePreference::Dark).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![ThemePreference::Dark]);
        assert!(fs::read_to_string(&path).unwrap().contains("\"dark\""));
    }
}
