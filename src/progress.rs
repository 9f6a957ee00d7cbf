// src/progress.rs

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::config::PROGRESS_KEY;

const PROGRESS_VERSION: u32 = 1;

/// Almacén clave-valor donde se guarda el progreso. Sigue la forma de
/// `eframe::Storage` para poder volcarlo allí al guardar.
pub trait ProgressStore {
    fn get_string(&self, key: &str) -> Option<String>;
    fn set_string(&mut self, key: &str, value: String);
}

/// Almacén en memoria. La app lo siembra desde el storage de eframe al
/// arrancar y lo vuelca en `App::save`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.set_string(key, value.into());
        store
    }
}

impl ProgressStore for MemoryStore {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(untagged)]
enum StoredProgress {
    Versioned { version: u32, completed: Vec<usize> },
    // formato antiguo: array JSON sin versión
    Legacy(Vec<usize>),
}

fn decode_progress(raw: &str) -> Option<BTreeSet<usize>> {
    match serde_json::from_str::<StoredProgress>(raw) {
        Ok(StoredProgress::Versioned { version, completed }) if version <= PROGRESS_VERSION => {
            Some(completed.into_iter().collect())
        }
        Ok(StoredProgress::Versioned { version, .. }) => {
            log::warn!("Ignoring progress saved with unknown version {version}");
            None
        }
        Ok(StoredProgress::Legacy(completed)) => Some(completed.into_iter().collect()),
        Err(e) => {
            log::warn!("Ignoring unreadable progress: {e}");
            None
        }
    }
}

/// Niveles completados (índices 0-based) y la regla de acceso entre ellos.
///
/// Cada índice pasa por Bloqueado -> Accesible -> Completado; un nivel
/// completado sigue siendo accesible y sólo `reset` lo vuelve a bloquear.
#[derive(Debug)]
pub struct ProgressTracker<S> {
    completed: BTreeSet<usize>,
    store: S,
}

impl<S: ProgressStore> ProgressTracker<S> {
    pub fn load(store: S) -> Self {
        let completed = store
            .get_string(PROGRESS_KEY)
            .and_then(|raw| decode_progress(&raw))
            .unwrap_or_default();
        log::debug!("Progress loaded: {} levels completed", completed.len());
        Self { completed, store }
    }

    pub fn is_completed(&self, index: usize) -> bool {
        self.completed.contains(&index)
    }

    pub fn is_accessible(&self, index: usize) -> bool {
        index == 0 || self.is_completed(index - 1) || self.is_completed(index)
    }

    /// Idempotente. No conoce el número de niveles: cualquier índice se guarda.
    pub fn mark_complete(&mut self, index: usize) {
        if self.completed.insert(index) {
            self.save();
        }
    }

    pub fn reset(&mut self) {
        self.completed.clear();
        self.save();
    }

    pub fn completed_levels(&self) -> Vec<usize> {
        self.completed.iter().copied().collect()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn save(&mut self) {
        let payload = StoredProgress::Versioned {
            version: PROGRESS_VERSION,
            completed: self.completed_levels(),
        };
        match serde_json::to_string(&payload) {
            Ok(json) => self.store.set_string(PROGRESS_KEY, json),
            Err(e) => log::error!("Could not serialize progress: {e}"),
        }
    }
}
