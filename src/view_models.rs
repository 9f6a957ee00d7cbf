// src/view_models.rs

use crate::progress::{ProgressStore, ProgressTracker};
use crate::levels::LevelStore;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelInfo {
    pub idx: usize,    // índice 0-based en el LevelStore
    pub number: u32,   // número "humano" (id del nivel)
    pub title: String,
    pub unlocked: bool,
    pub completed: bool,
    pub current: bool,
}

impl LevelInfo {
    pub fn label(&self) -> String {
        if self.completed {
            format!("Level {} ✅", self.number)
        } else if self.unlocked {
            format!("Level {} 🔓", self.number)
        } else {
            format!("Level {} 🔒", self.number)
        }
    }
}

pub fn level_infos<S: ProgressStore>(
    levels: &LevelStore,
    tracker: &ProgressTracker<S>,
    current: usize,
) -> Vec<LevelInfo> {
    levels
        .iter()
        .enumerate()
        .map(|(idx, level)| LevelInfo {
            idx,
            number: level.id,
            title: level.title.clone(),
            unlocked: tracker.is_accessible(idx),
            completed: tracker.is_completed(idx),
            current: idx == current,
        })
        .collect()
}
