// src/levels.rs

use crate::config::LevelsSource;
use crate::data::{check_levels, read_levels};
use crate::error::{ArcadeError, Result};
use crate::model::Level;

/// Lista ordenada e inmutable de niveles (índices 0-based contiguos).
#[derive(Debug, Clone)]
pub struct LevelStore {
    levels: Vec<Level>,
}

impl LevelStore {
    /// Construye el almacén validando los datos.
    pub fn new(levels: Vec<Level>) -> Result<Self> {
        check_levels(&levels)?;
        Ok(Self { levels })
    }

    pub fn load(source: &LevelsSource) -> Result<Self> {
        let levels = read_levels(source)?;
        log::info!("Loaded {} levels", levels.len());
        Ok(Self { levels })
    }

    pub fn get(&self, index: usize) -> Result<&Level> {
        self.levels.get(index).ok_or(ArcadeError::OutOfRange {
            index,
            count: self.levels.len(),
        })
    }

    pub fn count(&self) -> usize {
        self.levels.len()
    }

    pub fn contains(&self, index: usize) -> bool {
        index < self.levels.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Level> {
        self.levels.iter()
    }
}
