// src/data.rs

use std::collections::HashSet;

use crate::config::{BLANK_PLACEHOLDER, LevelsSource};
use crate::error::{ArcadeError, Result};
use crate::model::Level;

/// Carga los niveles embebidos en el binario.
pub fn read_levels_embedded() -> Result<Vec<Level>> {
    let file_content = include_str!("data/levels.yaml");
    parse_levels(file_content)
}

pub fn read_levels(source: &LevelsSource) -> Result<Vec<Level>> {
    match source {
        LevelsSource::Embedded => read_levels_embedded(),
        LevelsSource::File(path) => {
            let content = std::fs::read_to_string(path).map_err(|source| ArcadeError::Io {
                path: path.clone(),
                source,
            })?;
            log::info!("Loading levels from {}", path.display());
            parse_levels(&content)
        }
    }
}

/// Parsea y valida una lista de niveles. Una lista parcial no sirve: cualquier
/// fallo invalida todo.
pub fn parse_levels(yaml: &str) -> Result<Vec<Level>> {
    let levels: Vec<Level> = serde_yaml::from_str(yaml)?;
    check_levels(&levels)?;
    Ok(levels)
}

pub fn check_levels(levels: &[Level]) -> Result<()> {
    if levels.is_empty() {
        return Err(integrity("the level list is empty".into()));
    }

    for (idx, level) in levels.iter().enumerate() {
        let expected_id = idx as u32 + 1;
        if level.id != expected_id {
            return Err(integrity(format!(
                "level at position {idx} has id {} (expected {expected_id})",
                level.id
            )));
        }
        check_level(level)?;
    }
    Ok(())
}

fn check_level(level: &Level) -> Result<()> {
    let id = level.id;

    if level.blanks.is_empty() {
        return Err(integrity(format!("level {id} has no blanks")));
    }
    if level.expected_declaration.trim().is_empty() {
        return Err(integrity(format!("level {id} has an empty expected declaration")));
    }

    let mut seen = HashSet::new();
    for blank in &level.blanks {
        let line = blank.line_index;
        if !seen.insert(line) {
            return Err(integrity(format!("level {id} has two blanks on line {line}")));
        }
        match level.code.get(line) {
            None => {
                return Err(integrity(format!(
                    "level {id}: blank on line {line} but the code has {} lines",
                    level.code.len()
                )));
            }
            Some(text) if !text.contains(BLANK_PLACEHOLDER) => {
                return Err(integrity(format!(
                    "level {id}: line {line} has no {BLANK_PLACEHOLDER} placeholder"
                )));
            }
            Some(_) => {}
        }
        if blank.expected_answer.trim().is_empty() {
            return Err(integrity(format!("level {id}: blank on line {line} has an empty answer")));
        }
    }
    Ok(())
}

fn integrity(message: String) -> ArcadeError {
    ArcadeError::DataIntegrity(message)
}
