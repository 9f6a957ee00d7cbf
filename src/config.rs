// src/config.rs

use std::path::PathBuf;
use std::time::Duration;

/// Tiempo que se muestra el estado de éxito antes de pasar al siguiente nivel.
pub const SUCCESS_DELAY: Duration = Duration::from_millis(2000);

/// Clave de almacenamiento del progreso (mismo nombre que la versión web).
pub const PROGRESS_KEY: &str = "animationArcadeProgress";
pub const THEME_KEY: &str = "animation-arcade-theme";

/// Marcador de hueco dentro de una línea de código.
pub const BLANK_PLACEHOLDER: &str = "_____";

pub const LEVELS_ENV: &str = "ANIMATION_ARCADE_LEVELS";

const DEFAULT_TITLE: &str = "Animation Arcade";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LevelsSource {
    Embedded,
    File(PathBuf),
}

#[derive(Clone, Debug)]
pub struct ArcadeConfig {
    pub window_title: String,
    pub levels: LevelsSource,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            window_title: DEFAULT_TITLE.to_string(),
            levels: LevelsSource::Embedded,
        }
    }
}

impl ArcadeConfig {
    /// Lee la configuración del entorno. En web siempre se usan los niveles embebidos.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(path) = std::env::var_os(LEVELS_ENV).and_then(normalize_path) {
            config.levels = LevelsSource::File(path);
        }

        config
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn normalize_path(value: std::ffi::OsString) -> Option<PathBuf> {
    let trimmed = value.to_string_lossy().trim().to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_embedded_levels() {
        let config = ArcadeConfig::default();
        assert_eq!(config.levels, LevelsSource::Embedded);
        assert_eq!(config.window_title, "Animation Arcade");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn blank_env_path_is_ignored() {
        assert_eq!(normalize_path("   ".into()), None);
        assert_eq!(
            normalize_path(" levels.yaml ".into()),
            Some(PathBuf::from("levels.yaml"))
        );
    }
}
