use crate::animation::BallStyle;
use crate::config::{ArcadeConfig, PROGRESS_KEY, THEME_KEY};
use crate::levels::LevelStore;
use crate::model::{AppState, Level, Theme};
use crate::progress::{MemoryStore, ProgressStore, ProgressTracker};
use crate::session::{LevelSession, SessionObserver};
use crate::validator::Submissions;

// Submódulos
pub mod actions;
pub mod resets;

/// Estado de pantalla del nivel actual. Es el observador de la sesión: la
/// sesión decide, esto sólo refleja lo que hay que pintar.
#[derive(Debug, Default)]
pub struct GameView {
    pub inputs: Submissions, // texto escrito en cada hueco
    pub success: bool,
    pub ball: BallStyle,
    /// Tiempo de egui (segundos) en que se aplicó el estilo; `None` hasta el siguiente frame.
    pub ball_started: Option<f64>,
    pub solution_revealed: bool,
    pub confirm_solution: bool,
    pub focus_first_input: bool,
    pub completed_all: bool,
}

impl GameView {
    pub fn ball_elapsed(&self, now: f64) -> f32 {
        self.ball_started.map(|t| (now - t).max(0.0) as f32).unwrap_or(0.0)
    }
}

impl SessionObserver for GameView {
    fn level_loaded(&mut self, _index: usize, level: &Level) {
        self.inputs = level
            .blanks
            .iter()
            .map(|b| (b.line_index, String::new()))
            .collect();
        self.success = false;
        self.ball = BallStyle::default();
        self.ball_started = None;
        self.solution_revealed = false;
        self.confirm_solution = false;
        self.focus_first_input = true;
        self.completed_all = false;
    }

    fn success(&mut self, level: &Level) {
        self.ball = BallStyle::from_css(&level.expected_declaration);
        self.ball_started = None;
        self.success = true;
    }

    fn success_cleared(&mut self) {
        self.success = false;
    }

    fn all_levels_completed(&mut self) {
        self.completed_all = true;
    }
}

pub struct ArcadeApp {
    pub session: Option<LevelSession<MemoryStore>>,
    pub view: GameView,
    pub state: AppState,
    pub load_error: Option<String>,
    pub theme: Theme,
    pub confirm_reset: bool,
    pub message: String,
}

impl ArcadeApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &ArcadeConfig) -> Self {
        let store = cc
            .storage
            .and_then(|s| s.get_string(PROGRESS_KEY))
            .map(|raw| MemoryStore::with_value(PROGRESS_KEY, raw))
            .unwrap_or_default();

        let mut app = Self::with_store(config, store);
        app.theme = cc
            .storage
            .and_then(|s| eframe::get_value::<Theme>(s, THEME_KEY))
            .unwrap_or_default();
        app
    }

    /// Arranque sin eframe (tests y herramientas). Un fallo al cargar los
    /// niveles deja la app en `AppState::LoadError`.
    pub fn with_store(config: &ArcadeConfig, store: MemoryStore) -> Self {
        let mut view = GameView::default();

        let (session, state, load_error) = match LevelStore::load(&config.levels) {
            Ok(levels) => {
                let mut session = LevelSession::new(levels, ProgressTracker::load(store));
                session.resume(&mut view);
                (Some(session), AppState::Playing, None)
            }
            Err(e) => {
                log::error!("Could not start the game: {e}");
                (None, AppState::LoadError, Some(e.to_string()))
            }
        };

        Self {
            session,
            view,
            state,
            load_error,
            theme: Theme::default(),
            confirm_reset: false,
            message: String::new(),
        }
    }

    /// Progreso serializado tal y como se guarda en el storage.
    pub fn progress_payload(&self) -> Option<String> {
        self.session
            .as_ref()
            .and_then(|s| s.tracker().store().get_string(PROGRESS_KEY))
    }
}
