use std::time::Duration;

use super::*;
use crate::session::Direction;

impl ArcadeApp {
    /// Comprueba los huecos del nivel actual.
    pub fn comprobar(&mut self, now: Duration) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let inputs = self.view.inputs.clone();
        let verdict = session.submit(&inputs, now, &mut self.view);

        self.message = if verdict.all_correct {
            String::new()
        } else {
            let wrong = verdict.per_blank.len() - verdict.correct_count();
            if wrong == 1 {
                "❌ One blank is not right yet.".to_string()
            } else {
                format!("❌ {wrong} blanks are not right yet.")
            }
        };
    }

    pub fn navegar(&mut self, direction: Direction) {
        if let Some(session) = self.session.as_mut() {
            if session.navigate(direction, &mut self.view) {
                self.message.clear();
            }
        }
        self.sync_state();
    }

    /// Salto directo desde la lista de niveles.
    pub fn ir_a_nivel(&mut self, index: usize) {
        if let Some(session) = self.session.as_mut() {
            if session.load_level(index, &mut self.view) {
                self.message.clear();
            }
        }
        self.sync_state();
    }

    /// Avance diferido tras un acierto. Se llama en cada frame.
    pub fn tick(&mut self, now: Duration) {
        if let Some(session) = self.session.as_mut() {
            if session.tick(now, &mut self.view) {
                self.message.clear();
            }
        }
        self.sync_state();
    }

    pub fn pedir_solucion(&mut self) {
        if !self.view.solution_revealed {
            self.view.confirm_solution = true;
        }
    }

    pub fn revelar_solucion(&mut self) {
        self.view.confirm_solution = false;
        self.view.solution_revealed = true;
    }

    pub fn is_busy(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.pending_advance().is_some())
    }

    pub fn can_navigate(&self, direction: Direction) -> bool {
        self.session.as_ref().is_some_and(|s| {
            s.current_index()
                .checked_add_signed(direction.offset())
                .is_some_and(|t| t < s.level_count() && s.tracker().is_accessible(t))
        })
    }

    fn sync_state(&mut self) {
        if self.state == AppState::LoadError {
            return;
        }
        self.state = match &self.session {
            Some(s) if s.is_finished() => AppState::Completed,
            _ => AppState::Playing,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LevelsSource, SUCCESS_DELAY};

    fn app() -> ArcadeApp {
        ArcadeApp::with_store(&ArcadeConfig::default(), MemoryStore::new())
    }

    fn answer_current(app: &mut ArcadeApp) {
        let level = app
            .session
            .as_ref()
            .and_then(|s| s.current_level())
            .cloned()
            .expect("current level");
        for blank in &level.blanks {
            app.view
                .inputs
                .insert(blank.line_index, blank.expected_answer.to_uppercase());
        }
    }

    #[test]
    fn starts_on_first_level_with_empty_inputs() {
        let app = app();
        assert_eq!(app.state, AppState::Playing);
        assert_eq!(app.session.as_ref().map(|s| s.current_index()), Some(0));
        assert_eq!(app.view.inputs.get(&1).map(String::as_str), Some(""));
        assert!(!app.can_navigate(Direction::Next));
    }

    #[test]
    fn winning_a_level_applies_the_ball_style_and_moves_on() {
        let mut app = app();
        answer_current(&mut app);
        app.comprobar(Duration::ZERO);

        assert!(app.view.success);
        assert!(app.is_busy());
        assert_eq!(app.view.ball.resting_pose().dx, 200.0);

        app.tick(SUCCESS_DELAY);
        assert!(!app.view.success);
        assert_eq!(app.session.as_ref().map(|s| s.current_index()), Some(1));
        assert_eq!(app.view.ball, BallStyle::default());
        assert!(app.can_navigate(Direction::Previous));
    }

    #[test]
    fn wrong_answer_sets_message() {
        let mut app = app();
        app.view.inputs.insert(1, "rotate(45deg)".into());
        app.comprobar(Duration::ZERO);
        assert!(!app.view.success);
        assert_eq!(app.message, "❌ One blank is not right yet.");
        assert_eq!(app.session.as_ref().and_then(|s| s.blank_state(1)), Some(false));
    }

    #[test]
    fn finishing_every_level_shows_completion() {
        let mut app = app();
        let count = app.session.as_ref().map(|s| s.level_count()).unwrap_or(0);
        let mut now = Duration::ZERO;
        for _ in 0..count {
            answer_current(&mut app);
            app.comprobar(now);
            now += SUCCESS_DELAY;
            app.tick(now);
        }
        assert_eq!(app.state, AppState::Completed);
        assert!(app.view.completed_all);

        app.ir_a_nivel(3);
        assert_eq!(app.state, AppState::Playing);
    }

    #[test]
    fn solution_needs_confirmation() {
        let mut app = app();
        app.pedir_solucion();
        assert!(app.view.confirm_solution);
        assert!(!app.view.solution_revealed);
        app.revelar_solucion();
        assert!(app.view.solution_revealed);
        assert!(!app.view.confirm_solution);
    }

    #[test]
    fn broken_level_file_is_reported() {
        let config = ArcadeConfig {
            levels: LevelsSource::File("/nonexistent/levels.yaml".into()),
            ..ArcadeConfig::default()
        };
        let app = ArcadeApp::with_store(&config, MemoryStore::new());
        assert_eq!(app.state, AppState::LoadError);
        assert!(app.session.is_none());
        assert!(app.load_error.is_some());
    }
}
