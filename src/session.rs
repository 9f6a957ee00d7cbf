// src/session.rs

use std::collections::BTreeMap;
use std::time::Duration;

use crate::config::SUCCESS_DELAY;
use crate::levels::LevelStore;
use crate::model::Level;
use crate::progress::{ProgressStore, ProgressTracker};
use crate::validator::{LevelVerdict, Submissions, validate_level};

/// Lo que la UI necesita saber de la sesión. Todos los métodos son opcionales.
pub trait SessionObserver {
    fn level_loaded(&mut self, _index: usize, _level: &Level) {}
    fn blanks_checked(&mut self, _verdict: &LevelVerdict) {}
    /// Todos los huecos correctos: aplicar `level.expected_declaration` a la bola.
    fn success(&mut self, _level: &Level) {}
    fn success_cleared(&mut self) {}
    fn all_levels_completed(&mut self) {}
}

impl SessionObserver for () {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    pub fn offset(self) -> isize {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

/// Avance programado tras un acierto, ligado al nivel que lo programó.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingAdvance {
    pub level_index: usize,
    pub due: Duration,
}

/// Estado de la partida: nivel actual, corrección por hueco y el avance
/// pendiente. El reloj lo inyecta quien llama (`now` desde el arranque).
#[derive(Debug)]
pub struct LevelSession<S> {
    levels: LevelStore,
    tracker: ProgressTracker<S>,
    current: usize,
    blank_state: BTreeMap<usize, bool>,
    pending: Option<PendingAdvance>,
    finished: bool,
}

impl<S: ProgressStore> LevelSession<S> {
    /// Crea la sesión en el nivel 0 (sin notificar; llama a `resume` o
    /// `load_level` para pintar el primero).
    pub fn new(levels: LevelStore, tracker: ProgressTracker<S>) -> Self {
        Self {
            levels,
            tracker,
            current: 0,
            blank_state: BTreeMap::new(),
            pending: None,
            finished: false,
        }
    }

    // Accesores
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_level(&self) -> Option<&Level> {
        self.levels.get(self.current).ok()
    }

    pub fn level_count(&self) -> usize {
        self.levels.count()
    }

    /// `None` mientras el hueco no se ha comprobado desde que se cargó el nivel.
    pub fn blank_state(&self, line_index: usize) -> Option<bool> {
        self.blank_state.get(&line_index).copied()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn pending_advance(&self) -> Option<PendingAdvance> {
        self.pending
    }

    pub fn is_success_showing(&self) -> bool {
        self.pending.is_some()
    }

    pub fn tracker(&self) -> &ProgressTracker<S> {
        &self.tracker
    }

    pub fn levels(&self) -> &LevelStore {
        &self.levels
    }

    /// Carga un nivel si existe y es accesible; si no, no hace nada.
    pub fn load_level<O: SessionObserver + ?Sized>(&mut self, index: usize, observer: &mut O) -> bool {
        let level = match self.levels.get(index) {
            Ok(level) => level,
            Err(e) => {
                log::debug!("Ignoring load request: {e}");
                return false;
            }
        };
        if !self.tracker.is_accessible(index) {
            log::debug!("Ignoring load request: level {} is locked", level.id);
            return false;
        }

        self.current = index;
        self.blank_state.clear();
        self.pending = None;
        self.finished = false;

        log::info!("Loaded {}", level.title);
        observer.level_loaded(index, level);
        true
    }

    pub fn navigate<O: SessionObserver + ?Sized>(&mut self, direction: Direction, observer: &mut O) -> bool {
        match self.current.checked_add_signed(direction.offset()) {
            Some(target) if self.levels.contains(target) => self.load_level(target, observer),
            _ => false,
        }
    }

    /// Carga el primer nivel sin completar (o el último si ya están todos).
    pub fn resume<O: SessionObserver + ?Sized>(&mut self, observer: &mut O) -> bool {
        let count = self.levels.count();
        let target = (0..count)
            .find(|&idx| !self.tracker.is_completed(idx))
            .unwrap_or(count.saturating_sub(1));
        self.load_level(target, observer) || self.load_level(0, observer)
    }

    pub fn submit<O: SessionObserver + ?Sized>(
        &mut self,
        submissions: &Submissions,
        now: Duration,
        observer: &mut O,
    ) -> LevelVerdict {
        let index = self.current;
        let level = match self.levels.get(index) {
            Ok(level) => level,
            Err(e) => {
                log::error!("Submit without a valid level: {e}");
                return LevelVerdict::default();
            }
        };

        let verdict = validate_level(level, submissions);
        self.blank_state = verdict.per_blank.clone();
        observer.blanks_checked(&verdict);

        if !verdict.all_correct {
            log::debug!(
                "Level {}: {}/{} blanks correct",
                level.id,
                verdict.correct_count(),
                level.blanks.len()
            );
            return verdict;
        }

        // Un segundo acierto durante la espera no vuelve a programar nada
        if self.pending.is_some_and(|p| p.level_index == index) {
            return verdict;
        }

        observer.success(level);
        self.tracker.mark_complete(index);
        self.pending = Some(PendingAdvance {
            level_index: index,
            due: now + SUCCESS_DELAY,
        });
        log::info!("Level {} completed", level.id);
        verdict
    }

    /// Ejecuta el avance pendiente si ya ha vencido. Llamar en cada frame.
    pub fn tick<O: SessionObserver + ?Sized>(&mut self, now: Duration, observer: &mut O) -> bool {
        let due = match self.pending {
            Some(p) if p.level_index == self.current && now >= p.due => p,
            Some(p) if p.level_index != self.current => {
                self.pending = None;
                return false;
            }
            _ => return false,
        };

        self.pending = None;
        observer.success_cleared();

        let next = due.level_index + 1;
        if next < self.levels.count() {
            self.load_level(next, observer);
        } else {
            self.finished = true;
            log::info!("All {} levels completed", self.levels.count());
            observer.all_levels_completed();
        }
        true
    }

    /// Borra el progreso y vuelve al primer nivel.
    pub fn reset_progress<O: SessionObserver + ?Sized>(&mut self, observer: &mut O) {
        self.tracker.reset();
        self.load_level(0, observer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Blank;
    use crate::progress::MemoryStore;

    #[derive(Debug, PartialEq)]
    enum Event {
        Loaded(usize),
        Checked(bool),
        Success(String),
        Cleared,
        AllDone,
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<Event>,
    }

    impl SessionObserver for Recorder {
        fn level_loaded(&mut self, index: usize, _level: &Level) {
            self.events.push(Event::Loaded(index));
        }
        fn blanks_checked(&mut self, verdict: &LevelVerdict) {
            self.events.push(Event::Checked(verdict.all_correct));
        }
        fn success(&mut self, level: &Level) {
            self.events.push(Event::Success(level.expected_declaration.clone()));
        }
        fn success_cleared(&mut self) {
            self.events.push(Event::Cleared);
        }
        fn all_levels_completed(&mut self) {
            self.events.push(Event::AllDone);
        }
    }

    fn level(id: u32, blanks: &[(usize, &str)], css: &str) -> Level {
        Level {
            id,
            title: format!("Level {id}"),
            description: String::new(),
            code: vec![
                ".ball {".into(),
                "  transform: _____;".into(),
                "  animation: _____;".into(),
                "}".into(),
            ],
            blanks: blanks
                .iter()
                .map(|(line, answer)| Blank {
                    line_index: *line,
                    expected_answer: answer.to_string(),
                })
                .collect(),
            solution: String::new(),
            keyword: None,
            topic_description: None,
            question: None,
            expected_declaration: css.into(),
        }
    }

    fn session(count: u32) -> LevelSession<MemoryStore> {
        let mut levels = vec![level(1, &[(1, "translateX(200px)")], "transform: translateX(200px);")];
        for id in 2..=count {
            levels.push(level(
                id,
                &[(1, "rotate(45deg)"), (2, "spin 1s infinite")],
                "transform: rotate(45deg); animation: spin 1s infinite;",
            ));
        }
        let store = LevelStore::new(levels).expect("valid levels");
        LevelSession::new(store, ProgressTracker::load(MemoryStore::new()))
    }

    fn subs(pairs: &[(usize, &str)]) -> Submissions {
        pairs.iter().map(|(l, v)| (*l, v.to_string())).collect()
    }

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn correct_answer_completes_and_advances_after_delay() {
        let mut s = session(2);
        let mut rec = Recorder::default();
        assert!(s.load_level(0, &mut rec));

        let verdict = s.submit(&subs(&[(1, "TranslateX( 200PX )")]), ms(1000), &mut rec);
        assert!(verdict.all_correct);
        assert!(s.tracker().is_completed(0));
        assert_eq!(s.blank_state(1), Some(true));
        assert_eq!(s.pending_advance().map(|p| p.due), Some(ms(3000)));

        // todavía no ha pasado el retardo
        assert!(!s.tick(ms(2999), &mut rec));
        assert_eq!(s.current_index(), 0);

        assert!(s.tick(ms(3000), &mut rec));
        assert_eq!(s.current_index(), 1);
        assert_eq!(s.blank_state(1), None);
        assert_eq!(
            rec.events,
            vec![
                Event::Loaded(0),
                Event::Checked(true),
                Event::Success("transform: translateX(200px);".into()),
                Event::Cleared,
                Event::Loaded(1),
            ]
        );
    }

    #[test]
    fn last_level_reports_completion() {
        let mut s = session(1);
        let mut rec = Recorder::default();
        s.load_level(0, &mut rec);
        s.submit(&subs(&[(1, "translateX(200px)")]), ms(0), &mut rec);
        s.tick(SUCCESS_DELAY, &mut rec);

        assert!(s.is_finished());
        assert_eq!(s.current_index(), 0);
        assert_eq!(rec.events.last(), Some(&Event::AllDone));
    }

    #[test]
    fn partial_answer_does_not_complete() {
        let mut s = session(3);
        let mut rec = Recorder::default();
        s.tracker.mark_complete(0);
        assert!(s.load_level(1, &mut rec));

        let verdict = s.submit(&subs(&[(1, "rotate(45deg)"), (2, "spin 2s infinite")]), ms(0), &mut rec);
        assert!(!verdict.all_correct);
        assert_eq!(s.blank_state(1), Some(true));
        assert_eq!(s.blank_state(2), Some(false));
        assert!(!s.tracker().is_completed(1));
        assert_eq!(s.pending_advance(), None);

        assert!(!s.tick(ms(10_000), &mut rec));
        assert_eq!(s.current_index(), 1);
    }

    #[test]
    fn locked_and_out_of_range_loads_are_ignored() {
        let mut s = session(3);
        let mut rec = Recorder::default();
        s.load_level(0, &mut rec);

        assert!(!s.load_level(2, &mut rec));
        assert!(!s.load_level(42, &mut rec));
        assert!(!s.navigate(Direction::Previous, &mut rec));
        assert!(!s.navigate(Direction::Next, &mut rec));
        assert_eq!(s.current_index(), 0);
        assert_eq!(rec.events, vec![Event::Loaded(0)]);
    }

    #[test]
    fn next_from_last_level_is_a_no_op() {
        let mut s = session(3);
        let mut rec = Recorder::default();
        s.tracker.mark_complete(0);
        s.tracker.mark_complete(1);
        s.tracker.mark_complete(2);
        assert!(s.load_level(2, &mut rec));
        assert!(!s.navigate(Direction::Next, &mut rec));
        assert_eq!(s.current_index(), 2);
    }

    #[test]
    fn navigation_resets_blank_state() {
        let mut s = session(3);
        let mut rec = Recorder::default();
        s.tracker.mark_complete(0);
        s.tracker.mark_complete(1);
        s.load_level(2, &mut rec);
        s.submit(&subs(&[(1, "nope"), (2, "spin 1s infinite")]), ms(0), &mut rec);
        assert_eq!(s.blank_state(1), Some(false));

        // nivel accesible pero no visitado en esta sesión
        assert!(s.navigate(Direction::Previous, &mut rec));
        assert_eq!(s.current_index(), 1);
        assert_eq!(s.blank_state(1), None);
        assert_eq!(s.blank_state(2), None);
    }

    #[test]
    fn navigating_away_cancels_pending_advance() {
        let mut s = session(3);
        let mut rec = Recorder::default();
        s.tracker.mark_complete(0);
        s.load_level(1, &mut rec);
        s.submit(&subs(&[(1, "rotate(45deg)"), (2, "spin 1s infinite")]), ms(0), &mut rec);
        assert!(s.pending_advance().is_some());

        assert!(s.navigate(Direction::Previous, &mut rec));
        assert_eq!(s.pending_advance(), None);
        assert!(!s.tick(ms(5000), &mut rec));
        assert_eq!(s.current_index(), 0);
        // el nivel sigue completado
        assert!(s.tracker().is_completed(1));
    }

    #[test]
    fn repeated_success_does_not_reschedule() {
        let mut s = session(2);
        let mut rec = Recorder::default();
        s.load_level(0, &mut rec);
        let answer = subs(&[(1, "translateX(200px)")]);
        s.submit(&answer, ms(0), &mut rec);
        s.submit(&answer, ms(1500), &mut rec);

        assert_eq!(s.pending_advance().map(|p| p.due), Some(SUCCESS_DELAY));
        let successes = rec.events.iter().filter(|e| matches!(e, Event::Success(_))).count();
        assert_eq!(successes, 1);

        assert!(s.tick(SUCCESS_DELAY, &mut rec));
        assert!(!s.tick(SUCCESS_DELAY * 2, &mut rec));
        assert_eq!(s.current_index(), 1);
    }

    #[test]
    fn resume_picks_first_pending_level() {
        let mut s = session(3);
        let mut rec = Recorder::default();
        s.tracker.mark_complete(0);
        assert!(s.resume(&mut rec));
        assert_eq!(s.current_index(), 1);

        s.tracker.mark_complete(1);
        s.tracker.mark_complete(2);
        assert!(s.resume(&mut rec));
        assert_eq!(s.current_index(), 2);
    }

    #[test]
    fn reset_progress_returns_to_first_level() {
        let mut s = session(3);
        let mut rec = Recorder::default();
        s.tracker.mark_complete(0);
        s.tracker.mark_complete(1);
        s.load_level(2, &mut rec);

        s.reset_progress(&mut rec);
        assert_eq!(s.current_index(), 0);
        assert!(s.tracker().completed_levels().is_empty());
        assert!(!s.navigate(Direction::Next, &mut rec));
    }
}
