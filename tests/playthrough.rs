// Plays the whole game through the public session API with an injected clock.

use std::time::Duration;

use animation_arcade::config::{LevelsSource, PROGRESS_KEY, SUCCESS_DELAY};
use animation_arcade::levels::LevelStore;
use animation_arcade::progress::{MemoryStore, ProgressStore, ProgressTracker};
use animation_arcade::session::{Direction, LevelSession};
use animation_arcade::validator::Submissions;

fn answers(session: &LevelSession<MemoryStore>) -> Submissions {
    session
        .current_level()
        .map(|level| {
            level
                .blanks
                .iter()
                .map(|b| (b.line_index, b.expected_answer.clone()))
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn full_playthrough_persists_progress() {
    let levels = LevelStore::load(&LevelsSource::Embedded).expect("levels");
    let count = levels.count();
    let mut session = LevelSession::new(levels, ProgressTracker::load(MemoryStore::new()));
    assert!(session.resume(&mut ()));

    let mut now = Duration::ZERO;
    for expected in 0..count {
        assert_eq!(session.current_index(), expected);
        assert!(!session.tracker().is_accessible(expected + 1) || expected + 1 == count);

        let verdict = session.submit(&answers(&session), now, &mut ());
        assert!(verdict.all_correct);
        assert!(session.is_success_showing());

        // El avance no llega antes de tiempo
        assert!(!session.tick(now + SUCCESS_DELAY - Duration::from_millis(1), &mut ()));
        now += SUCCESS_DELAY;
        assert!(session.tick(now, &mut ()));
    }

    assert!(session.is_finished());
    let payload = session
        .tracker()
        .store()
        .get_string(PROGRESS_KEY)
        .expect("progress saved");

    // Una sesión nueva con el mismo almacén recuerda todo
    let levels = LevelStore::load(&LevelsSource::Embedded).expect("levels");
    let tracker = ProgressTracker::load(MemoryStore::with_value(PROGRESS_KEY, payload));
    let mut resumed = LevelSession::new(levels, tracker);
    assert!(resumed.resume(&mut ()));
    assert_eq!(resumed.current_index(), count - 1);
    assert!((0..count).all(|i| resumed.tracker().is_accessible(i)));
    assert!(resumed.navigate(Direction::Previous, &mut ()));
    assert_eq!(resumed.current_index(), count - 2);
}

#[test]
fn leaving_a_level_cancels_its_advance() {
    let levels = LevelStore::load(&LevelsSource::Embedded).expect("levels");
    let mut session = LevelSession::new(levels, ProgressTracker::load(MemoryStore::new()));
    session.resume(&mut ());

    session.submit(&answers(&session), Duration::ZERO, &mut ());
    assert!(session.navigate(Direction::Next, &mut ()));
    assert!(session.navigate(Direction::Previous, &mut ()));
    assert_eq!(session.current_index(), 0);

    assert!(!session.tick(SUCCESS_DELAY * 2, &mut ()));
    assert_eq!(session.current_index(), 0);
}
